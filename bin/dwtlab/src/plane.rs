// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

use clap::ArgMatches;
use log::debug;
use std::path::Path;
use wavelift::{Coefficient, DecodeSessionConfig, WaveletType, aligned_stride, padded_dimension};

use crate::{AppError, Result};

/// Options shared by the transform subcommands
#[derive(Debug, Clone)]
pub struct TransformOptions {
  pub wavelets: Vec<WaveletType>,
  pub width: usize,
  pub height: usize,
  pub depth: usize,
  pub bits: u32,
  pub planes: usize,
}

impl TransformOptions {
  pub fn from_matches(options: &ArgMatches) -> Result<Self> {
    let wavelets = match options.get_one::<WaveletType>("wavelet") {
      Some(wavelet) => vec![*wavelet],
      None => WaveletType::ALL.to_vec(),
    };
    let planes = *options.get_one::<usize>("planes").expect("planes has a default");
    if planes == 0 {
      return Err(AppError::InvalidCmdSwitch("--planes must be at least 1".into()));
    }
    Ok(Self {
      wavelets,
      width: *options.get_one("width").expect("width has a default"),
      height: *options.get_one("height").expect("height has a default"),
      depth: *options.get_one("depth").expect("depth has a default"),
      bits: *options.get_one("bits").expect("bits has a default"),
      planes,
    })
  }

  /// Session configuration with the plane padded the way a decoder
  /// allocates it
  pub fn config(&self, wavelet: WaveletType) -> Result<DecodeSessionConfig> {
    let width = padded_dimension(self.width, self.depth);
    let height = padded_dimension(self.height, self.depth);
    let stride = aligned_stride(width);
    if width != self.width || height != self.height {
      debug!("Padded {}x{} to {}x{}", self.width, self.height, width, height);
    }
    Ok(DecodeSessionConfig::with_stride(wavelet, width, height, stride, self.depth, self.bits)?)
  }
}

/// Generate synthetic planes with a gradient and some texture,
/// samples are centered around zero.
pub fn generate_planes<T: Coefficient>(config: &DecodeSessionConfig, count: usize) -> Vec<Vec<T>> {
  let range = 1_usize << (config.bit_depth - 1).max(1);
  let half = (range / 2) as i32;
  (0..count)
    .map(|seed| {
      let mut plane = vec![T::default(); config.height * config.stride];
      for y in 0..config.height {
        for x in 0..config.width {
          let v = (x * 3 + y * 5 + (x ^ y) + seed * 29) % range;
          plane[y * config.stride + x] = T::from_i32(v as i32 - half);
        }
      }
      plane
    })
    .collect()
}

/// Write a reconstructed plane as 16-bit grayscale PNG
pub fn write_png<T: Coefficient>(path: &Path, plane: &[T], config: &DecodeSessionConfig) -> Result<()> {
  let max = (1_i32 << config.bit_depth) - 1;
  let offset = 1_i32 << (config.bit_depth - 1);
  let mut data = Vec::with_capacity(config.width * config.height);
  for y in 0..config.height {
    for v in &plane[y * config.stride..y * config.stride + config.width] {
      let sample = (v.to_i32() + offset).clamp(0, max) as u32;
      data.push((sample << (16 - config.bit_depth)) as u16);
    }
  }
  let img = image::ImageBuffer::<image::Luma<u16>, Vec<u16>>::from_raw(config.width as u32, config.height as u32, data)
    .ok_or_else(|| AppError::InvalidCmdSwitch("plane does not fit into image buffer".into()))?;
  img.save(path)?;
  debug!("Plane written to {}", path.display());
  Ok(())
}
