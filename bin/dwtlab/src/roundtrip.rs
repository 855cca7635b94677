// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

use clap::ArgMatches;
use log::{debug, info};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use wavelift::{BitDepthClass, Coefficient, DecodeSessionConfig, SpatialIdwt, spatial_dwt, spatial_idwt_planes};

use crate::plane::{TransformOptions, generate_planes, write_png};
use crate::{AppError, Result};

/// Forward and inverse transform of generated planes for
/// every selected wavelet family
pub fn roundtrip(options: &ArgMatches) -> anyhow::Result<()> {
  let params = TransformOptions::from_matches(options)?;
  let slice_rows = options.get_one::<usize>("slice_rows").copied();
  if slice_rows == Some(0) {
    return Err(AppError::InvalidCmdSwitch("--slice-rows must be at least 1".into()).into());
  }
  let dump = options.get_one::<PathBuf>("dump");
  let single = params.wavelets.len() == 1;

  let mut failed = 0;
  let mut total = 0;
  for wavelet in &params.wavelets {
    let config = params.config(*wavelet)?;
    // One file per family if several are selected
    let dump = dump.map(|path| {
      if single {
        path.clone()
      } else {
        let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        path.with_file_name(format!("{}_{}.png", stem, wavelet.name()))
      }
    });
    failed += match config.class {
      BitDepthClass::Narrow => run::<i16>(&config, params.planes, slice_rows, dump.as_deref())?,
      BitDepthClass::Wide => run::<i32>(&config, params.planes, slice_rows, dump.as_deref())?,
    };
    total += params.planes;
  }
  if failed > 0 {
    return Err(AppError::Mismatch(failed, total).into());
  }
  Ok(())
}

/// Returns the number of planes that were not reconstructed exactly
fn run<T: Coefficient>(config: &DecodeSessionConfig, count: usize, slice_rows: Option<usize>, dump: Option<&Path>) -> Result<usize> {
  let images = generate_planes::<T>(config, count);
  let mut planes = images.clone();
  planes.par_iter_mut().try_for_each(|plane| spatial_dwt(plane.as_mut_slice(), config))?;

  let instant = Instant::now();
  match slice_rows {
    Some(rows) => {
      for plane in planes.iter_mut() {
        sliced(plane.as_mut_slice(), config, rows)?;
      }
    }
    None => spatial_idwt_planes(&mut planes, config)?,
  }
  let elapsed = instant.elapsed();

  let mismatches = planes.iter().zip(&images).filter(|(plane, image)| plane != image).count();
  println!(
    "{:10} {}x{} depth {} {:>2} bit, {} plane(s): {} ({:.3} ms)",
    config.wavelet.name(),
    config.width,
    config.height,
    config.decomposition_count,
    config.bit_depth,
    count,
    if mismatches == 0 { "exact" } else { "MISMATCH" },
    elapsed.as_secs_f64() * 1000.0
  );

  if let Some(path) = dump {
    write_png(path, &planes[0], config)?;
  }
  Ok(mismatches)
}

fn sliced<T: Coefficient>(plane: &mut [T], config: &DecodeSessionConfig, rows: usize) -> Result<()> {
  let mut session = SpatialIdwt::new(plane, config)?;
  let mut y = 0;
  loop {
    y += rows;
    let ready = session.compose_slice(y)?;
    debug!("Slice up to row {}: {} rows ready", y, ready);
    if ready >= config.height {
      break;
    }
  }
  info!("Sliced reconstruction of {} rows done", config.height);
  Ok(())
}
