// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

use log::debug;

use crate::sample::BitDepthClass;
use crate::wavelet::WaveletType;
use crate::{DwtError, Result};

/// Maximum number of decomposition levels
pub const MAX_DWT_LEVELS: usize = 5;

/// Round `size` up to a multiple of `2^depth`
pub fn padded_dimension(size: usize, depth: usize) -> usize {
  ((size + (1 << depth) - 1) >> depth) << depth
}

/// Row pitch a decoder allocates for a plane of `width` samples
pub fn aligned_stride(width: usize) -> usize {
  (width + 7) & !7
}

/// Parameters of one plane reconstruction
///
/// The configuration is validated on construction and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeSessionConfig {
  pub wavelet: WaveletType,
  pub width: usize,
  pub height: usize,
  pub stride: usize,
  pub decomposition_count: usize,
  pub bit_depth: u32,
  pub class: BitDepthClass,
}

impl DecodeSessionConfig {
  /// Build a configuration for a tightly packed plane (`stride == width`)
  pub fn new(wavelet: WaveletType, width: usize, height: usize, decomposition_count: usize, bit_depth: u32) -> Result<Self> {
    Self::with_stride(wavelet, width, height, width, decomposition_count, bit_depth)
  }

  pub fn with_stride(wavelet: WaveletType, width: usize, height: usize, stride: usize, decomposition_count: usize, bit_depth: u32) -> Result<Self> {
    let class = BitDepthClass::from_bit_depth(bit_depth)?;
    let config = Self {
      wavelet,
      width,
      height,
      stride,
      decomposition_count,
      bit_depth,
      class,
    };
    config.validate()?;
    debug!(
      "Session config: {} {}x{} stride {} depth {} ({} bit, {:?})",
      wavelet, width, height, stride, decomposition_count, bit_depth, class
    );
    Ok(config)
  }

  /// Build a configuration from raw picture header values
  pub fn from_header(wavelet_index: u32, width: usize, height: usize, stride: usize, decomposition_count: usize, bit_depth: u32) -> Result<Self> {
    let wavelet = WaveletType::from_index(wavelet_index)?;
    Self::with_stride(wavelet, width, height, stride, decomposition_count, bit_depth)
  }

  fn validate(&self) -> Result<()> {
    if !(1..=MAX_DWT_LEVELS).contains(&self.decomposition_count) {
      return Err(DwtError::InvalidDecompositionCount(self.decomposition_count));
    }
    if self.width == 0 || self.height == 0 {
      return Err(DwtError::DimensionInvariantViolation(format!(
        "empty plane {}x{}",
        self.width, self.height
      )));
    }
    let align = 1 << self.decomposition_count;
    if self.width % align != 0 || self.height % align != 0 {
      return Err(DwtError::DimensionInvariantViolation(format!(
        "{}x{} is not a multiple of {} for {} levels of {}",
        self.width, self.height, align, self.decomposition_count, self.wavelet
      )));
    }
    if self.stride < self.width {
      return Err(DwtError::DimensionInvariantViolation(format!(
        "stride {} is smaller than width {}",
        self.stride, self.width
      )));
    }
    Ok(())
  }

  pub fn level_width(&self, level: usize) -> usize {
    self.width >> level
  }

  pub fn level_height(&self, level: usize) -> usize {
    self.height >> level
  }

  /// Row pitch of a level inside the shared plane
  pub fn level_stride(&self, level: usize) -> usize {
    self.stride << level
  }

  /// Minimal number of samples a plane buffer must hold
  pub fn required_samples(&self) -> usize {
    (self.height - 1) * self.stride + self.width
  }
}
