// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

use std::fmt::Debug;

use crate::{DwtError, Result};

/// Storage class of wavelet coefficients
///
/// Sources with up to 8 bits per sample are reconstructed in 16-bit
/// coefficients, deeper sources (9 to 16 bits) need 32-bit coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepthClass {
  /// 16-bit coefficients
  Narrow,
  /// 32-bit coefficients
  Wide,
}

impl BitDepthClass {
  pub fn from_bit_depth(bits: u32) -> Result<Self> {
    match bits {
      1..=8 => Ok(Self::Narrow),
      9..=16 => Ok(Self::Wide),
      _ => Err(DwtError::UnsupportedBitDepth(bits)),
    }
  }

  /// Size of a single coefficient in bytes
  pub fn sample_bytes(&self) -> usize {
    match self {
      Self::Narrow => 2,
      Self::Wide => 4,
    }
  }
}

/// Integer type that stores a wavelet coefficient
///
/// All lifting arithmetic is done in `i32` with wrapping semantics,
/// results are truncated back into the storage type.
pub trait Coefficient: Copy + Default + Debug + PartialEq + Send + Sync + 'static {
  const CLASS: BitDepthClass;

  fn to_i32(self) -> i32;

  fn from_i32(v: i32) -> Self;

  /// Little endian byte representation, used for digests and dumps
  fn extend_le_bytes(self, out: &mut Vec<u8>);
}

impl Coefficient for i16 {
  const CLASS: BitDepthClass = BitDepthClass::Narrow;

  #[inline(always)]
  fn to_i32(self) -> i32 {
    self as i32
  }

  #[inline(always)]
  fn from_i32(v: i32) -> Self {
    v as i16
  }

  fn extend_le_bytes(self, out: &mut Vec<u8>) {
    out.extend_from_slice(&self.to_le_bytes());
  }
}

impl Coefficient for i32 {
  const CLASS: BitDepthClass = BitDepthClass::Wide;

  #[inline(always)]
  fn to_i32(self) -> i32 {
    self
  }

  #[inline(always)]
  fn from_i32(v: i32) -> Self {
    v
  }

  fn extend_le_bytes(self, out: &mut Vec<u8>) {
    out.extend_from_slice(&self.to_le_bytes());
  }
}
