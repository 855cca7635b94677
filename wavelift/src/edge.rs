// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

//! Boundary extension for rows and columns outside of a level.
//!
//! Mirror extension reflects natural sample indices at the first and
//! last sample. Clip extension repeats the nearest sample of the same
//! subband. Both keep the parity of an index, so a virtual low-pass row
//! always maps to a real low-pass row.

/// Boundary policy of a wavelet family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePolicy {
  /// Whole-sample symmetric reflection
  Mirror,
  /// Repeat the edge sample of the same subband
  Clip,
  /// Kernels never address samples outside the level
  None,
}

/// Reflect `x` into `0..=max`
///
/// Reflection is repeated until the index is in range, so the result
/// is defined for any `max`, including levels with only two samples.
#[inline]
pub fn mirror(x: i32, max: i32) -> i32 {
  if max <= 0 {
    return 0;
  }
  let mut x = x;
  while x < 0 || x > max {
    x = -x;
    if x < 0 {
      x += 2 * max;
    }
  }
  x
}

#[inline(always)]
pub fn clip(x: i32, lo: i32, hi: i32) -> i32 {
  x.clamp(lo, hi)
}

impl EdgePolicy {
  /// Map a natural row (or column) index of a level with `len` rows
  /// to a real row. Rows inside the level are returned unchanged.
  #[inline]
  pub fn extend(&self, x: i32, len: usize) -> usize {
    let len = len as i32;
    let r = match self {
      Self::Mirror => mirror(x, len - 1),
      Self::Clip if x & 1 == 0 => clip(x, 0, len - 2),
      Self::Clip => clip(x, 1, len - 1),
      Self::None => {
        debug_assert!(x >= 0 && x < len, "row {} outside of level with {} rows", x, len);
        x
      }
    };
    r as usize
  }

  /// Map an index into a subband of `n` coefficients.
  ///
  /// `high` selects the odd (high-pass) samples of the natural signal.
  #[inline]
  pub fn extend_subband(&self, k: i32, n: usize, high: bool) -> usize {
    if k >= 0 && (k as usize) < n {
      return k as usize;
    }
    match self {
      Self::Mirror => {
        let natural = 2 * k + high as i32;
        (mirror(natural, 2 * n as i32 - 1) / 2) as usize
      }
      Self::Clip | Self::None => clip(k, 0, n as i32 - 1) as usize,
    }
  }
}
