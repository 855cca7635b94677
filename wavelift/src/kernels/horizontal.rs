// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

//! Horizontal compose of a single row.
//!
//! The row holds the low-pass half in `[0, w/2)` and the high-pass half
//! in `[w/2, w)`. After compose it holds `w` samples in natural order,
//! scaled by the filter shift of the family.

use super::*;
use crate::sample::Coefficient;
use crate::wavelet::WaveletType;

/// Scratch samples a caller must provide for a row of `width` samples
pub fn scratch_len(width: usize) -> usize {
  width + 8
}

/// Compose one row in place
pub fn compose_row<T: Coefficient>(wavelet: WaveletType, row: &mut [T], tmp: &mut [T]) {
  debug_assert!(row.len() >= 2 && row.len() % 2 == 0);
  debug_assert!(tmp.len() >= scratch_len(row.len()));
  match wavelet {
    WaveletType::LeGall5_3 => legall(row, tmp),
    WaveletType::DeslauriersDubuc9_7 => dd97(row, tmp),
    WaveletType::DeslauriersDubuc13_7 => dd137(row, tmp),
    WaveletType::Haar0 => haar(row, tmp, 0),
    WaveletType::Haar1 => haar(row, tmp, 1),
    WaveletType::Fidelity => fidelity(row, tmp),
    WaveletType::Daubechies9_7 => daub97(row, tmp),
  }
}

#[inline(always)]
fn v<T: Coefficient>(x: T) -> i32 {
  x.to_i32()
}

/// Storage truncation of an intermediate value
#[inline(always)]
fn narrow<T: Coefficient>(x: i32) -> i32 {
  T::from_i32(x).to_i32()
}

#[inline(always)]
fn clamp_idx(x: isize, n: usize) -> usize {
  x.clamp(0, n as isize - 1) as usize
}

fn legall<T: Coefficient>(b: &mut [T], tmp: &mut [T]) {
  let w = b.len();
  let w2 = w / 2;
  let (lo, rest) = tmp.split_at_mut(w2);
  let hi = &mut rest[..w2];

  lo[0] = T::from_i32(compose_53i_l0(v(b[w2]), v(b[0]), v(b[w2])));
  for x in 1..w2 {
    lo[x] = T::from_i32(compose_53i_l0(v(b[x + w2 - 1]), v(b[x]), v(b[x + w2])));
    hi[x - 1] = T::from_i32(compose_dirac53i_h0(v(lo[x - 1]), v(b[x + w2 - 1]), v(lo[x])));
  }
  hi[w2 - 1] = T::from_i32(compose_dirac53i_h0(v(lo[w2 - 1]), v(b[w - 1]), v(lo[w2 - 1])));

  interleave(b, lo, hi, 1);
}

/// Deslauriers-Dubuc high-pass predict and interleave.
///
/// `tmp[1..=w2]` holds the updated low band, `tmp[0]` and
/// `tmp[w2 + 1..=w2 + 2]` the clipped edge samples.
fn dd_predict<T: Coefficient>(b: &mut [T], tmp: &mut [T]) {
  let w2 = b.len() / 2;
  tmp[0] = tmp[1];
  tmp[w2 + 1] = tmp[w2];
  tmp[w2 + 2] = tmp[w2];
  for x in 0..w2 {
    let l = v(tmp[x + 1]);
    let h = narrow::<T>(compose_dd97i_h0(v(tmp[x]), l, v(b[x + w2]), v(tmp[x + 2]), v(tmp[x + 3])));
    // Read position x + w2 is never behind write position 2x + 1
    b[2 * x] = T::from_i32(round_shift(l, 1));
    b[2 * x + 1] = T::from_i32(round_shift(h, 1));
  }
}

fn dd97<T: Coefficient>(b: &mut [T], tmp: &mut [T]) {
  let w2 = b.len() / 2;
  tmp[1] = T::from_i32(compose_53i_l0(v(b[w2]), v(b[0]), v(b[w2])));
  for x in 1..w2 {
    tmp[x + 1] = T::from_i32(compose_53i_l0(v(b[x + w2 - 1]), v(b[x]), v(b[x + w2])));
  }
  dd_predict(b, tmp);
}

fn dd137<T: Coefficient>(b: &mut [T], tmp: &mut [T]) {
  let w2 = b.len() / 2;
  let h = |k: isize| v(b[w2 + clamp_idx(k, w2)]);
  for x in 0..w2 {
    let k = x as isize;
    let l = compose_dd137i_l0(h(k - 2), h(k - 1), v(b[x]), h(k), h(k + 1));
    tmp[x + 1] = T::from_i32(l);
  }
  dd_predict(b, tmp);
}

fn haar<T: Coefficient>(b: &mut [T], tmp: &mut [T], shift: u32) {
  let w2 = b.len() / 2;
  let (lo, rest) = tmp.split_at_mut(w2);
  let hi = &mut rest[..w2];
  for x in 0..w2 {
    let l = compose_haari_l0(v(b[x]), v(b[x + w2]));
    lo[x] = T::from_i32(l);
    hi[x] = T::from_i32(compose_haari_h0(v(b[x + w2]), v(lo[x])));
  }
  interleave(b, lo, hi, shift);
}

fn fidelity<T: Coefficient>(b: &mut [T], tmp: &mut [T]) {
  let w2 = b.len() / 2;
  let (hi, rest) = tmp.split_at_mut(w2);
  let lo = &mut rest[..w2];
  for x in 0..w2 {
    let k = x as isize;
    let taps: [i32; 8] = std::array::from_fn(|i| v(b[clamp_idx(k - 3 + i as isize, w2)]));
    hi[x] = T::from_i32(compose_fidelityi_h0(taps, v(b[x + w2])));
  }
  for x in 0..w2 {
    let k = x as isize;
    let taps: [i32; 8] = std::array::from_fn(|i| v(hi[clamp_idx(k - 4 + i as isize, w2)]));
    lo[x] = T::from_i32(compose_fidelityi_l0(taps, v(b[x])));
  }
  interleave(b, lo, hi, 0);
}

/// First stage into `tmp`, second stage fused with interleave and shift.
/// Second stage values are truncated to the sample type after each step,
/// the same as the first stage.
fn daub97<T: Coefficient>(b: &mut [T], tmp: &mut [T]) {
  let w = b.len();
  let w2 = w / 2;
  let (lo, rest) = tmp.split_at_mut(w2);
  let hi = &mut rest[..w2];

  lo[0] = T::from_i32(compose_daub97i_l1(v(b[w2]), v(b[0]), v(b[w2])));
  for x in 1..w2 {
    lo[x] = T::from_i32(compose_daub97i_l1(v(b[x + w2 - 1]), v(b[x]), v(b[x + w2])));
    hi[x - 1] = T::from_i32(compose_daub97i_h1(v(lo[x - 1]), v(b[x + w2 - 1]), v(lo[x])));
  }
  hi[w2 - 1] = T::from_i32(compose_daub97i_h1(v(lo[w2 - 1]), v(b[w - 1]), v(lo[w2 - 1])));

  let mut b0 = narrow::<T>(compose_daub97i_l0(v(hi[0]), v(lo[0]), v(hi[0])));
  let mut b2 = b0;
  b[0] = T::from_i32(round_shift(b0, 1));
  for x in 1..w2 {
    b2 = narrow::<T>(compose_daub97i_l0(v(hi[x - 1]), v(lo[x]), v(hi[x])));
    let b1 = narrow::<T>(compose_daub97i_h0(b0, v(hi[x - 1]), b2));
    b[2 * x - 1] = T::from_i32(round_shift(b1, 1));
    b[2 * x] = T::from_i32(round_shift(b2, 1));
    b0 = b2;
  }
  let last = narrow::<T>(compose_daub97i_h0(b2, v(hi[w2 - 1]), b2));
  b[w - 1] = T::from_i32(round_shift(last, 1));
}
