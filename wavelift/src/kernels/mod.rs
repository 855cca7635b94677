// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

//! Elementary inverse lifting operators.
//!
//! Every operator takes the neighbour samples in natural order with the
//! sample being updated in the middle and returns its new value. Sums are
//! evaluated with wrapping 32-bit arithmetic and arithmetic right shifts;
//! the bias before each shift is part of the filter definition and must not
//! be changed, reconstruction has to be bit exact.

use multiversion::multiversion;

use crate::sample::Coefficient;

pub mod horizontal;
pub mod vertical;

/// LeGall 5/3 and Deslauriers-Dubuc 9/7 low-pass update
#[inline(always)]
pub fn compose_53i_l0(b0: i32, b1: i32, b2: i32) -> i32 {
  b1.wrapping_sub(b0.wrapping_add(b2).wrapping_add(2) >> 2)
}

/// LeGall 5/3 high-pass predict
#[inline(always)]
pub fn compose_dirac53i_h0(b0: i32, b1: i32, b2: i32) -> i32 {
  b1.wrapping_add(b0.wrapping_add(b2).wrapping_add(1) >> 1)
}

/// Deslauriers-Dubuc 9/7 and 13/7 high-pass predict
#[inline(always)]
pub fn compose_dd97i_h0(b0: i32, b1: i32, b2: i32, b3: i32, b4: i32) -> i32 {
  let sum = b1.wrapping_add(b3).wrapping_mul(9).wrapping_sub(b4).wrapping_sub(b0).wrapping_add(8);
  b2.wrapping_add(sum >> 4)
}

/// Deslauriers-Dubuc 13/7 low-pass update
#[inline(always)]
pub fn compose_dd137i_l0(b0: i32, b1: i32, b2: i32, b3: i32, b4: i32) -> i32 {
  let sum = b1.wrapping_add(b3).wrapping_mul(9).wrapping_sub(b4).wrapping_sub(b0).wrapping_add(16);
  b2.wrapping_sub(sum >> 5)
}

#[inline(always)]
pub fn compose_haari_l0(b0: i32, b1: i32) -> i32 {
  b0.wrapping_sub(b1.wrapping_add(1) >> 1)
}

#[inline(always)]
pub fn compose_haari_h0(b0: i32, b1: i32) -> i32 {
  b0.wrapping_add(b1)
}

#[inline(always)]
fn fidelity_sum(b: [i32; 8], taps: [i32; 4]) -> i32 {
  taps
    .iter()
    .enumerate()
    .fold(128_i32, |acc, (i, tap)| acc.wrapping_add(b[i].wrapping_add(b[7 - i]).wrapping_mul(*tap)))
}

/// Fidelity high-pass predict, `b` holds the eight low-pass neighbours
#[inline(always)]
pub fn compose_fidelityi_h0(b: [i32; 8], b4: i32) -> i32 {
  b4.wrapping_add(fidelity_sum(b, [-2, 10, -25, 81]) >> 8)
}

/// Fidelity low-pass update, `b` holds the eight high-pass neighbours
#[inline(always)]
pub fn compose_fidelityi_l0(b: [i32; 8], b4: i32) -> i32 {
  b4.wrapping_sub(fidelity_sum(b, [-8, 21, -46, 161]) >> 8)
}

/// Daubechies 9/7 first stage low-pass update
#[inline(always)]
pub fn compose_daub97i_l1(b0: i32, b1: i32, b2: i32) -> i32 {
  b1.wrapping_sub(b0.wrapping_add(b2).wrapping_mul(1817).wrapping_add(2048) >> 12)
}

/// Daubechies 9/7 first stage high-pass predict
#[inline(always)]
pub fn compose_daub97i_h1(b0: i32, b1: i32, b2: i32) -> i32 {
  b1.wrapping_sub(b0.wrapping_add(b2).wrapping_mul(113).wrapping_add(64) >> 7)
}

/// Daubechies 9/7 second stage low-pass update
#[inline(always)]
pub fn compose_daub97i_l0(b0: i32, b1: i32, b2: i32) -> i32 {
  b1.wrapping_add(b0.wrapping_add(b2).wrapping_mul(217).wrapping_add(2048) >> 12)
}

/// Daubechies 9/7 second stage high-pass predict
#[inline(always)]
pub fn compose_daub97i_h0(b0: i32, b1: i32, b2: i32) -> i32 {
  b1.wrapping_add(b0.wrapping_add(b2).wrapping_mul(6497).wrapping_add(2048) >> 12)
}

/// Final rounding shift of a family, `(x + add) >> shift`
#[inline(always)]
pub fn round_shift(x: i32, shift: u32) -> i32 {
  x.wrapping_add((1 << shift) >> 1) >> shift
}

/// Interleave low and high halves into natural sample order
///
/// `dst[2i]` receives `low[i]`, `dst[2i+1]` receives `high[i]`, both
/// passed through the rounding shift of the family.
#[multiversion(targets("x86_64+avx+avx2", "x86+sse", "aarch64+neon"))]
pub fn interleave<T: Coefficient>(dst: &mut [T], low: &[T], high: &[T], shift: u32) {
  let w2 = low.len();
  let dst = &mut dst[..2 * w2]; // Identical bounds for all slices (SIMD)
  let high = &high[..w2];
  for (pair, (l, h)) in dst.chunks_exact_mut(2).zip(low.iter().zip(high)) {
    pair[0] = T::from_i32(round_shift(l.to_i32(), shift));
    pair[1] = T::from_i32(round_shift(h.to_i32(), shift));
  }
}
