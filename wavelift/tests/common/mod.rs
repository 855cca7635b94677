// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

use wavelift::{Coefficient, DecodeSessionConfig, WaveletType};

/// Deterministic test plane with samples in `-64..64`
///
/// Padding samples between `width` and `stride` carry a marker value
/// so tests can detect writes outside of the plane.
pub(crate) fn generate_plane<T: Coefficient>(config: &DecodeSessionConfig, seed: usize) -> Vec<T> {
  let mut plane = vec![T::from_i32(PADDING); config.height * config.stride];
  for y in 0..config.height {
    for x in 0..config.width {
      let v = (x * 7919 + y * 104_729 + seed * 31 + (x * y) % 13) % 127;
      plane[y * config.stride + x] = T::from_i32(v as i32 - 64);
    }
  }
  plane
}

pub(crate) const PADDING: i32 = 0x55;

/// Smallest and largest sample of a signed source with `bits` bits
pub(crate) fn sample_range(bits: u32) -> (i32, i32) {
  (-(1 << (bits - 1)), (1 << (bits - 1)) - 1)
}

/// Pseudo random plane over the whole sample range of `bits`,
/// the first row starts with both range limits
pub(crate) fn generate_full_range_plane<T: Coefficient>(config: &DecodeSessionConfig, bits: u32, seed: u32) -> Vec<T> {
  let (min, max) = sample_range(bits);
  let span = (max - min + 1) as u32;
  let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
  let mut plane = vec![T::from_i32(PADDING); config.height * config.stride];
  for y in 0..config.height {
    for x in 0..config.width {
      state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
      plane[y * config.stride + x] = T::from_i32(min + ((state >> 8) % span) as i32);
    }
  }
  plane[0] = T::from_i32(min);
  plane[1] = T::from_i32(max);
  plane
}

/// Plane with every sample set to `value`
pub(crate) fn generate_flat_plane<T: Coefficient>(config: &DecodeSessionConfig, value: i32) -> Vec<T> {
  let mut plane = vec![T::from_i32(PADDING); config.height * config.stride];
  for row in plane.chunks_exact_mut(config.stride) {
    row[..config.width].fill(T::from_i32(value));
  }
  plane
}

pub(crate) fn plane_digest<T: Coefficient>(plane: &[T]) -> [u8; 16] {
  let mut bytes = Vec::with_capacity(plane.len() * 4);
  for v in plane {
    v.extend_le_bytes(&mut bytes);
  }
  md5::compute(&bytes).0
}

pub(crate) fn check_md5_equal(digest: [u8; 16], expected: &str) {
  assert_eq!(hex::encode(digest), expected);
}

/// Geometries exercised for every family: (width, height, stride, depth)
pub(crate) const GEOMETRIES: [(usize, usize, usize, usize); 5] = [(8, 8, 8, 1), (16, 8, 16, 2), (32, 24, 40, 3), (24, 32, 24, 3), (4, 4, 4, 2)];

pub(crate) fn configs(wavelet: WaveletType, bit_depth: u32) -> Vec<DecodeSessionConfig> {
  GEOMETRIES
    .iter()
    .map(|&(w, h, stride, depth)| DecodeSessionConfig::with_stride(wavelet, w, h, stride, depth, bit_depth).expect("valid test geometry"))
    .collect()
}
