// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

use log::debug;
use std::time::Instant;

use crate::Result;
use crate::config::DecodeSessionConfig;
use crate::idwt::check_plane;
use crate::lifting::{Region, analyze_1d};
use crate::sample::Coefficient;

/// Forward transform of a plane in place
///
/// Produces the coefficient layout the inverse transform consumes:
/// for every level, finest first, the samples are scaled by the filter
/// shift, every row is split into `[low | high]` halves and every column
/// into even (low) and odd (high) rows. The next level continues on the
/// low/low quarter.
pub fn spatial_dwt<T: Coefficient>(plane: &mut [T], config: &DecodeSessionConfig) -> Result<()> {
  check_plane::<T>(plane.len(), config)?;
  let instant = Instant::now();
  let wavelet = config.wavelet;
  let shift = wavelet.filter_shift();
  for level in 0..config.decomposition_count {
    let region = Region::of_level(config, level);
    let w2 = region.width / 2;

    let mut low = vec![0; w2];
    let mut high = vec![0; w2];
    for y in 0..region.height {
      let row = region.row(plane, y);
      for (i, pair) in row.chunks_exact(2).enumerate() {
        low[i] = T::from_i32(pair[0].to_i32().wrapping_shl(shift)).to_i32();
        high[i] = T::from_i32(pair[1].to_i32().wrapping_shl(shift)).to_i32();
      }
      analyze_1d::<T>(wavelet, &mut low, &mut high);
      for (dst, src) in row.iter_mut().zip(low.iter().chain(high.iter())) {
        *dst = T::from_i32(*src);
      }
    }

    region.for_columns(plane, |low, high| analyze_1d::<T>(wavelet, low, high));
  }
  debug!("DWT {}x{} {}: {} s", config.width, config.height, wavelet, instant.elapsed().as_secs_f32());
  Ok(())
}
