// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

//! Lifting step tables and full-plane reference transforms.
//!
//! Every family is described as an ordered list of integer lifting steps
//! on the low and high subband of a 1D signal. The inverse runs the steps
//! in order and adds each update, the forward transform runs them in
//! reverse order and subtracts. The reference inverse below is a plain
//! column-then-row implementation of the same steps without any row
//! window, useful to cross-check the sliding scheduler.

use log::debug;

use crate::Result;
use crate::config::DecodeSessionConfig;
use crate::edge::EdgePolicy;
use crate::idwt::check_plane;
use crate::kernels::*;
use crate::sample::Coefficient;
use crate::wavelet::WaveletType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
  Low,
  High,
}

/// Compose operator of a step, by number of taps
#[derive(Debug, Clone, Copy)]
pub enum StepKernel {
  Two(fn(i32, i32) -> i32),
  Three(fn(i32, i32, i32) -> i32),
  Five(fn(i32, i32, i32, i32, i32) -> i32),
  Nine(fn([i32; 8], i32) -> i32),
}

/// A single predict or update step
#[derive(Debug, Clone, Copy)]
pub struct LiftingStep {
  /// Band that is updated
  pub band: Band,
  /// Offsets into the opposite band, relative to the updated index
  pub taps: &'static [i32],
  pub kernel: StepKernel,
}

impl LiftingStep {
  const fn new(band: Band, taps: &'static [i32], kernel: StepKernel) -> Self {
    Self { band, taps, kernel }
  }

  /// Value the inverse step adds to the updated sample
  fn delta(&self, n: &[i32]) -> i32 {
    match self.kernel {
      StepKernel::Two(f) => f(0, n[0]),
      StepKernel::Three(f) => f(n[0], 0, n[1]),
      StepKernel::Five(f) => f(n[0], n[1], 0, n[2], n[3]),
      StepKernel::Nine(f) => f(std::array::from_fn(|i| n[i]), 0),
    }
  }
}

use Band::{High, Low};
use StepKernel::{Five, Nine, Three, Two};

const LEGALL_5_3: [LiftingStep; 2] = [
  LiftingStep::new(Low, &[-1, 0], Three(compose_53i_l0)),
  LiftingStep::new(High, &[0, 1], Three(compose_dirac53i_h0)),
];

const DD_9_7: [LiftingStep; 2] = [
  LiftingStep::new(Low, &[-1, 0], Three(compose_53i_l0)),
  LiftingStep::new(High, &[-1, 0, 1, 2], Five(compose_dd97i_h0)),
];

const DD_13_7: [LiftingStep; 2] = [
  LiftingStep::new(Low, &[-2, -1, 0, 1], Five(compose_dd137i_l0)),
  LiftingStep::new(High, &[-1, 0, 1, 2], Five(compose_dd97i_h0)),
];

const HAAR: [LiftingStep; 2] = [
  LiftingStep::new(Low, &[0], Two(compose_haari_l0)),
  LiftingStep::new(High, &[0], Two(compose_haari_h0)),
];

const FIDELITY: [LiftingStep; 2] = [
  LiftingStep::new(High, &[-3, -2, -1, 0, 1, 2, 3, 4], Nine(compose_fidelityi_h0)),
  LiftingStep::new(Low, &[-4, -3, -2, -1, 0, 1, 2, 3], Nine(compose_fidelityi_l0)),
];

const DAUB_9_7: [LiftingStep; 4] = [
  LiftingStep::new(Low, &[-1, 0], Three(compose_daub97i_l1)),
  LiftingStep::new(High, &[0, 1], Three(compose_daub97i_h1)),
  LiftingStep::new(Low, &[-1, 0], Three(compose_daub97i_l0)),
  LiftingStep::new(High, &[0, 1], Three(compose_daub97i_h0)),
];

/// Inverse lifting steps of a family, in execution order
pub fn steps(wavelet: WaveletType) -> &'static [LiftingStep] {
  match wavelet {
    WaveletType::LeGall5_3 => &LEGALL_5_3,
    WaveletType::DeslauriersDubuc9_7 => &DD_9_7,
    WaveletType::DeslauriersDubuc13_7 => &DD_13_7,
    WaveletType::Haar0 | WaveletType::Haar1 => &HAAR,
    WaveletType::Fidelity => &FIDELITY,
    WaveletType::Daubechies9_7 => &DAUB_9_7,
  }
}

fn apply<T: Coefficient>(step: &LiftingStep, edge: EdgePolicy, low: &mut [i32], high: &mut [i32], forward: bool) {
  let (target, source, source_high) = match step.band {
    Band::Low => (low, &*high, true),
    Band::High => (high, &*low, false),
  };
  let n = source.len();
  let mut taps = [0_i32; 8];
  for (k, sample) in target.iter_mut().enumerate() {
    for (tap, off) in taps.iter_mut().zip(step.taps) {
      *tap = source[edge.extend_subband(k as i32 + off, n, source_high)];
    }
    let delta = step.delta(&taps[..step.taps.len()]);
    let v = if forward { sample.wrapping_sub(delta) } else { sample.wrapping_add(delta) };
    // Storage truncation after every step
    *sample = T::from_i32(v).to_i32();
  }
}

/// Inverse lifting of one signal split into its two subbands
///
/// Samples are truncated to `T` after every step, like the
/// in-place kernels do.
pub fn synthesize_1d<T: Coefficient>(wavelet: WaveletType, low: &mut [i32], high: &mut [i32]) {
  let edge = wavelet.edge_policy();
  for step in steps(wavelet) {
    apply::<T>(step, edge, low, high, false);
  }
}

/// Forward lifting, the exact inverse of [`synthesize_1d`]
pub fn analyze_1d<T: Coefficient>(wavelet: WaveletType, low: &mut [i32], high: &mut [i32]) {
  let edge = wavelet.edge_policy();
  for step in steps(wavelet).iter().rev() {
    apply::<T>(step, edge, low, high, true);
  }
}

/// Region of one level inside the shared plane
#[derive(Debug, Clone, Copy)]
pub(crate) struct Region {
  pub width: usize,
  pub height: usize,
  pub stride: usize,
}

impl Region {
  pub fn of_level(config: &DecodeSessionConfig, level: usize) -> Self {
    Self {
      width: config.level_width(level),
      height: config.level_height(level),
      stride: config.level_stride(level),
    }
  }

  /// Run `f` over every column, split into even (low) and odd (high) rows
  pub fn for_columns<T: Coefficient>(&self, plane: &mut [T], mut f: impl FnMut(&mut [i32], &mut [i32])) {
    let h2 = self.height / 2;
    let mut low = vec![0; h2];
    let mut high = vec![0; h2];
    for x in 0..self.width {
      for k in 0..h2 {
        low[k] = plane[2 * k * self.stride + x].to_i32();
        high[k] = plane[(2 * k + 1) * self.stride + x].to_i32();
      }
      f(&mut low, &mut high);
      for k in 0..h2 {
        plane[2 * k * self.stride + x] = T::from_i32(low[k]);
        plane[(2 * k + 1) * self.stride + x] = T::from_i32(high[k]);
      }
    }
  }

  pub fn row<'p, T>(&self, plane: &'p mut [T], y: usize) -> &'p mut [T] {
    &mut plane[y * self.stride..y * self.stride + self.width]
  }
}

/// Reference inverse transform of a whole plane
///
/// Each level is composed with a full column pass followed by a full
/// row pass, coarsest level first.
pub fn spatial_idwt_reference<T: Coefficient>(plane: &mut [T], config: &DecodeSessionConfig) -> Result<()> {
  check_plane::<T>(plane.len(), config)?;
  let wavelet = config.wavelet;
  let shift = wavelet.filter_shift();
  for level in (0..config.decomposition_count).rev() {
    let region = Region::of_level(config, level);
    let w2 = region.width / 2;
    debug!("Reference IDWT level {}: {}x{}", level, region.width, region.height);

    region.for_columns(plane, |low, high| synthesize_1d::<T>(wavelet, low, high));

    let mut low = vec![0; w2];
    let mut high = vec![0; w2];
    for y in 0..region.height {
      let row = region.row(plane, y);
      for i in 0..w2 {
        low[i] = row[i].to_i32();
        high[i] = row[w2 + i].to_i32();
      }
      synthesize_1d::<T>(wavelet, &mut low, &mut high);
      for i in 0..w2 {
        row[2 * i] = T::from_i32(round_shift(low[i], shift));
        row[2 * i + 1] = T::from_i32(round_shift(high[i], shift));
      }
    }
  }
  Ok(())
}
