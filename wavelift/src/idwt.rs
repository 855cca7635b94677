// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

use log::debug;
use rayon::prelude::*;
use std::time::Instant;

use crate::compose::LevelState;
use crate::config::DecodeSessionConfig;
use crate::kernels::horizontal::scratch_len;
use crate::sample::{BitDepthClass, Coefficient};
use crate::wavelet::{KernelSet, Scheduler};
use crate::{DwtError, Result};

/// Check a plane buffer against a session configuration
pub(crate) fn check_plane<T: Coefficient>(len: usize, config: &DecodeSessionConfig) -> Result<()> {
  if T::CLASS != config.class {
    return Err(DwtError::SampleWidthMismatch {
      expected: config.class,
      found: T::CLASS,
    });
  }
  let needed = config.required_samples();
  if len < needed {
    return Err(DwtError::BufferTooSmall { needed, available: len });
  }
  Ok(())
}

/// Inverse transform session for a single plane
///
/// The session borrows the plane for its whole lifetime. Levels are
/// advanced on demand: before a level runs a step, the next coarser
/// level is advanced until every LL row the step touches is final.
pub struct SpatialIdwt<'a, T: Coefficient> {
  plane: &'a mut [T],
  kernels: KernelSet,
  /// Index 0 is the finest level
  levels: Vec<LevelState>,
  tmp: Vec<T>,
}

impl<'a, T: Coefficient> SpatialIdwt<'a, T> {
  pub fn new(plane: &'a mut [T], config: &DecodeSessionConfig) -> Result<Self> {
    check_plane::<T>(plane.len(), config)?;
    let kernels = KernelSet::select(config.wavelet, config.class);
    // Coarsest first, then flipped so that index equals level
    let mut levels: Vec<LevelState> = (0..config.decomposition_count)
      .rev()
      .map(|level| {
        LevelState::new(
          &kernels,
          level,
          config.level_width(level),
          config.level_height(level),
          config.level_stride(level),
        )
      })
      .collect();
    levels.reverse();
    debug!(
      "IDWT session: {} {}x{}, {} levels, {:?} samples",
      config.wavelet, config.width, config.height, config.decomposition_count, config.class
    );
    Ok(Self {
      plane,
      kernels,
      levels,
      tmp: vec![T::default(); scratch_len(config.width)],
    })
  }

  pub fn kernels(&self) -> &KernelSet {
    &self.kernels
  }

  pub fn level_count(&self) -> usize {
    self.levels.len()
  }

  pub fn level(&self, level: usize) -> Option<&LevelState> {
    self.levels.get(level)
  }

  /// Advance a single level by one step
  ///
  /// Returns `Ok(false)` once the level is exhausted.
  pub fn advance(&mut self, level: usize) -> Result<bool> {
    if level >= self.levels.len() {
      return Err(DwtError::InvalidLevel(level));
    }
    if self.levels[level].is_exhausted() {
      return Ok(false);
    }
    if level + 1 < self.levels.len() {
      let needed = self.levels[level].coarse_rows_needed(&self.kernels, self.levels[level + 1].height);
      while self.levels[level + 1].finished_rows() < needed {
        if !self.advance(level + 1)? {
          break;
        }
      }
    }
    Ok(self.levels[level].advance(&self.kernels, self.plane, &mut self.tmp))
  }

  /// Reconstruct at least up to full resolution row `y`
  ///
  /// Returns the number of final rows at the top of the plane.
  /// The count never decreases between calls.
  pub fn compose_slice(&mut self, y: usize) -> Result<usize> {
    for level in (0..self.levels.len()).rev() {
      match self.kernels.scheduler() {
        Scheduler::Batch => while self.advance(level)? {},
        Scheduler::Sliding => {
          let state = &self.levels[level];
          let target = ((y >> level) + state.support).min(state.height) as i32;
          while self.levels[level].row_cursor() < target {
            if !self.advance(level)? {
              break;
            }
          }
        }
      }
    }
    Ok(self.finished_rows())
  }

  /// Reconstruct the whole plane
  pub fn compose_all(&mut self) -> Result<()> {
    for level in (0..self.levels.len()).rev() {
      while self.advance(level)? {}
    }
    Ok(())
  }

  /// Final rows at full resolution
  pub fn finished_rows(&self) -> usize {
    self.levels.first().map(LevelState::finished_rows).unwrap_or(0)
  }

  pub fn is_complete(&self) -> bool {
    self.levels.iter().all(LevelState::is_exhausted)
  }
}

/// Reconstruct a plane in place
pub fn spatial_idwt<T: Coefficient>(plane: &mut [T], config: &DecodeSessionConfig) -> Result<()> {
  let instant = Instant::now();
  SpatialIdwt::new(plane, config)?.compose_all()?;
  debug!("IDWT {}x{} {}: {} s", config.width, config.height, config.wavelet, instant.elapsed().as_secs_f32());
  Ok(())
}

/// Reconstruct independent planes in parallel
///
/// All planes are checked before any of them is touched.
pub fn spatial_idwt_planes<T, P>(planes: &mut [P], config: &DecodeSessionConfig) -> Result<()>
where
  T: Coefficient,
  P: AsMut<[T]> + Send,
{
  for plane in planes.iter_mut() {
    check_plane::<T>(plane.as_mut().len(), config)?;
  }
  let instant = Instant::now();
  planes
    .par_iter_mut()
    .map(|plane| spatial_idwt(plane.as_mut(), config))
    .collect::<Result<Vec<()>>>()?;
  debug!("IDWT of {} planes: {} s", planes.len(), instant.elapsed().as_secs_f32());
  Ok(())
}

/// Plane samples of a runtime selected width
#[derive(Debug)]
pub enum PlaneSamples<'a> {
  Narrow(&'a mut [i16]),
  Wide(&'a mut [i32]),
}

impl PlaneSamples<'_> {
  pub fn class(&self) -> BitDepthClass {
    match self {
      Self::Narrow(_) => BitDepthClass::Narrow,
      Self::Wide(_) => BitDepthClass::Wide,
    }
  }

  pub fn len(&self) -> usize {
    match self {
      Self::Narrow(buf) => buf.len(),
      Self::Wide(buf) => buf.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// One color plane together with its session configuration
#[derive(Debug)]
pub struct WaveletPlaneBuffer<'a> {
  samples: PlaneSamples<'a>,
  config: DecodeSessionConfig,
}

impl<'a> WaveletPlaneBuffer<'a> {
  pub fn new(samples: PlaneSamples<'a>, config: DecodeSessionConfig) -> Result<Self> {
    match &samples {
      PlaneSamples::Narrow(buf) => check_plane::<i16>(buf.len(), &config)?,
      PlaneSamples::Wide(buf) => check_plane::<i32>(buf.len(), &config)?,
    }
    Ok(Self { samples, config })
  }

  pub fn config(&self) -> &DecodeSessionConfig {
    &self.config
  }

  pub fn samples(&self) -> &PlaneSamples<'a> {
    &self.samples
  }

  /// Reconstruct the plane in place
  pub fn reconstruct(&mut self) -> Result<()> {
    match &mut self.samples {
      PlaneSamples::Narrow(buf) => spatial_idwt(&mut **buf, &self.config),
      PlaneSamples::Wide(buf) => spatial_idwt(&mut **buf, &self.config),
    }
  }
}
