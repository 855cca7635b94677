// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

//! Per level inverse transform state.
//!
//! A sliding level keeps the indices of the rows that are only partially
//! lifted. Every advance pulls two new rows into the window, runs the
//! vertical lifting steps whose target is a real row and horizontally
//! composes the two rows at the cursor, which are final afterwards.

use log::trace;

use crate::edge::EdgePolicy;
use crate::kernels::{horizontal, vertical};
use crate::sample::Coefficient;
use crate::wavelet::{KernelSet, Scheduler, WaveletType};

const MAX_WINDOW: usize = 8;

/// Rows addressed by a single sliding step
const STEP_ROWS: usize = MAX_WINDOW + 2;

/// Row access into the region of one level
struct LevelRows<'a, T> {
  plane: &'a mut [T],
  stride: usize,
  width: usize,
}

impl<T: Coefficient> LevelRows<'_, T> {
  fn lift<const N: usize>(&mut self, target: usize, sources: [usize; N], kernel: fn(&mut [T], [&[T]; N])) {
    let (row, src) = vertical::split_rows(self.plane, target * self.stride, sources.map(|r| r * self.stride), self.width);
    kernel(row, src);
  }

  fn haar(&mut self, low: usize, high: usize) {
    let (low, high) = vertical::split_pair(self.plane, low * self.stride, high * self.stride, self.width);
    vertical::haar(low, high);
  }

  fn compose(&mut self, wavelet: WaveletType, row: usize, tmp: &mut [T]) {
    let off = row * self.stride;
    horizontal::compose_row(wavelet, &mut self.plane[off..off + self.width], tmp);
  }
}

/// State of one decomposition level
#[derive(Debug, Clone)]
pub struct LevelState {
  pub level: usize,
  pub width: usize,
  pub height: usize,
  /// Distance between two rows of this level in the shared plane
  pub stride: usize,
  pub support: usize,
  row_cursor: i32,
  retained: [usize; MAX_WINDOW],
  window: usize,
}

impl LevelState {
  /// Create a level and prime its window with the edge extended
  /// rows in front of row 0.
  pub(crate) fn new(kernels: &KernelSet, level: usize, width: usize, height: usize, stride: usize) -> Self {
    let mut retained = [0; MAX_WINDOW];
    for (i, row) in retained.iter_mut().take(kernels.window()).enumerate() {
      *row = kernels.edge().extend(kernels.bootstrap() + i as i32, height);
    }
    trace!(
      "Level {}: {}x{} stride {}, cursor {}, window {:?}",
      level,
      width,
      height,
      stride,
      kernels.bootstrap(),
      &retained[..kernels.window()]
    );
    Self {
      level,
      width,
      height,
      stride,
      support: kernels.support(),
      row_cursor: kernels.bootstrap(),
      retained,
      window: kernels.window(),
    }
  }

  /// Next row this level produces, negative while bootstrapping
  pub fn row_cursor(&self) -> i32 {
    self.row_cursor
  }

  /// Plane rows currently held in the window
  pub fn retained_rows(&self) -> &[usize] {
    &self.retained[..self.window]
  }

  pub fn is_exhausted(&self) -> bool {
    self.row_cursor >= self.height as i32
  }

  /// Rows `[0, finished_rows)` are fully reconstructed
  pub fn finished_rows(&self) -> usize {
    self.row_cursor.clamp(0, self.height as i32) as usize
  }

  fn step_rows(&self, edge: EdgePolicy) -> [usize; STEP_ROWS] {
    let n = self.window;
    let mut rows = [0; STEP_ROWS];
    rows[..n].copy_from_slice(&self.retained[..n]);
    rows[n] = edge.extend(self.row_cursor + n as i32, self.height);
    rows[n + 1] = edge.extend(self.row_cursor + n as i32 + 1, self.height);
    rows
  }

  /// Rows of the next coarser level that must be finished
  /// before this level can advance once more.
  ///
  /// Row `2k` of this level is row `k` of the coarser level.
  pub(crate) fn coarse_rows_needed(&self, kernels: &KernelSet, coarse_height: usize) -> usize {
    match kernels.scheduler() {
      Scheduler::Batch => coarse_height,
      Scheduler::Sliding => {
        let rows = self.step_rows(kernels.edge());
        let max_row = rows[..self.window + 2].iter().copied().max().unwrap_or(0);
        (max_row / 2 + 1).min(coarse_height)
      }
    }
  }

  /// Advance by one step. Returns `false` if the level is exhausted.
  ///
  /// The coarser level must have finished the rows reported by
  /// [`LevelState::coarse_rows_needed`].
  pub(crate) fn advance<T: Coefficient>(&mut self, kernels: &KernelSet, plane: &mut [T], tmp: &mut [T]) -> bool {
    if self.is_exhausted() {
      return false;
    }
    let mut rows = LevelRows {
      plane,
      stride: self.stride,
      width: self.width,
    };
    match kernels.scheduler() {
      Scheduler::Sliding => self.slide(kernels.wavelet(), kernels.edge(), &mut rows, tmp),
      Scheduler::Batch => self.batch(kernels.wavelet(), &mut rows, tmp),
    }
    true
  }

  fn slide<T: Coefficient>(&mut self, wavelet: WaveletType, edge: EdgePolicy, rows: &mut LevelRows<'_, T>, tmp: &mut [T]) {
    let b = self.step_rows(edge);
    let cursor = self.row_cursor;
    let height = self.height as i32;
    let real = |slot: usize| (0..height).contains(&(cursor + slot as i32));

    match wavelet {
      WaveletType::LeGall5_3 => {
        if real(2) {
          rows.lift(b[2], [b[1], b[3]], vertical::legall_l0);
        }
        if real(1) {
          rows.lift(b[1], [b[0], b[2]], vertical::legall_h0);
        }
      }
      WaveletType::DeslauriersDubuc9_7 => {
        if real(6) {
          rows.lift(b[6], [b[5], b[7]], vertical::legall_l0);
        }
        if real(3) {
          rows.lift(b[3], [b[0], b[2], b[4], b[6]], vertical::dd97_h0);
        }
      }
      WaveletType::DeslauriersDubuc13_7 => {
        if real(6) {
          rows.lift(b[6], [b[3], b[5], b[7], b[9]], vertical::dd137_l0);
        }
        if real(3) {
          rows.lift(b[3], [b[0], b[2], b[4], b[6]], vertical::dd97_h0);
        }
      }
      WaveletType::Daubechies9_7 => {
        if real(4) {
          rows.lift(b[4], [b[3], b[5]], vertical::daub97_l1);
        }
        if real(3) {
          rows.lift(b[3], [b[2], b[4]], vertical::daub97_h1);
        }
        if real(2) {
          rows.lift(b[2], [b[1], b[3]], vertical::daub97_l0);
        }
        if real(1) {
          rows.lift(b[1], [b[0], b[2]], vertical::daub97_h0);
        }
      }
      WaveletType::Haar0 | WaveletType::Haar1 => rows.haar(b[0], b[1]),
      WaveletType::Fidelity => unreachable!("fidelity levels are batch scheduled"),
    }

    for slot in 0..2 {
      if real(slot) {
        rows.compose(wavelet, b[slot], tmp);
      }
    }

    let n = self.window;
    self.retained[..n].copy_from_slice(&b[2..n + 2]);
    self.row_cursor += 2;
    trace!("Level {}: cursor {} -> {}", self.level, cursor, self.row_cursor);
  }

  /// Full height pass for families that are not window scheduled
  fn batch<T: Coefficient>(&mut self, wavelet: WaveletType, rows: &mut LevelRows<'_, T>, tmp: &mut [T]) {
    debug_assert_eq!(wavelet, WaveletType::Fidelity);
    let h = self.height as i32;
    for y in (1..h).step_by(2) {
      let src = std::array::from_fn(|i| (y - 7 + 2 * i as i32).clamp(0, h - 2) as usize);
      rows.lift(y as usize, src, vertical::fidelity_h0);
    }
    for y in (0..h).step_by(2) {
      let src = std::array::from_fn(|i| (y - 7 + 2 * i as i32).clamp(1, h - 1) as usize);
      rows.lift(y as usize, src, vertical::fidelity_l0);
    }
    for y in 0..self.height {
      rows.compose(wavelet, y, tmp);
    }
    trace!("Level {}: batch pass over {} rows", self.level, self.height);
    self.row_cursor = h;
  }
}
