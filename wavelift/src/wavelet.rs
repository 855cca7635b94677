// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

use log::debug;
use num_enum::{TryFromPrimitive, TryFromPrimitiveError};
use std::fmt::Display;

use crate::DwtError;
use crate::edge::EdgePolicy;
use crate::sample::BitDepthClass;

/// Wavelet filter families
///
/// The discriminant is the wavelet index as coded in the
/// transform parameters of a picture header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u32)]
pub enum WaveletType {
  DeslauriersDubuc9_7 = 0,
  LeGall5_3 = 1,
  DeslauriersDubuc13_7 = 2,
  Haar0 = 3,
  Haar1 = 4,
  Fidelity = 5,
  Daubechies9_7 = 6,
}

impl From<TryFromPrimitiveError<WaveletType>> for DwtError {
  fn from(err: TryFromPrimitiveError<WaveletType>) -> Self {
    Self::InvalidWaveletType(err.number)
  }
}

impl WaveletType {
  pub const ALL: [WaveletType; 7] = [
    Self::DeslauriersDubuc9_7,
    Self::LeGall5_3,
    Self::DeslauriersDubuc13_7,
    Self::Haar0,
    Self::Haar1,
    Self::Fidelity,
    Self::Daubechies9_7,
  ];

  /// Convert a wavelet index from a bitstream header
  pub fn from_index(index: u32) -> crate::Result<Self> {
    Ok(Self::try_from(index)?)
  }

  pub fn index(&self) -> u32 {
    *self as u32
  }

  /// Short name, accepted by [`WaveletType::from_name`]
  pub fn name(&self) -> &'static str {
    match self {
      Self::DeslauriersDubuc9_7 => "dd97",
      Self::LeGall5_3 => "legall53",
      Self::DeslauriersDubuc13_7 => "dd137",
      Self::Haar0 => "haar0",
      Self::Haar1 => "haar1",
      Self::Fidelity => "fidelity",
      Self::Daubechies9_7 => "daub97",
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.iter().copied().find(|wavelet| wavelet.name().eq_ignore_ascii_case(name))
  }

  /// Right shift applied after the horizontal compose step
  pub fn filter_shift(&self) -> u32 {
    match self {
      Self::Haar0 | Self::Fidelity => 0,
      _ => 1,
    }
  }

  pub fn edge_policy(&self) -> EdgePolicy {
    match self {
      Self::LeGall5_3 | Self::Daubechies9_7 => EdgePolicy::Mirror,
      Self::DeslauriersDubuc9_7 | Self::DeslauriersDubuc13_7 | Self::Fidelity => EdgePolicy::Clip,
      Self::Haar0 | Self::Haar1 => EdgePolicy::None,
    }
  }

  /// Number of rows the vertical kernels span
  pub fn support(&self) -> usize {
    match self {
      Self::Haar0 | Self::Haar1 => 1,
      Self::LeGall5_3 => 3,
      Self::Daubechies9_7 => 5,
      Self::DeslauriersDubuc9_7 => 7,
      Self::DeslauriersDubuc13_7 | Self::Fidelity => 9,
    }
  }
}

impl Display for WaveletType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

/// How a decomposition level is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduler {
  /// Two output rows per advance, retaining a window of rows
  Sliding,
  /// One full-height pass, no retained rows
  Batch,
}

/// Immutable kernel selection for one decode session
///
/// [`KernelSet::select`] is the only constructor, so scheduler, window
/// and bootstrap cursor always belong to the same family.
///
/// ```compile_fail
/// use wavelift::{BitDepthClass, KernelSet, WaveletType};
///
/// let mut set = KernelSet::select(WaveletType::Fidelity, BitDepthClass::Narrow);
/// set.window = 16;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelSet {
  wavelet: WaveletType,
  class: BitDepthClass,
  scheduler: Scheduler,
  edge: EdgePolicy,
  support: usize,
  /// Retained rows per level
  window: usize,
  /// Initial row cursor of every level
  bootstrap: i32,
  shift: u32,
}

impl KernelSet {
  pub fn select(wavelet: WaveletType, class: BitDepthClass) -> Self {
    let (scheduler, window, bootstrap) = match wavelet {
      WaveletType::LeGall5_3 => (Scheduler::Sliding, 2, -2),
      WaveletType::Daubechies9_7 => (Scheduler::Sliding, 4, -4),
      WaveletType::DeslauriersDubuc9_7 => (Scheduler::Sliding, 6, -6),
      WaveletType::DeslauriersDubuc13_7 => (Scheduler::Sliding, 8, -6),
      WaveletType::Haar0 | WaveletType::Haar1 => (Scheduler::Sliding, 0, 0),
      WaveletType::Fidelity => (Scheduler::Batch, 0, 0),
    };
    let set = Self {
      wavelet,
      class,
      scheduler,
      edge: wavelet.edge_policy(),
      support: wavelet.support(),
      window,
      bootstrap,
      shift: wavelet.filter_shift(),
    };
    debug!("Kernel set selected: {:?}", set);
    set
  }

  pub fn wavelet(&self) -> WaveletType {
    self.wavelet
  }

  pub fn class(&self) -> BitDepthClass {
    self.class
  }

  pub fn scheduler(&self) -> Scheduler {
    self.scheduler
  }

  pub fn edge(&self) -> EdgePolicy {
    self.edge
  }

  pub fn support(&self) -> usize {
    self.support
  }

  /// Retained rows per level, at most 8
  pub fn window(&self) -> usize {
    self.window
  }

  /// Initial row cursor of every level
  pub fn bootstrap(&self) -> i32 {
    self.bootstrap
  }

  pub fn shift(&self) -> u32 {
    self.shift
  }
}
