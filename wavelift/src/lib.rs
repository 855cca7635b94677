// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

//! Lifting-scheme inverse discrete wavelet transform for spatial
//! (multi-resolution) image decoding.
//!
//! The engine reconstructs a plane of wavelet coefficients in place. It
//! supports the Dirac wavelet families (LeGall 5/3, Deslauriers-Dubuc 9/7
//! and 13/7, Haar with and without shift, Fidelity and Daubechies 9/7) for
//! 16-bit and 32-bit coefficient storage.
//!
//! Each decomposition level keeps a small window of row indices and is
//! advanced two rows at a time, so a decoder can consume reconstructed rows
//! while coarser levels are still in progress.
//!
//! # Example
//! ```rust
//! use wavelift::{spatial_dwt, spatial_idwt, DecodeSessionConfig, WaveletType};
//!
//! let config = DecodeSessionConfig::new(WaveletType::LeGall5_3, 32, 16, 2, 8).unwrap();
//! let image: Vec<i16> = (0..32 * 16).map(|i| (i % 97) as i16).collect();
//!
//! let mut plane = image.clone();
//! spatial_dwt(&mut plane, &config).unwrap();
//! spatial_idwt(&mut plane, &config).unwrap();
//! assert_eq!(plane, image);
//! ```

#![deny(
    //missing_docs,
    //missing_debug_implementations,
    unsafe_code,
    unstable_features,
    //unused_import_braces,
    //unused_qualifications
  )]

pub mod analysis;
pub mod compose;
pub mod config;
pub mod edge;
pub mod idwt;
pub mod kernels;
pub mod lifting;
pub mod sample;
pub mod wavelet;

pub use analysis::spatial_dwt;
pub use config::{DecodeSessionConfig, MAX_DWT_LEVELS, aligned_stride, padded_dimension};
pub use idwt::{PlaneSamples, SpatialIdwt, WaveletPlaneBuffer, spatial_idwt, spatial_idwt_planes};
pub use sample::{BitDepthClass, Coefficient};
pub use wavelet::{KernelSet, WaveletType};

use thiserror::Error;

/// Error variants for the wavelet engine
///
/// Every variant is detected before a kernel touches the plane,
/// so a failed call leaves the coefficient buffer unmodified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DwtError {
  /// Wavelet index from a bitstream header is outside the known set
  #[error("Invalid wavelet type: {}", _0)]
  InvalidWaveletType(u32),

  #[error("Invalid decomposition count: {} (supported: 1..={})", _0, MAX_DWT_LEVELS)]
  InvalidDecompositionCount(usize),

  #[error("Unsupported bit depth: {}", _0)]
  UnsupportedBitDepth(u32),

  /// Plane geometry incompatible with the wavelet family or level count
  #[error("Dimension invariant violated: {}", _0)]
  DimensionInvariantViolation(String),

  #[error("Plane buffer too small: {} samples required, {} available", needed, available)]
  BufferTooSmall { needed: usize, available: usize },

  /// Sample type of the plane does not match the configured bit depth class
  #[error("Sample width mismatch: session expects {:?}, plane provides {:?}", expected, found)]
  SampleWidthMismatch { expected: BitDepthClass, found: BitDepthClass },

  #[error("Invalid decomposition level: {}", _0)]
  InvalidLevel(usize),
}

/// Result type for wavelet operations
pub type Result<T> = std::result::Result<T, DwtError>;

#[cfg(test)]
pub(crate) fn init_test_logger() {
  let _ = env_logger::builder().is_test(true).try_init();
}
