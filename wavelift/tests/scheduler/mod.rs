// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

use wavelift::lifting::spatial_idwt_reference;
use wavelift::wavelet::Scheduler;
use wavelift::{
  BitDepthClass, Coefficient, DecodeSessionConfig, DwtError, KernelSet, SpatialIdwt, WaveletType, spatial_dwt, spatial_idwt, spatial_idwt_planes,
};

use crate::common::{check_md5_equal, configs, generate_full_range_plane, generate_plane, plane_digest};

/// Forward transformed test plane, a valid coefficient layout
fn coefficients<T: Coefficient>(config: &DecodeSessionConfig, seed: usize) -> std::result::Result<Vec<T>, Box<dyn std::error::Error>> {
  let mut plane = generate_plane::<T>(config, seed);
  spatial_dwt(&mut plane, config)?;
  Ok(plane)
}

#[test]
fn sliding_matches_reference() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  for wavelet in WaveletType::ALL {
    for config in configs(wavelet, 8) {
      let coeffs = coefficients::<i16>(&config, 5)?;
      let mut sliding = coeffs.clone();
      let mut reference = coeffs.clone();
      spatial_idwt(&mut sliding, &config)?;
      spatial_idwt_reference(&mut reference, &config)?;
      assert_eq!(sliding, reference, "{} {}x{}", wavelet, config.width, config.height);
    }
  }
  Ok(())
}

#[test]
fn sliding_matches_reference_on_raw_coefficients() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  // Arbitrary coefficients, not produced by the forward transform
  for wavelet in WaveletType::ALL {
    for config in configs(wavelet, 12) {
      let coeffs = generate_plane::<i32>(&config, 17);
      let mut sliding = coeffs.clone();
      let mut reference = coeffs;
      spatial_idwt(&mut sliding, &config)?;
      spatial_idwt_reference(&mut reference, &config)?;
      assert_eq!(sliding, reference, "{} {}x{}", wavelet, config.width, config.height);
    }
  }
  Ok(())
}

#[test]
fn sliding_matches_reference_on_wrapping_coefficients() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  // Coefficients over the whole i16 range overflow most lifting steps
  for wavelet in WaveletType::ALL {
    for (seed, config) in configs(wavelet, 8).iter().enumerate() {
      let coeffs = generate_full_range_plane::<i16>(config, 16, seed as u32);
      let mut sliding = coeffs.clone();
      let mut reference = coeffs;
      spatial_idwt(&mut sliding, config)?;
      spatial_idwt_reference(&mut reference, config)?;
      assert_eq!(sliding, reference, "{} {}x{}", wavelet, config.width, config.height);
    }
  }
  Ok(())
}

#[test]
fn session_kernels_follow_config() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  for wavelet in WaveletType::ALL {
    let config = DecodeSessionConfig::new(wavelet, 32, 32, 3, 12)?;
    let mut plane = vec![0_i32; 32 * 32];
    let session = SpatialIdwt::new(&mut plane, &config)?;
    let kernels = session.kernels();
    assert_eq!(*kernels, KernelSet::select(wavelet, BitDepthClass::Wide));
    assert_eq!(kernels.wavelet(), wavelet);
    assert_eq!(kernels.scheduler() == Scheduler::Batch, wavelet == WaveletType::Fidelity);
    for level in 0..session.level_count() {
      let state = session.level(level).ok_or("missing level")?;
      assert_eq!(state.support, kernels.support());
      assert_eq!(state.row_cursor(), kernels.bootstrap());
      assert_eq!(state.retained_rows().len(), kernels.window());
    }
  }
  Ok(())
}

#[test]
fn sliced_equals_full() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  for wavelet in WaveletType::ALL {
    let config = DecodeSessionConfig::new(wavelet, 64, 64, 3, 8)?;
    let coeffs = coefficients::<i16>(&config, 23)?;

    let mut full = coeffs.clone();
    spatial_idwt(&mut full, &config)?;

    let mut sliced = coeffs;
    let mut session = SpatialIdwt::new(&mut sliced, &config)?;
    let mut ready = 0;
    let mut y = 0;
    while ready < config.height {
      let now = session.compose_slice(y + 16)?;
      assert!(now >= ready, "{}: rows ready went back from {} to {}", wavelet, ready, now);
      ready = now;
      y += 16;
    }
    assert!(session.is_complete());
    drop(session);
    assert_eq!(sliced, full, "{}", wavelet);
  }
  Ok(())
}

#[test]
fn parallel_equals_sequential() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  let config = DecodeSessionConfig::new(WaveletType::DeslauriersDubuc9_7, 32, 32, 3, 10)?;
  let mut planes = Vec::new();
  for seed in 0..4 {
    planes.push(coefficients::<i32>(&config, seed)?);
  }
  let mut sequential = planes.clone();
  for plane in sequential.iter_mut() {
    spatial_idwt(plane, &config)?;
  }
  spatial_idwt_planes(&mut planes, &config)?;
  assert_eq!(planes, sequential);
  Ok(())
}

#[test]
fn parallel_planes_checked_up_front() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  let config = DecodeSessionConfig::new(WaveletType::LeGall5_3, 16, 16, 2, 8)?;
  let good = coefficients::<i16>(&config, 1)?;
  let mut planes = vec![good.clone(), good[..200].to_vec()];
  assert_eq!(
    spatial_idwt_planes(&mut planes, &config),
    Err(DwtError::BufferTooSmall { needed: 256, available: 200 })
  );
  assert_eq!(planes[0], good);
  Ok(())
}

#[test]
fn row_cursor_is_monotonic() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  for wavelet in WaveletType::ALL {
    let config = DecodeSessionConfig::new(wavelet, 32, 32, 3, 8)?;
    let mut plane = coefficients::<i16>(&config, 2)?;
    let mut session = SpatialIdwt::new(&mut plane, &config)?;
    for level in (0..3).rev() {
      let height = config.level_height(level) as i32;
      loop {
        let before = session.level(level).map(|l| l.row_cursor()).ok_or("missing level")?;
        let advanced = session.advance(level)?;
        let after = session.level(level).map(|l| l.row_cursor()).ok_or("missing level")?;
        if !advanced {
          assert_eq!(before, after);
          assert!(after >= height);
          break;
        }
        if wavelet == WaveletType::Fidelity {
          assert_eq!(after, height);
        } else {
          assert_eq!(after, before + 2, "{} level {}", wavelet, level);
        }
        assert!(after <= height);
      }
      assert!(!session.advance(level)?);
    }
    assert!(session.is_complete());
  }
  Ok(())
}

#[test]
fn haar_odd_height_is_rejected() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  for wavelet in [WaveletType::Haar0, WaveletType::Haar1] {
    let result = DecodeSessionConfig::new(wavelet, 8, 7, 1, 8);
    assert!(matches!(result, Err(DwtError::DimensionInvariantViolation(_))), "{}", wavelet);
  }
  Ok(())
}

#[test]
fn failed_session_leaves_plane_untouched() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  let config = DecodeSessionConfig::with_stride(WaveletType::Haar1, 8, 8, 8, 1, 8)?;
  let image = generate_plane::<i16>(&config, 9);
  let mut short = image[..60].to_vec();
  assert_eq!(spatial_idwt(&mut short, &config), Err(DwtError::BufferTooSmall { needed: 64, available: 60 }));
  assert_eq!(short, &image[..60]);

  let wide_config = DecodeSessionConfig::new(WaveletType::Haar1, 8, 8, 1, 12)?;
  let mut plane = image.clone();
  assert!(matches!(spatial_idwt(&mut plane, &wide_config), Err(DwtError::SampleWidthMismatch { .. })));
  assert_eq!(plane, image);
  Ok(())
}

#[test]
fn legall_column_scenario() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  // Two columns carrying [10, 20, 10, 20, ...] in the low half and
  // nothing in the high half. Vertical compose yields [0, 20, 0, 20, ...],
  // horizontal compose spreads each value over the row with the filter shift.
  let config = DecodeSessionConfig::new(WaveletType::LeGall5_3, 2, 8, 1, 8)?;
  let mut plane: Vec<i16> = [10, 20, 10, 20, 10, 20, 10, 20].iter().flat_map(|&v| [v, 0]).collect();
  spatial_idwt(&mut plane, &config)?;
  assert_eq!(plane, [0, 0, 10, 10, 0, 0, 10, 10, 0, 0, 10, 10, 0, 0, 10, 10]);
  check_md5_equal(plane_digest(&plane), "986f4de7b8daa317644bb429bceb1ada");
  Ok(())
}

#[test]
fn output_is_deterministic() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  for wavelet in WaveletType::ALL {
    let config = DecodeSessionConfig::new(wavelet, 32, 16, 2, 8)?;
    let coeffs = coefficients::<i16>(&config, 4)?;
    let mut first = coeffs.clone();
    let mut second = coeffs;
    spatial_idwt(&mut first, &config)?;
    spatial_idwt(&mut second, &config)?;
    assert_eq!(hex::encode(plane_digest(&first)), hex::encode(plane_digest(&second)), "{}", wavelet);
  }
  Ok(())
}
