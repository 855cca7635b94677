// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

use wavelift::edge::mirror;
use wavelift::lifting::spatial_idwt_reference;
use wavelift::{Coefficient, DecodeSessionConfig, WaveletType, spatial_dwt, spatial_idwt};

use crate::common::{PADDING, configs, generate_flat_plane, generate_full_range_plane, generate_plane, sample_range};

fn check_roundtrip<T: Coefficient>(config: &DecodeSessionConfig) -> std::result::Result<(), Box<dyn std::error::Error>> {
  let image = generate_plane::<T>(config, config.wavelet.index() as usize);
  let mut plane = image.clone();
  spatial_dwt(&mut plane, config)?;
  assert_ne!(plane, image, "{} {}x{}: forward transform is a no-op", config.wavelet, config.width, config.height);
  spatial_idwt(&mut plane, config)?;
  assert_eq!(
    plane, image,
    "{} {}x{} depth {} stride {}",
    config.wavelet, config.width, config.height, config.decomposition_count, config.stride
  );
  Ok(())
}

#[test]
fn roundtrip_narrow_samples() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  for wavelet in WaveletType::ALL {
    for config in configs(wavelet, 8) {
      check_roundtrip::<i16>(&config)?;
    }
  }
  Ok(())
}

#[test]
fn roundtrip_wide_samples() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  for wavelet in WaveletType::ALL {
    for config in configs(wavelet, 12) {
      check_roundtrip::<i32>(&config)?;
    }
    let deep = DecodeSessionConfig::new(wavelet, 64, 32, 5, 16)?;
    check_roundtrip::<i32>(&deep)?;
  }
  Ok(())
}

/// Full range and flat extreme planes through five levels, checked
/// against the source and against the reference inverse
fn check_sample_range<T: Coefficient>(wavelet: WaveletType, bits: u32) -> std::result::Result<(), Box<dyn std::error::Error>> {
  let config = DecodeSessionConfig::with_stride(wavelet, 64, 64, 72, 5, bits)?;
  let (min, max) = sample_range(bits);
  let images = [
    ("full range", generate_full_range_plane::<T>(&config, bits, wavelet.index())),
    ("flat max", generate_flat_plane::<T>(&config, max)),
    ("flat min", generate_flat_plane::<T>(&config, min)),
  ];
  for (name, image) in &images {
    let mut coeffs = image.clone();
    spatial_dwt(&mut coeffs, &config)?;
    let mut reference = coeffs.clone();
    spatial_idwt_reference(&mut reference, &config)?;
    let mut plane = coeffs;
    spatial_idwt(&mut plane, &config)?;
    assert_eq!(plane, reference, "{} {} bit {}: engine differs from reference", wavelet, bits, name);
    assert_eq!(&plane, image, "{} {} bit {}: not reconstructed", wavelet, bits, name);
  }
  Ok(())
}

#[test]
fn full_sample_range_at_five_levels() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  for wavelet in WaveletType::ALL {
    check_sample_range::<i16>(wavelet, 8)?;
    check_sample_range::<i32>(wavelet, 12)?;
    check_sample_range::<i32>(wavelet, 16)?;
  }
  Ok(())
}

#[test]
fn flat_daub97_narrow_plane_at_five_levels() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  // Second stage lifting of the DC band leaves the i16 range here
  let config = DecodeSessionConfig::new(WaveletType::Daubechies9_7, 64, 64, 5, 8)?;
  let image = vec![127_i16; 64 * 64];
  let mut plane = image.clone();
  spatial_dwt(&mut plane, &config)?;
  spatial_idwt(&mut plane, &config)?;
  assert_eq!(plane, image);
  Ok(())
}

#[test]
fn padding_is_never_written() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  for wavelet in WaveletType::ALL {
    let config = DecodeSessionConfig::with_stride(wavelet, 16, 16, 21, 2, 8)?;
    let mut plane = generate_plane::<i16>(&config, 3);
    spatial_dwt(&mut plane, &config)?;
    spatial_idwt(&mut plane, &config)?;
    for row in plane.chunks_exact(config.stride) {
      assert!(row[config.width..].iter().all(|&v| v as i32 == PADDING), "{}", wavelet);
    }
  }
  Ok(())
}

#[test]
fn mirror_edge_equals_symmetric_extension() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  // Reflecting the coefficient rows about row 0 gives a plane twice as
  // high whose lower half must reconstruct exactly like the original
  let (w, h) = (16, 16);
  for wavelet in [WaveletType::LeGall5_3, WaveletType::Daubechies9_7] {
    let config = DecodeSessionConfig::new(wavelet, w, h, 1, 12)?;
    let extended_config = DecodeSessionConfig::new(wavelet, w, 2 * h, 1, 12)?;
    let coeffs = generate_plane::<i32>(&config, 13);
    let mut extended = vec![0_i32; w * 2 * h];
    for (y, row) in extended.chunks_exact_mut(w).enumerate() {
      let src = mirror(y as i32 - h as i32, h as i32 - 1) as usize;
      row.copy_from_slice(&coeffs[src * w..(src + 1) * w]);
    }

    let mut plane = coeffs;
    spatial_idwt(&mut plane, &config)?;
    spatial_idwt(&mut extended, &extended_config)?;
    assert_eq!(&extended[h * w..], plane.as_slice(), "{}", wavelet);
  }
  Ok(())
}

#[test]
fn flat_plane_survives_every_family() -> std::result::Result<(), Box<dyn std::error::Error>> {
  crate::init_test_logger();
  for wavelet in WaveletType::ALL {
    let config = DecodeSessionConfig::new(wavelet, 16, 16, 3, 10)?;
    let image = vec![-37_i32; 256];
    let mut plane = image.clone();
    spatial_dwt(&mut plane, &config)?;
    spatial_idwt(&mut plane, &config)?;
    assert_eq!(plane, image, "{}", wavelet);
  }
  Ok(())
}
