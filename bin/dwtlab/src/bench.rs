// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

use clap::ArgMatches;
use log::info;
use std::time::{Duration, Instant};
use wavelift::{BitDepthClass, Coefficient, DecodeSessionConfig, spatial_dwt, spatial_idwt, spatial_idwt_planes};

use crate::plane::{TransformOptions, generate_planes};
use crate::{AppError, Result};

/// Time the inverse transform for every selected wavelet family
pub fn bench(options: &ArgMatches) -> anyhow::Result<()> {
  let params = TransformOptions::from_matches(options)?;
  let iterations = *options.get_one::<usize>("iterations").expect("iterations has a default");
  if iterations == 0 {
    return Err(AppError::InvalidCmdSwitch("--iterations must be at least 1".into()).into());
  }

  println!("{:10} {:>10} {:>10} {:>14}", "wavelet", "min ms", "avg ms", "Msamples/s");
  for wavelet in &params.wavelets {
    let config = params.config(*wavelet)?;
    let timings = match config.class {
      BitDepthClass::Narrow => measure::<i16>(&config, params.planes, iterations)?,
      BitDepthClass::Wide => measure::<i32>(&config, params.planes, iterations)?,
    };
    let min = timings.iter().min().copied().unwrap_or_default();
    let total: Duration = timings.iter().sum();
    let avg = total / iterations as u32;
    let samples = (config.width * config.height * params.planes) as f64;
    println!(
      "{:10} {:>10.3} {:>10.3} {:>14.1}",
      wavelet.name(),
      min.as_secs_f64() * 1000.0,
      avg.as_secs_f64() * 1000.0,
      samples / min.as_secs_f64().max(f64::EPSILON) / 1.0e6
    );
  }
  Ok(())
}

/// Inverse transform timings of `iterations` runs over fresh copies
/// of the same coefficients
fn measure<T: Coefficient>(config: &DecodeSessionConfig, count: usize, iterations: usize) -> Result<Vec<Duration>> {
  let mut coeffs = generate_planes::<T>(config, count);
  for plane in coeffs.iter_mut() {
    spatial_dwt(plane.as_mut_slice(), config)?;
  }

  let mut timings = Vec::with_capacity(iterations);
  for i in 0..iterations {
    let mut planes = coeffs.clone();
    let instant = Instant::now();
    if count == 1 {
      spatial_idwt(planes[0].as_mut_slice(), config)?;
    } else {
      spatial_idwt_planes(&mut planes, config)?;
    }
    let elapsed = instant.elapsed();
    info!("{} iteration {}: {:?}", config.wavelet, i, elapsed);
    timings.push(elapsed);
  }
  Ok(timings)
}
