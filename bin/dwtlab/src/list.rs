// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

use clap::ArgMatches;
use wavelift::{BitDepthClass, KernelSet, WaveletType};

/// Print the supported wavelet families with their kernel parameters
pub fn list(_options: &ArgMatches) -> anyhow::Result<()> {
  println!("{:>5}  {:10} {:6} {:>7} {:>5} {:>6}  scheduler", "index", "name", "edge", "support", "shift", "window");
  for wavelet in WaveletType::ALL {
    let kernels = KernelSet::select(wavelet, BitDepthClass::Narrow);
    println!(
      "{:>5}  {:10} {:6} {:>7} {:>5} {:>6}  {:?}",
      wavelet.index(),
      wavelet.name(),
      format!("{:?}", kernels.edge()),
      kernels.support(),
      kernels.shift(),
      kernels.window(),
      kernels.scheduler()
    );
  }
  Ok(())
}
