// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;
use wavelift::{MAX_DWT_LEVELS, WaveletType};

use crate::{PKG_NAME, PKG_VERSION};

/// Accept a wavelet by name (`legall53`) or by its header index (`1`)
fn parse_wavelet(value: &str) -> std::result::Result<WaveletType, String> {
  if let Ok(index) = value.parse::<u32>() {
    return WaveletType::from_index(index).map_err(|err| err.to_string());
  }
  WaveletType::from_name(value).ok_or_else(|| {
    let names: Vec<&str> = WaveletType::ALL.iter().map(|w| w.name()).collect();
    format!("unknown wavelet '{}', expected one of: {}", value, names.join(", "))
  })
}

fn transform_args() -> Vec<Arg> {
  vec![
    Arg::new("wavelet")
      .short('w')
      .long("wavelet")
      .value_parser(parse_wavelet)
      .help("Wavelet family by name or index (all families if omitted)"),
    Arg::new("width")
      .long("width")
      .value_parser(value_parser!(usize))
      .default_value("256")
      .help("Plane width, padded to a multiple of 2^depth"),
    Arg::new("height")
      .long("height")
      .value_parser(value_parser!(usize))
      .default_value("256")
      .help("Plane height, padded to a multiple of 2^depth"),
    Arg::new("depth")
      .long("depth")
      .value_parser(value_parser!(usize))
      .default_value("3")
      .help(format!("Decomposition levels (1-{})", MAX_DWT_LEVELS)),
    Arg::new("bits")
      .long("bits")
      .value_parser(value_parser!(u32).range(1..=16))
      .default_value("8")
      .help("Source bit depth, selects 16 or 32 bit coefficients"),
    Arg::new("planes")
      .long("planes")
      .value_parser(value_parser!(usize))
      .default_value("1")
      .help("Number of independent planes"),
  ]
}

pub fn create_app() -> Command {
  Command::new(PKG_NAME)
    .version(PKG_VERSION)
    .author("Daniel V. <daniel@chaospixel.com>")
    .about("dwtlab - Dirac wavelet transform verification and timing")
    .subcommand_required(true)
    .arg(
      Arg::new("debug")
        .short('d')
        .action(ArgAction::Count)
        .global(true)
        .help("Sets the level of debugging information"),
    )
    .subcommand(Command::new("list").about("List supported wavelet families"))
    .subcommand(
      Command::new("roundtrip")
        .about("Forward and inverse transform of a generated plane, verify exact reconstruction")
        .args(transform_args())
        .arg(
          Arg::new("slice_rows")
            .long("slice-rows")
            .value_parser(value_parser!(usize))
            .help("Reconstruct incrementally, this many rows per slice"),
        )
        .arg(
          Arg::new("dump")
            .long("dump")
            .value_parser(value_parser!(PathBuf))
            .help("Write the reconstructed first plane as 16-bit PNG"),
        ),
    )
    .subcommand(
      Command::new("bench")
        .about("Measure inverse transform timings")
        .args(transform_args())
        .arg(
          Arg::new("iterations")
            .short('n')
            .long("iterations")
            .value_parser(value_parser!(usize))
            .default_value("10")
            .help("Iterations per wavelet family"),
        ),
    )
}
