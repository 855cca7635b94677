// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

#![allow(clippy::needless_range_loop)]

mod app;
mod bench;
mod list;
mod plane;
mod roundtrip;

use fern::colors::{Color, ColoredLevelConfig};
use thiserror::Error;

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Main entry function
///
/// We initialize the fern logger here, create a Clap command line
/// parser and dispatch to the subcommand.
fn main() -> anyhow::Result<()> {
  let app = app::create_app();
  let matches = app.try_get_matches().unwrap_or_else(|e| e.exit());

  let colors = ColoredLevelConfig::new().debug(Color::Magenta);
  fern::Dispatch::new()
    .chain(std::io::stderr())
    .level({
      match matches.get_count("debug") {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
      }
    })
    .format(move |out, message, record| {
      out.finish(format_args!(
        "[{:6}][{}] {} ({}:{})",
        colors.color(record.level()),
        record.target(),
        message,
        record.file().unwrap_or("<undefined>"),
        record.line().unwrap_or(0)
      ))
    })
    .apply()
    .expect("Invalid fern configuration, exiting");

  match matches.subcommand() {
    Some(("list", sc)) => list::list(sc),
    Some(("roundtrip", sc)) => roundtrip::roundtrip(sc),
    Some(("bench", sc)) => bench::bench(sc),
    _ => panic!("Unknown subcommand was used"),
  }
}

#[derive(Error, Debug)]
pub enum AppError {
  #[error("Invalid arguments: {}", _0)]
  InvalidCmdSwitch(String),
  #[error("Transform failed: {}", _0)]
  Transform(#[from] wavelift::DwtError),
  #[error("Image error: {}", _0)]
  Image(#[from] image::ImageError),
  #[error("Reconstruction mismatch in {} of {} planes", _0, _1)]
  Mismatch(usize, usize),
}

pub type Result<T> = std::result::Result<T, AppError>;
