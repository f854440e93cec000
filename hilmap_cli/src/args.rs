// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use hilmap_index::InputFormat;
use hilmap_view::SpaceConfig;
use kurbo::Point;

/// Render address ranges as a Hilbert-curve image.
#[derive(Parser, Debug)]
#[command(name = "hilmap", version, about)]
pub(crate) struct Args {
    /// Range description: native `<start> <end> <label>` lines or a process map.
    pub(crate) input: PathBuf,

    /// Input format.
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub(crate) format: FormatArg,

    /// Width of the address space in bits.
    #[arg(long, default_value_t = 48, value_parser = clap::value_parser!(u32).range(6..=62))]
    pub(crate) address_bits: u32,

    /// Zoom into the grid cell under `X,Y`; repeat to zoom further.
    #[arg(long, value_name = "X,Y", value_parser = parse_pixel)]
    pub(crate) click: Vec<Point>,

    /// Start from a saved view, as printed by a previous run.
    #[arg(long, value_name = "QUERY")]
    pub(crate) view: Option<String>,

    /// Draw the locality grid.
    #[arg(long)]
    pub(crate) grid: bool,

    /// Stripe the first region whose label (or base label) matches.
    #[arg(long, value_name = "LABEL")]
    pub(crate) highlight: Option<String>,

    /// Render the whole space on the stacked overview layout instead of the
    /// zoomable view.
    #[arg(long, conflicts_with_all = ["click", "view", "grid", "highlight"])]
    pub(crate) overview: bool,

    /// Where to write the PNG.
    #[arg(short, long, value_name = "PNG", default_value = "hilmap.png")]
    pub(crate) output: PathBuf,

    /// Report the address and region under `X,Y` in the final view.
    #[arg(long, value_name = "X,Y", value_parser = parse_pixel)]
    pub(crate) query: Vec<Point>,

    /// Debug output.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub(crate) verbose: u8,
}

impl Args {
    /// The memory-map geometry at the requested width, with as many zoom
    /// levels as the width allows.
    pub(crate) fn space_config(&self) -> SpaceConfig {
        let base = SpaceConfig::MEMORY_MAP;
        SpaceConfig {
            address_bits: self.address_bits,
            max_level: base.max_level.min(self.address_bits / 6),
            ..base
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum FormatArg {
    /// Guess from the first line.
    Auto,
    /// `<startHex> <endHex> <label...>`.
    Native,
    /// `/proc/<pid>/maps`.
    Maps,
}

impl FormatArg {
    pub(crate) fn resolve(self, text: &str) -> InputFormat {
        match self {
            Self::Auto => InputFormat::detect(text),
            Self::Native => InputFormat::Native,
            Self::Maps => InputFormat::ProcessMap,
        }
    }
}

fn parse_pixel(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid coordinate {v:?}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}
