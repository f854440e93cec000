// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `hilmap`: render a memory map or any list of address ranges as a
//! Hilbert-curve image.
//!
//! ```text
//! hilmap /proc/self/maps --click 512,300 --grid -o map.png
//! ```
//!
//! The final view is printed to stdout as a query string; pass it back with
//! `--view` to continue from there.

mod args;
mod error;
mod output;

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use hilmap_index::{Palette, parse};
use hilmap_raster::{Explorer, RenderOptions, Shading, draw_grid, render_overview};
use hilmap_view::curve::CurveLayout;
use hilmap_view::{AddressSpace, SpaceError, ZoomState};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::args::Args;
use crate::error::CliError;
use crate::output::write_png;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("error: {}", error_chain(&err));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = if verbose > 0 {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let space = AddressSpace::new(args.space_config())?;
    let text = fs::read_to_string(&args.input).map_err(|source| CliError::Read {
        path: args.input.clone(),
        source,
    })?;

    let format = args.format.resolve(&text);
    let mut palette = Palette::new();
    let report = parse(&text, format, space.ceiling(), &mut palette);
    if !report.skipped.is_empty() {
        tracing::warn!(
            skipped = report.skipped.len(),
            "ignored malformed or out-of-range lines"
        );
    }
    tracing::info!(
        regions = report.ranges.len(),
        ?format,
        input = %args.input.display(),
        "loaded ranges"
    );

    if args.overview {
        let layout =
            CurveLayout::stacked(space.config().resolution_order).map_err(SpaceError::from)?;
        let space = space.with_overview_layout(layout);
        let frame = render_overview(&report.into_index(), &space, &RenderOptions::default());
        write_png(&args.output, &frame)?;
        tracing::info!(output = %args.output.display(), "wrote overview");
        return Ok(());
    }

    let mut explorer = Explorer::new(space, report.into_index());
    if let Some(query) = &args.view {
        let state = ZoomState::from_query(explorer.space(), query)?;
        explorer.restore_state(state)?;
    }
    for &click in &args.click {
        if !explorer.zoom_in(click) {
            tracing::warn!(x = click.x, y = click.y, "click left the view unchanged");
        }
    }

    let state = explorer.state();
    let mut frame = explorer.render();
    if let Some(label) = &args.highlight {
        let region = explorer
            .index()
            .find_label(label)
            .ok_or_else(|| CliError::UnknownLabel(label.clone()))?;
        // The exported image keeps the highlight.
        let _ = Shading::apply(
            &mut frame,
            region,
            &state,
            explorer.space(),
            explorer.options().highlight,
        );
    }
    if args.grid {
        draw_grid(&mut frame, &state, explorer.space(), &explorer.options().grid);
    }
    write_png(&args.output, &frame)?;
    tracing::info!(output = %args.output.display(), level = state.level(), "wrote image");

    println!("{}", state.to_query());
    for &pixel in &args.query {
        match explorer.probe(pixel) {
            Some(info) => println!(
                "{},{}\t{:#x}\t{}",
                pixel.x,
                pixel.y,
                info.address,
                info.region.map_or("-", |r| r.label())
            ),
            None => println!("{},{}\toutside", pixel.x, pixel.y),
        }
    }
    Ok(())
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
