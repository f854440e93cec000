// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use hilmap_raster::PixelBuffer;
use png::{BitDepth, ColorType, Encoder};

use crate::error::CliError;

/// Writes `buffer` as an 8-bit RGBA PNG.
pub(crate) fn write_png(path: &Path, buffer: &PixelBuffer) -> Result<(), CliError> {
    let file = File::create(path).map_err(|source| CliError::Write {
        path: path.to_owned(),
        source,
    })?;
    let mut encoder = Encoder::new(BufWriter::new(file), buffer.width(), buffer.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&buffer.to_rgba_bytes())?;
    writer.finish()?;
    Ok(())
}
