// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::io;
use std::path::PathBuf;

use hilmap_raster::ExplorerError;
use hilmap_view::{SpaceError, ViewStateError};
use thiserror::Error;

/// Fatal errors; each ends the run with a nonzero exit code.
#[derive(Error, Debug)]
pub(crate) enum CliError {
    #[error("cannot read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot encode PNG")]
    Encode(#[from] png::EncodingError),

    #[error("invalid address space")]
    Space(#[from] SpaceError),

    #[error("invalid --view")]
    View(#[from] ViewStateError),

    #[error(transparent)]
    Explorer(#[from] ExplorerError),

    #[error("no region labeled {0:?}")]
    UnknownLabel(String),
}
