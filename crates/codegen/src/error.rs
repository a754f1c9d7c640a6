// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::io;
use std::path::PathBuf;

use shapemill_context::ContextError;
use shapemill_shapes::ShapeError;
use thiserror::Error;

use crate::model::ModelError;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Failed to read the shapes from '{}': {source}", path.display())]
    Shapes {
        path: PathBuf,
        #[source]
        source: ShapeError,
    },

    #[error("Failed to read the JSON-LD context from '{}': {source}", path.display())]
    Context {
        path: PathBuf,
        #[source]
        source: ContextError,
    },

    #[error("Unable to tell the RDF format of '{}' from its file extension", .0.display())]
    UnknownFormat(PathBuf),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("The output file '{}' exists already; use force to overwrite it", .0.display())]
    OutputExists(PathBuf),

    #[error("'{0}' can not be used as a Rust module name")]
    InvalidModuleName(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
