// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use oxrdfio::RdfParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Malformed shape {shape}: {message}")]
    Malformed { shape: String, message: String },

    #[error("The shapes document was not syntactically valid:\n{0}")]
    Syntax(String),

    /// Represents all cases of `std::io::Error`.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ShapeError {
    pub fn malformed(shape: impl ToString, message: impl Into<String>) -> Self {
        Self::Malformed {
            shape: shape.to_string(),
            message: message.into(),
        }
    }
}

impl From<RdfParseError> for ShapeError {
    fn from(parse_err: RdfParseError) -> Self {
        match parse_err {
            RdfParseError::Io(io_err) => Self::Io(io_err),
            RdfParseError::Syntax(syntax_err) => Self::Syntax(syntax_err.to_string()),
        }
    }
}
