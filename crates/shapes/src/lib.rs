// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Reads SHACL node shapes and their property constraints.
//!
//! Shapes without an `sh:targetClass` are skipped,
//! as they can not be turned into a class.

mod error;
mod model;
mod parse;

pub use error::ShapeError;
pub use model::{build_pattern, PropertyConstraint, Shape, ShapeId};
pub use parse::{format_from_path, parse_shapes, read_graph, read_shapes};

// This tests rust code in the README with doc-tests.
// Though, It will not appear in the generated documentation.
#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
