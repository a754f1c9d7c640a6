// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod domain;
mod error;
mod graph;
mod handle;
mod memo;
mod registry;
mod shape_validator;
mod side_channel;
mod validation;

pub use error::{MaterializeError, ValidationError};
pub use graph::{as_node, GraphSource};
pub use handle::{FromLiteral, Materialized, NodeHandle};
pub use memo::Memo;
pub use registry::{Factory, Registry};
pub use shape_validator::ShapeValidator;
pub use side_channel::SideChannel;
pub use validation::{ValidationContext, ValidationOutcome, Validator, Violation};

/// Re-exported, so users of generated code work with the same RDF types.
pub use oxrdf;

// This tests rust code in the README with doc-tests.
// Though, It will not appear in the generated documentation.
#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
