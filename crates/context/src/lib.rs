// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

mod context;
mod error;
mod parse;

pub use context::{Container, Context, PropertyMapping, TypeValue};
pub use error::ContextError;
pub use parse::{parse_context, parse_context_str};

// This tests rust code in the README with doc-tests.
// Though, It will not appear in the generated documentation.
#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
