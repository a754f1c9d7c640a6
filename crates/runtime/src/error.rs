// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;

use crate::validation::Violation;

/// Failures of the validation infrastructure.
///
/// A node that does not conform is not an error;
/// see [`ValidationOutcome`](crate::ValidationOutcome).
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("No validator is registered, and none was given explicitly")]
    NoValidatorRegistered,

    #[error("The validation backend failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("No factory is registered for the domain type {domain_type}")]
    NoFactoryRegistered { domain_type: &'static str },

    #[error("The node does not conform to its shape; {} violation(s), the first: {}",
        .0.len(),
        .0.first().map(ToString::to_string).unwrap_or_default())]
    Validation(Vec<Violation>),

    #[error(transparent)]
    ValidationFailed(#[from] ValidationError),
}
