// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("The JSON-LD document has no `@context` entry")]
    MissingContext,

    #[error("Remote context '{0}' is not supported; please inline it into the document")]
    ExternalContext(String),

    #[error("Invalid context: {0}")]
    Invalid(String),

    #[error("Unable to expand term '{0}' to an IRI: no matching prefix, no @vocab and no @base")]
    UnresolvableTerm(String),

    #[error("The context document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
