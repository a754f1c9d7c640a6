// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;
use std::sync::Arc;

use oxrdf::{NamedNode, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Term};

use crate::{GraphSource, ValidationError};

/// A SHACL validation backend.
pub trait Validator: Send + Sync {
    /// Validates `focus` against the shapes that apply to it.
    ///
    /// # Errors
    ///
    /// Only if the validation itself could not be performed.
    /// Violations are reported through the `Ok` value.
    fn validate(
        &self,
        graph: &dyn GraphSource,
        focus: NamedOrBlankNodeRef<'_>,
    ) -> Result<ValidationOutcome, ValidationError>;

    /// Validates `focus` as an instance of `class`,
    /// whether the graph says it is one or not.
    ///
    /// The default implementation ignores `class`,
    /// and calls [`Self::validate`].
    ///
    /// # Errors
    ///
    /// Only if the validation itself could not be performed.
    fn validate_as(
        &self,
        graph: &dyn GraphSource,
        focus: NamedOrBlankNodeRef<'_>,
        class: NamedNodeRef<'_>,
    ) -> Result<ValidationOutcome, ValidationError> {
        let _ = class;
        self.validate(graph, focus)
    }
}

/// One way in which a focus node does not conform to a shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub focus: NamedOrBlankNode,
    pub path: Option<NamedNode>,
    /// The offending value, if the violation is about a single value.
    pub value: Option<Term>,
    /// The SHACL constraint component, e.g. `sh:MinCountConstraintComponent`.
    pub component: NamedNode,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.focus)?;
        if let Some(path) = &self.path {
            write!(f, " {path}")?;
        }
        if let Some(value) = &self.value {
            write!(f, " {value}")?;
        }
        write!(f, ": {}", self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Conforms,
    Violations(Vec<Violation>),
}

impl ValidationOutcome {
    #[must_use]
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        if violations.is_empty() {
            Self::Conforms
        } else {
            Self::Violations(violations)
        }
    }

    #[must_use]
    pub const fn conforms(&self) -> bool {
        matches!(self, Self::Conforms)
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Conforms => &[],
            Self::Violations(violations) => violations,
        }
    }
}

/// Which validator to use for one validation.
#[derive(Clone)]
pub enum ValidationContext {
    /// The one set on the registry;
    /// fails if there is none.
    UseRegistered,
    With(Arc<dyn Validator>),
}

impl fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UseRegistered => f.write_str("UseRegistered"),
            Self::With(_) => f.write_str("With(<validator>)"),
        }
    }
}
