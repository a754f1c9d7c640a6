// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The vocabulary of generated domain traits.
//!
//! Nothing in here refers to RDF,
//! so code that only consumes domain objects
//! does not need to know where they come from.

use std::any::Any;

use thiserror::Error;

use crate::Registry;

pub type PropertyResult<T> = Result<T, PropertyError>;

/// Why a property value could not be read.
///
/// `node` and `predicate` are given in N-Triples notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("{node} has no value for the required property {predicate}")]
    Missing { node: String, predicate: String },

    #[error("{node} has {count} values for {predicate}, but at most one is allowed")]
    TooManyValues {
        node: String,
        predicate: String,
        count: usize,
    },

    #[error("{node} has the value {value} for {predicate}, which is not a literal")]
    NotALiteral {
        node: String,
        predicate: String,
        value: String,
    },

    #[error("{node} has the value {value} for {predicate}, which is not a valid {expected}")]
    InvalidLiteral {
        node: String,
        predicate: String,
        value: String,
        expected: &'static str,
    },

    #[error("{node} has the value {value} for {predicate}, which is a literal, not a node")]
    NotANode {
        node: String,
        predicate: String,
        value: String,
    },

    #[error("The value {value} of {predicate} could not be materialized: {message}")]
    Materialize {
        predicate: String,
        value: String,
        message: String,
    },
}

/// The common super-trait of all generated domain traits.
pub trait DomainObject: Any + Send + Sync {
    /// Allows to get at the concrete wrapper type,
    /// for example to access its side-channel.
    fn as_any(&self) -> &dyn Any;
}

/// Implemented by generated code for the trait object type
/// (`dyn Person`) of each domain trait.
///
/// The trait object type serves as the registry key.
pub trait DomainType: DomainObject {
    /// The simple name of the domain type, e.g. `Person`.
    const NAME: &'static str;
    /// The RDF class the domain type was generated from.
    const CLASS_IRI: &'static str;

    /// Registers the default factory of this type.
    ///
    /// Called by the registry the first time
    /// it is asked for a type it has no factory for.
    fn install(registry: &Registry);
}
