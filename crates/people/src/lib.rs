// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Domain types for people and the companies they work for,
//! generated at build time from `shapes/people.ttl`
//! and `context/people.jsonld`.
//!
//! ```
//! use std::sync::Arc;
//!
//! use shapemill_people::{register_all, Person};
//! use shapemill_runtime::oxrdf::{Graph, Literal, NamedNode, Triple};
//! use shapemill_runtime::Registry;
//!
//! let alice = NamedNode::new_unchecked("http://example.org/alice");
//! let mut graph = Graph::new();
//! graph.insert(&Triple::new(
//!     alice.clone(),
//!     NamedNode::new_unchecked("http://example.org/name"),
//!     Literal::from("Alice"),
//! ));
//!
//! let registry = Arc::new(Registry::new());
//! register_all(&registry);
//! let person = registry
//!     .materialize::<dyn Person>(alice.into(), Arc::new(graph))
//!     .unwrap();
//! assert_eq!(person.name(), Ok("Alice"));
//! assert!(person.knows().unwrap().is_empty());
//! ```

#[allow(clippy::pedantic, clippy::nursery)]
mod people {
    include!(concat!(env!("OUT_DIR"), "/people.rs"));
}

pub use people::{
    register_all, Company, CompanyNode, Person, PersonNode, COMPANY_KNOWN_PREDICATES,
    PERSON_KNOWN_PREDICATES,
};

// This tests rust code in the README with doc-tests.
// Though, It will not appear in the generated documentation.
#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
