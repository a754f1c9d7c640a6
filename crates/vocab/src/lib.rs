// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Provides ready to use [`NamedNodeRef`](oxrdf::NamedNodeRef)s
//! for the SHACL and XSD terms the shape compiler works with.

#![allow(dead_code)]

pub mod sh;
pub mod xsd;

// This tests rust code in the README with doc-tests.
// Though, It will not appear in the generated documentation.
#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

#[macro_export]
macro_rules! named_node {
    ($const:ident, $base:expr, $node:literal, $doc:literal) => {
        #[doc=$doc]
        pub const $const: oxrdf::NamedNodeRef<'_> =
            oxrdf::NamedNodeRef::new_unchecked(const_format::concatcp!($base, $node));
    };
}

/// Returns the part of `iri` following `namespace`,
/// if `iri` lies within that namespace.
///
/// # Examples
///
/// ```
/// use shapemill_vocab::{local_part, xsd};
///
/// assert_eq!(local_part(xsd::INTEGER.as_str(), xsd::NS_BASE), Some("integer"));
/// assert_eq!(local_part("http://schema.org/name", xsd::NS_BASE), None);
/// ```
#[must_use]
pub fn local_part<'a>(iri: &'a str, namespace: &str) -> Option<&'a str> {
    iri.strip_prefix(namespace)
        .filter(|local| !local.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_expand_to_namespace() {
        assert_eq!(
            sh::TARGET_CLASS.as_str(),
            "http://www.w3.org/ns/shacl#targetClass"
        );
        assert_eq!(
            xsd::BOOLEAN.as_str(),
            "http://www.w3.org/2001/XMLSchema#boolean"
        );
    }

    #[test]
    fn local_part_requires_non_empty_rest() {
        assert_eq!(local_part(sh::NS_BASE, sh::NS_BASE), None);
        assert_eq!(local_part(sh::PATH.as_str(), sh::NS_BASE), Some("path"));
    }
}
