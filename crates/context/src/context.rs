// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::BTreeMap;

use shapemill_iri::{is_absolute, split_compact, Prefix};

use crate::ContextError;

/// `@container` of a property mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    List,
    Set,
    Index,
    Language,
}

/// `@type` of a property mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeValue {
    /// `@id`; values are IRI references
    Id,
    /// `@vocab`; values are vocabulary relative IRI references
    Vocab,
    /// A datatype IRI, already expanded
    Iri(String),
}

/// A term that names a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMapping {
    /// The expanded property IRI.
    pub id: String,
    pub type_: Option<TypeValue>,
    pub container: Option<Container>,
}

impl PropertyMapping {
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self {
            id,
            type_: None,
            container: None,
        }
    }
}

/// The active JSON-LD context,
/// after all entries of the `@context` were processed.
///
/// All IRIs in here are already expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pub prefixes: BTreeMap<String, Prefix>,
    pub base: Option<String>,
    pub vocab: Option<String>,
    /// Recorded, but not used for naming.
    pub language: Option<String>,
    /// term -> class IRI
    pub type_mappings: BTreeMap<String, String>,
    pub property_mappings: BTreeMap<String, PropertyMapping>,
}

impl Context {
    /// Expands a term or compact IRI to an absolute IRI.
    ///
    /// In this order:
    ///
    /// 1. `prefix:local` with a known `prefix` -> namespace + local
    /// 2. an absolute IRI -> unchanged
    /// 3. with an active `@vocab` -> vocab + term
    /// 4. with an active `@base` -> base + term
    ///
    /// Expanding the result again yields the same IRI.
    ///
    /// # Errors
    ///
    /// If none of the above applies.
    pub fn expand(&self, term: &str) -> Result<String, ContextError> {
        if let Some((prefix, local)) = split_compact(term) {
            if let Some(prefix) = self.prefixes.get(prefix) {
                return Ok(prefix.expand(local));
            }
        }
        if is_absolute(term) {
            return Ok(term.to_owned());
        }
        if let Some(vocab) = &self.vocab {
            return Ok(format!("{vocab}{term}"));
        }
        if let Some(base) = &self.base {
            return Ok(format!("{base}{term}"));
        }
        Err(ContextError::UnresolvableTerm(term.to_owned()))
    }

    /// The term mapped to the class `iri`.
    /// If there are several, the lexicographically first one.
    #[must_use]
    pub fn type_term_for(&self, iri: &str) -> Option<&str> {
        self.type_mappings
            .iter()
            .find(|(_, mapped)| mapped.as_str() == iri)
            .map(|(term, _)| term.as_str())
    }

    /// The term mapped to the property `iri`.
    /// If there are several, the lexicographically first one.
    #[must_use]
    pub fn property_term_for(&self, iri: &str) -> Option<&str> {
        self.property_mappings
            .iter()
            .find(|(_, mapping)| mapping.id == iri)
            .map(|(term, _)| term.as_str())
    }

    /// The property mapping of the term `term`, if any.
    #[must_use]
    pub fn property(&self, term: &str) -> Option<&PropertyMapping> {
        self.property_mappings.get(term)
    }

    /// Compacts `iri` with the longest matching prefix,
    /// e.g. `http://schema.org/name` -> `schema:name`.
    #[must_use]
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .values()
            .filter_map(|prefix| {
                prefix
                    .strip(iri)
                    .map(|local| (prefix.namespace.as_str().len(), prefix, local))
            })
            .max_by_key(|(len, _, _)| *len)
            .map(|(_, prefix, local)| format!("{}:{local}", prefix.prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Context {
        let mut ctx = Context::default();
        ctx.prefixes.insert(
            "ex".to_owned(),
            Prefix::new("ex".to_owned(), "http://example.org/".to_owned()).unwrap(),
        );
        ctx.prefixes.insert(
            "exn".to_owned(),
            Prefix::new("exn".to_owned(), "http://example.org/nested/".to_owned()).unwrap(),
        );
        ctx
    }

    #[test]
    fn expands_compact_iris() {
        let ctx = example();
        assert_eq!(ctx.expand("ex:Person").unwrap(), "http://example.org/Person");
    }

    #[test]
    fn keeps_absolute_iris() {
        let ctx = example();
        assert_eq!(
            ctx.expand("http://schema.org/name").unwrap(),
            "http://schema.org/name"
        );
        assert_eq!(ctx.expand("urn:x:y").unwrap(), "urn:x:y");
    }

    #[test]
    fn vocab_wins_over_base() {
        let mut ctx = example();
        ctx.base = Some("http://base.example/".to_owned());
        assert_eq!(ctx.expand("name").unwrap(), "http://base.example/name");
        ctx.vocab = Some("http://vocab.example/".to_owned());
        assert_eq!(ctx.expand("name").unwrap(), "http://vocab.example/name");
    }

    #[test]
    fn unknown_terms_are_unresolvable() {
        let ctx = example();
        assert!(matches!(
            ctx.expand("name"),
            Err(ContextError::UnresolvableTerm(term)) if term == "name"
        ));
        assert!(ctx.expand("nope:name").is_err());
    }

    #[test]
    fn compacts_with_the_longest_prefix() {
        let ctx = example();
        assert_eq!(
            ctx.compact("http://example.org/nested/x").as_deref(),
            Some("exn:x")
        );
        assert_eq!(ctx.compact("http://other.org/x"), None);
    }

    #[test]
    fn reverse_lookup_picks_the_first_term() {
        let mut ctx = example();
        ctx.type_mappings
            .insert("Zed".to_owned(), "http://example.org/Person".to_owned());
        ctx.type_mappings
            .insert("Person".to_owned(), "http://example.org/Person".to_owned());
        assert_eq!(ctx.type_term_for("http://example.org/Person"), Some("Person"));
        assert_eq!(ctx.type_term_for("http://example.org/Other"), None);
    }
}
