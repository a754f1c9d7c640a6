// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt::Display;

use oxrdf::{BlankNode, Literal, NamedNode, SubjectRef, Term, TermRef};
use regex::{Regex, RegexBuilder};

use crate::ShapeError;

/// Identifies a shape; property shapes are mostly blank nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShapeId {
    Named(NamedNode),
    Blank(BlankNode),
}

impl ShapeId {
    #[must_use]
    pub fn as_subject(&self) -> SubjectRef<'_> {
        match self {
            Self::Named(node) => node.as_ref().into(),
            Self::Blank(node) => node.as_ref().into(),
        }
    }

    /// Converts a shape node found in the shapes graph.
    ///
    /// # Errors
    ///
    /// If `subject` is a quoted triple.
    pub fn from_subject(subject: SubjectRef<'_>) -> Result<Self, ShapeError> {
        match subject {
            SubjectRef::NamedNode(node) => Ok(Self::Named(node.into_owned())),
            SubjectRef::BlankNode(node) => Ok(Self::Blank(node.into_owned())),
            SubjectRef::Triple(triple) => Err(ShapeError::malformed(
                format!("<< {triple} >>"),
                "a quoted triple can not be a shape",
            )),
        }
    }

    /// Converts the object of a `sh:property` statement.
    ///
    /// # Errors
    ///
    /// If `term` is a literal or a quoted triple.
    pub fn from_term(term: TermRef<'_>, owner: &Self) -> Result<Self, ShapeError> {
        match term {
            TermRef::NamedNode(node) => Ok(Self::Named(node.into_owned())),
            TermRef::BlankNode(node) => Ok(Self::Blank(node.into_owned())),
            TermRef::Literal(_) | TermRef::Triple(_) => Err(ShapeError::malformed(
                owner,
                format!("sh:property must point to an IRI or a blank node, got {term}"),
            )),
        }
    }
}

impl Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(node) => write!(f, "{node}"),
            Self::Blank(node) => write!(f, "{node}"),
        }
    }
}

/// A node shape that targets a class.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    /// Never empty; shapes without a target class are not parsed into this.
    pub target_class: NamedNode,
    /// From `sh:name` or `rdfs:label`.
    pub name: Option<String>,
    /// From `sh:description` or `rdfs:comment`.
    pub description: Option<String>,
    pub closed: bool,
    pub ignored_properties: Vec<NamedNode>,
    pub properties: Vec<PropertyConstraint>,
}

/// The constraints one property shape puts on the values of one predicate.
///
/// Every constraint that is absent in the shapes document is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyConstraint {
    pub id: ShapeId,
    pub path: NamedNode,
    /// Overrides the name derived from `path`.
    pub name: Option<String>,
    pub description: Option<String>,
    pub order: Option<f64>,
    pub datatype: Option<NamedNode>,
    pub class: Option<NamedNode>,
    pub min_count: Option<u64>,
    pub max_count: Option<u64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
    pub flags: Option<String>,
    pub in_values: Option<Vec<Term>>,
    pub min_inclusive: Option<Literal>,
    pub max_inclusive: Option<Literal>,
    pub min_exclusive: Option<Literal>,
    pub max_exclusive: Option<Literal>,
}

impl PropertyConstraint {
    /// A constraint on `path` with nothing else set.
    #[must_use]
    pub fn new(id: ShapeId, path: NamedNode) -> Self {
        Self {
            id,
            path,
            name: None,
            description: None,
            order: None,
            datatype: None,
            class: None,
            min_count: None,
            max_count: None,
            min_length: None,
            max_length: None,
            pattern: None,
            flags: None,
            in_values: None,
            min_inclusive: None,
            max_inclusive: None,
            min_exclusive: None,
            max_exclusive: None,
        }
    }

    /// The compiled `sh:pattern`, if one is set.
    ///
    /// # Errors
    ///
    /// If the pattern or its `sh:flags` are invalid.
    pub fn pattern_regex(&self) -> Option<Result<Regex, regex::Error>> {
        self.pattern
            .as_deref()
            .map(|pattern| build_pattern(pattern, self.flags.as_deref()))
    }
}

/// Compiles a `sh:pattern` together with its (optional) `sh:flags`.
///
/// The supported flags are `i`, `m`, `s` and `x`,
/// with the same meaning as in XPath regular expressions.
///
/// # Errors
///
/// If the pattern does not compile or a flag is unknown.
pub fn build_pattern(pattern: &str, flags: Option<&str>) -> Result<Regex, regex::Error> {
    let mut builder = RegexBuilder::new(pattern);
    for flag in flags.unwrap_or_default().chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            unknown => {
                return Err(regex::Error::Syntax(format!(
                    "Unsupported regex flag '{unknown}'"
                )))
            }
        };
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_flags_are_applied() {
        let regex = build_pattern("^abc$", Some("i")).unwrap();
        assert!(regex.is_match("ABC"));
        let regex = build_pattern("^abc$", None).unwrap();
        assert!(!regex.is_match("ABC"));
    }

    #[test]
    fn unknown_pattern_flag_is_an_error() {
        assert!(build_pattern("abc", Some("q")).is_err());
    }

    #[test]
    fn blank_node_shape_ids_display_as_blank_nodes() {
        let id = ShapeId::Blank(BlankNode::new_unchecked("p1"));
        assert_eq!(id.to_string(), "_:p1");
        let id = ShapeId::Named(NamedNode::new_unchecked("http://example.org/PersonShape"));
        assert_eq!(id.to_string(), "<http://example.org/PersonShape>");
    }
}
