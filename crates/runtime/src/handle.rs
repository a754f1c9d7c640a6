// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;
use std::sync::Arc;

use oxrdf::{LiteralRef, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Term};

use crate::domain::{DomainType, PropertyError, PropertyResult};
use crate::graph::as_node;
use crate::{
    GraphSource, Registry, SideChannel, ValidationContext, ValidationError, ValidationOutcome,
};

/// Converts the lexical form of a literal into a Rust value.
pub trait FromLiteral: Sized {
    /// What is expected, for error messages.
    const EXPECTED: &'static str;

    fn from_literal(literal: LiteralRef<'_>) -> Option<Self>;
}

impl FromLiteral for String {
    const EXPECTED: &'static str = "string";

    fn from_literal(literal: LiteralRef<'_>) -> Option<Self> {
        Some(literal.value().to_owned())
    }
}

impl FromLiteral for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_literal(literal: LiteralRef<'_>) -> Option<Self> {
        let value = literal.value().trim();
        value.strip_prefix('+').unwrap_or(value).parse().ok()
    }
}

impl FromLiteral for f64 {
    const EXPECTED: &'static str = "double";

    fn from_literal(literal: LiteralRef<'_>) -> Option<Self> {
        match literal.value().trim() {
            "INF" | "+INF" => Some(Self::INFINITY),
            "-INF" => Some(Self::NEG_INFINITY),
            "NaN" => Some(Self::NAN),
            value => value.parse().ok(),
        }
    }
}

impl FromLiteral for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_literal(literal: LiteralRef<'_>) -> Option<Self> {
        match literal.value().trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

/// One node of one graph,
/// as seen through a (generated) domain type.
#[derive(Clone)]
pub struct NodeHandle {
    node: NamedOrBlankNode,
    graph: Arc<dyn GraphSource>,
    registry: Arc<Registry>,
    known: &'static [&'static str],
    class: Option<&'static str>,
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeHandle")
            .field("node", &self.node)
            .field("known", &self.known)
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

impl NodeHandle {
    /// Creates a handle that knows of no predicates yet;
    /// all statements of the node are in its side-channel.
    #[must_use]
    pub fn new(node: NamedOrBlankNode, graph: Arc<dyn GraphSource>, registry: Arc<Registry>) -> Self {
        Self {
            node,
            graph,
            registry,
            known: &[],
            class: None,
        }
    }

    /// Sets the predicates that the domain type has accessors for.
    #[must_use]
    pub fn with_known_predicates(mut self, known: &'static [&'static str]) -> Self {
        self.known = known;
        self
    }

    /// Sets the RDF class the domain type was generated from;
    /// the node gets validated as an instance of it.
    #[must_use]
    pub fn with_class(mut self, class_iri: &'static str) -> Self {
        self.class = Some(class_iri);
        self
    }

    #[must_use]
    pub fn node(&self) -> NamedOrBlankNodeRef<'_> {
        self.node.as_ref()
    }

    #[must_use]
    pub fn graph(&self) -> &Arc<dyn GraphSource> {
        &self.graph
    }

    #[must_use]
    pub const fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    #[must_use]
    pub const fn known_predicates(&self) -> &'static [&'static str] {
        self.known
    }

    #[must_use]
    pub fn class(&self) -> Option<NamedNodeRef<'static>> {
        self.class.map(NamedNodeRef::new_unchecked)
    }

    #[must_use]
    pub fn objects(&self, predicate: &str) -> Vec<Term> {
        self.graph
            .objects(self.node(), NamedNodeRef::new_unchecked(predicate))
    }

    /// The statements about this node that are not covered by the known predicates.
    #[must_use]
    pub fn side_channel(&self) -> SideChannel {
        SideChannel::new(
            self.graph
                .statements(self.node())
                .into_iter()
                .filter(|(predicate, _)| !self.known.contains(&predicate.as_str()))
                .collect(),
        )
    }

    /// Validates this node with the validator chosen by `ctx`,
    /// as an instance of its class, if it has one.
    ///
    /// # Errors
    ///
    /// If there is no validator to use, or the validator failed.
    pub fn validate(&self, ctx: &ValidationContext) -> Result<ValidationOutcome, ValidationError> {
        let validator = self.registry.resolve_validator(ctx)?;
        match self.class() {
            Some(class) => validator.validate_as(&*self.graph, self.node(), class),
            None => validator.validate(&*self.graph, self.node()),
        }
    }

    fn node_string(&self) -> String {
        self.node.to_string()
    }

    fn predicate_string(predicate: &str) -> String {
        NamedNodeRef::new_unchecked(predicate).to_string()
    }

    fn at_most_one(&self, predicate: &str) -> PropertyResult<Option<Term>> {
        let mut objects = self.objects(predicate);
        match objects.len() {
            0 | 1 => Ok(objects.pop()),
            count => Err(PropertyError::TooManyValues {
                node: self.node_string(),
                predicate: Self::predicate_string(predicate),
                count,
            }),
        }
    }

    fn missing(&self, predicate: &str) -> PropertyError {
        PropertyError::Missing {
            node: self.node_string(),
            predicate: Self::predicate_string(predicate),
        }
    }

    fn convert_literal<T: FromLiteral>(&self, predicate: &str, term: &Term) -> PropertyResult<T> {
        let Term::Literal(literal) = term else {
            return Err(PropertyError::NotALiteral {
                node: self.node_string(),
                predicate: Self::predicate_string(predicate),
                value: term.to_string(),
            });
        };
        T::from_literal(literal.as_ref()).ok_or_else(|| PropertyError::InvalidLiteral {
            node: self.node_string(),
            predicate: Self::predicate_string(predicate),
            value: term.to_string(),
            expected: T::EXPECTED,
        })
    }

    fn convert_object<T: DomainType + ?Sized>(
        &self,
        predicate: &str,
        term: &Term,
    ) -> PropertyResult<Arc<T>> {
        let node = as_node(term.as_ref()).ok_or_else(|| PropertyError::NotANode {
            node: self.node_string(),
            predicate: Self::predicate_string(predicate),
            value: term.to_string(),
        })?;
        self.registry
            .materialize::<T>(node.into_owned(), Arc::clone(&self.graph))
            .map_err(|err| PropertyError::Materialize {
                predicate: Self::predicate_string(predicate),
                value: term.to_string(),
                message: err.to_string(),
            })
    }

    /// Reads the single value of a property with `sh:minCount 1` and `sh:maxCount 1`.
    ///
    /// # Errors
    ///
    /// If there is no value, more than one,
    /// or the value can not be converted to `T`.
    pub fn required_literal<T: FromLiteral>(&self, predicate: &str) -> PropertyResult<T> {
        let term = self
            .at_most_one(predicate)?
            .ok_or_else(|| self.missing(predicate))?;
        self.convert_literal(predicate, &term)
    }

    /// Reads the value of a property with `sh:maxCount 1`, if it has one.
    ///
    /// # Errors
    ///
    /// If there is more than one value,
    /// or the value can not be converted to `T`.
    pub fn optional_literal<T: FromLiteral>(&self, predicate: &str) -> PropertyResult<Option<T>> {
        self.at_most_one(predicate)?
            .map(|term| self.convert_literal(predicate, &term))
            .transpose()
    }

    /// Reads all values of a property.
    ///
    /// # Errors
    ///
    /// If one of the values can not be converted to `T`.
    pub fn literal_list<T: FromLiteral>(&self, predicate: &str) -> PropertyResult<Vec<T>> {
        self.objects(predicate)
            .iter()
            .map(|term| self.convert_literal(predicate, term))
            .collect()
    }

    /// Materializes the single value of a property with `sh:class`,
    /// `sh:minCount 1` and `sh:maxCount 1`.
    ///
    /// # Errors
    ///
    /// If there is no value, more than one,
    /// the value is a literal,
    /// or no factory is known for `T`.
    pub fn required_object<T: DomainType + ?Sized>(&self, predicate: &str) -> PropertyResult<Arc<T>> {
        let term = self
            .at_most_one(predicate)?
            .ok_or_else(|| self.missing(predicate))?;
        self.convert_object(predicate, &term)
    }

    /// Materializes the value of a property with `sh:class` and `sh:maxCount 1`,
    /// if it has one.
    ///
    /// # Errors
    ///
    /// If there is more than one value,
    /// the value is a literal,
    /// or no factory is known for `T`.
    pub fn optional_object<T: DomainType + ?Sized>(
        &self,
        predicate: &str,
    ) -> PropertyResult<Option<Arc<T>>> {
        self.at_most_one(predicate)?
            .map(|term| self.convert_object(predicate, &term))
            .transpose()
    }

    /// Materializes all values of a property with `sh:class`.
    ///
    /// # Errors
    ///
    /// If one of the values is a literal,
    /// or no factory is known for `T`.
    pub fn object_list<T: DomainType + ?Sized>(&self, predicate: &str) -> PropertyResult<Vec<Arc<T>>> {
        self.objects(predicate)
            .iter()
            .map(|term| self.convert_object(predicate, term))
            .collect()
    }
}

/// Implemented by every generated wrapper.
pub trait Materialized {
    fn handle(&self) -> &NodeHandle;

    /// The statements about the node that the domain type has no accessor for.
    fn side_channel(&self) -> SideChannel {
        self.handle().side_channel()
    }

    /// Validates the node this instance was materialized from.
    ///
    /// # Errors
    ///
    /// If there is no validator to use, or the validator failed.
    fn validate(&self, ctx: &ValidationContext) -> Result<ValidationOutcome, ValidationError> {
        self.handle().validate(ctx)
    }
}
