// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Literal, NamedNode, NamedNodeRef, NamedOrBlankNodeRef, Term};
use regex::Regex;
use shapemill_shapes::{PropertyConstraint, Shape, ShapeError};
use shapemill_vocab::{sh, xsd};

use crate::graph::as_node;
use crate::{GraphSource, ValidationError, ValidationOutcome, Validator, Violation};

/// A property constraint with its pattern compiled.
struct CompiledProperty {
    constraint: PropertyConstraint,
    pattern: Option<Regex>,
}

struct CompiledShape {
    shape: Shape,
    properties: Vec<CompiledProperty>,
}

/// A validator for the declarative core of SHACL:
/// cardinality, datatype, class, length, pattern, `sh:in`,
/// value ranges and closed shapes,
/// on predicate paths only.
///
/// Applies to a focus node the shapes that target one of its classes,
/// following `rdfs:subClassOf`.
/// With [`Validator::validate_as`],
/// the shapes of the given class apply as well.
pub struct ShapeValidator {
    shapes: Vec<CompiledShape>,
    forced_class: Option<NamedNode>,
}

impl ShapeValidator {
    /// # Errors
    ///
    /// If one of the patterns does not compile.
    pub fn new(shapes: Vec<Shape>) -> Result<Self, ShapeError> {
        let shapes = shapes
            .into_iter()
            .map(|shape| {
                let properties = shape
                    .properties
                    .iter()
                    .map(|constraint| {
                        let pattern = constraint
                            .pattern_regex()
                            .transpose()
                            .map_err(|err| ShapeError::malformed(&constraint.id, err.to_string()))?;
                        Ok::<_, ShapeError>(CompiledProperty {
                            constraint: constraint.clone(),
                            pattern,
                        })
                    })
                    .collect::<Result<Vec<_>, ShapeError>>()?;
                Ok::<_, ShapeError>(CompiledShape { shape, properties })
            })
            .collect::<Result<Vec<_>, ShapeError>>()?;
        Ok(Self {
            shapes,
            forced_class: None,
        })
    }

    /// Applies the shapes targeting `class` to every focus node,
    /// whether it is typed with that class or not.
    #[must_use]
    pub fn for_class(mut self, class: NamedNode) -> Self {
        self.forced_class = Some(class);
        self
    }

    #[must_use]
    pub fn into_arc(self) -> Arc<dyn Validator> {
        Arc::new(self)
    }

    fn applicable_shapes<'a>(
        &'a self,
        graph: &dyn GraphSource,
        focus: NamedOrBlankNodeRef<'_>,
        class: Option<NamedNodeRef<'_>>,
    ) -> Vec<&'a CompiledShape> {
        if let Some(forced) = &self.forced_class {
            return self
                .shapes
                .iter()
                .filter(|compiled| compiled.shape.target_class == *forced)
                .collect();
        }
        self.shapes
            .iter()
            .filter(|compiled| {
                let target = compiled.shape.target_class.as_ref();
                class == Some(target) || is_instance_of(graph, focus, target)
            })
            .collect()
    }

    fn outcome(
        &self,
        graph: &dyn GraphSource,
        focus: NamedOrBlankNodeRef<'_>,
        class: Option<NamedNodeRef<'_>>,
    ) -> ValidationOutcome {
        let mut violations = Vec::new();
        for compiled in self.applicable_shapes(graph, focus, class) {
            tracing::trace!("Validating {focus} against {}", compiled.shape.id);
            let mut check = Check {
                graph,
                focus,
                violations: &mut violations,
            };
            for property in &compiled.properties {
                check.property(property);
            }
            if compiled.shape.closed {
                check.closed(&compiled.shape);
            }
        }
        ValidationOutcome::from_violations(violations)
    }
}

impl Validator for ShapeValidator {
    fn validate(
        &self,
        graph: &dyn GraphSource,
        focus: NamedOrBlankNodeRef<'_>,
    ) -> Result<ValidationOutcome, ValidationError> {
        Ok(self.outcome(graph, focus, None))
    }

    fn validate_as(
        &self,
        graph: &dyn GraphSource,
        focus: NamedOrBlankNodeRef<'_>,
        class: NamedNodeRef<'_>,
    ) -> Result<ValidationOutcome, ValidationError> {
        Ok(self.outcome(graph, focus, Some(class)))
    }
}

/// Whether `node` is typed with `class`, or a (transitive) sub-class of it.
fn is_instance_of(
    graph: &dyn GraphSource,
    node: NamedOrBlankNodeRef<'_>,
    class: NamedNodeRef<'_>,
) -> bool {
    let mut pending: Vec<Term> = graph.objects(node, rdf::TYPE);
    let mut visited = HashSet::new();
    while let Some(current) = pending.pop() {
        let Term::NamedNode(current) = current else {
            continue;
        };
        if current.as_ref() == class {
            return true;
        }
        if visited.insert(current.clone()) {
            pending.extend(graph.objects(current.as_ref().into(), rdfs::SUB_CLASS_OF));
        }
    }
    false
}

fn lexical_form(term: &Term) -> Option<&str> {
    match term {
        Term::NamedNode(node) => Some(node.as_str()),
        Term::Literal(literal) => Some(literal.value()),
        Term::BlankNode(_) | Term::Triple(_) => None,
    }
}

fn is_numeric(datatype: NamedNodeRef<'_>) -> bool {
    is_integer(datatype) || [xsd::DECIMAL, xsd::DOUBLE, xsd::FLOAT].contains(&datatype)
}

fn is_integer(datatype: NamedNodeRef<'_>) -> bool {
    [
        xsd::INTEGER,
        xsd::LONG,
        xsd::INT,
        xsd::SHORT,
        xsd::BYTE,
        xsd::NON_NEGATIVE_INTEGER,
        xsd::POSITIVE_INTEGER,
        xsd::NON_POSITIVE_INTEGER,
        xsd::NEGATIVE_INTEGER,
        xsd::UNSIGNED_LONG,
        xsd::UNSIGNED_INT,
        xsd::UNSIGNED_SHORT,
        xsd::UNSIGNED_BYTE,
    ]
    .contains(&datatype)
}

/// Whether the lexical form of `literal` is valid for its datatype.
/// Only checked for numbers and booleans.
fn is_well_formed(literal: &Literal) -> bool {
    let datatype = literal.datatype();
    let value = literal.value().trim();
    if is_integer(datatype) {
        value.strip_prefix('+').unwrap_or(value).parse::<i128>().is_ok()
    } else if is_numeric(datatype) {
        matches!(value, "INF" | "+INF" | "-INF" | "NaN") || value.parse::<f64>().is_ok()
    } else if datatype == xsd::BOOLEAN {
        matches!(value, "true" | "false" | "1" | "0")
    } else {
        true
    }
}

/// Compares two literals numerically if both are numbers,
/// lexically if both have the same (other) datatype.
fn compare_literals(value: &Literal, bound: &Literal) -> Option<Ordering> {
    if is_numeric(value.datatype()) && is_numeric(bound.datatype()) {
        let value = value.value().trim().parse::<f64>().ok()?;
        let bound = bound.value().trim().parse::<f64>().ok()?;
        return value.partial_cmp(&bound);
    }
    if value.datatype() == bound.datatype() {
        return Some(value.value().cmp(bound.value()));
    }
    None
}

struct Check<'a, 'g> {
    graph: &'g dyn GraphSource,
    focus: NamedOrBlankNodeRef<'g>,
    violations: &'a mut Vec<Violation>,
}

impl Check<'_, '_> {
    fn report(
        &mut self,
        path: NamedNodeRef<'_>,
        value: Option<&Term>,
        component: NamedNodeRef<'_>,
        message: String,
    ) {
        self.violations.push(Violation {
            focus: self.focus.into_owned(),
            path: Some(path.into_owned()),
            value: value.cloned(),
            component: component.into_owned(),
            message: format!("{path}: {message}"),
        });
    }

    fn property(&mut self, property: &CompiledProperty) {
        let constraint = &property.constraint;
        let path = constraint.path.as_ref();
        let values = self.graph.objects(self.focus, path);
        let count = values.len() as u64;

        if let Some(min) = constraint.min_count {
            if count < min {
                self.report(
                    path,
                    None,
                    sh::MIN_COUNT_CONSTRAINT_COMPONENT,
                    format!("expected at least {min} value(s), found {count}"),
                );
            }
        }
        if let Some(max) = constraint.max_count {
            if count > max {
                self.report(
                    path,
                    None,
                    sh::MAX_COUNT_CONSTRAINT_COMPONENT,
                    format!("expected at most {max} value(s), found {count}"),
                );
            }
        }
        for value in &values {
            self.value(property, path, value);
        }
    }

    fn value(&mut self, property: &CompiledProperty, path: NamedNodeRef<'_>, value: &Term) {
        let constraint = &property.constraint;

        if let Some(datatype) = &constraint.datatype {
            let conforms = match value {
                Term::Literal(literal) => {
                    literal.datatype() == datatype.as_ref() && is_well_formed(literal)
                }
                _ => false,
            };
            if !conforms {
                self.report(
                    path,
                    Some(value),
                    sh::DATATYPE_CONSTRAINT_COMPONENT,
                    format!("expected a literal of datatype {datatype}"),
                );
            }
        }

        if let Some(class) = &constraint.class {
            let conforms = as_node(value.as_ref())
                .is_some_and(|node| is_instance_of(self.graph, node, class.as_ref()));
            if !conforms {
                self.report(
                    path,
                    Some(value),
                    sh::CLASS_CONSTRAINT_COMPONENT,
                    format!("expected an instance of {class}"),
                );
            }
        }

        self.length(constraint, path, value);

        if let Some(pattern) = &property.pattern {
            if !lexical_form(value).is_some_and(|text| pattern.is_match(text)) {
                self.report(
                    path,
                    Some(value),
                    sh::PATTERN_CONSTRAINT_COMPONENT,
                    format!("does not match the pattern '{}'", pattern.as_str()),
                );
            }
        }

        if let Some(allowed) = &constraint.in_values {
            if !allowed.contains(value) {
                self.report(
                    path,
                    Some(value),
                    sh::IN_CONSTRAINT_COMPONENT,
                    "is not one of the allowed values".to_owned(),
                );
            }
        }

        self.range(constraint, path, value);
    }

    fn length(&mut self, constraint: &PropertyConstraint, path: NamedNodeRef<'_>, value: &Term) {
        let length = lexical_form(value).map(|text| text.chars().count() as u64);
        if let Some(min) = constraint.min_length {
            if length.map_or(true, |length| length < min) {
                self.report(
                    path,
                    Some(value),
                    sh::MIN_LENGTH_CONSTRAINT_COMPONENT,
                    format!("expected at least {min} character(s)"),
                );
            }
        }
        if let Some(max) = constraint.max_length {
            if length.map_or(true, |length| length > max) {
                self.report(
                    path,
                    Some(value),
                    sh::MAX_LENGTH_CONSTRAINT_COMPONENT,
                    format!("expected at most {max} character(s)"),
                );
            }
        }
    }

    /// Both the inclusive and the exclusive bounds are checked,
    /// if given, so the tighter one of each side decides.
    fn range(&mut self, constraint: &PropertyConstraint, path: NamedNodeRef<'_>, value: &Term) {
        let bounds = [
            (
                &constraint.min_inclusive,
                sh::MIN_INCLUSIVE_CONSTRAINT_COMPONENT,
                ">=",
                &[Ordering::Greater, Ordering::Equal][..],
            ),
            (
                &constraint.min_exclusive,
                sh::MIN_EXCLUSIVE_CONSTRAINT_COMPONENT,
                ">",
                &[Ordering::Greater][..],
            ),
            (
                &constraint.max_inclusive,
                sh::MAX_INCLUSIVE_CONSTRAINT_COMPONENT,
                "<=",
                &[Ordering::Less, Ordering::Equal][..],
            ),
            (
                &constraint.max_exclusive,
                sh::MAX_EXCLUSIVE_CONSTRAINT_COMPONENT,
                "<",
                &[Ordering::Less][..],
            ),
        ];
        for (bound, component, relation, accepted) in bounds {
            let Some(bound) = bound else {
                continue;
            };
            let ordering = match value {
                Term::Literal(literal) => compare_literals(literal, bound),
                _ => None,
            };
            if !ordering.is_some_and(|ordering| accepted.contains(&ordering)) {
                self.report(
                    path,
                    Some(value),
                    component,
                    format!("expected a value {relation} {}", bound.value()),
                );
            }
        }
    }

    fn closed(&mut self, shape: &Shape) {
        for (predicate, object) in self.graph.statements(self.focus) {
            let declared = shape
                .properties
                .iter()
                .any(|property| property.path == predicate)
                || shape.ignored_properties.contains(&predicate);
            if !declared {
                self.report(
                    predicate.as_ref(),
                    Some(&object),
                    sh::CLOSED_CONSTRAINT_COMPONENT,
                    "is not allowed by the closed shape".to_owned(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use oxrdf::{Graph, NamedOrBlankNode, Triple};
    use shapemill_shapes::ShapeId;

    use super::*;

    fn ex(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.org/{local}"))
    }

    fn int(value: &str) -> Literal {
        Literal::new_typed_literal(value, xsd::INTEGER)
    }

    fn age_shape(constraint: impl FnOnce(&mut PropertyConstraint)) -> ShapeValidator {
        let mut age = PropertyConstraint::new(ShapeId::Named(ex("ageShape")), ex("age"));
        constraint(&mut age);
        let shape = Shape {
            id: ShapeId::Named(ex("PersonShape")),
            target_class: ex("Person"),
            name: None,
            description: None,
            closed: false,
            ignored_properties: Vec::new(),
            properties: vec![age],
        };
        ShapeValidator::new(vec![shape]).unwrap()
    }

    fn person_with_ages(ages: &[&str]) -> (Graph, NamedOrBlankNode) {
        let alice = ex("alice");
        let mut graph = Graph::new();
        graph.insert(&Triple::new(alice.clone(), rdf::TYPE, ex("Person")));
        for age in ages {
            graph.insert(&Triple::new(alice.clone(), ex("age"), int(age)));
        }
        (graph, alice.into())
    }

    fn components(outcome: &ValidationOutcome) -> Vec<&str> {
        outcome
            .violations()
            .iter()
            .map(|violation| violation.component.as_str())
            .collect()
    }

    #[test]
    fn checks_counts() {
        let validator = age_shape(|age| {
            age.min_count = Some(1);
            age.max_count = Some(1);
        });
        let (graph, alice) = person_with_ages(&[]);
        let outcome = validator.validate(&graph, alice.as_ref()).unwrap();
        assert_eq!(components(&outcome), [sh::MIN_COUNT_CONSTRAINT_COMPONENT.as_str()]);
        let violation = &outcome.violations()[0];
        assert_eq!(violation.path, Some(ex("age")));
        assert!(violation.message.contains("http://example.org/age"));

        let (graph, alice) = person_with_ages(&["1", "2"]);
        let outcome = validator.validate(&graph, alice.as_ref()).unwrap();
        assert_eq!(components(&outcome), [sh::MAX_COUNT_CONSTRAINT_COMPONENT.as_str()]);

        let (graph, alice) = person_with_ages(&["1"]);
        assert!(validator.validate(&graph, alice.as_ref()).unwrap().conforms());
    }

    #[test]
    fn tighter_bound_wins() {
        let validator = age_shape(|age| {
            age.min_inclusive = Some(int("0"));
            age.min_exclusive = Some(int("17"));
            age.max_inclusive = Some(int("150"));
            age.max_exclusive = Some(int("120"));
        });
        for (age, conforms) in [
            ("18", true),
            ("17", false),
            ("0", false),
            ("119", true),
            ("120", false),
            ("130", false),
        ] {
            let (graph, alice) = person_with_ages(&[age]);
            let outcome = validator.validate(&graph, alice.as_ref()).unwrap();
            assert_eq!(outcome.conforms(), conforms, "age {age}: {outcome:?}");
        }
    }

    #[test]
    fn checks_datatype_and_lexical_form() {
        let validator = age_shape(|age| age.datatype = Some(xsd::INTEGER.into_owned()));
        let (graph, alice) = person_with_ages(&["42"]);
        assert!(validator.validate(&graph, alice.as_ref()).unwrap().conforms());
        let (graph, alice) = person_with_ages(&["forty-two"]);
        let outcome = validator.validate(&graph, alice.as_ref()).unwrap();
        assert_eq!(components(&outcome), [sh::DATATYPE_CONSTRAINT_COMPONENT.as_str()]);
    }

    #[test]
    fn only_shapes_of_the_focus_classes_apply() {
        let validator = age_shape(|age| age.min_count = Some(1));
        let rex = ex("rex");
        let mut graph = Graph::new();
        graph.insert(&Triple::new(rex.clone(), rdf::TYPE, ex("Dog")));
        let rex = NamedOrBlankNode::from(rex);
        assert!(validator.validate(&graph, rex.as_ref()).unwrap().conforms());

        graph.insert(&Triple::new(ex("Dog"), rdfs::SUB_CLASS_OF, ex("Person")));
        assert!(!validator.validate(&graph, rex.as_ref()).unwrap().conforms());

        let untyped = NamedOrBlankNode::from(ex("nobody"));
        assert!(validator.validate(&graph, untyped.as_ref()).unwrap().conforms());
        let validator = validator.for_class(ex("Person"));
        assert!(!validator.validate(&graph, untyped.as_ref()).unwrap().conforms());
    }

    #[test]
    fn validates_untyped_nodes_as_the_requested_class() {
        let validator = age_shape(|age| age.min_count = Some(1));
        let graph = Graph::new();
        let untyped = NamedOrBlankNode::from(ex("nobody"));
        assert!(validator.validate(&graph, untyped.as_ref()).unwrap().conforms());

        let outcome = validator
            .validate_as(&graph, untyped.as_ref(), ex("Person").as_ref())
            .unwrap();
        assert_eq!(components(&outcome), [sh::MIN_COUNT_CONSTRAINT_COMPONENT.as_str()]);
        assert!(validator
            .validate_as(&graph, untyped.as_ref(), ex("Dog").as_ref())
            .unwrap()
            .conforms());
    }

    #[test]
    fn checks_pattern_and_length() {
        let validator = age_shape(|age| {
            age.pattern = Some("^[0-9]+$".to_owned());
            age.max_length = Some(2);
        });
        let (graph, alice) = person_with_ages(&["123"]);
        let outcome = validator.validate(&graph, alice.as_ref()).unwrap();
        assert_eq!(components(&outcome), [sh::MAX_LENGTH_CONSTRAINT_COMPONENT.as_str()]);
        let (graph, alice) = person_with_ages(&["-1"]);
        let outcome = validator.validate(&graph, alice.as_ref()).unwrap();
        assert_eq!(components(&outcome), [sh::PATTERN_CONSTRAINT_COMPONENT.as_str()]);
    }
}
