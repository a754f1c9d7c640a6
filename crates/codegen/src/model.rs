// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::BTreeMap;

use oxrdf::{NamedNode, NamedNodeRef};
use shapemill_context::{Context, TypeValue};
use shapemill_iri::local_name;
use shapemill_shapes::{PropertyConstraint, Shape};
use thiserror::Error;

use crate::infer::{self, Cardinality, InferError, ValueKind};
use crate::naming;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("In class {class}, both {first} and {second} map to the accessor `{name}`")]
    DuplicatePropertyName {
        class: String,
        name: String,
        first: NamedNode,
        second: NamedNode,
    },

    #[error("Both {first} and {second} map to the Rust type `{name}`")]
    DuplicateClassName {
        name: String,
        first: NamedNode,
        second: NamedNode,
    },

    #[error("Unable to derive a Rust identifier for {0}")]
    EmptyName(NamedNode),

    #[error("In class {class}, property {property}: {source}")]
    Infer {
        class: String,
        property: NamedNode,
        #[source]
        source: InferError,
    },
}

/// One accessor of a domain type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyModel {
    /// The `snake_case` accessor name
    pub name: String,
    pub predicate: NamedNode,
    pub cardinality: Cardinality,
    pub value_kind: ValueKind,
    pub doc: Option<String>,
}

/// One domain type, merged from all shapes targeting its class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassModel {
    /// The `PascalCase` trait name
    pub name: String,
    pub class_iri: NamedNode,
    pub properties: Vec<PropertyModel>,
    pub doc: Option<String>,
}

impl ClassModel {
    /// The predicates this class has accessors for;
    /// statements with any other predicate go to the side-channel.
    pub fn known_predicates(&self) -> impl Iterator<Item = NamedNodeRef<'_>> {
        self.properties.iter().map(|prop| prop.predicate.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OntologyModel {
    pub shapes: Vec<Shape>,
    pub context: Context,
    /// Sorted by class IRI
    pub classes: Vec<ClassModel>,
}

impl OntologyModel {
    /// Combines shapes and context into the classes to generate code for.
    ///
    /// Shapes sharing a target class are merged into one class.
    ///
    /// # Errors
    ///
    /// - two classes, or two properties of one class, end up with the same Rust name
    /// - no Rust name can be derived for a class or property
    /// - the type of a property can not be inferred (see [`infer::infer`])
    pub fn build(shapes: Vec<Shape>, context: Context) -> Result<Self, ModelError> {
        let class_names = class_names(&shapes, &context)?;
        let resolve_class = |class: NamedNodeRef<'_>| -> Option<String> {
            class_names.get(class.as_str()).map(|(name, _)| name.clone())
        };

        let mut classes = Vec::with_capacity(class_names.len());
        for (name, class_iri) in class_names.values() {
            let targeting: Vec<&Shape> = shapes
                .iter()
                .filter(|shape| &shape.target_class == class_iri)
                .collect();
            let doc = targeting
                .iter()
                .find_map(|shape| shape.description.clone().or_else(|| shape.name.clone()));

            let mut properties: Vec<PropertyModel> = Vec::new();
            for constraint in targeting.iter().flat_map(|shape| &shape.properties) {
                let Some(prop) = build_property(name, constraint, &context, &resolve_class)? else {
                    tracing::warn!(
                        "{} is excluded from {name} by sh:maxCount 0; it gets no accessor",
                        constraint.path
                    );
                    continue;
                };
                if let Some(existing) = properties.iter().find(|other| other.name == prop.name) {
                    return Err(ModelError::DuplicatePropertyName {
                        class: name.clone(),
                        name: prop.name,
                        first: existing.predicate.clone(),
                        second: prop.predicate,
                    });
                }
                properties.push(prop);
            }
            tracing::debug!("Class {name}: {} properties", properties.len());
            classes.push(ClassModel {
                name: name.clone(),
                class_iri: class_iri.clone(),
                properties,
                doc,
            });
        }

        Ok(Self {
            shapes,
            context,
            classes,
        })
    }

    #[must_use]
    pub fn class(&self, class_iri: NamedNodeRef<'_>) -> Option<&ClassModel> {
        self.classes
            .iter()
            .find(|class| class.class_iri.as_ref() == class_iri)
    }
}

/// class IRI -> (trait name, class)
fn class_names(
    shapes: &[Shape],
    context: &Context,
) -> Result<BTreeMap<String, (String, NamedNode)>, ModelError> {
    let mut by_iri = BTreeMap::new();
    let mut by_name: BTreeMap<String, NamedNode> = BTreeMap::new();
    for shape in shapes {
        let iri = shape.target_class.as_str();
        if by_iri.contains_key(iri) {
            continue;
        }
        let raw = context
            .type_term_for(iri)
            .or_else(|| local_name(iri))
            .unwrap_or_default();
        let name = naming::type_name(raw)
            .ok_or_else(|| ModelError::EmptyName(shape.target_class.clone()))?;
        if let Some(first) = by_name.get(&name) {
            return Err(ModelError::DuplicateClassName {
                name,
                first: first.clone(),
                second: shape.target_class.clone(),
            });
        }
        by_name.insert(name.clone(), shape.target_class.clone());
        by_iri.insert(iri.to_owned(), (name, shape.target_class.clone()));
    }
    // A trait named like the wrapper of another one
    for (name, iri) in &by_name {
        if let Some(other) = by_name.get(&naming::wrapper_name(name)) {
            return Err(ModelError::DuplicateClassName {
                name: naming::wrapper_name(name),
                first: iri.clone(),
                second: other.clone(),
            });
        }
    }
    Ok(by_iri)
}

fn build_property<F>(
    class: &str,
    constraint: &PropertyConstraint,
    context: &Context,
    resolve_class: F,
) -> Result<Option<PropertyModel>, ModelError>
where
    F: Fn(NamedNodeRef<'_>) -> Option<String>,
{
    let path = constraint.path.as_str();
    let term = context.property_term_for(path);
    let raw = term
        .or(constraint.name.as_deref())
        .or_else(|| local_name(path))
        .unwrap_or_default();
    let name = naming::accessor_name(raw)
        .ok_or_else(|| ModelError::EmptyName(constraint.path.clone()))?;

    // The context may declare the datatype the shape leaves open
    let hinted;
    let constraint = match term.and_then(|term| context.property(term)) {
        Some(mapping) if constraint.datatype.is_none() && constraint.class.is_none() => {
            if let Some(TypeValue::Iri(datatype)) = &mapping.type_ {
                let mut with_datatype = constraint.clone();
                with_datatype.datatype = Some(NamedNode::new_unchecked(datatype.clone()));
                hinted = with_datatype;
                &hinted
            } else {
                constraint
            }
        }
        _ => constraint,
    };

    let inferred = infer::infer(constraint, resolve_class).map_err(|source| ModelError::Infer {
        class: class.to_owned(),
        property: constraint.path.clone(),
        source,
    })?;
    Ok(inferred.map(|(cardinality, value_kind)| PropertyModel {
        name,
        predicate: constraint.path.clone(),
        cardinality,
        value_kind,
        doc: constraint.description.clone(),
    }))
}
