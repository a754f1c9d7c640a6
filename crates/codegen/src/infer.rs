// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Derives the Rust type of a property accessor
//! from the constraints of a SHACL property shape.

use oxrdf::vocab::rdf;
use oxrdf::{NamedNode, NamedNodeRef};
use shapemill_shapes::PropertyConstraint;
use shapemill_vocab::xsd;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferError {
    #[error("sh:minCount {min} is greater than sh:maxCount {max}")]
    InvalidCardinality { min: u64, max: u64 },

    #[error("sh:class {0} is not the target class of any shape")]
    UnknownClassReference(NamedNode),

    #[error("Both sh:datatype {datatype} and sh:class {class} are set")]
    ConflictingValueType { datatype: NamedNode, class: NamedNode },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly one value
    Required,
    /// Zero or one value
    Optional,
    /// Any number of values
    List,
}

/// The Rust types literal values are converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Integer,
    Double,
    Boolean,
}

impl Primitive {
    /// The owned Rust type.
    #[must_use]
    pub const fn rust_type(self) -> &'static str {
        match self {
            Self::String => "::std::string::String",
            Self::Integer => "i64",
            Self::Double => "f64",
            Self::Boolean => "bool",
        }
    }

    /// The type handed out by a single-value accessor.
    #[must_use]
    pub const fn borrowed_type(self) -> &'static str {
        match self {
            Self::String => "&str",
            Self::Integer | Self::Double | Self::Boolean => self.rust_type(),
        }
    }

    #[must_use]
    pub const fn is_copy(self) -> bool {
        !matches!(self, Self::String)
    }
}

/// A class that has a domain type in the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRef {
    pub iri: NamedNode,
    /// Name of the domain trait
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    Literal(Primitive),
    Object(ClassRef),
    ObjectList(ClassRef),
}

const STRING_TYPES: &[NamedNodeRef<'static>] = &[
    xsd::STRING,
    xsd::NORMALIZED_STRING,
    xsd::TOKEN,
    xsd::LANGUAGE,
    xsd::ANY_URI,
    xsd::DATE,
    xsd::DATE_TIME,
    rdf::LANG_STRING,
];

const INTEGER_TYPES: &[NamedNodeRef<'static>] = &[
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
];

const DOUBLE_TYPES: &[NamedNodeRef<'static>] = &[xsd::DECIMAL, xsd::DOUBLE, xsd::FLOAT];

/// Maps an XSD datatype to the Rust type its literals are read as.
/// Unknown datatypes are read as strings.
#[must_use]
pub fn primitive(datatype: NamedNodeRef<'_>) -> Primitive {
    if STRING_TYPES.contains(&datatype) {
        Primitive::String
    } else if INTEGER_TYPES.contains(&datatype) {
        Primitive::Integer
    } else if DOUBLE_TYPES.contains(&datatype) {
        Primitive::Double
    } else if datatype == xsd::BOOLEAN {
        Primitive::Boolean
    } else {
        tracing::warn!("Unsupported datatype {datatype}; values will be read as strings");
        Primitive::String
    }
}

/// Maps `sh:minCount` and `sh:maxCount` to a cardinality.
///
/// Returns `None` for `sh:maxCount 0`,
/// which forbids the property altogether.
///
/// # Errors
///
/// If `min` is greater than `max`.
pub fn cardinality(min: Option<u64>, max: Option<u64>) -> Result<Option<Cardinality>, InferError> {
    let min_value = min.unwrap_or(0);
    if let Some(max_value) = max {
        if min_value > max_value {
            return Err(InferError::InvalidCardinality {
                min: min_value,
                max: max_value,
            });
        }
    }
    Ok(match max {
        Some(0) => None,
        Some(1) if min_value >= 1 => Some(Cardinality::Required),
        Some(1) => Some(Cardinality::Optional),
        Some(_) | None => Some(Cardinality::List),
    })
}

/// Infers cardinality and value kind of a property.
///
/// `resolve_class` returns the domain trait name of a class IRI,
/// if the model has one.
///
/// Returns `None` if the property is excluded by `sh:maxCount 0`.
///
/// # Errors
///
/// - the counts contradict each other
/// - both `sh:datatype` and `sh:class` are set
/// - `sh:class` refers to a class without a shape
pub fn infer<F>(
    constraint: &PropertyConstraint,
    resolve_class: F,
) -> Result<Option<(Cardinality, ValueKind)>, InferError>
where
    F: Fn(NamedNodeRef<'_>) -> Option<String>,
{
    let Some(cardinality) = cardinality(constraint.min_count, constraint.max_count)? else {
        return Ok(None);
    };
    let value_kind = match (&constraint.datatype, &constraint.class) {
        (Some(datatype), Some(class)) => {
            return Err(InferError::ConflictingValueType {
                datatype: datatype.clone(),
                class: class.clone(),
            });
        }
        (None, Some(class)) => {
            let class_ref = ClassRef {
                iri: class.clone(),
                name: resolve_class(class.as_ref())
                    .ok_or_else(|| InferError::UnknownClassReference(class.clone()))?,
            };
            if cardinality == Cardinality::List {
                ValueKind::ObjectList(class_ref)
            } else {
                ValueKind::Object(class_ref)
            }
        }
        (Some(datatype), None) => ValueKind::Literal(primitive(datatype.as_ref())),
        (None, None) => ValueKind::Literal(Primitive::String),
    };
    Ok(Some((cardinality, value_kind)))
}

#[cfg(test)]
mod tests {
    use shapemill_shapes::ShapeId;

    use super::*;

    fn ex(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.org/{local}"))
    }

    fn constraint(min: Option<u64>, max: Option<u64>) -> PropertyConstraint {
        let mut constraint = PropertyConstraint::new(ShapeId::Named(ex("prop")), ex("prop"));
        constraint.min_count = min;
        constraint.max_count = max;
        constraint
    }

    fn person_only(class: NamedNodeRef<'_>) -> Option<String> {
        (class.as_str() == "http://example.org/Person").then(|| "Person".to_owned())
    }

    #[test]
    fn cardinalities() {
        assert_eq!(cardinality(Some(1), Some(1)), Ok(Some(Cardinality::Required)));
        assert_eq!(cardinality(Some(2), Some(1)).ok(), None);
        assert_eq!(cardinality(Some(1), None), Ok(Some(Cardinality::List)));
        assert_eq!(cardinality(Some(1), Some(5)), Ok(Some(Cardinality::List)));
        assert_eq!(cardinality(None, Some(1)), Ok(Some(Cardinality::Optional)));
        assert_eq!(cardinality(Some(0), Some(1)), Ok(Some(Cardinality::Optional)));
        assert_eq!(cardinality(None, None), Ok(Some(Cardinality::List)));
        assert_eq!(cardinality(None, Some(3)), Ok(Some(Cardinality::List)));
        assert_eq!(cardinality(None, Some(0)), Ok(None));
        assert_eq!(
            cardinality(Some(2), Some(1)),
            Err(InferError::InvalidCardinality { min: 2, max: 1 })
        );
    }

    #[test]
    fn datatypes() {
        assert_eq!(primitive(xsd::STRING), Primitive::String);
        assert_eq!(primitive(xsd::NON_NEGATIVE_INTEGER), Primitive::Integer);
        assert_eq!(primitive(xsd::DECIMAL), Primitive::Double);
        assert_eq!(primitive(xsd::BOOLEAN), Primitive::Boolean);
        assert_eq!(primitive(rdf::LANG_STRING), Primitive::String);
        assert_eq!(primitive(ex("Celsius").as_ref()), Primitive::String);
    }

    #[test]
    fn literal_and_object_kinds() {
        let mut age = constraint(None, Some(1));
        age.datatype = Some(xsd::INTEGER.into_owned());
        assert_eq!(
            infer(&age, person_only),
            Ok(Some((Cardinality::Optional, ValueKind::Literal(Primitive::Integer))))
        );

        let mut knows = constraint(None, None);
        knows.class = Some(ex("Person"));
        let Ok(Some((Cardinality::List, ValueKind::ObjectList(class)))) = infer(&knows, person_only)
        else {
            panic!("expected a list of objects");
        };
        assert_eq!(class.name, "Person");

        let mut boss = constraint(Some(1), Some(1));
        boss.class = Some(ex("Person"));
        assert!(matches!(
            infer(&boss, person_only),
            Ok(Some((Cardinality::Required, ValueKind::Object(_))))
        ));

        assert_eq!(
            infer(&constraint(None, None), person_only),
            Ok(Some((Cardinality::List, ValueKind::Literal(Primitive::String))))
        );
    }

    #[test]
    fn excluded_and_invalid() {
        assert_eq!(infer(&constraint(None, Some(0)), person_only), Ok(None));

        let mut pet = constraint(None, Some(1));
        pet.class = Some(ex("Pet"));
        assert_eq!(
            infer(&pet, person_only),
            Err(InferError::UnknownClassReference(ex("Pet")))
        );

        let mut both = constraint(None, Some(1));
        both.class = Some(ex("Person"));
        both.datatype = Some(xsd::STRING.into_owned());
        assert!(matches!(
            infer(&both, person_only),
            Err(InferError::ConflictingValueType { .. })
        ));
    }
}
