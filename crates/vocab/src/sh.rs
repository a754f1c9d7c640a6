// SPDX-FileCopyrightText: 2023 - 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! [SHACL](http://www.w3.org/ns/shacl) vocabulary.

use crate::named_node;

pub const NS_BASE: &str = "http://www.w3.org/ns/shacl#";
pub const NS_PREFERRED_PREFIX: &str = "sh";

named_node!(NODE_SHAPE, NS_BASE, "NodeShape", "A node shape is a shape that specifies constraint that need to be met with respect to focus nodes.");
named_node!(PROPERTY_SHAPE, NS_BASE, "PropertyShape","A property shape is a shape that specifies constraints on the values of a focus node for a given property or path.");
named_node!(TARGET_CLASS, NS_BASE, "targetClass", "Links a shape to a class, indicating that all instances of the class must conform to the shape.");
named_node!(
    CLOSED,
    NS_BASE,
    "closed",
    "If set to true then the shape is closed."
);
named_node!(
    IGNORED_PROPERTIES,
    NS_BASE,
    "ignoredProperties",
    "An optional RDF list of properties that are also permitted in addition to those explicitly enumerated via sh:property/sh:path."
);
named_node!(
    PROPERTY,
    NS_BASE,
    "property",
    "Links a shape to its property shapes."
);
named_node!(
    PATH,
    NS_BASE,
    "path",
    "Specifies the property path of a property shape."
);
named_node!(
    MAX_COUNT,
    NS_BASE,
    "maxCount",
    "Specifies the maximum number of values in the set of value nodes."
);
named_node!(
    MIN_COUNT,
    NS_BASE,
    "minCount",
    "Specifies the minimum number of values in the set of value nodes."
);
named_node!(
    CLASS,
    NS_BASE,
    "class",
    "The type that all value nodes must have."
);
named_node!(
    DATA_TYPE,
    NS_BASE,
    "datatype",
    "Specifies an RDF datatype that all value nodes must have."
);
named_node!(PATTERN, NS_BASE, "pattern", "Specifies a regular expression pattern that the string representations of the value nodes must match.");
named_node!(
    FLAGS,
    NS_BASE,
    "flags",
    "An optional flag to be used with regular expression pattern matching."
);
named_node!(
    MIN_LENGTH,
    NS_BASE,
    "minLength",
    "Specifies the minimum string length of each value node that satisfies the condition. This can be applied to any literals and IRIs, but not to blank nodes."
);
named_node!(
    MAX_LENGTH,
    NS_BASE,
    "maxLength",
    "Specifies the maximum string length of each value node that satisfies the condition. This can be applied to any literals and IRIs, but not to blank nodes."
);
named_node!(
    IN,
    NS_BASE,
    "in",
    "Specifies a list of allowed values so that each value node must be among the members of the given list."
);
named_node!(
    MIN_INCLUSIVE,
    NS_BASE,
    "minInclusive",
    "Specifies the minimum inclusive value of each value node."
);
named_node!(
    MAX_INCLUSIVE,
    NS_BASE,
    "maxInclusive",
    "Specifies the maximum inclusive value of each value node."
);
named_node!(
    MIN_EXCLUSIVE,
    NS_BASE,
    "minExclusive",
    "Specifies the minimum exclusive value of each value node."
);
named_node!(
    MAX_EXCLUSIVE,
    NS_BASE,
    "maxExclusive",
    "Specifies the maximum exclusive value of each value node."
);
named_node!(
    NAME,
    NS_BASE,
    "name",
    "Human-readable labels for the property in the context of the surrounding shape."
);
named_node!(
    DESCRIPTION,
    NS_BASE,
    "description",
    "Human-readable descriptions for the property in the context of the surrounding shape."
);
named_node!(
    ORDER,
    NS_BASE,
    "order",
    "Specifies the relative order of this compared to its siblings. For example use 0 for the first, 1 for the second."
);
named_node!(
    GROUP,
    NS_BASE,
    "group",
    "Can be used to link to a property group to indicate that a property shape belongs to a group of related property shapes."
);

// Constraint components, as reported in validation results.

named_node!(MIN_COUNT_CONSTRAINT_COMPONENT, NS_BASE, "MinCountConstraintComponent", "A constraint component that can be used to restrict the minimum number of value nodes.");
named_node!(MAX_COUNT_CONSTRAINT_COMPONENT, NS_BASE, "MaxCountConstraintComponent", "A constraint component that can be used to restrict the maximum number of value nodes.");
named_node!(DATATYPE_CONSTRAINT_COMPONENT, NS_BASE, "DatatypeConstraintComponent", "A constraint component that can be used to restrict the datatype of all value nodes.");
named_node!(CLASS_CONSTRAINT_COMPONENT, NS_BASE, "ClassConstraintComponent", "A constraint component that can be used to verify that each value node is an instance of a given type.");
named_node!(MIN_LENGTH_CONSTRAINT_COMPONENT, NS_BASE, "MinLengthConstraintComponent", "A constraint component that can be used to restrict the minimum string length of value nodes.");
named_node!(MAX_LENGTH_CONSTRAINT_COMPONENT, NS_BASE, "MaxLengthConstraintComponent", "A constraint component that can be used to restrict the maximum string length of value nodes.");
named_node!(PATTERN_CONSTRAINT_COMPONENT, NS_BASE, "PatternConstraintComponent", "A constraint component that can be used to verify that every value node matches a given regular expression.");
named_node!(IN_CONSTRAINT_COMPONENT, NS_BASE, "InConstraintComponent", "A constraint component that can be used to exclusively enumerate the permitted value nodes.");
named_node!(MIN_INCLUSIVE_CONSTRAINT_COMPONENT, NS_BASE, "MinInclusiveConstraintComponent", "A constraint component that can be used to restrict the range of value nodes with a minimum inclusive value.");
named_node!(MAX_INCLUSIVE_CONSTRAINT_COMPONENT, NS_BASE, "MaxInclusiveConstraintComponent", "A constraint component that can be used to restrict the range of value nodes with a maximum inclusive value.");
named_node!(MIN_EXCLUSIVE_CONSTRAINT_COMPONENT, NS_BASE, "MinExclusiveConstraintComponent", "A constraint component that can be used to restrict the range of value nodes with a minimum exclusive value.");
named_node!(MAX_EXCLUSIVE_CONSTRAINT_COMPONENT, NS_BASE, "MaxExclusiveConstraintComponent", "A constraint component that can be used to restrict the range of value nodes with a maximum exclusive value.");
named_node!(CLOSED_CONSTRAINT_COMPONENT, NS_BASE, "ClosedConstraintComponent", "A constraint component that can be used to indicate that focus nodes must only have values for those properties that have been explicitly enumerated via sh:property/sh:path.");
