// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::any::Any;
use std::sync::Arc;

use oxrdf::vocab::rdf;
use oxrdf::{Graph, Literal, NamedNode, NamedOrBlankNode, NamedOrBlankNodeRef, Triple};
use shapemill_runtime::domain::{DomainObject, DomainType, PropertyError, PropertyResult};
use shapemill_runtime::{
    GraphSource, MaterializeError, Materialized, Memo, NodeHandle, Registry, ShapeValidator,
    ValidationContext, ValidationError, ValidationOutcome, Validator,
};
use shapemill_shapes::{PropertyConstraint, Shape, ShapeId};

const PET: &str = "http://example.org/Pet";
const NAME: &str = "http://example.org/name";
const FRIEND: &str = "http://example.org/friend";
const PET_KNOWN_PREDICATES: &[&str] = &[NAME, FRIEND];

trait Pet: DomainObject {
    fn name(&self) -> PropertyResult<&str>;
    fn friend(&self) -> PropertyResult<Option<&Arc<dyn Pet>>>;
}

impl DomainType for dyn Pet {
    const NAME: &'static str = "Pet";
    const CLASS_IRI: &'static str = PET;

    fn install(registry: &Registry) {
        PetNode::register(registry);
    }
}

struct PetNode {
    handle: NodeHandle,
    name: Memo<PropertyResult<String>>,
    friend: Memo<PropertyResult<Option<Arc<dyn Pet>>>>,
}

impl PetNode {
    fn new(handle: NodeHandle) -> Self {
        Self {
            handle: handle
                .with_known_predicates(PET_KNOWN_PREDICATES)
                .with_class(PET),
            name: Memo::new(),
            friend: Memo::new(),
        }
    }

    fn register(registry: &Registry) {
        registry.register::<dyn Pet, _>(|handle| -> Arc<dyn Pet> { Arc::new(Self::new(handle)) });
    }
}

impl DomainObject for PetNode {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Materialized for PetNode {
    fn handle(&self) -> &NodeHandle {
        &self.handle
    }
}

impl Pet for PetNode {
    fn name(&self) -> PropertyResult<&str> {
        self.name
            .get_or_init(|| self.handle.required_literal(NAME))
            .as_deref()
            .map_err(PropertyError::clone)
    }

    fn friend(&self) -> PropertyResult<Option<&Arc<dyn Pet>>> {
        self.friend
            .get_or_init(|| self.handle.optional_object::<dyn Pet>(FRIEND))
            .as_ref()
            .map(Option::as_ref)
            .map_err(PropertyError::clone)
    }
}

/// Always reports the same name.
struct FixedPet;

impl DomainObject for FixedPet {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Pet for FixedPet {
    fn name(&self) -> PropertyResult<&str> {
        Ok("fixed")
    }

    fn friend(&self) -> PropertyResult<Option<&Arc<dyn Pet>>> {
        Ok(None)
    }
}

/// A domain type that has no default factory.
trait Stray: DomainObject {}

impl DomainType for dyn Stray {
    const NAME: &'static str = "Stray";
    const CLASS_IRI: &'static str = "http://example.org/Stray";

    fn install(_registry: &Registry) {}
}

fn ex(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.org/{local}"))
}

fn pets() -> Arc<dyn GraphSource> {
    let mut graph = Graph::new();
    graph.insert(&Triple::new(ex("rex"), rdf::TYPE, ex("Pet")));
    graph.insert(&Triple::new(ex("rex"), ex("name"), Literal::from("Rex")));
    graph.insert(&Triple::new(ex("rex"), ex("friend"), ex("tom")));
    graph.insert(&Triple::new(ex("rex"), ex("color"), Literal::from("brown")));
    graph.insert(&Triple::new(ex("tom"), rdf::TYPE, ex("Pet")));
    graph.insert(&Triple::new(ex("felix"), ex("color"), Literal::from("black")));
    Arc::new(graph)
}

fn node(local: &str) -> NamedOrBlankNode {
    ex(local).into()
}

fn name_required() -> ShapeValidator {
    let mut name = PropertyConstraint::new(ShapeId::Named(ex("nameShape")), ex("name"));
    name.min_count = Some(1);
    ShapeValidator::new(vec![Shape {
        id: ShapeId::Named(ex("PetShape")),
        target_class: ex("Pet"),
        name: None,
        description: None,
        closed: false,
        ignored_properties: Vec::new(),
        properties: vec![name],
    }])
    .unwrap()
}

#[test]
fn installs_the_default_factory_on_first_use() {
    let registry = Arc::new(Registry::new());
    assert!(!registry.is_registered::<dyn Pet>());
    let rex = registry.materialize::<dyn Pet>(node("rex"), pets()).unwrap();
    assert!(registry.is_registered::<dyn Pet>());
    assert_eq!(rex.name().unwrap(), "Rex");
}

#[test]
fn missing_factory_is_an_error() {
    let registry = Arc::new(Registry::new());
    let err = registry
        .materialize::<dyn Stray>(node("rex"), pets())
        .err()
        .unwrap();
    assert!(
        matches!(err, MaterializeError::NoFactoryRegistered { domain_type: "Stray" }),
        "{err}"
    );
}

#[test]
fn last_registration_wins() {
    let registry = Arc::new(Registry::new());
    PetNode::register(&registry);
    registry.register::<dyn Pet, _>(|_handle| -> Arc<dyn Pet> { Arc::new(FixedPet) });
    let rex = registry.materialize::<dyn Pet>(node("rex"), pets()).unwrap();
    assert_eq!(rex.name().unwrap(), "fixed");

    PetNode::register(&registry);
    let rex = registry.materialize::<dyn Pet>(node("rex"), pets()).unwrap();
    assert_eq!(rex.name().unwrap(), "Rex");
}

#[test]
fn linked_objects_come_from_the_same_registry() {
    let registry = Arc::new(Registry::new());
    let rex = registry.materialize::<dyn Pet>(node("rex"), pets()).unwrap();
    let tom = rex.friend().unwrap().unwrap();
    assert!(matches!(tom.name(), Err(PropertyError::Missing { .. })));
    assert!(tom.friend().unwrap().is_none());
}

#[test]
fn unknown_predicates_end_up_in_the_side_channel() {
    let registry = Arc::new(Registry::new());
    let rex = registry.materialize::<dyn Pet>(node("rex"), pets()).unwrap();
    let wrapper = rex.as_any().downcast_ref::<PetNode>().unwrap();
    let channel = wrapper.side_channel();
    let predicates: Vec<_> = channel
        .predicates()
        .iter()
        .map(|predicate| predicate.as_str().to_owned())
        .collect();
    assert!(predicates.contains(&"http://example.org/color".to_owned()));
    assert!(predicates.contains(&rdf::TYPE.as_str().to_owned()));
    assert!(!channel.contains(ex("name").as_ref()));
}

#[test]
fn validated_materialization_is_fail_closed() {
    let registry = Arc::new(Registry::new());
    let ctx = ValidationContext::With(name_required().into_arc());

    let rex = registry.materialize_validated::<dyn Pet>(node("rex"), pets(), &ctx);
    assert!(rex.is_ok());

    let err = registry
        .materialize_validated::<dyn Pet>(node("tom"), pets(), &ctx)
        .err()
        .unwrap();
    let violations = match err {
        MaterializeError::Validation(violations) => violations,
        other => panic!("expected violations, got: {other}"),
    };
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path, Some(ex("name")));
}

#[test]
fn untyped_nodes_are_validated_as_the_requested_type() {
    let registry = Arc::new(Registry::new());
    let ctx = ValidationContext::With(name_required().into_arc());

    let err = registry
        .materialize_validated::<dyn Pet>(node("felix"), pets(), &ctx)
        .err()
        .unwrap();
    assert!(matches!(err, MaterializeError::Validation(ref violations) if violations.len() == 1));

    let felix = registry.materialize::<dyn Pet>(node("felix"), pets()).unwrap();
    let wrapper = felix.as_any().downcast_ref::<PetNode>().unwrap();
    assert_eq!(wrapper.handle().class(), Some(ex("Pet").as_ref()));
    assert!(!wrapper.validate(&ctx).unwrap().conforms());
}

/// Only knows about `rdf:type` based targeting.
struct TypedOnly(ShapeValidator);

impl Validator for TypedOnly {
    fn validate(
        &self,
        graph: &dyn GraphSource,
        focus: NamedOrBlankNodeRef<'_>,
    ) -> Result<ValidationOutcome, ValidationError> {
        self.0.validate(graph, focus)
    }
}

#[test]
fn class_aware_validation_falls_back_to_plain_validation() {
    let registry = Arc::new(Registry::new());
    let ctx = ValidationContext::With(Arc::new(TypedOnly(name_required())));
    assert!(registry
        .materialize_validated::<dyn Pet>(node("felix"), pets(), &ctx)
        .is_ok());
    assert!(registry
        .materialize_validated::<dyn Pet>(node("tom"), pets(), &ctx)
        .is_err());
}

#[test]
fn registered_validator_slot() {
    let registry = Arc::new(Registry::new());
    let err = registry
        .materialize_validated::<dyn Pet>(node("rex"), pets(), &ValidationContext::UseRegistered)
        .err()
        .unwrap();
    assert!(
        matches!(
            err,
            MaterializeError::ValidationFailed(ValidationError::NoValidatorRegistered)
        ),
        "{err}"
    );

    registry.set_validator(name_required().into_arc());
    assert!(registry.validator().is_some());
    let rex = registry
        .materialize_validated::<dyn Pet>(node("rex"), pets(), &ValidationContext::UseRegistered)
        .unwrap();
    let wrapper = rex.as_any().downcast_ref::<PetNode>().unwrap();
    assert!(wrapper
        .validate(&ValidationContext::UseRegistered)
        .unwrap()
        .conforms());

    registry.clear_validator();
    assert!(registry.validator().is_none());
}
