// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{collections::HashSet, io::Read, path::Path};

use oxrdf::{
    vocab::{rdf, rdfs},
    Graph, Literal, NamedNode, NamedNodeRef, SubjectRef, Term, TermRef, TripleRef,
};
use oxrdfio::{RdfFormat, RdfParser};
use shapemill_vocab::sh;

use crate::{PropertyConstraint, Shape, ShapeError, ShapeId};

/// RDF lists longer than this are considered cyclic.
const MAX_LIST_LEN: usize = 10_000;

/// Guesses the RDF serialization format from a file extension,
/// e.g. `ttl` -> Turtle.
#[must_use]
pub fn format_from_path(path: &Path) -> Option<RdfFormat> {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .and_then(RdfFormat::from_extension)
}

/// Reads an RDF document into an in-memory graph.
/// Named graphs are merged into one.
///
/// # Errors
///
/// - the input can not be read
/// - the input is not valid in the given `format`
pub fn read_graph<R>(input: R, format: RdfFormat) -> Result<Graph, ShapeError>
where
    R: Read,
{
    let mut graph = Graph::new();
    for quad_res in RdfParser::from_format(format).for_reader(input) {
        let quad = quad_res?;
        graph.insert(TripleRef::new(&quad.subject, &quad.predicate, &quad.object));
    }
    tracing::debug!("Read {} triples", graph.len());
    Ok(graph)
}

/// Parses an RDF document and extracts all the shapes in it.
///
/// # Errors
///
/// - the input can not be read
/// - the input is not valid in the given `format`
/// - one of the shapes is malformed (see [`parse_shapes`])
pub fn read_shapes<R>(input: R, format: RdfFormat) -> Result<Vec<Shape>, ShapeError>
where
    R: Read,
{
    parse_shapes(&read_graph(input, format)?)
}

/// Extracts all node shapes that target a class from a shapes graph.
///
/// A node shape is any subject typed `sh:NodeShape`,
/// or any subject with a `sh:targetClass`.
/// Node shapes without a target class are skipped (with a warning).
/// A shape with multiple target classes results in one [`Shape`] per class.
///
/// The result is sorted by target class and shape ID,
/// the properties of each shape by `sh:order` and path.
///
/// # Errors
///
/// If a node shape or one of its property shapes is malformed,
/// for example because of a missing `sh:path`,
/// a literal where an IRI is required,
/// or a count that is not a non-negative integer.
pub fn parse_shapes(graph: &Graph) -> Result<Vec<Shape>, ShapeError> {
    let mut shape_nodes: Vec<SubjectRef<'_>> = graph
        .subjects_for_predicate_object(rdf::TYPE, sh::NODE_SHAPE)
        .collect();
    for triple in graph.triples_for_predicate(sh::TARGET_CLASS) {
        if !shape_nodes.contains(&triple.subject) {
            shape_nodes.push(triple.subject);
        }
    }

    let mut shapes = Vec::new();
    for shape_node in shape_nodes {
        let id = ShapeId::from_subject(shape_node)?;
        shapes.extend(parse_node_shape(graph, &id)?);
    }
    shapes.sort_by(|a, b| {
        a.target_class
            .as_str()
            .cmp(b.target_class.as_str())
            .then_with(|| a.id.to_string().cmp(&b.id.to_string()))
    });
    Ok(shapes)
}

fn parse_node_shape(graph: &Graph, id: &ShapeId) -> Result<Vec<Shape>, ShapeError> {
    let subject = id.as_subject();
    let mut target_classes = Vec::new();
    for term in graph.objects_for_subject_predicate(subject, sh::TARGET_CLASS) {
        target_classes.push(expect_iri(term, id, sh::TARGET_CLASS)?);
    }
    if target_classes.is_empty() {
        tracing::warn!("Skipping node shape {id}, as it has no sh:targetClass");
        return Ok(Vec::new());
    }

    let name = single_string(graph, id, sh::NAME)?.or(single_string(graph, id, rdfs::LABEL)?);
    let description = single_string(graph, id, sh::DESCRIPTION)?
        .or(single_string(graph, id, rdfs::COMMENT)?);
    let closed = single_bool(graph, id, sh::CLOSED)?.unwrap_or(false);
    let ignored_properties = match single(graph, id, sh::IGNORED_PROPERTIES)? {
        Some(head) => rdf_list(graph, head, id, sh::IGNORED_PROPERTIES)?
            .into_iter()
            .map(|term| expect_iri(term.as_ref(), id, sh::IGNORED_PROPERTIES))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    let mut properties = Vec::new();
    for term in graph.objects_for_subject_predicate(subject, sh::PROPERTY) {
        let prop_id = ShapeId::from_term(term, id)?;
        properties.push(parse_property_constraint(graph, prop_id)?);
    }
    properties.sort_by(|a, b| {
        a.order
            .unwrap_or(f64::MAX)
            .total_cmp(&b.order.unwrap_or(f64::MAX))
            .then_with(|| a.path.as_str().cmp(b.path.as_str()))
    });

    Ok(target_classes
        .into_iter()
        .map(|target_class| Shape {
            id: id.clone(),
            target_class,
            name: name.clone(),
            description: description.clone(),
            closed,
            ignored_properties: ignored_properties.clone(),
            properties: properties.clone(),
        })
        .collect())
}

fn parse_property_constraint(
    graph: &Graph,
    id: ShapeId,
) -> Result<PropertyConstraint, ShapeError> {
    let path = match single(graph, &id, sh::PATH)? {
        Some(TermRef::NamedNode(path)) => path.into_owned(),
        Some(other) => {
            return Err(ShapeError::malformed(
                &id,
                format!("only predicate paths are supported, got sh:path {other}"),
            ))
        }
        None => return Err(ShapeError::malformed(&id, "property shape without sh:path")),
    };

    let mut constraint = PropertyConstraint::new(id, path);
    let id = &constraint.id;
    let name = single_string(graph, id, sh::NAME)?;
    let description = single_string(graph, id, sh::DESCRIPTION)?;
    let order = single_literal(graph, id, sh::ORDER)?
        .map(|lit| {
            lit.value().parse::<f64>().map_err(|_| {
                ShapeError::malformed(id, format!("sh:order must be a number, got {lit}"))
            })
        })
        .transpose()?;
    let datatype = single_iri(graph, id, sh::DATA_TYPE)?;
    let class = single_iri(graph, id, sh::CLASS)?;
    let min_count = single_count(graph, id, sh::MIN_COUNT)?;
    let max_count = single_count(graph, id, sh::MAX_COUNT)?;
    let min_length = single_count(graph, id, sh::MIN_LENGTH)?;
    let max_length = single_count(graph, id, sh::MAX_LENGTH)?;
    let pattern = single_string(graph, id, sh::PATTERN)?;
    let flags = single_string(graph, id, sh::FLAGS)?;
    let in_values = single(graph, id, sh::IN)?
        .map(|head| rdf_list(graph, head, id, sh::IN))
        .transpose()?;
    let min_inclusive = single_literal(graph, id, sh::MIN_INCLUSIVE)?;
    let max_inclusive = single_literal(graph, id, sh::MAX_INCLUSIVE)?;
    let min_exclusive = single_literal(graph, id, sh::MIN_EXCLUSIVE)?;
    let max_exclusive = single_literal(graph, id, sh::MAX_EXCLUSIVE)?;

    constraint.name = name;
    constraint.description = description;
    constraint.order = order;
    constraint.datatype = datatype;
    constraint.class = class;
    constraint.min_count = min_count;
    constraint.max_count = max_count;
    constraint.min_length = min_length;
    constraint.max_length = max_length;
    constraint.pattern = pattern;
    constraint.flags = flags;
    constraint.in_values = in_values;
    constraint.min_inclusive = min_inclusive;
    constraint.max_inclusive = max_inclusive;
    constraint.min_exclusive = min_exclusive;
    constraint.max_exclusive = max_exclusive;

    if let Some(Err(err)) = constraint.pattern_regex() {
        return Err(ShapeError::malformed(
            &constraint.id,
            format!("invalid sh:pattern: {err}"),
        ));
    }

    Ok(constraint)
}

fn single<'a>(
    graph: &'a Graph,
    id: &ShapeId,
    predicate: NamedNodeRef<'_>,
) -> Result<Option<TermRef<'a>>, ShapeError> {
    let mut objects = graph.objects_for_subject_predicate(id.as_subject(), predicate);
    let first = objects.next();
    if objects.next().is_some() {
        return Err(ShapeError::malformed(
            id,
            format!("{predicate} may only be given once"),
        ));
    }
    Ok(first)
}

fn expect_iri(
    term: TermRef<'_>,
    id: &ShapeId,
    predicate: NamedNodeRef<'_>,
) -> Result<NamedNode, ShapeError> {
    if let TermRef::NamedNode(node) = term {
        Ok(node.into_owned())
    } else {
        Err(ShapeError::malformed(
            id,
            format!("{predicate} requires an IRI, got {term}"),
        ))
    }
}

fn single_iri(
    graph: &Graph,
    id: &ShapeId,
    predicate: NamedNodeRef<'_>,
) -> Result<Option<NamedNode>, ShapeError> {
    single(graph, id, predicate)?
        .map(|term| expect_iri(term, id, predicate))
        .transpose()
}

fn single_literal(
    graph: &Graph,
    id: &ShapeId,
    predicate: NamedNodeRef<'_>,
) -> Result<Option<Literal>, ShapeError> {
    match single(graph, id, predicate)? {
        Some(TermRef::Literal(lit)) => Ok(Some(lit.into_owned())),
        Some(other) => Err(ShapeError::malformed(
            id,
            format!("{predicate} requires a literal, got {other}"),
        )),
        None => Ok(None),
    }
}

fn single_string(
    graph: &Graph,
    id: &ShapeId,
    predicate: NamedNodeRef<'_>,
) -> Result<Option<String>, ShapeError> {
    Ok(single_literal(graph, id, predicate)?.map(|lit| lit.value().to_owned()))
}

fn single_count(
    graph: &Graph,
    id: &ShapeId,
    predicate: NamedNodeRef<'_>,
) -> Result<Option<u64>, ShapeError> {
    single_literal(graph, id, predicate)?
        .map(|lit| {
            lit.value().trim().parse::<u64>().map_err(|_| {
                ShapeError::malformed(
                    id,
                    format!("{predicate} requires a non-negative integer, got {lit}"),
                )
            })
        })
        .transpose()
}

fn single_bool(
    graph: &Graph,
    id: &ShapeId,
    predicate: NamedNodeRef<'_>,
) -> Result<Option<bool>, ShapeError> {
    single_literal(graph, id, predicate)?
        .map(|lit| match lit.value() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ShapeError::malformed(
                id,
                format!("{predicate} requires a boolean, got {lit}"),
            )),
        })
        .transpose()
}

/// Collects the members of the RDF list starting at `head`.
fn rdf_list(
    graph: &Graph,
    head: TermRef<'_>,
    id: &ShapeId,
    predicate: NamedNodeRef<'_>,
) -> Result<Vec<Term>, ShapeError> {
    let malformed = |message: &str| {
        ShapeError::malformed(id, format!("{predicate} is not a well-formed RDF list: {message}"))
    };

    let mut members = Vec::new();
    let mut visited = HashSet::new();
    let mut current = head;
    loop {
        let node: SubjectRef<'_> = match current {
            TermRef::NamedNode(node) if node == rdf::NIL => return Ok(members),
            TermRef::NamedNode(node) => node.into(),
            TermRef::BlankNode(node) => node.into(),
            TermRef::Literal(_) | TermRef::Triple(_) => {
                return Err(malformed("list node is not an IRI or blank node"))
            }
        };
        if !visited.insert(current) || members.len() >= MAX_LIST_LEN {
            return Err(malformed("the list is cyclic"));
        }
        let mut firsts = graph.objects_for_subject_predicate(node, rdf::FIRST);
        let first = firsts.next().ok_or_else(|| malformed("missing rdf:first"))?;
        let mut rests = graph.objects_for_subject_predicate(node, rdf::REST);
        let rest = rests.next().ok_or_else(|| malformed("missing rdf:rest"))?;
        if firsts.next().is_some() || rests.next().is_some() {
            return Err(malformed("list node with multiple rdf:first or rdf:rest"));
        }
        members.push(first.into_owned());
        current = rest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_turtle(ttl: &str) -> Result<Vec<Shape>, ShapeError> {
        read_shapes(ttl.as_bytes(), RdfFormat::Turtle)
    }

    const PREFIXES: &str = r"
@prefix sh: <http://www.w3.org/ns/shacl#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
@prefix ex: <http://example.org/> .
";

    #[test]
    fn reads_in_list() {
        let shapes = parse_turtle(&format!(
            r#"{PREFIXES}
ex:S a sh:NodeShape ; sh:targetClass ex:T ;
  sh:property [ sh:path ex:color ; sh:in ( "red" "green" ) ] .
"#
        ))
        .unwrap();
        let values = shapes[0].properties[0].in_values.as_ref().unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], Term::Literal(Literal::new_simple_literal("red")));
    }

    #[test]
    fn cyclic_in_list_is_malformed() {
        let err = parse_turtle(&format!(
            r#"{PREFIXES}
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
ex:S a sh:NodeShape ; sh:targetClass ex:T ;
  sh:property [ sh:path ex:color ; sh:in ex:l1 ] .
ex:l1 rdf:first "a" ; rdf:rest ex:l1 .
"#
        ))
        .unwrap_err();
        assert!(matches!(err, ShapeError::Malformed { .. }), "{err}");
    }

    #[test]
    fn duplicated_single_valued_parameter_is_malformed() {
        let err = parse_turtle(&format!(
            r"{PREFIXES}
ex:S a sh:NodeShape ; sh:targetClass ex:T ;
  sh:property [ sh:path ex:p ; sh:maxCount 1, 2 ] .
"
        ))
        .unwrap_err();
        assert!(err.to_string().contains("maxCount"), "{err}");
    }

    #[test]
    fn syntax_errors_are_reported() {
        let err = parse_turtle("this is not turtle").unwrap_err();
        assert!(matches!(err, ShapeError::Syntax(_)), "{err}");
    }

    #[test]
    fn guesses_format_from_extension() {
        assert_eq!(
            format_from_path(Path::new("shapes/people.ttl")),
            Some(RdfFormat::Turtle)
        );
        assert_eq!(format_from_path(Path::new("shapes/people")), None);
    }
}
