// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use oxrdf::{Graph, NamedNode, NamedNodeRef, NamedOrBlankNodeRef, SubjectRef, Term, TermRef};

/// Read access to the statements of an RDF graph.
///
/// This is all the runtime needs from a triple store.
pub trait GraphSource: Send + Sync {
    /// All objects of the statements with the given subject and predicate.
    fn objects(&self, subject: NamedOrBlankNodeRef<'_>, predicate: NamedNodeRef<'_>) -> Vec<Term>;

    /// All `(predicate, object)` pairs of the statements with the given subject.
    fn statements(&self, subject: NamedOrBlankNodeRef<'_>) -> Vec<(NamedNode, Term)>;
}

pub(crate) fn as_subject(node: NamedOrBlankNodeRef<'_>) -> SubjectRef<'_> {
    match node {
        NamedOrBlankNodeRef::NamedNode(node) => node.into(),
        NamedOrBlankNodeRef::BlankNode(node) => node.into(),
    }
}

/// Converts an object into a node that may be the subject of further statements.
/// Literals (and quoted triples) can not.
#[must_use]
pub fn as_node(term: TermRef<'_>) -> Option<NamedOrBlankNodeRef<'_>> {
    match term {
        TermRef::NamedNode(node) => Some(node.into()),
        TermRef::BlankNode(node) => Some(node.into()),
        TermRef::Literal(_) | TermRef::Triple(_) => None,
    }
}

impl GraphSource for Graph {
    fn objects(&self, subject: NamedOrBlankNodeRef<'_>, predicate: NamedNodeRef<'_>) -> Vec<Term> {
        self.objects_for_subject_predicate(as_subject(subject), predicate)
            .map(TermRef::into_owned)
            .collect()
    }

    fn statements(&self, subject: NamedOrBlankNodeRef<'_>) -> Vec<(NamedNode, Term)> {
        self.triples_for_subject(as_subject(subject))
            .map(|triple| (triple.predicate.into_owned(), triple.object.into_owned()))
            .collect()
    }
}

impl<G: GraphSource + ?Sized> GraphSource for Arc<G> {
    fn objects(&self, subject: NamedOrBlankNodeRef<'_>, predicate: NamedNodeRef<'_>) -> Vec<Term> {
        (**self).objects(subject, predicate)
    }

    fn statements(&self, subject: NamedOrBlankNodeRef<'_>) -> Vec<(NamedNode, Term)> {
        (**self).statements(subject)
    }
}
