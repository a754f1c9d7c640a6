// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use oxrdf::{NamedNode, NamedNodeRef, Term};

/// The statements about a node that its domain type has no accessor for.
///
/// Keeps data that is not covered by the shape accessible,
/// instead of silently dropping it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideChannel {
    statements: Vec<(NamedNode, Term)>,
}

impl SideChannel {
    #[must_use]
    pub const fn new(statements: Vec<(NamedNode, Term)>) -> Self {
        Self { statements }
    }

    /// The distinct predicates, in order of first appearance.
    #[must_use]
    pub fn predicates(&self) -> Vec<NamedNodeRef<'_>> {
        let mut predicates: Vec<NamedNodeRef<'_>> = Vec::new();
        for (predicate, _) in &self.statements {
            if !predicates.contains(&predicate.as_ref()) {
                predicates.push(predicate.as_ref());
            }
        }
        predicates
    }

    /// The objects of all statements with `predicate`.
    #[must_use]
    pub fn objects(&self, predicate: NamedNodeRef<'_>) -> Vec<&Term> {
        self.statements
            .iter()
            .filter(|(pred, _)| pred.as_ref() == predicate)
            .map(|(_, object)| object)
            .collect()
    }

    #[must_use]
    pub fn contains(&self, predicate: NamedNodeRef<'_>) -> bool {
        self.statements
            .iter()
            .any(|(pred, _)| pred.as_ref() == predicate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(NamedNode, Term)> {
        self.statements.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use oxrdf::Literal;

    use super::*;

    #[test]
    fn groups_by_predicate() {
        let nick = NamedNode::new_unchecked("http://example.org/nick");
        let mood = NamedNode::new_unchecked("http://example.org/mood");
        let channel = SideChannel::new(vec![
            (nick.clone(), Literal::from("Al").into()),
            (mood.clone(), Literal::from("happy").into()),
            (nick.clone(), Literal::from("Ali").into()),
        ]);
        assert_eq!(channel.len(), 3);
        assert_eq!(channel.predicates(), [nick.as_ref(), mood.as_ref()]);
        assert_eq!(channel.objects(nick.as_ref()).len(), 2);
        assert!(channel.contains(mood.as_ref()));
        assert!(!channel.contains(NamedNodeRef::new_unchecked("http://example.org/x")));
        assert!(SideChannel::default().is_empty());
    }

    #[test]
    fn objects_of_a_temporary_predicate() {
        let channel = SideChannel::new(vec![(
            NamedNode::new_unchecked("http://example.org/mood"),
            Literal::from("happy").into(),
        )]);
        let moods = channel.objects(NamedNode::new_unchecked("http://example.org/mood").as_ref());
        let happy: Term = Literal::from("happy").into();
        assert_eq!(moods, [&happy]);
    }
}
