// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Domain types named `Option`, `String`, `Clone` and `Vec`
//! compile, and work like any other.

use std::sync::Arc;

use shapemill_runtime::oxrdf::vocab::xsd;
use shapemill_runtime::oxrdf::{Graph, Literal, NamedNode, NamedOrBlankNode, Term, Triple};
use shapemill_runtime::{GraphSource, Registry};

#[allow(clippy::pedantic, clippy::nursery)]
mod prelude {
    include!(concat!(env!("OUT_DIR"), "/prelude.rs"));
}

fn ex(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.org/{local}"))
}

fn node(local: &str) -> NamedOrBlankNode {
    ex(local).into()
}

fn graph() -> Arc<dyn GraphSource> {
    let statements: [(&str, &str, Term); 8] = [
        ("opt", "value", Literal::from("some").into()),
        ("opt", "count", Literal::new_typed_literal("3", xsd::INTEGER).into()),
        ("opt", "tag", Literal::from("a").into()),
        ("opt", "inner", ex("str").into()),
        ("str", "text", Literal::from("hello").into()),
        ("str", "flag", Literal::new_typed_literal("true", xsd::BOOLEAN).into()),
        ("str", "option", ex("opt").into()),
        ("copy", "original", ex("vec").into()),
    ];
    let mut graph = Graph::new();
    for (subject, predicate, object) in statements {
        graph.insert(&Triple::new(ex(subject), ex(predicate), object));
    }
    Arc::new(graph)
}

#[test]
fn prelude_named_types() {
    let registry = Arc::new(Registry::new());
    prelude::register_all(&registry);

    let opt = registry
        .materialize::<dyn prelude::Option>(node("opt"), graph())
        .unwrap();
    assert_eq!(opt.value(), Ok(Some("some")));
    assert_eq!(opt.count(), Ok(3));
    assert_eq!(opt.tag().unwrap(), ["a".to_owned()]);

    let inner = opt.inner().unwrap().unwrap();
    assert_eq!(inner.text(), Ok("hello"));
    assert_eq!(inner.flag(), Ok(Some(true)));
    assert_eq!(inner.option().unwrap()[0].count(), Ok(3));

    let copy = registry
        .materialize::<dyn prelude::Clone>(node("copy"), graph())
        .unwrap();
    assert!(copy.original().is_ok());
}
