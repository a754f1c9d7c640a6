// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Renders an [`OntologyModel`] as Rust source code.
//!
//! The generated code only refers to the runtime crate
//! (imported as `rt`) and to `core`/`std`, with absolute paths,
//! so it can be included into any module,
//! and classes may be named like prelude items (`Option`, `String`, ...).

use crate::infer::{Cardinality, ValueKind};
use crate::model::{ClassModel, OntologyModel, PropertyModel};
use crate::naming;

const ARC: &str = "::std::sync::Arc";
const OPTION: &str = "::core::option::Option";
const VEC: &str = "::std::vec::Vec";
const RESULT: &str = "rt::domain::PropertyResult";
const CLONE_ERROR: &str =
    ".map_err(<rt::domain::PropertyError as ::core::clone::Clone>::clone)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Inserted on top of the generated module, as is
    pub header: Option<String>,
    /// Name of the runtime crate, as seen from the generated code
    pub runtime_crate: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            header: None,
            runtime_crate: "shapemill_runtime".to_owned(),
        }
    }
}

/// The code of one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedClass {
    /// The domain trait and its `DomainType` implementation
    pub domain_type: String,
    /// The known predicates, and the graph backed wrapper struct
    /// with all its implementations
    pub wrapper_type: String,
}

/// How one property is read and handed out.
struct Accessor {
    /// Returned, wrapped in a `PropertyResult`
    returns: String,
    /// Memoized, wrapped in a `PropertyResult`
    memo: String,
    /// `NodeHandle` method (incl. turbofish)
    reader: String,
    /// Turns a `&PropertyResult<memo>` into a `PropertyResult<returns>`
    adapter: Vec<&'static str>,
}

fn dyn_arc(class: &str) -> String {
    format!("{ARC}<dyn {class}>")
}

fn accessor(prop: &PropertyModel) -> Accessor {
    match (&prop.value_kind, prop.cardinality) {
        (ValueKind::Literal(primitive), Cardinality::Required) => Accessor {
            returns: primitive.borrowed_type().to_owned(),
            memo: primitive.rust_type().to_owned(),
            reader: "required_literal".to_owned(),
            adapter: if primitive.is_copy() {
                vec![".as_ref()", ".copied()", CLONE_ERROR]
            } else {
                vec![".as_deref()", CLONE_ERROR]
            },
        },
        (ValueKind::Literal(primitive), Cardinality::Optional) => Accessor {
            returns: format!("{OPTION}<{}>", primitive.borrowed_type()),
            memo: format!("{OPTION}<{}>", primitive.rust_type()),
            reader: "optional_literal".to_owned(),
            adapter: if primitive.is_copy() {
                vec![".as_ref()", ".copied()", CLONE_ERROR]
            } else {
                vec![".as_ref()", ".map(::core::option::Option::as_deref)", CLONE_ERROR]
            },
        },
        (ValueKind::Literal(primitive), Cardinality::List) => Accessor {
            returns: format!("&[{}]", primitive.rust_type()),
            memo: format!("{VEC}<{}>", primitive.rust_type()),
            reader: "literal_list".to_owned(),
            adapter: vec![".as_deref()", CLONE_ERROR],
        },
        (ValueKind::Object(class), Cardinality::Required) => Accessor {
            returns: format!("&{}", dyn_arc(&class.name)),
            memo: dyn_arc(&class.name),
            reader: format!("required_object::<dyn {}>", class.name),
            adapter: vec![".as_ref()", CLONE_ERROR],
        },
        (ValueKind::Object(class), Cardinality::Optional) => Accessor {
            returns: format!("{OPTION}<&{}>", dyn_arc(&class.name)),
            memo: format!("{OPTION}<{}>", dyn_arc(&class.name)),
            reader: format!("optional_object::<dyn {}>", class.name),
            adapter: vec![".as_ref()", ".map(::core::option::Option::as_ref)", CLONE_ERROR],
        },
        (ValueKind::Object(class) | ValueKind::ObjectList(class), _) => Accessor {
            returns: format!("&[{}]", dyn_arc(&class.name)),
            memo: format!("{VEC}<{}>", dyn_arc(&class.name)),
            reader: format!("object_list::<dyn {}>", class.name),
            adapter: vec![".as_deref()", CLONE_ERROR],
        },
    }
}

fn push_doc(out: &mut String, indent: &str, text: &str) {
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str(&format!("{indent}///\n"));
        } else {
            out.push_str(&format!("{indent}/// {line}\n"));
        }
    }
}

/// `schema:name` if the context knows a prefix for it, `<http://...>` otherwise.
fn display_iri(model: &OntologyModel, iri: &str) -> String {
    model
        .context
        .compact(iri)
        .map_or_else(|| format!("<{iri}>"), |compact| format!("`{compact}`"))
}

const fn cardinality_text(cardinality: Cardinality) -> &'static str {
    match cardinality {
        Cardinality::Required => "exactly one value",
        Cardinality::Optional => "at most one value",
        Cardinality::List => "any number of values",
    }
}

fn render_domain_type(model: &OntologyModel, class: &ClassModel) -> String {
    let name = &class.name;
    let mut out = String::new();
    if let Some(doc) = &class.doc {
        push_doc(&mut out, "", doc);
        out.push_str("///\n");
    }
    out.push_str(&format!(
        "/// Instances of {}.\n",
        display_iri(model, class.class_iri.as_str())
    ));
    out.push_str(&format!("pub trait {name}: rt::domain::DomainObject {{\n"));
    for (idx, prop) in class.properties.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        if let Some(doc) = &prop.doc {
            push_doc(&mut out, "    ", doc);
            out.push_str("    ///\n");
        }
        out.push_str(&format!(
            "    /// {}, {}\n",
            display_iri(model, prop.predicate.as_str()),
            cardinality_text(prop.cardinality)
        ));
        out.push_str(&format!(
            "    fn {}(&self) -> {RESULT}<{}>;\n",
            prop.name,
            accessor(prop).returns
        ));
    }
    out.push_str("}\n\n");

    out.push_str(&format!(
        r#"impl rt::domain::DomainType for dyn {name} {{
    const NAME: &'static str = {name:?};
    const CLASS_IRI: &'static str = {iri:?};

    fn install(registry: &rt::Registry) {{
        {wrapper}::register(registry);
    }}
}}
"#,
        iri = class.class_iri.as_str(),
        wrapper = naming::wrapper_name(name),
    ));
    out
}

fn render_wrapper_type(class: &ClassModel) -> String {
    let name = &class.name;
    let wrapper = naming::wrapper_name(name);
    let known = naming::known_predicates_const(name);
    let mut out = String::new();

    out.push_str(&format!(
        "/// The predicates [`{name}`] has accessors for.\npub const {known}: &[&str] = &["
    ));
    if class.properties.is_empty() {
        out.push_str("];\n\n");
    } else {
        out.push('\n');
        for predicate in class.known_predicates() {
            out.push_str(&format!("    {:?},\n", predicate.as_str()));
        }
        out.push_str("];\n\n");
    }

    out.push_str(&format!(
        "/// Reads [`{name}`] values from a node of a graph.\npub struct {wrapper} {{\n    handle: rt::NodeHandle,\n"
    ));
    for prop in &class.properties {
        out.push_str(&format!(
            "    {}: rt::Memo<{RESULT}<{}>>,\n",
            prop.name,
            accessor(prop).memo
        ));
    }
    out.push_str("}\n\n");

    out.push_str(&format!(
        r#"impl {wrapper} {{
    pub fn new(handle: rt::NodeHandle) -> Self {{
        Self {{
            handle: handle
                .with_known_predicates({known})
                .with_class(<dyn {name} as rt::domain::DomainType>::CLASS_IRI),
"#
    ));
    for prop in &class.properties {
        out.push_str(&format!("            {}: rt::Memo::new(),\n", prop.name));
    }
    out.push_str(&format!(
        r#"        }}
    }}

    /// Makes this the factory of [`{name}`] in `registry`.
    pub fn register(registry: &rt::Registry) {{
        registry.register::<dyn {name}, _>(|handle| -> {arc} {{
            {ARC}::new(Self::new(handle))
        }});
    }}
}}

impl rt::domain::DomainObject for {wrapper} {{
    fn as_any(&self) -> &dyn ::core::any::Any {{
        self
    }}
}}

impl rt::Materialized for {wrapper} {{
    fn handle(&self) -> &rt::NodeHandle {{
        &self.handle
    }}
}}

impl {name} for {wrapper} {{
"#,
        arc = dyn_arc(name),
    ));
    for (idx, prop) in class.properties.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let accessor = accessor(prop);
        out.push_str(&format!(
            "    fn {field}(&self) -> {RESULT}<{returns}> {{\n        self.{field}\n            .get_or_init(|| self.handle.{reader}({predicate:?}))\n",
            field = prop.name,
            returns = accessor.returns,
            reader = accessor.reader,
            predicate = prop.predicate.as_str(),
        ));
        for call in &accessor.adapter {
            out.push_str(&format!("            {call}\n"));
        }
        out.push_str("    }\n");
    }
    out.push_str("}\n");
    out
}

/// Generates the domain trait and the wrapper of `class`.
#[must_use]
pub fn generate_class(model: &OntologyModel, class: &ClassModel) -> GeneratedClass {
    GeneratedClass {
        domain_type: render_domain_type(model, class),
        wrapper_type: render_wrapper_type(class),
    }
}

/// Generates the complete module for all classes of `model`,
/// including a `register_all` function.
#[must_use]
pub fn render_module(model: &OntologyModel, options: &RenderOptions) -> String {
    let mut out = String::new();
    if let Some(header) = &options.header {
        out.push_str(header);
        if !header.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str("// Generated by shapemill from SHACL shapes; do not edit.\n\n");
    out.push_str(&format!("use {} as rt;\n", options.runtime_crate));

    for class in &model.classes {
        let generated = generate_class(model, class);
        out.push('\n');
        out.push_str(&generated.domain_type);
        out.push('\n');
        out.push_str(&generated.wrapper_type);
    }

    out.push_str(
        "\n/// Registers the wrappers of all domain types of this module,\n/// replacing previously registered factories.\n",
    );
    if model.classes.is_empty() {
        out.push_str("pub fn register_all(_registry: &rt::Registry) {}\n");
    } else {
        out.push_str("pub fn register_all(registry: &rt::Registry) {\n");
        for class in &model.classes {
            out.push_str(&format!(
                "    {}::register(registry);\n",
                naming::wrapper_name(&class.name)
            ));
        }
        out.push_str("}\n");
    }
    out
}
