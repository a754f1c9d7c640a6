// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Turns RDF terms and labels into Rust identifiers.

use convert_case::{Case, Casing};

/// Strict and reserved keywords of Rust 2021 (and `gen` of 2024).
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try",
    "type", "typeof", "union", "unsafe", "unsized", "use", "virtual", "where", "while",
    "yield",
];

/// Methods every generated wrapper has besides the property accessors.
const RESERVED_METHODS: &[&str] = &[
    "as_any",
    "handle",
    "new",
    "register",
    "side_channel",
    "validate",
];

/// Suffix of the generated wrapper struct of a domain trait.
pub const WRAPPER_SUFFIX: &str = "Node";

/// Replaces everything that can not be part of an identifier with a space,
/// which `convert_case` then treats as a word boundary.
fn words(raw: &str) -> String {
    raw.chars()
        .map(|chr| if chr.is_alphanumeric() { chr } else { ' ' })
        .collect()
}

fn finish(mut ident: String, reserved: &[&str]) -> Option<String> {
    if ident.is_empty() {
        return None;
    }
    if ident.starts_with(|chr: char| chr.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if KEYWORDS.contains(&ident.as_str()) || reserved.contains(&ident.as_str()) {
        ident.push('_');
    }
    Some(ident)
}

/// The `PascalCase` name of a domain trait.
///
/// Returns `None` if `raw` contains nothing usable.
///
/// ```
/// use shapemill_codegen::naming::type_name;
///
/// assert_eq!(type_name("Person").as_deref(), Some("Person"));
/// assert_eq!(type_name("postal-address").as_deref(), Some("PostalAddress"));
/// assert_eq!(type_name("self").as_deref(), Some("Self_"));
/// assert_eq!(type_name("#").as_deref(), None);
/// ```
#[must_use]
pub fn type_name(raw: &str) -> Option<String> {
    finish(words(raw).to_case(Case::Pascal), &[])
}

/// The `snake_case` name of a property accessor.
///
/// Rust keywords and the wrapper method names get a trailing `_`.
///
/// ```
/// use shapemill_codegen::naming::accessor_name;
///
/// assert_eq!(accessor_name("fullName").as_deref(), Some("full_name"));
/// assert_eq!(accessor_name("type").as_deref(), Some("type_"));
/// assert_eq!(accessor_name("validate").as_deref(), Some("validate_"));
/// assert_eq!(accessor_name("3 models").as_deref(), Some("_3_models"));
/// ```
#[must_use]
pub fn accessor_name(raw: &str) -> Option<String> {
    finish(words(raw).to_case(Case::Snake), RESERVED_METHODS)
}

/// The `snake_case` name of a generated module (and its file).
#[must_use]
pub fn module_name(raw: &str) -> Option<String> {
    finish(words(raw).to_case(Case::Snake), &[])
}

/// The name of the constant listing the known predicates of a domain type.
#[must_use]
pub fn known_predicates_const(type_name: &str) -> String {
    format!("{}_KNOWN_PREDICATES", type_name.to_case(Case::UpperSnake))
}

#[must_use]
pub fn wrapper_name(type_name: &str) -> String {
    format!("{type_name}{WRAPPER_SUFFIX}")
}
