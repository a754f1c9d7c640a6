// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value as JsonValue};
use shapemill_iri::{is_absolute, is_namespace, split_compact, Prefix};

use crate::{Container, Context, ContextError, PropertyMapping, TypeValue};

/// Parses a JSON-LD document given as text,
/// and returns its active context.
///
/// # Errors
///
/// See [`parse_context`];
/// additionally, if `json` is not valid JSON.
pub fn parse_context_str(json: &str) -> Result<Context, ContextError> {
    let document: JsonValue = serde_json::from_str(json)?;
    parse_context(&document)
}

/// Extracts the active context from the `@context` entry of a JSON-LD document.
///
/// The `@context` may be an object, an array of objects (processed in order,
/// later entries shadowing earlier ones) or `null` (resets everything before it).
///
/// # Errors
///
/// - [`ContextError::MissingContext`] if there is no `@context`
/// - [`ContextError::ExternalContext`] for remote (string) contexts
/// - [`ContextError::Invalid`] for values of an unexpected JSON type
/// - [`ContextError::UnresolvableTerm`] if a mapped value can not be expanded
pub fn parse_context(document: &JsonValue) -> Result<Context, ContextError> {
    let context = document
        .as_object()
        .and_then(|doc| doc.get("@context"))
        .ok_or(ContextError::MissingContext)?;
    let mut raw = RawContext::default();
    raw.merge(context)?;
    raw.resolve()
}

fn invalid(message: impl Into<String>) -> ContextError {
    ContextError::Invalid(message.into())
}

/// The merged, but not yet expanded context entries.
#[derive(Default)]
struct RawContext<'a> {
    base: Option<&'a str>,
    vocab: Option<&'a str>,
    language: Option<&'a str>,
    terms: BTreeMap<&'a str, &'a JsonValue>,
}

fn optional_str<'a>(keyword: &str, value: &'a JsonValue) -> Result<Option<&'a str>, ContextError> {
    match value {
        JsonValue::String(text) => Ok(Some(text.as_str())),
        JsonValue::Null => Ok(None),
        other => Err(invalid(format!(
            "{keyword} must be a string or null, got: {other}"
        ))),
    }
}

impl<'a> RawContext<'a> {
    fn merge(&mut self, context: &'a JsonValue) -> Result<(), ContextError> {
        match context {
            JsonValue::Null => {
                *self = Self::default();
                Ok(())
            }
            JsonValue::String(iri) => Err(ContextError::ExternalContext(iri.clone())),
            JsonValue::Array(entries) => {
                for entry in entries {
                    self.merge(entry)?;
                }
                Ok(())
            }
            JsonValue::Object(map) => self.merge_map(map),
            other => Err(invalid(format!(
                "@context must be an object, an array or null, got: {other}"
            ))),
        }
    }

    fn merge_map(&mut self, map: &'a Map<String, JsonValue>) -> Result<(), ContextError> {
        for (key, value) in map {
            match key.as_str() {
                "@base" => self.base = optional_str(key, value)?,
                "@vocab" => self.vocab = optional_str(key, value)?,
                "@language" => self.language = optional_str(key, value)?,
                "@import" => {
                    return Err(ContextError::ExternalContext(
                        value.as_str().unwrap_or_default().to_owned(),
                    ))
                }
                "@version" | "@protected" | "@propagate" => {
                    tracing::trace!("Ignoring context keyword {key}");
                }
                keyword if keyword.starts_with('@') => {
                    tracing::warn!("Ignoring unknown context keyword {keyword}");
                }
                term => {
                    self.terms.insert(term, value);
                }
            }
        }
        Ok(())
    }

    /// If the term defines a prefix, returns its (unexpanded) namespace.
    fn prefix_namespace(term: &str, value: &'a JsonValue) -> Result<Option<&'a str>, ContextError> {
        if term.contains(':') {
            return Ok(None);
        }
        match value {
            JsonValue::String(namespace) if is_namespace(namespace) => Ok(Some(namespace.as_str())),
            JsonValue::Object(definition) => match definition.get("@prefix") {
                None | Some(JsonValue::Bool(false)) => Ok(None),
                Some(JsonValue::Bool(true)) => definition
                    .get("@id")
                    .and_then(JsonValue::as_str)
                    .map(Some)
                    .ok_or_else(|| invalid(format!("prefix '{term}' requires a string @id"))),
                Some(other) => Err(invalid(format!(
                    "@prefix of '{term}' must be a boolean, got: {other}"
                ))),
            },
            _ => Ok(None),
        }
    }

    fn resolve(self) -> Result<Context, ContextError> {
        let mut ctx = Context {
            language: self.language.map(ToOwned::to_owned),
            ..Context::default()
        };

        let mut pending = Vec::new();
        for (&term, &value) in &self.terms {
            if let Some(namespace) = Self::prefix_namespace(term, value)? {
                pending.push((term, namespace));
            }
        }
        let prefix_terms: BTreeSet<&str> = pending.iter().map(|(term, _)| *term).collect();
        resolve_prefixes(&mut ctx, pending)?;

        if let Some(base) = self.base {
            if !is_absolute(base) {
                return Err(invalid(format!("@base must be an absolute IRI, got: '{base}'")));
            }
            ctx.base = Some(base.to_owned());
        }
        ctx.vocab = match self.vocab {
            None => None,
            Some("") => Some(
                ctx.base
                    .clone()
                    .ok_or_else(|| invalid("an empty @vocab requires an @base"))?,
            ),
            Some(vocab) => Some(ctx.expand(vocab)?),
        };

        for (&term, &value) in &self.terms {
            if prefix_terms.contains(term) {
                continue;
            }
            resolve_term(&mut ctx, term, value)?;
        }
        Ok(ctx)
    }
}

/// Prefix namespaces may themselves be compact IRIs using other prefixes,
/// so they are resolved in rounds.
fn resolve_prefixes(ctx: &mut Context, mut pending: Vec<(&str, &str)>) -> Result<(), ContextError> {
    while !pending.is_empty() {
        let (ready, waiting): (Vec<_>, Vec<_>) = pending.into_iter().partition(|(_, namespace)| {
            is_absolute(namespace)
                || split_compact(namespace)
                    .is_some_and(|(prefix, _)| ctx.prefixes.contains_key(prefix))
        });
        if ready.is_empty() {
            let (term, namespace) = waiting[0];
            return Err(invalid(format!(
                "prefix '{term}' maps to the non-absolute namespace '{namespace}'"
            )));
        }
        for (term, namespace) in ready {
            let namespace = ctx.expand(namespace)?;
            let prefix = Prefix::new(term.to_owned(), namespace)
                .map_err(|err| invalid(format!("prefix '{term}': {err}")))?;
            ctx.prefixes.insert(term.to_owned(), prefix);
        }
        pending = waiting;
    }
    Ok(())
}

fn is_type_term(term: &str) -> bool {
    term.chars().next().is_some_and(char::is_uppercase)
}

fn resolve_term(ctx: &mut Context, term: &str, value: &JsonValue) -> Result<(), ContextError> {
    match value {
        JsonValue::Null => {
            tracing::debug!("Term '{term}' is explicitly unmapped");
        }
        JsonValue::String(keyword) if keyword.starts_with('@') => {
            tracing::debug!("Skipping keyword alias '{term}' -> {keyword}");
        }
        JsonValue::String(id) => {
            let id = ctx.expand(id)?;
            if is_type_term(term) {
                ctx.type_mappings.insert(term.to_owned(), id);
            } else {
                ctx.property_mappings
                    .insert(term.to_owned(), PropertyMapping::new(id));
            }
        }
        JsonValue::Object(definition) => {
            if definition.contains_key("@reverse") {
                tracing::warn!("Skipping reverse property '{term}'; reverse properties are not supported");
                return Ok(());
            }
            let id = match definition.get("@id") {
                None => ctx.expand(term)?,
                Some(JsonValue::Null) => {
                    tracing::debug!("Term '{term}' is explicitly unmapped");
                    return Ok(());
                }
                Some(JsonValue::String(keyword)) if keyword.starts_with('@') => {
                    tracing::debug!("Skipping keyword alias '{term}' -> {keyword}");
                    return Ok(());
                }
                Some(JsonValue::String(id)) => ctx.expand(id)?,
                Some(other) => {
                    return Err(invalid(format!(
                        "@id of '{term}' must be a string, got: {other}"
                    )))
                }
            };
            let type_ = definition
                .get("@type")
                .map(|value| parse_type_value(ctx, term, value))
                .transpose()?
                .flatten();
            let container = definition
                .get("@container")
                .map(|value| parse_container(term, value))
                .transpose()?
                .flatten();
            if type_.is_none() && container.is_none() && is_type_term(term) {
                ctx.type_mappings.insert(term.to_owned(), id);
                return Ok(());
            }
            ctx.property_mappings.insert(
                term.to_owned(),
                PropertyMapping {
                    id,
                    type_,
                    container,
                },
            );
        }
        other => {
            return Err(invalid(format!(
                "the definition of '{term}' must be a string, an object or null, got: {other}"
            )))
        }
    }
    Ok(())
}

fn parse_type_value(
    ctx: &Context,
    term: &str,
    value: &JsonValue,
) -> Result<Option<TypeValue>, ContextError> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::String(keyword) => match keyword.as_str() {
            "@id" => Ok(Some(TypeValue::Id)),
            "@vocab" => Ok(Some(TypeValue::Vocab)),
            other if other.starts_with('@') => Err(invalid(format!(
                "unsupported @type '{other}' of '{term}'"
            ))),
            datatype => Ok(Some(TypeValue::Iri(ctx.expand(datatype)?))),
        },
        other => Err(invalid(format!(
            "@type of '{term}' must be a string, got: {other}"
        ))),
    }
}

fn parse_container_keyword(term: &str, keyword: &str) -> Result<Container, ContextError> {
    match keyword {
        "@list" => Ok(Container::List),
        "@set" => Ok(Container::Set),
        "@index" => Ok(Container::Index),
        "@language" => Ok(Container::Language),
        other => Err(invalid(format!(
            "unsupported @container '{other}' of '{term}'"
        ))),
    }
}

/// A `@container` array collapses to its most specific entry,
/// e.g. `["@set", "@index"]` -> `Index`.
fn parse_container(term: &str, value: &JsonValue) -> Result<Option<Container>, ContextError> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::String(keyword) => parse_container_keyword(term, keyword).map(Some),
        JsonValue::Array(keywords) => {
            let mut containers = Vec::with_capacity(keywords.len());
            for keyword in keywords {
                let keyword = keyword.as_str().ok_or_else(|| {
                    invalid(format!("@container entries of '{term}' must be strings"))
                })?;
                containers.push(parse_container_keyword(term, keyword)?);
            }
            Ok([
                Container::List,
                Container::Index,
                Container::Language,
                Container::Set,
            ]
            .into_iter()
            .find(|container| containers.contains(container)))
        }
        other => Err(invalid(format!(
            "@container of '{term}' must be a string or an array, got: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn type_terms_start_uppercase() {
        assert!(is_type_term("Person"));
        assert!(!is_type_term("knows"));
        assert!(!is_type_term(""));
    }

    #[test]
    fn container_arrays_collapse() {
        assert_eq!(
            parse_container("t", &json!(["@set", "@index"])).unwrap(),
            Some(Container::Index)
        );
        assert_eq!(
            parse_container("t", &json!("@list")).unwrap(),
            Some(Container::List)
        );
        assert_eq!(parse_container("t", &json!([])).unwrap(), None);
        assert!(parse_container("t", &json!("@graph")).is_err());
        assert!(parse_container("t", &json!(3)).is_err());
    }

    #[test]
    fn prefixes_are_detected_before_expansion() {
        assert_eq!(
            RawContext::prefix_namespace("ex", &json!("http://example.org/")).unwrap(),
            Some("http://example.org/")
        );
        assert_eq!(
            RawContext::prefix_namespace("name", &json!("http://example.org/name")).unwrap(),
            None
        );
        assert_eq!(
            RawContext::prefix_namespace(
                "ex",
                &json!({ "@id": "http://example.org/x", "@prefix": true })
            )
            .unwrap(),
            Some("http://example.org/x")
        );
        assert!(RawContext::prefix_namespace("ex", &json!({ "@prefix": true })).is_err());
    }
}
