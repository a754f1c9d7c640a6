// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use oxiri::{Iri as OxIri, IriParseError};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type Iri = OxIri<String>;

/// URI schemes that mark a term as an absolute IRI,
/// even when they are not followed by `//`.
pub const KNOWN_SCHEMES: &[&str] = &[
    "http", "https", "urn", "file", "ftp", "mailto", "tag", "did", "data", "ipfs", "ipns",
];

/// A namespace prefix as declared in a JSON-LD context
/// or a Turtle document.
///
/// # Examples (JSON-LD format):
///
/// ```json
/// {
///   "@context": {
///     "schema": "http://schema.org/",
///     "xsd": "http://www.w3.org/2001/XMLSchema#"
///   }
/// }
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Prefix {
    /// The short form, e.g. `xsd` or `schema`.
    pub prefix: String,
    /// The extended/full form,
    /// e.g. `http://www.w3.org/2001/XMLSchema#`
    /// or `http://schema.org/`.
    pub namespace: Iri,
}

impl Prefix {
    /// Creates a new instance of `Prefix`.
    ///
    /// # Errors
    ///
    /// Returns an `IriParseError` if the given `namespace` is not an absolute IRI.
    pub fn new(prefix: String, namespace: String) -> Result<Self, IriParseError> {
        Ok(Self {
            prefix,
            namespace: OxIri::parse(namespace)?,
        })
    }

    /// Expands `local` within this namespace.
    ///
    /// # Examples
    ///
    /// ```
    /// # use shapemill_iri::Prefix;
    /// let schema = Prefix::new("schema".to_owned(), "http://schema.org/".to_owned()).unwrap();
    /// assert_eq!(schema.expand("name"), "http://schema.org/name");
    /// ```
    #[must_use]
    pub fn expand(&self, local: &str) -> String {
        format!("{}{local}", self.namespace.as_str())
    }

    /// Returns the local part of `iri`,
    /// if it lies within this namespace.
    #[must_use]
    pub fn strip<'a>(&self, iri: &'a str) -> Option<&'a str> {
        iri.strip_prefix(self.namespace.as_str())
    }
}

/// Whether a JSON-LD term value declares a namespace,
/// rather than a single class or property.
///
/// - `http://schema.org/` -> `true`
/// - `http://www.w3.org/2001/XMLSchema#` -> `true`
/// - `http://schema.org/name` -> `false`
#[must_use]
pub fn is_namespace(value: &str) -> bool {
    value.ends_with('#') || value.ends_with('/')
}

/// Whether `term` already is an absolute IRI,
/// which term expansion leaves unchanged.
///
/// That is the case if it contains `://`,
/// or if it starts with one of the [`KNOWN_SCHEMES`] followed by `:`
/// (e.g. `urn:isbn:0451450523`).
#[must_use]
pub fn is_absolute(term: &str) -> bool {
    if term.contains("://") {
        return true;
    }
    term.split_once(':').is_some_and(|(scheme, _)| {
        KNOWN_SCHEMES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(scheme))
    })
}

/// Splits a compact IRI like `ex:Person` into `("ex", "Person")`.
///
/// Returns `None` if there is no `:`, if the prefix is empty,
/// or if the rest starts with `//` (an absolute IRI like `http://...`).
#[must_use]
pub fn split_compact(term: &str) -> Option<(&str, &str)> {
    let (prefix, local) = term.split_once(':')?;
    if prefix.is_empty() || prefix.contains('/') || local.starts_with("//") {
        return None;
    }
    Some((prefix, local))
}

/// Returns the local name of an IRI,
/// which is the part after the last `#` or `/`.
/// IRIs without either (e.g. `urn:example:Person`)
/// use the part after the last `:`.
///
/// Returns `None` if that part is empty,
/// as for a namespace IRI like `http://schema.org/`.
#[must_use]
pub fn local_name(iri: &str) -> Option<&str> {
    let local = iri
        .rsplit_once(['#', '/'])
        .or_else(|| iri.rsplit_once(':'))
        .map_or(iri, |(_, local)| local);
    if local.is_empty() {
        None
    } else {
        Some(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_namespaces() {
        assert!(is_namespace("http://schema.org/"));
        assert!(is_namespace("http://www.w3.org/2001/XMLSchema#"));
        assert!(!is_namespace("http://schema.org/name"));
    }

    #[test]
    fn detects_absolute_iris() {
        assert!(is_absolute("http://example.org/Person"));
        assert!(is_absolute("urn:isbn:0451450523"));
        assert!(is_absolute("mailto:someone@example.org"));
        assert!(!is_absolute("ex:Person"));
        assert!(!is_absolute("Person"));
    }

    #[test]
    fn splits_compact_iris() {
        assert_eq!(split_compact("ex:Person"), Some(("ex", "Person")));
        assert_eq!(split_compact("ex:"), Some(("ex", "")));
        assert_eq!(split_compact("http://example.org/x"), None);
        assert_eq!(split_compact(":x"), None);
        assert_eq!(split_compact("Person"), None);
    }

    #[test]
    fn extracts_local_names() {
        assert_eq!(local_name("http://example.org/ns#Person"), Some("Person"));
        assert_eq!(local_name("http://schema.org/knows"), Some("knows"));
        assert_eq!(local_name("urn:example:Thing"), Some("Thing"));
        assert_eq!(local_name("http://schema.org/"), None);
    }

    #[test]
    fn prefix_expands_and_strips() {
        let ex = Prefix::new("ex".to_owned(), "http://example.org/".to_owned()).unwrap();
        assert_eq!(ex.expand("Person"), "http://example.org/Person");
        assert_eq!(ex.strip("http://example.org/Person"), Some("Person"));
        assert_eq!(ex.strip("http://schema.org/Person"), None);
        assert!(Prefix::new("bad".to_owned(), "not an iri".to_owned()).is_err());
    }
}
