//! Compact URIs (`prefix:identifier`) and prefix-map conversion.

use crate::error::{Error, Result};
use crate::model::Uri;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A compact URI such as `gnd:4021477-1`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Curie {
    pub prefix: String,
    pub identifier: String,
}

impl Curie {
    pub fn new(prefix: impl Into<String>, identifier: impl Into<String>) -> Self {
        Curie {
            prefix: prefix.into(),
            identifier: identifier.into(),
        }
    }

    /// Split `prefix:identifier` at the first colon.
    pub fn parse(text: &str) -> Option<Self> {
        let (prefix, identifier) = text.split_once(':')?;
        if prefix.is_empty() {
            return None;
        }
        Some(Curie::new(prefix, identifier))
    }
}

impl fmt::Display for Curie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.identifier)
    }
}

/// Bidirectional mapping between CURIE prefixes and URI prefixes.
#[derive(Clone, Debug)]
pub struct Converter {
    // Longest URI prefix first so compression picks the most specific match.
    entries: Vec<(String, String)>,
}

impl Converter {
    /// Build from `(prefix, uri_prefix)` pairs. Prefixes and URI prefixes
    /// must be non-empty and unique.
    pub fn from_prefix_map<I, P, U>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, U)>,
        P: Into<String>,
        U: Into<String>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        let mut prefixes = BTreeSet::new();
        let mut uri_prefixes = BTreeSet::new();
        for (prefix, uri_prefix) in pairs {
            let (prefix, uri_prefix) = (prefix.into(), uri_prefix.into());
            if prefix.is_empty() || prefix.contains(':') {
                return Err(Error::MalformedInput(format!(
                    "invalid CURIE prefix '{prefix}'"
                )));
            }
            if uri_prefix.is_empty() {
                return Err(Error::MalformedInput(format!(
                    "prefix '{prefix}' has an empty URI prefix"
                )));
            }
            if !prefixes.insert(prefix.clone()) {
                return Err(Error::MalformedInput(format!(
                    "prefix '{prefix}' is defined more than once"
                )));
            }
            if !uri_prefixes.insert(uri_prefix.clone()) {
                return Err(Error::MalformedInput(format!(
                    "URI prefix '{uri_prefix}' is assigned to more than one prefix"
                )));
            }
            entries.push((prefix, uri_prefix));
        }
        entries.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(&b.0)));
        Ok(Converter { entries })
    }

    /// Parse `prefix=uri` lines as given on the command line.
    pub fn from_assignments<'a>(assignments: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let pairs = assignments
            .into_iter()
            .map(|assignment| {
                assignment.split_once('=').ok_or_else(|| {
                    Error::MalformedInput(format!(
                        "prefix assignment '{assignment}' is not of the form prefix=URI"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Converter::from_prefix_map(pairs)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }

    pub fn compress(&self, uri: &Uri) -> Option<Curie> {
        self.entries.iter().find_map(|(prefix, uri_prefix)| {
            uri.as_str()
                .strip_prefix(uri_prefix.as_str())
                .map(|identifier| Curie::new(prefix.as_str(), identifier))
        })
    }

    pub fn expand(&self, curie: &Curie) -> Option<Uri> {
        self.entries
            .iter()
            .find(|(prefix, _)| *prefix == curie.prefix)
            .map(|(_, uri_prefix)| Uri(format!("{uri_prefix}{}", curie.identifier)))
    }

    /// Like [`Converter::compress`] but failing on URIs outside every prefix.
    pub fn parse_uri(&self, uri: &Uri) -> Result<Curie> {
        self.compress(uri)
            .ok_or_else(|| Error::UnknownPrefix(uri.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converter() -> Converter {
        Converter::from_prefix_map([
            ("skos", "http://www.w3.org/2004/02/skos/core#"),
            ("ex", "http://example.org/"),
            ("exvoc", "http://example.org/voc/"),
        ])
        .unwrap()
    }

    #[test]
    fn compress_prefers_the_longest_uri_prefix() {
        let conv = converter();
        assert_eq!(
            conv.compress(&Uri::from("http://example.org/voc/c1")),
            Some(Curie::new("exvoc", "c1"))
        );
        assert_eq!(
            conv.compress(&Uri::from("http://example.org/other")),
            Some(Curie::new("ex", "other"))
        );
        assert_eq!(conv.compress(&Uri::from("urn:isbn:123")), None);
    }

    #[test]
    fn expand_inverts_compress() {
        let conv = converter();
        let curie = Curie::parse("skos:Concept").unwrap();
        let uri = conv.expand(&curie).unwrap();
        assert_eq!(uri.as_str(), "http://www.w3.org/2004/02/skos/core#Concept");
        assert_eq!(conv.compress(&uri), Some(curie));
        assert_eq!(conv.expand(&Curie::new("nope", "x")), None);
    }

    #[test]
    fn parse_uri_is_strict() {
        let err = converter().parse_uri(&Uri::from("urn:isbn:123")).unwrap_err();
        assert!(matches!(err, Error::UnknownPrefix(uri) if uri == "urn:isbn:123"));
    }

    #[test]
    fn rejects_bad_prefix_maps() {
        assert!(Converter::from_prefix_map([("", "http://a/")]).is_err());
        assert!(Converter::from_prefix_map([("a", "")]).is_err());
        assert!(Converter::from_prefix_map([("a", "http://a/"), ("a", "http://b/")]).is_err());
        assert!(Converter::from_prefix_map([("a", "http://a/"), ("b", "http://a/")]).is_err());
        assert!(Converter::from_assignments(["ex"]).is_err());
        let conv = Converter::from_assignments(["ex=http://example.org/"]).unwrap();
        assert_eq!(conv.prefixes().collect::<Vec<_>>(), [("ex", "http://example.org/")]);
    }

    #[test]
    fn curie_display_and_parse() {
        let curie = Curie::parse("gnd:4021477-1").unwrap();
        assert_eq!(curie.to_string(), "gnd:4021477-1");
        assert_eq!(Curie::parse("no-colon"), None);
        assert_eq!(Curie::parse(":x"), None);
    }
}
