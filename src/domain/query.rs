//! Immutable query parameters and canonical query strings.
//!
//! Handlers never read the raw request URI directly: they parse it once into
//! [`QueryParams`] and hand that value to the synchronizer. Navigation targets
//! produced by the synchronizer are expressed as a [`Location`].

use std::fmt::{Display, Formatter};

use serde::Serialize;
use url::form_urlencoded;

/// Decoded `key=value` pairs of a request URL in their original order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses a raw (still percent-encoded) query string. A leading `?` is ignored.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = form_urlencoded::parse(raw.as_bytes())
            .into_owned()
            .collect();
        Self { pairs }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a copy with every `key` entry replaced by a single `key=value`.
    ///
    /// The replacement keeps the position of the first occurrence; a new key is
    /// appended at the end.
    pub fn with(&self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut pairs = Vec::with_capacity(self.pairs.len() + 1);
        let mut replaced = false;
        for (k, v) in &self.pairs {
            if k == key {
                if !replaced {
                    pairs.push((k.clone(), value.clone()));
                    replaced = true;
                }
            } else {
                pairs.push((k.clone(), v.clone()));
            }
        }
        if !replaced {
            pairs.push((key.to_string(), value));
        }
        Self { pairs }
    }

    /// Returns a copy without any `key` entries.
    pub fn without(&self, key: &str) -> Self {
        Self {
            pairs: self
                .pairs
                .iter()
                .filter(|(k, _)| k != key)
                .cloned()
                .collect(),
        }
    }

    pub fn to_query_string(&self) -> QueryString {
        QueryString::from_pairs(self.iter())
    }
}

/// `application/x-www-form-urlencoded` query string, without the leading `?`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct QueryString(String);

impl QueryString {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in pairs {
            serializer.append_pair(key, value);
        }
        Self(serializer.finish())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decodes the string back into parameters.
    pub fn params(&self) -> QueryParams {
        QueryParams::parse(&self.0)
    }
}

impl Display for QueryString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Navigation target: a path plus an optional query string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    pub query: Option<QueryString>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: None,
        }
    }

    pub fn with_query(mut self, query: QueryString) -> Self {
        self.query = if query.is_empty() { None } else { Some(query) };
        self
    }

    pub fn href(&self) -> String {
        self.to_string()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.query {
            Some(query) => write!(f, "{}?{}", self.path, query),
            None => f.write_str(&self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decodes_plus_and_percent() {
        let params = QueryParams::parse("?sort=auction_date+desc&make=Holden%20HQ&page=2");
        assert_eq!(params.get("sort"), Some("auction_date desc"));
        assert_eq!(params.get("make"), Some("Holden HQ"));
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("model"), None);
    }

    #[test]
    fn with_replaces_in_place_and_without_removes() {
        let params = QueryParams::parse("state=NSW&month=2025-12&state=VIC");
        assert_eq!(
            params.with("state", "QLD").to_query_string().as_str(),
            "state=QLD&month=2025-12"
        );
        assert_eq!(
            params.without("state").to_query_string().as_str(),
            "month=2025-12"
        );
        assert_eq!(
            QueryParams::default()
                .with("state", "SA")
                .to_query_string()
                .as_str(),
            "state=SA"
        );
    }

    #[test]
    fn location_omits_empty_query() {
        let bare = Location::new("/browse").with_query(QueryString::default());
        assert_eq!(bare.href(), "/browse");

        let full = Location::new("/browse").with_query(QueryString::from_pairs([("page", "2")]));
        assert_eq!(full.href(), "/browse?page=2");
    }
}
