//! List-form headers: the model exchanged with the transport.
//!
//! # Design Decisions
//! - Order is preserved exactly, repeated names stay as distinct entries
//! - Names are lower-cased on insert so lookups are case-insensitive
//! - Values are kept as raw `HeaderValue` bytes; obs-text survives untouched
//! - Text values the `http` crate rejects are logged and skipped on insert

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;

/// Ordered sequence of `(name, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct HeaderList {
    entries: Vec<(String, HeaderValue)>,
}

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text entry, keeping any existing entries with the same name.
    pub fn append(&mut self, name: impl AsRef<str>, value: impl AsRef<str>) {
        let name = name.as_ref();
        match HeaderValue::from_str(value.as_ref()) {
            Ok(value) => self.append_raw(name, value),
            Err(_) => tracing::warn!(header = %name, "Skipping invalid header value"),
        }
    }

    /// Append an entry whose value bytes are carried as-is.
    pub fn append_raw(&mut self, name: impl AsRef<str>, value: HeaderValue) {
        self.entries.push((name.as_ref().to_ascii_lowercase(), value));
    }

    /// First value for `name`, if it is visible ASCII.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_raw(name).and_then(|v| v.to_str().ok())
    }

    pub fn get_raw(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Every visible-ASCII value for `name`, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .filter_map(|(_, v)| v.to_str().ok())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_raw(name).is_some()
    }

    /// Drop every entry whose name satisfies `predicate`.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&str) -> bool) {
        self.entries.retain(|(n, _)| !predicate(n));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build from an `http::HeaderMap`, keeping every value byte for byte.
    pub fn from_header_map(map: &HeaderMap) -> Self {
        let entries = map
            .iter()
            .map(|(name, value)| (name.as_str().to_string(), value.clone()))
            .collect();
        Self { entries }
    }

    /// Convert into an `http::HeaderMap`, skipping invalid names.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            match HeaderName::from_bytes(name.as_bytes()) {
                Ok(header_name) => {
                    map.append(header_name, value.clone());
                }
                Err(_) => tracing::warn!(header = %name, "Skipping invalid header name"),
            }
        }
        map
    }
}

impl From<Vec<(String, String)>> for HeaderList {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<N: AsRef<str>, V: AsRef<str>> FromIterator<(N, V)> for HeaderList {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut list = HeaderList::new();
        for (name, value) in iter {
            list.append(name, value);
        }
        list
    }
}
