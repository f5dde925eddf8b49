//! Flat-form headers: one entry per name, used in serialized descriptors.
//!
//! # Design Decisions
//! - Keys are lower-cased; inserting an existing key merges into `Multiple`
//! - JSON key order is kept (custom visitor, no dependency on map ordering)
//! - Value shapes other than string or array of strings are dropped silently

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::SET_COOKIE;

/// A flat header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FlatValue {
    /// Values in order.
    pub fn values(&self) -> &[String] {
        match self {
            FlatValue::Single(v) => std::slice::from_ref(v),
            FlatValue::Multiple(vs) => vs,
        }
    }

    /// One string, multiple values joined with `", "`.
    pub fn joined(&self) -> String {
        match self {
            FlatValue::Single(v) => v.clone(),
            FlatValue::Multiple(vs) => vs.join(", "),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            FlatValue::Single(existing) => {
                let first = std::mem::take(existing);
                *self = FlatValue::Multiple(vec![first, value]);
            }
            FlatValue::Multiple(vs) => vs.push(value),
        }
    }
}

/// Mapping from lower-cased header name to a single or repeated value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatHeaders {
    entries: Vec<(String, FlatValue)>,
}

impl FlatHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value under `name`, merging with an existing entry.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        let name = name.as_ref().to_ascii_lowercase();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => existing.push(value),
            None => self.entries.push((name, FlatValue::Single(value))),
        }
    }

    /// Add an array value under `name`; an empty array adds nothing.
    pub fn insert_all(&mut self, name: impl AsRef<str>, values: Vec<String>) {
        if values.is_empty() {
            return;
        }
        let name = name.as_ref().to_ascii_lowercase();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => values.into_iter().for_each(|v| existing.push(v)),
            None => self.entries.push((name, FlatValue::Multiple(values))),
        }
    }

    /// Generic per-key accessor. Repeated values come back joined with `", "`.
    pub fn get(&self, name: &str) -> Option<String> {
        self.entry(name).map(FlatValue::joined)
    }

    /// Native multi-value accessor.
    pub fn get_all(&self, name: &str) -> Vec<String> {
        self.entry(name)
            .map(|v| v.values().to_vec())
            .unwrap_or_default()
    }

    /// Every `set-cookie` value, distinct.
    pub fn get_set_cookie(&self) -> Vec<String> {
        self.get_all(SET_COOKIE)
    }

    pub fn entry(&self, name: &str) -> Option<&FlatValue> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlatValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for FlatHeaders {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FlatHeadersVisitor)
    }
}

struct FlatHeadersVisitor;

impl<'de> Visitor<'de> for FlatHeadersVisitor {
    type Value = FlatHeaders;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of header names to strings or arrays of strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut headers = FlatHeaders::new();
        while let Some((name, value)) = access.next_entry::<String, serde_json::Value>()? {
            match value {
                serde_json::Value::String(s) => headers.insert(&name, s),
                serde_json::Value::Array(items) => {
                    let values = items
                        .into_iter()
                        .filter_map(|item| match item {
                            serde_json::Value::String(s) => Some(s),
                            _ => None,
                        })
                        .collect();
                    headers.insert_all(&name, values);
                }
                _ => {}
            }
        }
        Ok(headers)
    }
}
