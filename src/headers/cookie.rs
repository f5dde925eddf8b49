//! `Cookie` request header parsing.
//!
//! Output feeds the diagnostic metadata only; it never gates forwarding.

use percent_encoding::percent_decode_str;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One `name=value` pair from a `Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePair {
    pub name: String,
    pub value: String,
}

/// Cookies in header order. The first occurrence of a name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCookies {
    pairs: Vec<CookiePair>,
}

impl ParsedCookies {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CookiePair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Serialize for ParsedCookies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for pair in &self.pairs {
            map.serialize_entry(&pair.name, &pair.value)?;
        }
        map.end()
    }
}

/// Parse a `Cookie` header value. An absent header yields no cookies.
pub fn parse_cookies(header: Option<&str>) -> ParsedCookies {
    let mut cookies = ParsedCookies::default();
    let Some(header) = header else {
        return cookies;
    };

    for segment in header.split(';') {
        let Some((name, value)) = segment.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() || cookies.get(name).is_some() {
            continue;
        }

        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);

        cookies.pairs.push(CookiePair {
            name: name.to_string(),
            value: decode(value),
        });
    }
    cookies
}

fn decode(value: &str) -> String {
    match percent_decode_str(value).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_string(),
    }
}
