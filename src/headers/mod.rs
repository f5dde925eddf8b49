//! Header models and translation.
//!
//! # Data Flow
//! ```text
//! inbound HeaderMap ──▶ HeaderList ──▶ transport
//!                          ▲   │
//!            to_list_form  │   │ to_flat_form
//!                          │   ▼
//!                      FlatHeaders ◀──▶ JSON descriptor
//! ```
//!
//! # Design Decisions
//! - `HeaderList` is the canonical in-process model
//! - `translate` holds the only two converters between the forms
//! - `Cookie` parsing lives here since it reads raw header text

pub mod cookie;
pub mod flat;
pub mod list;
pub mod translate;

use serde::Deserialize;

pub use cookie::{parse_cookies, CookiePair, ParsedCookies};
pub use flat::{FlatHeaders, FlatValue};
pub use list::HeaderList;
pub use translate::{to_flat_form, to_list_form};

pub const SET_COOKIE: &str = "set-cookie";
pub const COOKIE: &str = "cookie";
pub const CONTENT_TYPE: &str = "content-type";

/// Headers in either representation.
///
/// Deserializes from a JSON object (flat) or an array of `[name, value]` pairs (list).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HeaderSet {
    Flat(FlatHeaders),
    List(HeaderList),
}

impl HeaderSet {
    /// Normalize to list form.
    pub fn into_list(self) -> HeaderList {
        match self {
            HeaderSet::List(list) => list,
            HeaderSet::Flat(flat) => to_list_form(&flat),
        }
    }

    /// Normalize to flat form.
    pub fn into_flat(self) -> FlatHeaders {
        match self {
            HeaderSet::List(list) => to_flat_form(&list),
            HeaderSet::Flat(flat) => flat,
        }
    }
}

impl Default for HeaderSet {
    fn default() -> Self {
        HeaderSet::List(HeaderList::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_set_accepts_both_forms() {
        let flat: HeaderSet = serde_json::from_str(r#"{"x-a": ["1", "2"]}"#).unwrap();
        assert!(matches!(flat, HeaderSet::Flat(_)));
        assert_eq!(flat.into_list().get_all("x-a").count(), 2);

        let list: HeaderSet = serde_json::from_str(r#"[["x-a", "1"], ["x-a", "2"]]"#).unwrap();
        assert!(matches!(list, HeaderSet::List(_)));
        assert_eq!(list.into_flat().get_all("x-a"), vec!["1", "2"]);
    }
}
