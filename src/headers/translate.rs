//! Conversion between list-form and flat-form headers.
//!
//! These two functions are the only code that knows about the flat encoding;
//! the rest of the pipeline works on [`HeaderList`].

use super::flat::{FlatHeaders, FlatValue};
use super::list::HeaderList;

/// Flat to list: a string becomes one pair, an array one pair per element.
pub fn to_list_form(flat: &FlatHeaders) -> HeaderList {
    let mut list = HeaderList::new();
    for (name, value) in flat.iter() {
        match value {
            FlatValue::Single(v) => list.append(name, v),
            FlatValue::Multiple(vs) => {
                for v in vs {
                    list.append(name, v);
                }
            }
        }
    }
    list
}

/// List to flat: values sharing a name are collected under one key.
///
/// Repeated names (`set-cookie` included) keep every value distinct. Readers
/// that want a single string use [`FlatHeaders::get`], which joins with `", "`;
/// `set-cookie` must be read through [`FlatHeaders::get_set_cookie`] since a
/// joined cookie list cannot be split back reliably.
///
/// Flat form is JSON text, so value bytes outside UTF-8 are replaced here.
pub fn to_flat_form(list: &HeaderList) -> FlatHeaders {
    let mut flat = FlatHeaders::new();
    for (name, value) in list.iter() {
        flat.insert(name, String::from_utf8_lossy(value.as_bytes()));
    }
    flat
}
