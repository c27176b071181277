//! Helpers shared by endpoint builders, payload parsers, and the settings loader.

pub mod config;
pub mod paths;

use serde_json::Value;
use std::fmt::Write;

/// What: Encode a filter or search value for a query string.
///
/// Output:
/// - RFC 3986 unreserved bytes unchanged; everything else as `%XX` over the UTF-8 bytes.
///
/// Details:
/// - Space becomes `%20`, never `+`, so `chicken breast` survives the service's decoder.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push_str("%20"),
            _ => {
                out.push('%');
                let _ = write!(out, "{b:02X}");
            }
        }
    }
    out
}

/// String field `key` of `v`, or `""` when missing or not a string.
#[must_use]
pub fn s(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// What: Extract a non-blank string value from a JSON object by key.
///
/// Inputs:
/// - `v`: JSON value to extract from.
/// - `key`: Key to look up in the JSON object.
///
/// Output:
/// - `Some(String)` when the key maps to a string with visible content, `None` otherwise.
///
/// Details:
/// - The recipe API fills unused columns with `null`, `""`, or `" "`; all three map to `None`.
#[must_use]
pub fn opt_s(v: &Value, key: &str) -> Option<String> {
    v.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(ToOwned::to_owned)
}
