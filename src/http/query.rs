//! Query string parsing
//!
//! Decodes the request's raw query string into key/value pairs using the
//! `application/x-www-form-urlencoded` rules (percent escapes and `+` as
//! space). Values are kept verbatim after decoding; nothing is rejected.

use url::form_urlencoded;

/// Decode a raw query string (without the leading `?`) into ordered pairs
pub fn parse(raw: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// First value for `key`, if present
pub fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
