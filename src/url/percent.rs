//! Percent-escape decoding and minimal re-encoding.
//!
//! Decoding is lenient: a `%` that does not start a valid two-hex-digit
//! escape is kept literally. Every escape this module emits uses lowercase
//! hex digits so keys compare equal regardless of the input's escape case.

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, percent_encode, AsciiSet, CONTROLS};

use crate::error::SurtError;

/// Bytes that are unsafe inside a query value.
///
/// `(`, `)`, `:`, `;`, `/` and friends stay literal. Non-ASCII bytes are
/// always escaped by `percent_encode`.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+');

/// Bytes that would collide with SURT host delimiters once decoded.
const HOST_LABEL: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'#')
    .add(b'%')
    .add(b'(')
    .add(b')')
    .add(b',')
    .add(b'/')
    .add(b'?')
    .add(b'@');

/// Decode every valid escape in `input` into raw bytes.
pub fn percent_decode_bytes(input: &str) -> Vec<u8> {
    percent_decode_str(input).collect()
}

/// Decode `input` and require the result to be UTF-8.
///
/// # Errors
///
/// Returns [`SurtError::Canonicalizer`] when the decoded bytes are not UTF-8.
pub fn percent_decode_utf8(input: &str) -> Result<Cow<'_, str>, SurtError> {
    Ok(percent_decode_str(input).decode_utf8()?)
}

/// Escape a decoded query value using the minimal query rule.
///
/// # Examples
///
/// ```
/// use surtkey::url::percent::escape_query_value;
///
/// assert_eq!(escape_query_value(b"netscape 5.0 (windows;"), "netscape%205.0%20(windows;");
/// assert_eq!(escape_query_value("wrocław".as_bytes()), "wroc%c5%82aw");
/// ```
pub fn escape_query_value(value: &[u8]) -> String {
    let mut out = String::with_capacity(value.len());
    push_encoded(&mut out, value, QUERY_VALUE);
    out
}

/// Escape the characters of a host label that would corrupt the key.
///
/// Non-ASCII characters are left as they are.
pub fn escape_host_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for ch in label.chars() {
        if ch.is_ascii() {
            push_encoded(&mut out, &[ch as u8], HOST_LABEL);
        } else {
            out.push(ch);
        }
    }
    out
}

/// Lowercase the hex digits of every valid escape, leaving all else untouched.
///
/// ```
/// use surtkey::url::percent::lowercase_escapes;
///
/// assert_eq!(lowercase_escapes("/A%7EB/%zz%2F"), "/A%7eB/%zz%2f");
/// ```
pub fn lowercase_escapes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let bytes = tail.as_bytes();

        if bytes.len() >= 3 && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit() {
            out.push_str(&tail[..3].to_ascii_lowercase());
            rest = &tail[3..];
        } else {
            out.push('%');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

// percent_encode yields each escape as its own "%XX" chunk
fn push_encoded(out: &mut String, bytes: &[u8], set: &'static AsciiSet) {
    for chunk in percent_encode(bytes, set) {
        if chunk.starts_with('%') {
            out.extend(chunk.chars().map(|c| c.to_ascii_lowercase()));
        } else {
            out.push_str(chunk);
        }
    }
}
