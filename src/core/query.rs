//! Query-string canonicalization.
//!
//! Parameters are split on `&` and the first `=`, session identifiers are
//! dropped, values are decoded, lowercased and re-escaped with the minimal
//! query rule, and the result is sorted so that equivalent queries produce
//! identical keys. Running the canonicalizer on its own output is a no-op.

use std::cmp::Ordering;

use crate::types::{CanonicalizationOptions, QueryParam};
use crate::url::percent::{escape_query_value, percent_decode_bytes};

/// Keys whose value is dropped when it is a 32-character alphanumeric id.
const SESSION_ID_KEYS: &[&str] = &["jsessionid", "phpsessid", "sid"];
const SESSION_ID_LEN: usize = 32;

/// ASP session cookies: `ASPSESSIONID` plus eight letters, a 24-letter value.
const ASP_SESSION_PREFIX: &str = "aspsessionid";
const ASP_SESSION_SUFFIX_LEN: usize = 8;
const ASP_SESSION_VALUE_LEN: usize = 24;

/// ColdFusion ids only count when both `CFID` and `CFTOKEN` carry a value.
const COLDFUSION_ID: &str = "cfid";
const COLDFUSION_TOKEN: &str = "cftoken";

/// Whether a single parameter carries a recognised session id.
///
/// Both the key and the shape of the decoded value must match; `sid=12` is
/// an ordinary parameter.
///
/// ```
/// use surtkey::{is_session_id_param, QueryParam};
///
/// assert!(is_session_id_param(&QueryParam::new("PHPSESSID", Some("0123456789abcdefghijklemopqrstuv"))));
/// assert!(is_session_id_param(&QueryParam::new("ASPSESSIONIDQQGGQGPK", Some("ABCDEFGHIJKLMNOPQRSTUVWX"))));
/// assert!(!is_session_id_param(&QueryParam::new("sid", Some("12"))));
/// ```
pub fn is_session_id_param(param: &QueryParam) -> bool {
    let value = match param.value.as_deref() {
        Some(value) => percent_decode_bytes(value),
        None => return false,
    };
    let key = param.key.to_ascii_lowercase();

    if SESSION_ID_KEYS.contains(&key.as_str()) {
        return value.len() == SESSION_ID_LEN && value.iter().all(u8::is_ascii_alphanumeric);
    }

    match key.strip_prefix(ASP_SESSION_PREFIX) {
        Some(suffix) => {
            suffix.len() == ASP_SESSION_SUFFIX_LEN
                && suffix.bytes().all(|b| b.is_ascii_alphabetic())
                && value.len() == ASP_SESSION_VALUE_LEN
                && value.iter().all(u8::is_ascii_alphabetic)
        }
        None => false,
    }
}

/// Remove session-id parameters, keeping the rest in input order.
pub fn strip_session_ids(params: Vec<QueryParam>) -> Vec<QueryParam> {
    let coldfusion = is_coldfusion_param(&params, COLDFUSION_ID)
        && is_coldfusion_param(&params, COLDFUSION_TOKEN);

    params
        .into_iter()
        .filter(|param| {
            let paired = coldfusion
                && (is_named(param, COLDFUSION_ID) || is_named(param, COLDFUSION_TOKEN));
            !paired && !is_session_id_param(param)
        })
        .collect()
}

fn is_coldfusion_param(params: &[QueryParam], name: &str) -> bool {
    params.iter().any(|param| is_named(param, name))
}

fn is_named(param: &QueryParam, name: &str) -> bool {
    param.key.eq_ignore_ascii_case(name)
        && param.value.as_deref().is_some_and(|value| !value.is_empty())
}

/// Split a raw query into parameters in input order.
///
/// Every `&`-separated token becomes one parameter, including empty ones.
/// A token without `=` has no value.
pub fn parse_query_params(query: &str) -> Vec<QueryParam> {
    query
        .split('&')
        .map(|token| match token.split_once('=') {
            Some((key, value)) => QueryParam::new(key, Some(value)),
            None => QueryParam::new(token, None::<&str>),
        })
        .collect()
}

/// A retained parameter with its sort key.
struct CanonicalParam {
    key: String,
    /// Decoded value bytes, lowercased when enabled
    sort_value: Option<Vec<u8>>,
    value: Option<String>,
}

impl CanonicalParam {
    fn from_param(param: QueryParam, options: &CanonicalizationOptions) -> Self {
        let lowercase = options.query_lowercase;
        let sort_value = param.value.as_deref().map(|raw| {
            let decoded = percent_decode_bytes(raw);
            if lowercase {
                lowercase_bytes(decoded)
            } else {
                decoded
            }
        });
        let value = sort_value.as_deref().map(escape_query_value);

        Self {
            key: if lowercase { param.key.to_lowercase() } else { param.key },
            sort_value,
            value,
        }
    }

    // None < Some, so a bare key sorts before any key=value
    fn order(&self, other: &Self) -> Ordering {
        self.key
            .as_bytes()
            .cmp(other.key.as_bytes())
            .then_with(|| self.sort_value.cmp(&other.sort_value))
    }
}

/// Unicode lowercasing for UTF-8 values, ASCII-only for anything else.
fn lowercase_bytes(bytes: Vec<u8>) -> Vec<u8> {
    match String::from_utf8(bytes) {
        Ok(text) => text.to_lowercase().into_bytes(),
        Err(err) => {
            let mut bytes = err.into_bytes();
            bytes.make_ascii_lowercase();
            bytes
        }
    }
}

/// Canonicalize a raw (undecoded) query string, without the leading `?`.
///
/// Returns `None` when nothing is left (an empty query, or one made only of
/// session ids) and `query_strip_empty` is on, so the key gets no `?`.
///
/// # Examples
///
/// ```
/// use surtkey::{canonicalize_query, CanonicalizationOptions};
///
/// let options = CanonicalizationOptions::default();
/// assert_eq!(canonicalize_query("a=2&b&a=1", &options).as_deref(), Some("a=1&a=2&b"));
/// assert_eq!(
///     canonicalize_query("PHPSESSID=0123456789abcdefghijklemopqrstuv&x=Y", &options).as_deref(),
///     Some("x=y")
/// );
/// assert_eq!(canonicalize_query("", &options), None);
///
/// let options = options.query_alpha_reorder(false).query_lowercase(false);
/// assert_eq!(canonicalize_query("b=B&a=A", &options).as_deref(), Some("b=B&a=A"));
/// ```
pub fn canonicalize_query(query: &str, options: &CanonicalizationOptions) -> Option<String> {
    let mut params = parse_query_params(query);
    if options.query_strip_session_id {
        params = strip_session_ids(params);
    }

    let mut params: Vec<CanonicalParam> = params
        .into_iter()
        .map(|param| CanonicalParam::from_param(param, options))
        .collect();

    if options.query_alpha_reorder {
        // stable: identical pairs keep input order
        params.sort_by(CanonicalParam::order);
    }

    let serialized: Vec<String> = params
        .into_iter()
        .map(|param| match param.value {
            Some(value) => format!("{}={}", param.key, value),
            None => param.key,
        })
        .collect();
    let joined = serialized.join("&");

    if joined.is_empty() && options.query_strip_empty {
        return None;
    }
    Some(joined)
}
