//! Host canonicalization.

use std::net::Ipv4Addr;

use crate::error::SurtError;
use crate::types::{CanonicalizationOptions, HostKey};
use crate::url::percent::{escape_host_label, percent_decode_utf8};
use crate::url::psl::registrable_domain;

/// Canonicalize the host substring of an authority.
///
/// The host is percent-decoded and lowercased, empty labels are dropped, a
/// leading `www` label is removed when `host_massage` is on, and an IPv4
/// literal becomes [`HostKey::Ipv4`]. Besides the usual dotted quad this
/// accepts a dotted quad in octal (first label starting with `0`) and a
/// single decimal integer (`3279880203` is `195.127.0.11`). Anything else
/// becomes [`HostKey::Labels`]. An empty host gives an empty label list.
///
/// # Errors
///
/// Returns [`SurtError::Canonicalizer`] when the decoded host is not UTF-8.
///
/// # Examples
///
/// ```
/// use surtkey::{canonicalize_host, CanonicalizationOptions, HostKey};
///
/// let options = CanonicalizationOptions::default();
/// let key = canonicalize_host("WWW.Archive.ORG", &options).unwrap();
/// assert_eq!(key, HostKey::Labels(vec!["archive".into(), "org".into()]));
///
/// let key = canonicalize_host("192.168.1.254", &options).unwrap();
/// assert_eq!(key, HostKey::Ipv4([192, 168, 1, 254]));
/// ```
pub fn canonicalize_host(
    host: &str,
    options: &CanonicalizationOptions,
) -> Result<HostKey, SurtError> {
    if host.starts_with('[') {
        return Ok(HostKey::Bracketed(host.to_lowercase()));
    }

    let decoded = percent_decode_utf8(host)?.to_lowercase();
    let mut labels: Vec<String> = decoded
        .split('.')
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    // a lone `www` is the whole host rather than a prefix, so it stays
    if options.host_massage && labels.len() > 1 && labels[0] == "www" {
        labels.remove(0);
    }

    if let Some(octets) = parse_ipv4(&labels) {
        return Ok(HostKey::Ipv4(octets));
    }

    if options.public_suffix && labels.len() > 1 {
        let joined = labels.join(".");
        if let Some(domain) = registrable_domain(&joined) {
            labels = domain.split('.').map(str::to_string).collect();
        }
    }

    Ok(HostKey::Labels(
        labels.iter().map(|label| escape_host_label(label)).collect(),
    ))
}

/// Largest integer host still read as an address; only its low 32 bits count.
const MAX_INTEGER_HOST_DIGITS: usize = 39;

fn parse_ipv4(labels: &[String]) -> Option<[u8; 4]> {
    match labels {
        [single] => parse_integer_ipv4(single),
        [_, _, _, _] => parse_dotted_ipv4(labels),
        _ => None,
    }
}

fn parse_integer_ipv4(label: &str) -> Option<[u8; 4]> {
    if label.len() > MAX_INTEGER_HOST_DIGITS || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u128 = label.parse().ok()?;
    Some(((value & 0xffff_ffff) as u32).to_be_bytes())
}

/// Four labels, each an octet in decimal, or all in octal when the first
/// label starts with `0`.
fn parse_dotted_ipv4(labels: &[String]) -> Option<[u8; 4]> {
    let radix = if labels[0].starts_with('0') { 8 } else { 10 };

    let mut octets = [0u8; 4];
    for (octet, label) in octets.iter_mut().zip(labels) {
        if label.is_empty() || !label.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        *octet = u8::from_str_radix(label, radix).ok()?;
    }
    Some(octets)
}

impl HostKey {
    /// Render the host segment of a SURT key.
    ///
    /// Hostnames are comma-joined with the rightmost label first. IPv4
    /// literals stay dot-joined, reversed only when `reverse_ipaddr` is set.
    pub fn to_token(&self, reverse_ipaddr: bool, trailing_comma: bool) -> String {
        let mut token = match self {
            HostKey::Labels(labels) => {
                let reversed: Vec<&str> = labels.iter().rev().map(String::as_str).collect();
                reversed.join(",")
            }
            HostKey::Ipv4(octets) => {
                let [a, b, c, d] = *octets;
                let ordered = if reverse_ipaddr { [d, c, b, a] } else { [a, b, c, d] };
                Ipv4Addr::from(ordered).to_string()
            }
            HostKey::Bracketed(literal) => literal.clone(),
        };

        if trailing_comma {
            token.push(',');
        }
        token
    }

    /// Render the host in its natural order, as it appears in a URL.
    pub fn to_hostname(&self) -> String {
        match self {
            HostKey::Labels(labels) => labels.join("."),
            HostKey::Ipv4(octets) => Ipv4Addr::from(*octets).to_string(),
            HostKey::Bracketed(literal) => literal.clone(),
        }
    }
}
