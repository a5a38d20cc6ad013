//! Scheme classification.
//!
//! Opaque schemes (archive record markers, mail addresses, lookup
//! identifiers) have no host-based authority to reorder and are returned
//! verbatim. Host-based retrieval schemes go through full canonicalization.

use crate::types::Disposition;

/// Schemes returned unchanged regardless of options.
const PASSTHROUGH_SCHEMES: &[&str] = &[
    "about",
    "data",
    "dns",
    "filedesc",
    "javascript",
    "mailto",
    "metadata",
    "news",
    "tel",
    "urn",
    "warcinfo",
];

/// Host-based schemes that are always canonicalized.
const CANONICALIZE_SCHEMES: &[&str] = &[
    "ftp", "ftps", "gopher", "http", "https", "mms", "rtsp", "sftp", "telnet", "whois", "ws",
    "wss",
];

/// Schemes whose missing authority is recovered from the leading path segment.
const WEB_SCHEMES: &[&str] = &["http", "https"];

/// Ports dropped from canonical URLs when they match the scheme.
const DEFAULT_PORTS: &[(&str, &str)] = &[("http", "80"), ("https", "443")];

/// Map a scheme to its disposition.
///
/// Matching is case-insensitive. A scheme found in neither table is
/// canonicalized only when an authority (`//`) followed it, so opaque
/// identifiers that merely contain a colon are never mangled.
///
/// # Examples
///
/// ```
/// use surtkey::{classify_scheme, Disposition};
///
/// assert_eq!(classify_scheme("HTTP", true), Disposition::Canonicalize);
/// assert_eq!(classify_scheme("filedesc", true), Disposition::Passthrough);
/// assert_eq!(classify_scheme("x-custom", false), Disposition::Passthrough);
/// ```
pub fn classify_scheme(scheme: &str, has_authority: bool) -> Disposition {
    if in_table(PASSTHROUGH_SCHEMES, scheme) {
        Disposition::Passthrough
    } else if in_table(CANONICALIZE_SCHEMES, scheme) || has_authority {
        Disposition::Canonicalize
    } else {
        Disposition::Passthrough
    }
}

/// Whether `scheme` is `http` or `https`, ignoring case.
pub fn is_web_scheme(scheme: &str) -> bool {
    in_table(WEB_SCHEMES, scheme)
}

/// Whether `port` is the default port of `scheme` (`http:80`, `https:443`).
pub fn is_default_port(scheme: &str, port: &str) -> bool {
    DEFAULT_PORTS
        .iter()
        .any(|(known, default)| known.eq_ignore_ascii_case(scheme) && *default == port)
}

fn in_table(table: &[&str], scheme: &str) -> bool {
    table.iter().any(|known| known.eq_ignore_ascii_case(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_schemes() {
        for scheme in ["filedesc", "warcinfo", "dns", "mailto", "MAILTO", "urn"] {
            assert_eq!(classify_scheme(scheme, false), Disposition::Passthrough, "{}", scheme);
            assert_eq!(classify_scheme(scheme, true), Disposition::Passthrough, "{}", scheme);
        }
    }

    #[test]
    fn test_canonicalize_schemes() {
        for scheme in ["http", "https", "HTTPS", "ftp", "whois"] {
            assert_eq!(classify_scheme(scheme, true), Disposition::Canonicalize, "{}", scheme);
            assert_eq!(classify_scheme(scheme, false), Disposition::Canonicalize, "{}", scheme);
        }
    }

    #[test]
    fn test_unknown_scheme_depends_on_authority() {
        assert_eq!(classify_scheme("irc", true), Disposition::Canonicalize);
        assert_eq!(classify_scheme("irc", false), Disposition::Passthrough);
    }

    #[test]
    fn test_web_scheme() {
        assert!(is_web_scheme("http"));
        assert!(is_web_scheme("HTTPS"));
        assert!(!is_web_scheme("ftp"));
    }

    #[test]
    fn test_default_port() {
        assert!(is_default_port("http", "80"));
        assert!(is_default_port("HTTPS", "443"));
        assert!(!is_default_port("http", "443"));
        assert!(!is_default_port("https", "80"));
        assert!(!is_default_port("ftp", "21"));
    }
}
