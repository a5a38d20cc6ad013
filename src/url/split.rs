//! Permissive URI splitting.
//!
//! The splitter never validates against the full RFC 3986 grammar. It finds
//! the scheme, an optional authority, path, query and fragment with simple
//! lexical rules so that almost any input yields some [`ParsedUri`]. The one
//! structural failure is an unterminated bracketed host literal.

use crate::error::SurtError;
use crate::types::{Authority, ParsedUri};
use crate::url::scheme::is_web_scheme;

const WEB_PREFIXES: &[&str] = &["http://", "https://"];

/// Tidy raw input before it is split.
///
/// Surrounding whitespace is trimmed, embedded tabs and line breaks are
/// removed, and a run of repeated web prefixes keeps only the last one
/// (`http://https://host` becomes `https://host`).
///
/// ```
/// use surtkey::clean_input;
///
/// assert_eq!(clean_input("  http://https://order.1and1.com\n"), "https://order.1and1.com");
/// ```
pub fn clean_input(input: &str) -> String {
    let mut cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();

    while let Some(first) = web_prefix_len(&cleaned) {
        if web_prefix_len(&cleaned[first..]).is_none() {
            break;
        }
        cleaned.drain(..first);
    }

    cleaned
}

fn web_prefix_len(s: &str) -> Option<usize> {
    WEB_PREFIXES.iter().find_map(|prefix| {
        s.get(..prefix.len())
            .filter(|head| head.eq_ignore_ascii_case(prefix))
            .map(|_| prefix.len())
    })
}

/// Split off the scheme.
///
/// Returns the scheme (without `:`) and the remainder. When the text before
/// the first `:` is not a syntactically valid scheme the whole input is
/// returned as the remainder.
pub fn split_scheme(input: &str) -> (Option<&str>, &str) {
    if let Some(colon) = input.find(':') {
        let candidate = &input[..colon];
        if is_valid_scheme(candidate) {
            return (Some(candidate), &input[colon + 1..]);
        }
    }
    (None, input)
}

fn is_valid_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Split a URI into scheme, authority, path, query and fragment.
///
/// Userinfo is everything before the last `@` of the authority and the port
/// is whatever follows the host's `:`. For `http`/`https` an empty or
/// missing authority is recovered from the first path segment, so
/// `http:////www.vikings.com` still has a host.
///
/// # Errors
///
/// Returns [`SurtError::UrlParse`] when a bracketed host literal has no
/// closing `]`.
///
/// # Examples
///
/// ```
/// use surtkey::split_uri;
///
/// let uri = split_uri("http://user:pw@www.archive.org:8080/goo/?a=1#top").unwrap();
/// assert_eq!(uri.scheme.as_deref(), Some("http"));
/// assert_eq!(uri.host(), "www.archive.org");
/// assert_eq!(uri.path, "/goo/");
/// assert_eq!(uri.query.as_deref(), Some("a=1"));
/// assert_eq!(uri.fragment.as_deref(), Some("top"));
/// ```
pub fn split_uri(input: &str) -> Result<ParsedUri, SurtError> {
    let (scheme, rest) = split_scheme(input);
    let web = scheme.is_some_and(is_web_scheme);

    let (authority_text, remainder) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after
                .find(|c| matches!(c, '/' | '?' | '#'))
                .unwrap_or(after.len());
            (Some(&after[..end]), &after[end..])
        }
        None => (None, rest),
    };

    let mut authority = authority_text.map(parse_authority).transpose()?;

    let (mut path, query, fragment) = if authority.is_some() || web {
        split_path_query(remainder)
    } else {
        (remainder.to_string(), None, None)
    };

    if web && authority.as_ref().map_or(true, |a| a.host.is_empty()) {
        let trimmed = path.trim_start_matches('/');
        if !trimmed.is_empty() {
            let (host_text, rest_path) = match trimmed.find('/') {
                Some(slash) => (&trimmed[..slash], &trimmed[slash..]),
                None => (trimmed, ""),
            };
            authority = Some(parse_authority(host_text)?);
            path = rest_path.to_string();
        }
    }

    Ok(ParsedUri {
        scheme: scheme.map(str::to_string),
        authority,
        path,
        query,
        fragment,
    })
}

/// Parse `userinfo@host:port`, keeping brackets on IP literals.
pub fn parse_authority(text: &str) -> Result<Authority, SurtError> {
    let (userinfo, hostport) = match text.rfind('@') {
        Some(at) => (Some(text[..at].to_string()), &text[at + 1..]),
        None => (None, text),
    };

    let (host, port) = if let Some(inner) = hostport.strip_prefix('[') {
        let close = inner.find(']').ok_or_else(|| {
            SurtError::UrlParse(format!("unterminated IP literal in authority '{}'", text))
        })?;
        (&hostport[..close + 2], inner[close + 1..].strip_prefix(':'))
    } else {
        match hostport.find(':') {
            Some(colon) => (&hostport[..colon], Some(&hostport[colon + 1..])),
            None => (hostport, None),
        }
    };

    Ok(Authority {
        userinfo,
        host: host.to_string(),
        port: port.filter(|p| !p.is_empty()).map(str::to_string),
    })
}

fn split_path_query(text: &str) -> (String, Option<String>, Option<String>) {
    let (before_fragment, fragment) = match text.find('#') {
        Some(hash) => (&text[..hash], Some(text[hash + 1..].to_string())),
        None => (text, None),
    };
    let (path, query) = match before_fragment.find('?') {
        Some(question) => (
            &before_fragment[..question],
            Some(before_fragment[question + 1..].to_string()),
        ),
        None => (before_fragment, None),
    };
    (path.to_string(), query, fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_full_uri() {
        let uri = split_uri("http://www.ics.uci.edu/pub/ietf/uri/#Related").unwrap();
        assert_eq!(
            uri,
            ParsedUri {
                scheme: Some("http".to_string()),
                authority: Some(Authority {
                    userinfo: None,
                    host: "www.ics.uci.edu".to_string(),
                    port: None,
                }),
                path: "/pub/ietf/uri/".to_string(),
                query: None,
                fragment: Some("Related".to_string()),
            }
        );
    }

    #[test]
    fn test_split_userinfo_and_port() {
        let uri = split_uri("https://user:p@ss@example.com:8443/x").unwrap();
        let authority = uri.authority.unwrap();
        assert_eq!(authority.userinfo.as_deref(), Some("user:p@ss"));
        assert_eq!(authority.host, "example.com");
        assert_eq!(authority.port.as_deref(), Some("8443"));
        assert_eq!(uri.path, "/x");
    }

    #[test]
    fn test_split_empty_port() {
        let uri = split_uri("http://mineral.galleries.com:/minerals/chabazit.htm").unwrap();
        let authority = uri.authority.unwrap();
        assert_eq!(authority.host, "mineral.galleries.com");
        assert_eq!(authority.port, None);
        assert_eq!(uri.path, "/minerals/chabazit.htm");
    }

    #[test]
    fn test_split_bare_question_mark() {
        let uri = split_uri("http://archive.org/goo/?").unwrap();
        assert_eq!(uri.query.as_deref(), Some(""));
        assert_eq!(uri.path, "/goo/");
    }

    #[test]
    fn test_split_query_without_path() {
        let uri = split_uri("http://archive.org?a=1").unwrap();
        assert_eq!(uri.host(), "archive.org");
        assert_eq!(uri.path, "");
        assert_eq!(uri.query.as_deref(), Some("a=1"));
    }

    #[test]
    fn test_split_opaque() {
        let uri = split_uri("mailto:foo@example.com?subject=hi").unwrap();
        assert_eq!(uri.scheme.as_deref(), Some("mailto"));
        assert!(uri.authority.is_none());
        assert_eq!(uri.path, "foo@example.com?subject=hi");
        assert_eq!(uri.query, None);
    }

    #[test]
    fn test_split_recovers_web_host() {
        let uri = split_uri("http:////////////////www.vikings.com").unwrap();
        assert_eq!(uri.host(), "www.vikings.com");
        assert_eq!(uri.path, "");

        let uri = split_uri("http:archive.org/goo").unwrap();
        assert_eq!(uri.host(), "archive.org");
        assert_eq!(uri.path, "/goo");
    }

    #[test]
    fn test_split_bracketed_host() {
        let uri = split_uri("http://[2001:DB8::1]:8080/x").unwrap();
        let authority = uri.authority.unwrap();
        assert_eq!(authority.host, "[2001:DB8::1]");
        assert_eq!(authority.port.as_deref(), Some("8080"));
    }

    #[test]
    fn test_split_unterminated_bracket() {
        let result = split_uri("http://[::1/path");
        assert!(matches!(result, Err(SurtError::UrlParse(_))));
    }

    #[test]
    fn test_split_scheme_validation() {
        assert_eq!(split_scheme("dns:archive.org"), (Some("dns"), "archive.org"));
        assert_eq!(split_scheme("archive.org/x"), (None, "archive.org/x"));
        assert_eq!(split_scheme("1http://x"), (None, "1http://x"));
        assert_eq!(split_scheme("/a:b"), (None, "/a:b"));
        assert_eq!(split_scheme("svn+ssh://h"), (Some("svn+ssh"), "//h"));
    }

    #[test]
    fn test_clean_input() {
        assert_eq!(clean_input("http://www.archive.org/"), "http://www.archive.org/");
        assert_eq!(clean_input("  http://a.org/\t\r\n"), "http://a.org/");
        assert_eq!(clean_input("http://https://order.1and1.com"), "https://order.1and1.com");
        assert_eq!(clean_input("http://http://http://a.org"), "http://a.org");
        assert_eq!(clean_input("dns:archive.org"), "dns:archive.org");
    }
}
