//! Public Suffix List integration for registrable-domain reduction.

use psl::{List, Psl};

/// Return the registrable domain of `host` (`www.images.amazon.co.uk` gives
/// `amazon.co.uk`).
///
/// Falls back to the two rightmost labels when the list has no answer.
/// Returns `None` for hosts with fewer than two labels.
pub fn registrable_domain(host: &str) -> Option<&str> {
    if let Some(domain) = List.domain(host.as_bytes()) {
        let len = domain.as_bytes().len();
        // the list returns a suffix of the input
        if len <= host.len() {
            return host.get(host.len() - len..);
        }
    }

    registrable_fallback(host)
}

/// Rightmost label as suffix, one label before it as the domain.
fn registrable_fallback(host: &str) -> Option<&str> {
    let last_dot = host.rfind('.')?;
    match host[..last_dot].rfind('.') {
        Some(dot) => Some(&host[dot + 1..]),
        None if last_dot > 0 => Some(host),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_domain() {
        assert_eq!(registrable_domain("www.fool.com"), Some("fool.com"));
        assert_eq!(registrable_domain("example.com"), Some("example.com"));
    }

    #[test]
    fn test_complex_suffix() {
        assert_eq!(registrable_domain("www.amazon.co.uk"), Some("amazon.co.uk"));
        assert_eq!(
            registrable_domain("www.images.amazon.co.uk"),
            Some("amazon.co.uk")
        );
        assert_eq!(
            registrable_domain("funky-images.fancy.co.jp"),
            Some("fancy.co.jp")
        );
    }

    #[test]
    fn test_fallback() {
        assert_eq!(registrable_fallback("test.example.com"), Some("example.com"));
        assert_eq!(registrable_fallback("example.com"), Some("example.com"));
        assert_eq!(registrable_fallback("com"), None);
    }

    #[test]
    fn test_single_label() {
        assert_eq!(registrable_domain("com"), None);
    }
}
