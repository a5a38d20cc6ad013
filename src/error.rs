//! Error types for SURT key computation.

use thiserror::Error;

/// Errors that can occur while turning a URI into a SURT key.
///
/// Parsing is permissive: most malformed input still yields a (possibly
/// degenerate) key. These variants cover the few structural cases that
/// cannot produce one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurtError {
    /// The input needs canonicalization but carries no `scheme:` prefix.
    #[error("NoSchemeFoundError: expected scheme to be present in URL")]
    NoSchemeFound,

    /// The authority or host could not be split (e.g. an unterminated `[` literal).
    #[error("UrlParseError: {0}")]
    UrlParse(String),

    /// Host or query canonicalization failed.
    #[error("CanonicalizerError: {0}")]
    Canonicalizer(String),
}

impl From<std::str::Utf8Error> for SurtError {
    fn from(err: std::str::Utf8Error) -> Self {
        SurtError::Canonicalizer(format!("input is not UTF-8 encoded: {}", err))
    }
}
