//! Core data structures shared by the splitter, canonicalizers and assembler.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options that change how a SURT key is built and presented.
///
/// Every field has a default, so callers only set what they want to change.
/// With the `serde` feature enabled a partial JSON document such as
/// `{"with_scheme": true}` deserializes with the remaining fields defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CanonicalizationOptions {
    /// Wrap the host token as `scheme://(...)`.
    pub with_scheme: bool,
    /// Drop a leading `www` label from the host.
    pub host_massage: bool,
    /// Append an extra `,` after the last host segment.
    pub trailing_comma: bool,
    /// Reverse the octets of an IPv4 literal host.
    pub reverse_ipaddr: bool,
    /// Reduce the host to its registrable domain (Public Suffix List).
    pub public_suffix: bool,
    /// Emit a SURT key. When off, emit the canonical URL instead.
    pub surt: bool,
    /// Lowercase the whole path, not only its escapes.
    pub path_lowercase: bool,
    /// Remove ASP.NET cookieless session segments from `.aspx` paths.
    pub path_strip_session_id: bool,
    /// Drop a trailing `/` unless the path is just `/`.
    pub path_strip_trailing_slash_unless_empty: bool,
    /// Lowercase query keys and decoded values.
    pub query_lowercase: bool,
    /// Sort query parameters.
    pub query_alpha_reorder: bool,
    /// Remove parameters carrying a recognised session id.
    pub query_strip_session_id: bool,
    /// Omit the `?` when no query text is left.
    pub query_strip_empty: bool,
}

impl Default for CanonicalizationOptions {
    fn default() -> Self {
        Self {
            with_scheme: false,
            host_massage: true,
            trailing_comma: false,
            reverse_ipaddr: true,
            public_suffix: false,
            surt: true,
            path_lowercase: true,
            path_strip_session_id: true,
            path_strip_trailing_slash_unless_empty: true,
            query_lowercase: true,
            query_alpha_reorder: true,
            query_strip_session_id: true,
            query_strip_empty: true,
        }
    }
}

impl CanonicalizationOptions {
    /// Create options with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scheme(mut self, value: bool) -> Self {
        self.with_scheme = value;
        self
    }

    pub fn host_massage(mut self, value: bool) -> Self {
        self.host_massage = value;
        self
    }

    pub fn trailing_comma(mut self, value: bool) -> Self {
        self.trailing_comma = value;
        self
    }

    pub fn reverse_ipaddr(mut self, value: bool) -> Self {
        self.reverse_ipaddr = value;
        self
    }

    pub fn public_suffix(mut self, value: bool) -> Self {
        self.public_suffix = value;
        self
    }

    pub fn surt(mut self, value: bool) -> Self {
        self.surt = value;
        self
    }

    pub fn path_lowercase(mut self, value: bool) -> Self {
        self.path_lowercase = value;
        self
    }

    pub fn path_strip_session_id(mut self, value: bool) -> Self {
        self.path_strip_session_id = value;
        self
    }

    pub fn path_strip_trailing_slash_unless_empty(mut self, value: bool) -> Self {
        self.path_strip_trailing_slash_unless_empty = value;
        self
    }

    pub fn query_lowercase(mut self, value: bool) -> Self {
        self.query_lowercase = value;
        self
    }

    pub fn query_alpha_reorder(mut self, value: bool) -> Self {
        self.query_alpha_reorder = value;
        self
    }

    pub fn query_strip_session_id(mut self, value: bool) -> Self {
        self.query_strip_session_id = value;
        self
    }

    pub fn query_strip_empty(mut self, value: bool) -> Self {
        self.query_strip_empty = value;
        self
    }
}

/// What the assembler does with a URI, decided by its scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Opaque identifier: the original input is returned unchanged.
    Passthrough,
    /// Host-based URI: host, path and query are canonicalized.
    Canonicalize,
}

/// The authority part of a URI (`userinfo@host:port`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Authority {
    /// Everything before the last `@`, if any
    pub userinfo: Option<String>,
    /// Host substring, brackets kept for IP literals (may be empty)
    pub host: String,
    /// Port text after the host's `:`, if non-empty
    pub port: Option<String>,
}

/// A URI split into its lexical components.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedUri {
    /// Scheme as written (http, dns, whois), `None` if the input has none
    pub scheme: Option<String>,
    /// Present only when the scheme was followed by `//`
    pub authority: Option<Authority>,
    /// Path, or the opaque remainder for non-hierarchical URIs
    pub path: String,
    /// Query without the `?` (may be empty when a bare `?` was present)
    pub query: Option<String>,
    /// Fragment without the `#`
    pub fragment: Option<String>,
}

impl ParsedUri {
    /// Host substring of the authority, or `""` when there is none.
    pub fn host(&self) -> &str {
        self.authority.as_ref().map(|a| a.host.as_str()).unwrap_or("")
    }
}

/// A canonicalized host, ready to be rendered into the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostKey {
    /// DNS labels in original left-to-right order, lowercased.
    Labels(Vec<String>),
    /// Octets of an IPv4 literal in original order.
    Ipv4([u8; 4]),
    /// A bracketed IP literal (`[::1]`), kept verbatim.
    Bracketed(String),
}

/// One `key=value` token of a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub key: String,
    /// `None` when the token had no `=`
    pub value: Option<String>,
}

impl QueryParam {
    pub fn new(key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        Self {
            key: key.into(),
            value: value.map(Into::into),
        }
    }
}
