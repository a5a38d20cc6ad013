//! surtkey - Sort-friendly URI Reordering Transform keys
//!
//! A SURT key reorders a URL's authority so that URLs of the same domain sort
//! next to each other, and normalizes path and query so that cosmetically
//! different but equivalent URLs share a key. Web-archive and crawl indexes
//! (CDX files and friends) store records under these keys.
//!
//! # Features
//!
//! - **Sort-friendly**: hosts are reversed (`www.archive.org` → `org,archive`)
//! - **Deduplicating**: `www` dropped, query sorted, session ids stripped
//! - **Permissive**: almost any input yields a key; only a few structural
//!   problems are errors
//! - **Pure**: no I/O, no shared state, safe to call from any thread
//!
//! # Quick Start
//!
//! ```
//! use surtkey::{compute_surt, surt, CanonicalizationOptions};
//!
//! assert_eq!(surt("http://www.archive.org/")?, "org,archive)/");
//! assert_eq!(surt("http://archive.org/goo/?a=2&b&a=1")?, "org,archive)/goo?a=1&a=2&b");
//! assert_eq!(surt("dns:archive.org")?, "dns:archive.org");
//!
//! let options = CanonicalizationOptions::default()
//!     .with_scheme(true)
//!     .trailing_comma(true);
//! assert_eq!(
//!     compute_surt(Some("https://www.example.com/"), &options)?,
//!     "https://(com,example,)/"
//! );
//! # Ok::<(), surtkey::SurtError>(())
//! ```
//!
//! # Key Format
//!
//! | Part   | Example            | Notes                                        |
//! |--------|--------------------|----------------------------------------------|
//! | scheme | `http://(`         | only with `with_scheme`                      |
//! | host   | `org,archive`      | reversed labels; IPv4 stays dot-joined       |
//! | `)`    | `)`                | always present                               |
//! | path   | `/goo`             | lowercased, trailing `/` dropped             |
//! | query  | `?a=1&a=2&b`       | sorted, session ids removed                  |
//!
//! Setting `surt` to `false` returns the canonical URL (`archive.org/goo`)
//! instead of a key. The other toggles of [`CanonicalizationOptions`] switch
//! individual path and query rules off.
//!
//! # Error Handling
//!
//! All functions return `Result<T, SurtError>`:
//!
//! - Input without a scheme (`archive.org/goo`)
//! - An unterminated bracketed host (`http://[::1/x`)
//! - A host that decodes to invalid UTF-8

// Re-export main functions
pub use crate::core::{compute_surt, compute_surt_bytes, surt, assemble, SENTINEL};

// Re-export canonicalizers
pub use crate::core::{
    canonicalize_host, canonicalize_path, canonicalize_query,
    is_session_id_param, parse_query_params, strip_session_ids,
};

// Re-export URI utilities
pub use crate::url::{classify_scheme, clean_input, is_default_port, split_scheme, split_uri};

// Re-export public types
pub use error::SurtError;
pub use types::{Authority, CanonicalizationOptions, Disposition, HostKey, ParsedUri, QueryParam};

// Module declarations
pub mod error;
pub mod types;
pub mod core;
pub mod url;
