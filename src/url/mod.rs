//! URI decomposition utilities.
//!
//! This module contains the lexical layer under the canonicalizers:
//! - Permissive URI splitting
//! - Scheme classification
//! - Percent-escape decoding and minimal re-encoding
//! - Public Suffix List lookups

pub mod percent;
pub mod psl;
pub mod scheme;
pub mod split;

// Re-export main functionality
pub use percent::{escape_host_label, escape_query_value, lowercase_escapes, percent_decode_bytes, percent_decode_utf8};
pub use psl::registrable_domain;
pub use scheme::{classify_scheme, is_default_port, is_web_scheme};
pub use split::{clean_input, parse_authority, split_scheme, split_uri};
