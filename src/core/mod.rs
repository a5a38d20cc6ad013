//! Core SURT canonicalization.
//!
//! This module contains the canonicalizers and the key assembler:
//! - Host canonicalization (lowercasing, `www` massage, IPv4 detection)
//! - Path canonicalization
//! - Query canonicalization (session-id stripping, sorting, re-escaping)
//! - Final key assembly

pub mod assembler;
pub mod host;
pub mod path;
pub mod query;

// Re-export main functionality
pub use assembler::{assemble, compute_surt, compute_surt_bytes, surt, SENTINEL};
pub use host::canonicalize_host;
pub use path::canonicalize_path;
pub use query::{canonicalize_query, is_session_id_param, parse_query_params, strip_session_ids};
