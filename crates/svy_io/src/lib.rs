//! svy_io - input loading and artifact emission for the survey engine.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Wire types for the two hand-authored inputs (survey design, response
//!   batches) with strict shapes (`deny_unknown_fields`).
//! - Canonical JSON bytes + SHA-256 fingerprints + atomic file writes.
//!
//! Strictly offline: loaders reject anything that looks like a URL.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for svy_io (used by design/responses/canonical).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem read errors.
    #[error("read error: {0}")]
    Read(String),

    /// Filesystem write errors (temp file, fsync, rename).
    #[error("write error: {0}")]
    Write(String),

    /// JSON serialization/deserialization errors with an optional JSON Pointer.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Survey-design domain violations found at load time.
    #[error("design error: {0}")]
    Design(String),

    /// Response-batch domain violations found at load time.
    #[error("responses error: {0}")]
    Responses(String),

    /// Path policy violations (URLs, missing files, directories).
    #[error("path error: {0}")]
    Path(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Read(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json doesn't keep a pointer; report root and let callers
        // enrich at higher layers.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
/// Loaders use this to enforce the offline posture early.
#[inline]
pub fn looks_like_url(s: &str) -> bool {
    s.trim().contains("://")
}

pub mod canonical;
pub mod design;
pub mod responses;

pub mod prelude {
    pub use crate::canonical::{canonical_json_bytes, fingerprint, sha256_hex, write_canonical_file};
    pub use crate::design::{load_design, parse_design, AreaDesign, SurveyDesign};
    pub use crate::responses::{load_responses, parse_responses, QuestionResponses, ResponsesFile};
    pub use crate::{IoError, IoResult};
}
