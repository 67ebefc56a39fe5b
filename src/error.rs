//! Core error types.
//!
//! Expected business conditions (ineligible wishes, invalid donation records)
//! are expressed as data — `Reject`/`Review` outcomes or a populated
//! `ValidationReport` — never as errors. The only fallible operation in the
//! crate is building a verifier policy from caller-supplied patterns.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid suspicious-content pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
