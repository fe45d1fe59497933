//! Error types for extraction.

use thiserror::Error;

use crate::value::Kind;

/// Errors that abort an extraction call.
///
/// Extraction is all-or-nothing: every error propagates to the
/// [`extract_fields`](crate::Extractor::extract_fields) caller and no
/// partial result is returned. Cycle revisits are not errors - they are
/// silent truncation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The root argument was not a record or a single-level reference to
    /// one.
    #[error("needs a record or reference to a record, got: {0}")]
    InvalidRoot(Kind),

    /// A recognized annotation key was present but no well-formed
    /// `key:"value"` attribute could be extracted. Name resolution for the
    /// subtree below the field would be undefined, so the whole call fails.
    #[error("failed to extract `{key}` tag value from: {tag}")]
    TagParse { key: &'static str, tag: String },
}
