//! Preflight checks and suggestion generation.
//!
//! A preflight check is an `(input, expected-output)` pair asserted at
//! startup: if the deployed configuration no longer reproduces the pair,
//! the identifiers already in the wild would stop round-tripping, and the
//! process should refuse to start. [`generate_suggestions`] produces the
//! boundary pairs worth pinning, and the [`format`] registry renders them
//! ready to paste into a configuration file.

pub mod format;

pub use format::{Formatter, FormatterRegistry, JsonFormatter, OutputFormat, TomlFormatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{CodecError, PhoneticEncoder};

/// One startup assertion: `encode(input)` must equal `output`, and
/// `decode(output)` must equal `input`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreflightCheck {
    /// The integer side of the pair.
    pub input: u64,
    /// The word side of the pair.
    pub output: String,
}

impl PreflightCheck {
    /// Convenience constructor.
    pub fn new(input: u64, output: impl Into<String>) -> Self {
        PreflightCheck {
            input,
            output: output.into(),
        }
    }
}

/// Errors produced by preflight validation and suggestion generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreflightError {
    /// The check list is empty; at least one check is required.
    #[error("at least one preflight check is required")]
    Empty,

    /// Encoding the check's input failed outright.
    #[error("preflight[{index}]: encode({input}) failed: {source}")]
    EncodeFailed {
        /// Zero-based check index.
        index: usize,
        /// The input that failed to encode.
        input: u64,
        /// The underlying codec error.
        source: CodecError,
    },

    /// Encoding produced a different word than expected.
    #[error("preflight[{index}]: encode({input}) = {got:?}, want {want:?}")]
    EncodeMismatch {
        /// Zero-based check index.
        index: usize,
        /// The input that was encoded.
        input: u64,
        /// The word actually produced.
        got: String,
        /// The word the check expected.
        want: String,
    },

    /// Decoding the check's output failed outright.
    #[error("preflight[{index}]: decode({output:?}) failed: {source}")]
    DecodeFailed {
        /// Zero-based check index.
        index: usize,
        /// The word that failed to decode.
        output: String,
        /// The underlying codec error.
        source: CodecError,
    },

    /// Decoding produced a different value than expected.
    #[error("preflight[{index}]: decode({output:?}) = {got}, want {want}")]
    DecodeMismatch {
        /// Zero-based check index.
        index: usize,
        /// The word that was decoded.
        output: String,
        /// The value actually produced.
        got: u64,
        /// The value the check expected.
        want: u64,
    },

    /// Suggestion generation could not encode a boundary value.
    #[error("failed to encode suggestion input {input}: {source}")]
    SuggestionFailed {
        /// The boundary value.
        input: u64,
        /// The underlying codec error.
        source: CodecError,
    },
}

/// A suggested preflight check, with a comment describing the boundary it
/// pins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assertion {
    /// The integer side of the pair.
    pub input: u64,
    /// The word side of the pair.
    pub expect: String,
    /// Human-readable description, e.g. `"Lower boundary"`.
    pub comment: String,
}

/// An ordered collection of suggested assertions.
pub type AssertionTable = Vec<Assertion>;

/// Generate boundary assertions for an encoder.
///
/// Two assertions cover the smallest pattern: the lower boundary `0` and
/// the upper boundary `capacity − 1`. Pinning the boundaries catches both
/// alphabet reordering (which moves every word) and capacity drift (which
/// moves the upper boundary into another pattern).
///
/// # Errors
///
/// [`PreflightError::Empty`] when the encoder has no capacity, or
/// [`PreflightError::SuggestionFailed`] when a boundary cannot be
/// encoded.
pub fn generate_suggestions(encoder: &PhoneticEncoder) -> Result<AssertionTable, PreflightError> {
    let capacity = encoder.smallest_pattern_capacity();
    if capacity == 0 {
        return Err(PreflightError::Empty);
    }

    let mut suggestions = AssertionTable::new();
    push_suggestion(&mut suggestions, encoder, 0, "Lower boundary")?;
    push_suggestion(
        &mut suggestions,
        encoder,
        (capacity - 1) as u64,
        "Upper boundary (single word)",
    )?;

    Ok(suggestions)
}

fn push_suggestion(
    suggestions: &mut AssertionTable,
    encoder: &PhoneticEncoder,
    input: u64,
    comment: &str,
) -> Result<(), PreflightError> {
    let expect = encoder
        .encode(input)
        .map_err(|source| PreflightError::SuggestionFailed { input, source })?;
    suggestions.push(Assertion {
        input,
        expect,
        comment: comment.to_owned(),
    });
    Ok(())
}
