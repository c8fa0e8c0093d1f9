//! Integer/word conversion.
//!
//! [`PatternCodec`] converts between integers and words for a single
//! pattern; [`PhoneticEncoder`] owns one codec per configured pattern and
//! dispatches each call to the right one: encoding picks the smallest
//! pattern that fits the value, decoding picks the pattern whose length
//! matches the word. Pattern lengths are unique by validation, so both
//! choices are unambiguous.

mod pattern;

pub use pattern::{PatternCodec, Position};

use thiserror::Error;

use crate::config::{ConfigError, PhoneticConfig};
use crate::preflight::{PreflightCheck, PreflightError};

/// Errors produced while encoding or decoding words.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The value exceeds the capacity of every available pattern.
    #[error("number {value} exceeds maximum {max}")]
    OutOfRange {
        /// The value that was offered.
        value: u64,
        /// The largest encodable value.
        max: u64,
    },

    /// The word's code-point count differs from the pattern length.
    #[error("word length {got} does not match pattern length {want}")]
    LengthMismatch {
        /// Code points in the word.
        got: usize,
        /// Slots in the pattern.
        want: usize,
    },

    /// A code point is not a member of its slot's alphabet.
    #[error("character '{rune}' at position {position} is not valid for placeholder '{tag}'")]
    InvalidRune {
        /// The offending code point.
        rune: char,
        /// Zero-based slot index.
        position: usize,
        /// The class tag owning the slot.
        tag: crate::alphabet::ClassTag,
    },

    /// No configured pattern has this length.
    #[error("word length {got} does not match any pattern")]
    UnknownLength {
        /// Code points in the word.
        got: usize,
    },
}

/// Converts integers to pronounceable words and back.
///
/// Owns its pattern codecs exclusively, sorted ascending by capacity.
/// Immutable after construction and safe to share across threads.
///
/// # Example
///
/// ```rust
/// use phonid::config::PhoneticConfig;
/// use phonid::codec::PhoneticEncoder;
///
/// let encoder = PhoneticEncoder::new(&PhoneticConfig::default())?;
/// let word = encoder.encode(4711)?;
/// assert_eq!(encoder.decode(&word)?, 4711);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct PhoneticEncoder {
    config: PhoneticConfig,
    /// Sorted ascending by capacity; ties are rejected at construction.
    codecs: Vec<PatternCodec>,
}

impl PhoneticEncoder {
    /// Build an encoder from a phonetic configuration.
    ///
    /// The configuration is validated first; an empty pattern list or
    /// class map falls back to the documented defaults.
    ///
    /// # Errors
    ///
    /// Any validation failure from
    /// [`PhoneticConfig::validate`], or
    /// [`ConfigError::DuplicateCapacity`] when two patterns of different
    /// lengths coincide in capacity (encoding could then not pick a
    /// unique pattern order).
    pub fn new(config: &PhoneticConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let classes = config.effective_classes();
        let mut codecs = config
            .effective_patterns()
            .iter()
            .map(|pattern| PatternCodec::new(pattern, &classes))
            .collect::<Result<Vec<_>, _>>()?;

        codecs.sort_by_key(PatternCodec::capacity);

        for pair in codecs.windows(2) {
            if pair[0].capacity() == pair[1].capacity() {
                return Err(ConfigError::DuplicateCapacity {
                    capacity: pair[0].capacity(),
                    first: pair[0].pattern().to_owned(),
                    second: pair[1].pattern().to_owned(),
                });
            }
        }

        Ok(PhoneticEncoder {
            config: config.clone(),
            codecs,
        })
    }

    /// Encode `value`, choosing the smallest pattern whose capacity
    /// exceeds it.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::OutOfRange`] when the value exceeds the
    /// capacity of the largest pattern.
    pub fn encode(&self, value: u64) -> Result<String, CodecError> {
        for codec in &self.codecs {
            if u128::from(value) < codec.capacity() {
                return codec.encode(value);
            }
        }
        Err(CodecError::OutOfRange {
            value,
            max: self.max_value(),
        })
    }

    /// Decode a word, choosing the pattern whose length matches its
    /// code-point count.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownLength`] when no pattern has the
    /// word's length; otherwise whatever the matching codec reports.
    pub fn decode(&self, word: &str) -> Result<u64, CodecError> {
        let length = word.chars().count();
        for codec in &self.codecs {
            if codec.length() == length {
                return codec.decode(word);
            }
        }
        Err(CodecError::UnknownLength { got: length })
    }

    /// Capacity of the smallest pattern.
    pub fn smallest_pattern_capacity(&self) -> u128 {
        self.codecs.first().map_or(0, PatternCodec::capacity)
    }

    /// Largest encodable value across all patterns.
    pub fn max_value(&self) -> u64 {
        self.codecs.last().map_or(0, PatternCodec::max_value)
    }

    /// Capacity of the largest pattern.
    pub(crate) fn largest_capacity(&self) -> u128 {
        self.codecs.last().map_or(0, PatternCodec::capacity)
    }

    /// The codecs, ascending by capacity.
    pub fn codecs(&self) -> &[PatternCodec] {
        &self.codecs
    }

    /// The configuration this encoder was built from.
    pub fn config(&self) -> &PhoneticConfig {
        &self.config
    }

    /// Assert a list of `(input, output)` checks in both directions.
    ///
    /// Intended to run at startup so configuration drift is caught before
    /// any identifier is issued.
    ///
    /// # Errors
    ///
    /// Returns [`PreflightError::Empty`] on an empty list, and a mismatch
    /// or failure error naming the check index otherwise.
    pub fn validate_preflight(&self, checks: &[PreflightCheck]) -> Result<(), PreflightError> {
        if checks.is_empty() {
            return Err(PreflightError::Empty);
        }

        for (index, check) in checks.iter().enumerate() {
            let encoded = self
                .encode(check.input)
                .map_err(|source| PreflightError::EncodeFailed {
                    index,
                    input: check.input,
                    source,
                })?;
            if encoded != check.output {
                return Err(PreflightError::EncodeMismatch {
                    index,
                    input: check.input,
                    got: encoded,
                    want: check.output.clone(),
                });
            }

            let decoded = self
                .decode(&check.output)
                .map_err(|source| PreflightError::DecodeFailed {
                    index,
                    output: check.output.clone(),
                    source,
                })?;
            if decoded != check.input {
                return Err(PreflightError::DecodeMismatch {
                    index,
                    output: check.output.clone(),
                    got: decoded,
                    want: check.input,
                });
            }
        }

        Ok(())
    }
}
