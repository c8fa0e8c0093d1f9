//! Configuration model, validation and the build entry point.
//!
//! [`Config`] glues the phonetic side (patterns + class alphabets) to the
//! shuffle side (seed, rounds, bit width). [`Config::build`] validates
//! everything and returns a ready [`PhoneticEncoder`] /
//! [`FeistelShuffler`] pair. The two stages are deliberately *not*
//! composed here; callers chain them as
//! `encoder.encode(shuffler.encode(n)?)` — the build only guarantees
//! that the shuffler's domain covers the word space:
//!
//! ```rust
//! use phonid::alphabet::{CharSet, ClassMap, ClassTag};
//! use phonid::config::{ConfigBuilder, PhoneticConfig};
//!
//! // 4 consonants * 4 vowels * 4 consonants = 64 words = a 6-bit domain,
//! // so every shuffled value has a word.
//! let mut placeholders = ClassMap::new();
//! placeholders.insert(ClassTag::Consonant, CharSet::from("bdkt"));
//! placeholders.insert(ClassTag::Vowel, CharSet::from("aeio"));
//!
//! let (encoder, shuffler) = ConfigBuilder::new()
//!     .with_phonetic(PhoneticConfig {
//!         patterns: vec!["CVC".into()],
//!         placeholders,
//!     })
//!     .with_seed(42)
//!     .with_rounds(4)
//!     .build()?;
//!
//! let word = encoder.encode(shuffler.encode(7)?)?;
//! let n = shuffler.decode(encoder.decode(&word)?)?;
//! assert_eq!(n, 7);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod validate;

pub use validate::required_bit_width;

use thiserror::Error;

use crate::alphabet::{
    default_classes, CharSet, ClassMap, ClassTag, ALLOWED_PATTERN_LENGTHS, DEFAULT_PATTERNS,
};
use crate::codec::PhoneticEncoder;
use crate::shuffle::{FeistelShuffler, ShuffleError};

/// Errors produced by configuration validation.
///
/// Validation is fail-fast: the first violated invariant is reported and
/// nothing further is checked.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A pattern's length is not one of the allowed lengths.
    #[error("pattern '{pattern}': length {length} is not allowed (must be one of {ALLOWED_PATTERN_LENGTHS:?})")]
    PatternLengthDisallowed {
        /// The offending pattern.
        pattern: String,
        /// Its code-point count.
        length: usize,
    },

    /// Two patterns share a length; decoding selects patterns by length,
    /// so duplicates would be ambiguous.
    #[error("duplicate pattern length {length} found")]
    DuplicatePatternLength {
        /// The repeated length.
        length: usize,
    },

    /// A pattern references a class with no alphabet.
    #[error("pattern '{pattern}' contains '{tag}' but no character set is defined for it")]
    UndefinedPlaceholder {
        /// The offending pattern.
        pattern: String,
        /// The unbound position code point.
        tag: char,
    },

    /// A referenced class has an empty alphabet.
    #[error("placeholder '{tag}' has an empty character set")]
    EmptyClass {
        /// The empty class.
        tag: ClassTag,
    },

    /// A referenced class has fewer members than its role requires.
    #[error("placeholder '{tag}' needs at least {minimum} characters, got {got}")]
    ClassTooSmall {
        /// The undersized class.
        tag: ClassTag,
        /// Minimum for the class's role.
        minimum: usize,
        /// Actual member count.
        got: usize,
    },

    /// A class alphabet repeats a code point.
    #[error("placeholder '{tag}' contains duplicate character '{rune}'")]
    DuplicateInClass {
        /// The class with the duplicate.
        tag: ClassTag,
        /// The repeated code point.
        rune: char,
    },

    /// Two classes referenced by the same pattern share a code point.
    #[error("placeholders '{first}' and '{second}' share the character '{rune}'")]
    ClassOverlap {
        /// First class of the colliding pair.
        first: ClassTag,
        /// Second class of the colliding pair.
        second: ClassTag,
        /// The shared code point.
        rune: char,
    },

    /// The vowel class contains a code point that is not a base vowel.
    #[error("vowel placeholder contains invalid vowel '{rune}' (allowed: a,e,i,o,u,y and their diacritical variants)")]
    VowelNotBaseVowel {
        /// The non-vowel member.
        rune: char,
    },

    /// A pattern has no vowel position.
    #[error("pattern '{pattern}' must contain at least one vowel placeholder ('V')")]
    MissingVowel {
        /// The offending pattern.
        pattern: String,
    },

    /// No complement class with enough breadth is referenced.
    #[error("pattern '{pattern}' must use at least one complement placeholder (C, L, N, S, F) with at least {minimum} characters")]
    MissingComplement {
        /// The offending pattern.
        pattern: String,
        /// Required complement breadth.
        minimum: usize,
    },

    /// Two patterns produce the same capacity, so encoding could not pick
    /// a unique pattern order.
    #[error("patterns '{first}' and '{second}' both produce {capacity} combinations")]
    DuplicateCapacity {
        /// The shared capacity.
        capacity: u128,
        /// Smaller-or-equal-length pattern of the pair.
        first: String,
        /// The other pattern.
        second: String,
    },

    /// A pattern's capacity exceeds the 64-bit value domain.
    #[error("pattern '{pattern}' produces more combinations than the 64-bit value space can hold")]
    CapacityOverflow {
        /// The offending pattern.
        pattern: String,
    },

    /// The configured expected bit width differs from the derived one.
    ///
    /// This is the drift guard: a change in the phonetic configuration
    /// that moves the derived width is a breaking change for every stored
    /// identifier.
    #[error(
        "calculated bit width is {derived}, but expected {expected}; \
         update the expected bit width to {derived} if this change is intentional"
    )]
    BitWidthMismatch {
        /// Width derived from the largest pattern capacity.
        derived: u32,
        /// Width the configuration asserted.
        expected: u32,
    },

    /// Shuffler parameter validation failed.
    #[error(transparent)]
    Shuffle(#[from] ShuffleError),
}

/// The Proquint-compatible word pattern: two five-letter syllable groups
/// joined by a hyphen slot.
pub const PROQUINT_PATTERN: &str = "CVCVCXCVCVC";

/// Phonetic pattern configuration.
///
/// Custom categories (X, Y, Z) can be mixed with the built-in phonetic
/// ones for domain-specific sounds:
///
/// ```rust
/// use phonid::alphabet::{CharSet, ClassMap, ClassTag};
/// use phonid::config::PhoneticConfig;
///
/// let mut placeholders = ClassMap::new();
/// placeholders.insert(ClassTag::Consonant, CharSet::from("bcd"));
/// placeholders.insert(ClassTag::Vowel, CharSet::from("ae"));
/// placeholders.insert(ClassTag::CustomX, CharSet::from("ŋ"));
///
/// let config = PhoneticConfig {
///     patterns: vec!["CXV".into()],
///     placeholders,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneticConfig {
    /// Word patterns, e.g. `"CVC"`, `"VCCVC"`. Each code point names a
    /// class. Empty means the documented defaults.
    pub patterns: Vec<String>,
    /// Class alphabets. Empty means the documented defaults.
    pub placeholders: ClassMap,
}

impl PhoneticConfig {
    /// A Proquint-compatible configuration.
    ///
    /// Encodes 32-bit values as two pronounceable five-letter groups
    /// joined by a hyphen ("identifiers that are readable, spellable, and
    /// pronounceable"); the capacity is exactly `2^32`, so a 32-bit
    /// Feistel stage covers the whole word space.
    ///
    /// See: <https://arxiv.org/html/0901.4016>
    ///
    /// ```rust
    /// use phonid::codec::PhoneticEncoder;
    /// use phonid::config::PhoneticConfig;
    ///
    /// let encoder = PhoneticEncoder::new(&PhoneticConfig::proquint())?;
    /// assert_eq!(encoder.encode(0)?, "babab-babab");
    /// assert_eq!(encoder.smallest_pattern_capacity(), 1 << 32);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn proquint() -> Self {
        let mut placeholders = ClassMap::new();
        placeholders.insert(ClassTag::Vowel, CharSet::from("aiou"));
        placeholders.insert(ClassTag::Consonant, CharSet::from("bdfghjklmnprstvz"));
        placeholders.insert(ClassTag::CustomX, CharSet::from("-"));
        PhoneticConfig {
            patterns: vec![PROQUINT_PATTERN.to_owned()],
            placeholders,
        }
    }

    /// The pattern list with the default substitution applied.
    pub fn effective_patterns(&self) -> Vec<String> {
        if self.patterns.is_empty() {
            DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
        } else {
            self.patterns.clone()
        }
    }

    /// The class map with the default substitution applied.
    pub fn effective_classes(&self) -> ClassMap {
        if self.placeholders.is_empty() {
            default_classes()
        } else {
            self.placeholders.clone()
        }
    }

    /// Check every invariant the codecs depend on.
    ///
    /// Pure: the configuration is not modified, and no codec is built.
    ///
    /// # Errors
    ///
    /// The first violated invariant, as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate::validate_phonetic(self)
    }
}

/// Feistel shuffler configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleConfig {
    /// Seed for round-key derivation.
    pub seed: u64,
    /// Feistel rounds; 0 preserves linear order.
    pub rounds: u32,
    /// Explicit bit width for standalone shufflers. [`Config::build`]
    /// ignores this and derives the width from the patterns.
    pub bit_width: u32,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        ShuffleConfig {
            seed: 0,
            rounds: 0,
            bit_width: 32,
        }
    }
}

impl ShuffleConfig {
    /// Check the parameter ranges.
    ///
    /// # Errors
    ///
    /// A [`ShuffleError`] naming the out-of-range parameter.
    pub fn validate(&self) -> Result<(), ShuffleError> {
        // Constructing a shuffler performs exactly the range checks.
        FeistelShuffler::new(self.bit_width, self.rounds, self.seed).map(|_| ())
    }

    /// Build a standalone shuffler from the explicit bit width.
    ///
    /// # Errors
    ///
    /// A [`ShuffleError`] naming the out-of-range parameter.
    pub fn build(&self) -> Result<FeistelShuffler, ShuffleError> {
        FeistelShuffler::new(self.bit_width, self.rounds, self.seed)
    }
}

/// Top-level configuration: phonetic side, shuffle side, and the optional
/// expected-bit-width drift assertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Patterns and class alphabets.
    pub phonetic: PhoneticConfig,
    /// Seed and round count for the shuffler.
    pub shuffle: ShuffleConfig,
    /// When set (and non-zero), [`Config::build`] fails unless the width
    /// derived from the patterns equals this value.
    pub expected_bit_width: Option<u32>,
}

impl Config {
    /// Validate everything without keeping the built values.
    ///
    /// # Errors
    ///
    /// See [`Config::build`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build().map(|_| ())
    }

    /// The minimum bit width containing the largest pattern's capacity.
    ///
    /// # Errors
    ///
    /// Any phonetic validation failure.
    pub fn derived_bit_width(&self) -> Result<u32, ConfigError> {
        let encoder = PhoneticEncoder::new(&self.phonetic)?;
        Ok(required_bit_width(encoder.largest_capacity()))
    }

    /// Validate and construct the encoder/shuffler pair.
    ///
    /// The shuffler's width is the derived width rounded up to the
    /// nearest valid Feistel width (even, at least 4); the
    /// `expected_bit_width` assertion compares against the exact derived
    /// width, so the guard stays sensitive to any capacity drift.
    ///
    /// # Errors
    ///
    /// Any phonetic validation failure,
    /// [`ConfigError::BitWidthMismatch`] when the drift assertion fails,
    /// or a [`ShuffleError`] when the shuffle parameters are out of
    /// range.
    pub fn build(&self) -> Result<(PhoneticEncoder, FeistelShuffler), ConfigError> {
        let encoder = PhoneticEncoder::new(&self.phonetic)?;
        let derived = required_bit_width(encoder.largest_capacity());

        if let Some(expected) = self.expected_bit_width.filter(|&w| w > 0) {
            if expected != derived {
                return Err(ConfigError::BitWidthMismatch { derived, expected });
            }
        }

        let shuffler = FeistelShuffler::new(
            validate::feistel_bit_width(derived),
            self.shuffle.rounds,
            self.shuffle.seed,
        )?;

        Ok((encoder, shuffler))
    }
}

/// Fluent builder for [`Config`].
///
/// # Example
///
/// ```rust
/// use phonid::config::ConfigBuilder;
///
/// let (encoder, shuffler) = ConfigBuilder::new()
///     .with_seed(12345)
///     .with_rounds(4)
///     .build()?;
/// # let _ = (encoder, shuffler);
/// # Ok::<(), phonid::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        ConfigBuilder::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: Config) -> Self {
        ConfigBuilder { config }
    }

    /// Set the shuffler seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.shuffle.seed = seed;
        self
    }

    /// Set the Feistel round count.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.config.shuffle.rounds = rounds;
        self
    }

    /// Replace the shuffle configuration.
    pub fn with_shuffle(mut self, shuffle: ShuffleConfig) -> Self {
        self.config.shuffle = shuffle;
        self
    }

    /// Replace the phonetic configuration.
    pub fn with_phonetic(mut self, phonetic: PhoneticConfig) -> Self {
        self.config.phonetic = phonetic;
        self
    }

    /// Assert the derived bit width at build time.
    pub fn with_expected_bit_width(mut self, bit_width: u32) -> Self {
        self.config.expected_bit_width = Some(bit_width);
        self
    }

    /// The accumulated configuration, without validating it.
    pub fn into_config(self) -> Config {
        self.config
    }

    /// Validate and construct the encoder/shuffler pair.
    ///
    /// # Errors
    ///
    /// See [`Config::build`].
    pub fn build(self) -> Result<(PhoneticEncoder, FeistelShuffler), ConfigError> {
        self.config.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::CharSet;

    fn classes(pairs: &[(ClassTag, &str)]) -> ClassMap {
        pairs
            .iter()
            .map(|&(tag, chars)| (tag, CharSet::from(chars)))
            .collect()
    }

    #[test]
    fn test_default_config_builds() {
        let (encoder, shuffler) = Config::default().build().unwrap();
        // Largest default pattern: CVCVCVCVCVC = 16^6 * 5^5 = 52_428_800_000.
        assert_eq!(encoder.largest_capacity(), 52_428_800_000);
        // ceil(log2(52_428_800_000)) = 36.
        assert_eq!(shuffler.bit_width(), 36);
        assert_eq!(shuffler.rounds(), 0);
    }

    #[test]
    fn test_builder_applies_options() {
        let (_, shuffler) = ConfigBuilder::new()
            .with_seed(99)
            .with_rounds(6)
            .build()
            .unwrap();
        assert_eq!(shuffler.rounds(), 6);
    }

    #[test]
    fn test_derived_width_exact_value() {
        let config = Config {
            phonetic: PhoneticConfig {
                patterns: vec!["VCV".into()],
                placeholders: classes(&[
                    (ClassTag::Vowel, "aeoi"),
                    (ClassTag::Consonant, "bd"),
                ]),
            },
            ..Config::default()
        };
        // Capacity 4*2*4 = 32, ceil(log2(32)) = 5.
        assert_eq!(config.derived_bit_width().unwrap(), 5);
    }

    #[test]
    fn test_expected_bit_width_assertion() {
        let base = Config {
            phonetic: PhoneticConfig {
                patterns: vec!["VCV".into()],
                placeholders: classes(&[
                    (ClassTag::Vowel, "aeoi"),
                    (ClassTag::Consonant, "bd"),
                ]),
            },
            ..Config::default()
        };

        let ok = Config {
            expected_bit_width: Some(5),
            ..base.clone()
        };
        assert!(ok.validate().is_ok());

        let drifted = Config {
            expected_bit_width: Some(6),
            ..base
        };
        assert_eq!(
            drifted.validate().unwrap_err(),
            ConfigError::BitWidthMismatch {
                derived: 5,
                expected: 6,
            }
        );
    }

    #[test]
    fn test_expected_bit_width_zero_is_unset() {
        let config = Config {
            expected_bit_width: Some(0),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_odd_derived_width_rounds_up_for_shuffler() {
        let config = Config {
            phonetic: PhoneticConfig {
                patterns: vec!["VCV".into()],
                placeholders: classes(&[
                    (ClassTag::Vowel, "aeoi"),
                    (ClassTag::Consonant, "bd"),
                ]),
            },
            expected_bit_width: Some(5),
            ..Config::default()
        };
        let (_, shuffler) = config.build().unwrap();
        // Exact width 5 is asserted, but a 5-bit Feistel split is not
        // well defined; the shuffler gets the next even width.
        assert_eq!(shuffler.bit_width(), 6);
    }

    #[test]
    fn test_shuffle_rounds_out_of_range() {
        let config = Config {
            shuffle: ShuffleConfig {
                rounds: 11,
                ..ShuffleConfig::default()
            },
            ..Config::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::Shuffle(ShuffleError::RoundsOutOfRange(11))
        );
    }

    #[test]
    fn test_proquint_capacity_is_exactly_32_bits() {
        let config = Config {
            phonetic: PhoneticConfig::proquint(),
            expected_bit_width: Some(32),
            ..Config::default()
        };
        let (encoder, shuffler) = config.build().unwrap();
        assert_eq!(encoder.largest_capacity(), 1 << 32);
        assert_eq!(shuffler.bit_width(), 32);
    }

    #[test]
    fn test_proquint_hyphen_slot_carries_no_information() {
        let (encoder, _) = Config {
            phonetic: PhoneticConfig::proquint(),
            ..Config::default()
        }
        .build()
        .unwrap();

        // The singleton hyphen slot is structural only.
        assert_eq!(encoder.encode(0).unwrap(), "babab-babab");
        assert_eq!(encoder.encode(u32::MAX as u64).unwrap(), "zuzuz-zuzuz");
        assert_eq!(encoder.decode("zuzuz-zuzuz").unwrap(), u32::MAX as u64);
    }

    #[test]
    fn test_standalone_shuffle_config() {
        let shuffle = ShuffleConfig {
            seed: 7,
            rounds: 4,
            bit_width: 16,
        };
        assert!(shuffle.validate().is_ok());
        assert_eq!(shuffle.build().unwrap().bit_width(), 16);

        let bad = ShuffleConfig {
            bit_width: 2,
            ..shuffle
        };
        assert_eq!(
            bad.validate().unwrap_err(),
            ShuffleError::BitWidthOutOfRange(2)
        );
    }
}
