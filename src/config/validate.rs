//! Pattern validation and bit-width arithmetic.
//!
//! Everything here is pure: inputs are borrowed, nothing is mutated, and
//! the first violated invariant short-circuits. Class maps iterate in tag
//! order and classes are checked in first-reference order, so the same
//! configuration always reports the same failure.

use std::collections::BTreeSet;

use crate::alphabet::{
    is_allowed_length, is_base_vowel, ClassMap, ClassTag, MIN_COMPLEMENT_CHARS, MIN_VOWEL_CHARS,
};

use super::{ConfigError, PhoneticConfig};

/// Validate the phonetic configuration as a whole.
///
/// Checks, in order: pairwise-distinct pattern lengths, allowed lengths,
/// then every per-pattern invariant via [`validate_pattern`].
pub(super) fn validate_phonetic(config: &PhoneticConfig) -> Result<(), ConfigError> {
    let patterns = config.effective_patterns();
    let classes = config.effective_classes();

    let mut seen_lengths = BTreeSet::new();
    for pattern in &patterns {
        let length = pattern.chars().count();
        if !seen_lengths.insert(length) {
            return Err(ConfigError::DuplicatePatternLength { length });
        }
    }

    for pattern in &patterns {
        let length = pattern.chars().count();
        if !is_allowed_length(length) {
            return Err(ConfigError::PatternLengthDisallowed {
                pattern: pattern.clone(),
                length,
            });
        }
    }

    for pattern in &patterns {
        validate_pattern(pattern, &classes)?;
    }

    Ok(())
}

/// Validate a single pattern against a class map.
///
/// Classes not referenced by the pattern are ignored entirely; a
/// configuration may carry extra alphabets for patterns that do not use
/// them.
pub(super) fn validate_pattern(pattern: &str, classes: &ClassMap) -> Result<(), ConfigError> {
    // Referenced classes in first-use order.
    let mut used: Vec<ClassTag> = Vec::new();
    for c in pattern.chars() {
        let tag = ClassTag::try_from(c).map_err(|tag| ConfigError::UndefinedPlaceholder {
            pattern: pattern.to_owned(),
            tag,
        })?;
        if !classes.contains_key(&tag) {
            return Err(ConfigError::UndefinedPlaceholder {
                pattern: pattern.to_owned(),
                tag: c,
            });
        }
        if !used.contains(&tag) {
            used.push(tag);
        }
    }

    let mut has_broad_complement = false;
    for &tag in &used {
        let chars = &classes[&tag];

        if chars.is_empty() {
            return Err(ConfigError::EmptyClass { tag });
        }
        if let Some(rune) = chars.first_duplicate() {
            return Err(ConfigError::DuplicateInClass { tag, rune });
        }

        if tag == ClassTag::Vowel {
            if chars.len() < MIN_VOWEL_CHARS {
                return Err(ConfigError::ClassTooSmall {
                    tag,
                    minimum: MIN_VOWEL_CHARS,
                    got: chars.len(),
                });
            }
            if let Some(rune) = chars.iter().find(|&c| !is_base_vowel(c)) {
                return Err(ConfigError::VowelNotBaseVowel { rune });
            }
        }

        if tag.is_complement() && chars.len() >= MIN_COMPLEMENT_CHARS {
            has_broad_complement = true;
        }
    }

    if !used.contains(&ClassTag::Vowel) {
        return Err(ConfigError::MissingVowel {
            pattern: pattern.to_owned(),
        });
    }

    // The breadth requirement is pattern-level: one broad complement
    // class excuses narrow ones beside it.
    if !has_broad_complement {
        return Err(ConfigError::MissingComplement {
            pattern: pattern.to_owned(),
            minimum: MIN_COMPLEMENT_CHARS,
        });
    }

    for (i, &first) in used.iter().enumerate() {
        for &second in &used[i + 1..] {
            if let Some(rune) = classes[&first].first_overlap(&classes[&second]) {
                return Err(ConfigError::ClassOverlap {
                    first,
                    second,
                    rune,
                });
            }
        }
    }

    Ok(())
}

/// Minimum number of bits needed to index `capacity` distinct values.
///
/// `⌈log₂(capacity)⌉`, with capacities 0 and 1 mapping to 1 bit.
///
/// # Example
///
/// ```rust
/// use phonid::config::required_bit_width;
///
/// assert_eq!(required_bit_width(1), 1);
/// assert_eq!(required_bit_width(32), 5);
/// assert_eq!(required_bit_width(33), 6);
/// assert_eq!(required_bit_width(1 << 64), 64);
/// ```
pub fn required_bit_width(capacity: u128) -> u32 {
    if capacity <= 1 {
        return 1;
    }
    128 - (capacity - 1).leading_zeros()
}

/// Smallest valid Feistel width covering `required` bits: even and at
/// least 4.
pub(crate) fn feistel_bit_width(required: u32) -> u32 {
    let even = required + required % 2;
    even.max(4)
}
