//! Mixed-radix codec for a single word pattern.

use smallvec::SmallVec;

use crate::alphabet::{CharSet, ClassMap, ClassTag};
use crate::config::ConfigError;

use super::CodecError;

/// Longest pattern the validator accepts; sizes the stack-allocated word
/// buffer so encoding never touches the heap for the digits.
const MAX_PATTERN_LEN: usize = 23;

/// One slot of a pattern: the class tag, its alphabet, and the number of
/// code points the slot can hold (its radix).
#[derive(Debug, Clone)]
pub struct Position {
    tag: ClassTag,
    chars: CharSet,
    base: u64,
}

impl Position {
    /// The class tag this slot draws from.
    pub fn tag(&self) -> ClassTag {
        self.tag
    }

    /// The radix of this slot.
    pub fn base(&self) -> u64 {
        self.base
    }
}

/// Encoder/decoder for one pattern.
///
/// Positions are digits of decreasing significance left to right; the
/// digit value of a code point is its index within the slot's alphabet.
/// The codec is bijective on `[0, capacity)` where `capacity` is the
/// product of all slot radixes.
///
/// Built once from a validated configuration and immutable afterwards.
///
/// # Example
///
/// ```rust
/// use phonid::alphabet::{CharSet, ClassMap, ClassTag};
/// use phonid::codec::PatternCodec;
///
/// let mut classes = ClassMap::new();
/// classes.insert(ClassTag::Consonant, CharSet::from("bzk"));
/// classes.insert(ClassTag::Vowel, CharSet::from("aoi"));
///
/// let codec = PatternCodec::new("CVC", &classes)?;
/// assert_eq!(codec.capacity(), 27);
/// assert_eq!(codec.encode(0)?, "bab");
/// assert_eq!(codec.decode("bab")?, 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct PatternCodec {
    pattern: String,
    positions: Vec<Position>,
    /// Product of `base` over positions following each slot; the place
    /// value a digit at that slot contributes during decoding.
    place_values: Vec<u128>,
    capacity: u128,
}

impl PatternCodec {
    /// Build a codec for `pattern` over the given class map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UndefinedPlaceholder`] when a pattern
    /// position names a class with no alphabet,
    /// [`ConfigError::EmptyClass`] when a referenced alphabet is empty,
    /// and [`ConfigError::CapacityOverflow`] when the pattern's capacity
    /// does not fit the 64-bit value domain.
    pub fn new(pattern: &str, classes: &ClassMap) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Err(ConfigError::PatternLengthDisallowed {
                pattern: String::new(),
                length: 0,
            });
        }

        let mut positions = Vec::with_capacity(pattern.chars().count());
        let mut capacity: u128 = 1;

        for c in pattern.chars() {
            let tag = ClassTag::try_from(c).map_err(|tag| ConfigError::UndefinedPlaceholder {
                pattern: pattern.to_owned(),
                tag,
            })?;
            let chars = classes
                .get(&tag)
                .ok_or_else(|| ConfigError::UndefinedPlaceholder {
                    pattern: pattern.to_owned(),
                    tag: c,
                })?;
            if chars.is_empty() {
                return Err(ConfigError::EmptyClass { tag });
            }

            let base = chars.len() as u64;
            capacity = capacity
                .checked_mul(u128::from(base))
                .ok_or_else(|| ConfigError::CapacityOverflow {
                    pattern: pattern.to_owned(),
                })?;

            positions.push(Position {
                tag,
                chars: chars.clone(),
                base,
            });
        }

        // Bound the word space to the 64-bit domain so that every decoded
        // value fits a u64 and a Feistel stage can always cover it.
        if capacity > (u128::from(u64::MAX)) + 1 {
            return Err(ConfigError::CapacityOverflow {
                pattern: pattern.to_owned(),
            });
        }

        let mut place_values = vec![1u128; positions.len()];
        for i in (0..positions.len().saturating_sub(1)).rev() {
            place_values[i] = place_values[i + 1] * u128::from(positions[i + 1].base);
        }

        Ok(PatternCodec {
            pattern: pattern.to_owned(),
            positions,
            place_values,
            capacity,
        })
    }

    /// Encode `value` as a word.
    ///
    /// Digits are produced by repeated division starting at the least
    /// significant (rightmost) slot, then reversed into reading order.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::OutOfRange`] when `value >= capacity`.
    pub fn encode(&self, value: u64) -> Result<String, CodecError> {
        if u128::from(value) >= self.capacity {
            return Err(CodecError::OutOfRange {
                value,
                max: self.max_value(),
            });
        }

        let mut word: SmallVec<[char; MAX_PATTERN_LEN]> = SmallVec::new();
        let mut remaining = u128::from(value);

        for position in self.positions.iter().rev() {
            let base = u128::from(position.base);
            let digit = (remaining % base) as usize;
            remaining /= base;
            // Index is in range: digit < base == chars.len().
            word.push(position.chars.get(digit).unwrap_or_default());
        }

        word.reverse();
        Ok(word.into_iter().collect())
    }

    /// Decode a word back to its value.
    ///
    /// The input is interpreted as a sequence of Unicode scalar values,
    /// never bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::LengthMismatch`] when the word's code-point
    /// count differs from the pattern length (an empty word included),
    /// and [`CodecError::InvalidRune`] when a code point is not a member
    /// of its slot's alphabet.
    pub fn decode(&self, word: &str) -> Result<u64, CodecError> {
        let runes: SmallVec<[char; MAX_PATTERN_LEN]> = word.chars().collect();
        if runes.len() != self.positions.len() {
            return Err(CodecError::LengthMismatch {
                got: runes.len(),
                want: self.positions.len(),
            });
        }

        let mut value: u128 = 0;
        for (i, (&rune, position)) in runes.iter().zip(&self.positions).enumerate() {
            let digit = position
                .chars
                .index_of(rune)
                .ok_or(CodecError::InvalidRune {
                    rune,
                    position: i,
                    tag: position.tag,
                })?;
            value += digit as u128 * self.place_values[i];
        }

        // Construction bounds capacity to the 64-bit domain.
        Ok(value as u64)
    }

    /// The pattern this codec was built from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Number of slots in the pattern.
    pub fn length(&self) -> usize {
        self.positions.len()
    }

    /// Number of distinct words this codec can produce.
    pub fn capacity(&self) -> u128 {
        self.capacity
    }

    /// Largest encodable value, `capacity − 1`.
    pub fn max_value(&self) -> u64 {
        (self.capacity - 1) as u64
    }

    /// The slots of this codec, in reading order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }
}
