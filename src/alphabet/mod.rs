//! Character classes and their alphabets.
//!
//! A word pattern such as `"CVC"` names one character class per position.
//! This module defines the closed set of class tags, the ordered alphabets
//! bound to them, and the built-in defaults.
//!
//! Alphabets are sequences of Unicode scalar values (`char`), never bytes:
//! the position of a code point within its alphabet is its digit value, so
//! order is semantically significant.

mod vowel;

pub use vowel::is_base_vowel;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum number of members the vowel class must have when referenced.
pub const MIN_VOWEL_CHARS: usize = 2;

/// Minimum breadth for the complement requirement: at least one non-vowel
/// phonetic class referenced by a pattern must have this many members.
pub const MIN_COMPLEMENT_CHARS: usize = 3;

/// Pattern lengths accepted by the validator.
pub const ALLOWED_PATTERN_LENGTHS: [usize; 5] = [3, 5, 7, 11, 23];

/// Base vowels accepted in the vowel class, before diacritic stripping.
pub const ALLOWED_VOWELS: [char; 12] = [
    'a', 'e', 'i', 'o', 'u', 'y', 'A', 'E', 'I', 'O', 'U', 'Y',
];

/// Patterns used when a configuration provides none.
pub const DEFAULT_PATTERNS: [&str; 4] = ["CVC", "VCCVC", "CVCVCVC", "CVCVCVCVCVC"];

/// A single-code-point tag naming a character class.
///
/// The set is closed: six phonetic categories plus three user-defined
/// slots. Tags convert to and from their `char` representation, which is
/// how patterns and configuration files spell them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassTag {
    /// Hard consonants, e.g. `b`, `d`, `k`.
    Consonant,
    /// Pure vowels; members must satisfy [`is_base_vowel`].
    Vowel,
    /// Liquid consonants, e.g. `l`, `r`.
    Liquid,
    /// Nasal sounds, e.g. `m`, `n`.
    Nasal,
    /// Hissing sounds, e.g. `s`, `z` (or IPA `ʃ`, `ʒ`).
    Sibilant,
    /// Friction sounds, e.g. `f`, `v` (or IPA `θ`, `ð`).
    Fricative,
    /// User-defined category 1.
    CustomX,
    /// User-defined category 2.
    CustomY,
    /// User-defined category 3.
    CustomZ,
}

/// All valid class tags, in canonical order.
pub const ALL_CLASS_TAGS: [ClassTag; 9] = [
    ClassTag::Consonant,
    ClassTag::Vowel,
    ClassTag::Liquid,
    ClassTag::Nasal,
    ClassTag::Sibilant,
    ClassTag::Fricative,
    ClassTag::CustomX,
    ClassTag::CustomY,
    ClassTag::CustomZ,
];

/// The non-vowel phonetic categories.
pub const COMPLEMENT_CLASS_TAGS: [ClassTag; 5] = [
    ClassTag::Consonant,
    ClassTag::Liquid,
    ClassTag::Nasal,
    ClassTag::Sibilant,
    ClassTag::Fricative,
];

impl ClassTag {
    /// The single code point spelling this tag in patterns and configs.
    pub fn as_char(self) -> char {
        match self {
            ClassTag::Consonant => 'C',
            ClassTag::Vowel => 'V',
            ClassTag::Liquid => 'L',
            ClassTag::Nasal => 'N',
            ClassTag::Sibilant => 'S',
            ClassTag::Fricative => 'F',
            ClassTag::CustomX => 'X',
            ClassTag::CustomY => 'Y',
            ClassTag::CustomZ => 'Z',
        }
    }

    /// Human-readable category name.
    pub fn name(self) -> &'static str {
        match self {
            ClassTag::Consonant => "Consonant",
            ClassTag::Vowel => "Vowel",
            ClassTag::Liquid => "Liquid",
            ClassTag::Nasal => "Nasal",
            ClassTag::Sibilant => "Sibilant",
            ClassTag::Fricative => "Fricative",
            ClassTag::CustomX => "User-defined category 1",
            ClassTag::CustomY => "User-defined category 2",
            ClassTag::CustomZ => "User-defined category 3",
        }
    }

    /// Whether this tag is a non-vowel phonetic category.
    pub fn is_complement(self) -> bool {
        COMPLEMENT_CLASS_TAGS.contains(&self)
    }
}

impl TryFrom<char> for ClassTag {
    type Error = char;

    fn try_from(c: char) -> Result<Self, char> {
        match c {
            'C' => Ok(ClassTag::Consonant),
            'V' => Ok(ClassTag::Vowel),
            'L' => Ok(ClassTag::Liquid),
            'N' => Ok(ClassTag::Nasal),
            'S' => Ok(ClassTag::Sibilant),
            'F' => Ok(ClassTag::Fricative),
            'X' => Ok(ClassTag::CustomX),
            'Y' => Ok(ClassTag::CustomY),
            'Z' => Ok(ClassTag::CustomZ),
            other => Err(other),
        }
    }
}

impl fmt::Display for ClassTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An ordered sequence of code points forming one class's alphabet.
///
/// Order matters: the index of a code point is its digit value in the
/// mixed-radix encoding. Deserializes from a plain string, so TOML
/// configurations can write `C = "bcdfg"` instead of an array.
///
/// # Example
///
/// ```rust
/// use phonid::alphabet::CharSet;
///
/// let vowels = CharSet::from("aeiou");
/// assert_eq!(vowels.len(), 5);
/// assert_eq!(vowels.index_of('i'), Some(2));
/// assert_eq!(vowels.index_of('x'), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet(Vec<char>);

impl CharSet {
    /// Number of code points in the alphabet.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the alphabet is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position of `c` within the alphabet, if present.
    ///
    /// Alphabets are small, so a linear scan beats a lookup table.
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.0.iter().position(|&m| m == c)
    }

    /// Whether `c` is a member of the alphabet.
    pub fn contains(&self, c: char) -> bool {
        self.index_of(c).is_some()
    }

    /// Code point at digit value `index`.
    pub fn get(&self, index: usize) -> Option<char> {
        self.0.get(index).copied()
    }

    /// Iterate members in digit order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// First repeated code point, if the alphabet contains duplicates.
    pub fn first_duplicate(&self) -> Option<char> {
        for (i, c) in self.0.iter().enumerate() {
            if self.0[..i].contains(c) {
                return Some(*c);
            }
        }
        None
    }

    /// First code point shared with `other`, if any.
    pub fn first_overlap(&self, other: &CharSet) -> Option<char> {
        self.0.iter().copied().find(|&c| other.contains(c))
    }
}

impl From<&str> for CharSet {
    fn from(s: &str) -> Self {
        CharSet(s.chars().collect())
    }
}

impl From<Vec<char>> for CharSet {
    fn from(chars: Vec<char>) -> Self {
        CharSet(chars)
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl Serialize for CharSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CharSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(CharSet::from(s.as_str()))
    }
}

/// Mapping from class tags to alphabets.
///
/// A `BTreeMap` keeps iteration order deterministic, so validation always
/// reports the same first failure for a given configuration.
pub type ClassMap = BTreeMap<ClassTag, CharSet>;

/// The class map used when a configuration provides none.
///
/// Sibilant, Fricative and Nasal have no defaults; users who want them can
/// bind IPA symbols (`ʃ`, `ʒ`, `θ`, `ð`, `ŋ`) for closer phonetic control.
pub fn default_classes() -> ClassMap {
    let mut map = ClassMap::new();
    map.insert(ClassTag::Consonant, CharSet::from("bcdfghjkpqstvwxz"));
    map.insert(ClassTag::Liquid, CharSet::from("lmnr"));
    map.insert(ClassTag::Vowel, CharSet::from("aeiou"));
    map
}

/// Whether `len` is an accepted pattern length.
pub fn is_allowed_length(len: usize) -> bool {
    ALLOWED_PATTERN_LENGTHS.contains(&len)
}
