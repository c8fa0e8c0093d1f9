//! Base-vowel classification with diacritic stripping.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::ALLOWED_VOWELS;

/// Whether `c` is a base vowel, directly or after stripping diacritics.
///
/// A code point qualifies when it is one of `a e i o u y` (either case),
/// or when its NFD canonical decomposition, with Nonspacing Mark
/// combining characters removed, leaves such a vowel. This admits forms
/// like `ü`, `ä`, `é` or `è` while rejecting `ñ`, whose base is not a
/// vowel.
///
/// # Example
///
/// ```rust
/// use phonid::alphabet::is_base_vowel;
///
/// assert!(is_base_vowel('a'));
/// assert!(is_base_vowel('ü'));
/// assert!(!is_base_vowel('ñ'));
/// assert!(!is_base_vowel('k'));
/// ```
pub fn is_base_vowel(c: char) -> bool {
    if ALLOWED_VOWELS.contains(&c) {
        return true;
    }

    // NFD pushes combining marks after the base character; the first
    // non-mark code point is the base.
    std::iter::once(c)
        .nfd()
        .find(|&d| !is_combining_mark(d))
        .is_some_and(|base| ALLOWED_VOWELS.contains(&base))
}
