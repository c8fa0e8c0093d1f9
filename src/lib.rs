//! # phonid
//!
//! Bijective phonetic identifiers: map non-negative integers to short,
//! pronounceable words and back, without collisions.
//!
//! Words are built from configurable patterns such as `"CVC"`, where each
//! position draws from a named character class (consonants, vowels,
//! liquids, ...). The mapping is a mixed-radix positional encoding, so it
//! is exactly invertible. An optional Feistel-network shuffler scrambles
//! numeric order first — sequential inputs stop producing obviously
//! adjacent words — while staying bijective.
//!
//! ## Example
//!
//! ```rust
//! use phonid::prelude::*;
//!
//! let (encoder, shuffler) = ConfigBuilder::new()
//!     .with_seed(12345)
//!     .with_rounds(4)
//!     .build()?;
//!
//! // Words round-trip exactly.
//! let word = encoder.encode(42)?;
//! assert_eq!(encoder.decode(&word)?, 42);
//!
//! // The shuffler permutes the numeric domain, reversibly.
//! let scrambled = shuffler.encode(42)?;
//! assert_eq!(shuffler.decode(scrambled)?, 42);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Callers compose the stages as `encoder.encode(shuffler.encode(n)?)`;
//! the composition covers the full word space when the largest pattern's
//! capacity is a power of two (as in identifier schemes sized to 2^32 or
//! 2^64).
//!
//! ## Pipeline
//!
//! ```text
//! integer n
//!     ↕ FeistelShuffler   (bijective permutation of [0, 2^b), seeded)
//! shuffled integer
//!     ↕ PhoneticEncoder   (picks the smallest pattern that fits)
//!     ↕ PatternCodec      (mixed-radix digits over class alphabets)
//! word
//! ```
//!
//! The two stages are composed by the caller, never implicitly; the
//! configuration layer only guarantees that they agree on a domain.
//! Validation ([`config::PhoneticConfig::validate`]) checks every
//! invariant the bijection depends on before any codec is built.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alphabet;
pub mod codec;
pub mod config;
pub mod preflight;
pub mod rcfile;
pub mod shuffle;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::alphabet::{CharSet, ClassMap, ClassTag};
    pub use crate::codec::{CodecError, PatternCodec, PhoneticEncoder};
    pub use crate::config::{Config, ConfigBuilder, ConfigError, PhoneticConfig, ShuffleConfig};
    pub use crate::preflight::{PreflightCheck, PreflightError};
    pub use crate::shuffle::{FeistelShuffler, ShuffleError};
}
