//! Loading configuration from `.phonidrc` files.
//!
//! The file surface is a TOML document:
//!
//! ```toml
//! expected_bit_width = 15
//!
//! [shuffle]
//! seed   = 42
//! rounds = 4
//!
//! [phonetic]
//! patterns = ["CVC", "VCCVC"]
//!
//! [phonetic.placeholders]
//! C = "bcdfghjkpqstvwxz"
//! V = "aeiou"
//! S = "\u0283\u0292"   # TOML escapes decode to code points before key checks
//!
//! [[preflight]]
//! input   = 0
//! expect  = "bab"
//! comment = "Lower boundary"
//! ```
//!
//! Two modes exist. *Strict* mode — the normal path — rejects unknown
//! fields and requires at least one `[[preflight]]` entry, so a deployed
//! configuration always carries its own drift checks. *Lenient* mode
//! permits zero preflight entries and tolerates the retired top-level
//! `base` key; it exists for the suggestion-generation workflow, which
//! runs before any checks have been written.

mod discover;

pub use discover::{find_rc_file, is_rc_file_name};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::alphabet::{CharSet, ClassMap, ClassTag};
use crate::config::{Config, PhoneticConfig, ShuffleConfig};
use crate::preflight::PreflightCheck;

/// Errors produced while loading a configuration file.
#[derive(Debug, Error)]
pub enum RcError {
    /// Reading the file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid TOML or contains unknown fields.
    #[error("failed to parse TOML config: {0}")]
    Parse(#[from] Box<toml::de::Error>),

    /// A placeholder key is not a single code point.
    #[error("placeholder key '{key}' must be a single character")]
    PlaceholderKeyNotSingleCodePoint {
        /// The offending key.
        key: String,
    },

    /// A placeholder key is not one of the valid class tags.
    #[error("placeholder '{key}' is not allowed (valid placeholders: C, V, L, N, S, F, X, Y, Z)")]
    UnknownPlaceholder {
        /// The offending tag code point.
        key: char,
    },

    /// A field accepted only in lenient mode appeared in strict mode.
    #[error("unknown field `{field}`")]
    UnknownField {
        /// The rejected field name.
        field: String,
    },

    /// Strict mode requires at least one `[[preflight]]` entry.
    #[error("at least one [[preflight]] entry is required")]
    MissingPreflight,
}

/// A parsed configuration file: the config itself plus its preflight
/// checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcConfig {
    /// The configuration to validate and build.
    pub config: Config,
    /// The file's `[[preflight]]` checks, in document order.
    pub preflight: Vec<PreflightCheck>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RcDocument {
    /// Retired field, tolerated in lenient mode only.
    #[serde(default)]
    base: Option<i64>,
    #[serde(default)]
    expected_bit_width: Option<u32>,
    #[serde(default)]
    shuffle: Option<RcShuffle>,
    #[serde(default)]
    phonetic: Option<RcPhonetic>,
    #[serde(default)]
    preflight: Vec<RcPreflight>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RcShuffle {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    rounds: Option<u32>,
    #[serde(default)]
    bit_width: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RcPhonetic {
    #[serde(default)]
    patterns: Vec<String>,
    #[serde(default)]
    placeholders: BTreeMap<String, CharSet>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RcPreflight {
    input: u64,
    expect: String,
    #[serde(default)]
    comment: Option<String>,
}

/// Parse a configuration document in strict mode.
///
/// # Errors
///
/// Any [`RcError`]; notably [`RcError::MissingPreflight`] when the
/// document carries no checks.
pub fn parse_strict(content: &str) -> Result<RcConfig, RcError> {
    let document = parse_document(content)?;
    if let Some(_base) = document.base {
        return Err(RcError::UnknownField {
            field: "base".to_owned(),
        });
    }
    if document.preflight.is_empty() {
        return Err(RcError::MissingPreflight);
    }
    convert(document)
}

/// Parse a configuration document in lenient mode.
///
/// Zero preflight entries are permitted; intended for generating the
/// suggestions that strict mode will later require.
///
/// # Errors
///
/// Any [`RcError`] other than [`RcError::MissingPreflight`].
pub fn parse_lenient(content: &str) -> Result<RcConfig, RcError> {
    convert(parse_document(content)?)
}

/// Load and strictly parse the file at `path`.
///
/// # Errors
///
/// [`RcError::Io`] when reading fails, otherwise as [`parse_strict`].
pub fn load_strict(path: &Path) -> Result<RcConfig, RcError> {
    parse_strict(&read(path)?)
}

/// Load and leniently parse the file at `path`.
///
/// # Errors
///
/// [`RcError::Io`] when reading fails, otherwise as [`parse_lenient`].
pub fn load_lenient(path: &Path) -> Result<RcConfig, RcError> {
    parse_lenient(&read(path)?)
}

fn read(path: &Path) -> Result<String, RcError> {
    std::fs::read_to_string(path).map_err(|source| RcError::Io {
        path: path.to_owned(),
        source,
    })
}

fn parse_document(content: &str) -> Result<RcDocument, RcError> {
    toml::from_str(content).map_err(|e| RcError::Parse(Box::new(e)))
}

fn convert(document: RcDocument) -> Result<RcConfig, RcError> {
    let phonetic = match document.phonetic {
        Some(section) => PhoneticConfig {
            patterns: section.patterns,
            placeholders: convert_placeholders(section.placeholders)?,
        },
        None => PhoneticConfig::default(),
    };

    let defaults = ShuffleConfig::default();
    let shuffle = match document.shuffle {
        Some(section) => ShuffleConfig {
            seed: section.seed.unwrap_or(defaults.seed),
            rounds: section.rounds.unwrap_or(defaults.rounds),
            bit_width: section.bit_width.unwrap_or(defaults.bit_width),
        },
        None => defaults,
    };

    let preflight = document
        .preflight
        .into_iter()
        .map(|entry| PreflightCheck::new(entry.input, entry.expect))
        .collect();

    Ok(RcConfig {
        config: Config {
            phonetic,
            shuffle,
            expected_bit_width: document.expected_bit_width,
        },
        preflight,
    })
}

fn convert_placeholders(raw: BTreeMap<String, CharSet>) -> Result<ClassMap, RcError> {
    let mut classes = ClassMap::new();
    for (key, chars) in raw {
        let mut runes = key.chars();
        let (first, rest) = (runes.next(), runes.next());
        let tag_char = match (first, rest) {
            (Some(c), None) => c,
            _ => return Err(RcError::PlaceholderKeyNotSingleCodePoint { key }),
        };
        let tag = ClassTag::try_from(tag_char)
            .map_err(|key| RcError::UnknownPlaceholder { key })?;
        classes.insert(tag, chars);
    }
    Ok(classes)
}
