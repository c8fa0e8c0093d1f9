//! Configuration file discovery.
//!
//! Configuration files are recognized by name alone: `.phonidrc`,
//! `.phonidrc.toml`, or a scoped variant `.<prefix>.phonidrc[.toml]`
//! where `<prefix>` is a non-empty label free of path and extension
//! punctuation. Anything else — backup copies, editor droppings,
//! lookalike extensions — is ignored.

use std::path::{Path, PathBuf};

use super::RcError;

/// Characters a scope prefix may not contain.
const FORBIDDEN_PREFIX_CHARS: [char; 4] = ['.', '/', '\\', ':'];

/// Whether `name` is a recognized configuration file name.
///
/// # Example
///
/// ```rust
/// use phonid::rcfile::is_rc_file_name;
///
/// assert!(is_rc_file_name(".phonidrc"));
/// assert!(is_rc_file_name(".phonidrc.toml"));
/// assert!(is_rc_file_name(".staging.phonidrc"));
/// assert!(!is_rc_file_name("phonidrc"));
/// assert!(!is_rc_file_name(".phonidrc.bak"));
/// ```
pub fn is_rc_file_name(name: &str) -> bool {
    // The only accepted extension is exactly `.toml`.
    let stem = name.strip_suffix(".toml").unwrap_or(name);

    let Some(rest) = stem.strip_prefix('.') else {
        return false;
    };
    if rest == "phonidrc" {
        return true;
    }

    match rest.strip_suffix(".phonidrc") {
        Some(prefix) => !prefix.is_empty() && !prefix.contains(&FORBIDDEN_PREFIX_CHARS[..]),
        None => false,
    }
}

/// Find the first recognized configuration file in `dir`.
///
/// Entries are considered in lexicographic name order so discovery is
/// deterministic regardless of directory enumeration order.
///
/// # Errors
///
/// [`RcError::Io`] when the directory cannot be read.
pub fn find_rc_file(dir: &Path) -> Result<Option<PathBuf>, RcError> {
    let entries = std::fs::read_dir(dir).map_err(|source| RcError::Io {
        path: dir.to_owned(),
        source,
    })?;

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_rc_file_name(name))
        .collect();
    names.sort();

    Ok(names.first().map(|name| dir.join(name)))
}
