//! Rendering suggested assertions in configuration-file formats.
//!
//! TOML is the canonical format (the output pastes directly into a
//! `.phonidrc` file); JSON is provided for tooling that consumes
//! suggestions programmatically.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use super::AssertionTable;

/// A supported output format name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OutputFormat {
    /// TOML `[[preflight]]` tables (canonical).
    Toml,
    /// A JSON array of assertion objects.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Toml => write!(f, "toml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, FormatError> {
        match s {
            "toml" => Ok(OutputFormat::Toml),
            "json" => Ok(OutputFormat::Json),
            other => Err(FormatError::Unsupported {
                name: other.to_owned(),
            }),
        }
    }
}

/// Errors produced while rendering assertions.
#[derive(Debug, Error)]
pub enum FormatError {
    /// No formatter registered under the requested name.
    #[error("unsupported format: {name} (available: toml, json)")]
    Unsupported {
        /// The requested format name.
        name: String,
    },
    /// TOML serialization failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Writing the rendered output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders an [`AssertionTable`] in one specific format.
pub trait Formatter {
    /// Render `assertions` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] when serialization or writing fails.
    fn format(&self, writer: &mut dyn Write, assertions: &AssertionTable)
        -> Result<(), FormatError>;

    /// The format this formatter renders.
    fn name(&self) -> OutputFormat;
}

/// Serialization wrapper so the TOML output nests assertions under
/// repeated `[[preflight]]` tables.
#[derive(Serialize)]
struct PreflightDocument<'a> {
    preflight: &'a AssertionTable,
}

/// Canonical TOML renderer.
#[derive(Debug, Default)]
pub struct TomlFormatter;

impl Formatter for TomlFormatter {
    fn format(
        &self,
        writer: &mut dyn Write,
        assertions: &AssertionTable,
    ) -> Result<(), FormatError> {
        let document = PreflightDocument {
            preflight: assertions,
        };
        let rendered = toml::to_string_pretty(&document)?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }

    fn name(&self) -> OutputFormat {
        OutputFormat::Toml
    }
}

/// JSON renderer for programmatic consumers.
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(
        &self,
        writer: &mut dyn Write,
        assertions: &AssertionTable,
    ) -> Result<(), FormatError> {
        serde_json::to_writer_pretty(&mut *writer, assertions)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn name(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

/// Registry of available formatters.
///
/// # Example
///
/// ```rust
/// use phonid::preflight::{FormatterRegistry, OutputFormat};
///
/// let registry = FormatterRegistry::new();
/// let formatter = registry.get(OutputFormat::Toml)?;
/// assert_eq!(formatter.name(), OutputFormat::Toml);
/// # Ok::<(), phonid::preflight::format::FormatError>(())
/// ```
pub struct FormatterRegistry {
    formatters: BTreeMap<OutputFormat, Box<dyn Formatter>>,
}

impl FormatterRegistry {
    /// A registry with all built-in formatters.
    pub fn new() -> Self {
        let mut registry = FormatterRegistry {
            formatters: BTreeMap::new(),
        };
        registry.register(Box::new(TomlFormatter));
        registry.register(Box::new(JsonFormatter));
        registry
    }

    /// Add (or replace) a formatter.
    pub fn register(&mut self, formatter: Box<dyn Formatter>) {
        self.formatters.insert(formatter.name(), formatter);
    }

    /// Look up a formatter by format.
    ///
    /// # Errors
    ///
    /// [`FormatError::Unsupported`] when nothing is registered under
    /// `format`.
    pub fn get(&self, format: OutputFormat) -> Result<&dyn Formatter, FormatError> {
        self.formatters
            .get(&format)
            .map(Box::as_ref)
            .ok_or_else(|| FormatError::Unsupported {
                name: format.to_string(),
            })
    }

    /// All registered formats.
    pub fn available_formats(&self) -> Vec<OutputFormat> {
        self.formatters.keys().copied().collect()
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        FormatterRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preflight::Assertion;

    fn table() -> AssertionTable {
        vec![
            Assertion {
                input: 0,
                expect: "bab".into(),
                comment: "Lower boundary".into(),
            },
            Assertion {
                input: 26,
                expect: "kik".into(),
                comment: "Upper boundary (single word)".into(),
            },
        ]
    }

    #[test]
    fn test_toml_output_shape() {
        let mut buffer = Vec::new();
        TomlFormatter.format(&mut buffer, &table()).unwrap();
        let rendered = String::from_utf8(buffer).unwrap();

        assert!(rendered.contains("[[preflight]]"));
        assert!(rendered.contains("input = 0"));
        assert!(rendered.contains("expect = \"bab\""));
        assert!(rendered.contains("comment = \"Upper boundary (single word)\""));
    }

    #[test]
    fn test_json_output_shape() {
        let mut buffer = Vec::new();
        JsonFormatter.format(&mut buffer, &table()).unwrap();
        let rendered = String::from_utf8(buffer).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed[0]["input"], 0);
        assert_eq!(parsed[1]["expect"], "kik");
    }

    #[test]
    fn test_registry_lookup() {
        let registry = FormatterRegistry::new();
        assert_eq!(
            registry.available_formats(),
            vec![OutputFormat::Toml, OutputFormat::Json]
        );
        assert!(registry.get(OutputFormat::Json).is_ok());
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("toml".parse::<OutputFormat>().unwrap(), OutputFormat::Toml);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
