//! File-level tests for configuration loading: discovery, strict and
//! lenient parsing, and the path from a document on disk to a working
//! encoder.

use phonid::prelude::*;
use phonid::rcfile;

const DOCUMENT: &str = r#"
expected_bit_width = 6

[shuffle]
seed   = 7
rounds = 4

[phonetic]
patterns = ["CVC"]

[phonetic.placeholders]
C = "bdkt"
V = "aeio"

[[preflight]]
input   = 0
expect  = "bab"
comment = "Lower boundary"

[[preflight]]
input   = 63
expect  = "tot"
comment = "Upper boundary (single word)"
"#;

#[test]
fn document_on_disk_builds_a_working_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".phonidrc.toml");
    std::fs::write(&path, DOCUMENT).unwrap();

    let rc = rcfile::load_strict(&path).unwrap();
    assert_eq!(rc.config.expected_bit_width, Some(6));
    assert_eq!(rc.config.shuffle.rounds, 4);

    let (encoder, shuffler) = rc.config.build().unwrap();
    assert!(encoder.validate_preflight(&rc.preflight).is_ok());

    // Capacity 4 * 4 * 4 = 64 = 2^6: the Feistel domain matches the word
    // space exactly, so every shuffled value has a word.
    assert_eq!(shuffler.bit_width(), 6);

    let word = encoder.encode(shuffler.encode(42).unwrap()).unwrap();
    assert_eq!(shuffler.decode(encoder.decode(&word).unwrap()).unwrap(), 42);
}

#[test]
fn preflight_mismatch_surfaces_from_loaded_checks() {
    // Swap the upper-boundary word for a valid word of the wrong value.
    let drifted = DOCUMENT.replace("\"tot\"", "\"bot\"");
    let rc = rcfile::parse_strict(&drifted).unwrap();
    let (encoder, _) = rc.config.build().unwrap();

    let err = encoder.validate_preflight(&rc.preflight).unwrap_err();
    assert!(matches!(err, PreflightError::EncodeMismatch { index: 1, .. }));
}

#[test]
fn discovery_prefers_lexicographically_first_name() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".staging.phonidrc"), "").unwrap();
    std::fs::write(dir.path().join(".phonidrc"), "").unwrap();
    std::fs::write(dir.path().join("notes.toml"), "").unwrap();

    let found = rcfile::find_rc_file(dir.path()).unwrap().unwrap();
    assert_eq!(found.file_name().unwrap(), ".phonidrc");
}

#[test]
fn discovery_ignores_unrecognized_names() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("phonidrc"), "").unwrap();
    std::fs::write(dir.path().join(".phonidrc.bak"), "").unwrap();
    std::fs::write(dir.path().join(".my.config.phonidrc"), "").unwrap();

    assert_eq!(rcfile::find_rc_file(dir.path()).unwrap(), None);
}

#[test]
fn loading_a_missing_file_reports_the_path() {
    let err = rcfile::load_strict(std::path::Path::new("/nonexistent/.phonidrc")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/.phonidrc"));
}

#[test]
fn suggestions_round_trip_through_the_toml_surface() {
    use phonid::preflight::{generate_suggestions, FormatterRegistry, OutputFormat};

    let rc = rcfile::parse_lenient(
        "[phonetic]\npatterns = [\"CVC\"]\n\n[phonetic.placeholders]\nC = \"bdf\"\nV = \"ae\"\n",
    )
    .unwrap();
    let (encoder, _) = rc.config.build().unwrap();

    // Render suggestions as TOML, append them to the original document,
    // and confirm strict mode now accepts it and the checks pass.
    let suggestions = generate_suggestions(&encoder).unwrap();
    let mut rendered = Vec::new();
    FormatterRegistry::new()
        .get(OutputFormat::Toml)
        .unwrap()
        .format(&mut rendered, &suggestions)
        .unwrap();

    let document = format!(
        "[phonetic]\npatterns = [\"CVC\"]\n\n[phonetic.placeholders]\nC = \"bdf\"\nV = \"ae\"\n\n{}",
        String::from_utf8(rendered).unwrap()
    );

    let reloaded = rcfile::parse_strict(&document).unwrap();
    let (encoder, _) = reloaded.config.build().unwrap();
    assert!(encoder.validate_preflight(&reloaded.preflight).is_ok());
}

#[test]
fn lenient_mode_supports_the_suggestion_workflow() {
    // No preflight yet: strict refuses, lenient loads.
    let document = "[phonetic]\npatterns = [\"CVC\"]\n";
    assert!(rcfile::parse_strict(document).is_err());

    let rc = rcfile::parse_lenient(document).unwrap();
    let (encoder, _) = rc.config.build().unwrap();
    assert_eq!(encoder.encode(0).unwrap(), "bab");
}
