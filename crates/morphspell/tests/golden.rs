//! Golden tests: compare handle output against expectations recorded in
//! tests/data/golden.json for the walk fixture (tests/data/walk.{aff,dic}).
//!
//! Run: cargo test -p morphspell --test golden

use std::path::PathBuf;

use morphspell::MorphspellHandle;
use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn data_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(filename)
}

fn load_golden() -> Value {
    let path = data_path("golden.json");
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read golden file {}: {}", path.display(), e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("failed to parse golden file {}: {}", path.display(), e))
}

fn create_handle() -> MorphspellHandle {
    MorphspellHandle::from_files(data_path("walk.dic"), data_path("walk.aff"))
        .unwrap_or_else(|e| panic!("failed to create MorphspellHandle: {}", e))
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|v| v.as_str().expect("expected a string").to_string())
        .collect()
}

/// Run `query` on every key of `golden[section]` and compare with the
/// recorded list. Panics with every mismatch at once.
fn check_lists(section: &str, query: impl Fn(&str) -> Vec<String>) {
    let golden = load_golden();
    let expected = golden[section]
        .as_object()
        .unwrap_or_else(|| panic!("golden section '{}' should be an object", section));

    let mut words: Vec<&String> = expected.keys().collect();
    words.sort();

    let mismatches: Vec<String> = words
        .iter()
        .filter_map(|word| {
            let want = string_list(&expected[word.as_str()]);
            let got = query(word);
            (got != want).then(|| format!("  [{}] expected={:?}, got={:?}", word, want, got))
        })
        .collect();

    if !mismatches.is_empty() {
        panic!(
            "\n=== {} MISMATCHES: {}/{} ===\n{}",
            section.to_uppercase(),
            mismatches.len(),
            words.len(),
            mismatches.join("\n")
        );
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
fn golden_spell() {
    let handle = create_handle();
    let golden = load_golden();
    let expected = golden["spell"].as_object().expect("spell should be an object");

    let mut mismatches = Vec::new();
    for (word, value) in expected {
        let want = value
            .as_bool()
            .unwrap_or_else(|| panic!("spell value for '{}' should be boolean", word));
        let got = handle.spell(word);
        if got != want {
            mismatches.push(format!("  [{}] expected={}, got={}", word, want, got));
        }
    }
    assert!(mismatches.is_empty(), "\n{}", mismatches.join("\n"));
}

#[test]
fn golden_suggest() {
    let handle = create_handle();
    check_lists("suggest", |word| handle.suggest(word));
}

#[test]
fn golden_stem() {
    let handle = create_handle();
    check_lists("stem", |word| handle.stem(word));
}

#[test]
fn golden_analyze() {
    let handle = create_handle();
    check_lists("analyze", |word| handle.analyze(word));
}

#[derive(Debug, Deserialize)]
struct GenerateCase {
    word: String,
    example: String,
    forms: Vec<String>,
}

#[test]
fn golden_generate() {
    let handle = create_handle();
    let cases: Vec<GenerateCase> = serde_json::from_value(load_golden()["generate"].clone())
        .expect("generate should be a list of cases");
    assert!(!cases.is_empty());

    for case in &cases {
        assert_eq!(
            handle.generate(&case.word, &case.example),
            case.forms,
            "generate({:?}, {:?})",
            case.word,
            case.example
        );
    }
}
