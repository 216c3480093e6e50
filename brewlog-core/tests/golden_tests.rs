//! Golden file tests for recipe form validation.
//!
//! Each JSON file under `fixtures/validation/<brew type>/` holds a submitted
//! form and what should come out of it: either the `recipe_details` blob that
//! would be stored, or the per-field error messages shown to the user.
//!
//! Test format:
//! ```json
//! {
//!   "brew_type": "drip",
//!   "form": { "title": "...", "extractionSteps": [...] },
//!   "expected": { "details": { ... } }      // or { "errors": { "field": ["..."] } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use brewlog_core::{prepare_recipe_row, validate_recipe, BrewType, FormData};
use glob::glob;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

/// A test case loaded from a JSON fixture file
#[derive(Debug, Deserialize)]
struct TestCase {
    brew_type: BrewType,
    form: FormData,
    expected: Expected,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Expected {
    /// The stored `recipe_details` blob for a valid submission
    Details(Value),
    /// Messages per field for a rejected submission
    Errors(BTreeMap<String, Vec<String>>),
}

/// Load all test cases from the espresso and drip directories
fn load_test_cases() -> Vec<(String, TestCase)> {
    let fixtures_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/validation");

    let mut cases = Vec::new();

    for subdir in ["espresso", "drip"] {
        let pattern = fixtures_dir.join(subdir).join("*.json");
        let pattern_str = pattern.to_string_lossy();

        for entry in glob(&pattern_str).expect("Failed to read glob pattern") {
            let path = entry.expect("Failed to read directory entry");
            let name = format!("{}/{}", subdir, path.file_stem().unwrap().to_string_lossy());
            let content = fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
            let case: TestCase = serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));
            assert_eq!(
                case.brew_type.as_str(),
                subdir,
                "{} is filed under the wrong brew type",
                name
            );
            cases.push((name, case));
        }
    }

    assert!(
        !cases.is_empty(),
        "No test fixtures found in {:?}",
        fixtures_dir
    );
    cases
}

#[test]
fn test_validation_golden_files() {
    let mut failures = Vec::new();

    for (name, case) in load_test_cases() {
        let result = validate_recipe(case.brew_type, &case.form);

        match (result, case.expected) {
            (Ok(input), Expected::Details(expected)) => {
                let row = prepare_recipe_row(Uuid::nil(), &input);
                let actual = serde_json::to_value(&row.recipe_details).unwrap();
                if actual != expected {
                    failures.push(format!(
                        "{}: details mismatch\n  expected: {}\n  actual:   {}",
                        name, expected, actual
                    ));
                }
            }
            (Err(errors), Expected::Errors(expected)) => {
                let actual = errors.messages();
                if actual != expected {
                    failures.push(format!(
                        "{}: errors mismatch\n  expected: {:?}\n  actual:   {:?}",
                        name, expected, actual
                    ));
                }
            }
            (Ok(input), Expected::Errors(expected)) => failures.push(format!(
                "{}: expected errors {:?}, but validation passed with {:?}",
                name, expected, input
            )),
            (Err(errors), Expected::Details(_)) => failures.push(format!(
                "{}: expected success, got {:?}",
                name,
                errors.messages()
            )),
        }
    }

    assert!(
        failures.is_empty(),
        "{} golden case(s) failed:\n\n{}",
        failures.len(),
        failures.join("\n\n")
    );
}
