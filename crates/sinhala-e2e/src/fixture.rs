//! Fixture loading for translation test cases.
//!
//! The fixture is a UTF-8 JSON array of `{id, input, type}` records. It is
//! loaded once, explicitly, before any case runs; a missing or malformed
//! file is a fatal [`HarnessError::FixtureLoad`]. There is no module-level
//! fixture state.

use crate::result::{HarnessError, HarnessResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum input characters shown in a case label
const LABEL_INPUT_CHARS: usize = 30;

/// One Singlish sentence to push through the page.
///
/// Immutable after load; `id` is unique and ordering follows the fixture
/// file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Unique, stable case id
    pub id: u32,
    /// Singlish input text (may be empty)
    pub input: String,
    /// Category label, e.g. "basic" or "edge"
    #[serde(rename = "type")]
    pub case_type: String,
}

impl TestCase {
    /// Whether the trimmed input is non-empty.
    ///
    /// Cases without real input get no output assertion and no output poll.
    #[must_use]
    pub fn has_input(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// Human-readable case label, input truncated for log lines
    #[must_use]
    pub fn label(&self) -> String {
        let mut snippet: String = self.input.chars().take(LABEL_INPUT_CHARS).collect();
        if self.input.chars().count() > LABEL_INPUT_CHARS {
            snippet.push_str("...");
        }
        format!(
            "Test Case {} [{}]: \"{snippet}\"",
            self.id,
            self.case_type.to_uppercase()
        )
    }
}

/// Load the ordered fixture from a JSON file.
///
/// # Errors
///
/// Returns [`HarnessError::FixtureLoad`] if the file is missing or does not
/// parse as a `TestCase` array. No partial-load recovery is attempted.
pub fn load_fixtures(path: impl AsRef<Path>) -> HarnessResult<Vec<TestCase>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| HarnessError::FixtureLoad {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let cases: Vec<TestCase> =
        serde_json::from_str(&raw).map_err(|e| HarnessError::FixtureLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    tracing::debug!(path = %path.display(), cases = cases.len(), "fixture loaded");
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_fixtures_preserves_order() {
        let file = write_fixture(
            r#"[
                {"id": 1, "input": "mama gedara yanawa", "type": "basic"},
                {"id": 2, "input": "", "type": "edge"},
                {"id": 3, "input": "oyaata kohomada?", "type": "punctuation"}
            ]"#,
        );
        let cases = load_fixtures(file.path()).unwrap();
        assert_eq!(cases.len(), 3);
        assert_eq!(cases[0].id, 1);
        assert_eq!(cases[0].case_type, "basic");
        assert_eq!(cases[1].input, "");
        assert_eq!(cases[2].id, 3);
    }

    #[test]
    fn test_load_fixtures_missing_file_is_fixture_load_error() {
        let err = load_fixtures("does/not/exist.json").unwrap_err();
        assert!(err.is_fatal());
        match err {
            HarnessError::FixtureLoad { path, .. } => assert!(path.contains("exist.json")),
            other => panic!("Expected FixtureLoad, got {other}"),
        }
    }

    #[test]
    fn test_load_fixtures_malformed_json_is_fixture_load_error() {
        let file = write_fixture("[{\"id\": 1,");
        let err = load_fixtures(file.path()).unwrap_err();
        assert!(matches!(err, HarnessError::FixtureLoad { .. }));
    }

    #[test]
    fn test_load_fixtures_wrong_shape_is_fixture_load_error() {
        let file = write_fixture(r#"{"id": 1, "input": "x", "type": "basic"}"#);
        let err = load_fixtures(file.path()).unwrap_err();
        assert!(matches!(err, HarnessError::FixtureLoad { .. }));
    }

    #[test]
    fn test_has_input_trims_whitespace() {
        let case = TestCase {
            id: 1,
            input: "   \t\n".to_string(),
            case_type: "edge".to_string(),
        };
        assert!(!case.has_input());

        let case = TestCase {
            id: 2,
            input: " api yamu ".to_string(),
            case_type: "basic".to_string(),
        };
        assert!(case.has_input());
    }

    #[test]
    fn test_label_truncates_long_input() {
        let case = TestCase {
            id: 7,
            input: "a".repeat(40),
            case_type: "long".to_string(),
        };
        let label = case.label();
        assert!(label.starts_with("Test Case 7 [LONG]"));
        assert!(label.contains(&"a".repeat(30)));
        assert!(label.contains("..."));
        assert!(!label.contains(&"a".repeat(31)));
    }

    #[test]
    fn test_label_short_input_not_truncated() {
        let case = TestCase {
            id: 1,
            input: "mama gedara yanawa".to_string(),
            case_type: "basic".to_string(),
        };
        assert_eq!(case.label(), "Test Case 1 [BASIC]: \"mama gedara yanawa\"");
    }

    #[test]
    fn test_type_field_round_trips_as_type() {
        let json = r#"{"id": 9, "input": "hari", "type": "basic"}"#;
        let case: TestCase = serde_json::from_str(json).unwrap();
        assert_eq!(case.case_type, "basic");
        let back = serde_json::to_string(&case).unwrap();
        assert!(back.contains("\"type\":\"basic\""));
    }
}
