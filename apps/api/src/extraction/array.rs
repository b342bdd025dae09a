//! Array extraction — pulls the complete elements of a named top-level array out of a
//! JSON document that is still streaming.
//!
//! The scan starts just past the array's `[` and walks forward once, tracking string
//! state and nesting depth. Elements are only emitted when they are balanced units that
//! parse as standalone JSON, so a trailing element that is still being written is never
//! returned. Results for a growing buffer only ever grow.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::extraction::scanner::locate_member;

/// Which kind of element the array holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayMode {
    /// `["Go", "Rust"]`
    Strings,
    /// `[{"company": "Acme"}, ...]`
    Objects,
}

/// Elements of a named array that have fully arrived.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArrayExtraction {
    pub elements: Vec<Value>,
    /// `true` once the array's closing `]` has streamed in.
    pub complete: bool,
}

impl ArrayExtraction {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Extracts the complete elements of the top-level array `field`.
///
/// Never fails: an absent array, a non-array value, or an element that does not parse
/// all degrade to "not found yet".
pub fn extract_array(buffer: &str, field: &str, mode: ArrayMode) -> ArrayExtraction {
    let Some(open) = locate_member(buffer, field) else {
        return ArrayExtraction::default();
    };
    let bytes = buffer.as_bytes();
    if bytes[open] != b'[' {
        return ArrayExtraction::default();
    }

    let mut elements = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_pending = false;
    // Objects mode: index of the `{` opening the current candidate.
    let mut candidate_start: Option<usize> = None;
    // Strings mode: index of the opening quote of the current token.
    let mut token_start: Option<usize> = None;
    // Strings mode: a closed token waiting for its `,` or `]`.
    let mut closed_token: Option<(usize, usize)> = None;

    for (i, &b) in bytes.iter().enumerate().skip(open + 1) {
        if in_string {
            if escape_pending {
                escape_pending = false;
            } else if b == b'\\' {
                escape_pending = true;
            } else if b == b'"' {
                in_string = false;
                if let Some(start) = token_start.take() {
                    closed_token = Some((start, i));
                }
            }
            continue;
        }

        match b {
            b'"' => {
                in_string = true;
                if mode == ArrayMode::Strings && depth == 0 {
                    token_start = Some(i);
                    closed_token = None;
                }
            }
            b'{' | b'[' => {
                if b == b'{' && depth == 0 && mode == ArrayMode::Objects {
                    candidate_start = Some(i);
                }
                depth += 1;
            }
            b']' if depth == 0 => {
                if let Some((start, end)) = closed_token.take() {
                    push_string(&mut elements, &buffer[start..=end], field);
                }
                return ArrayExtraction {
                    elements,
                    complete: true,
                };
            }
            b'}' | b']' => {
                if depth == 0 {
                    // Stray closer; not valid JSON, nothing to balance.
                    continue;
                }
                depth -= 1;
                if depth == 0 && b == b'}' {
                    if let Some(start) = candidate_start.take() {
                        push_object(&mut elements, &buffer[start..=i], field);
                    }
                }
            }
            b',' if depth == 0 => {
                if let Some((start, end)) = closed_token.take() {
                    push_string(&mut elements, &buffer[start..=end], field);
                }
            }
            _ if depth == 0 && !b.is_ascii_whitespace() => {
                closed_token = None;
            }
            _ => {}
        }
    }

    // End of buffer: anything still open is dropped.
    ArrayExtraction {
        elements,
        complete: false,
    }
}

fn push_string(elements: &mut Vec<Value>, token: &str, field: &str) {
    match serde_json::from_str::<String>(token) {
        Ok(s) => elements.push(Value::String(s)),
        Err(e) => debug!("Discarding malformed string in '{field}': {e}"),
    }
}

fn push_object(elements: &mut Vec<Value>, candidate: &str, field: &str) {
    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => elements.push(value),
        Err(e) => debug!("Discarding malformed object in '{field}': {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCENARIO_A: &str =
        r#"{"name":"Ana","skills":["Go","Rust"],"experience":[{"company":"Acme","title":"Eng"#;

    fn resume_doc() -> Value {
        json!({
            "name": "Ana Souza",
            "summary": "Backend engineer who likes \"boring\" tech {and braces}",
            "skills": ["Go", "Rust", "Post\"gres\"", "C++ [templates]"],
            "experience": [
                {
                    "company": "Acme",
                    "title": "Lead \"Platform\" Engineer",
                    "bullets": ["Cut p99 by 40%", "Owned {on-call}"],
                    "meta": {"remote": true, "team": {"size": 8}}
                },
                {
                    "company": "Globex",
                    "title": "Engineer",
                    "bullets": [],
                    "dates": {"start": "2019-01", "end": null}
                },
                {
                    "company": "Initech ]}",
                    "title": "Intern",
                    "backslash": "C:\\temp\\"
                }
            ]
        })
    }

    // ── scenarios ───────────────────────────────────────────────────────────

    #[test]
    fn test_scenario_a_skills_complete() {
        let skills = extract_array(SCENARIO_A, "skills", ArrayMode::Strings);
        assert_eq!(skills.elements, vec![json!("Go"), json!("Rust")]);
        assert!(skills.complete);
    }

    #[test]
    fn test_scenario_a_experience_still_open() {
        let experience = extract_array(SCENARIO_A, "experience", ArrayMode::Objects);
        assert!(experience.elements.is_empty());
        assert!(!experience.complete);
    }

    #[test]
    fn test_scenario_b_experience_closes() {
        let buffer = format!("{SCENARIO_A}\"}}]}}");
        let experience = extract_array(&buffer, "experience", ArrayMode::Objects);
        assert_eq!(
            experience.elements,
            vec![json!({"company": "Acme", "title": "Eng"})]
        );
        assert!(experience.complete);
    }

    // ── strings mode ────────────────────────────────────────────────────────

    #[test]
    fn test_strings_wait_for_delimiter() {
        let buffer = r#"{"skills":["Go","Rust""#;
        let skills = extract_array(buffer, "skills", ArrayMode::Strings);
        assert_eq!(skills.elements, vec![json!("Go")]);
        assert!(!skills.complete);
    }

    #[test]
    fn test_strings_unclosed_token_excluded() {
        let buffer = r#"{"skills":["Go","Ru"#;
        let skills = extract_array(buffer, "skills", ArrayMode::Strings);
        assert_eq!(skills.elements, vec![json!("Go")]);
    }

    #[test]
    fn test_strings_with_whitespace_between_delimiters() {
        let buffer = "{\"skills\": [\n  \"Go\" ,\n  \"Rust\"\n ]";
        let skills = extract_array(buffer, "skills", ArrayMode::Strings);
        assert_eq!(skills.elements, vec![json!("Go"), json!("Rust")]);
        assert!(skills.complete);
    }

    #[test]
    fn test_strings_escaped_quotes_and_brackets() {
        let buffer = r#"{"skills":["Post\"gres\"","C++ [templates]","a,b"],"x":1}"#;
        let skills = extract_array(buffer, "skills", ArrayMode::Strings);
        assert_eq!(
            skills.elements,
            vec![json!("Post\"gres\""), json!("C++ [templates]"), json!("a,b")]
        );
    }

    #[test]
    fn test_strings_mode_skips_non_string_elements() {
        let buffer = r#"{"skills":["Go",{"name":"Rust"},3,"Zig"]}"#;
        let skills = extract_array(buffer, "skills", ArrayMode::Strings);
        assert_eq!(skills.elements, vec![json!("Go"), json!("Zig")]);
    }

    #[test]
    fn test_empty_array_is_complete() {
        let skills = extract_array(r#"{"skills":[]}"#, "skills", ArrayMode::Strings);
        assert!(skills.is_empty());
        assert!(skills.complete);
    }

    // ── objects mode ────────────────────────────────────────────────────────

    #[test]
    fn test_objects_nested_braces_and_arrays() {
        let buffer = r#"{"experience":[{"a":{"b":[1,{"c":2}]}},{"d":"}{"}]}"#;
        let experience = extract_array(buffer, "experience", ArrayMode::Objects);
        assert_eq!(
            experience.elements,
            vec![json!({"a": {"b": [1, {"c": 2}]}}), json!({"d": "}{"})]
        );
        assert!(experience.complete);
    }

    #[test]
    fn test_objects_trailing_candidate_discarded() {
        let buffer = r#"{"experience":[{"company":"Acme"},{"company":"Glo"#;
        let experience = extract_array(buffer, "experience", ArrayMode::Objects);
        assert_eq!(experience.elements, vec![json!({"company": "Acme"})]);
        assert!(!experience.complete);
    }

    #[test]
    fn test_objects_malformed_candidate_is_dropped() {
        let buffer = r#"{"experience":[{"company" "Acme"},{"company":"Globex"}]}"#;
        let experience = extract_array(buffer, "experience", ArrayMode::Objects);
        assert_eq!(experience.elements, vec![json!({"company": "Globex"})]);
    }

    #[test]
    fn test_missing_or_non_array_field() {
        assert_eq!(
            extract_array(SCENARIO_A, "education", ArrayMode::Objects),
            ArrayExtraction::default()
        );
        assert_eq!(
            extract_array(r#"{"skills":"Go"}"#, "skills", ArrayMode::Strings),
            ArrayExtraction::default()
        );
    }

    #[test]
    fn test_nested_array_with_same_key_is_ignored() {
        let buffer = r#"{"projects":[{"skills":["Nested"]}],"skills":["Top"]}"#;
        let skills = extract_array(buffer, "skills", ArrayMode::Strings);
        assert_eq!(skills.elements, vec![json!("Top")]);
    }

    // ── streaming properties ────────────────────────────────────────────────

    #[test]
    fn test_char_by_char_objects_only_complete_elements() {
        let doc = resume_doc();
        let text = serde_json::to_string(&doc).unwrap();
        let expected = doc["experience"].as_array().unwrap().clone();

        let mut seen = 0;
        for (end, _) in text.char_indices().skip(1).chain([(text.len(), ' ')]) {
            let prefix = &text[..end];
            let result = extract_array(prefix, "experience", ArrayMode::Objects);
            let count = result.elements.len();

            assert!(count >= seen, "elements retracted at prefix length {end}");
            assert_eq!(result.elements[..], expected[..count]);
            if count > seen {
                assert!(
                    prefix.ends_with('}'),
                    "element appeared before its closing brace at {end}"
                );
            }
            seen = count;
        }

        let full = extract_array(&text, "experience", ArrayMode::Objects);
        assert_eq!(Value::Array(full.elements), doc["experience"]);
        assert!(full.complete);
    }

    #[test]
    fn test_char_by_char_pretty_printed_strings() {
        let doc = resume_doc();
        let text = serde_json::to_string_pretty(&doc).unwrap();
        let expected = doc["skills"].as_array().unwrap().clone();

        let mut seen = 0;
        for (end, _) in text.char_indices() {
            let result = extract_array(&text[..end], "skills", ArrayMode::Strings);
            let count = result.elements.len();
            assert!(count >= seen);
            assert_eq!(result.elements[..], expected[..count]);
            seen = count;
        }
        assert_eq!(seen, expected.len());
    }

    #[test]
    fn test_idempotent_for_same_buffer() {
        let buffer = format!("{SCENARIO_A}\"}},{{\"company\":\"Glo");
        let first = extract_array(&buffer, "experience", ArrayMode::Objects);
        let second = extract_array(&buffer, "experience", ArrayMode::Objects);
        assert_eq!(first, second);
    }
}
