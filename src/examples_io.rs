//! Loading example files from disk (spec.md §6, SPEC_FULL.md §4.7, C9).
//!
//! Example files are plain JSON arrays of tuples -- `[x, y, inside]` for
//! shapes, `[input, expected]` for strings. Malformed files surface as
//! `anyhow::Error` with context, never a panic, matching the teacher's
//! `load_grid_from_file`.

use std::path::Path;

use anyhow::Context;

use crate::shape::ShapeExample;
use crate::string::StringExample;

pub fn load_shape_examples(path: &Path) -> anyhow::Result<Vec<ShapeExample>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_shape_examples(&text)
        .with_context(|| format!("failed to parse shape examples from {}", path.display()))
}

pub fn load_string_examples(path: &Path) -> anyhow::Result<Vec<StringExample>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_string_examples(&text)
        .with_context(|| format!("failed to parse string examples from {}", path.display()))
}

fn parse_shape_examples(text: &str) -> anyhow::Result<Vec<ShapeExample>> {
    Ok(serde_json::from_str(text)?)
}

fn parse_string_examples(text: &str) -> anyhow::Result<Vec<StringExample>> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shape_examples() {
        let examples = parse_shape_examples("[[0.0, 0.0, true], [3.0, 3.0, false]]").unwrap();
        assert_eq!(examples, vec![(0.0, 0.0, true), (3.0, 3.0, false)]);
    }

    #[test]
    fn parses_string_examples() {
        let examples = parse_string_examples(r#"[["Hello World", "hello-world"]]"#).unwrap();
        assert_eq!(examples, vec![("Hello World".to_owned(), "hello-world".to_owned())]);
    }

    #[test]
    fn malformed_text_is_an_error_not_a_panic() {
        assert!(parse_shape_examples("not json").is_err());
    }
}
