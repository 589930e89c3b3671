//! Optional LLM-backed string synthesizer (spec.md §4.6, SPEC_FULL.md §4.7,
//! C10). Bypasses enumeration: one completion call, one parse, one
//! validation pass against `is_correct`.
//!
//! Ported from `generate_prompt`/`extract_program` in the original
//! implementation, with one deliberate divergence: extraction here is a
//! small recursive-descent parser over the DSL's call syntax rather than
//! `eval`-ing the response text. Rust has no such escape hatch, which is
//! strictly safer than the original.

use std::io::Write;

use serde::Serialize;

use crate::error::LlmSynthesizeError;
use crate::string::{StringExample, StringExpr, StringSynthesizer};
use crate::engine::Synthesizer;

const DSL_DESCRIPTION: &str = r#"You are to synthesize a string processing program using the following DSL:
- InputString(): refers to the input string
- StringLiteral(value): creates a literal string
- Concatenate(a, b): concatenates two strings
- Substring(a, start, end): substring of a from start to end (Python-like slicing)
- ToUpper(a): converts a to upper case
- ToLower(a): converts a to lower case
- Replace(a, old, new): replaces all occurrences of old in a with new
- Strip(a): trims whitespace at both ends of a
- Repeat(a, n): repeats a for n times
- SplitThenTake(a, delim, idx): splits a by delim and takes piece idx
- Capitalize(a): capitalizes a (first letter upper, rest lower)
(You may use nested calls. Only output an expression in this DSL.)

Examples for the specific task:
"#;

const DSL_KEYWORDS: &[&str] = &[
    "InputString",
    "Concatenate",
    "Substring",
    "ToUpper",
    "ToLower",
    "Replace",
    "Strip",
    "Repeat",
    "SplitThenTake",
    "Capitalize",
];

/// One append-only record in the `.jsonl` log (spec.md §6 "Persisted state").
#[derive(Debug, Serialize)]
struct LogRecord {
    prompt: String,
    response: String,
    examples: String,
    program: Option<String>,
    error: Option<String>,
}

pub struct LlmStringSynthesizer {
    endpoint: String,
    log_path: Option<std::path::PathBuf>,
}

impl LlmStringSynthesizer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        LlmStringSynthesizer { endpoint: endpoint.into(), log_path: None }
    }

    pub fn with_log(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    pub fn synthesize(
        &self,
        examples: &[StringExample],
    ) -> Result<StringExpr, LlmSynthesizeError> {
        if examples.is_empty() {
            return Err(LlmSynthesizeError::Synthesize(crate::error::SynthesizeError::EmptyExamples));
        }

        let prompt = generate_prompt(examples);
        let outcome = self.call_endpoint(&prompt);

        let (response_text, result) = match outcome {
            Ok(response_text) => {
                let parsed = extract_program(&response_text).ok_or(LlmSynthesizeError::InvalidResponse);
                let validated = parsed.and_then(|program| {
                    if StringSynthesizer::default().is_correct(&program, examples) {
                        Ok(program)
                    } else {
                        Err(LlmSynthesizeError::ValidationFailed)
                    }
                });
                (response_text, validated)
            }
            Err(err) => (String::new(), Err(err)),
        };

        self.log(&prompt, &response_text, examples, &result);
        result
    }

    fn call_endpoint(&self, prompt: &str) -> Result<String, LlmSynthesizeError> {
        let response: serde_json::Value = ureq::post(&self.endpoint)
            .send_json(serde_json::json!({ "prompt": prompt }))
            .map_err(Box::new)?
            .into_json()
            .map_err(|_| LlmSynthesizeError::InvalidResponse)?;

        response
            .get("text")
            .and_then(|v| v.as_str())
            .map(str::to_owned)
            .ok_or(LlmSynthesizeError::InvalidResponse)
    }

    fn log(
        &self,
        prompt: &str,
        response: &str,
        examples: &[StringExample],
        result: &Result<StringExpr, LlmSynthesizeError>,
    ) {
        let Some(log_path) = &self.log_path else { return };

        let record = LogRecord {
            prompt: prompt.to_owned(),
            response: response.to_owned(),
            examples: format!("{examples:?}"),
            program: result.as_ref().ok().map(|p| format!("{p:?}")),
            error: result.as_ref().err().map(|e| e.to_string()),
        };

        if let Ok(line) = serde_json::to_string(&record) {
            if let Ok(mut file) =
                std::fs::OpenOptions::new().create(true).append(true).open(log_path)
            {
                let _ = writeln!(file, "{line}");
            }
        }
    }
}

fn generate_prompt(examples: &[StringExample]) -> String {
    let mut prompt = DSL_DESCRIPTION.to_owned();
    for (input, output) in examples {
        prompt.push_str(&format!("Input: \"{input}\"   Output: \"{output}\"\n"));
    }
    prompt.push_str("Your output:");
    prompt
}

/// Finds the first response line mentioning a DSL keyword and parses it.
fn extract_program(response: &str) -> Option<StringExpr> {
    let code_line = response
        .lines()
        .map(str::trim)
        .find(|line| DSL_KEYWORDS.iter().any(|kw| line.contains(kw)))?;
    Parser::new(code_line).parse_expr()
}

/// A small recursive-descent parser over the DSL's Python-like call syntax,
/// e.g. `ToLower(Replace(Strip(InputString()), StringLiteral(" "), StringLiteral("-")))`.
struct Parser<'a> {
    remaining: &'a str,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Parser { remaining: source }
    }

    fn skip_ws(&mut self) {
        self.remaining = self.remaining.trim_start();
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining.chars().next()
    }

    fn expect(&mut self, c: char) -> Option<()> {
        self.skip_ws();
        if self.peek_char() == Some(c) {
            self.remaining = &self.remaining[c.len_utf8()..];
            Some(())
        } else {
            None
        }
    }

    fn parse_ident(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let end = self
            .remaining
            .char_indices()
            .find(|&(_, c)| !(c.is_alphanumeric() || c == '_'))
            .map(|(i, _)| i)
            .unwrap_or(self.remaining.len());
        if end == 0 {
            return None;
        }
        let (ident, rest) = self.remaining.split_at(end);
        self.remaining = rest;
        Some(ident)
    }

    fn parse_string_literal(&mut self) -> Option<String> {
        self.skip_ws();
        let quote = self.peek_char().filter(|&c| c == '"' || c == '\'')?;
        let mut chars = self.remaining.char_indices();
        chars.next();
        for (i, c) in chars {
            if c == quote {
                let value = self.remaining[quote.len_utf8()..i].to_owned();
                self.remaining = &self.remaining[i + quote.len_utf8()..];
                return Some(value);
            }
        }
        None
    }

    fn parse_int(&mut self) -> Option<i64> {
        self.skip_ws();
        let negative = self.peek_char() == Some('-');
        let start = if negative { 1 } else { 0 };
        let digits_end = self.remaining[start..]
            .char_indices()
            .find(|&(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i + start)
            .unwrap_or(self.remaining.len());
        if digits_end == start {
            return None;
        }
        let (num, rest) = self.remaining.split_at(digits_end);
        self.remaining = rest;
        num.parse().ok()
    }

    fn parse_args(&mut self) -> Option<Vec<Arg>> {
        self.expect('(')?;
        let mut args = Vec::new();
        self.skip_ws();
        if self.peek_char() == Some(')') {
            self.remaining = &self.remaining[1..];
            return Some(args);
        }
        loop {
            self.skip_ws();
            let arg = if matches!(self.peek_char(), Some('"') | Some('\'')) {
                Arg::Str(self.parse_string_literal()?)
            } else if self.peek_char().map(|c| c == '-' || c.is_ascii_digit()).unwrap_or(false) {
                Arg::Int(self.parse_int()?)
            } else {
                Arg::Expr(self.parse_expr()?)
            };
            args.push(arg);
            self.skip_ws();
            match self.peek_char() {
                Some(',') => {
                    self.remaining = &self.remaining[1..];
                }
                Some(')') => {
                    self.remaining = &self.remaining[1..];
                    break;
                }
                _ => return None,
            }
        }
        Some(args)
    }

    fn parse_expr(&mut self) -> Option<StringExpr> {
        let ident = self.parse_ident()?;
        let args = self.parse_args()?;

        match (ident, args.as_slice()) {
            ("InputString", []) => Some(StringExpr::InputString),
            ("StringLiteral", [Arg::Str(value)]) => Some(StringExpr::literal(value.clone())),
            ("Concatenate", [Arg::Expr(a), Arg::Expr(b)]) => {
                Some(StringExpr::concatenate(a.clone(), b.clone()))
            }
            ("Substring", [Arg::Expr(a), Arg::Int(start), Arg::Int(end)]) => {
                Some(StringExpr::substring(a.clone(), *start, *end))
            }
            ("ToUpper", [Arg::Expr(a)]) => Some(StringExpr::to_upper(a.clone())),
            ("ToLower", [Arg::Expr(a)]) => Some(StringExpr::to_lower(a.clone())),
            ("Capitalize", [Arg::Expr(a)]) => Some(StringExpr::capitalize(a.clone())),
            ("Strip", [Arg::Expr(a)]) => Some(StringExpr::strip(a.clone())),
            ("Replace", [Arg::Expr(a), old, new]) => {
                Some(StringExpr::replace(a.clone(), arg_to_expr(old)?, arg_to_expr(new)?))
            }
            ("Repeat", [Arg::Expr(a), Arg::Int(n)]) => Some(StringExpr::repeat(a.clone(), *n)),
            ("SplitThenTake", [Arg::Expr(a), delim, Arg::Int(idx)]) => {
                Some(StringExpr::split_then_take(a.clone(), arg_to_expr(delim)?, *idx))
            }
            _ => None,
        }
    }
}

enum Arg {
    Expr(StringExpr),
    Str(String),
    Int(i64),
}

fn arg_to_expr(arg: &Arg) -> Option<StringExpr> {
    match arg {
        Arg::Expr(e) => Some(e.clone()),
        Arg::Str(s) => Some(StringExpr::literal(s.clone())),
        Arg::Int(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_call_expression() {
        let source = r#"ToLower(Replace(Strip(InputString()), StringLiteral(" "), StringLiteral("-")))"#;
        let parsed = extract_program(source).unwrap();
        let expected = StringExpr::to_lower(StringExpr::replace(
            StringExpr::strip(StringExpr::InputString),
            StringExpr::literal(" "),
            StringExpr::literal("-"),
        ));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn parses_negative_substring_indices() {
        let source = r#"Substring(InputString(), -3, -1)"#;
        let parsed = extract_program(source).unwrap();
        assert_eq!(parsed, StringExpr::substring(StringExpr::InputString, -3, -1));
    }

    #[test]
    fn extracts_first_dsl_looking_line_from_chatty_response() {
        let response = "Sure, here's the program:\nToUpper(InputString())\nHope that helps!";
        let parsed = extract_program(response).unwrap();
        assert_eq!(parsed, StringExpr::to_upper(StringExpr::InputString));
    }

    #[test]
    fn rejects_non_dsl_response() {
        assert!(extract_program("I cannot help with that.").is_none());
    }

    #[test]
    fn prompt_includes_dsl_description_and_examples() {
        let examples = vec![("Hello World".to_owned(), "hello-world".to_owned())];
        let prompt = generate_prompt(&examples);
        assert!(prompt.contains("InputString()"));
        assert!(prompt.contains("Hello World"));
        assert!(prompt.ends_with("Your output:"));
    }
}
