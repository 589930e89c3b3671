//! String-specific terminal generation, growth, and correctness checking
//! (spec.md §4.5, C5).
//!
//! `grow` deliberately restricts `Concatenate` to pairs of *terminals*,
//! never grown compounds, to keep the candidate set from exploding (spec.md
//! §4.5). The driver passes the once-computed terminal set into every
//! `grow` call, so `StringSynthesizer` itself holds no state.

use itertools::Itertools;

use crate::engine::Synthesizer;
use crate::string::expr::StringExpr;

/// `(input, output)` pairs, as spec.md §6 defines string examples.
pub type StringExample = (String, String);

/// The stacked vector of every example's input string (spec.md §4.5).
pub struct StringProbe {
    pub inputs: Vec<String>,
}

/// Fixed delimiter table used by `grow` for `Replace` and `SplitThenTake`
/// (spec.md §4.5), grounded in the original synthesizer's delimiter list.
const DELIMITERS: &[&str] = &[" ", "_", "-", ".", "/", "\\", "@", "(", ")", ",", "#", "*"];

/// Fixed literal table always offered alongside whatever characters appear
/// in the examples (spec.md §4.5).
const FIXED_LITERALS: &[&str] = &[
    " ", ".", ",", "-", "/", "_", ":", ";", "!", "?", "*", "#", "@", "$", "\\", "v", "(", ")",
    ".00", "***", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
];

const SUBSTRING_WINDOWS: &[(i64, i64)] = &[(0, 1), (0, 3), (1, 4)];
const REPEAT_COUNTS: &[i64] = &[2, 3];
const SPLIT_INDICES: &[i64] = &[0, 1, -1];

#[derive(Debug, Default, Clone, Copy)]
pub struct StringSynthesizer;

impl Synthesizer for StringSynthesizer {
    type Expr = StringExpr;
    type Example = StringExample;
    type Probe = StringProbe;
    type Signature = Vec<Option<String>>;

    fn generate_terminals(&self, examples: &[StringExample]) -> Vec<StringExpr> {
        let mut terminals = vec![StringExpr::InputString];

        let mut literals: Vec<String> = FIXED_LITERALS.iter().map(|s| s.to_string()).collect();
        for (input, output) in examples {
            for c in input.chars().chain(output.chars()) {
                literals.push(c.to_string());
            }
        }
        literals.sort();
        literals.dedup();

        for literal in literals {
            if !literal.is_empty() {
                terminals.push(StringExpr::literal(literal));
            }
        }

        terminals
    }

    fn grow(&self, base: &[StringExpr], terminals: &[StringExpr]) -> Vec<StringExpr> {
        let mut grown = Vec::new();

        for b in base {
            grown.push(StringExpr::to_upper(b.clone()));
            grown.push(StringExpr::to_lower(b.clone()));
            grown.push(StringExpr::capitalize(b.clone()));
            grown.push(StringExpr::strip(b.clone()));

            for &n in REPEAT_COUNTS {
                grown.push(StringExpr::repeat(b.clone(), n));
            }
            for &(start, end) in SUBSTRING_WINDOWS {
                grown.push(StringExpr::substring(b.clone(), start, end));
            }
            for delim in DELIMITERS {
                grown.push(StringExpr::replace(
                    b.clone(),
                    StringExpr::literal(*delim),
                    StringExpr::literal(""),
                ));
                grown.push(StringExpr::replace(
                    b.clone(),
                    StringExpr::literal(*delim),
                    StringExpr::literal("-"),
                ));
                for &index in SPLIT_INDICES {
                    grown.push(StringExpr::split_then_take(
                        b.clone(),
                        StringExpr::literal(*delim),
                        index,
                    ));
                }
            }
        }

        for (a, b) in terminals.iter().cartesian_product(terminals.iter()) {
            grown.push(StringExpr::concatenate(a.clone(), b.clone()));
        }

        grown
    }

    fn is_correct(&self, expr: &StringExpr, examples: &[StringExample]) -> bool {
        examples
            .iter()
            .all(|(input, expected)| expr.interpret(input).as_deref() == Some(expected.as_str()))
    }

    fn extract_probe(&self, examples: &[StringExample]) -> StringProbe {
        StringProbe { inputs: examples.iter().map(|(input, _)| input.clone()).collect() }
    }

    fn compute_signature(&self, expr: &StringExpr, probe: &StringProbe) -> Vec<Option<String>> {
        probe.inputs.iter().map(|input| expr.interpret(input)).collect()
    }

    fn signature_is_bottom(&self, sig: &Vec<Option<String>>) -> bool {
        sig.iter().all(Option::is_none)
    }
}
