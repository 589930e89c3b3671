//! Program synthesis by example: bottom-up enumerative search with
//! observational-equivalence pruning, over a shape DSL and a string DSL.

pub mod coord;
pub mod engine;
pub mod error;
pub mod examples_io;
#[cfg(feature = "llm")]
pub mod llm;
pub mod shape;
pub mod signature;
pub mod string;
pub mod utils;

pub use error::SynthesizeError;
pub use shape::{ShapeExample, ShapeExpr};
pub use string::{StringExample, StringExpr};

/// Synthesizes a shape predicate matching every `(x, y, inside)` example
/// (spec.md §6). Non-accumulating growth, per spec.md §4.3/§4.4.
pub fn synthesize_shape(
    examples: &[ShapeExample],
    max_iterations: usize,
) -> Result<ShapeExpr, SynthesizeError> {
    engine::synthesize(&shape::ShapeSynthesizer, examples, max_iterations, false)
}

/// Synthesizes a string transformation matching every `(input, expected)`
/// example (spec.md §6). `accumulate` is exposed explicitly per this
/// project's resolution of spec.md §9's Open Question.
pub fn synthesize_string(
    examples: &[StringExample],
    max_iterations: usize,
    accumulate: bool,
) -> Result<StringExpr, SynthesizeError> {
    engine::synthesize(&string::StringSynthesizer::default(), examples, max_iterations, accumulate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesize_shape_matches_s1() {
        let examples =
            vec![(0.0, 0.0, true), (1.0, 1.0, true), (2.0, 2.0, true), (3.0, 3.0, false)];
        let expr = synthesize_shape(&examples, 5).unwrap();
        assert!(examples.iter().all(|&(x, y, expected)| expr.interpret(x, y) == expected));
    }

    #[test]
    fn synthesize_string_matches_s4() {
        let examples = vec![("Hello World".to_owned(), "hello-world".to_owned())];
        let expr = synthesize_string(&examples, 2, true).unwrap();
        assert_eq!(expr.interpret("Hello World").as_deref(), Some("hello-world"));
    }
}
