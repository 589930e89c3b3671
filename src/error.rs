use thiserror::Error;

/// Errors that cross the `synthesize` API boundary (spec.md §7).
///
/// Internal interpretation failures never reach here: the signature store
/// absorbs them by collapsing the offending expression's signature to `⊥`
/// and dropping it (see [`crate::signature::SignatureStore`]).
#[derive(Error, Debug)]
pub enum SynthesizeError {
    #[error("no examples were provided")]
    EmptyExamples,

    #[error("no correct expression was found within {iterations} growth iteration(s)")]
    ExhaustedBudget { iterations: usize },
}

/// Errors specific to the optional LLM-backed synthesizer (spec.md §4.6, §7).
#[cfg(feature = "llm")]
#[derive(Error, Debug)]
pub enum LlmSynthesizeError {
    #[error(transparent)]
    Synthesize(#[from] SynthesizeError),

    #[error("transport error talking to the completion endpoint")]
    Transport(#[from] Box<ureq::Error>),

    #[error("response did not contain a recognizable DSL expression")]
    InvalidResponse,

    #[error("the parsed expression did not satisfy the examples")]
    ValidationFailed,
}
