//! The bottom-up enumerative synthesis driver (spec.md §4.3, C3).
//!
//! Generic over a DSL via the [`Synthesizer`] trait; the driver itself knows
//! nothing about shapes or strings. It generates terminals, prunes them
//! through a [`SignatureStore`], tests survivors for correctness, and -- on
//! failure -- repeatedly grows the surviving set until a correct expression
//! is found, the grown set saturates (no new, non-equivalent candidates),
//! or `max_iterations` is exhausted.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::ControlFlow;

use crate::error::SynthesizeError;
use crate::signature::{Kept, SignatureStore};
use crate::utils::loop_with_feedback;

/// The capability set a DSL-specific synthesizer must provide (spec.md §4.6).
///
/// An implementation is stateless or holds only configuration (fixed
/// literal/index tables, for instance); all per-call state lives in the
/// driver's [`SignatureStore`].
pub trait Synthesizer {
    type Expr: Clone + Eq + Hash + Debug;
    type Example;
    type Probe;
    type Signature: Eq + Hash;

    /// Depth-0 expressions: literals, input references, primitive shapes.
    /// Enumeration order must be stable across calls (spec.md §4.3 "Tie-break").
    fn generate_terminals(&self, examples: &[Self::Example]) -> Vec<Self::Expr>;

    /// One level of operator composition over `base`. `terminals` is the
    /// once-computed depth-0 set from [`generate_terminals`](Self::generate_terminals),
    /// passed through by the driver for DSLs whose growth rules need it
    /// (e.g. a terminal-only restriction on some operator) without the
    /// synthesizer having to remember it itself.
    fn grow(&self, base: &[Self::Expr], terminals: &[Self::Expr]) -> Vec<Self::Expr>;

    fn is_correct(&self, expr: &Self::Expr, examples: &[Self::Example]) -> bool;

    /// The fixed probe set derived from `examples` (spec.md §3).
    fn extract_probe(&self, examples: &[Self::Example]) -> Self::Probe;

    fn compute_signature(&self, expr: &Self::Expr, probe: &Self::Probe) -> Self::Signature;

    /// Whether `sig` is the distinguished all-`⊥` signature (spec.md §3).
    fn signature_is_bottom(&self, sig: &Self::Signature) -> bool;
}

fn filter_through_store<S: Synthesizer>(
    synth: &S,
    probe: &S::Probe,
    store: &mut SignatureStore<S::Signature>,
    candidates: Vec<S::Expr>,
) -> Vec<S::Expr> {
    candidates
        .into_iter()
        .filter(|candidate| {
            let sig = synth.compute_signature(candidate, probe);
            store.insert(sig, |s| synth.signature_is_bottom(s)) == Kept::Yes
        })
        .collect()
}

/// Runs bottom-up enumerative synthesis to completion.
///
/// `accumulate` selects between the two growth modes spec.md §4.3
/// documents: when `true`, every surviving representative across all
/// levels so far is offered to `grow`; when `false`, only the latest
/// level's survivors are.
pub fn synthesize<S: Synthesizer>(
    synth: &S,
    examples: &[S::Example],
    max_iterations: usize,
    accumulate: bool,
) -> Result<S::Expr, SynthesizeError> {
    if examples.is_empty() {
        return Err(SynthesizeError::EmptyExamples);
    }

    let probe = synth.extract_probe(examples);
    let mut store = SignatureStore::new();

    let terminals = synth.generate_terminals(examples);
    log::debug!("generated {} terminal(s)", terminals.len());
    let survivors = filter_through_store(synth, &probe, &mut store, terminals.clone());
    log::info!("iteration 0: {} survivor(s) after pruning", survivors.len());

    for candidate in &survivors {
        if synth.is_correct(candidate, examples) {
            return Ok(candidate.clone());
        }
    }

    if max_iterations == 0 {
        return Err(SynthesizeError::ExhaustedBudget { iterations: 0 });
    }

    let mut accumulated = survivors.clone();

    loop_with_feedback(
        survivors,
        |iteration, new_survivors: Vec<S::Expr>| -> ControlFlow<Result<S::Expr, SynthesizeError>, Vec<S::Expr>> {
            for candidate in &new_survivors {
                if synth.is_correct(candidate, examples) {
                    return ControlFlow::Break(Ok(candidate.clone()));
                }
            }

            if accumulate {
                accumulated.extend(new_survivors);
            } else {
                accumulated = new_survivors;
            }

            if iteration + 1 >= max_iterations {
                return ControlFlow::Break(Err(SynthesizeError::ExhaustedBudget {
                    iterations: max_iterations,
                }));
            }

            ControlFlow::Continue(accumulated.clone())
        },
        |iteration, base: Vec<S::Expr>| -> ControlFlow<Result<S::Expr, SynthesizeError>, Vec<S::Expr>> {
            let grown = synth.grow(&base, &terminals);
            log::debug!("iteration {}: grew {} base expr(s) into {} candidate(s)", iteration + 1, base.len(), grown.len());
            let next_survivors = filter_through_store(synth, &probe, &mut store, grown);
            log::info!("iteration {}: {} survivor(s) after pruning ({} total kept)", iteration + 1, next_survivors.len(), store.len());

            if next_survivors.is_empty() {
                return ControlFlow::Break(Err(SynthesizeError::ExhaustedBudget {
                    iterations: iteration + 1,
                }));
            }

            ControlFlow::Continue(next_survivors)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A toy DSL over `i32`: terminals are `0..3`, `grow` adds 1 to every
    /// survivor. Exercises the driver without either real DSL.
    struct Counter;

    impl Synthesizer for Counter {
        type Expr = i32;
        type Example = i32;
        type Probe = ();
        type Signature = i32;

        fn generate_terminals(&self, _examples: &[i32]) -> Vec<i32> {
            vec![0, 1, 2]
        }

        fn grow(&self, base: &[i32], _terminals: &[i32]) -> Vec<i32> {
            base.iter().map(|n| n + 1).collect()
        }

        fn is_correct(&self, expr: &i32, examples: &[i32]) -> bool {
            examples.iter().all(|target| expr == target)
        }

        fn extract_probe(&self, _examples: &[i32]) {}

        fn compute_signature(&self, expr: &i32, _probe: &()) -> i32 {
            *expr
        }

        fn signature_is_bottom(&self, _sig: &i32) -> bool {
            false
        }
    }

    #[test]
    fn finds_terminal_immediately() {
        let result = synthesize(&Counter, &[1], 5, false).unwrap();
        assert_eq!(result, 1);
    }

    #[test]
    fn finds_after_growing() {
        let result = synthesize(&Counter, &[4], 5, false).unwrap();
        assert_eq!(result, 4);
    }

    #[test]
    fn empty_examples_is_rejected() {
        let err = synthesize(&Counter, &[], 5, false).unwrap_err();
        assert!(matches!(err, SynthesizeError::EmptyExamples));
    }

    #[test]
    fn exhausts_budget_when_unreachable() {
        let err = synthesize(&Counter, &[-1], 3, false).unwrap_err();
        assert!(matches!(err, SynthesizeError::ExhaustedBudget { .. }));
    }
}
