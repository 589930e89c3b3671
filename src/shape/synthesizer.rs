//! Shape-specific terminal generation, growth, and correctness checking
//! (spec.md §4.4, C4).

use itertools::Itertools;

use crate::coord::{Coord, MAX_COORD};
use crate::engine::Synthesizer;
use crate::shape::expr::ShapeExpr;

/// `(x, y, inside)` triples, as spec.md §6 defines shape examples.
pub type ShapeExample = (f64, f64, bool);

/// The stacked vector of every example's input point (spec.md §4.4).
pub struct ShapeProbe {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ShapeSynthesizer;

impl Synthesizer for ShapeSynthesizer {
    type Expr = ShapeExpr;
    type Example = ShapeExample;
    type Probe = ShapeProbe;
    type Signature = Vec<bool>;

    fn generate_terminals(&self, _examples: &[ShapeExample]) -> Vec<ShapeExpr> {
        let coords: Vec<Coord> = Coord::grid().collect();
        let mut terminals = Vec::new();

        for &bottom_left in &coords {
            for &top_right in &coords {
                if bottom_left.x < top_right.x && bottom_left.y < top_right.y {
                    terminals.push(ShapeExpr::Rectangle { bottom_left, top_right });
                    terminals.push(ShapeExpr::Triangle { bottom_left, top_right });
                }
            }
        }

        for &center in &coords {
            for radius in 1..=MAX_COORD {
                terminals.push(ShapeExpr::Circle { center, radius });
            }
        }

        terminals
    }

    fn grow(&self, base: &[ShapeExpr], _terminals: &[ShapeExpr]) -> Vec<ShapeExpr> {
        let mut grown: Vec<ShapeExpr> = base.to_vec();

        grown.extend(base.iter().cloned().map(ShapeExpr::mirror));

        for (p, q) in base.iter().cartesian_product(base.iter()) {
            grown.push(ShapeExpr::union(p.clone(), q.clone()));
            grown.push(ShapeExpr::intersection(p.clone(), q.clone()));
            grown.push(ShapeExpr::subtraction(p.clone(), q.clone()));
        }

        grown
    }

    fn is_correct(&self, expr: &ShapeExpr, examples: &[ShapeExample]) -> bool {
        examples.iter().all(|&(x, y, expected)| expr.interpret(x, y) == expected)
    }

    fn extract_probe(&self, examples: &[ShapeExample]) -> ShapeProbe {
        ShapeProbe {
            xs: examples.iter().map(|&(x, _, _)| x).collect(),
            ys: examples.iter().map(|&(_, y, _)| y).collect(),
        }
    }

    fn compute_signature(&self, expr: &ShapeExpr, probe: &ShapeProbe) -> Vec<bool> {
        expr.interpret_batch(&probe.xs, &probe.ys)
    }

    fn signature_is_bottom(&self, _sig: &Vec<bool>) -> bool {
        // Shape interpretation never fails; `⊥` cannot arise here.
        false
    }
}

#[cfg(test)]
mod tests {
    use assertables::assert_gt;
    use test_case::test_case;

    use super::*;
    use crate::engine::synthesize;

    #[test]
    fn generates_rectangles_triangles_and_circles() {
        let terminals = ShapeSynthesizer.generate_terminals(&[]);
        assert!(terminals.iter().any(|e| matches!(e, ShapeExpr::Rectangle { .. })));
        assert!(terminals.iter().any(|e| matches!(e, ShapeExpr::Triangle { .. })));
        assert!(terminals.iter().any(|e| matches!(e, ShapeExpr::Circle { .. })));
        assert_gt!(terminals.len(), 1000);
    }

    #[test]
    fn grow_preserves_base_and_adds_mirror_and_binary_ops() {
        let base = vec![
            ShapeExpr::Rectangle { bottom_left: Coord::new(0, 0), top_right: Coord::new(2, 2) },
            ShapeExpr::Circle { center: Coord::new(0, 0), radius: 1 },
        ];
        let grown = ShapeSynthesizer.grow(&base, &base);

        for p in &base {
            assert!(grown.contains(p));
            assert!(grown.contains(&ShapeExpr::mirror(p.clone())));
        }
        for p in &base {
            for q in &base {
                assert!(grown.contains(&ShapeExpr::union(p.clone(), q.clone())));
                assert!(grown.contains(&ShapeExpr::intersection(p.clone(), q.clone())));
                assert!(grown.contains(&ShapeExpr::subtraction(p.clone(), q.clone())));
            }
        }
        let n = base.len();
        assert_eq!(grown.len(), n + n + 3 * n * n);
    }

    #[test_case(vec![(0.0, 0.0, true), (1.0, 1.0, true), (2.0, 2.0, true), (3.0, 3.0, false)] ; "S1 axis-aligned rectangle")]
    fn synthesizes_scenario(examples: Vec<ShapeExample>) {
        let expr = synthesize(&ShapeSynthesizer, &examples, 5, false).unwrap();
        assert!(ShapeSynthesizer.is_correct(&expr, &examples));
    }

    #[test]
    fn synthesizes_rectangle_exactly() {
        let examples = vec![(0.0, 0.0, true), (1.0, 1.0, true), (2.0, 2.0, true), (3.0, 3.0, false)];
        let expr = synthesize(&ShapeSynthesizer, &examples, 5, false).unwrap();
        assert_eq!(
            expr,
            ShapeExpr::Rectangle { bottom_left: Coord::new(0, 0), top_right: Coord::new(2, 2) }
        );
    }

    #[test]
    fn contradictory_examples_exhaust_budget() {
        let examples = vec![(0.0, 0.0, true), (0.0, 0.0, false)];
        let err = synthesize(&ShapeSynthesizer, &examples, 3, false).unwrap_err();
        assert!(matches!(err, crate::error::SynthesizeError::ExhaustedBudget { .. }));
    }

    #[test]
    fn synthesis_is_deterministic() {
        let examples = vec![(1.0, 1.0, true), (3.0, 3.0, true), (4.0, 4.0, false)];
        let first = synthesize(&ShapeSynthesizer, &examples, 2, false).unwrap();
        let second = synthesize(&ShapeSynthesizer, &examples, 2, false).unwrap();
        assert_eq!(first, second);
    }
}
