//! The shape DSL (spec.md §3, §4.1): predicates over 2-D integer points.

use crate::coord::{Coord, MAX_COORD};

/// A shape expression. Every variant's `interpret` is pure and total -- a
/// shape predicate never fails, unlike string expressions, so there is no
/// `⊥` outcome at this level (the engine only ever sees `Option::Some` here;
/// see [`super::synthesizer`] for where `⊥` is introduced).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShapeExpr {
    Rectangle { bottom_left: Coord, top_right: Coord },
    Triangle { bottom_left: Coord, top_right: Coord },
    Circle { center: Coord, radius: i32 },
    Union(Box<ShapeExpr>, Box<ShapeExpr>),
    Intersection(Box<ShapeExpr>, Box<ShapeExpr>),
    Subtraction(Box<ShapeExpr>, Box<ShapeExpr>),
    /// Reflection about the vertical line `x = MAX_COORD / 2`. The source
    /// this spec was distilled from never pins down an axis; this is the
    /// one choice that's stable across calls, which is all that matters for
    /// deterministic enumeration order (spec.md §9).
    Mirror(Box<ShapeExpr>),
}

impl ShapeExpr {
    pub fn union(a: ShapeExpr, b: ShapeExpr) -> Self {
        ShapeExpr::Union(Box::new(a), Box::new(b))
    }

    pub fn intersection(a: ShapeExpr, b: ShapeExpr) -> Self {
        ShapeExpr::Intersection(Box::new(a), Box::new(b))
    }

    pub fn subtraction(a: ShapeExpr, b: ShapeExpr) -> Self {
        ShapeExpr::Subtraction(Box::new(a), Box::new(b))
    }

    pub fn mirror(a: ShapeExpr) -> Self {
        ShapeExpr::Mirror(Box::new(a))
    }

    /// Evaluates the predicate at a single point, given as floats since
    /// examples are specified that way (spec.md §6) even though terminals
    /// are built from integer corners.
    pub fn interpret(&self, x: f64, y: f64) -> bool {
        match self {
            ShapeExpr::Rectangle { bottom_left, top_right } => {
                bottom_left.x as f64 <= x
                    && x <= top_right.x as f64
                    && bottom_left.y as f64 <= y
                    && y <= top_right.y as f64
            }
            ShapeExpr::Triangle { bottom_left, top_right } => {
                let dx = (top_right.x - bottom_left.x) as f64;
                let dy = (top_right.y - bottom_left.y) as f64;
                x >= bottom_left.x as f64
                    && y >= bottom_left.y as f64
                    && (x - bottom_left.x as f64) / dx + (y - bottom_left.y as f64) / dy <= 1.0
            }
            ShapeExpr::Circle { center, radius } => {
                let dx = x - center.x as f64;
                let dy = y - center.y as f64;
                dx * dx + dy * dy <= (*radius as f64) * (*radius as f64)
            }
            ShapeExpr::Union(a, b) => a.interpret(x, y) || b.interpret(x, y),
            ShapeExpr::Intersection(a, b) => a.interpret(x, y) && b.interpret(x, y),
            ShapeExpr::Subtraction(a, b) => a.interpret(x, y) && !b.interpret(x, y),
            ShapeExpr::Mirror(a) => {
                let axis = MAX_COORD as f64 / 2.0;
                a.interpret(2.0 * axis - x, y)
            }
        }
    }

    /// Batch evaluation over a probe set -- the natural vectorization point
    /// spec.md §9 calls out for a compiled-language implementation.
    pub fn interpret_batch(&self, xs: &[f64], ys: &[f64]) -> Vec<bool> {
        xs.iter().zip(ys).map(|(&x, &y)| self.interpret(x, y)).collect()
    }
}
