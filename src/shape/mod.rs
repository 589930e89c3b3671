pub mod expr;
pub mod synthesizer;

pub use expr::ShapeExpr;
pub use synthesizer::{ShapeExample, ShapeProbe, ShapeSynthesizer};
