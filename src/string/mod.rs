pub mod expr;
pub mod synthesizer;

pub use expr::StringExpr;
pub use synthesizer::{StringExample, StringProbe, StringSynthesizer};
