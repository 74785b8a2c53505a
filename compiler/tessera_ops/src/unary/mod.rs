//! Unary operations.

mod cast;
mod negate;

pub use cast::CastOperation;
pub use negate::NegateOperation;
