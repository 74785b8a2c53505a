//! Binary operations.

mod arithmetic;
mod comparison;

pub use arithmetic::{ArithmeticOp, ArithmeticOperation};
pub use comparison::{ComparisonOp, ComparisonOperation};
