//! Operations over Tessera scalar types.
//!
//! - [`Operation`], [`UnaryOperation`], [`BinaryOperation`]: validation,
//!   result typing, and construction of check-free operators
//! - [`OperationSignature`]: one overload of an operation
//! - [`OperationRegistry`]: name lookup and overload resolution
//!
//! Built-ins: [`unary::CastOperation`], [`unary::NegateOperation`],
//! [`binary::ArithmeticOperation`], [`binary::ComparisonOperation`].

pub mod binary;
mod operation;
mod registry;
mod signature;
pub mod unary;

pub use operation::{
    ApplyError, BinaryOperation, EvalError, Operation, UnaryOperation, UncheckedBinaryOperator,
    UncheckedUnaryOperator,
};
pub use registry::{
    BoundBinaryOperation, BoundUnaryOperation, OperationId, OperationRef, OperationRegistry,
};
pub use signature::OperationSignature;
