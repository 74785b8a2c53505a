//! Operation framework.
//!
//! An operation is validated and typed once per query, then executed many
//! times through an unchecked operator:
//!
//! ```text
//! can_apply_to ──▶ result_type ──▶ make_unchecked_operator ──▶ apply (per value)
//!   (Result)       (&'static Type)   (Box<dyn Unchecked…>)       (no type checks)
//! ```
//!
//! `can_apply_to` reports every user error. `result_type` and
//! `make_unchecked_operator` assume a successful `can_apply_to` and panic
//! otherwise; the only failures left at execution time are data-dependent
//! ([`EvalError`]).

use std::fmt;

use tessera_types::{ParseValueError, Type, TypeFactory, TypedValue};

use crate::signature::OperationSignature;

/// A user or query error detected while validating an operation.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ApplyError {
    #[error("unknown operation `{name}`")]
    UnknownOperation { name: String },

    #[error("{operation} takes {expected} operand(s), got {actual}")]
    Arity {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("no signature of {operation} accepts ({operands})")]
    NoMatchingSignature {
        operation: &'static str,
        operands: String,
    },

    #[error("{operation} takes {expected} static argument(s), got {actual}")]
    StaticArgumentCount {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid static argument to {operation}: {reason}")]
    InvalidStaticArgument {
        operation: &'static str,
        reason: String,
    },

    #[error("Invalid target type for CAST")]
    InvalidCastTarget { target: String },

    #[error("{operation} cannot be applied to {operand}")]
    UnsupportedOperand {
        operation: &'static str,
        operand: String,
    },

    #[error("{operation} cannot be applied to {left} and {right}")]
    IncompatibleOperands {
        operation: &'static str,
        left: String,
        right: String,
    },
}

/// A data-dependent failure while applying an unchecked operator.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("cannot convert `{text}` to {target}")]
    InvalidLiteral {
        text: String,
        target: &'static str,
        #[source]
        cause: ParseValueError,
    },
}

/// Identity shared by unary and binary operations.
pub trait Operation: Send + Sync {
    /// Full name, e.g. `Cast` or `Add`.
    fn name(&self) -> &'static str;

    /// Name used in plan printing, e.g. `+`.
    fn short_name(&self) -> &'static str;

    /// Supported overloads, in match order.
    fn signatures(&self) -> Vec<OperationSignature>;
}

/// An operation on one operand.
pub trait UnaryOperation: Operation {
    /// Whether the operation accepts `ty` and `static_args`.
    fn can_apply_to(
        &self,
        factory: &TypeFactory,
        ty: &Type,
        static_args: &[TypedValue<'_>],
    ) -> Result<(), ApplyError>;

    /// Result type for inputs accepted by [`Self::can_apply_to`].
    ///
    /// # Panics
    /// Panics if `can_apply_to` rejects the inputs.
    fn result_type(
        &self,
        factory: &TypeFactory,
        ty: &Type,
        static_args: &[TypedValue<'_>],
    ) -> &'static Type;

    /// Build the check-free operator for inputs accepted by
    /// [`Self::can_apply_to`].
    ///
    /// # Panics
    /// Panics if `can_apply_to` rejects the inputs.
    fn make_unchecked_operator(
        &self,
        factory: &TypeFactory,
        ty: &Type,
        static_args: &[TypedValue<'_>],
    ) -> Box<dyn UncheckedUnaryOperator>;
}

/// An operation on two operands.
pub trait BinaryOperation: Operation {
    fn can_apply_to(
        &self,
        factory: &TypeFactory,
        left: &Type,
        right: &Type,
    ) -> Result<(), ApplyError>;

    /// # Panics
    /// Panics if `can_apply_to` rejects the inputs.
    fn result_type(&self, factory: &TypeFactory, left: &Type, right: &Type) -> &'static Type;

    /// # Panics
    /// Panics if `can_apply_to` rejects the inputs.
    fn make_unchecked_operator(
        &self,
        factory: &TypeFactory,
        left: &Type,
        right: &Type,
    ) -> Box<dyn UncheckedBinaryOperator>;
}

/// A unary operator specialized for concrete kinds.
///
/// A null operand yields a null of the result kind.
pub trait UncheckedUnaryOperator: fmt::Debug + Send + Sync {
    fn apply(&self, value: &TypedValue<'_>) -> Result<TypedValue<'static>, EvalError>;
}

/// A binary operator specialized for concrete kinds.
///
/// A null on either side yields a null of the result kind.
pub trait UncheckedBinaryOperator: fmt::Debug + Send + Sync {
    fn apply(
        &self,
        left: &TypedValue<'_>,
        right: &TypedValue<'_>,
    ) -> Result<TypedValue<'static>, EvalError>;
}

/// Reject static arguments for operations that take none.
pub(crate) fn no_static_args(
    operation: &'static str,
    static_args: &[TypedValue<'_>],
) -> Result<(), ApplyError> {
    if static_args.is_empty() {
        Ok(())
    } else {
        Err(ApplyError::StaticArgumentCount {
            operation,
            expected: 0,
            actual: static_args.len(),
        })
    }
}

/// Panic for a `result_type`/`make_unchecked_operator` call that skipped
/// validation.
#[cold]
#[inline(never)]
pub(crate) fn unvalidated(operation: &'static str, error: &ApplyError) -> ! {
    panic!("{operation} used on inputs it cannot apply to: {error}")
}

/// The operand list of a failed signature match, for error messages.
pub(crate) fn describe_operands(types: &[&Type]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests;
