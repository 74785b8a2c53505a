//! `+ - * / %` on the arithmetic kinds.
//!
//! Both operands are converted to the host scalar of the result kind (the
//! unifying type of the operands) and combined there. The operator is
//! monomorphized over (left kind, right kind, result kind, function)
//! through three nested dispatches, so the per-value path does no tag
//! inspection.

use std::marker::PhantomData;

use tessera_types::dispatch::{invoke_on_type_id, ArithmeticFunctor, ArithmeticKinds};
use tessera_types::native::{ArithmeticScalar, NumericScalar};
use tessera_types::{ArithmeticKind, Type, TypeFactory, TypeId, TypeIdMask, TypedValue};

use crate::operation::{
    unvalidated, ApplyError, BinaryOperation, EvalError, Operation, UncheckedBinaryOperator,
};
use crate::signature::OperationSignature;

/// Which arithmetic function an [`ArithmeticOperation`] computes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl ArithmeticOp {
    pub const fn name(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "Add",
            ArithmeticOp::Subtract => "Subtract",
            ArithmeticOp::Multiply => "Multiply",
            ArithmeticOp::Divide => "Divide",
            ArithmeticOp::Modulo => "Modulo",
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Subtract => "-",
            ArithmeticOp::Multiply => "*",
            ArithmeticOp::Divide => "/",
            ArithmeticOp::Modulo => "%",
        }
    }
}

/// A binary arithmetic operation.
#[derive(Copy, Clone, Debug)]
pub struct ArithmeticOperation {
    op: ArithmeticOp,
}

impl ArithmeticOperation {
    pub const fn new(op: ArithmeticOp) -> Self {
        ArithmeticOperation { op }
    }

    #[inline]
    pub const fn op(&self) -> ArithmeticOp {
        self.op
    }

    fn check(&self, left: &Type, right: &Type) -> Result<(), ApplyError> {
        if TypeIdMask::ARITHMETIC.has(left.type_id()) && TypeIdMask::ARITHMETIC.has(right.type_id())
        {
            Ok(())
        } else {
            Err(ApplyError::IncompatibleOperands {
                operation: self.name(),
                left: left.to_string(),
                right: right.to_string(),
            })
        }
    }
}

impl Operation for ArithmeticOperation {
    fn name(&self) -> &'static str {
        self.op.name()
    }

    fn short_name(&self) -> &'static str {
        self.op.symbol()
    }

    fn signatures(&self) -> Vec<OperationSignature> {
        let kinds = TypeIdMask::ARITHMETIC;
        kinds
            .type_ids()
            .flat_map(|left| {
                kinds
                    .type_ids()
                    .map(move |right| OperationSignature::binary(self.name(), left, right))
            })
            .collect()
    }
}

impl BinaryOperation for ArithmeticOperation {
    fn can_apply_to(
        &self,
        _factory: &TypeFactory,
        left: &Type,
        right: &Type,
    ) -> Result<(), ApplyError> {
        self.check(left, right)
    }

    fn result_type(&self, factory: &TypeFactory, left: &Type, right: &Type) -> &'static Type {
        if let Err(error) = self.check(left, right) {
            unvalidated(self.name(), &error);
        }
        match factory.unifying_type(left, right) {
            Some(result) => result,
            // Every pair of arithmetic kinds unifies.
            None => unreachable!("{left} and {right} do not unify"),
        }
    }

    fn make_unchecked_operator(
        &self,
        factory: &TypeFactory,
        left: &Type,
        right: &Type,
    ) -> Box<dyn UncheckedBinaryOperator> {
        let result = self.result_type(factory, left, right);
        let ids = OperandIds {
            left: left.type_id(),
            right: right.type_id(),
            result: result.type_id(),
        };
        match self.op {
            ArithmeticOp::Add => build::<AddFn>(ids),
            ArithmeticOp::Subtract => build::<SubtractFn>(ids),
            ArithmeticOp::Multiply => build::<MultiplyFn>(ids),
            ArithmeticOp::Divide => build::<DivideFn>(ids),
            ArithmeticOp::Modulo => build::<ModuloFn>(ids),
        }
    }
}

// === Functions ===

/// An arithmetic function over one host scalar. `None` signals a zero
/// integer divisor.
trait ArithmeticFn: std::fmt::Debug + Send + Sync + 'static {
    fn eval<T: ArithmeticScalar>(left: T, right: T) -> Option<T>;
}

#[derive(Debug)]
struct AddFn;

impl ArithmeticFn for AddFn {
    #[inline]
    fn eval<T: ArithmeticScalar>(left: T, right: T) -> Option<T> {
        Some(left.add(right))
    }
}

#[derive(Debug)]
struct SubtractFn;

impl ArithmeticFn for SubtractFn {
    #[inline]
    fn eval<T: ArithmeticScalar>(left: T, right: T) -> Option<T> {
        Some(left.sub(right))
    }
}

#[derive(Debug)]
struct MultiplyFn;

impl ArithmeticFn for MultiplyFn {
    #[inline]
    fn eval<T: ArithmeticScalar>(left: T, right: T) -> Option<T> {
        Some(left.mul(right))
    }
}

#[derive(Debug)]
struct DivideFn;

impl ArithmeticFn for DivideFn {
    #[inline]
    fn eval<T: ArithmeticScalar>(left: T, right: T) -> Option<T> {
        left.div(right)
    }
}

#[derive(Debug)]
struct ModuloFn;

impl ArithmeticFn for ModuloFn {
    #[inline]
    fn eval<T: ArithmeticScalar>(left: T, right: T) -> Option<T> {
        left.rem(right)
    }
}

// === Operator construction ===

#[derive(Copy, Clone)]
struct OperandIds {
    left: TypeId,
    right: TypeId,
    result: TypeId,
}

fn build<O: ArithmeticFn>(ids: OperandIds) -> Box<dyn UncheckedBinaryOperator> {
    invoke_on_type_id::<ArithmeticKinds, _>(
        ids.left,
        BindLeft::<O> {
            ids,
            _function: PhantomData,
        },
    )
}

struct BindLeft<O> {
    ids: OperandIds,
    _function: PhantomData<O>,
}

impl<O: ArithmeticFn> ArithmeticFunctor for BindLeft<O> {
    type Output = Box<dyn UncheckedBinaryOperator>;

    fn apply<L: ArithmeticKind>(self) -> Self::Output {
        invoke_on_type_id::<ArithmeticKinds, _>(
            self.ids.right,
            BindRight::<O, L> {
                ids: self.ids,
                _bound: PhantomData,
            },
        )
    }
}

struct BindRight<O, L> {
    ids: OperandIds,
    _bound: PhantomData<(O, L)>,
}

impl<O: ArithmeticFn, L: ArithmeticKind> ArithmeticFunctor for BindRight<O, L> {
    type Output = Box<dyn UncheckedBinaryOperator>;

    fn apply<R: ArithmeticKind>(self) -> Self::Output {
        invoke_on_type_id::<ArithmeticKinds, _>(
            self.ids.result,
            BindResult::<O, L, R> {
                _bound: PhantomData,
            },
        )
    }
}

struct BindResult<O, L, R> {
    _bound: PhantomData<(O, L, R)>,
}

impl<O: ArithmeticFn, L: ArithmeticKind, R: ArithmeticKind> ArithmeticFunctor
    for BindResult<O, L, R>
{
    type Output = Box<dyn UncheckedBinaryOperator>;

    fn apply<T: ArithmeticKind>(self) -> Self::Output {
        Box::new(ArithmeticOperator::<O, L, R, T> {
            _kinds: PhantomData,
        })
    }
}

// === Unchecked operator ===

#[derive(Debug)]
struct ArithmeticOperator<O, L, R, T> {
    _kinds: PhantomData<(O, L, R, T)>,
}

impl<O, L, R, T> UncheckedBinaryOperator for ArithmeticOperator<O, L, R, T>
where
    O: ArithmeticFn,
    L: ArithmeticKind,
    R: ArithmeticKind,
    T: ArithmeticKind,
{
    #[inline]
    fn apply(
        &self,
        left: &TypedValue<'_>,
        right: &TypedValue<'_>,
    ) -> Result<TypedValue<'static>, EvalError> {
        let (Some(left_bits), Some(right_bits)) = (left.inline_bits(), right.inline_bits()) else {
            return Ok(TypedValue::null(T::TYPE_ID));
        };
        let lhs = <T::Scalar as NumericScalar>::narrow(L::widen(left_bits));
        let rhs = <T::Scalar as NumericScalar>::narrow(R::widen(right_bits));
        O::eval(lhs, rhs)
            .map(|out| TypedValue::from_native(T::TYPE_ID, out))
            .ok_or(EvalError::DivisionByZero)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
