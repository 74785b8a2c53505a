//! `= <> < <= > >=`.
//!
//! Three families of operand pairs compare:
//!
//! - numeric kinds with each other (Bool only with Bool), through [`Wide`]
//! - Char/VarChar with each other, byte-wise with trailing spaces ignored
//! - a date, datetime, or interval kind with itself
//!
//! The result is Bool, nullable if either operand is.

use std::cmp::Ordering;
use std::marker::PhantomData;

use tessera_types::dispatch::{
    invoke_on_type_id, NativeFunctor, NativeKinds, NumericFunctor, NumericKinds,
};
use tessera_types::native::NativeScalar;
use tessera_types::{
    NativeKind, NumericKind, Type, TypeFactory, TypeId, TypeIdMask, TypedValue, Wide,
    ALL_TYPE_IDS,
};

use crate::operation::{
    unvalidated, ApplyError, BinaryOperation, EvalError, Operation, UncheckedBinaryOperator,
};
use crate::signature::OperationSignature;

/// Which relation a [`ComparisonOperation`] tests.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl ComparisonOp {
    pub const fn name(self) -> &'static str {
        match self {
            ComparisonOp::Equal => "Equal",
            ComparisonOp::NotEqual => "NotEqual",
            ComparisonOp::Less => "Less",
            ComparisonOp::LessOrEqual => "LessOrEqual",
            ComparisonOp::Greater => "Greater",
            ComparisonOp::GreaterOrEqual => "GreaterOrEqual",
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "<>",
            ComparisonOp::Less => "<",
            ComparisonOp::LessOrEqual => "<=",
            ComparisonOp::Greater => ">",
            ComparisonOp::GreaterOrEqual => ">=",
        }
    }

    /// Whether the relation holds for an ordering. Unordered operands (NaN)
    /// satisfy only `<>`.
    #[inline]
    pub fn holds(self, ordering: Option<Ordering>) -> bool {
        match ordering {
            Some(ordering) => match self {
                ComparisonOp::Equal => ordering.is_eq(),
                ComparisonOp::NotEqual => ordering.is_ne(),
                ComparisonOp::Less => ordering.is_lt(),
                ComparisonOp::LessOrEqual => ordering.is_le(),
                ComparisonOp::Greater => ordering.is_gt(),
                ComparisonOp::GreaterOrEqual => ordering.is_ge(),
            },
            None => self == ComparisonOp::NotEqual,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Family {
    Numeric,
    String,
    Temporal,
}

const TEMPORAL: TypeIdMask = TypeIdMask::DATE
    .union(TypeIdMask::DATETIME)
    .union(TypeIdMask::DATETIME_INTERVAL)
    .union(TypeIdMask::YEAR_MONTH_INTERVAL);

fn family(left: TypeId, right: TypeId) -> Option<Family> {
    if left == TypeId::Bool || right == TypeId::Bool {
        return (left == right).then_some(Family::Numeric);
    }
    if TypeIdMask::NUMERIC.has(left) && TypeIdMask::NUMERIC.has(right) {
        Some(Family::Numeric)
    } else if TypeIdMask::ASCII_STRING.has(left) && TypeIdMask::ASCII_STRING.has(right) {
        Some(Family::String)
    } else if left == right && TEMPORAL.has(left) {
        Some(Family::Temporal)
    } else {
        None
    }
}

/// A binary comparison.
#[derive(Copy, Clone, Debug)]
pub struct ComparisonOperation {
    op: ComparisonOp,
}

impl ComparisonOperation {
    pub const fn new(op: ComparisonOp) -> Self {
        ComparisonOperation { op }
    }

    #[inline]
    pub const fn op(&self) -> ComparisonOp {
        self.op
    }

    fn check(&self, left: &Type, right: &Type) -> Result<Family, ApplyError> {
        family(left.type_id(), right.type_id()).ok_or_else(|| ApplyError::IncompatibleOperands {
            operation: self.name(),
            left: left.to_string(),
            right: right.to_string(),
        })
    }
}

impl Operation for ComparisonOperation {
    fn name(&self) -> &'static str {
        self.op.name()
    }

    fn short_name(&self) -> &'static str {
        self.op.symbol()
    }

    fn signatures(&self) -> Vec<OperationSignature> {
        ALL_TYPE_IDS
            .iter()
            .flat_map(|&left| ALL_TYPE_IDS.iter().map(move |&right| (left, right)))
            .filter(|&(left, right)| family(left, right).is_some())
            .map(|(left, right)| OperationSignature::binary(self.name(), left, right))
            .collect()
    }
}

impl BinaryOperation for ComparisonOperation {
    fn can_apply_to(
        &self,
        _factory: &TypeFactory,
        left: &Type,
        right: &Type,
    ) -> Result<(), ApplyError> {
        self.check(left, right).map(|_| ())
    }

    fn result_type(&self, factory: &TypeFactory, left: &Type, right: &Type) -> &'static Type {
        if let Err(error) = self.check(left, right) {
            unvalidated(self.name(), &error);
        }
        factory.get_type(TypeId::Bool, left.is_nullable() || right.is_nullable())
    }

    fn make_unchecked_operator(
        &self,
        _factory: &TypeFactory,
        left: &Type,
        right: &Type,
    ) -> Box<dyn UncheckedBinaryOperator> {
        let family = match self.check(left, right) {
            Ok(family) => family,
            Err(error) => unvalidated(self.name(), &error),
        };
        match family {
            Family::Numeric => invoke_on_type_id::<NumericKinds, _>(
                left.type_id(),
                BindNumericLeft {
                    op: self.op,
                    right: right.type_id(),
                },
            ),
            Family::String => Box::new(StringComparator { op: self.op }),
            Family::Temporal => {
                invoke_on_type_id::<NativeKinds, _>(left.type_id(), BindTemporal { op: self.op })
            }
        }
    }
}

// === Operator construction ===

struct BindNumericLeft {
    op: ComparisonOp,
    right: TypeId,
}

impl NumericFunctor for BindNumericLeft {
    type Output = Box<dyn UncheckedBinaryOperator>;

    fn apply<L: NumericKind>(self) -> Self::Output {
        invoke_on_type_id::<NumericKinds, _>(
            self.right,
            BindNumericRight::<L> {
                op: self.op,
                _left: PhantomData,
            },
        )
    }
}

struct BindNumericRight<L> {
    op: ComparisonOp,
    _left: PhantomData<L>,
}

impl<L: NumericKind> NumericFunctor for BindNumericRight<L> {
    type Output = Box<dyn UncheckedBinaryOperator>;

    fn apply<R: NumericKind>(self) -> Self::Output {
        Box::new(NumericComparator::<L, R> {
            op: self.op,
            _kinds: PhantomData,
        })
    }
}

struct BindTemporal {
    op: ComparisonOp,
}

impl NativeFunctor for BindTemporal {
    type Output = Box<dyn UncheckedBinaryOperator>;

    fn apply<K: NativeKind>(self) -> Self::Output {
        Box::new(TemporalComparator::<K> {
            op: self.op,
            _kind: PhantomData,
        })
    }
}

// === Unchecked operators ===

#[derive(Debug)]
struct NumericComparator<L, R> {
    op: ComparisonOp,
    _kinds: PhantomData<(L, R)>,
}

impl<L: NumericKind, R: NumericKind> UncheckedBinaryOperator for NumericComparator<L, R> {
    #[inline]
    fn apply(
        &self,
        left: &TypedValue<'_>,
        right: &TypedValue<'_>,
    ) -> Result<TypedValue<'static>, EvalError> {
        let (Some(left_bits), Some(right_bits)) = (left.inline_bits(), right.inline_bits()) else {
            return Ok(TypedValue::null(TypeId::Bool));
        };
        let ordering = Wide::compare(L::widen(left_bits), R::widen(right_bits));
        Ok(TypedValue::bool(self.op.holds(ordering)))
    }
}

#[derive(Debug)]
struct StringComparator {
    op: ComparisonOp,
}

/// Strip trailing spaces, so `'ab'` equals `'ab  '`.
fn trim_padding(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != b' ').map_or(0, |pos| pos + 1);
    &bytes[..end]
}

impl UncheckedBinaryOperator for StringComparator {
    fn apply(
        &self,
        left: &TypedValue<'_>,
        right: &TypedValue<'_>,
    ) -> Result<TypedValue<'static>, EvalError> {
        let (Some(left_bytes), Some(right_bytes)) = (left.as_bytes(), right.as_bytes()) else {
            return Ok(TypedValue::null(TypeId::Bool));
        };
        let ordering = trim_padding(left_bytes).cmp(trim_padding(right_bytes));
        Ok(TypedValue::bool(self.op.holds(Some(ordering))))
    }
}

#[derive(Debug)]
struct TemporalComparator<K> {
    op: ComparisonOp,
    _kind: PhantomData<K>,
}

impl<K: NativeKind> UncheckedBinaryOperator for TemporalComparator<K> {
    #[inline]
    fn apply(
        &self,
        left: &TypedValue<'_>,
        right: &TypedValue<'_>,
    ) -> Result<TypedValue<'static>, EvalError> {
        let (Some(left_bits), Some(right_bits)) = (left.inline_bits(), right.inline_bits()) else {
            return Ok(TypedValue::null(TypeId::Bool));
        };
        let lhs = <K::Native as NativeScalar>::from_bits(left_bits);
        let rhs = <K::Native as NativeScalar>::from_bits(right_bits);
        Ok(TypedValue::bool(self.op.holds(lhs.partial_cmp(&rhs))))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
