//! Unary minus.

use std::marker::PhantomData;

use tessera_types::dispatch::{invoke_on_type_id, SignedFunctor, SignedKinds, TypeIdSelector};
use tessera_types::native::NativeScalar;
use tessera_types::{SignedKind, Type, TypeFactory, TypeIdMask, TypedValue};

use crate::operation::{
    no_static_args, unvalidated, ApplyError, EvalError, Operation, UnaryOperation,
    UncheckedUnaryOperator,
};
use crate::signature::OperationSignature;

/// Kinds with a unary minus.
const NEGATABLE: TypeIdMask = <SignedKinds as TypeIdSelector<NegateBuilder>>::ELIGIBLE;

/// Sign inversion of numbers and intervals. Integer negation wraps.
#[derive(Copy, Clone, Debug, Default)]
pub struct NegateOperation;

impl NegateOperation {
    fn check(&self, ty: &Type, static_args: &[TypedValue<'_>]) -> Result<(), ApplyError> {
        no_static_args(self.name(), static_args)?;
        if NEGATABLE.has(ty.type_id()) {
            Ok(())
        } else {
            Err(ApplyError::UnsupportedOperand {
                operation: self.name(),
                operand: ty.to_string(),
            })
        }
    }
}

impl Operation for NegateOperation {
    fn name(&self) -> &'static str {
        "Negate"
    }

    fn short_name(&self) -> &'static str {
        "-"
    }

    fn signatures(&self) -> Vec<OperationSignature> {
        NEGATABLE
            .type_ids()
            .map(|id| OperationSignature::unary(self.name(), id))
            .collect()
    }
}

impl UnaryOperation for NegateOperation {
    fn can_apply_to(
        &self,
        _factory: &TypeFactory,
        ty: &Type,
        static_args: &[TypedValue<'_>],
    ) -> Result<(), ApplyError> {
        self.check(ty, static_args)
    }

    fn result_type(
        &self,
        factory: &TypeFactory,
        ty: &Type,
        static_args: &[TypedValue<'_>],
    ) -> &'static Type {
        if let Err(error) = self.check(ty, static_args) {
            unvalidated(self.name(), &error);
        }
        factory.get_type_with(ty.type_id(), ty.length(), ty.is_nullable())
    }

    fn make_unchecked_operator(
        &self,
        factory: &TypeFactory,
        ty: &Type,
        static_args: &[TypedValue<'_>],
    ) -> Box<dyn UncheckedUnaryOperator> {
        let result = self.result_type(factory, ty, static_args);
        invoke_on_type_id::<SignedKinds, _>(result.type_id(), NegateBuilder)
    }
}

struct NegateBuilder;

impl SignedFunctor for NegateBuilder {
    type Output = Box<dyn UncheckedUnaryOperator>;

    fn apply<K: SignedKind>(self) -> Self::Output {
        Box::new(NegateOperator::<K> { _kind: PhantomData })
    }
}

#[derive(Debug)]
struct NegateOperator<K> {
    _kind: PhantomData<K>,
}

impl<K: SignedKind> UncheckedUnaryOperator for NegateOperator<K> {
    #[inline]
    fn apply(&self, value: &TypedValue<'_>) -> Result<TypedValue<'static>, EvalError> {
        Ok(match value.inline_bits() {
            Some(bits) => TypedValue::from_native(
                K::TYPE_ID,
                <K::Native as NativeScalar>::from_bits(K::negate(bits)),
            ),
            None => TypedValue::null(K::TYPE_ID),
        })
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
