//! Operation registry: lookup by name and overload resolution.
//!
//! All built-in operations are statics; the registry only maps names to
//! them. Resolution walks an operation's signatures in order, takes the first
//! one that matches the operand kinds exactly, then validates and types the
//! inputs through the operation itself.

use std::fmt;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tessera_types::{Type, TypeFactory, TypedValue};

use crate::binary::{ArithmeticOp, ArithmeticOperation, ComparisonOp, ComparisonOperation};
use crate::operation::{
    describe_operands, ApplyError, BinaryOperation, UnaryOperation, UncheckedBinaryOperator,
    UncheckedUnaryOperator,
};
use crate::signature::OperationSignature;
use crate::unary::{CastOperation, NegateOperation};

static CAST: CastOperation = CastOperation;
static NEGATE: NegateOperation = NegateOperation;
static ADD: ArithmeticOperation = ArithmeticOperation::new(ArithmeticOp::Add);
static SUBTRACT: ArithmeticOperation = ArithmeticOperation::new(ArithmeticOp::Subtract);
static MULTIPLY: ArithmeticOperation = ArithmeticOperation::new(ArithmeticOp::Multiply);
static DIVIDE: ArithmeticOperation = ArithmeticOperation::new(ArithmeticOp::Divide);
static MODULO: ArithmeticOperation = ArithmeticOperation::new(ArithmeticOp::Modulo);
static EQUAL: ComparisonOperation = ComparisonOperation::new(ComparisonOp::Equal);
static NOT_EQUAL: ComparisonOperation = ComparisonOperation::new(ComparisonOp::NotEqual);
static LESS: ComparisonOperation = ComparisonOperation::new(ComparisonOp::Less);
static LESS_OR_EQUAL: ComparisonOperation = ComparisonOperation::new(ComparisonOp::LessOrEqual);
static GREATER: ComparisonOperation = ComparisonOperation::new(ComparisonOp::Greater);
static GREATER_OR_EQUAL: ComparisonOperation =
    ComparisonOperation::new(ComparisonOp::GreaterOrEqual);

/// Identifies a built-in operation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OperationId {
    Cast,
    Negate,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl OperationId {
    pub const ALL: [OperationId; 13] = [
        OperationId::Cast,
        OperationId::Negate,
        OperationId::Add,
        OperationId::Subtract,
        OperationId::Multiply,
        OperationId::Divide,
        OperationId::Modulo,
        OperationId::Equal,
        OperationId::NotEqual,
        OperationId::Less,
        OperationId::LessOrEqual,
        OperationId::Greater,
        OperationId::GreaterOrEqual,
    ];
}

/// A registered operation, split by arity.
#[derive(Copy, Clone)]
pub enum OperationRef {
    Unary(&'static dyn UnaryOperation),
    Binary(&'static dyn BinaryOperation),
}

impl OperationRef {
    pub fn name(self) -> &'static str {
        match self {
            OperationRef::Unary(op) => op.name(),
            OperationRef::Binary(op) => op.name(),
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            OperationRef::Unary(op) => op.short_name(),
            OperationRef::Binary(op) => op.short_name(),
        }
    }

    pub fn signatures(self) -> Vec<OperationSignature> {
        match self {
            OperationRef::Unary(op) => op.signatures(),
            OperationRef::Binary(op) => op.signatures(),
        }
    }

    /// Number of (non-static) operands.
    pub fn arity(self) -> usize {
        match self {
            OperationRef::Unary(_) => 1,
            OperationRef::Binary(_) => 2,
        }
    }
}

impl fmt::Debug for OperationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationRef::Unary(op) => write!(f, "Unary({})", op.name()),
            OperationRef::Binary(op) => write!(f, "Binary({})", op.name()),
        }
    }
}

/// Name-based access to the built-in operations.
///
/// Names are matched case-insensitively against both the full and the short
/// name. `-` names both `Negate` and `Subtract`; arity picks one.
pub struct OperationRegistry {
    by_name: FxHashMap<String, SmallVec<[OperationId; 2]>>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        let mut by_name: FxHashMap<String, SmallVec<[OperationId; 2]>> = FxHashMap::default();
        for id in OperationId::ALL {
            let operation = Self::get(id);
            for name in [operation.name(), operation.short_name()] {
                let ids = by_name.entry(name.to_ascii_lowercase()).or_default();
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        OperationRegistry { by_name }
    }

    /// The operation for `id`.
    pub fn get(id: OperationId) -> OperationRef {
        match id {
            OperationId::Cast => OperationRef::Unary(&CAST),
            OperationId::Negate => OperationRef::Unary(&NEGATE),
            OperationId::Add => OperationRef::Binary(&ADD),
            OperationId::Subtract => OperationRef::Binary(&SUBTRACT),
            OperationId::Multiply => OperationRef::Binary(&MULTIPLY),
            OperationId::Divide => OperationRef::Binary(&DIVIDE),
            OperationId::Modulo => OperationRef::Binary(&MODULO),
            OperationId::Equal => OperationRef::Binary(&EQUAL),
            OperationId::NotEqual => OperationRef::Binary(&NOT_EQUAL),
            OperationId::Less => OperationRef::Binary(&LESS),
            OperationId::LessOrEqual => OperationRef::Binary(&LESS_OR_EQUAL),
            OperationId::Greater => OperationRef::Binary(&GREATER),
            OperationId::GreaterOrEqual => OperationRef::Binary(&GREATER_OR_EQUAL),
        }
    }

    /// Operations registered under `name`.
    pub fn lookup(&self, name: &str) -> &[OperationId] {
        self.by_name
            .get(&name.to_ascii_lowercase())
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    pub fn ids(&self) -> impl Iterator<Item = OperationId> {
        OperationId::ALL.into_iter()
    }

    pub fn len(&self) -> usize {
        OperationId::ALL.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The operation named `name` with the given arity.
    fn find(&self, name: &str, arity: usize) -> Result<OperationRef, ApplyError> {
        let ids = self.lookup(name);
        let Some(&first) = ids.first() else {
            return Err(ApplyError::UnknownOperation {
                name: name.to_owned(),
            });
        };
        ids.iter()
            .map(|&id| Self::get(id))
            .find(|operation| operation.arity() == arity)
            .ok_or_else(|| {
                let operation = Self::get(first);
                ApplyError::Arity {
                    operation: operation.name(),
                    expected: operation.arity(),
                    actual: arity,
                }
            })
    }

    /// Resolve a unary operation against its operand type.
    #[tracing::instrument(level = "debug", skip_all, fields(operation = name))]
    pub fn resolve_unary(
        &self,
        factory: &TypeFactory,
        name: &str,
        operand: &'static Type,
        static_args: &[TypedValue<'_>],
    ) -> Result<BoundUnaryOperation, ApplyError> {
        let OperationRef::Unary(operation) = self.find(name, 1)? else {
            unreachable!("arity 1 resolves to a unary operation")
        };
        let signature = operation
            .signatures()
            .into_iter()
            .find(|signature| signature.matches(&[operand.type_id()]))
            .ok_or_else(|| ApplyError::NoMatchingSignature {
                operation: operation.name(),
                operands: describe_operands(&[operand]),
            })?;
        operation.can_apply_to(factory, operand, static_args)?;
        let result_type = operation.result_type(factory, operand, static_args);
        tracing::debug!(%signature, result = %result_type, "resolved unary operation");
        Ok(BoundUnaryOperation {
            operation,
            signature,
            operand,
            static_args: static_args.iter().map(TypedValue::to_owned_value).collect(),
            result_type,
        })
    }

    /// Resolve a binary operation against its operand types.
    #[tracing::instrument(level = "debug", skip_all, fields(operation = name))]
    pub fn resolve_binary(
        &self,
        factory: &TypeFactory,
        name: &str,
        left: &'static Type,
        right: &'static Type,
    ) -> Result<BoundBinaryOperation, ApplyError> {
        let OperationRef::Binary(operation) = self.find(name, 2)? else {
            unreachable!("arity 2 resolves to a binary operation")
        };
        let signature = operation
            .signatures()
            .into_iter()
            .find(|signature| signature.matches(&[left.type_id(), right.type_id()]))
            .ok_or_else(|| ApplyError::NoMatchingSignature {
                operation: operation.name(),
                operands: describe_operands(&[left, right]),
            })?;
        operation.can_apply_to(factory, left, right)?;
        let result_type = operation.result_type(factory, left, right);
        tracing::debug!(%signature, result = %result_type, "resolved binary operation");
        Ok(BoundBinaryOperation {
            operation,
            signature,
            left,
            right,
            result_type,
        })
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A unary operation validated against concrete inputs.
pub struct BoundUnaryOperation {
    operation: &'static dyn UnaryOperation,
    signature: OperationSignature,
    operand: &'static Type,
    static_args: Vec<TypedValue<'static>>,
    result_type: &'static Type,
}

impl BoundUnaryOperation {
    pub fn operation(&self) -> &'static dyn UnaryOperation {
        self.operation
    }

    pub fn signature(&self) -> &OperationSignature {
        &self.signature
    }

    pub fn operand(&self) -> &'static Type {
        self.operand
    }

    pub fn static_args(&self) -> &[TypedValue<'static>] {
        &self.static_args
    }

    pub fn result_type(&self) -> &'static Type {
        self.result_type
    }

    pub fn make_unchecked_operator(&self, factory: &TypeFactory) -> Box<dyn UncheckedUnaryOperator> {
        self.operation
            .make_unchecked_operator(factory, self.operand, &self.static_args)
    }
}

impl fmt::Debug for BoundUnaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundUnaryOperation")
            .field("signature", &format_args!("{}", self.signature))
            .field("operand", &format_args!("{}", self.operand))
            .field("static_args", &self.static_args)
            .field("result_type", &format_args!("{}", self.result_type))
            .finish()
    }
}

/// A binary operation validated against concrete inputs.
pub struct BoundBinaryOperation {
    operation: &'static dyn BinaryOperation,
    signature: OperationSignature,
    left: &'static Type,
    right: &'static Type,
    result_type: &'static Type,
}

impl BoundBinaryOperation {
    pub fn operation(&self) -> &'static dyn BinaryOperation {
        self.operation
    }

    pub fn signature(&self) -> &OperationSignature {
        &self.signature
    }

    pub fn left(&self) -> &'static Type {
        self.left
    }

    pub fn right(&self) -> &'static Type {
        self.right
    }

    pub fn result_type(&self) -> &'static Type {
        self.result_type
    }

    pub fn make_unchecked_operator(
        &self,
        factory: &TypeFactory,
    ) -> Box<dyn UncheckedBinaryOperator> {
        self.operation
            .make_unchecked_operator(factory, self.left, self.right)
    }
}

impl fmt::Debug for BoundBinaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundBinaryOperation")
            .field("signature", &format_args!("{}", self.signature))
            .field("left", &format_args!("{}", self.left))
            .field("right", &format_args!("{}", self.right))
            .field("result_type", &format_args!("{}", self.result_type))
            .finish()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
