//! `CAST(value AS target)`.
//!
//! The target type arrives as a string static argument, so every source kind
//! has a single signature with a `VarChar` carrier instead of one signature
//! per possible target. The string is resolved against the catalog:
//!
//! - `text` means a VarChar as wide as the source's print width
//! - otherwise `name` or `name(length)`, with `name` one of `bool`, `int`,
//!   `long`, `float`, `double`, `char`, `varchar`
//! - Char and VarChar require the length; the other kinds reject one
//!
//! The resolved type always takes the source's nullability.

use std::marker::PhantomData;
use std::sync::LazyLock;

use regex::Regex;
use tessera_types::dispatch::{invoke_on_type_id, NumericFunctor, NumericKinds};
use tessera_types::native::NativeScalar;
use tessera_types::{NumericKind, Type, TypeFactory, TypeId, TypeIdMask, TypedValue};

use crate::operation::{
    unvalidated, ApplyError, EvalError, Operation, UnaryOperation, UncheckedUnaryOperator,
};
use crate::signature::OperationSignature;

/// Source kinds accepted by `Cast`, in signature order.
const CAST_SOURCES: [TypeId; 7] = [
    TypeId::Bool,
    TypeId::Int,
    TypeId::Long,
    TypeId::Float,
    TypeId::Double,
    TypeId::Char,
    TypeId::VarChar,
];

#[expect(
    clippy::expect_used,
    reason = "the pattern is a constant and is covered by tests"
)]
static CAST_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z]+)(?:\((.*)\))?$").expect("cast target pattern is valid")
});

fn target_type_id(name: &str) -> Option<TypeId> {
    match name {
        "bool" => Some(TypeId::Bool),
        "int" => Some(TypeId::Int),
        "long" => Some(TypeId::Long),
        "float" => Some(TypeId::Float),
        "double" => Some(TypeId::Double),
        "char" => Some(TypeId::Char),
        "varchar" => Some(TypeId::VarChar),
        _ => None,
    }
}

/// Type conversion driven by a target-type string.
#[derive(Copy, Clone, Debug, Default)]
pub struct CastOperation;

impl CastOperation {
    /// Resolve the target type named by the static argument.
    pub fn target_type(
        &self,
        factory: &TypeFactory,
        source: &Type,
        static_args: &[TypedValue<'_>],
    ) -> Result<&'static Type, ApplyError> {
        if !CAST_SOURCES.contains(&source.type_id()) {
            return Err(ApplyError::UnsupportedOperand {
                operation: self.name(),
                operand: source.to_string(),
            });
        }
        let text = target_text(static_args)?;
        match parse_target(factory, source, text) {
            Some(target) => Ok(target),
            None => {
                tracing::debug!(requested = text, source = %source, "rejected cast target");
                Err(ApplyError::InvalidCastTarget {
                    target: text.to_owned(),
                })
            }
        }
    }
}

/// The target string carried by the single static argument.
fn target_text<'v>(static_args: &'v [TypedValue<'_>]) -> Result<&'v str, ApplyError> {
    let [arg] = static_args else {
        return Err(ApplyError::StaticArgumentCount {
            operation: "Cast",
            expected: 1,
            actual: static_args.len(),
        });
    };
    if !TypeIdMask::ASCII_STRING.has(arg.type_id()) || arg.is_null() {
        return Err(ApplyError::InvalidStaticArgument {
            operation: "Cast",
            reason: format!("target type must be a non-null string, got {arg:?}"),
        });
    }
    arg.as_str().ok_or_else(|| ApplyError::InvalidStaticArgument {
        operation: "Cast",
        reason: "target type is not valid text".to_owned(),
    })
}

fn parse_target(factory: &TypeFactory, source: &Type, text: &str) -> Option<&'static Type> {
    let normalized = text.trim().to_ascii_lowercase();
    let nullable = source.is_nullable();
    let max_length = factory.config().max_declared_length;

    if normalized == "text" {
        let width = u32::try_from(source.print_width())
            .ok()
            .filter(|width| (1..=max_length).contains(width))?;
        return Some(factory.get_parameterized(TypeId::VarChar, width, nullable));
    }

    let captures = CAST_TARGET.captures(&normalized)?;
    let type_id = target_type_id(captures.get(1)?.as_str())?;
    let length_text = captures.get(2).map(|m| m.as_str());

    if type_id.traits().parameterized {
        // Length literals go through the Int kind's own parser.
        let length = factory
            .get_type(TypeId::Int, false)
            .parse_value_from_string(length_text?)
            .ok()?
            .literal::<i32>();
        let length = u32::try_from(length)
            .ok()
            .filter(|length| (1..=max_length).contains(length))?;
        Some(factory.get_parameterized(type_id, length, nullable))
    } else if length_text.is_some() {
        None
    } else {
        Some(factory.get_type(type_id, nullable))
    }
}

impl Operation for CastOperation {
    fn name(&self) -> &'static str {
        "Cast"
    }

    fn short_name(&self) -> &'static str {
        "Cast"
    }

    fn signatures(&self) -> Vec<OperationSignature> {
        CAST_SOURCES
            .iter()
            .map(|&source| OperationSignature::new(self.name(), &[source], &[TypeId::VarChar]))
            .collect()
    }
}

impl UnaryOperation for CastOperation {
    fn can_apply_to(
        &self,
        factory: &TypeFactory,
        ty: &Type,
        static_args: &[TypedValue<'_>],
    ) -> Result<(), ApplyError> {
        self.target_type(factory, ty, static_args).map(|_| ())
    }

    fn result_type(
        &self,
        factory: &TypeFactory,
        ty: &Type,
        static_args: &[TypedValue<'_>],
    ) -> &'static Type {
        match self.target_type(factory, ty, static_args) {
            Ok(target) => target,
            Err(error) => unvalidated(self.name(), &error),
        }
    }

    fn make_unchecked_operator(
        &self,
        factory: &TypeFactory,
        ty: &Type,
        static_args: &[TypedValue<'_>],
    ) -> Box<dyn UncheckedUnaryOperator> {
        let target = self.result_type(factory, ty, static_args);
        let source_is_string = TypeIdMask::ASCII_STRING.has(ty.type_id());
        let target_is_string = TypeIdMask::ASCII_STRING.has(target.type_id());
        match (source_is_string, target_is_string) {
            (false, false) => {
                invoke_on_type_id::<NumericKinds, _>(ty.type_id(), NumericSource { target })
            }
            (false, true) => {
                invoke_on_type_id::<NumericKinds, _>(ty.type_id(), NumericToString { target })
            }
            (true, false) => {
                invoke_on_type_id::<NumericKinds, _>(target.type_id(), StringToNumeric { target })
            }
            (true, true) => Box::new(StringToString { target }),
        }
    }
}

// === Operator construction ===

/// First dispatch of a numeric-to-numeric cast: binds the source kind.
struct NumericSource {
    target: &'static Type,
}

impl NumericFunctor for NumericSource {
    type Output = Box<dyn UncheckedUnaryOperator>;

    fn apply<S: NumericKind>(self) -> Self::Output {
        invoke_on_type_id::<NumericKinds, _>(
            self.target.type_id(),
            NumericTarget::<S> {
                target: self.target,
                _source: PhantomData,
            },
        )
    }
}

/// Second dispatch of a numeric-to-numeric cast: binds the target kind.
struct NumericTarget<S> {
    target: &'static Type,
    _source: PhantomData<S>,
}

impl<S: NumericKind> NumericFunctor for NumericTarget<S> {
    type Output = Box<dyn UncheckedUnaryOperator>;

    fn apply<T: NumericKind>(self) -> Self::Output {
        Box::new(NumericCast::<S, T> {
            target: self.target,
            _kinds: PhantomData,
        })
    }
}

impl NumericFunctor for NumericToString {
    type Output = Box<dyn UncheckedUnaryOperator>;

    fn apply<S: NumericKind>(self) -> Self::Output {
        Box::new(PrintCast::<S> {
            target: self.target,
            _source: PhantomData,
        })
    }
}

impl NumericFunctor for StringToNumeric {
    type Output = Box<dyn UncheckedUnaryOperator>;

    fn apply<T: NumericKind>(self) -> Self::Output {
        Box::new(ParseCast::<T> {
            target: self.target,
            _kind: PhantomData,
        })
    }
}

struct NumericToString {
    target: &'static Type,
}

struct StringToNumeric {
    target: &'static Type,
}

// === Unchecked operators ===

/// Numeric to numeric through the widened form.
#[derive(Debug)]
struct NumericCast<S, T> {
    target: &'static Type,
    _kinds: PhantomData<(S, T)>,
}

impl<S: NumericKind, T: NumericKind> UncheckedUnaryOperator for NumericCast<S, T> {
    #[inline]
    fn apply(&self, value: &TypedValue<'_>) -> Result<TypedValue<'static>, EvalError> {
        let Some(bits) = value.inline_bits() else {
            return Ok(TypedValue::null(self.target.type_id()));
        };
        let narrowed = T::narrow(S::widen(bits));
        Ok(TypedValue::from_native(
            T::TYPE_ID,
            <T::Native as NativeScalar>::from_bits(narrowed),
        ))
    }
}

/// Numeric to string: the source literal, cut to the target length.
#[derive(Debug)]
struct PrintCast<S> {
    target: &'static Type,
    _source: PhantomData<S>,
}

impl<S: NumericKind> UncheckedUnaryOperator for PrintCast<S> {
    fn apply(&self, value: &TypedValue<'_>) -> Result<TypedValue<'static>, EvalError> {
        if value.is_null() {
            return Ok(TypedValue::null(self.target.type_id()));
        }
        let mut text = String::new();
        value.literal::<S::Native>().write_literal(&mut text);
        Ok(string_value(self.target, text.as_bytes()))
    }
}

/// String to numeric through the target's literal parser.
#[derive(Debug)]
struct ParseCast<T> {
    target: &'static Type,
    _kind: PhantomData<T>,
}

impl<T: NumericKind> UncheckedUnaryOperator for ParseCast<T> {
    fn apply(&self, value: &TypedValue<'_>) -> Result<TypedValue<'static>, EvalError> {
        let Some(bytes) = value.as_bytes() else {
            return Ok(TypedValue::null(self.target.type_id()));
        };
        let text = String::from_utf8_lossy(bytes);
        self.target
            .parse_value_from_string(&text)
            .map_err(|cause| EvalError::InvalidLiteral {
                text: text.into_owned(),
                target: T::TYPE_ID.name(),
                cause,
            })
    }
}

/// String to string: same bytes, cut to the target length.
#[derive(Debug)]
struct StringToString {
    target: &'static Type,
}

impl UncheckedUnaryOperator for StringToString {
    fn apply(&self, value: &TypedValue<'_>) -> Result<TypedValue<'static>, EvalError> {
        match value.as_bytes() {
            Some(bytes) => Ok(string_value(self.target, bytes)),
            None => Ok(TypedValue::null(self.target.type_id())),
        }
    }
}

fn string_value(target: &Type, bytes: &[u8]) -> TypedValue<'static> {
    let limit = target.maximum_byte_length().min(bytes.len());
    TypedValue::owned_bytes(target.type_id(), &bytes[..limit])
}
