//! Literal syntax per kind.
//!
//! Every marker in [`crate::kinds`] names a [`LiteralCodec`]. Parsing and
//! printing through a `Type` dispatch on its id and land in one of three
//! codecs: host scalars, ASCII strings, or the null type.

use std::marker::PhantomData;

use crate::native::NativeScalar;
use crate::ty::Type;
use crate::value::TypedValue;

/// Error parsing a literal into a value of some type.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseValueError {
    #[error("invalid {type_name} literal: `{text}`")]
    Malformed { type_name: &'static str, text: String },

    #[error("string of {len} bytes exceeds declared length {max}")]
    TooLong { len: usize, max: u32 },

    #[error("string literal contains non-ASCII characters")]
    NonAscii,

    #[error("NullType has no literal other than NULL")]
    NullType,
}

/// Parse and print values of one kind.
pub trait LiteralCodec {
    /// Parse `text` as a value of `ty`.
    fn parse(text: &str, ty: &Type) -> Result<TypedValue<'static>, ParseValueError>;

    /// Print a non-null value of `ty`.
    fn print(value: &TypedValue<'_>, ty: &Type) -> String;
}

/// Codec for kinds backed by a host scalar.
pub struct NativeCodec<N>(PhantomData<N>);

impl<N: NativeScalar> LiteralCodec for NativeCodec<N> {
    fn parse(text: &str, ty: &Type) -> Result<TypedValue<'static>, ParseValueError> {
        N::parse_literal(text)
            .map(|value| TypedValue::from_native(ty.type_id(), value))
            .ok_or_else(|| ParseValueError::Malformed {
                type_name: ty.type_id().name(),
                text: text.to_owned(),
            })
    }

    fn print(value: &TypedValue<'_>, _ty: &Type) -> String {
        let mut out = String::new();
        value.literal::<N>().write_literal(&mut out);
        out
    }
}

/// Codec for Char and VarChar.
///
/// Literal text is taken verbatim; it must be ASCII and fit the declared
/// length.
pub struct AsciiCodec;

impl LiteralCodec for AsciiCodec {
    fn parse(text: &str, ty: &Type) -> Result<TypedValue<'static>, ParseValueError> {
        if !text.is_ascii() {
            return Err(ParseValueError::NonAscii);
        }
        let max = ty.length().unwrap_or(0);
        if text.len() > max as usize {
            return Err(ParseValueError::TooLong {
                len: text.len(),
                max,
            });
        }
        Ok(TypedValue::owned_bytes(ty.type_id(), text.as_bytes()))
    }

    fn print(value: &TypedValue<'_>, _ty: &Type) -> String {
        String::from_utf8_lossy(value.out_of_line_data()).into_owned()
    }
}

/// Codec for the null type: only `NULL` itself, which is handled before
/// dispatch.
pub struct NullCodec;

impl LiteralCodec for NullCodec {
    fn parse(_text: &str, _ty: &Type) -> Result<TypedValue<'static>, ParseValueError> {
        Err(ParseValueError::NullType)
    }

    fn print(_value: &TypedValue<'_>, _ty: &Type) -> String {
        "NULL".to_owned()
    }
}
