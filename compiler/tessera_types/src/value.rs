//! Typed scalar values.
//!
//! A [`TypedValue`] carries its kind tag and one of three representations:
//! null, 64 inline bits holding a host scalar, or a byte buffer for the
//! string kinds. The buffer is either owned or borrowed from someone else's
//! storage; the lifetime parameter tracks the borrow.
//!
//! ```text
//! TypedValue<'a>
//!   type_id: TypeId
//!   repr:    Null | Inline(u64) | OutOfLine(Owned(Box<[u8]>) | Borrowed(&'a [u8]))
//! ```
//!
//! Cloning an owning value deep-copies its buffer. [`TypedValue::make_reference`]
//! produces a cheap non-owning view instead.

use std::fmt;

use crate::native::{
    DateLit, DatetimeIntervalLit, DatetimeLit, NativeScalar, YearMonthIntervalLit,
};
use crate::type_id::{StorageLayout, TypeId};

/// Byte storage of a string value.
#[derive(Clone)]
pub enum Buffer<'a> {
    Owned(Box<[u8]>),
    Borrowed(&'a [u8]),
}

impl Buffer<'_> {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Buffer::Owned(bytes) => &bytes[..],
            Buffer::Borrowed(bytes) => bytes,
        }
    }

    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self, Buffer::Owned(_))
    }

    fn into_owned(self) -> Buffer<'static> {
        match self {
            Buffer::Owned(bytes) => Buffer::Owned(bytes),
            Buffer::Borrowed(bytes) => Buffer::Owned(bytes.into()),
        }
    }
}

#[derive(Clone)]
enum Repr<'a> {
    Null,
    Inline(u64),
    OutOfLine(Buffer<'a>),
}

/// A scalar value tagged with its kind.
#[derive(Clone)]
pub struct TypedValue<'a> {
    type_id: TypeId,
    repr: Repr<'a>,
}

impl TypedValue<'static> {
    /// A null value of the given kind.
    #[inline]
    pub const fn null(type_id: TypeId) -> Self {
        TypedValue {
            type_id,
            repr: Repr::Null,
        }
    }

    /// A native value of the given kind.
    #[inline]
    pub fn from_native<N: NativeScalar>(type_id: TypeId, value: N) -> Self {
        debug_assert_eq!(
            type_id.traits().layout,
            StorageLayout::NativeEmbedded,
            "{type_id} has no host scalar"
        );
        TypedValue {
            type_id,
            repr: Repr::Inline(value.to_bits()),
        }
    }

    /// A string value that owns a copy of `bytes`.
    pub fn owned_bytes(type_id: TypeId, bytes: impl Into<Box<[u8]>>) -> Self {
        debug_assert!(
            type_id.traits().parameterized,
            "{type_id} is not a string kind"
        );
        TypedValue {
            type_id,
            repr: Repr::OutOfLine(Buffer::Owned(bytes.into())),
        }
    }

    pub fn bool(value: bool) -> Self {
        Self::from_native(TypeId::Bool, value)
    }

    pub fn int(value: i32) -> Self {
        Self::from_native(TypeId::Int, value)
    }

    pub fn long(value: i64) -> Self {
        Self::from_native(TypeId::Long, value)
    }

    pub fn float(value: f32) -> Self {
        Self::from_native(TypeId::Float, value)
    }

    pub fn double(value: f64) -> Self {
        Self::from_native(TypeId::Double, value)
    }

    pub fn date(value: DateLit) -> Self {
        Self::from_native(TypeId::Date, value)
    }

    pub fn datetime(value: DatetimeLit) -> Self {
        Self::from_native(TypeId::Datetime, value)
    }

    pub fn datetime_interval(value: DatetimeIntervalLit) -> Self {
        Self::from_native(TypeId::DatetimeInterval, value)
    }

    pub fn year_month_interval(value: YearMonthIntervalLit) -> Self {
        Self::from_native(TypeId::YearMonthInterval, value)
    }

    /// An owning VarChar value.
    pub fn varchar(text: &str) -> Self {
        Self::owned_bytes(TypeId::VarChar, text.as_bytes())
    }

    /// An owning Char value.
    pub fn char(text: &str) -> Self {
        Self::owned_bytes(TypeId::Char, text.as_bytes())
    }
}

impl<'a> TypedValue<'a> {
    /// A string value that borrows `bytes`.
    pub fn borrowed_bytes(type_id: TypeId, bytes: &'a [u8]) -> Self {
        debug_assert!(
            type_id.traits().parameterized,
            "{type_id} is not a string kind"
        );
        TypedValue {
            type_id,
            repr: Repr::OutOfLine(Buffer::Borrowed(bytes)),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self.repr, Repr::Null)
    }

    /// Raw inline bits of a non-null native value.
    #[inline]
    pub fn inline_bits(&self) -> Option<u64> {
        match self.repr {
            Repr::Inline(bits) => Some(bits),
            Repr::Null | Repr::OutOfLine(_) => None,
        }
    }

    /// The host scalar of a non-null native value.
    ///
    /// # Panics
    /// Panics if the value is null or not native.
    #[inline]
    pub fn literal<N: NativeScalar>(&self) -> N {
        match self.repr {
            Repr::Inline(bits) => N::from_bits(bits),
            Repr::Null | Repr::OutOfLine(_) => {
                panic!("{} value has no inline literal", self.type_id)
            }
        }
    }

    /// Bytes of a non-null string value.
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.repr {
            Repr::OutOfLine(buffer) => Some(buffer.as_bytes()),
            Repr::Null | Repr::Inline(_) => None,
        }
    }

    /// Bytes of a non-null string value.
    ///
    /// # Panics
    /// Panics if the value is null or not a string.
    pub fn out_of_line_data(&self) -> &[u8] {
        match self.as_bytes() {
            Some(bytes) => bytes,
            None => panic!("{} value has no out-of-line data", self.type_id),
        }
    }

    /// The string contents, if this is a non-null string value holding valid
    /// UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Size in bytes of the payload.
    pub fn data_size(&self) -> usize {
        match &self.repr {
            Repr::Null => 0,
            Repr::Inline(_) => self.type_id.traits().host_size,
            Repr::OutOfLine(buffer) => buffer.as_bytes().len(),
        }
    }

    /// Whether this value owns a string buffer.
    pub fn owns_out_of_line_data(&self) -> bool {
        matches!(&self.repr, Repr::OutOfLine(buffer) if buffer.is_owned())
    }

    /// Whether this value borrows a string buffer.
    pub fn is_reference(&self) -> bool {
        matches!(&self.repr, Repr::OutOfLine(buffer) if !buffer.is_owned())
    }

    /// A non-owning view of this value. Native and null values are copied.
    pub fn make_reference(&self) -> TypedValue<'_> {
        let repr = match &self.repr {
            Repr::Null => Repr::Null,
            Repr::Inline(bits) => Repr::Inline(*bits),
            Repr::OutOfLine(buffer) => Repr::OutOfLine(Buffer::Borrowed(buffer.as_bytes())),
        };
        TypedValue {
            type_id: self.type_id,
            repr,
        }
    }

    /// Detach from any borrowed storage, copying a borrowed buffer.
    pub fn into_owned(self) -> TypedValue<'static> {
        let repr = match self.repr {
            Repr::Null => Repr::Null,
            Repr::Inline(bits) => Repr::Inline(bits),
            Repr::OutOfLine(buffer) => Repr::OutOfLine(buffer.into_owned()),
        };
        TypedValue {
            type_id: self.type_id,
            repr,
        }
    }

    /// An owning deep copy.
    pub fn to_owned_value(&self) -> TypedValue<'static> {
        self.clone().into_owned()
    }

    /// The same payload under another string kind (Char and VarChar share
    /// the byte representation).
    pub fn retag_string(self, type_id: TypeId) -> Self {
        debug_assert!(
            self.type_id.traits().parameterized && type_id.traits().parameterized,
            "only string values can be retagged"
        );
        TypedValue {
            type_id,
            repr: self.repr,
        }
    }
}

impl PartialEq for TypedValue<'_> {
    /// Same kind and same payload. Inline payloads compare bitwise, so a NaN
    /// equals itself here.
    fn eq(&self, other: &Self) -> bool {
        if self.type_id != other.type_id {
            return false;
        }
        match (&self.repr, &other.repr) {
            (Repr::Null, Repr::Null) => true,
            (Repr::Inline(a), Repr::Inline(b)) => a == b,
            (Repr::OutOfLine(a), Repr::OutOfLine(b)) => a.as_bytes() == b.as_bytes(),
            _ => false,
        }
    }
}

impl fmt::Debug for TypedValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Null => write!(f, "{}(NULL)", self.type_id),
            Repr::Inline(bits) => write!(f, "{}(0x{bits:016x})", self.type_id),
            Repr::OutOfLine(buffer) => write!(
                f,
                "{}({:?}{})",
                self.type_id,
                String::from_utf8_lossy(buffer.as_bytes()),
                if buffer.is_owned() { "" } else { ", ref" }
            ),
        }
    }
}
