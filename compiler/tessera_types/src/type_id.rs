//! Scalar type identifiers and their static trait bundle.
//!
//! `TypeId` is the runtime key for every scalar kind the catalog knows. The
//! discriminants are dense (`0..NUM_TYPE_IDS`) because the dispatch engine
//! bisects that range, so new kinds must be appended, never interleaved.
//!
//! # Trait Table
//!
//! Every id has exactly one [`TypeTraits`] entry, built at compile time from
//! the marker types in [`crate::kinds`]. Lookup is a constant-time index:
//!
//! ```text
//! TypeId::VarChar.traits().layout == StorageLayout::OutOfLine
//! ```

use std::fmt;

use bitflags::bitflags;

/// Number of scalar type identifiers.
pub const NUM_TYPE_IDS: usize = 12;

/// Scalar type kind discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TypeId {
    /// Boolean.
    Bool = 0,
    /// 32-bit signed integer.
    Int = 1,
    /// 64-bit signed integer.
    Long = 2,
    /// 32-bit IEEE float.
    Float = 3,
    /// 64-bit IEEE float.
    Double = 4,
    /// Calendar date.
    Date = 5,
    /// Date and time of day, microsecond precision.
    Datetime = 6,
    /// Day-time interval, microsecond precision.
    DatetimeInterval = 7,
    /// Year-month interval.
    YearMonthInterval = 8,
    /// Fixed-length ASCII string, padded inline.
    Char = 9,
    /// Variable-length ASCII string, stored out of line.
    VarChar = 10,
    /// Type of the untyped `NULL` literal.
    NullType = 11,
}

/// All type ids in discriminant order.
pub const ALL_TYPE_IDS: [TypeId; NUM_TYPE_IDS] = [
    TypeId::Bool,
    TypeId::Int,
    TypeId::Long,
    TypeId::Float,
    TypeId::Double,
    TypeId::Date,
    TypeId::Datetime,
    TypeId::DatetimeInterval,
    TypeId::YearMonthInterval,
    TypeId::Char,
    TypeId::VarChar,
    TypeId::NullType,
];

impl TypeId {
    /// Convert a raw discriminant back into a `TypeId`.
    #[inline]
    pub const fn from_u8(raw: u8) -> Option<Self> {
        if (raw as usize) < NUM_TYPE_IDS {
            Some(ALL_TYPE_IDS[raw as usize])
        } else {
            None
        }
    }

    /// The raw discriminant.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Constant-time trait lookup.
    #[inline]
    pub const fn traits(self) -> TypeTraits {
        crate::kinds::TRAIT_TABLE[self as usize]
    }

    /// Single-bit mask for this id.
    #[inline]
    pub const fn mask(self) -> TypeIdMask {
        TypeIdMask::from_bits_truncate(1 << (self as u16))
    }

    /// Canonical name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Date => "Date",
            Self::Datetime => "Datetime",
            Self::DatetimeInterval => "DatetimeInterval",
            Self::YearMonthInterval => "YearMonthInterval",
            Self::Char => "Char",
            Self::VarChar => "VarChar",
            Self::NullType => "NullType",
        }
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId::{}", self.name())
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse category of a scalar kind.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SuperTypeId {
    /// Bool and the integer/floating kinds.
    Numeric,
    /// Char and VarChar.
    AsciiString,
    /// Dates, intervals, and the null type.
    Other,
}

/// How values of a kind are physically represented.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StorageLayout {
    /// Fixed width, stored inline, maps to a host scalar.
    NativeEmbedded,
    /// Bounded width, stored inline with padding.
    NonNativeInline,
    /// Unbounded, stored through an indirection.
    OutOfLine,
}

/// Compile-time metadata for one `TypeId`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TypeTraits {
    pub type_id: TypeId,
    pub super_type: SuperTypeId,
    pub parameterized: bool,
    pub layout: StorageLayout,
    /// Host scalar name (`"void"` for kinds without one).
    pub host_name: &'static str,
    /// Host scalar size in bytes (0 for kinds without one).
    pub host_size: usize,
}

bitflags! {
    /// Set of type ids, used by dispatch selectors to declare eligibility.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeIdMask: u16 {
        const BOOL = 1 << 0;
        const INT = 1 << 1;
        const LONG = 1 << 2;
        const FLOAT = 1 << 3;
        const DOUBLE = 1 << 4;
        const DATE = 1 << 5;
        const DATETIME = 1 << 6;
        const DATETIME_INTERVAL = 1 << 7;
        const YEAR_MONTH_INTERVAL = 1 << 8;
        const CHAR = 1 << 9;
        const VAR_CHAR = 1 << 10;
        const NULL_TYPE = 1 << 11;
    }
}

impl TypeIdMask {
    /// Kinds usable in arithmetic.
    pub const ARITHMETIC: Self = Self::from_bits_truncate(
        Self::INT.bits() | Self::LONG.bits() | Self::FLOAT.bits() | Self::DOUBLE.bits(),
    );

    /// Kinds in the numeric super category.
    pub const NUMERIC: Self = Self::from_bits_truncate(Self::BOOL.bits() | Self::ARITHMETIC.bits());

    /// Kinds with the native-embedded layout.
    pub const NATIVE: Self = Self::from_bits_truncate(
        Self::NUMERIC.bits()
            | Self::DATE.bits()
            | Self::DATETIME.bits()
            | Self::DATETIME_INTERVAL.bits()
            | Self::YEAR_MONTH_INTERVAL.bits(),
    );

    /// Char and VarChar.
    pub const ASCII_STRING: Self =
        Self::from_bits_truncate(Self::CHAR.bits() | Self::VAR_CHAR.bits());

    /// Check whether `id` is in the set.
    #[inline]
    pub const fn has(self, id: TypeId) -> bool {
        self.contains(id.mask())
    }

    /// Iterate the ids in the set in discriminant order.
    pub fn type_ids(self) -> impl Iterator<Item = TypeId> {
        ALL_TYPE_IDS.into_iter().filter(move |id| self.has(*id))
    }
}

// Every id must fit in the mask.
const _: () = assert!(NUM_TYPE_IDS <= u16::BITS as usize);
