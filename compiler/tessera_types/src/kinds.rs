//! Compile-time trait table: one marker type per `TypeId`.
//!
//! Each scalar kind is a zero-sized marker (`IntKind`, `VarCharKind`, ...)
//! implementing [`TypeTrait`], whose associated constants are the kind's
//! registration. Code that is generic over a marker is monomorphized once
//! per kind, so the constants fold away and no run-time tag inspection is
//! left in the specialized path.
//!
//! # Refinements
//!
//! ```text
//! TypeTrait                every kind
//!     └── NativeKind       host scalar in the inline bits
//!         ├── NumericKind  Bool, Int, Long, Float, Double
//!         │   └── ArithmeticKind  Int, Long, Float, Double
//!         └── SignedKind   Int, Long, Float, Double, both intervals
//! ```
//!
//! The runtime view of the same registration is [`TRAIT_TABLE`], indexed by
//! `TypeId as usize`.

use std::fmt;

use crate::codec::{AsciiCodec, LiteralCodec, NativeCodec, NullCodec};
use crate::native::{
    ArithmeticScalar, DateLit, DatetimeIntervalLit, DatetimeLit, NativeScalar, NumericScalar,
    SignedScalar, Wide, YearMonthIntervalLit,
};
use crate::type_id::{StorageLayout, SuperTypeId, TypeId, TypeTraits, NUM_TYPE_IDS};

/// Invoke `$callback! { $args [BoolKind IntKind ...] }` with every marker in
/// `TypeId` order.
///
/// This is the single source of the kind ordering used by the trait table
/// and by the dispatch engine's bisection. The call is brace-delimited so it
/// expands in item position as well as in expression position.
macro_rules! with_all_kinds {
    ($callback:ident ! ( $($args:tt)* )) => {
        $callback! {
            $($args)*
            [
                BoolKind
                IntKind
                LongKind
                FloatKind
                DoubleKind
                DateKind
                DatetimeKind
                DatetimeIntervalKind
                YearMonthIntervalKind
                CharKind
                VarCharKind
                NullKind
            ]
        }
    };
}

/// Registration of one scalar kind.
pub trait TypeTrait: fmt::Debug + Send + Sync + 'static {
    const TYPE_ID: TypeId;
    const SUPER_TYPE: SuperTypeId;
    const PARAMETERIZED: bool;
    const LAYOUT: StorageLayout;
    const HOST_NAME: &'static str;
    const HOST_SIZE: usize;

    /// Runtime view of the constants above.
    const TRAITS: TypeTraits = TypeTraits {
        type_id: Self::TYPE_ID,
        super_type: Self::SUPER_TYPE,
        parameterized: Self::PARAMETERIZED,
        layout: Self::LAYOUT,
        host_name: Self::HOST_NAME,
        host_size: Self::HOST_SIZE,
    };

    /// Literal syntax of the kind.
    type Codec: LiteralCodec;
}

/// Kinds whose values are a host scalar stored in the inline bits.
pub trait NativeKind: TypeTrait {
    type Native: NativeScalar;
}

/// Kinds of the numeric super category.
pub trait NumericKind: NativeKind {
    /// Widen inline bits of this kind.
    fn widen(bits: u64) -> Wide;

    /// Narrow a widened value into inline bits of this kind.
    fn narrow(wide: Wide) -> u64;
}

/// Numeric kinds that support arithmetic.
pub trait ArithmeticKind: NumericKind {
    type Scalar: ArithmeticScalar;
}

/// Kinds with a unary minus.
pub trait SignedKind: NativeKind {
    fn negate(bits: u64) -> u64;
}

macro_rules! register_kind {
    (@base $kind:ident, $id:ident, $super_type:ident, $param:expr, $layout:ident,
     $host_name:expr, $host_size:expr, $codec:ty) => {
        #[doc = concat!("Marker for [`TypeId::", stringify!($id), "`].")]
        #[derive(Copy, Clone, Debug, Default)]
        pub struct $kind;

        impl TypeTrait for $kind {
            const TYPE_ID: TypeId = TypeId::$id;
            const SUPER_TYPE: SuperTypeId = SuperTypeId::$super_type;
            const PARAMETERIZED: bool = $param;
            const LAYOUT: StorageLayout = StorageLayout::$layout;
            const HOST_NAME: &'static str = $host_name;
            const HOST_SIZE: usize = $host_size;
            type Codec = $codec;
        }
    };
    ($kind:ident, $id:ident, $super_type:ident, $param:expr, $layout:ident, native = $native:ty) => {
        register_kind!(@base $kind, $id, $super_type, $param, $layout,
            <$native as NativeScalar>::HOST_NAME,
            ::std::mem::size_of::<$native>(),
            NativeCodec<$native>);

        impl NativeKind for $kind {
            type Native = $native;
        }
    };
    ($kind:ident, $id:ident, $super_type:ident, $param:expr, $layout:ident, codec = $codec:ty) => {
        register_kind!(@base $kind, $id, $super_type, $param, $layout, "void", 0, $codec);
    };
}

register_kind!(BoolKind, Bool, Numeric, false, NativeEmbedded, native = bool);
register_kind!(IntKind, Int, Numeric, false, NativeEmbedded, native = i32);
register_kind!(LongKind, Long, Numeric, false, NativeEmbedded, native = i64);
register_kind!(FloatKind, Float, Numeric, false, NativeEmbedded, native = f32);
register_kind!(DoubleKind, Double, Numeric, false, NativeEmbedded, native = f64);
register_kind!(DateKind, Date, Other, false, NativeEmbedded, native = DateLit);
register_kind!(DatetimeKind, Datetime, Other, false, NativeEmbedded, native = DatetimeLit);
register_kind!(
    DatetimeIntervalKind,
    DatetimeInterval,
    Other,
    false,
    NativeEmbedded,
    native = DatetimeIntervalLit
);
register_kind!(
    YearMonthIntervalKind,
    YearMonthInterval,
    Other,
    false,
    NativeEmbedded,
    native = YearMonthIntervalLit
);
register_kind!(CharKind, Char, AsciiString, true, NonNativeInline, codec = AsciiCodec);
register_kind!(VarCharKind, VarChar, AsciiString, true, OutOfLine, codec = AsciiCodec);
register_kind!(NullKind, NullType, Other, false, NonNativeInline, codec = NullCodec);

macro_rules! numeric_kind {
    ($($kind:ident => $native:ty),* $(,)?) => {
        $(
            impl NumericKind for $kind {
                #[inline]
                fn widen(bits: u64) -> Wide {
                    <$native as NumericScalar>::widen(<$native as NativeScalar>::from_bits(bits))
                }

                #[inline]
                fn narrow(wide: Wide) -> u64 {
                    NativeScalar::to_bits(<$native as NumericScalar>::narrow(wide))
                }
            }
        )*
    };
}

numeric_kind!(
    BoolKind => bool,
    IntKind => i32,
    LongKind => i64,
    FloatKind => f32,
    DoubleKind => f64,
);

impl ArithmeticKind for IntKind {
    type Scalar = i32;
}

impl ArithmeticKind for LongKind {
    type Scalar = i64;
}

impl ArithmeticKind for FloatKind {
    type Scalar = f32;
}

impl ArithmeticKind for DoubleKind {
    type Scalar = f64;
}

macro_rules! signed_kind {
    ($($kind:ident => $native:ty),* $(,)?) => {
        $(
            impl SignedKind for $kind {
                #[inline]
                fn negate(bits: u64) -> u64 {
                    let value = <$native as NativeScalar>::from_bits(bits);
                    NativeScalar::to_bits(<$native as SignedScalar>::negate(value))
                }
            }
        )*
    };
}

signed_kind!(
    IntKind => i32,
    LongKind => i64,
    FloatKind => f32,
    DoubleKind => f64,
    DatetimeIntervalKind => DatetimeIntervalLit,
    YearMonthIntervalKind => YearMonthIntervalLit,
);

macro_rules! trait_table {
    ([$($kind:ident)*]) => {
        [$(<$kind as TypeTrait>::TRAITS),*]
    };
}

/// Runtime trait table, indexed by `TypeId as usize`.
pub const TRAIT_TABLE: [TypeTraits; NUM_TYPE_IDS] = with_all_kinds!(trait_table!());

// Registration order must match discriminant order.
const _: () = {
    let mut i = 0;
    while i < NUM_TYPE_IDS {
        assert!(TRAIT_TABLE[i].type_id as usize == i);
        i += 1;
    }
};
