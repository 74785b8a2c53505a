//! Scalar type catalog for Tessera.
//!
//! - [`TypeId`] and the compile-time trait table ([`kinds`])
//! - [`Type`]: interned, nullability-aware scalar types, created only by a
//!   [`TypeFactory`]
//! - [`TypedValue`]: a tagged scalar value, owning or borrowing its bytes
//! - [`dispatch`]: runtime `TypeId` to generic marker dispatch
//!
//! Host scalar conversions and literal syntax live in [`native`] and
//! [`codec`].

// Declared first: `with_all_kinds!` is used by `dispatch`.
#[macro_use]
pub mod kinds;

pub mod codec;
pub mod dispatch;
mod factory;
pub mod native;
mod ty;
mod type_id;
mod value;

pub use codec::{LiteralCodec, ParseValueError};
pub use factory::{CatalogConfig, SharedTypeFactory, TypeFactory, DEFAULT_MAX_DECLARED_LENGTH};
pub use kinds::{ArithmeticKind, NativeKind, NumericKind, SignedKind, TypeTrait, TRAIT_TABLE};
pub use native::{DateLit, DatetimeIntervalLit, DatetimeLit, Wide, YearMonthIntervalLit};
pub use ty::Type;
pub use type_id::{
    StorageLayout, SuperTypeId, TypeId, TypeIdMask, TypeTraits, ALL_TYPE_IDS, NUM_TYPE_IDS,
};
pub use value::{Buffer, TypedValue};

// Size assertions to prevent accidental regressions.
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Type, TypeId};
    const _: () = assert!(std::mem::size_of::<TypeId>() == 1);
    const _: () = assert!(std::mem::size_of::<Type>() == 8);
}
