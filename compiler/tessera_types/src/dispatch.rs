//! Runtime-to-compile-time type dispatch.
//!
//! [`invoke_on_type_id`] turns a runtime [`TypeId`] into a call of a
//! generic functor instantiated with the matching marker kind. The lookup is
//! a binary search over the dense id range, expanded at compile time into
//! nested comparisons, so every leaf is a direct call with a statically
//! known marker.
//!
//! # Selectors
//!
//! A selector decides which ids a dispatch accepts. An eligible id invokes
//! the functor; an ineligible one panics, because reaching it means the
//! caller skipped a `can_apply_to` check.
//!
//! | Selector          | Functor             | Eligible kinds                          |
//! |-------------------|---------------------|-----------------------------------------|
//! | `AllKinds`        | `KindFunctor`       | every kind                              |
//! | `NativeKinds`     | `NativeFunctor`     | native-embedded layout                  |
//! | `NumericKinds`    | `NumericFunctor`    | Bool, Int, Long, Float, Double          |
//! | `ArithmeticKinds` | `ArithmeticFunctor` | Int, Long, Float, Double                |
//! | `SignedKinds`     | `SignedFunctor`     | Int, Long, Float, Double, both intervals |
//!
//! Each functor trait bounds its marker by the refinement the selector
//! guarantees, so a `NumericFunctor` body can use `K::widen` without any
//! runtime check.

use crate::kinds::{
    ArithmeticKind, BoolKind, CharKind, DateKind, DatetimeIntervalKind, DatetimeKind,
    DoubleKind, FloatKind, IntKind, LongKind, NativeKind, NullKind, NumericKind, SignedKind,
    TypeTrait, VarCharKind, YearMonthIntervalKind,
};
use crate::type_id::{TypeId, TypeIdMask};

/// Functor over every kind.
pub trait KindFunctor {
    type Output;
    fn apply<K: TypeTrait>(self) -> Self::Output;
}

/// Functor over native-embedded kinds.
pub trait NativeFunctor {
    type Output;
    fn apply<K: NativeKind>(self) -> Self::Output;
}

/// Functor over numeric kinds.
pub trait NumericFunctor {
    type Output;
    fn apply<K: NumericKind>(self) -> Self::Output;
}

/// Functor over arithmetic kinds.
pub trait ArithmeticFunctor {
    type Output;
    fn apply<K: ArithmeticKind>(self) -> Self::Output;
}

/// Functor over signed kinds.
pub trait SignedFunctor {
    type Output;
    fn apply<K: SignedKind>(self) -> Self::Output;
}

/// Eligibility and result type of a selector for functor `F`.
pub trait TypeIdSelector<F> {
    type Output;

    /// Ids for which the selector invokes the functor.
    const ELIGIBLE: TypeIdMask;
}

/// Leaf behaviour of a selector for one marker kind.
pub trait SelectKind<K: TypeTrait, F>: TypeIdSelector<F> {
    fn select(functor: F) -> Self::Output;
}

macro_rules! define_selector_bound {
    ([$($kind:ident)*]) => {
        /// A selector with a leaf for every kind.
        ///
        /// Implemented automatically for any type with all twelve
        /// [`SelectKind`] impls.
        pub trait Selector<F>: $(SelectKind<$kind, F> +)* Sized {}

        impl<S, F> Selector<F> for S where S: $(SelectKind<$kind, F> +)* Sized {}
    };
}

with_all_kinds!(define_selector_bound!());

#[cold]
#[inline(never)]
fn ineligible(type_id: TypeId, selector: &'static str) -> ! {
    panic!("{type_id} is not eligible for the {selector} selector")
}

macro_rules! impl_selector {
    (
        $selector:ident: $functor:ident,
        eligible [$($yes:ident)*],
        ineligible [$($no:ident)*]
    ) => {
        impl<F: $functor> TypeIdSelector<F> for $selector {
            type Output = F::Output;

            const ELIGIBLE: TypeIdMask =
                TypeIdMask::empty()$(.union(<$yes as TypeTrait>::TYPE_ID.mask()))*;
        }

        $(
            impl<F: $functor> SelectKind<$yes, F> for $selector {
                #[inline]
                fn select(functor: F) -> F::Output {
                    functor.apply::<$yes>()
                }
            }
        )*

        $(
            impl<F: $functor> SelectKind<$no, F> for $selector {
                #[inline]
                fn select(_functor: F) -> F::Output {
                    ineligible(<$no as TypeTrait>::TYPE_ID, stringify!($selector))
                }
            }
        )*
    };
}

/// Accepts every kind.
#[derive(Copy, Clone, Debug)]
pub struct AllKinds;

/// Accepts the native-embedded kinds.
#[derive(Copy, Clone, Debug)]
pub struct NativeKinds;

/// Accepts the numeric kinds.
#[derive(Copy, Clone, Debug)]
pub struct NumericKinds;

/// Accepts the arithmetic kinds.
#[derive(Copy, Clone, Debug)]
pub struct ArithmeticKinds;

/// Accepts the signed kinds.
#[derive(Copy, Clone, Debug)]
pub struct SignedKinds;

impl_selector!(
    AllKinds: KindFunctor,
    eligible [
        BoolKind IntKind LongKind FloatKind DoubleKind DateKind DatetimeKind
        DatetimeIntervalKind YearMonthIntervalKind CharKind VarCharKind NullKind
    ],
    ineligible []
);

impl_selector!(
    NativeKinds: NativeFunctor,
    eligible [
        BoolKind IntKind LongKind FloatKind DoubleKind DateKind DatetimeKind
        DatetimeIntervalKind YearMonthIntervalKind
    ],
    ineligible [CharKind VarCharKind NullKind]
);

impl_selector!(
    NumericKinds: NumericFunctor,
    eligible [BoolKind IntKind LongKind FloatKind DoubleKind],
    ineligible [
        DateKind DatetimeKind DatetimeIntervalKind YearMonthIntervalKind
        CharKind VarCharKind NullKind
    ]
);

impl_selector!(
    ArithmeticKinds: ArithmeticFunctor,
    eligible [IntKind LongKind FloatKind DoubleKind],
    ineligible [
        BoolKind DateKind DatetimeKind DatetimeIntervalKind YearMonthIntervalKind
        CharKind VarCharKind NullKind
    ]
);

impl_selector!(
    SignedKinds: SignedFunctor,
    eligible [
        IntKind LongKind FloatKind DoubleKind DatetimeIntervalKind YearMonthIntervalKind
    ],
    ineligible [BoolKind DateKind DatetimeKind CharKind VarCharKind NullKind]
);

/// Expand a sorted marker list into a balanced tree of comparisons.
///
/// The `@split` arm walks a counter list two at a time to find the midpoint,
/// so the tree depth is `ceil(log2(n))`.
macro_rules! bisect {
    ($value:ident, $functor:ident, $sel:ident, $f:ident; [$kind:ident]) => {
        <$sel as SelectKind<$kind, $f>>::select($functor)
    };
    ($value:ident, $functor:ident, $sel:ident, $f:ident; [$($kind:ident)+]) => {
        bisect!(@split $value, $functor, $sel, $f; [] [$($kind)+] [$($kind)+])
    };
    (@split $value:ident, $functor:ident, $sel:ident, $f:ident;
     [$($lo:ident)*] [$next:ident $($rest:ident)*] [$c1:ident $c2:ident $($count:ident)*]) => {
        bisect!(@split $value, $functor, $sel, $f; [$($lo)* $next] [$($rest)*] [$($count)*])
    };
    (@split $value:ident, $functor:ident, $sel:ident, $f:ident;
     [$($lo:ident)+] [$pivot:ident $($hi:ident)*] [$($count:ident)?]) => {
        if $value < (<$pivot as TypeTrait>::TYPE_ID as u8) {
            bisect!($value, $functor, $sel, $f; [$($lo)+])
        } else {
            bisect!($value, $functor, $sel, $f; [$pivot $($hi)*])
        }
    };
}

/// Invoke `functor` with the marker kind of `type_id`, as filtered by
/// selector `S`.
///
/// # Panics
///
/// Panics if `type_id` is not eligible for `S`.
#[inline]
pub fn invoke_on_type_id<S, F>(type_id: TypeId, functor: F) -> <S as TypeIdSelector<F>>::Output
where
    S: Selector<F>,
{
    debug_assert!(
        <S as TypeIdSelector<F>>::ELIGIBLE.has(type_id),
        "{type_id} is not eligible for this selector"
    );
    let value = type_id.as_u8();
    with_all_kinds!(bisect!(value, functor, S, F;))
}
