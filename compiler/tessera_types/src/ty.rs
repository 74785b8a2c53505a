//! Interned scalar types.
//!
//! A [`Type`] is a `TypeId` plus a nullability flag plus, for the string
//! kinds, a declared length. Instances are only created by the
//! [`TypeFactory`](crate::TypeFactory), which hands out one `&'static Type`
//! per distinct combination. Equality is therefore identity.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;

use crate::codec::{LiteralCodec, ParseValueError};
use crate::dispatch::{invoke_on_type_id, AllKinds, KindFunctor};
use crate::kinds::TypeTrait;
use crate::native::{DOUBLE_PRINT_WIDTH, FLOAT_PRINT_WIDTH};
use crate::type_id::{StorageLayout, SuperTypeId, TypeId, TypeTraits};
use crate::value::TypedValue;

/// Interning key for a type.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct TypeKey {
    pub(crate) type_id: TypeId,
    pub(crate) length: u32,
    pub(crate) nullable: bool,
}

/// An interned scalar type.
#[derive(Debug)]
pub struct Type {
    type_id: TypeId,
    nullable: bool,
    /// Declared length for parameterized kinds, 0 otherwise.
    length: u32,
}

impl Type {
    pub(crate) const fn new(type_id: TypeId, length: u32, nullable: bool) -> Self {
        Type {
            type_id,
            nullable,
            length,
        }
    }

    pub(crate) const fn key(&self) -> TypeKey {
        TypeKey {
            type_id: self.type_id,
            length: self.length,
            nullable: self.nullable,
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub const fn traits(&self) -> TypeTraits {
        self.type_id.traits()
    }

    #[inline]
    pub const fn super_type(&self) -> SuperTypeId {
        self.traits().super_type
    }

    #[inline]
    pub const fn storage_layout(&self) -> StorageLayout {
        self.traits().layout
    }

    #[inline]
    pub const fn is_parameterized(&self) -> bool {
        self.traits().parameterized
    }

    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Declared length of a Char or VarChar type.
    #[inline]
    pub const fn length(&self) -> Option<u32> {
        if self.is_parameterized() {
            Some(self.length)
        } else {
            None
        }
    }

    /// Number of characters needed to print any value of this type.
    pub const fn print_width(&self) -> usize {
        match self.type_id {
            TypeId::Bool => 5,
            TypeId::Int => 11,
            TypeId::Long => 20,
            TypeId::Float => FLOAT_PRINT_WIDTH,
            TypeId::Double => DOUBLE_PRINT_WIDTH,
            TypeId::Date => 10,
            TypeId::Datetime => 26,
            TypeId::DatetimeInterval => 32,
            TypeId::YearMonthInterval => 24,
            TypeId::Char | TypeId::VarChar => self.length as usize,
            TypeId::NullType => 0,
        }
    }

    /// Smallest number of bytes a value of this type occupies.
    pub const fn minimum_byte_length(&self) -> usize {
        match self.type_id {
            TypeId::Char => self.length as usize,
            TypeId::VarChar | TypeId::NullType => 0,
            _ => self.traits().host_size,
        }
    }

    /// Largest number of bytes a value of this type occupies.
    pub const fn maximum_byte_length(&self) -> usize {
        match self.type_id {
            TypeId::Char | TypeId::VarChar => self.length as usize,
            TypeId::NullType => 0,
            _ => self.traits().host_size,
        }
    }

    #[inline]
    pub const fn is_variable_length(&self) -> bool {
        self.minimum_byte_length() != self.maximum_byte_length()
    }

    /// Kind name plus declared length, without nullability: `VarChar(20)`.
    pub fn name(&self) -> String {
        match self.length() {
            Some(length) => format!("{}({length})", self.type_id),
            None => self.type_id.name().to_owned(),
        }
    }

    /// Whether every value of `source` is a valid value of `self` without
    /// loss.
    ///
    /// Nullability must not widen: a nullable source is never coercible to a
    /// non-nullable target. The null type coerces into any nullable type.
    pub fn is_coercible_from(&self, source: &Type) -> bool {
        if source.nullable && !self.nullable {
            return false;
        }
        if source.type_id == TypeId::NullType {
            return self.nullable;
        }
        match (self.type_id, source.type_id) {
            (TypeId::Char, TypeId::Char)
            | (TypeId::VarChar, TypeId::VarChar | TypeId::Char) => source.length <= self.length,
            (to, from) if to == from => true,
            (TypeId::Long, TypeId::Int)
            | (TypeId::Float, TypeId::Int)
            | (TypeId::Double, TypeId::Int | TypeId::Long | TypeId::Float) => true,
            _ => false,
        }
    }

    /// Parse the literal syntax of this type. `NULL` (any case) yields a
    /// null value when the type is nullable.
    pub fn parse_value_from_string(
        &self,
        text: &str,
    ) -> Result<TypedValue<'static>, ParseValueError> {
        if self.nullable && text.trim().eq_ignore_ascii_case("null") {
            return Ok(TypedValue::null(self.type_id));
        }
        invoke_on_type_id::<AllKinds, _>(self.type_id, ParseLiteral { ty: self, text })
    }

    /// Print a value of this type. Null values print as `NULL`.
    pub fn print_value_to_string(&self, value: &TypedValue<'_>) -> String {
        if value.is_null() {
            return "NULL".to_owned();
        }
        debug_assert_eq!(value.type_id(), self.type_id, "value printed with the wrong type");
        invoke_on_type_id::<AllKinds, _>(self.type_id, PrintLiteral { ty: self, value })
    }
}

struct ParseLiteral<'a> {
    ty: &'a Type,
    text: &'a str,
}

impl KindFunctor for ParseLiteral<'_> {
    type Output = Result<TypedValue<'static>, ParseValueError>;

    fn apply<K: TypeTrait>(self) -> Self::Output {
        <K::Codec as LiteralCodec>::parse(self.text, self.ty)
    }
}

struct PrintLiteral<'a, 'v> {
    ty: &'a Type,
    value: &'a TypedValue<'v>,
}

impl KindFunctor for PrintLiteral<'_, '_> {
    type Output = String;

    fn apply<K: TypeTrait>(self) -> Self::Output {
        <K::Codec as LiteralCodec>::print(self.value, self.ty)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())?;
        if self.nullable {
            f.write_str(" NULL")?;
        }
        Ok(())
    }
}
