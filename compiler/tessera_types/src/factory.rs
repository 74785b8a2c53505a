//! Sharded type factory.
//!
//! Every `Type` handed out by a [`TypeFactory`] is interned: asking twice for
//! the same (kind, length, nullability) returns the same `&'static Type`, so
//! type equality is a pointer comparison.
//!
//! Non-parameterized kinds live in one static table shared by every
//! factory. Char and VarChar instances are interned lazily in sharded maps
//! behind `RwLock`s, with a read-locked fast path. Interned types are leaked
//! and never freed, so a factory is meant to live as long as the process.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ty::{Type, TypeKey};
use crate::type_id::{TypeId, ALL_TYPE_IDS, NUM_TYPE_IDS};

/// Default upper bound on a declared Char/VarChar length (1 MiB).
pub const DEFAULT_MAX_DECLARED_LENGTH: u32 = 1 << 20;

/// Number of shards for parameterized types.
const NUM_SHARDS: usize = 16;

/// Catalog limits.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CatalogConfig {
    /// Largest declared length accepted for Char and VarChar.
    pub max_declared_length: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            max_declared_length: DEFAULT_MAX_DECLARED_LENGTH,
        }
    }
}

/// `[non-nullable, nullable]` per id; `None` for the parameterized kinds and
/// for a non-nullable NullType.
const FIXED_TABLE: [[Option<Type>; 2]; NUM_TYPE_IDS] = {
    let mut table = [const { [None, None] }; NUM_TYPE_IDS];
    let mut idx = 0;
    while idx < NUM_TYPE_IDS {
        let type_id = ALL_TYPE_IDS[idx];
        if !type_id.traits().parameterized {
            if !matches!(type_id, TypeId::NullType) {
                table[idx][0] = Some(Type::new(type_id, 0, false));
            }
            table[idx][1] = Some(Type::new(type_id, 0, true));
        }
        idx += 1;
    }
    table
};

static FIXED_TYPES: [[Option<Type>; 2]; NUM_TYPE_IDS] = FIXED_TABLE;

/// Number of entries in [`FIXED_TYPES`].
const NUM_FIXED_TYPES: usize = {
    let mut count = 0;
    let mut idx = 0;
    while idx < NUM_TYPE_IDS {
        if FIXED_TABLE[idx][0].is_some() {
            count += 1;
        }
        if FIXED_TABLE[idx][1].is_some() {
            count += 1;
        }
        idx += 1;
    }
    count
};

/// Per-shard storage for parameterized types.
#[derive(Default)]
struct TypeShard {
    map: FxHashMap<TypeKey, &'static Type>,
}

/// Interning factory for scalar types.
///
/// # Thread Safety
/// Lookups of non-parameterized types never lock. Parameterized lookups take
/// a shard read lock, and a write lock only on first sight of a type.
/// Share across threads with [`SharedTypeFactory`].
pub struct TypeFactory {
    shards: [RwLock<TypeShard>; NUM_SHARDS],
    config: CatalogConfig,
    /// Number of parameterized types interned so far.
    parameterized: AtomicUsize,
}

fn leak(ty: Type) -> &'static Type {
    Box::leak(Box::new(ty))
}

impl TypeFactory {
    /// Create a factory with the default limits.
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    /// Create a factory with explicit limits.
    pub fn with_config(config: CatalogConfig) -> Self {
        TypeFactory {
            shards: std::array::from_fn(|_| RwLock::new(TypeShard::default())),
            config,
            parameterized: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub fn config(&self) -> CatalogConfig {
        self.config
    }

    /// Get a non-parameterized type.
    ///
    /// # Panics
    /// Panics if `type_id` is Char or VarChar, or if a non-nullable NullType
    /// is requested.
    pub fn get_type(&self, type_id: TypeId, nullable: bool) -> &'static Type {
        assert!(
            !type_id.traits().parameterized,
            "{type_id} is parameterized and needs a declared length"
        );
        match &FIXED_TYPES[type_id as usize][usize::from(nullable)] {
            Some(ty) => ty,
            None => panic!("{type_id} is always nullable"),
        }
    }

    /// Get a Char or VarChar type with the given declared length.
    ///
    /// # Panics
    /// Panics if `type_id` is not parameterized, or if `length` is zero or
    /// above the configured maximum.
    pub fn get_parameterized(&self, type_id: TypeId, length: u32, nullable: bool) -> &'static Type {
        assert!(
            type_id.traits().parameterized,
            "{type_id} does not take a length"
        );
        assert!(
            length > 0 && length <= self.config.max_declared_length,
            "declared length {length} for {type_id} is outside 1..={}",
            self.config.max_declared_length
        );
        self.intern(TypeKey {
            type_id,
            length,
            nullable,
        })
    }

    /// Get a type with an optional declared length.
    ///
    /// # Panics
    /// Panics if the presence of `length` does not match whether `type_id`
    /// is parameterized, or on the conditions of [`Self::get_type`] and
    /// [`Self::get_parameterized`].
    pub fn get_type_with(
        &self,
        type_id: TypeId,
        length: Option<u32>,
        nullable: bool,
    ) -> &'static Type {
        match length {
            Some(length) => self.get_parameterized(type_id, length, nullable),
            None => self.get_type(type_id, nullable),
        }
    }

    /// The nullable counterpart of `ty`.
    pub fn nullable_version(&self, ty: &Type) -> &'static Type {
        self.get_type_with(ty.type_id(), ty.length(), true)
    }

    /// The non-nullable counterpart of `ty`.
    ///
    /// # Panics
    /// Panics for the null type, which has no non-nullable form.
    pub fn non_nullable_version(&self, ty: &Type) -> &'static Type {
        self.get_type_with(ty.type_id(), ty.length(), false)
    }

    /// Most specific type both `a` and `b` coerce to, if any.
    ///
    /// The result is nullable if either input is. Long and Float, which
    /// cannot represent each other, unify to Double. Two string types unify
    /// to a VarChar of the larger declared length.
    pub fn unifying_type(&self, a: &Type, b: &Type) -> Option<&'static Type> {
        if a.type_id() == TypeId::NullType {
            return Some(self.nullable_version(b));
        }
        if b.type_id() == TypeId::NullType {
            return Some(self.nullable_version(a));
        }

        let nullable = a.is_nullable() || b.is_nullable();
        let a = self.get_type_with(a.type_id(), a.length(), nullable);
        let b = self.get_type_with(b.type_id(), b.length(), nullable);

        if a.is_coercible_from(b) {
            return Some(a);
        }
        if b.is_coercible_from(a) {
            return Some(b);
        }
        match (a.type_id(), b.type_id()) {
            (TypeId::Long, TypeId::Float) | (TypeId::Float, TypeId::Long) => {
                Some(self.get_type(TypeId::Double, nullable))
            }
            (TypeId::Char | TypeId::VarChar, TypeId::Char | TypeId::VarChar) => {
                let length = a.length().max(b.length()).unwrap_or(1);
                Some(self.get_parameterized(TypeId::VarChar, length, nullable))
            }
            _ => None,
        }
    }

    /// Number of distinct types interned so far, including the pre-interned
    /// non-parameterized ones.
    pub fn len(&self) -> usize {
        NUM_FIXED_TYPES + self.parameterized.load(Ordering::Relaxed)
    }

    /// Always false: the fixed types exist from construction.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn shard_for(key: &TypeKey) -> usize {
        let mut hasher = rustc_hash::FxHasher::default();
        key.hash(&mut hasher);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "truncation is fine for hash-based shard selection"
        )]
        let hash_usize = hasher.finish() as usize;
        hash_usize % NUM_SHARDS
    }

    fn intern(&self, key: TypeKey) -> &'static Type {
        let shard = &self.shards[Self::shard_for(&key)];

        // Fast path: already interned
        if let Some(&ty) = shard.read().map.get(&key) {
            return ty;
        }

        let mut guard = shard.write();

        // Double-check after acquiring write lock
        if let Some(&ty) = guard.map.get(&key) {
            return ty;
        }

        let ty = leak(Type::new(key.type_id, key.length, key.nullable));
        guard.map.insert(key, ty);
        self.parameterized.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(ty = %ty, "interned parameterized type");
        ty
    }
}

impl Default for TypeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeFactory")
            .field("config", &self.config)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Shared type factory, cloned into every component that needs types.
#[derive(Clone, Debug)]
pub struct SharedTypeFactory(Arc<TypeFactory>);

impl SharedTypeFactory {
    /// Create a shared factory with the default limits.
    pub fn new() -> Self {
        SharedTypeFactory(Arc::new(TypeFactory::new()))
    }

    /// Create a shared factory with explicit limits.
    pub fn with_config(config: CatalogConfig) -> Self {
        SharedTypeFactory(Arc::new(TypeFactory::with_config(config)))
    }
}

impl Default for SharedTypeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SharedTypeFactory {
    type Target = TypeFactory;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
