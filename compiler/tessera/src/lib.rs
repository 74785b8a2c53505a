//! Tessera: scalar type catalog and operation dispatch for SQL query
//! processing.
//!
//! [`Context`] bundles the two process-wide pieces, the type catalog
//! ([`SharedTypeFactory`]) and the [`OperationRegistry`], built once from a
//! [`Config`].
//!
//! ```text
//! Config ──▶ Context { types, operations }
//!                 │
//!                 ├─ resolve_unary / resolve_binary ──▶ Bound*Operation
//!                 │                                        │
//!                 │                          make_unchecked_operator
//!                 ▼                                        ▼
//!          &'static Type                       apply(TypedValue...) per row
//! ```

use std::sync::Once;

pub use tessera_ops::{
    ApplyError, BinaryOperation, BoundBinaryOperation, BoundUnaryOperation, EvalError, Operation,
    OperationId, OperationRef, OperationRegistry, OperationSignature, UnaryOperation,
    UncheckedBinaryOperator, UncheckedUnaryOperator,
};
pub use tessera_types::{
    CatalogConfig, ParseValueError, SharedTypeFactory, Type, TypeFactory, TypeId, TypedValue,
    DEFAULT_MAX_DECLARED_LENGTH,
};

/// Environment variable overriding [`CatalogConfig::max_declared_length`].
pub const MAX_DECLARED_LENGTH_VAR: &str = "TESSERA_MAX_DECLARED_LENGTH";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=tessera_ops=debug` or
/// `RUST_LOG=tessera_types=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// A malformed configuration value.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got `{value}`")]
    InvalidLength { var: &'static str, value: String },
}

/// Process configuration.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    pub catalog: CatalogConfig,
}

impl Config {
    /// Defaults, overridden by `TESSERA_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        if let Some(value) = lookup(MAX_DECLARED_LENGTH_VAR) {
            config.catalog.max_declared_length = value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&length| length > 0)
                .ok_or(ConfigError::InvalidLength {
                    var: MAX_DECLARED_LENGTH_VAR,
                    value,
                })?;
        }
        Ok(config)
    }
}

/// The type catalog and operation registry of one process.
#[derive(Clone)]
pub struct Context {
    pub types: SharedTypeFactory,
    pub operations: std::sync::Arc<OperationRegistry>,
}

impl Context {
    pub fn new(config: Config) -> Self {
        tracing::debug!(
            max_declared_length = config.catalog.max_declared_length,
            "creating context"
        );
        Context {
            types: SharedTypeFactory::with_config(config.catalog),
            operations: std::sync::Arc::new(OperationRegistry::new()),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_env().map(Self::new)
    }

    /// Resolve a unary operation by name against the context's catalog.
    pub fn resolve_unary(
        &self,
        name: &str,
        operand: &'static Type,
        static_args: &[TypedValue<'_>],
    ) -> Result<BoundUnaryOperation, ApplyError> {
        self.operations
            .resolve_unary(&self.types, name, operand, static_args)
    }

    /// Resolve a binary operation by name against the context's catalog.
    pub fn resolve_binary(
        &self,
        name: &str,
        left: &'static Type,
        right: &'static Type,
    ) -> Result<BoundBinaryOperation, ApplyError> {
        self.operations
            .resolve_binary(&self.types, name, left, right)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("types", &self.types)
            .field("operations", &self.operations.len())
            .finish()
    }
}
