//! Selection-set resolution engine for schema-driven GraphQL mocking.
//!
//! Given a validated schema index, a mock registry, and a request
//! (document source, variables, operation name), [`QueryResolver::resolve`]
//! produces the response `data` object.
//!
//! Resolution precedence per field, highest first:
//!
//! 1. the value the parent object provided for the field (an operation
//!    mock, or a nested object returned by an ancestor's mock),
//! 2. a fixture matching the object's type and key-field value,
//! 3. the type's merged mock output,
//! 4. a generated, schema-valid default.
//!
//! Resolution is a pure function of (schema, registry state, document,
//! variables, settings): defaults are derived deterministically from the
//! configured seed, so identical inputs always produce identical output.

mod defaults;
mod error;
mod walk;

pub use defaults::DefaultValueGenerator;
pub use error::ResolveError;
pub use walk::QueryResolver;

/// Result type for resolution.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Per-request diagnostic flags.
///
/// Both are independent and default to off. Neither changes which values
/// are produced, only what gets reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Surface resolution fallbacks and failures on the diagnostic channel
    /// instead of silently defaulting.
    pub log_graphql_errors: bool,
    /// Emit a non-fatal warning when an operation has no dedicated mock
    /// and fully falls back to type-level resolution. Also softens
    /// operation-mock shape gaps from fatal errors to warnings.
    pub warn_on_missing_operation_mocks: bool,
}

/// Construction-time resolution settings.
#[derive(Debug, Clone, Copy)]
pub struct ResolverSettings {
    /// Seed for generated scalar defaults. Fixed by default so repeated
    /// runs are snapshot-stable; override to vary generated data.
    pub seed: u64,
    /// Number of elements generated for an unseeded list field.
    pub default_list_length: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            default_list_length: 2,
        }
    }
}
