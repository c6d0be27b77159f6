//! Typed schema index for schema-driven GraphQL mocking.
//!
//! This crate parses a schema (SDL) once per worker and builds an explicit
//! in-memory index (type name → field name → type descriptor) so that mock
//! resolution is a series of map lookups instead of repeated AST walks.
//! The index is immutable after construction and is shared read-only across
//! all mock sessions in a worker.

mod error;
mod index;
mod types;

pub use error::SchemaError;
pub use index::SchemaIndex;
pub use types::{
    EnumValueDef, FieldSignature, OperationKind, TypeDef, TypeDefKind, TypeRef,
};

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
