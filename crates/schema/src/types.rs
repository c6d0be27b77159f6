use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Structure of a type definition (no resolvers, no source positions)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub name: Arc<str>,
    pub kind: TypeDefKind,
    /// Field name → signature. Empty for scalars, unions and enums.
    pub fields: HashMap<Arc<str>, FieldSignature>,
    pub implements: Vec<Arc<str>>,
    pub union_members: Vec<Arc<str>>,
    pub enum_values: Vec<EnumValueDef>,
    pub description: Option<Arc<str>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum TypeDefKind {
    Object,
    Interface,
    Union,
    Enum,
    Scalar,
    InputObject,
}

impl TypeDefKind {
    /// Whether instances of this kind resolve via a selection set.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Object | Self::Interface | Self::Union)
    }

    /// Whether the concrete type of an instance must be discriminated at
    /// resolution time (`__typename`).
    #[must_use]
    pub const fn is_abstract(self) -> bool {
        matches!(self, Self::Interface | Self::Union)
    }
}

/// Signature of a field (declared return type, no body)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSignature {
    pub name: Arc<str>,
    pub type_ref: TypeRef,
    pub description: Option<Arc<str>>,
}

/// Reference to a type (with list/non-null wrappers flattened)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub name: Arc<str>,
    pub is_list: bool,
    pub is_non_null: bool,
    /// For list types: whether the element type is non-null.
    pub inner_non_null: bool,
}

/// Enum value definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueDef {
    pub name: Arc<str>,
    pub is_deprecated: bool,
}

/// The kind of an executable operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl From<apollo_compiler::ast::OperationType> for OperationKind {
    fn from(op: apollo_compiler::ast::OperationType) -> Self {
        match op {
            apollo_compiler::ast::OperationType::Query => Self::Query,
            apollo_compiler::ast::OperationType::Mutation => Self::Mutation,
            apollo_compiler::ast::OperationType::Subscription => Self::Subscription,
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Mutation => write!(f, "mutation"),
            Self::Subscription => write!(f, "subscription"),
        }
    }
}
