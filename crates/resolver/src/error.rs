use thiserror::Error;

/// Fatal resolution failures.
///
/// All variants propagate synchronously to the caller of
/// [`resolve`](crate::QueryResolver::resolve) so that mock/schema
/// mismatches surface as test failures instead of masked UI states.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The request document is malformed or does not type-check against
    /// the schema.
    #[error("query validation failed: {0}")]
    QueryValidation(String),

    /// The requested operation name matches no operation in the document.
    #[error("operation `{name}` not found in document")]
    OperationNotFound { name: String },

    /// No mock, fixture, or built-in default can produce a schema-valid
    /// value for a requested field.
    #[error("cannot resolve `{coordinate}`: {reason}")]
    UnresolvedField { coordinate: String, reason: String },
}

impl ResolveError {
    pub(crate) fn unresolved(
        type_name: &str,
        field_name: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnresolvedField {
            coordinate: format!("{type_name}.{field_name}"),
            reason: reason.into(),
        }
    }
}
