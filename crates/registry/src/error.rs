use thiserror::Error;

/// Errors raised when registering mocks.
///
/// Lookups never error; only malformed registrations are rejected so that
/// mistakes surface at the registration site rather than mid-resolution.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A fixture object was registered without a `__typename` field.
    #[error("fixture is missing a `__typename` field: {0}")]
    FixtureMissingTypename(String),

    /// A fixture was registered for a type but is not a JSON object.
    #[error("fixture must be a JSON object, got: {0}")]
    FixtureNotAnObject(String),
}
