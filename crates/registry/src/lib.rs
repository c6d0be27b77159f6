//! Layered registry of type mocks, operation mocks and fixtures.
//!
//! The registry holds the data sources a mock resolution falls through, in
//! precedence order: fixtures (exact entity matches by key field), type
//! mocks (per-type field factories), and operation mocks (whole-response
//! factories for a named operation).
//!
//! Entries live in two tiers. The *defaults* tier is installed once per
//! worker and never changes; the *scoped* tier collects additions made by a
//! single test and is discarded by [`MockRegistry::reset`]. Within a tier,
//! later registrations override earlier ones per field; the scoped tier
//! overrides the defaults tier.
//!
//! Lookups never fail: an absent mock is `None` and the caller falls
//! through to the next precedence source.

mod entry;
mod error;
mod policies;
mod registry;

pub use entry::{MockEntry, MockFactory, OperationFactory, OperationMockFn, TypeMockFn};
pub use error::RegistryError;
pub use policies::{PolicyWarning, TypePolicies, TypePolicy};
pub use registry::MockRegistry;

/// Mock output values are JSON-compatible.
pub type MockValue = serde_json::Value;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Shallow-merge `overlay` onto `base`.
///
/// When both are objects, overlay keys win and other base keys survive.
/// Any other combination replaces `base` wholesale (this is what lets a
/// scalar-typed mock override an earlier one, and an explicit `null`
/// override an object).
#[must_use]
pub fn shallow_merge(base: MockValue, overlay: MockValue) -> MockValue {
    match (base, overlay) {
        (MockValue::Object(mut base), MockValue::Object(overlay)) => {
            for (key, value) in overlay {
                base.insert(key, value);
            }
            MockValue::Object(base)
        }
        (_, overlay) => overlay,
    }
}
