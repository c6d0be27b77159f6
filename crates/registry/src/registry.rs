use crate::entry::{MockEntry, MockFactory, OperationFactory};
use crate::{shallow_merge, MockValue, RegistryError, Result, TypePolicies};
use std::sync::Arc;

/// The active set of mocks for one test session.
///
/// The defaults tier is fixed at construction (worker scope); the scoped
/// tier accumulates test-scoped registrations and is discarded by
/// [`reset`](Self::reset). Both tiers preserve registration order, which is
/// what makes override semantics explicit: later entries win.
#[derive(Debug)]
pub struct MockRegistry {
    defaults: Vec<MockEntry>,
    scoped: Vec<MockEntry>,
    policies: TypePolicies,
}

impl MockRegistry {
    /// Build a registry from worker-level default entries.
    pub fn new(defaults: Vec<MockEntry>, policies: TypePolicies) -> Result<Self> {
        for entry in &defaults {
            if let MockEntry::Fixture { value } = entry {
                validate_fixture(value)?;
            }
        }
        Ok(Self {
            defaults,
            scoped: Vec::new(),
            policies,
        })
    }

    /// An empty registry with no defaults and no policies.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            defaults: Vec::new(),
            scoped: Vec::new(),
            policies: TypePolicies::new(),
        }
    }

    #[must_use]
    pub const fn policies(&self) -> &TypePolicies {
        &self.policies
    }

    /// Register test-scoped type mocks.
    pub fn add_type_mocks<N, F>(&mut self, mocks: impl IntoIterator<Item = (N, F)>)
    where
        N: Into<Arc<str>>,
        F: Into<MockFactory>,
    {
        for (type_name, factory) in mocks {
            let type_name = type_name.into();
            tracing::trace!(type_name = type_name.as_ref(), "registering type mock");
            self.scoped.push(MockEntry::Type {
                type_name,
                factory: factory.into(),
            });
        }
    }

    /// Register test-scoped operation mocks.
    pub fn add_operation_mocks<N, F>(&mut self, mocks: impl IntoIterator<Item = (N, F)>)
    where
        N: Into<Arc<str>>,
        F: Into<OperationFactory>,
    {
        for (operation_name, factory) in mocks {
            let operation_name = operation_name.into();
            tracing::trace!(
                operation = operation_name.as_ref(),
                "registering operation mock"
            );
            self.scoped.push(MockEntry::Operation {
                operation_name,
                factory: factory.into(),
            });
        }
    }

    /// Register test-scoped fixtures. Each fixture must be a JSON object
    /// carrying `__typename`.
    pub fn add_fixtures(&mut self, fixtures: impl IntoIterator<Item = MockValue>) -> Result<()> {
        for value in fixtures {
            let type_name = validate_fixture(&value)?;
            if self.policies.key_field(&type_name).is_none() {
                // Without a key field the fixture can never be matched.
                tracing::warn!(
                    type_name = type_name.as_str(),
                    "fixture registered for a type with no key-field policy"
                );
            }
            self.scoped.push(MockEntry::Fixture { value });
        }
        Ok(())
    }

    /// Discard all test-scoped registrations, restoring the worker-level
    /// defaults. Safe to call repeatedly and with nothing registered.
    pub fn reset(&mut self) {
        if !self.scoped.is_empty() {
            tracing::debug!(discarded = self.scoped.len(), "registry reset");
        }
        self.scoped.clear();
    }

    /// The merged type-mock output for a type, if any registration covers
    /// it. Object outputs are shallow-merged in registration order
    /// (defaults first, then scoped), so later registrations override
    /// earlier ones per field. Non-object outputs (scalar type mocks)
    /// replace the accumulator wholesale.
    #[must_use]
    pub fn type_mock_output(&self, type_name: &str) -> Option<MockValue> {
        let mut merged: Option<MockValue> = None;
        for entry in self.entries() {
            if let MockEntry::Type {
                type_name: name,
                factory,
            } = entry
            {
                if name.as_ref() == type_name {
                    let output = factory.produce();
                    merged = Some(match merged {
                        Some(base) => shallow_merge(base, output),
                        None => output,
                    });
                }
            }
        }
        merged
    }

    /// The most recently registered operation mock for a name. The scoped
    /// tier wins over defaults.
    #[must_use]
    pub fn operation_mock(&self, operation_name: &str) -> Option<&OperationFactory> {
        self.entries().rev().find_map(|entry| match entry {
            MockEntry::Operation {
                operation_name: name,
                factory,
            } if name.as_ref() == operation_name => Some(factory),
            _ => None,
        })
    }

    /// The newest fixture matching a type and key-field value, if the type
    /// has a key-field policy. `key_value` is compared against the
    /// fixture's own key field.
    #[must_use]
    pub fn fixture_for(&self, type_name: &str, key_value: &MockValue) -> Option<&MockValue> {
        let key_field = self.policies.key_field(type_name)?;
        self.entries().rev().find_map(|entry| match entry {
            MockEntry::Fixture { value }
                if fixture_typename(value) == Some(type_name)
                    && value.get(key_field) == Some(key_value) =>
            {
                Some(value)
            }
            _ => None,
        })
    }

    /// Whether any operation mock is registered under this name.
    #[must_use]
    pub fn has_operation_mock(&self, operation_name: &str) -> bool {
        self.operation_mock(operation_name).is_some()
    }

    /// Whether any type mock is registered for this type.
    #[must_use]
    pub fn has_type_mock(&self, type_name: &str) -> bool {
        self.entries().any(|entry| {
            matches!(entry, MockEntry::Type { type_name: name, .. } if name.as_ref() == type_name)
        })
    }

    /// All entries in precedence order: defaults first, scoped after.
    fn entries(&self) -> impl DoubleEndedIterator<Item = &MockEntry> {
        self.defaults.iter().chain(self.scoped.iter())
    }
}

fn fixture_typename(value: &MockValue) -> Option<&str> {
    value.get("__typename").and_then(MockValue::as_str)
}

fn validate_fixture(value: &MockValue) -> Result<String> {
    if !value.is_object() {
        return Err(RegistryError::FixtureNotAnObject(value.to_string()));
    }
    fixture_typename(value)
        .map(ToOwned::to_owned)
        .ok_or_else(|| RegistryError::FixtureMissingTypename(value.to_string()))
}
