use crate::MockValue;
use std::sync::Arc;

/// Factory producing the (partial) field values for one GraphQL type.
pub type TypeMockFn = Arc<dyn Fn() -> MockValue + Send + Sync>;

/// Factory producing the full response data for one named operation, given
/// the operation's variables.
pub type OperationMockFn = Arc<dyn Fn(&MockValue) -> MockValue + Send + Sync>;

/// A type mock: either a static partial object or a factory closure.
///
/// Static values cover config-file mocks; closures cover test code that
/// wants per-invocation output.
#[derive(Clone)]
pub enum MockFactory {
    Value(MockValue),
    Fn(TypeMockFn),
}

impl MockFactory {
    /// Wrap a static value.
    #[must_use]
    pub const fn value(value: MockValue) -> Self {
        Self::Value(value)
    }

    /// Wrap a factory closure.
    pub fn from_fn(factory: impl Fn() -> MockValue + Send + Sync + 'static) -> Self {
        Self::Fn(Arc::new(factory))
    }

    /// Produce the mock output.
    #[must_use]
    pub fn produce(&self) -> MockValue {
        match self {
            Self::Value(value) => value.clone(),
            Self::Fn(factory) => factory(),
        }
    }
}

impl std::fmt::Debug for MockFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

/// An operation mock: a static response or a factory over the variables.
#[derive(Clone)]
pub enum OperationFactory {
    Value(MockValue),
    Fn(OperationMockFn),
}

impl OperationFactory {
    #[must_use]
    pub const fn value(value: MockValue) -> Self {
        Self::Value(value)
    }

    pub fn from_fn(factory: impl Fn(&MockValue) -> MockValue + Send + Sync + 'static) -> Self {
        Self::Fn(Arc::new(factory))
    }

    /// Produce the full response data for the operation.
    #[must_use]
    pub fn produce(&self, variables: &MockValue) -> MockValue {
        match self {
            Self::Value(value) => value.clone(),
            Self::Fn(factory) => factory(variables),
        }
    }
}

impl std::fmt::Debug for OperationFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

/// One registration, tagged by precedence tier role.
///
/// Entries are stored in registration order inside each registry tier so
/// that override/merge order stays explicit and testable.
#[derive(Debug, Clone)]
pub enum MockEntry {
    /// Default field values for all instances of a type. For scalar types
    /// the factory output is the scalar value itself.
    Type {
        type_name: Arc<str>,
        factory: MockFactory,
    },
    /// A full response for one named operation, bypassing type resolution.
    Operation {
        operation_name: Arc<str>,
        factory: OperationFactory,
    },
    /// A concrete object for one entity instance, matched by `__typename`
    /// plus the type's key field.
    Fixture { value: MockValue },
}

impl MockEntry {
    /// A type mock from any factory form.
    pub fn type_mock(type_name: impl Into<Arc<str>>, factory: impl Into<MockFactory>) -> Self {
        Self::Type {
            type_name: type_name.into(),
            factory: factory.into(),
        }
    }

    /// An operation mock from any factory form.
    pub fn operation_mock(
        operation_name: impl Into<Arc<str>>,
        factory: impl Into<OperationFactory>,
    ) -> Self {
        Self::Operation {
            operation_name: operation_name.into(),
            factory: factory.into(),
        }
    }

    /// A fixture entry. The value is validated on registration.
    #[must_use]
    pub const fn fixture(value: MockValue) -> Self {
        Self::Fixture { value }
    }
}

impl From<MockValue> for MockFactory {
    fn from(value: MockValue) -> Self {
        Self::Value(value)
    }
}

impl From<TypeMockFn> for MockFactory {
    fn from(factory: TypeMockFn) -> Self {
        Self::Fn(factory)
    }
}

impl From<MockValue> for OperationFactory {
    fn from(value: MockValue) -> Self {
        Self::Value(value)
    }
}

impl From<OperationMockFn> for OperationFactory {
    fn from(factory: OperationMockFn) -> Self {
        Self::Fn(factory)
    }
}
