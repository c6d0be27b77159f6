use crate::{GraphQLRequest, GraphQLResponse};
use graphql_mock_registry::{
    shallow_merge, MockEntry, MockFactory, MockRegistry, MockValue, OperationFactory,
    RegistryError, TypePolicies,
};
use graphql_mock_resolver::{QueryResolver, ResolveError, ResolveOptions, ResolverSettings};
use graphql_mock_schema::SchemaIndex;
use serde_json::json;
use std::sync::Arc;

/// Construction surface for a mock server session.
#[derive(Debug)]
pub struct MockServerConfig {
    /// Worker-shared schema index. Read-only; never mutated after build.
    pub schema: Arc<SchemaIndex>,
    /// Worker-level default mock entries (see
    /// [`baseline_defaults`](crate::baseline_defaults)).
    pub defaults: Vec<MockEntry>,
    /// Key-field policies for fixture matching.
    pub policies: TypePolicies,
    pub settings: ResolverSettings,
}

impl MockServerConfig {
    #[must_use]
    pub fn new(schema: Arc<SchemaIndex>) -> Self {
        Self {
            schema,
            defaults: Vec::new(),
            policies: TypePolicies::new(),
            settings: ResolverSettings::default(),
        }
    }
}

/// One test session's mock server.
///
/// Owns the session's registry exclusively; the schema (inside the
/// resolver) is shared read-only across sessions in a worker. Registry
/// writes happen between requests only, which is what keeps resolution a
/// pure function of the inputs.
#[derive(Debug)]
pub struct MockServer {
    resolver: QueryResolver,
    registry: MockRegistry,
    debug: bool,
}

impl MockServer {
    /// Build a session from the construction surface. Key-field policies
    /// naming unknown schema types are reported as warnings, not errors.
    pub fn new(config: MockServerConfig) -> Result<Self, RegistryError> {
        let known: Vec<&str> = config.schema.type_names().collect();
        let _warnings = config.policies.validate_against(known.iter().copied());

        let registry = MockRegistry::new(config.defaults, config.policies)?;
        let resolver = QueryResolver::with_settings(config.schema, config.settings);
        Ok(Self {
            resolver,
            registry,
            debug: false,
        })
    }

    /// Enable diagnostic logging for subsequent requests (both
    /// [`ResolveOptions`] flags).
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<SchemaIndex> {
        self.resolver.schema()
    }

    /// Resolve one operation with the session's current options.
    pub fn query(
        &self,
        source: &str,
        variables: &MockValue,
        operation_name: Option<&str>,
    ) -> Result<MockValue, ResolveError> {
        self.query_with_options(source, variables, operation_name, self.options())
    }

    /// Resolve one operation with explicit options.
    pub fn query_with_options(
        &self,
        source: &str,
        variables: &MockValue,
        operation_name: Option<&str>,
        options: ResolveOptions,
    ) -> Result<MockValue, ResolveError> {
        self.resolver
            .resolve(&self.registry, source, variables, operation_name, options)
    }

    /// Register test-scoped type mocks.
    pub fn mock_types<N, F>(&mut self, mocks: impl IntoIterator<Item = (N, F)>)
    where
        N: Into<Arc<str>>,
        F: Into<MockFactory>,
    {
        self.registry.add_type_mocks(mocks);
    }

    /// Register test-scoped operation mocks.
    pub fn mock_operations<N, F>(&mut self, mocks: impl IntoIterator<Item = (N, F)>)
    where
        N: Into<Arc<str>>,
        F: Into<OperationFactory>,
    {
        self.registry.add_operation_mocks(mocks);
    }

    /// Register test-scoped fixtures.
    pub fn fixture(
        &mut self,
        fixtures: impl IntoIterator<Item = MockValue>,
    ) -> Result<(), RegistryError> {
        self.registry.add_fixtures(fixtures)
    }

    /// Sugar over [`mock_types`](Self::mock_types): set the signed-in
    /// viewer. The given partial merges over `{ "avatarURL": null }`.
    pub fn sign_in(&mut self, user_mock: MockValue) {
        let user = shallow_merge(json!({"avatarURL": null}), user_mock);
        self.mock_types([(
            "Query",
            MockFactory::value(json!({"currentUser": user})),
        )]);
    }

    /// Sugar over [`mock_types`](Self::mock_types): no signed-in viewer.
    pub fn sign_out(&mut self) {
        self.mock_types([(
            "Query",
            MockFactory::value(json!({"currentUser": null})),
        )]);
    }

    /// Discard all test-scoped mocks, restoring the worker defaults.
    /// Called unconditionally at test teardown, even after failures.
    pub fn reset(&mut self) {
        self.registry.reset();
    }

    /// Whether an operation mock is registered under this name.
    #[must_use]
    pub fn has_operation_mock(&self, operation_name: &str) -> bool {
        self.registry.has_operation_mock(operation_name)
    }

    /// Whether a type mock is registered for this type.
    #[must_use]
    pub fn has_type_mock(&self, type_name: &str) -> bool {
        self.registry.has_type_mock(type_name)
    }

    /// Serve one wire request, mapping fatal resolution errors into the
    /// response's `errors` array.
    #[must_use]
    pub fn handle(&self, request: &GraphQLRequest) -> GraphQLResponse {
        let variables = request.variables();
        match self.query_with_options(
            &request.query,
            &variables,
            request.operation_name.as_deref(),
            self.options(),
        ) {
            Ok(data) => GraphQLResponse::data(data),
            Err(error) => {
                if self.debug {
                    tracing::error!(%error, "mock resolution failed");
                }
                GraphQLResponse::error(error.to_string())
            }
        }
    }

    /// Serve one raw JSON request body.
    #[must_use]
    pub fn handle_json(&self, body: &str) -> GraphQLResponse {
        match serde_json::from_str::<GraphQLRequest>(body) {
            Ok(request) => self.handle(&request),
            Err(error) => GraphQLResponse::error(format!("malformed GraphQL request: {error}")),
        }
    }

    const fn options(&self) -> ResolveOptions {
        ResolveOptions {
            log_graphql_errors: self.debug,
            warn_on_missing_operation_mocks: self.debug,
        }
    }
}
