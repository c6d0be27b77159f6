use graphql_mock_registry::TypePolicies;
use graphql_mock_resolver::ResolverSettings;
use graphql_mock_schema::SchemaIndex;
use graphql_mock_session::{baseline_defaults, MockServer, MockServerConfig};
use std::sync::Arc;

/// A schema exercising every shape the engine handles: interface and
/// union discrimination, key-fielded entity types, nested lists, enums,
/// date-like scalars, JSON-string scalars, and an opaque scalar with no
/// generatable default.
pub const TEST_SCHEMA: &str = r#"
scalar DateTime
scalar JSONCString
scalar OpaqueBlob

interface Node {
  id: ID!
}

type Person {
  name: String!
  email: String!
  displayName: String!
  avatarURL: String
}

type User implements Node {
  id: ID!
  username: String!
  avatarURL: String
  createdAt: DateTime
}

type GitCommit implements Node {
  id: ID!
  oid: String!
  subject: String!
  author: Person!
  committedAt: DateTime!
}

type GitBlob implements Node {
  id: ID!
  canonicalURL: String!
  content: String!
  binary: Boolean!
}

type GitTree implements Node {
  id: ID!
  canonicalURL: String!
  entries: [GitBlob!]!
}

union SearchResult = User | GitCommit

enum DiffMode {
  UNIFIED
  SPLIT
}

type SettingsCascade {
  final: JSONCString!
}

type Query {
  currentUser: User
  node(id: ID!): Node
  search(term: String!): [SearchResult!]!
  blob(url: String!): GitBlob
  tree(url: String!): GitTree
  settings: SettingsCascade!
  diffMode: DiffMode!
  opaque: OpaqueBlob!
}
"#;

/// Parse [`TEST_SCHEMA`] into a shared index.
///
/// # Panics
/// Panics if the embedded schema is invalid, which is a bug in this crate.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_schema() -> Arc<SchemaIndex> {
    Arc::new(SchemaIndex::parse(TEST_SCHEMA, "test-schema.graphql").expect("test schema is valid"))
}

/// A mock server over [`TEST_SCHEMA`] with the baseline defaults and the
/// canonical-URL key-field policies installed.
///
/// # Panics
/// Panics if the baseline defaults are rejected, which is a bug in this
/// crate.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_server() -> MockServer {
    let schema = test_schema();
    let settings = ResolverSettings::default();

    let mut policies = TypePolicies::new();
    policies.insert("GitBlob", "canonicalURL");
    policies.insert("GitTree", "canonicalURL");

    let mut config = MockServerConfig::new(Arc::clone(&schema));
    config.defaults = baseline_defaults(&schema, settings.seed);
    config.policies = policies;
    config.settings = settings;

    MockServer::new(config).expect("baseline defaults are valid")
}
