//! Integration tests for the schema index.
//!
//! These verify index construction, root type lookup, abstract type
//! discrimination, and fragment type-condition matching.

use graphql_mock_schema::{OperationKind, SchemaIndex, TypeDefKind};

const SCHEMA: &str = r"
scalar DateTime

interface Node {
  id: ID!
}

type User implements Node {
  id: ID!
  name: String!
  createdAt: DateTime
}

type Org implements Node {
  id: ID!
  members: [User!]!
}

union SearchResult = User | Org

enum AccessLevel {
  READER
  ADMIN
}

type Query {
  node(id: ID!): Node
  search(term: String!): [SearchResult!]!
  currentUser: User
}

type Mutation {
  updateAccess(level: AccessLevel!): User
}
";

fn index() -> SchemaIndex {
    SchemaIndex::parse(SCHEMA, "schema.graphql").unwrap()
}

#[test]
fn test_index_contains_schema_types() {
    let schema = index();
    assert_eq!(schema.get("User").unwrap().kind, TypeDefKind::Object);
    assert_eq!(schema.get("Node").unwrap().kind, TypeDefKind::Interface);
    assert_eq!(schema.get("SearchResult").unwrap().kind, TypeDefKind::Union);
    assert_eq!(schema.get("AccessLevel").unwrap().kind, TypeDefKind::Enum);
    assert_eq!(schema.get("DateTime").unwrap().kind, TypeDefKind::Scalar);
    assert!(schema.get("Int").is_none(), "built-ins are not indexed");
}

#[test]
fn test_field_lookup() {
    let schema = index();
    let members = schema.field("Org", "members").unwrap();
    assert_eq!(members.type_ref.name.as_ref(), "User");
    assert!(members.type_ref.is_list);
    assert!(schema.field("Org", "nope").is_none());
    assert!(schema.field("Nope", "members").is_none());
}

#[test]
fn test_root_types() {
    let schema = index();
    assert_eq!(schema.root_type(OperationKind::Query), Some("Query"));
    assert_eq!(schema.root_type(OperationKind::Mutation), Some("Mutation"));
    assert_eq!(schema.root_type(OperationKind::Subscription), None);
}

#[test]
fn test_possible_types_sorted() {
    let schema = index();
    assert!(schema.is_abstract("Node"));
    assert!(schema.is_abstract("SearchResult"));
    assert!(!schema.is_abstract("User"));

    let node_types: Vec<_> = schema
        .possible_types("Node")
        .iter()
        .map(AsRef::as_ref)
        .collect();
    assert_eq!(node_types, vec!["Org", "User"]);

    let union_types: Vec<_> = schema
        .possible_types("SearchResult")
        .iter()
        .map(AsRef::as_ref)
        .collect();
    assert_eq!(union_types, vec!["Org", "User"]);
}

#[test]
fn test_type_matches() {
    let schema = index();
    assert!(schema.type_matches("User", "User"));
    assert!(schema.type_matches("User", "Node"));
    assert!(schema.type_matches("User", "SearchResult"));
    assert!(!schema.type_matches("Node", "User"));
    assert!(!schema.type_matches("User", "Org"));
}

#[test]
fn test_enum_values() {
    let schema = index();
    let access = schema.get("AccessLevel").unwrap();
    let values: Vec<_> = access
        .enum_values
        .iter()
        .map(|v| v.name.as_ref())
        .collect();
    assert_eq!(values, vec!["READER", "ADMIN"]);
}

#[test]
fn test_validation_failure_reported() {
    // Object type referencing an undefined type must fail validation.
    let err = SchemaIndex::parse("type Query { user: Ghost }", "bad.graphql");
    assert!(err.is_err());
}
