//! Integration tests for the mock registry.
//!
//! These verify tier layering, per-field override order, fixture matching
//! by key field, and reset semantics.

use graphql_mock_registry::{
    MockEntry, MockFactory, MockRegistry, OperationFactory, TypePolicies,
};
use serde_json::json;

fn policies() -> TypePolicies {
    let mut policies = TypePolicies::new();
    policies.insert("GitBlob", "canonicalURL");
    policies
}

fn registry_with_defaults() -> MockRegistry {
    let defaults = vec![
        MockEntry::type_mock("Query", MockFactory::value(json!({"currentUser": null}))),
        MockEntry::type_mock("User", MockFactory::value(json!({"avatarURL": null}))),
    ];
    MockRegistry::new(defaults, policies()).unwrap()
}

#[test]
fn test_defaults_merge_in_order() {
    let defaults = vec![
        MockEntry::type_mock(
            "User",
            MockFactory::value(json!({"name": "a", "email": "a@example.com"})),
        ),
        MockEntry::type_mock("User", MockFactory::value(json!({"name": "b"}))),
    ];
    let registry = MockRegistry::new(defaults, TypePolicies::new()).unwrap();
    let output = registry.type_mock_output("User").unwrap();
    assert_eq!(output, json!({"name": "b", "email": "a@example.com"}));
}

#[test]
fn test_scoped_tier_overrides_defaults_per_field() {
    let mut registry = registry_with_defaults();
    registry.add_type_mocks([(
        "User",
        MockFactory::from_fn(|| json!({"name": "override"})),
    )]);

    let output = registry.type_mock_output("User").unwrap();
    assert_eq!(output, json!({"avatarURL": null, "name": "override"}));
}

#[test]
fn test_reset_restores_worker_defaults() {
    let mut registry = registry_with_defaults();
    registry.add_type_mocks([("Query", MockFactory::value(json!({"currentUser": {"id": "u1"}})))]);
    assert_eq!(
        registry.type_mock_output("Query").unwrap(),
        json!({"currentUser": {"id": "u1"}})
    );

    registry.reset();
    assert_eq!(
        registry.type_mock_output("Query").unwrap(),
        json!({"currentUser": null})
    );

    // Idempotent: calling reset twice is equivalent to calling it once.
    registry.reset();
    assert_eq!(
        registry.type_mock_output("Query").unwrap(),
        json!({"currentUser": null})
    );
}

#[test]
fn test_reset_is_safe_with_no_additions() {
    let mut registry = MockRegistry::empty();
    registry.reset();
    assert!(registry.type_mock_output("Query").is_none());
}

#[test]
fn test_operation_mock_most_recent_wins() {
    let mut registry = MockRegistry::empty();
    registry.add_operation_mocks([(
        "Workflows",
        OperationFactory::value(json!({"workflows": []})),
    )]);
    registry.add_operation_mocks([(
        "Workflows",
        OperationFactory::from_fn(|_| json!({"workflows": [{"id": "1"}]})),
    )]);

    let mock = registry.operation_mock("Workflows").unwrap();
    assert_eq!(
        mock.produce(&json!({})),
        json!({"workflows": [{"id": "1"}]})
    );
    assert!(registry.operation_mock("Workflow").is_none());
}

#[test]
fn test_operation_mock_receives_variables() {
    let mut registry = MockRegistry::empty();
    registry.add_operation_mocks([(
        "Workflow",
        OperationFactory::from_fn(|variables| {
            json!({"node": {"id": variables.get("id").cloned().unwrap_or_default()}})
        }),
    )]);

    let mock = registry.operation_mock("Workflow").unwrap();
    assert_eq!(
        mock.produce(&json!({"id": "42"})),
        json!({"node": {"id": "42"}})
    );
}

#[test]
fn test_fixture_matched_by_type_and_key() {
    let mut registry = MockRegistry::new(Vec::new(), policies()).unwrap();
    registry
        .add_fixtures([
            json!({"__typename": "GitBlob", "canonicalURL": "/a", "content": "aaa"}),
            json!({"__typename": "GitBlob", "canonicalURL": "/b", "content": "bbb"}),
        ])
        .unwrap();

    let fixture = registry.fixture_for("GitBlob", &json!("/b")).unwrap();
    assert_eq!(fixture.get("content"), Some(&json!("bbb")));
    assert!(registry.fixture_for("GitBlob", &json!("/c")).is_none());
    // No policy for this type: fixture lookup is a miss, not an error.
    assert!(registry.fixture_for("GitTree", &json!("/a")).is_none());
}

#[test]
fn test_newest_fixture_wins() {
    let mut registry = MockRegistry::new(Vec::new(), policies()).unwrap();
    registry
        .add_fixtures([json!({"__typename": "GitBlob", "canonicalURL": "/a", "content": "old"})])
        .unwrap();
    registry
        .add_fixtures([json!({"__typename": "GitBlob", "canonicalURL": "/a", "content": "new"})])
        .unwrap();

    let fixture = registry.fixture_for("GitBlob", &json!("/a")).unwrap();
    assert_eq!(fixture.get("content"), Some(&json!("new")));
}

#[test]
fn test_fixture_without_typename_rejected() {
    let mut registry = MockRegistry::empty();
    let err = registry.add_fixtures([json!({"canonicalURL": "/a"})]);
    assert!(err.is_err());

    let err = registry.add_fixtures([json!("not an object")]);
    assert!(err.is_err());
}

#[test]
fn test_scalar_type_mock_replaces_wholesale() {
    let mut registry = MockRegistry::empty();
    registry.add_type_mocks([("GitObjectID", MockFactory::value(json!("deadbeef")))]);
    registry.add_type_mocks([("GitObjectID", MockFactory::value(json!("cafebabe")))]);
    assert_eq!(
        registry.type_mock_output("GitObjectID").unwrap(),
        json!("cafebabe")
    );
}
