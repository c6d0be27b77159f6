use graphql_mock_registry::{MockEntry, MockFactory};
use graphql_mock_resolver::DefaultValueGenerator;
use graphql_mock_schema::{SchemaIndex, TypeDefKind};
use serde_json::json;

/// Build the worker-level baseline mocks for a schema.
///
/// Each entry is installed only when the schema actually declares the
/// type (and field) it targets, so the same baseline works across schema
/// variants:
///
/// - `Query.currentUser` → `null` (no signed-in user),
/// - `User.avatarURL` → `null`,
/// - `Person` → a seeded name/email/displayName triple,
/// - `SettingsCascade.final` / `TemporarySettings.contents` → `"{}"`,
/// - every scalar whose name contains `JSON` → `"{}"` (freeform
///   JSON-string scalars must stay parseable).
#[must_use]
pub fn baseline_defaults(schema: &SchemaIndex, seed: u64) -> Vec<MockEntry> {
    let generator = DefaultValueGenerator::new(seed);
    let mut defaults = Vec::new();

    if schema.field("Query", "currentUser").is_some() {
        defaults.push(MockEntry::type_mock(
            "Query",
            MockFactory::value(json!({"currentUser": null})),
        ));
    }

    if schema.field("User", "avatarURL").is_some() {
        defaults.push(MockEntry::type_mock(
            "User",
            MockFactory::value(json!({"avatarURL": null})),
        ));
    }

    if schema.contains("Person") {
        let first = capitalize(generator.word("Person", "firstName"));
        let last = capitalize(generator.word("Person", "lastName"));
        let mut person = serde_json::Map::new();
        if schema.field("Person", "name").is_some() {
            person.insert("name".to_owned(), json!(format!("{first} {last}")));
        }
        if schema.field("Person", "email").is_some() {
            person.insert(
                "email".to_owned(),
                json!(format!(
                    "{}.{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase()
                )),
            );
        }
        if schema.field("Person", "displayName").is_some() {
            person.insert(
                "displayName".to_owned(),
                json!(format!("{}.{}", first.to_lowercase(), last.to_lowercase())),
            );
        }
        if schema.field("Person", "avatarURL").is_some() {
            person.insert("avatarURL".to_owned(), json!(null));
        }
        if !person.is_empty() {
            defaults.push(MockEntry::type_mock(
                "Person",
                MockFactory::value(serde_json::Value::Object(person)),
            ));
        }
    }

    if schema.field("SettingsCascade", "final").is_some() {
        defaults.push(MockEntry::type_mock(
            "SettingsCascade",
            MockFactory::value(json!({"final": "{}"})),
        ));
    }

    if schema.field("TemporarySettings", "contents").is_some() {
        defaults.push(MockEntry::type_mock(
            "TemporarySettings",
            MockFactory::value(json!({"contents": "{}"})),
        ));
    }

    // Freeform JSON-string scalars must hold valid JSON.
    let json_scalars: Vec<String> = schema
        .type_names()
        .filter(|name| {
            name.contains("JSON")
                && schema
                    .get(name)
                    .is_some_and(|def| def.kind == TypeDefKind::Scalar)
        })
        .map(ToOwned::to_owned)
        .collect();
    for name in json_scalars {
        defaults.push(MockEntry::type_mock(name, MockFactory::value(json!("{}"))));
    }

    defaults
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
