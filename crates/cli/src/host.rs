use anyhow::{Context, Result};
use colored::Colorize;
use graphql_mock_config::{find_config, load_config, ConfigError, MockConfig};
use graphql_mock_registry::{MockEntry, MockFactory, OperationFactory, TypePolicies};
use graphql_mock_resolver::ResolverSettings;
use graphql_mock_schema::SchemaIndex;
use graphql_mock_session::{baseline_defaults, MockServer, MockServerConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A fully constructed mock server plus the endpoint it should serve on.
#[derive(Debug)]
pub struct MockHost {
    pub server: MockServer,
    pub endpoint: String,
}

/// Load config, parse the schema, and install the configured mock data.
#[tracing::instrument(skip_all)]
pub fn load(config_path: Option<PathBuf>, quiet: bool) -> Result<MockHost> {
    let config_path = match config_path {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir().context("cannot determine working directory")?;
            find_config(&cwd).ok_or(ConfigError::NotFound)?
        }
    };
    let base_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let config = load_config(&config_path)?;

    let schema_files = config.resolve_schema_files(&base_dir)?;
    let mut sdl = String::new();
    for file in &schema_files {
        let contents = fs::read_to_string(file)
            .with_context(|| format!("failed to read schema file {}", file.display()))?;
        sdl.push_str(&contents);
        sdl.push('\n');
    }
    let schema = Arc::new(SchemaIndex::parse(&sdl, "schema.graphql")?);

    if !quiet {
        eprintln!(
            "{} loaded {} schema file(s), {} types",
            "✓".green(),
            schema_files.len(),
            schema.type_names().count()
        );
    }

    let mut settings = ResolverSettings::default();
    if let Some(seed) = config.seed {
        settings.seed = seed;
    }
    if let Some(length) = config.default_list_length {
        settings.default_list_length = length;
    }

    let mut defaults = baseline_defaults(&schema, settings.seed);
    install_config_mocks(&config, &base_dir, &mut defaults)?;

    let mut policies = TypePolicies::new();
    for (type_name, policy) in &config.type_policies {
        policies.insert(type_name.clone(), policy.key_field.clone());
    }

    let mut server_config = MockServerConfig::new(schema);
    server_config.defaults = defaults;
    server_config.policies = policies;
    server_config.settings = settings;
    let server = MockServer::new(server_config)?;

    Ok(MockHost {
        server,
        endpoint: config.endpoint.clone(),
    })
}

/// Append static type mocks, operation response files and fixture files
/// from the config to the worker defaults.
fn install_config_mocks(
    config: &MockConfig,
    base_dir: &Path,
    defaults: &mut Vec<MockEntry>,
) -> Result<()> {
    for (type_name, value) in &config.types {
        defaults.push(MockEntry::type_mock(
            type_name.clone(),
            MockFactory::value(value.clone()),
        ));
    }

    for (operation_name, path) in &config.operations {
        let value = read_json(&resolve_path(base_dir, path))
            .with_context(|| format!("operation mock for `{operation_name}`"))?;
        defaults.push(MockEntry::operation_mock(
            operation_name.clone(),
            OperationFactory::value(value),
        ));
    }

    for path in &config.fixtures {
        let value = read_json(&resolve_path(base_dir, path))
            .with_context(|| format!("fixture file {}", path.display()))?;
        let entries = value
            .as_array()
            .cloned()
            .with_context(|| format!("fixture file {} must hold a JSON array", path.display()))?;
        defaults.extend(entries.into_iter().map(MockEntry::fixture));
    }

    Ok(())
}

fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid JSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_builds_a_working_server() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("schema.graphql"),
            "type User { id: ID! avatarURL: String }\ntype Query { currentUser: User }",
        )
        .unwrap();
        fs::write(
            dir.path().join("viewer.json"),
            r#"{"currentUser": {"id": "op-user"}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(".graphqlmockrc.yaml"),
            "schema: '*.graphql'\nendpoint: /.api/graphql\noperations:\n  Viewer: viewer.json\n",
        )
        .unwrap();

        let host = load(Some(dir.path().join(".graphqlmockrc.yaml")), true).unwrap();
        assert_eq!(host.endpoint, "/.api/graphql");

        // Baseline default: signed out.
        let data = host
            .server
            .query("query Other { currentUser { id } }", &json!({}), Some("Other"))
            .unwrap();
        assert_eq!(data, json!({"currentUser": null}));

        // Config-installed operation mock.
        let data = host
            .server
            .query("query Viewer { currentUser { id } }", &json!({}), Some("Viewer"))
            .unwrap();
        assert_eq!(data, json!({"currentUser": {"id": "op-user"}}));
    }

    #[test]
    fn test_load_rejects_missing_schema_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".graphqlmockrc.yaml"),
            "schema: 'nope/*.graphql'\n",
        )
        .unwrap();
        let err = load(Some(dir.path().join(".graphqlmockrc.yaml")), true).unwrap_err();
        assert!(err
            .chain()
            .any(|cause| cause.downcast_ref::<ConfigError>().is_some()));
    }
}
