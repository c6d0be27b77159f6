use crate::{ConfigError, MockConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
const CONFIG_FILES: &[&str] = &[
    ".graphqlmockrc.yml",
    ".graphqlmockrc.yaml",
    ".graphqlmockrc.json",
    "graphql-mock.config.yml",
    "graphql-mock.config.yaml",
    "graphql-mock.config.json",
    "graphql-mock.config.toml",
];

/// Find a config file by walking up the directory tree from the given
/// start directory. Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current_dir = start_dir.to_path_buf();

    loop {
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }
        }
        if !current_dir.pop() {
            tracing::debug!("no config file found");
            return None;
        }
    }
}

/// Load a config from the specified path.
/// The format is detected from the file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<MockConfig> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents, path)
}

/// Load a config from a string.
/// The path is used for error messages and format detection.
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<MockConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        "toml" => parse_toml(contents, path)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;
    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<MockConfig> {
    serde_yaml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<MockConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

fn parse_toml(contents: &str, path: &Path) -> Result<MockConfig> {
    toml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("TOML parse error: {e}"),
    })
}

/// Validate the loaded configuration
fn validate_config(config: &MockConfig, path: &Path) -> Result<()> {
    let patterns = config.schema.patterns();
    if patterns.is_empty() {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            message: "schema configuration is empty".to_owned(),
        });
    }
    for pattern in patterns {
        if pattern.trim().is_empty() {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: "empty schema pattern".to_owned(),
            });
        }
    }

    if !config.endpoint.starts_with('/') {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            message: format!("endpoint must start with '/': {}", config.endpoint),
        });
    }

    for (operation_name, response_path) in &config.operations {
        if operation_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: format!(
                    "operation mock with empty name (response file: {})",
                    response_path.display()
                ),
            });
        }
    }

    for (type_name, policy) in &config.type_policies {
        if policy.key_field.trim().is_empty() {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: format!("type policy for '{type_name}' has an empty keyField"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_named(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_yaml_config() {
        let file = write_named(
            ".yaml",
            r"
schema: schema/*.graphql
endpoint: /.api/graphql
seed: 42
typePolicies:
  GitBlob:
    keyField: canonicalURL
",
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.endpoint, "/.api/graphql");
        assert_eq!(config.seed, Some(42));
        assert_eq!(
            config.type_policies["GitBlob"].key_field,
            "canonicalURL"
        );
    }

    #[test]
    fn test_load_json_config() {
        let file = write_named(
            ".json",
            r#"{
  "schema": ["a.graphql", "b.graphql"],
  "types": {"User": {"avatarURL": null}}
}"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.schema.patterns().len(), 2);
        assert_eq!(config.endpoint, "/graphql", "endpoint defaults");
        assert!(config.types.contains_key("User"));
    }

    #[test]
    fn test_load_toml_config() {
        let file = write_named(
            ".toml",
            r#"
schema = "schema.graphql"

[typePolicies.GitTree]
keyField = "canonicalURL"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.type_policies["GitTree"].key_field,
            "canonicalURL"
        );
    }

    #[test]
    fn test_unsupported_format() {
        let file = write_named(".ini", "schema=x");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let file = write_named(".yaml", "schema: s.graphql\nendpoint: no-slash\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_empty_schema_pattern_rejected() {
        let file = write_named(".yaml", "schema: '  '\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(".graphqlmockrc.yaml"),
            "schema: s.graphql\n",
        )
        .unwrap();

        let found = find_config(&nested).unwrap();
        assert!(found.ends_with(".graphqlmockrc.yaml"));
    }
}
