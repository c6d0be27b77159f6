use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Top-level mock server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockConfig {
    /// Glob pattern(s) locating the schema SDL files. Matched files are
    /// concatenated (sorted by path) into one schema document.
    pub schema: SchemaPatterns,

    /// URL path the serve command mounts the GraphQL endpoint on.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Seed for generated scalar defaults. Fixed when omitted so repeated
    /// runs stay snapshot-stable.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of elements generated for unseeded list fields.
    #[serde(default)]
    pub default_list_length: Option<usize>,

    /// Key-field policies: type name → policy.
    #[serde(default)]
    pub type_policies: HashMap<String, TypePolicyConfig>,

    /// Static type mocks: type name → partial object (or scalar value).
    #[serde(default)]
    pub types: HashMap<String, serde_json::Value>,

    /// Static operation mocks: operation name → path of a JSON file
    /// holding the full response data.
    #[serde(default)]
    pub operations: HashMap<String, PathBuf>,

    /// Paths of JSON files each holding an array of fixture objects.
    #[serde(default)]
    pub fixtures: Vec<PathBuf>,
}

/// One or many glob patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaPatterns {
    One(String),
    Many(Vec<String>),
}

impl SchemaPatterns {
    #[must_use]
    pub fn patterns(&self) -> Vec<&str> {
        match self {
            Self::One(pattern) => vec![pattern.as_str()],
            Self::Many(patterns) => patterns.iter().map(String::as_str).collect(),
        }
    }
}

/// Key-field policy as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypePolicyConfig {
    pub key_field: String,
}

fn default_endpoint() -> String {
    "/graphql".to_owned()
}

impl MockConfig {
    /// Expand the schema glob patterns relative to `base_dir` into a
    /// sorted, deduplicated list of files.
    pub fn resolve_schema_files(&self, base_dir: &Path) -> Result<Vec<PathBuf>> {
        let patterns = self.schema.patterns();
        let mut files = Vec::new();

        for pattern in &patterns {
            let absolute = base_dir.join(pattern);
            let pattern_str = absolute.to_string_lossy();
            let entries = glob::glob(&pattern_str).map_err(|e| ConfigError::Invalid {
                path: base_dir.to_path_buf(),
                message: format!("invalid schema glob pattern '{pattern}': {e}"),
            })?;
            for entry in entries {
                match entry {
                    Ok(path) if path.is_file() => files.push(path),
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(pattern, error = %e, "skipping unreadable glob entry");
                    }
                }
            }
        }

        files.sort();
        files.dedup();

        if files.is_empty() {
            return Err(ConfigError::NoSchemaFiles {
                patterns: patterns.iter().map(|&p| p.to_owned()).collect(),
            });
        }
        Ok(files)
    }
}
