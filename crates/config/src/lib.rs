//! Configuration file parser for the GraphQL mock server.
//!
//! Supports `.graphqlmockrc.{yml,yaml,json}` and
//! `graphql-mock.config.{yml,yaml,json,toml}`, discovered by walking up
//! the directory tree. The config declares where the schema SDL lives
//! (glob patterns), the endpoint path to serve, key-field policies, the
//! default-generation seed, and static mock data sources (type mocks,
//! operation response files, fixture files).

mod config;
mod error;
mod loader;

pub use config::{MockConfig, SchemaPatterns, TypePolicyConfig};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str};
