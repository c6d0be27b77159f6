use crate::host::MockHost;
use crate::ExitCode;
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_mock_resolver::ResolveError;
use serde_json::json;
use std::fs;
use std::path::Path;

/// Resolve one operation from a document file and print the wire
/// response to stdout.
pub fn run(
    host: &MockHost,
    document: &Path,
    operation: Option<&str>,
    variables: Option<&str>,
    pretty: bool,
) -> Result<ExitCode> {
    let source = fs::read_to_string(document)
        .with_context(|| format!("failed to read document {}", document.display()))?;

    let variables: serde_json::Value = match variables {
        Some(raw) => serde_json::from_str(raw).context("invalid --variables JSON")?,
        None => json!({}),
    };

    match host.server.query(&source, &variables, operation) {
        Ok(data) => {
            let response = json!({ "data": data });
            let rendered = if pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            println!("{rendered}");
            Ok(ExitCode::Success)
        }
        Err(error) => {
            eprintln!("{} {error}", "✗".red().bold());
            Ok(match error {
                ResolveError::QueryValidation(_) => ExitCode::ParseError,
                ResolveError::OperationNotFound { .. } | ResolveError::UnresolvedField { .. } => {
                    ExitCode::ResolutionError
                }
            })
        }
    }
}
