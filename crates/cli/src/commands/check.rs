use crate::host::MockHost;
use crate::{ExitCode, OutputFormat};
use anyhow::{Context, Result};
use apollo_compiler::executable::{ExecutableDocument, Operation, Selection, SelectionSet};
use colored::Colorize;
use graphql_mock_resolver::DefaultValueGenerator;
use graphql_mock_schema::{SchemaIndex, TypeDefKind};
use graphql_mock_session::MockServer;
use serde_json::json;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

/// Coverage report for one operation in a checked document.
struct OperationReport {
    name: Option<String>,
    has_operation_mock: bool,
    /// Composite types resolved via generic type resolution with no
    /// registered type mock (informational).
    fallback_types: BTreeSet<String>,
    /// Field coordinates that no mock, fixture, or built-in default can
    /// produce (these would fail at request time).
    unresolvable: BTreeSet<String>,
}

struct DocumentReport {
    path: PathBuf,
    syntax_errors: Vec<String>,
    validation_errors: Vec<String>,
    operations: Vec<OperationReport>,
}

/// Validate document files against the schema and report mock coverage.
pub fn run(
    host: &MockHost,
    documents: &[PathBuf],
    format: OutputFormat,
    quiet: bool,
) -> Result<ExitCode> {
    if documents.is_empty() {
        eprintln!("{} no document files given", "✗".red().bold());
        return Ok(ExitCode::ConfigError);
    }

    let mut reports = Vec::new();
    for path in documents {
        reports.push(check_document(&host.server, path.clone())?);
    }

    match format {
        OutputFormat::Human => print_human(&reports, quiet),
        OutputFormat::Json => print_json(&reports)?,
    }

    Ok(worst_exit_code(&reports))
}

fn check_document(server: &MockServer, path: PathBuf) -> Result<DocumentReport> {
    let source = fs::read_to_string(&path)
        .with_context(|| format!("failed to read document {}", path.display()))?;

    let mut report = DocumentReport {
        path,
        syntax_errors: Vec::new(),
        validation_errors: Vec::new(),
        operations: Vec::new(),
    };

    // Syntax-first pass for precise parse diagnostics.
    let tree = apollo_parser::Parser::new(&source).parse();
    report.syntax_errors = tree
        .errors()
        .map(|error| format!("{}: {}", error.index(), error.message()))
        .collect();
    if !report.syntax_errors.is_empty() {
        return Ok(report);
    }

    let schema = server.schema();
    let document = match ExecutableDocument::parse_and_validate(
        schema.schema(),
        &source,
        report.path.to_string_lossy().as_ref(),
    ) {
        Ok(document) => document,
        Err(errors) => {
            report.validation_errors.push(errors.errors.to_string());
            return Ok(report);
        }
    };

    for operation in document.operations.iter() {
        report
            .operations
            .push(operation_coverage(server, schema, &document, operation));
    }

    Ok(report)
}

fn operation_coverage(
    server: &MockServer,
    schema: &SchemaIndex,
    document: &ExecutableDocument,
    operation: &Operation,
) -> OperationReport {
    let name = operation.name.as_ref().map(|n| n.as_str().to_owned());
    let mut report = OperationReport {
        has_operation_mock: name
            .as_deref()
            .is_some_and(|n| server.has_operation_mock(n)),
        name,
        fallback_types: BTreeSet::new(),
        unresolvable: BTreeSet::new(),
    };

    if report.has_operation_mock {
        // The operation mock short-circuits type resolution entirely.
        return report;
    }

    let generator = DefaultValueGenerator::new(0);
    let root = operation.selection_set.ty.as_str();
    walk_selections(
        schema,
        server,
        &generator,
        document,
        &operation.selection_set,
        root,
        &mut report,
    );
    report
}

fn walk_selections(
    schema: &SchemaIndex,
    server: &MockServer,
    generator: &DefaultValueGenerator,
    document: &ExecutableDocument,
    selection_set: &SelectionSet,
    parent_type: &str,
    report: &mut OperationReport,
) {
    for selection in &selection_set.selections {
        match selection {
            Selection::Field(field) => {
                if field.name.as_str() == "__typename" {
                    continue;
                }
                let Some(signature) = schema.field(parent_type, field.name.as_str()) else {
                    continue;
                };
                let type_name = signature.type_ref.name.as_ref();
                let Some(type_def) = schema.get(type_name) else {
                    continue; // built-in scalar
                };
                match type_def.kind {
                    kind if kind.is_composite() => {
                        if !server.has_type_mock(type_name) {
                            report.fallback_types.insert(type_name.to_owned());
                        }
                        walk_selections(
                            schema,
                            server,
                            generator,
                            document,
                            &field.selection_set,
                            type_name,
                            report,
                        );
                    }
                    TypeDefKind::Scalar => {
                        if !SchemaIndex::is_builtin_scalar(type_name)
                            && !server.has_type_mock(type_name)
                            && generator.scalar(type_name, "coverage").is_none()
                        {
                            report.unresolvable.insert(format!(
                                "{parent_type}.{} ({type_name})",
                                field.name
                            ));
                        }
                    }
                    _ => {}
                }
            }
            Selection::FragmentSpread(spread) => {
                if let Some(fragment) = spread.fragment_def(document) {
                    walk_selections(
                        schema,
                        server,
                        generator,
                        document,
                        &fragment.selection_set,
                        fragment.type_condition().as_str(),
                        report,
                    );
                }
            }
            Selection::InlineFragment(inline) => {
                let condition = inline
                    .type_condition
                    .as_ref()
                    .map_or(parent_type, apollo_compiler::Name::as_str);
                walk_selections(
                    schema,
                    server,
                    generator,
                    document,
                    &inline.selection_set,
                    condition,
                    report,
                );
            }
        }
    }
}

fn worst_exit_code(reports: &[DocumentReport]) -> ExitCode {
    if reports.iter().any(|r| !r.syntax_errors.is_empty()) {
        return ExitCode::ParseError;
    }
    if reports.iter().any(|r| {
        !r.validation_errors.is_empty()
            || r.operations.iter().any(|op| !op.unresolvable.is_empty())
    }) {
        return ExitCode::ResolutionError;
    }
    ExitCode::Success
}

fn print_human(reports: &[DocumentReport], quiet: bool) {
    for report in reports {
        let path = report.path.display();
        if !report.syntax_errors.is_empty() {
            eprintln!("{} {path}: syntax errors", "✗".red().bold());
            for error in &report.syntax_errors {
                eprintln!("    {error}");
            }
            continue;
        }
        if !report.validation_errors.is_empty() {
            eprintln!("{} {path}: validation failed", "✗".red().bold());
            for error in &report.validation_errors {
                eprintln!("    {error}");
            }
            continue;
        }

        for op in &report.operations {
            let name = op.name.as_deref().unwrap_or("<anonymous>");
            if !op.unresolvable.is_empty() {
                eprintln!("{} {path}: {name}", "✗".red().bold());
                for coordinate in &op.unresolvable {
                    eprintln!("    {} {coordinate} needs a mock", "unresolvable:".red());
                }
            } else if quiet {
                // errors only
            } else if op.has_operation_mock {
                eprintln!("{} {path}: {name} (operation mock)", "✓".green());
            } else if op.fallback_types.is_empty() {
                eprintln!("{} {path}: {name}", "✓".green());
            } else {
                eprintln!(
                    "{} {path}: {name} ({} via generated defaults)",
                    "✓".green(),
                    op.fallback_types
                        .iter()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                        .dimmed()
                );
            }
        }
    }
}

fn print_json(reports: &[DocumentReport]) -> Result<()> {
    let value = json!({
        "documents": reports.iter().map(|report| {
            json!({
                "path": report.path.display().to_string(),
                "syntaxErrors": &report.syntax_errors,
                "validationErrors": &report.validation_errors,
                "operations": report.operations.iter().map(|op| {
                    json!({
                        "name": &op.name,
                        "hasOperationMock": op.has_operation_mock,
                        "fallbackTypes": &op.fallback_types,
                        "unresolvable": &op.unresolvable,
                    })
                }).collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
