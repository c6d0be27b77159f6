mod commands;
mod exit_code;
mod host;

pub use exit_code::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use graphql_mock_config::ConfigError;
use graphql_mock_schema::SchemaError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "graphql-mock")]
#[command(about = "Schema-driven GraphQL mock server", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the mock server config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the mock GraphQL endpoint over HTTP
    Serve {
        /// Port to bind (0 picks a free port)
        #[arg(short, long, default_value_t = 4000)]
        port: u16,
    },

    /// Resolve one operation from a document file and print the response
    Execute {
        /// Path to the GraphQL document
        document: PathBuf,

        /// Operation name (required when the document holds several)
        #[arg(short, long)]
        operation: Option<String>,

        /// Variables as inline JSON
        #[arg(long)]
        variables: Option<String>,

        /// Pretty-print the response
        #[arg(long)]
        pretty: bool,
    },

    /// Validate documents against the schema and report mock coverage
    Check {
        /// GraphQL document files to check
        documents: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{} {error:#}", "✗".red().bold());
            classify_error(&error)
        }
    };
    code.exit()
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Serve { port } => {
            let host = host::load(cli.config, cli.quiet)?;
            commands::serve::run(host, port, cli.quiet).await?;
            Ok(ExitCode::Success)
        }
        Commands::Execute {
            document,
            operation,
            variables,
            pretty,
        } => {
            let host = host::load(cli.config, cli.quiet)?;
            commands::execute::run(
                &host,
                &document,
                operation.as_deref(),
                variables.as_deref(),
                pretty,
            )
        }
        Commands::Check { documents, format } => {
            let host = host::load(cli.config, cli.quiet)?;
            commands::check::run(&host, &documents, format, cli.quiet)
        }
    }
}

/// Map a load-time error chain to the matching exit code.
fn classify_error(error: &anyhow::Error) -> ExitCode {
    for cause in error.chain() {
        if cause.downcast_ref::<ConfigError>().is_some() {
            return ExitCode::ConfigError;
        }
        if cause.downcast_ref::<SchemaError>().is_some() {
            return ExitCode::SchemaError;
        }
        if cause.downcast_ref::<std::io::Error>().is_some() {
            return ExitCode::IoError;
        }
    }
    ExitCode::ResolutionError
}
