use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use id_object_validator::path::{PathExpression, scalar_text};
use id_object_validator::{ValidationEngine, ValidatorConfig};

/// Validate an identity document against path-pattern rules
#[derive(Parser)]
#[command(name = "id-validate")]
#[command(version)]
#[command(about = "Validate an identity document against path-pattern rules", long_about = None)]
struct Cli {
    /// Rules file (.yaml, .yml, .json or .properties)
    #[arg(short, long, required_unless_present = "query")]
    rules: Option<PathBuf>,

    /// JSON document to validate (omit to read from stdin)
    document: Option<PathBuf>,

    /// Print the values a path query selects instead of validating
    #[arg(short, long)]
    query: Option<String>,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "id_object_validator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let document = match &cli.document {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read document from stdin")?;
            buf
        }
    };

    if let Some(query) = &cli.query {
        explain(query, &document)?;
        return Ok(ExitCode::SUCCESS);
    }

    let rules = cli.rules.as_ref().context("--rules is required")?;
    let config = ValidatorConfig::from_path(rules)?;
    let engine = ValidationEngine::from_config(&config)?;
    tracing::info!(rules = engine.rules().len(), "engine ready");

    let outcome = engine.validate_document(&document)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn explain(query: &str, document: &str) -> Result<()> {
    let path = PathExpression::parse(query)?;
    let value: serde_json::Value =
        serde_json::from_str(document).context("Document is not valid JSON")?;
    let matches = path.resolve(&value);
    if matches.is_empty() {
        println!("{}: no match", query);
    }
    for m in matches.iter() {
        let text = scalar_text(m.value).unwrap_or_else(|| m.value.to_string());
        println!("{}\t{}", m.location(), text);
    }
    Ok(())
}
