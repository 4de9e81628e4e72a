use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use jsondoc_core::{parse, Diagnostic, JsonDocument, ParseOptions, Severity};
use serde_json::Value;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "jsondoc")]
#[command(about = "Check JSON/JSONC documents and validate them against JSON Schemas")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document, optionally validate it, and print diagnostics
    Check {
        /// Input JSON/JSONC file
        input: PathBuf,

        /// JSON Schema to validate against
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Reject comments (plain JSON instead of JSONC)
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Print the plain JSON value of a JSON/JSONC document
    Value {
        /// Input JSON/JSONC file
        input: PathBuf,
    },

    /// List the schemas that apply at a byte offset
    SchemasAt {
        /// Input JSON/JSONC file
        input: PathBuf,

        /// JSON Schema to match against
        #[arg(short, long)]
        schema: PathBuf,

        /// Byte offset into the document
        #[arg(short, long)]
        offset: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Pretty,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            input,
            schema,
            strict,
            format,
        } => check(&input, schema.as_deref(), strict, format),
        Commands::Value { input } => value(&input),
        Commands::SchemasAt {
            input,
            schema,
            offset,
        } => schemas_at(&input, &schema, offset),
    }
}

fn load_document(path: &Path, options: &ParseOptions) -> Result<(String, JsonDocument)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let document = parse(&text, options);
    Ok((text, document))
}

fn load_schema(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("schema {} is not valid JSON", path.display()))
}

fn check(
    input: &Path,
    schema: Option<&Path>,
    strict: bool,
    format: OutputFormat,
) -> Result<ExitCode> {
    let options = ParseOptions {
        allow_comments: !strict,
        ..ParseOptions::default()
    };
    let (text, document) = load_document(input, &options)?;

    let mut diagnostics = document.syntax_errors.clone();
    if let Some(schema_path) = schema {
        let schema = load_schema(schema_path)?;
        diagnostics.extend(document.validate(&schema));
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        }
        OutputFormat::Pretty => {
            for diagnostic in &diagnostics {
                print_diagnostic(input, &text, diagnostic);
            }
            if diagnostics.is_empty() {
                println!("{}: no problems found", input.display());
            }
        }
    }

    let has_problems = !diagnostics.is_empty();
    Ok(if has_problems {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn value(input: &Path) -> Result<ExitCode> {
    let (_, document) = load_document(input, &ParseOptions::default())?;
    match document.value() {
        Some(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("{}: empty document", input.display());
            Ok(ExitCode::from(1))
        }
    }
}

fn schemas_at(input: &Path, schema_path: &Path, offset: usize) -> Result<ExitCode> {
    let (_, document) = load_document(input, &ParseOptions::default())?;
    let schema = load_schema(schema_path)?;
    let applicable: Vec<Value> = document
        .matching_schemas(&schema, Some(offset), None)
        .into_iter()
        .map(|applicable| {
            let range = document.ast()[applicable.node].range;
            serde_json::json!({
                "range": { "start": range.start, "end": range.end },
                "inverted": applicable.inverted,
                "schema": applicable.schema,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&applicable)?);
    Ok(ExitCode::SUCCESS)
}

fn print_diagnostic(path: &Path, text: &str, diagnostic: &Diagnostic) {
    let (line, column) = line_column(text, diagnostic.range.start);
    let severity = match diagnostic.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Ignore => "ignore",
    };
    println!(
        "{}:{line}:{column}: {severity}: {}",
        path.display(),
        diagnostic.message
    );
}

/// One-based line and column of a byte offset.
fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let clamped = offset.min(text.len());
    let before = &text[..clamped];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit_once('\n')
        .map_or(clamped, |(_, tail)| tail.len())
        + 1;
    (line, column)
}
