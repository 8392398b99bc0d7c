//! # laml-cli
//!
//! Binary entry point for working with LAML protocols outside a pipeline.
//!
//! This crate provides:
//! - `laml render` to print the instruction block a protocol embeds in prompts
//! - `laml parse` to check a saved model response against a protocol
//! - `laml print` to show a JSON document in LAML notation
//! - `laml check` to validate a YAML schema document

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use laml_core::{Protocol, SchemaDocument, Value, protocols};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Output format for the parse command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Indented LAML notation
    Laml,
}

/// LAML - structured text protocols for LLM responses
#[derive(Parser, Debug)]
#[command(name = "laml", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the rendered instruction block of a protocol
    Render(RenderArgs),

    /// Parse a model response against a protocol
    Parse(ParseArgs),

    /// Print a JSON document in LAML notation
    Print(PrintArgs),

    /// Validate a schema document and list warnings
    Check(CheckArgs),
}

/// Where a protocol comes from: a YAML schema document or a stock protocol.
#[derive(Args, Debug)]
struct SchemaSource {
    /// Path to a YAML schema document
    #[arg(required_unless_present = "builtin")]
    schema: Option<PathBuf>,

    /// Use a stock protocol instead (triage, problem_decomposition, agent_config, task_config)
    #[arg(long, conflicts_with = "schema")]
    builtin: Option<String>,
}

/// Arguments for the render subcommand.
#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SchemaSource,
}

/// Arguments for the parse subcommand.
#[derive(Parser, Debug)]
struct ParseArgs {
    #[command(flatten)]
    source: SchemaSource,

    /// File holding the model response (default: stdin)
    #[arg(short, long)]
    response: Option<PathBuf>,

    /// Reject text before the first field marker
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

/// Arguments for the print subcommand.
#[derive(Parser, Debug)]
struct PrintArgs {
    /// JSON document to print (default: stdin)
    file: Option<PathBuf>,
}

/// Arguments for the check subcommand.
#[derive(Parser, Debug)]
struct CheckArgs {
    #[command(flatten)]
    source: SchemaSource,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Render(args) => render_command(&args),
        Commands::Parse(args) => parse_command(&args),
        Commands::Print(args) => print_command(&args),
        Commands::Check(args) => check_command(&args),
    }
}

fn render_command(args: &RenderArgs) -> Result<()> {
    let protocol = load_protocol(&args.source)?;
    println!("{}", protocol.render());
    Ok(())
}

fn parse_command(args: &ParseArgs) -> Result<()> {
    let protocol = load_protocol(&args.source)?;
    let raw = read_input(args.response.as_deref())?;

    let result = if args.strict {
        protocol.parse_strict(&raw)
    } else {
        protocol.parse(&raw)
    };

    let value = match result {
        Ok(value) => value,
        Err(err) => {
            // The retry feedback is what a pipeline would send back to the model
            eprintln!("{}", err.feedback());
            return Err(err).context("Response does not match the protocol");
        }
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        OutputFormat::Laml => println!("{}", laml_core::print(&value)),
    }
    Ok(())
}

fn print_command(args: &PrintArgs) -> Result<()> {
    let json = read_input(args.file.as_deref())?;
    let value: Value = serde_json::from_str(&json).context("Input is not a printable JSON document")?;
    println!("{}", laml_core::print(&value));
    Ok(())
}

fn check_command(args: &CheckArgs) -> Result<()> {
    let (label, protocol) = match &args.source.builtin {
        Some(name) => (name.clone(), builtin(name)?.clone()),
        None => {
            let path = schema_path(&args.source)?;
            let document = load_document(path)?;
            let label = document
                .name
                .clone()
                .unwrap_or_else(|| path.display().to_string());

            let warnings = document.validate()?;
            for warning in &warnings {
                println!("{warning}");
            }
            (label, document.into_protocol()?)
        }
    };

    let fields = protocol.fields().iter().filter(|spec| spec.as_field().is_some()).count();
    println!("OK: {label} ({fields} top-level fields)");
    Ok(())
}

fn load_protocol(source: &SchemaSource) -> Result<Protocol> {
    if let Some(name) = &source.builtin {
        return Ok(builtin(name)?.clone());
    }
    let path = schema_path(source)?;
    let protocol = load_document(path)?
        .into_protocol()
        .with_context(|| format!("Invalid schema in {}", path.display()))?;
    Ok(protocol)
}

fn builtin(name: &str) -> Result<&'static Protocol> {
    match protocols::by_name(name) {
        Some(protocol) => Ok(protocol),
        None => bail!(
            "Unknown builtin protocol '{name}' (expected one of: {})",
            protocols::NAMES.join(", ")
        ),
    }
}

fn schema_path(source: &SchemaSource) -> Result<&Path> {
    source
        .schema
        .as_deref()
        .context("A schema path or --builtin is required")
}

fn load_document(path: &Path) -> Result<SchemaDocument> {
    debug!(path = %path.display(), "Loading schema document");
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema {}", path.display()))?;
    SchemaDocument::from_yaml_str(&yaml)
        .with_context(|| format!("Failed to parse schema {}", path.display()))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}
