//! Command-line front end for the jskos library.
//!
//! Reads JSKOS from a file or stdin (a single object, an array, or NDJSON)
//! and validates, normalizes, classifies or compacts it. `kos` does the same
//! for a KOS wrapper document. Validation failures print the full JSON report
//! on stderr and exit with status 1.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use jskos::{
    Converter, EntityType, Error, Layout, LoadOptions, Process, SchemaRegistry, Validator,
};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "jskos", version)]
#[command(about = "Validate and normalize JSKOS documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Validate documents and report every violation")]
    Validate(LoadArgs),
    #[command(about = "Load documents and write them back in canonical form")]
    Normalize(LoadArgs),
    #[command(about = "Print the inferred entity type of each document")]
    Infer(InputArgs),
    #[command(about = "Print compact views with URIs shortened to CURIEs")]
    Compress(CompressArgs),
    #[command(about = "Load a KOS document; compact it when prefixes are given")]
    Kos(KosArgs),
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Input file, or `-` for stdin.
    #[arg(default_value = "-")]
    input: String,
}

#[derive(Debug, Args)]
struct LoadArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Reject fields outside the JSKOS vocabulary.
    #[arg(long)]
    strict: bool,
    /// Validate every document as this entity type instead of inferring it.
    #[arg(long = "type", value_name = "TYPE")]
    entity_type: Option<EntityType>,
}

impl LoadArgs {
    fn options(&self) -> LoadOptions {
        LoadOptions {
            strict: self.strict,
            entity_type_hint: self.entity_type,
        }
    }
}

#[derive(Debug, Args)]
struct CompressArgs {
    #[command(flatten)]
    load: LoadArgs,
    /// Prefix assignment `prefix=URI`; repeat for more prefixes.
    #[arg(long = "prefix", value_name = "PREFIX=URI", required = true)]
    prefixes: Vec<String>,
}

#[derive(Debug, Args)]
struct KosArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Reject fields outside the JSKOS vocabulary.
    #[arg(long)]
    strict: bool,
    /// Prefix assignment `prefix=URI`; print the compact view when given.
    #[arg(long = "prefix", value_name = "PREFIX=URI")]
    prefixes: Vec<String>,
}

/// A validation report was already written to stderr.
#[derive(Debug)]
struct ReportedFailure;

impl fmt::Display for ReportedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation failed")
    }
}

impl std::error::Error for ReportedFailure {}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        if err.downcast_ref::<ReportedFailure>().is_none() {
            eprintln!("{err:#}");
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Validate(args) => validate(&args),
        Commands::Normalize(args) => normalize(&args),
        Commands::Infer(args) => infer(&args),
        Commands::Compress(args) => compress(&args),
        Commands::Kos(args) => kos(&args),
    }
}

fn validate(args: &LoadArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    let entities = match jskos::load_many(&text, &args.options()) {
        Ok(entities) => entities,
        Err(err) => return fail_with_report(err),
    };
    for entity in entities {
        println!("ok {}", entity.entity_type());
    }
    Ok(())
}

fn normalize(args: &LoadArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    let (layout, entities) = match jskos::load_documents(&text, &args.options()) {
        Ok(loaded) => loaded,
        Err(err) => return fail_with_report(err),
    };
    let values = entities
        .iter()
        .map(jskos::dump_value)
        .collect::<jskos::Result<Vec<_>>>()
        .context("failed to serialize entities")?;
    emit(layout, values)
}

fn infer(args: &InputArgs) -> Result<()> {
    let text = read_input(args)?;
    let (_, documents) = jskos::read_documents(&text).context("failed to read input documents")?;
    let registry = SchemaRegistry::builtin().context("failed to load JSKOS schemas")?;
    let validator = Validator::new(registry);
    for (index, document) in documents.iter().enumerate() {
        let entity_type = validator
            .infer_type(document)
            .with_context(|| format!("document {index}"))?;
        println!("{entity_type}");
    }
    Ok(())
}

fn compress(args: &CompressArgs) -> Result<()> {
    let converter = Converter::from_assignments(args.prefixes.iter().map(String::as_str))
        .context("invalid --prefix")?;
    let text = read_input(&args.load.input)?;
    let (layout, entities) = match jskos::load_documents(&text, &args.load.options()) {
        Ok(loaded) => loaded,
        Err(err) => return fail_with_report(err),
    };
    let mut values = Vec::with_capacity(entities.len());
    for (index, entity) in entities.iter().enumerate() {
        let processed = entity
            .process(&converter)
            .with_context(|| format!("failed to compress document {index}"))?;
        values.push(serde_json::to_value(processed)?);
    }
    emit(layout, values)
}

fn kos(args: &KosArgs) -> Result<()> {
    let options = LoadOptions {
        strict: args.strict,
        entity_type_hint: None,
    };
    let loaded = if args.input.input == "-" {
        jskos::load_kos(&read_input(&args.input)?, &options)
    } else {
        jskos::read_kos(&args.input.input, &options)
    };
    let kos = match loaded {
        Ok(kos) => kos,
        Err(err) => return fail_with_report(err),
    };

    let value = if args.prefixes.is_empty() {
        jskos::dump_kos_value(&kos).context("failed to serialize KOS")?
    } else {
        let converter = Converter::from_assignments(args.prefixes.iter().map(String::as_str))
            .context("invalid --prefix")?;
        let processed = kos.process(&converter).context("failed to compress KOS")?;
        serde_json::to_value(processed)?
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn emit(layout: Layout, values: Vec<Value>) -> Result<()> {
    match layout {
        Layout::Single => {
            for value in &values {
                println!("{}", serde_json::to_string_pretty(value)?);
            }
        }
        Layout::Array => println!("{}", serde_json::to_string_pretty(&Value::Array(values))?),
        Layout::Lines => {
            for value in &values {
                println!("{}", serde_json::to_string(value)?);
            }
        }
    }
    Ok(())
}

fn fail_with_report<T>(err: Error) -> Result<T> {
    if let Some(report) = err.report() {
        eprintln!("{}", serde_json::to_string_pretty(report)?);
        return Err(ReportedFailure.into());
    }
    Err(err).context("failed to load JSKOS input")
}

fn read_input(args: &InputArgs) -> Result<String> {
    if args.input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    let path = PathBuf::from(&args.input);
    if !path.is_file() {
        bail!("input file not found: {}", path.display());
    }
    fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}
