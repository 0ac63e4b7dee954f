//! Taxafetch main entry point
//!
//! Command-line interface for the NCBI nucleotide retrieval tool. Values
//! missing from the command line and the optional credentials file are read
//! from interactive prompts; passing `--taxid` switches the tool to
//! non-interactive mode.

use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use taxafetch::config::load_config;
use taxafetch::entrez::{EntrezClient, Query, RateGate};
use taxafetch::pipeline::{run_pipeline, PipelineOptions, PipelineOutcome};
use taxafetch::Credentials;
use tracing_subscriber::EnvFilter;

/// Taxafetch: NCBI GenBank retrieval with filtering and reporting
///
/// Searches the NCBI nucleotide index by taxonomic ID, fetches matching
/// GenBank records in rate-limited batches, and writes a CSV report plus a
/// sequence-length distribution chart.
#[derive(Parser, Debug)]
#[command(name = "taxafetch")]
#[command(version)]
#[command(about = "NCBI GenBank data retriever", long_about = None)]
struct Cli {
    /// Path to a TOML credentials file ([credentials] email / api-key)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// NCBI registered email (overrides the credentials file)
    #[arg(long)]
    email: Option<String>,

    /// NCBI API key (overrides the credentials file)
    #[arg(long = "api-key")]
    api_key: Option<String>,

    /// Taxonomic ID to search for; when given, nothing is prompted
    #[arg(long)]
    taxid: Option<String>,

    /// Minimum sequence length filter
    #[arg(long = "min-len")]
    min_len: Option<u64>,

    /// Maximum sequence length filter
    #[arg(long = "max-len")]
    max_len: Option<u64>,

    /// Output base name (writes <output>.csv and <output>.png); defaults
    /// to "output" when neither the flag nor the prompt supplies one
    #[arg(short, long)]
    output: Option<String>,

    /// Records per fetch page
    #[arg(long = "batch-size", default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    batch_size: u64,

    /// Cap on the number of records fetched
    #[arg(long = "max-records", default_value_t = 100)]
    max_records: u64,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    println!("NCBI GenBank Data Retriever");
    println!("---------------------------");

    let interactive = cli.taxid.is_none();

    // Credentials: flags override the file; prompt for what is still missing
    let file_credentials = match &cli.config {
        Some(path) => {
            tracing::info!("Loading credentials from: {}", path.display());
            Some(
                load_config(path)
                    .with_context(|| format!("failed to load {}", path.display()))?
                    .credentials,
            )
        }
        None => None,
    };

    let email = match cli
        .email
        .or_else(|| file_credentials.as_ref().map(|c| c.email.clone()))
    {
        Some(email) => email,
        None => prompt("Enter your NCBI registered email")?,
    };
    let api_key = cli
        .api_key
        .or_else(|| file_credentials.as_ref().and_then(|c| c.api_key.clone()))
        .or_else(|| {
            if interactive {
                prompt_optional("Enter your NCBI API key (optional, press Enter to skip)")
            } else {
                None
            }
        });

    let taxon_id = match cli.taxid {
        Some(taxid) => taxid,
        None => prompt("Enter Taxonomic ID")?,
    };

    // Length inputs are parsed where first used numerically; a garbage
    // interactive value fails here rather than being quietly dropped
    let min_len = match cli.min_len {
        Some(v) => Some(v),
        None if interactive => {
            parse_optional_length(prompt_optional(
                "Enter minimum sequence length (optional, press Enter to skip)",
            ))?
        }
        None => None,
    };
    let max_len = match cli.max_len {
        Some(v) => Some(v),
        None if interactive => {
            parse_optional_length(prompt_optional(
                "Enter maximum sequence length (optional, press Enter to skip)",
            ))?
        }
        None => None,
    };

    let output_base = match cli.output {
        Some(output) => output,
        None if interactive => {
            prompt_optional("Enter output base name (default: 'output')")
                .unwrap_or_else(|| "output".to_string())
        }
        None => "output".to_string(),
    };

    let query = Query {
        taxon_id,
        min_len,
        max_len,
    };
    let options = PipelineOptions {
        output_base,
        batch_size: cli.batch_size,
        max_records: cli.max_records,
    };

    let client = EntrezClient::new(Credentials::new(email, api_key))?;
    let gate = RateGate::ncbi();

    println!("Searching for taxID: {}...", query.taxon_id);
    match run_pipeline(&client, &query, &options, &gate).await? {
        PipelineOutcome::Empty => {
            eprintln!("No records found");
            std::process::exit(1);
        }
        PipelineOutcome::Completed {
            total_matches,
            rows_written,
            csv_path,
            chart_path,
        } => {
            println!("Found {} records", total_matches);
            println!("Extracted {} rows", rows_written);
            println!("Saved report to {}", csv_path.display());
            println!("Saved plot to {}", chart_path.display());
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("taxafetch=warn"),
            1 => EnvFilter::new("taxafetch=info,warn"),
            2 => EnvFilter::new("taxafetch=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Reads a required value from stdin
fn prompt(label: &str) -> anyhow::Result<String> {
    let mut stdin = io::stdin().lock();
    prompt_from(&mut stdin, label)
}

/// Reads a required value from the given input, re-asking on blank lines
///
/// A zero-byte read means the input is closed; re-asking can never succeed
/// then, so it becomes a terminal error instead of a loop.
fn prompt_from<R: BufRead>(input: &mut R, label: &str) -> anyhow::Result<String> {
    loop {
        print!("{label}: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("stdin closed while waiting for: {label}");
        }
        let value = line.trim().to_string();
        if !value.is_empty() {
            return Ok(value);
        }
    }
}

/// Reads an optional value from stdin; empty or closed input means "skip"
fn prompt_optional(label: &str) -> Option<String> {
    let mut stdin = io::stdin().lock();
    prompt_optional_from(&mut stdin, label)
}

fn prompt_optional_from<R: BufRead>(input: &mut R, label: &str) -> Option<String> {
    print!("{label}: ");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    input.read_line(&mut line).ok()?;
    let value = line.trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Parses an optional interactive length input
fn parse_optional_length(input: Option<String>) -> anyhow::Result<Option<u64>> {
    match input {
        None => Ok(None),
        Some(raw) => {
            let value = raw
                .parse::<u64>()
                .with_context(|| format!("'{raw}' is not a valid sequence length"))?;
            Ok(Some(value))
        }
    }
}
