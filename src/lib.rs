//! Taxafetch: NCBI nucleotide retrieval and reporting
//!
//! This crate implements a batch retrieval tool that searches the NCBI
//! nucleotide index by taxonomic ID, fetches the matching GenBank records in
//! rate-limited batches via the Entrez history server, extracts accession,
//! length and definition fields from the flat-text records, and writes a CSV
//! report plus a length-distribution chart.

pub mod config;
pub mod entrez;
pub mod pipeline;
pub mod record;
pub mod report;

use thiserror::Error;

/// Main error type for taxafetch operations
#[derive(Debug, Error)]
pub enum TaxaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Remote service returned status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for taxafetch operations
pub type Result<T> = std::result::Result<T, TaxaError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, Credentials};
pub use entrez::{EntrezClient, Query, RateGate, SearchHandle};
pub use pipeline::{run_pipeline, PipelineOptions, PipelineOutcome};
pub use record::SequenceRow;
