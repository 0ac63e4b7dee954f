//! Pipeline orchestration: one search-fetch-parse-report cycle
//!
//! Strictly sequential: each stage consumes the prior stage's complete
//! output. A zero-match search halts the cycle before any fetch, extract or
//! report work and leaves no output files behind.

use crate::entrez::{fetch_records, search, EntrezClient, Query, RateGate, DEFAULT_BATCH_SIZE};
use crate::record::extract_rows;
use crate::report::{render_length_chart, write_csv};
use crate::Result;
use std::path::PathBuf;

/// Knobs for one pipeline invocation
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Base name for the output files (`<base>.csv`, `<base>.png`)
    pub output_base: String,

    /// Records per efetch page
    pub batch_size: u64,

    /// Cap on the number of records fetched, regardless of match count
    pub max_records: u64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            output_base: "output".to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            max_records: 100,
        }
    }
}

/// Result of one pipeline invocation
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The search matched nothing; no fetching happened, no files written
    Empty,

    /// The full cycle ran and both output files were written
    Completed {
        total_matches: u64,
        rows_written: usize,
        csv_path: PathBuf,
        chart_path: PathBuf,
    },
}

/// Runs one complete search-fetch-parse-report cycle
///
/// # Arguments
///
/// * `client` - The credentialed E-utilities client
/// * `query` - Taxon ID and optional length filters
/// * `options` - Output naming and paging knobs
/// * `gate` - Rate gate threaded through to the batch fetcher
///
/// # Returns
///
/// * `Ok(PipelineOutcome)` - Clean empty result or completed cycle
/// * `Err(TaxaError)` - Any transport or output failure, unrecovered
pub async fn run_pipeline(
    client: &EntrezClient,
    query: &Query,
    options: &PipelineOptions,
    gate: &RateGate,
) -> Result<PipelineOutcome> {
    tracing::info!("Searching for taxID: {}", query.taxon_id);
    let Some(handle) = search(client, query).await? else {
        tracing::info!("Search matched no records");
        return Ok(PipelineOutcome::Empty);
    };
    tracing::info!("Found {} records", handle.count);

    let limit = handle.count.min(options.max_records);
    if limit < handle.count {
        tracing::debug!("fetch limit clamped to {} of {}", limit, handle.count);
    }

    let blocks = fetch_records(client, &handle, limit, options.batch_size, gate).await?;
    tracing::info!("Fetched {} record blocks", blocks.len());

    let rows = extract_rows(&blocks);
    tracing::info!("Extracted {} rows", rows.len());

    let csv_path = PathBuf::from(format!("{}.csv", options.output_base));
    write_csv(&rows, &csv_path)?;
    tracing::info!("Saved report to {}", csv_path.display());

    let chart_path = PathBuf::from(format!("{}.png", options.output_base));
    render_length_chart(&rows, &chart_path)?;
    tracing::info!("Saved plot to {}", chart_path.display());

    Ok(PipelineOutcome::Completed {
        total_matches: handle.count,
        rows_written: rows.len(),
        csv_path,
        chart_path,
    })
}
