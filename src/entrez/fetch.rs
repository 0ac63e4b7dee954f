//! Batch fetcher: strided retrieval of GenBank flat-text records
//!
//! Pages through a server-side result set referenced by a search handle,
//! one efetch request per stride, splitting each response body on the
//! GenBank record separator. Every page is followed by a pause on the rate
//! gate so the process stays under the NCBI request-rate ceiling.

use crate::entrez::{EntrezClient, SearchHandle};
use crate::Result;
use std::time::Duration;

/// Minimum pause between E-utilities requests (NCBI rate ceiling)
pub const NCBI_REQUEST_INTERVAL: Duration = Duration::from_millis(340);

/// Default number of records per efetch page
pub const DEFAULT_BATCH_SIZE: u64 = 10;

/// GenBank record separator as it appears in an efetch text body
const RECORD_SEPARATOR: &str = "//\n";

/// Fixed-interval pause applied after every page retrieval
///
/// This is a hard floor, not adaptive backoff; it applies even after the
/// final page. Tests inject a zero-interval gate to run without wall-clock
/// delay.
#[derive(Debug, Clone)]
pub struct RateGate {
    interval: Duration,
}

impl RateGate {
    /// Creates a gate with the given fixed interval
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Production gate tuned to the NCBI request-rate ceiling
    pub fn ncbi() -> Self {
        Self::new(NCBI_REQUEST_INTERVAL)
    }

    /// Gate that never pauses, for tests
    pub fn unthrottled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Waits out the configured interval
    pub async fn pause(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}

/// Page start offsets covering `[0, limit)` in strides of `batch_size`
///
/// count=25, batch_size=10 yields offsets 0, 10, 20. A zero batch size
/// yields no offsets.
pub fn batch_offsets(limit: u64, batch_size: u64) -> Vec<u64> {
    if batch_size == 0 {
        return Vec::new();
    }
    (0..limit).step_by(batch_size as usize).collect()
}

/// Splits an efetch response body into per-record blocks
///
/// A separator at end-of-batch produces one empty trailing segment, which is
/// discarded; every other segment is kept as-is.
pub fn split_record_blocks(body: &str) -> Vec<String> {
    let mut blocks: Vec<String> = body.split(RECORD_SEPARATOR).map(str::to_string).collect();
    if blocks.last().map_or(false, |b| b.is_empty()) {
        blocks.pop();
    }
    blocks
}

/// Fetches the first `limit` records of a result set in batches
///
/// The caller is expected to pre-clamp `limit` (the pipeline clamps it to
/// its max-records option); an oversized limit simply issues more pages.
/// A failed page request propagates as a fatal error with no partial-result
/// recovery.
///
/// # Arguments
///
/// * `client` - The credentialed E-utilities client
/// * `handle` - Session token, query key and total count from the search
/// * `limit` - Number of records to retrieve
/// * `batch_size` - Records per page request
/// * `gate` - Rate gate paused after every page, including the last
///
/// # Returns
///
/// All record blocks in fetch order
pub async fn fetch_records(
    client: &EntrezClient,
    handle: &SearchHandle,
    limit: u64,
    batch_size: u64,
    gate: &RateGate,
) -> Result<Vec<String>> {
    let mut records = Vec::new();

    for start in batch_offsets(limit, batch_size) {
        let params = [
            ("db", "nucleotide".to_string()),
            ("rettype", "gb".to_string()),
            ("retmode", "text".to_string()),
            ("retstart", start.to_string()),
            ("retmax", batch_size.to_string()),
            ("WebEnv", handle.web_env.clone()),
            ("query_key", handle.query_key.clone()),
        ];
        let body = client.get_text("efetch.fcgi", &params).await?;

        let blocks = split_record_blocks(&body);
        tracing::debug!(
            "fetched page at offset {}: {} record blocks",
            start,
            blocks.len()
        );
        records.extend(blocks);

        gate.pause().await;
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_partial_final_page() {
        assert_eq!(batch_offsets(25, 10), vec![0, 10, 20]);
    }

    #[test]
    fn test_offsets_exact_multiple() {
        assert_eq!(batch_offsets(20, 10), vec![0, 10]);
    }

    #[test]
    fn test_offsets_single_short_page() {
        assert_eq!(batch_offsets(3, 10), vec![0]);
    }

    #[test]
    fn test_offsets_zero_limit() {
        assert!(batch_offsets(0, 10).is_empty());
    }

    #[test]
    fn test_offsets_zero_batch_size() {
        assert!(batch_offsets(25, 0).is_empty());
    }

    #[test]
    fn test_split_drops_trailing_empty_segment() {
        assert_eq!(split_record_blocks("recA//\nrecB//\n"), vec!["recA", "recB"]);
    }

    #[test]
    fn test_split_keeps_unterminated_final_block() {
        assert_eq!(split_record_blocks("recA//\nrecB"), vec!["recA", "recB"]);
    }

    #[test]
    fn test_split_empty_body() {
        assert!(split_record_blocks("").is_empty());
    }

    #[test]
    fn test_split_preserves_block_interiors() {
        let body = "LOCUS       X\nACCESSION   X\n//\n";
        let blocks = split_record_blocks(body);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("ACCESSION   X"));
    }

    #[tokio::test]
    async fn test_unthrottled_gate_returns_immediately() {
        let gate = RateGate::unthrottled();
        let start = std::time::Instant::now();
        gate.pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
