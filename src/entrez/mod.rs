//! Entrez module for remote search and batched record retrieval
//!
//! This module contains the networking core, including:
//! - Building the credentialed E-utilities HTTP client
//! - Searching the nucleotide index with history tracking
//! - Fetching GenBank flat-text records in rate-limited batches

mod client;
mod fetch;
mod search;

pub use client::{build_http_client, EntrezClient, EUTILS_BASE_URL};
pub use fetch::{
    batch_offsets, fetch_records, split_record_blocks, RateGate, DEFAULT_BATCH_SIZE,
    NCBI_REQUEST_INTERVAL,
};
pub use search::{build_search_term, search, Query, SearchHandle};
