//! GenBank flat-text record handling
//!
//! This module extracts the reported fields (accession, sequence length,
//! definition) from raw GenBank record blocks by line-prefix scanning.

mod extract;

pub use extract::{extract_rows, SequenceRow};
