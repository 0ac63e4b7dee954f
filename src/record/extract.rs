//! Field extractor for GenBank flat-text blocks
//!
//! Extraction is a pure function of its input: one pass over the lines of
//! each block, scanning for the ACCESSION, LOCUS and DEFINITION label
//! prefixes. No assumption is made about field order; when a label appears
//! more than once in a block, the last occurrence wins.

use serde::{Deserialize, Serialize};

/// DEFINITION lines carry a fixed-width 12-column label prefix
const DEFINITION_LABEL_WIDTH: usize = 12;

/// One extracted record row
///
/// The accession is the natural key; a block that yields no accession
/// produces no row. Length and description stay `None` when their lines are
/// missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRow {
    #[serde(rename = "Accession")]
    pub accession: String,

    #[serde(rename = "Length")]
    pub length: Option<u64>,

    #[serde(rename = "Description")]
    pub description: Option<String>,
}

/// Extracts one row per block that carries an accession
///
/// Blocks without an ACCESSION line are dropped silently; missing or
/// unparseable LOCUS/DEFINITION data yields `None` fields rather than an
/// error.
pub fn extract_rows(blocks: &[String]) -> Vec<SequenceRow> {
    blocks.iter().filter_map(|block| extract_row(block)).collect()
}

fn extract_row(block: &str) -> Option<SequenceRow> {
    let mut accession: Option<String> = None;
    let mut length: Option<u64> = None;
    let mut description: Option<String> = None;

    for line in block.lines() {
        if line.starts_with("ACCESSION") {
            accession = line.split_whitespace().nth(1).map(str::to_string);
        } else if line.starts_with("DEFINITION") {
            description = line
                .get(DEFINITION_LABEL_WIDTH..)
                .map(|rest| rest.trim().to_string());
        } else if line.starts_with("LOCUS") {
            // Third whitespace token is the sequence length in bp; garbage
            // there stays None instead of failing the block
            length = line
                .split_whitespace()
                .nth(2)
                .and_then(|token| token.parse::<u64>().ok());
        }
    }

    accession.map(|accession| SequenceRow {
        accession,
        length,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|b| b.to_string()).collect()
    }

    #[test]
    fn test_full_record() {
        let input = blocks(&[
            "LOCUS       AB123456  1500 bp ...\nDEFINITION  Test organism gene\nACCESSION   AB123456\n",
        ]);
        let rows = extract_rows(&input);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].accession, "AB123456");
        assert_eq!(rows[0].length, Some(1500));
        assert_eq!(rows[0].description.as_deref(), Some("Test organism gene"));
    }

    #[test]
    fn test_block_without_accession_yields_no_row() {
        let input = blocks(&["LOCUS       AB123456  1500 bp\nDEFINITION  No accession here\n"]);
        assert!(extract_rows(&input).is_empty());
    }

    #[test]
    fn test_accession_without_other_fields() {
        let input = blocks(&["ACCESSION   XY999999\n"]);
        let rows = extract_rows(&input);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].accession, "XY999999");
        assert_eq!(rows[0].length, None);
        assert_eq!(rows[0].description, None);
    }

    #[test]
    fn test_field_order_does_not_matter() {
        let input = blocks(&[
            "ACCESSION   AB123456\nLOCUS       AB123456  1500 bp\nDEFINITION  Out of order\n",
        ]);
        let rows = extract_rows(&input);
        assert_eq!(rows[0].accession, "AB123456");
        assert_eq!(rows[0].length, Some(1500));
        assert_eq!(rows[0].description.as_deref(), Some("Out of order"));
    }

    #[test]
    fn test_repeated_marker_last_occurrence_wins() {
        let input = blocks(&[
            "ACCESSION   FIRST\nDEFINITION  first definition\nACCESSION   SECOND\nDEFINITION  second definition\n",
        ]);
        let rows = extract_rows(&input);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].accession, "SECOND");
        assert_eq!(rows[0].description.as_deref(), Some("second definition"));
    }

    #[test]
    fn test_garbage_length_stays_none() {
        let input = blocks(&["LOCUS       AB123456  verylong bp\nACCESSION   AB123456\n"]);
        let rows = extract_rows(&input);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].length, None);
    }

    #[test]
    fn test_accession_line_without_value_drops_row() {
        let input = blocks(&["ACCESSION\nLOCUS       X  100 bp\n"]);
        assert!(extract_rows(&input).is_empty());
    }

    #[test]
    fn test_short_definition_line() {
        // A DEFINITION line shorter than its label prefix yields no text
        let input = blocks(&["DEFINITION\nACCESSION   AB123456\n"]);
        let rows = extract_rows(&input);
        assert_eq!(rows[0].description, None);
    }

    #[test]
    fn test_multiple_blocks_preserve_input_order() {
        let input = blocks(&[
            "ACCESSION   AAA111\n",
            "LOCUS       no accession\n",
            "ACCESSION   BBB222\n",
        ]);
        let rows = extract_rows(&input);
        let accessions: Vec<&str> = rows.iter().map(|r| r.accession.as_str()).collect();
        assert_eq!(accessions, vec!["AAA111", "BBB222"]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let input = blocks(&[
            "LOCUS       AB123456  1500 bp\nDEFINITION  Test organism gene\nACCESSION   AB123456\n",
            "ACCESSION   XY999999\n",
        ]);
        assert_eq!(extract_rows(&input), extract_rows(&input));
    }
}
