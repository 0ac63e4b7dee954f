//! Record source: nucleotide index search with history tracking
//!
//! One esearch call per invocation. The result set stays on the Entrez
//! history server; the returned handle (WebEnv + query key) lets the batch
//! fetcher page through it without re-issuing the query.

use crate::entrez::EntrezClient;
use crate::{Result, TaxaError};
use serde::Deserialize;

/// Search parameters for one retrieval cycle
#[derive(Debug, Clone)]
pub struct Query {
    /// Numeric taxonomic identifier
    pub taxon_id: String,

    /// Minimum sequence length filter
    pub min_len: Option<u64>,

    /// Maximum sequence length filter
    pub max_len: Option<u64>,
}

/// Handle to a server-side result set
///
/// Created once per invocation; read-only afterward; consumed entirely by
/// the batch fetcher.
#[derive(Debug, Clone)]
pub struct SearchHandle {
    /// Opaque session token for the history server
    pub web_env: String,

    /// Opaque key selecting the result set within the session
    pub query_key: String,

    /// Total number of matching records
    pub count: u64,
}

/// Builds the esearch term for a query
///
/// The length-range clause is appended only when a minimum length is set;
/// the upper bound stays open when no maximum is given. A maximum supplied
/// without a minimum never reaches the term (kept for compatibility with the
/// original tool's search semantics; [`search`] logs a warning when it
/// happens).
pub fn build_search_term(query: &Query) -> String {
    let mut term = format!("txid{}[Organism]", query.taxon_id);
    if let Some(min) = query.min_len {
        let max = query
            .max_len
            .map(|m| m.to_string())
            .unwrap_or_default();
        term.push_str(&format!(" AND {}:{}[SLEN]", min, max));
    }
    term
}

/// Searches the nucleotide index for records matching the query
///
/// Returns `Ok(None)` when the index reports zero matches. This is a normal
/// outcome, not an error; callers must treat it as a clean empty result.
///
/// # Arguments
///
/// * `client` - The credentialed E-utilities client
/// * `query` - Taxon ID and optional length filters
///
/// # Returns
///
/// * `Ok(Some(SearchHandle))` - At least one match; handle for paging
/// * `Ok(None)` - Zero matches
/// * `Err(TaxaError)` - Transport failure or malformed response
pub async fn search(client: &EntrezClient, query: &Query) -> Result<Option<SearchHandle>> {
    if query.max_len.is_some() && query.min_len.is_none() {
        tracing::warn!(
            "maximum length filter is ignored because no minimum length was given"
        );
    }

    let term = build_search_term(query);
    tracing::debug!("esearch term: {}", term);

    let params = [
        ("db", "nucleotide".to_string()),
        ("term", term),
        ("usehistory", "y".to_string()),
        ("retmode", "json".to_string()),
    ];
    let body = client.get_text("esearch.fcgi", &params).await?;

    parse_search_response(&body)
}

#[derive(Debug, Deserialize)]
struct EsearchEnvelope {
    esearchresult: EsearchResult,
}

#[derive(Debug, Deserialize)]
struct EsearchResult {
    count: String,
    #[serde(default)]
    webenv: Option<String>,
    #[serde(default)]
    querykey: Option<String>,
}

/// Decodes an esearch JSON body into a search handle
fn parse_search_response(body: &str) -> Result<Option<SearchHandle>> {
    let envelope: EsearchEnvelope = serde_json::from_str(body)?;
    let result = envelope.esearchresult;

    let count: u64 = result.count.parse().map_err(|_| {
        TaxaError::MalformedResponse(format!("non-numeric match count '{}'", result.count))
    })?;

    if count == 0 {
        return Ok(None);
    }

    let web_env = result.webenv.ok_or_else(|| {
        TaxaError::MalformedResponse("missing WebEnv for non-empty result set".to_string())
    })?;
    let query_key = result.querykey.ok_or_else(|| {
        TaxaError::MalformedResponse("missing QueryKey for non-empty result set".to_string())
    })?;

    Ok(Some(SearchHandle {
        web_env,
        query_key,
        count,
    }))
}
