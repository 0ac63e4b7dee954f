//! Credentialed HTTP client for the NCBI E-utilities
//!
//! Identification (tool name, registered email, optional API key) is carried
//! explicitly by the client and attached to every outbound request, rather
//! than living in process-global state. The base URL is injectable so tests
//! can point the client at a mock server.

use crate::config::Credentials;
use crate::{Result, TaxaError};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Production base URL for the NCBI E-utilities
pub const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/";

/// Value sent as the `tool` identification parameter
const TOOL_NAME: &str = env!("CARGO_PKG_NAME");

/// Builds an HTTP client with proper configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    // Format: tool/version (email)
    let user_agent = format!("{}/{}", TOOL_NAME, env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .build()
}

/// HTTP client bound to an E-utilities endpoint and a set of credentials
#[derive(Debug, Clone)]
pub struct EntrezClient {
    http: Client,
    base_url: Url,
    credentials: Credentials,
}

impl EntrezClient {
    /// Creates a client against the production E-utilities endpoint
    pub fn new(credentials: Credentials) -> Result<Self> {
        let base_url = Url::parse(EUTILS_BASE_URL)?;
        Self::with_base_url(credentials, base_url)
    }

    /// Creates a client against an arbitrary endpoint
    ///
    /// Used by tests to point the client at a mock server. The base URL must
    /// end with a slash so endpoint names join onto it as path segments.
    pub fn with_base_url(credentials: Credentials, base_url: Url) -> Result<Self> {
        let http = build_http_client()?;
        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Returns the credentials this client identifies with
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Identification parameters attached to every E-utilities request
    fn identification_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("tool", TOOL_NAME.to_string()),
            ("email", self.credentials.email.clone()),
        ];
        if let Some(key) = &self.credentials.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }

    /// Issues a GET against the named E-utilities endpoint and returns the
    /// response body
    ///
    /// A non-success status or transport failure is fatal for the whole
    /// operation; there is no retry layer.
    pub(crate) async fn get_text(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<String> {
        let url = self.base_url.join(endpoint)?;

        let response = self
            .http
            .get(url.clone())
            .query(params)
            .query(&self.identification_params())
            .send()
            .await
            .map_err(|source| TaxaError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TaxaError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| TaxaError::Http {
            url: url.to_string(),
            source,
        })
    }
}
