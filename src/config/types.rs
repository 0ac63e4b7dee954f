use serde::Deserialize;

/// Main configuration structure for taxafetch
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub credentials: Credentials,
}

/// NCBI identification credentials
///
/// Every E-utilities request carries the registered email (required by NCBI
/// usage policy) and, when present, an API key that raises the permitted
/// request rate.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// Email address registered with NCBI
    pub email: String,

    /// Optional NCBI API key
    #[serde(rename = "api-key", default)]
    pub api_key: Option<String>,
}

impl Credentials {
    /// Creates credentials from an email and an optional API key
    pub fn new(email: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            email: email.into(),
            api_key,
        }
    }
}
