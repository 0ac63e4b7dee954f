use crate::config::types::{Config, Credentials};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_credentials(&config.credentials)?;
    Ok(())
}

/// Validates the NCBI credentials
///
/// NCBI rejects requests without a plausible contact address, so the check
/// happens here rather than at first use.
pub fn validate_credentials(credentials: &Credentials) -> Result<(), ConfigError> {
    let email = credentials.email.trim();

    if email.is_empty() {
        return Err(ConfigError::Validation(
            "credentials.email cannot be empty".to_string(),
        ));
    }

    // Minimal shape check: local part, one '@', non-empty domain with a dot
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "credentials.email does not look like an email address: '{}'",
            email
        )));
    }

    if let Some(key) = &credentials.api_key {
        if key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "credentials.api-key is present but empty".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(email: &str, api_key: Option<&str>) -> Credentials {
        Credentials::new(email, api_key.map(str::to_string))
    }

    #[test]
    fn test_valid_credentials() {
        assert!(validate_credentials(&credentials("a@b.org", None)).is_ok());
        assert!(validate_credentials(&credentials("a@b.org", Some("key"))).is_ok());
    }

    #[test]
    fn test_empty_email_rejected() {
        assert!(validate_credentials(&credentials("", None)).is_err());
        assert!(validate_credentials(&credentials("   ", None)).is_err());
    }

    #[test]
    fn test_malformed_email_rejected() {
        assert!(validate_credentials(&credentials("no-at-sign", None)).is_err());
        assert!(validate_credentials(&credentials("a@", None)).is_err());
        assert!(validate_credentials(&credentials("@b.org", None)).is_err());
        assert!(validate_credentials(&credentials("a@nodot", None)).is_err());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(validate_credentials(&credentials("a@b.org", Some(""))).is_err());
    }
}
