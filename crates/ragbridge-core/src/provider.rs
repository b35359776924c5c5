//! Credential validation entry point for hosts.

use ragbridge_client::{ClientConfig, CredentialError, check_credentials};

use crate::config::CredentialsConfig;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Credential validation error: {0}")]
    Validation(#[from] CredentialError),
}

/// Check that the configured service is reachable with the configured key.
///
/// # Errors
///
/// Returns [`ProviderError::Validation`] wrapping the underlying cause.
pub async fn validate_credentials(
    credentials: &CredentialsConfig,
    client: &ClientConfig,
) -> Result<(), ProviderError> {
    let app_url = credentials.app_url.as_deref().unwrap_or_default();
    let app_key = credentials
        .app_key
        .as_ref()
        .map(ragbridge_client::Secret::expose)
        .unwrap_or_default();
    check_credentials(app_url, app_key, client).await?;
    tracing::info!(url = app_url, "credentials validated");
    Ok(())
}
