//! Connectivity check for a configured `(app_url, app_key)` pair.

use crate::client::RemoteClient;
use crate::config::ClientConfig;
use crate::secret::Secret;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("App URL and App Key are required")]
    Missing,

    #[error("App URL must start with http:// or https://")]
    InvalidScheme,

    #[error("API connection failed with status code: {0}")]
    Status(u16),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Validate credential shape, then call `GET /api/v1/health` once.
///
/// Succeeds only on `200 OK`. No retry.
///
/// # Errors
///
/// See [`CredentialError`] for each failure mode.
pub async fn check_credentials(
    app_url: &str,
    app_key: &str,
    config: &ClientConfig,
) -> Result<(), CredentialError> {
    if app_url.is_empty() || app_key.is_empty() {
        return Err(CredentialError::Missing);
    }
    if !(app_url.starts_with("http://") || app_url.starts_with("https://")) {
        return Err(CredentialError::InvalidScheme);
    }

    let client = RemoteClient::new(app_url, Secret::new(app_key), config)
        .map_err(|e| CredentialError::Connection(e.to_string()))?;
    let resp = client
        .health()
        .await
        .map_err(|e| CredentialError::Connection(e.to_string()))?;

    if resp.status != 200 {
        tracing::warn!(status = resp.status, "health check rejected credentials");
        return Err(CredentialError::Status(resp.status));
    }
    tracing::debug!(url = app_url, "health check passed");
    Ok(())
}
