//! Shared HTTP client construction for consistent timeout and TLS configuration.

use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::Result;

/// Build the pooled HTTP client used for every call to the retrieval service.
///
/// Config: finite connect and request timeouts, `ragbridge/{version}`
/// user-agent, redirect limit 10, certificate verification unless
/// `accept_invalid_certs` is set.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client> {
    if config.accept_invalid_certs {
        tracing::warn!("TLS certificate verification disabled for retrieval service");
    }
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(concat!("ragbridge/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(10))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()?;
    Ok(client)
}
