//! Build the tool set from configuration.

use anyhow::Context;
use ragbridge_client::RemoteClient;
use ragbridge_tools::KnowledgeTools;

use crate::config::Config;

/// Create the shared client (when credentials are complete) and the tools on top of it.
///
/// Without credentials the tools are still built; each call then reports
/// missing credentials.
///
/// # Errors
///
/// Returns an error if the configured URL is unusable or the HTTP client cannot be built.
pub fn build_tools(config: &Config) -> anyhow::Result<KnowledgeTools> {
    let client = match (&config.credentials.app_url, &config.credentials.app_key) {
        (Some(url), Some(key)) if config.credentials.is_complete() => {
            let client = RemoteClient::new(url, key.clone(), &config.client)
                .context("failed to create retrieval client")?;
            tracing::debug!(url = client.base_url(), "retrieval client ready");
            Some(client)
        }
        _ => {
            tracing::info!("credentials not configured, tools will report missing credentials");
            None
        }
    };
    Ok(KnowledgeTools::new(client, &config.tools))
}
