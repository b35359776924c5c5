use ragbridge_client::{ClientConfig, Secret};
use ragbridge_tools::ToolsConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Service location and API key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsConfig {
    pub app_url: Option<String>,
    pub app_key: Option<Secret>,
}

impl CredentialsConfig {
    /// Both values present and non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.app_url.as_deref().is_some_and(|u| !u.is_empty())
            && self.app_key.as_ref().is_some_and(|k| !k.is_empty())
    }
}
