use ragbridge_client::Secret;

use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("RAGBRIDGE_APP_URL") {
            self.credentials.app_url = Some(v);
        }
        if let Ok(v) = std::env::var("RAGBRIDGE_APP_KEY") {
            self.credentials.app_key = Some(Secret::new(v));
        }
        if let Ok(v) = std::env::var("RAGBRIDGE_TIMEOUT") {
            if let Ok(secs) = v.parse::<u64>()
                && secs > 0
            {
                self.client.timeout = secs;
            } else {
                tracing::warn!("ignoring invalid RAGBRIDGE_TIMEOUT value: {v}");
            }
        }
        if let Ok(v) = std::env::var("RAGBRIDGE_CONNECT_TIMEOUT") {
            if let Ok(secs) = v.parse::<u64>()
                && secs > 0
            {
                self.client.connect_timeout = secs;
            } else {
                tracing::warn!("ignoring invalid RAGBRIDGE_CONNECT_TIMEOUT value: {v}");
            }
        }
        if let Ok(v) = std::env::var("RAGBRIDGE_ACCEPT_INVALID_CERTS") {
            if let Ok(accept) = v.parse::<bool>() {
                self.client.accept_invalid_certs = accept;
            } else {
                tracing::warn!("ignoring invalid RAGBRIDGE_ACCEPT_INVALID_CERTS value: {v}");
            }
        }
    }
}
