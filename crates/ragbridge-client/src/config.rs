use serde::{Deserialize, Serialize};

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

/// Transport settings for [`crate::RemoteClient`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Whole-request timeout in seconds. Must be non-zero.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Must be non-zero.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Skip TLS certificate verification.
    ///
    /// Insecure. Only meant for self-hosted services behind self-signed
    /// certificates; leave disabled otherwise.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            accept_invalid_certs: false,
        }
    }
}

impl ClientConfig {
    /// Replace zero timeouts with their defaults; a zero `Duration` fails every request.
    pub fn reset_zero_timeouts(&mut self) {
        if self.timeout == 0 {
            tracing::warn!("timeout = 0 is not allowed, using {}s", default_timeout());
            self.timeout = default_timeout();
        }
        if self.connect_timeout == 0 {
            tracing::warn!(
                "connect_timeout = 0 is not allowed, using {}s",
                default_connect_timeout()
            );
            self.connect_timeout = default_connect_timeout();
        }
    }
}
