//! Configuration, credential validation and tool bootstrap.

pub mod bootstrap;
pub mod config;
pub mod provider;

pub use bootstrap::build_tools;
pub use config::{Config, CredentialsConfig};
pub use provider::{ProviderError, validate_credentials};
