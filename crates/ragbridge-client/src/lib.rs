//! HTTP access to a RAGFlow-style retrieval service.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod secret;

pub use client::{
    DOCUMENT_INFOS_PATH, HEALTH_PATH, RETRIEVAL_PATH, RemoteClient, RemoteResponse,
    RetrievalRequest,
};
pub use config::ClientConfig;
pub use credentials::{CredentialError, check_credentials};
pub use error::ClientError;
pub use secret::Secret;
