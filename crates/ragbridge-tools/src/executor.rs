use std::collections::HashMap;

use ragbridge_client::{ClientError, RemoteClient};
use ragbridge_knowledge::KnowledgeError;
use serde::Serialize;
use serde_json::Value;

/// Structured tool invocation from the host.
#[derive(Debug, Clone)]
pub struct ToolCall {
    pub tool_id: String,
    pub params: HashMap<String, Value>,
}

impl ToolCall {
    #[must_use]
    pub fn new(tool_id: impl Into<String>, params: HashMap<String, Value>) -> Self {
        Self {
            tool_id: tool_id.into(),
            params,
        }
    }
}

/// Message handed back to the host: plain text or a JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolMessage {
    Text { text: String },
    Json { data: Value },
}

impl ToolMessage {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    #[must_use]
    pub fn json(data: Value) -> Self {
        Self::Json { data }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text.as_str()),
            Self::Json { .. } => None,
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json { data } => Some(data),
            Self::Text { .. } => None,
        }
    }
}

/// Errors that can occur during tool execution.
///
/// The first four variants are expected outcomes reported to the host as-is;
/// the rest are faults reported with a `Retrieval error: ` prefix.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Missing credentials: app_key or app_url")]
    MissingCredentials,

    #[error("{0}")]
    MissingInput(&'static str),

    #[error("No data returned from retrieval API")]
    NoData,

    #[error("Invalid data structure returned from retrieval API")]
    InvalidData,

    #[error("invalid tool parameters: {message}")]
    InvalidParams { message: String },

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),
}

impl ToolError {
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::MissingCredentials | Self::MissingInput(_) | Self::NoData | Self::InvalidData
        )
    }

    /// Convert to the text message the host receives.
    #[must_use]
    pub fn into_message(self) -> ToolMessage {
        if self.is_user_facing() {
            ToolMessage::text(self.to_string())
        } else {
            ToolMessage::text(format!("Retrieval error: {self}"))
        }
    }
}

/// Deserialize tool call params from a `HashMap<String, Value>` into a typed struct.
///
/// Explicit `null` values are treated as absent.
///
/// # Errors
///
/// Returns `ToolError::InvalidParams` when deserialization fails.
pub fn deserialize_params<T: serde::de::DeserializeOwned, S: std::hash::BuildHasher>(
    params: &HashMap<String, Value, S>,
) -> Result<T, ToolError> {
    let obj = Value::Object(
        params
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    );
    serde_json::from_value(obj).map_err(|e| ToolError::InvalidParams {
        message: e.to_string(),
    })
}

/// Borrow the configured client or report missing credentials.
pub(crate) fn require_client(client: Option<&RemoteClient>) -> Result<&RemoteClient, ToolError> {
    client.ok_or(ToolError::MissingCredentials)
}

/// Async trait for retrieval tool backends.
pub trait ToolExecutor: Send + Sync {
    /// Return tool definitions this executor can handle.
    fn tool_definitions(&self) -> Vec<crate::registry::ToolDef>;

    /// Execute a structured tool call. Returns `None` if `tool_id` is not handled.
    fn execute_tool_call(
        &self,
        call: &ToolCall,
    ) -> impl Future<Output = Result<Option<ToolMessage>, ToolError>> + Send;
}
