use ragbridge_client::RemoteClient;
use ragbridge_knowledge::Aggregator;
use serde_json::{Value, json};

use crate::executor::{
    ToolCall, ToolError, ToolExecutor, ToolMessage, deserialize_params, require_client,
};
use crate::params::DocumentInfoParams;
use crate::registry::ToolDef;

pub const DOCUMENT_INFO_TOOL_ID: &str = "document_info";

/// Enrich caller-supplied chunks with document metadata and render knowledge blocks.
#[derive(Debug, Clone)]
pub struct DocumentInfoTool {
    client: Option<RemoteClient>,
}

impl DocumentInfoTool {
    #[must_use]
    pub fn new(client: Option<RemoteClient>) -> Self {
        Self { client }
    }

    async fn run(&self, call: &ToolCall) -> Result<ToolMessage, ToolError> {
        let client = require_client(self.client.as_ref())?;
        let params: DocumentInfoParams = deserialize_params(&call.params)?;
        let raw = params.chunks.as_deref().unwrap_or("[]");
        let chunks: Value = serde_json::from_str(raw).map_err(|e| ToolError::InvalidParams {
            message: format!("chunks is not valid JSON: {e}"),
        })?;

        let aggregation = Aggregator::new(client.clone())
            .aggregate_value(&chunks)
            .await?;
        Ok(ToolMessage::json(json!({
            "knowledges": aggregation.texts(),
            "docs_data": aggregation.docs_data,
        })))
    }
}

impl ToolExecutor for DocumentInfoTool {
    fn tool_definitions(&self) -> Vec<ToolDef> {
        vec![ToolDef {
            id: DOCUMENT_INFO_TOOL_ID,
            description: "Fetch document metadata for retrieved chunks and format them as knowledge blocks",
            schema: schemars::schema_for!(DocumentInfoParams),
        }]
    }

    async fn execute_tool_call(&self, call: &ToolCall) -> Result<Option<ToolMessage>, ToolError> {
        if call.tool_id != DOCUMENT_INFO_TOOL_ID {
            return Ok(None);
        }
        self.run(call).await.map(Some)
    }
}
