use ragbridge_client::RemoteClient;
use ragbridge_knowledge::Aggregator;
use serde_json::{Value, json};

use crate::config::RetrievalDefaults;
use crate::executor::{
    ToolCall, ToolError, ToolExecutor, ToolMessage, deserialize_params, require_client,
};
use crate::params::PromptRetrievalParams;
use crate::registry::ToolDef;

pub const PROMPT_TOOL_ID: &str = "retrieval_prompt";

/// Prompt-formatted retrieval: retrieves chunks and renders them as knowledge blocks.
#[derive(Debug, Clone)]
pub struct PromptRetrievalTool {
    client: Option<RemoteClient>,
    defaults: RetrievalDefaults,
}

impl PromptRetrievalTool {
    #[must_use]
    pub fn new(client: Option<RemoteClient>, defaults: RetrievalDefaults) -> Self {
        Self { client, defaults }
    }

    async fn run(&self, call: &ToolCall) -> Result<ToolMessage, ToolError> {
        let client = require_client(self.client.as_ref())?;
        let params: PromptRetrievalParams = deserialize_params(&call.params)?;
        let request = params.into_request(&self.defaults)?;

        let body = client.retrieve(&request).await?.json_if_ok()?;
        let chunks = extract_chunks(&body)?;

        let aggregation = Aggregator::new(client.clone())
            .aggregate_value(chunks)
            .await?;
        Ok(ToolMessage::json(json!({ "result": aggregation.texts() })))
    }
}

/// Pick `data.chunks` out of a retrieval body.
fn extract_chunks(body: &Value) -> Result<&Value, ToolError> {
    let data = body.get("data").unwrap_or(&Value::Null);
    if is_empty_value(data) {
        return Err(ToolError::NoData);
    }
    data.as_object()
        .and_then(|obj| obj.get("chunks"))
        .ok_or(ToolError::InvalidData)
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

impl ToolExecutor for PromptRetrievalTool {
    fn tool_definitions(&self) -> Vec<ToolDef> {
        vec![ToolDef {
            id: PROMPT_TOOL_ID,
            description: "Retrieve chunks from RAGFlow datasets and format them as knowledge blocks for a prompt",
            schema: schemars::schema_for!(PromptRetrievalParams),
        }]
    }

    async fn execute_tool_call(&self, call: &ToolCall) -> Result<Option<ToolMessage>, ToolError> {
        if call.tool_id != PROMPT_TOOL_ID {
            return Ok(None);
        }
        self.run(call).await.map(Some)
    }
}
