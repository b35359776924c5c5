use ragbridge_client::RemoteClient;
use serde_json::{Value, json};

use crate::config::RetrievalDefaults;
use crate::executor::{
    ToolCall, ToolError, ToolExecutor, ToolMessage, deserialize_params, require_client,
};
use crate::params::RetrievalParams;
use crate::registry::ToolDef;

pub const RETRIEVAL_TOOL_ID: &str = "retrieval";

/// Raw retrieval: passes `chunks`, `doc_aggs` and `total` through untouched.
#[derive(Debug, Clone)]
pub struct RetrievalTool {
    client: Option<RemoteClient>,
    defaults: RetrievalDefaults,
}

impl RetrievalTool {
    #[must_use]
    pub fn new(client: Option<RemoteClient>, defaults: RetrievalDefaults) -> Self {
        Self { client, defaults }
    }

    async fn run(&self, call: &ToolCall) -> Result<ToolMessage, ToolError> {
        let client = require_client(self.client.as_ref())?;
        let params: RetrievalParams = deserialize_params(&call.params)?;
        let request = params.into_request(&self.defaults)?;

        tracing::debug!(
            datasets = request.dataset_ids.len(),
            documents = request.document_ids.len(),
            page = request.page,
            page_size = request.page_size,
            "raw retrieval"
        );
        let body = client.retrieve(&request).await?.json_if_ok()?;
        Ok(ToolMessage::json(passthrough(&body)))
    }
}

fn passthrough(body: &Value) -> Value {
    let data = body.get("data");
    let field = |key: &str, default: Value| {
        data.and_then(|d| d.get(key)).cloned().unwrap_or(default)
    };
    json!({
        "chunks": field("chunks", json!([])),
        "doc_aggs": field("doc_aggs", json!([])),
        "total": field("total", json!(0)),
    })
}

impl ToolExecutor for RetrievalTool {
    fn tool_definitions(&self) -> Vec<ToolDef> {
        vec![ToolDef {
            id: RETRIEVAL_TOOL_ID,
            description: "Retrieve raw chunks, document aggregations and total hit count from RAGFlow datasets",
            schema: schemars::schema_for!(RetrievalParams),
        }]
    }

    async fn execute_tool_call(&self, call: &ToolCall) -> Result<Option<ToolMessage>, ToolError> {
        if call.tool_id != RETRIEVAL_TOOL_ID {
            return Ok(None);
        }
        self.run(call).await.map(Some)
    }
}
