use ragbridge_client::RemoteClient;

use crate::composite::CompositeExecutor;
use crate::config::ToolsConfig;
use crate::document_info::DocumentInfoTool;
use crate::executor::{ToolCall, ToolError, ToolExecutor, ToolMessage};
use crate::prompt::PromptRetrievalTool;
use crate::registry::ToolRegistry;
use crate::retrieval::RetrievalTool;

type Chain =
    CompositeExecutor<RetrievalTool, CompositeExecutor<PromptRetrievalTool, DocumentInfoTool>>;

/// The three retrieval tools sharing one client.
///
/// `client` is `None` when credentials are not configured; every call then
/// reports missing credentials without touching the network.
#[derive(Debug, Clone)]
pub struct KnowledgeTools {
    chain: Chain,
}

impl KnowledgeTools {
    #[must_use]
    pub fn new(client: Option<RemoteClient>, config: &ToolsConfig) -> Self {
        let defaults = &config.retrieval;
        let chain = CompositeExecutor::new(
            RetrievalTool::new(client.clone(), defaults.clone()),
            CompositeExecutor::new(
                PromptRetrievalTool::new(client.clone(), defaults.clone()),
                DocumentInfoTool::new(client),
            ),
        );
        Self { chain }
    }

    #[must_use]
    pub fn registry(&self) -> ToolRegistry {
        ToolRegistry::from_definitions(self.chain.tool_definitions())
    }

    /// Run a tool call and convert every outcome into a host message.
    pub async fn invoke(&self, call: &ToolCall) -> ToolMessage {
        let result = self
            .chain
            .execute_tool_call(call)
            .await
            .and_then(|message| {
                message.ok_or_else(|| ToolError::UnknownTool(call.tool_id.clone()))
            });
        result.unwrap_or_else(|e| {
            if e.is_user_facing() {
                tracing::info!(tool = %call.tool_id, "{e}");
            } else {
                tracing::warn!(tool = %call.tool_id, "tool call failed: {e}");
            }
            e.into_message()
        })
    }
}

impl ToolExecutor for KnowledgeTools {
    fn tool_definitions(&self) -> Vec<crate::registry::ToolDef> {
        self.chain.tool_definitions()
    }

    async fn execute_tool_call(&self, call: &ToolCall) -> Result<Option<ToolMessage>, ToolError> {
        self.chain.execute_tool_call(call).await
    }
}
