//! Retrieval tools exposed to a host: raw retrieval, prompt-formatted
//! retrieval and document-info enrichment.

pub mod composite;
pub mod config;
pub mod document_info;
pub mod executor;
pub mod params;
pub mod prompt;
pub mod registry;
pub mod retrieval;
pub mod toolset;

pub use composite::CompositeExecutor;
pub use config::{RetrievalDefaults, ToolsConfig};
pub use document_info::{DOCUMENT_INFO_TOOL_ID, DocumentInfoTool};
pub use executor::{ToolCall, ToolError, ToolExecutor, ToolMessage, deserialize_params};
pub use params::{split_dataset_ids, split_document_ids};
pub use prompt::{PROMPT_TOOL_ID, PromptRetrievalTool};
pub use registry::{ToolDef, ToolRegistry};
pub use retrieval::{RETRIEVAL_TOOL_ID, RetrievalTool};
pub use toolset::KnowledgeTools;
