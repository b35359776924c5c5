//! Chunk sanitizing, per-document grouping, and knowledge block rendering.

pub mod aggregate;
pub mod error;
pub mod sanitize;
pub mod source;
pub mod tokens;
pub mod types;

pub use aggregate::{Aggregator, DocumentGroup, group_chunks, render_group, render_knowledge};
pub use error::KnowledgeError;
pub use sanitize::sanitize;
pub use source::{DocumentInfoSource, parse_document_infos};
pub use tokens::count_tokens;
pub use types::{Aggregation, Chunk, DocumentMetadata, KnowledgeBlock};
