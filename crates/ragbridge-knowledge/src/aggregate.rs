//! Grouping of retrieved chunks by source document and rendering of
//! prompt-ready knowledge blocks.

use std::collections::HashMap;
use std::fmt::Write;

use serde_json::Value;

use crate::error::{KnowledgeError, Result};
use crate::sanitize::sanitize;
use crate::source::{DocumentInfoSource, parse_document_infos};
use crate::types::{Aggregation, Chunk, DocumentMetadata, KnowledgeBlock, json_kind};

/// Fragments of one source document, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentGroup {
    pub keyword: String,
    pub fragments: Vec<String>,
    /// Metadata of the last chunk seen for this keyword.
    pub metadata: DocumentMetadata,
}

/// Render one fragment: separator, 0-based input position, optional URL,
/// sanitized content.
#[must_use]
pub fn render_fragment(index: usize, chunk: &Chunk) -> String {
    let mut text = format!("---\nID: {index}\n");
    if let Some(url) = &chunk.url {
        let _ = writeln!(text, "URL: {url}");
    }
    text.push_str(&sanitize(&chunk.content));
    text
}

/// Group chunks by `document_keyword` in first-seen order.
///
/// Every chunk overwrites its group's metadata with the metadata of its own
/// `document_id` (empty when unknown), so the last chunk of a group decides.
#[must_use]
pub fn group_chunks(
    chunks: &[Chunk],
    metadata: &HashMap<String, DocumentMetadata>,
) -> Vec<DocumentGroup> {
    let mut groups: Vec<DocumentGroup> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for (index, chunk) in chunks.iter().enumerate() {
        let slot = *positions
            .entry(chunk.document_keyword.as_str())
            .or_insert_with(|| {
                groups.push(DocumentGroup {
                    keyword: chunk.document_keyword.clone(),
                    fragments: Vec::new(),
                    metadata: DocumentMetadata::default(),
                });
                groups.len() - 1
            });
        let group = &mut groups[slot];
        group.fragments.push(render_fragment(index, chunk));
        group.metadata = metadata
            .get(&chunk.document_id)
            .cloned()
            .unwrap_or_default();
    }

    groups
}

/// Render a group as header, metadata lines, then each fragment followed by a blank line.
#[must_use]
pub fn render_group(group: &DocumentGroup) -> KnowledgeBlock {
    let mut text = format!("\nDocument: {} \n", group.keyword);
    for (key, value) in group.metadata.rendered() {
        let _ = writeln!(text, "{key}: {value}");
    }
    text.push_str("Relevant fragments as following:\n");
    for fragment in &group.fragments {
        text.push_str(fragment);
        text.push('\n');
    }
    KnowledgeBlock {
        document: group.keyword.clone(),
        text,
    }
}

/// Render chunks against already-fetched metadata. No I/O.
#[must_use]
pub fn render_knowledge(
    chunks: &[Chunk],
    metadata: &HashMap<String, DocumentMetadata>,
) -> Vec<KnowledgeBlock> {
    group_chunks(chunks, metadata)
        .iter()
        .map(render_group)
        .collect()
}

/// Fetches document metadata and renders knowledge blocks.
#[derive(Debug, Clone)]
pub struct Aggregator<S> {
    source: S,
}

impl<S: DocumentInfoSource> Aggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Issue one document-info call for every chunk's `document_id`
    /// (duplicates kept, input order) and render the grouped blocks.
    ///
    /// # Errors
    ///
    /// Propagates document-info transport or decode failures, and rejects a
    /// response body that is not a JSON object.
    pub async fn aggregate(&self, chunks: &[Chunk]) -> Result<Aggregation> {
        let doc_ids: Vec<String> = chunks.iter().map(|c| c.document_id.clone()).collect();
        let response = self.source.fetch_document_infos(&doc_ids).await?;
        let Some(body) = response.as_object() else {
            tracing::warn!(kind = json_kind(&response), "unexpected document info response");
            return Err(KnowledgeError::UnexpectedResponse(json_kind(&response)));
        };
        let docs_data = body
            .get("data")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        let metadata = parse_document_infos(&docs_data);

        let blocks = render_knowledge(chunks, &metadata);
        tracing::debug!(
            chunks = chunks.len(),
            documents = blocks.len(),
            with_metadata = metadata.len(),
            tokens = blocks.iter().map(KnowledgeBlock::token_count).sum::<usize>(),
            "rendered knowledge blocks"
        );
        Ok(Aggregation { blocks, docs_data })
    }

    /// Parse a raw JSON chunk array, then [`Self::aggregate`].
    ///
    /// Malformed chunks fail before any network call.
    ///
    /// # Errors
    ///
    /// Returns chunk validation errors or document-info failures.
    pub async fn aggregate_value(&self, chunks: &Value) -> Result<Aggregation> {
        let chunks = Chunk::parse_list(chunks)?;
        self.aggregate(&chunks).await
    }
}
