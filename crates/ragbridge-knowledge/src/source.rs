use std::collections::HashMap;

use ragbridge_client::RemoteClient;
use serde_json::Value;

use crate::error::Result;
use crate::types::DocumentMetadata;

/// Provider of per-document metadata, keyed by document id.
///
/// Returns the full decoded response; the aggregator reads its `data` field.
pub trait DocumentInfoSource: Send + Sync {
    fn fetch_document_infos(
        &self,
        doc_ids: &[String],
    ) -> impl Future<Output = Result<Value>> + Send;
}

impl DocumentInfoSource for RemoteClient {
    async fn fetch_document_infos(&self, doc_ids: &[String]) -> Result<Value> {
        let resp = self.document_infos(doc_ids).await?;
        Ok(resp.json()?)
    }
}

/// Build `document_id -> metadata` from a document-info `data` array.
///
/// Entries that are not objects or carry no string `id` are skipped. A missing
/// or non-object `meta_fields` yields empty metadata. Later duplicates win.
#[must_use]
pub fn parse_document_infos(data: &Value) -> HashMap<String, DocumentMetadata> {
    let Some(entries) = data.as_array() else {
        if !data.is_null() {
            tracing::warn!("document-info data is not an array, ignoring metadata");
        }
        return HashMap::new();
    };

    let mut docs = HashMap::with_capacity(entries.len());
    let mut skipped = 0usize;
    for entry in entries {
        let Some(id) = entry.get("id").and_then(Value::as_str) else {
            skipped += 1;
            continue;
        };
        let meta = entry
            .get("meta_fields")
            .and_then(Value::as_object)
            .cloned()
            .map(DocumentMetadata::from)
            .unwrap_or_default();
        docs.insert(id.to_owned(), meta);
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipped malformed document-info entries");
    }
    docs
}
