use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{KnowledgeError, Result};
use crate::tokens::count_tokens;

/// One retrieved text fragment and its source document linkage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chunk {
    pub content: String,
    pub document_id: String,
    /// Grouping key and display name of the source document.
    pub document_keyword: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl Chunk {
    /// Parse a JSON array of chunk objects, failing on the first malformed entry.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::NotAnArray`] or [`KnowledgeError::InvalidChunk`].
    pub fn parse_list(value: &Value) -> Result<Vec<Self>> {
        let Some(items) = value.as_array() else {
            return Err(KnowledgeError::NotAnArray(json_kind(value)));
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Self::deserialize(item)
                    .map_err(|source| KnowledgeError::InvalidChunk { index, source })
            })
            .collect()
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Open-schema document metadata, kept in the order the service returned it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMetadata(Map<String, Value>);

impl DocumentMetadata {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// `(key, rendered value)` pairs in insertion order.
    pub fn rendered(&self) -> impl Iterator<Item = (&str, String)> {
        self.0.iter().map(|(k, v)| (k.as_str(), render_value(v)))
    }
}

impl From<Map<String, Value>> for DocumentMetadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Strings render raw; everything else as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Rendered prompt text for one source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBlock {
    pub document: String,
    pub text: String,
}

impl KnowledgeBlock {
    /// Best-effort cl100k token count; 0 when the tokenizer is unavailable.
    #[must_use]
    pub fn token_count(&self) -> usize {
        count_tokens(&self.text)
    }
}

impl fmt::Display for KnowledgeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Output of one aggregation call.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub blocks: Vec<KnowledgeBlock>,
    /// Raw `data` of the document-info response, `[]` when absent.
    pub docs_data: Value,
}

impl Aggregation {
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.text.as_str()).collect()
    }
}
