//! Tool-facing parameter parsing.

use ragbridge_client::RetrievalRequest;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};

use crate::config::RetrievalDefaults;
use crate::executor::ToolError;

/// Split `dataset_ids` on commas, keeping empty segments.
///
/// # Errors
///
/// Returns [`ToolError::MissingInput`] when the value is absent or empty.
pub fn split_dataset_ids(raw: Option<&str>) -> Result<Vec<String>, ToolError> {
    match raw {
        None | Some("") => Err(ToolError::MissingInput("Dataset id is required")),
        Some(ids) => Ok(ids.split(',').map(str::to_owned).collect()),
    }
}

/// Split `document_ids` on commas; absent or whitespace-only yields no ids.
#[must_use]
pub fn split_document_ids(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(ids) if !ids.trim().is_empty() => ids.split(',').map(str::to_owned).collect(),
        _ => Vec::new(),
    }
}

/// Accept any non-negative whole JSON number that fits in `u32`, including `10.0`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    use serde::de::Error;

    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(n) = number.as_u64() {
        return u32::try_from(n)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("{n} is out of range for u32")));
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f) => {
            Ok(Some(f as u32))
        }
        _ => Err(D::Error::custom(format!(
            "expected a non-negative whole number, got {number}"
        ))),
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub(crate) struct RetrievalParams {
    /// Question to search the datasets for
    #[serde(default)]
    pub question: String,
    /// Comma-separated dataset ids
    pub dataset_ids: Option<String>,
    /// Comma-separated document ids to restrict the search to
    pub document_ids: Option<String>,
    /// Result page, starting at 1
    #[serde(default, deserialize_with = "whole_number")]
    pub page: Option<u32>,
    /// Chunks per page
    #[serde(default, deserialize_with = "whole_number")]
    pub page_size: Option<u32>,
    /// Candidate chunks considered for vector similarity
    #[serde(default, deserialize_with = "whole_number")]
    pub top_k: Option<u32>,
    /// Enable keyword-based matching
    pub keyword: Option<bool>,
    /// Minimum similarity score
    pub similarity_threshold: Option<f64>,
    /// Weight of vector similarity against keyword similarity
    pub vector_similarity_weight: Option<f64>,
}

impl RetrievalParams {
    pub(crate) fn into_request(
        self,
        defaults: &RetrievalDefaults,
    ) -> Result<RetrievalRequest, ToolError> {
        Ok(RetrievalRequest {
            dataset_ids: split_dataset_ids(self.dataset_ids.as_deref())?,
            document_ids: split_document_ids(self.document_ids.as_deref()),
            question: self.question,
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
            similarity_threshold: self
                .similarity_threshold
                .unwrap_or(defaults.similarity_threshold),
            vector_similarity_weight: self
                .vector_similarity_weight
                .unwrap_or(defaults.vector_similarity_weight),
            top_k: Some(self.top_k.unwrap_or(defaults.top_k)),
            keyword: Some(self.keyword.unwrap_or(defaults.keyword)),
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub(crate) struct PromptRetrievalParams {
    /// Question to search the datasets for
    #[serde(default)]
    pub question: String,
    /// Comma-separated dataset ids
    pub dataset_ids: Option<String>,
    /// Comma-separated document ids to restrict the search to
    pub document_ids: Option<String>,
    /// Result page, starting at 1
    #[serde(default, deserialize_with = "whole_number")]
    pub page: Option<u32>,
    /// Chunks per page
    #[serde(default, deserialize_with = "whole_number")]
    pub page_size: Option<u32>,
    /// Minimum similarity score
    pub similarity_threshold: Option<f64>,
    /// Weight of vector similarity against keyword similarity
    pub vector_similarity_weight: Option<f64>,
}

impl PromptRetrievalParams {
    pub(crate) fn into_request(
        self,
        defaults: &RetrievalDefaults,
    ) -> Result<RetrievalRequest, ToolError> {
        Ok(RetrievalRequest {
            dataset_ids: split_dataset_ids(self.dataset_ids.as_deref())?,
            document_ids: split_document_ids(self.document_ids.as_deref()),
            question: self.question,
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
            similarity_threshold: self
                .similarity_threshold
                .unwrap_or(defaults.similarity_threshold),
            vector_similarity_weight: self
                .vector_similarity_weight
                .unwrap_or(defaults.vector_similarity_weight),
            top_k: None,
            keyword: None,
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub(crate) struct DocumentInfoParams {
    /// JSON-encoded array of chunk objects (`content`, `document_id`, `document_keyword`, optional `url`)
    pub chunks: Option<String>,
}
