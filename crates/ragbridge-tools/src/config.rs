use serde::{Deserialize, Serialize};

/// Top-level configuration for the retrieval tools.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub retrieval: RetrievalDefaults,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    30
}

fn default_top_k() -> u32 {
    1024
}

fn default_similarity_threshold() -> f64 {
    0.2
}

fn default_vector_similarity_weight() -> f64 {
    0.3
}

/// Values used when a tool call omits a tuning parameter.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalDefaults {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default)]
    pub keyword: bool,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "default_vector_similarity_weight")]
    pub vector_similarity_weight: f64,
}

impl Default for RetrievalDefaults {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            top_k: default_top_k(),
            keyword: false,
            similarity_threshold: default_similarity_threshold(),
            vector_similarity_weight: default_vector_similarity_weight(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_retrieval_values() {
        let d = RetrievalDefaults::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.page_size, 30);
        assert_eq!(d.top_k, 1024);
        assert!(!d.keyword);
        assert!((d.similarity_threshold - 0.2).abs() < f64::EPSILON);
        assert!((d.vector_similarity_weight - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn deserialize_omitted_fields_use_defaults() {
        let config: ToolsConfig = toml::from_str("").unwrap();
        assert_eq!(config.retrieval.page_size, 30);
        assert_eq!(config.retrieval.top_k, 1024);
    }

    #[test]
    fn deserialize_partial_retrieval_section() {
        let toml_str = r"
            [retrieval]
            page_size = 10
            keyword = true
        ";
        let config: ToolsConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.retrieval.page_size, 10);
        assert!(config.retrieval.keyword);
        assert_eq!(config.retrieval.page, 1);
    }
}
