use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::http::build_client;
use crate::secret::Secret;

pub const HEALTH_PATH: &str = "/api/v1/health";
pub const RETRIEVAL_PATH: &str = "/api/v1/retrieval";
pub const DOCUMENT_INFOS_PATH: &str = "/v1/api/document/infos";

/// Body of `POST /api/v1/retrieval`.
///
/// `top_k` and `keyword` are only sent when set; the prompt-formatted mode
/// leaves them to the service defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalRequest {
    pub question: String,
    pub dataset_ids: Vec<String>,
    pub document_ids: Vec<String>,
    pub page: u32,
    pub page_size: u32,
    pub similarity_threshold: f64,
    pub vector_similarity_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<bool>,
}

/// Status and raw body of a completed request.
#[derive(Debug, Clone)]
pub struct RemoteResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RemoteResponse {
    async fn read(resp: reqwest::Response) -> Result<Self> {
        let status = resp.status().as_u16();
        let body = resp.bytes().await?.to_vec();
        tracing::debug!(status, bytes = body.len(), "retrieval service responded");
        Ok(Self { status, body })
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body regardless of status.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Json`] when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Decode the body of a `200 OK` response; any other status yields an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Json`] when a `200` body is not valid JSON.
    pub fn json_if_ok(&self) -> Result<serde_json::Value> {
        if self.status == 200 {
            self.json()
        } else {
            tracing::debug!(status = self.status, "non-200 response treated as empty");
            Ok(serde_json::Value::Object(serde_json::Map::new()))
        }
    }
}

/// Bearer-authenticated client for a single retrieval service.
///
/// Wraps a pooled `reqwest::Client`; clones share the pool.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Secret,
}

impl RemoteClient {
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] unless `base_url` is an absolute
    /// `http`/`https` URL, or [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: Secret, config: &ClientConfig) -> Result<Self> {
        let trimmed = base_url.trim_end_matches('/');
        let parsed =
            Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(base_url.to_owned()));
        }
        Ok(Self {
            http: build_client(config)?,
            base_url: trimmed.to_owned(),
            api_key,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key.expose())
    }

    /// POST `body` as JSON to `base_url + path`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on transport failure. Non-2xx statuses are
    /// returned as a normal [`RemoteResponse`].
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        query: &[(&str, &str)],
    ) -> Result<RemoteResponse> {
        let url = self.url(path, query)?;
        tracing::debug!(%url, "POST");
        let resp = self
            .http
            .post(url)
            .header(AUTHORIZATION, self.bearer())
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;
        RemoteResponse::read(resp).await
    }

    /// GET `base_url + path` with an optional URL-encoded query.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on transport failure.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RemoteResponse> {
        let url = self.url(path, query)?;
        tracing::debug!(%url, "GET");
        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.bearer())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        RemoteResponse::read(resp).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on transport failure.
    pub async fn health(&self) -> Result<RemoteResponse> {
        self.get(HEALTH_PATH, &[]).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on transport failure.
    pub async fn retrieve(&self, request: &RetrievalRequest) -> Result<RemoteResponse> {
        self.post(RETRIEVAL_PATH, request, &[]).await
    }

    /// Fetch metadata for `doc_ids` in one batch call.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on transport failure.
    pub async fn document_infos(&self, doc_ids: &[String]) -> Result<RemoteResponse> {
        let body = serde_json::json!({ "doc_ids": doc_ids });
        self.post(DOCUMENT_INFOS_PATH, &body, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn make_client(base_url: &str) -> RemoteClient {
        RemoteClient::new(base_url, Secret::new("test-key"), &ClientConfig::default()).unwrap()
    }

    fn sample_request() -> RetrievalRequest {
        RetrievalRequest {
            question: "what is rust".to_owned(),
            dataset_ids: vec!["ds1".to_owned(), "ds2".to_owned()],
            document_ids: vec![],
            page: 1,
            page_size: 30,
            similarity_threshold: 0.2,
            vector_similarity_weight: 0.3,
            top_k: None,
            keyword: None,
        }
    }

    #[test]
    fn new_trims_trailing_slash() {
        let client = make_client("https://ragflow.example.com/");
        assert_eq!(client.base_url(), "https://ragflow.example.com");
    }

    #[test]
    fn new_rejects_non_http_scheme() {
        let err = RemoteClient::new("ftp://files", Secret::new("k"), &ClientConfig::default())
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn new_rejects_garbage() {
        let err =
            RemoteClient::new("not a url", Secret::new("k"), &ClientConfig::default()).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn debug_does_not_leak_key() {
        let client = make_client("https://ragflow.example.com");
        let dbg = format!("{client:?}");
        assert!(!dbg.contains("test-key"));
        assert!(dbg.contains("[REDACTED]"));
    }

    #[test]
    fn url_encodes_query() {
        let client = make_client("https://ragflow.example.com");
        let url = client
            .url("/api/v1/datasets", &[("name", "my docs"), ("page", "2")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://ragflow.example.com/api/v1/datasets?name=my+docs&page=2"
        );
    }

    #[test]
    fn url_without_query_has_none() {
        let client = make_client("https://ragflow.example.com");
        let url = client.url(HEALTH_PATH, &[]).unwrap();
        assert!(url.query().is_none());
    }

    #[test]
    fn retrieval_request_omits_unset_optionals() {
        let value = serde_json::to_value(sample_request()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("top_k"));
        assert!(!obj.contains_key("keyword"));
        assert_eq!(obj["dataset_ids"], serde_json::json!(["ds1", "ds2"]));
    }

    #[test]
    fn retrieval_request_includes_set_optionals() {
        let mut request = sample_request();
        request.top_k = Some(1024);
        request.keyword = Some(true);
        let value = serde_json::to_value(request).unwrap();
        assert_eq!(value["top_k"], 1024);
        assert_eq!(value["keyword"], true);
    }

    #[test]
    fn json_if_ok_non_200_is_empty_object() {
        let resp = RemoteResponse {
            status: 500,
            body: b"oops".to_vec(),
        };
        assert_eq!(resp.json_if_ok().unwrap(), serde_json::json!({}));
        assert!(!resp.is_success());
    }

    #[test]
    fn json_if_ok_invalid_body_errors() {
        let resp = RemoteResponse {
            status: 200,
            body: b"<html>".to_vec(),
        };
        assert!(matches!(resp.json_if_ok(), Err(ClientError::Json(_))));
    }

    #[tokio::test]
    async fn post_sends_bearer_and_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RETRIEVAL_PATH))
            .and(header("Authorization", "Bearer test-key"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::to_value(sample_request()).unwrap()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"chunks": [], "total": 0}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server.uri());
        let resp = client.retrieve(&sample_request()).await.unwrap();
        assert_eq!(resp.status, 200);
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["data"]["total"], 0);
    }

    #[tokio::test]
    async fn get_appends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/datasets"))
            .and(query_param("name", "a b"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server.uri());
        let resp = client
            .get("/api/v1/datasets", &[("name", "a b")])
            .await
            .unwrap();
        assert!(resp.is_success());
    }

    #[tokio::test]
    async fn non_2xx_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(HEALTH_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let client = make_client(&server.uri());
        let resp = client.health().await.unwrap();
        assert_eq!(resp.status, 401);
        assert_eq!(resp.body, b"unauthorized");
    }

    #[tokio::test]
    async fn document_infos_sends_doc_ids() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(DOCUMENT_INFOS_PATH))
            .and(body_json(serde_json::json!({"doc_ids": ["d1", "d1", "d2"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "d1", "meta_fields": {}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server.uri());
        let ids = vec!["d1".to_owned(), "d1".to_owned(), "d2".to_owned()];
        let resp = client.document_infos(&ids).await.unwrap();
        assert_eq!(resp.status, 200);
    }

    #[tokio::test]
    async fn connection_refused_is_http_error() {
        let client = RemoteClient::new(
            "http://127.0.0.1:1",
            Secret::new("k"),
            &ClientConfig {
                timeout: 2,
                connect_timeout: 1,
                accept_invalid_certs: false,
            },
        )
        .unwrap();
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
    }
}
