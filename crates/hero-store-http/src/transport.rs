use async_trait::async_trait;
use hero_store::{HeroStoreError, HeroStoreResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::Value;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// One outbound call against the hero collection, relative to the transport's base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            content_type: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_json_content_type(mut self) -> Self {
        self.content_type = Some(JSON_CONTENT_TYPE.to_string());
        self
    }

    pub fn with_json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self.with_json_content_type()
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: StatusCode, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn empty(status: StatusCode) -> Self {
        Self::new(status, String::new())
    }
}

#[async_trait]
pub trait HeroApiTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> HeroStoreResult<ApiResponse>;
}

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl HeroApiTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> HeroStoreResult<ApiResponse> {
        let url = self.endpoint(&request.path);
        tracing::debug!(method = %request.method, url = %url, "sending hero api request");

        let mut builder = self.client.request(request.method.clone(), url.as_str());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(content_type) = request.content_type.as_deref() {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            HeroStoreError::Transport(format!("http {} {url} failed: {err}", request.method))
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| HeroStoreError::Transport(format!("http read body failed: {err}")))?;
        Ok(ApiResponse { status, body })
    }
}
