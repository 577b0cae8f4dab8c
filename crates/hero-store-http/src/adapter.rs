use crate::transport::{ApiRequest, ApiResponse, HeroApiTransport, ReqwestTransport};
use async_trait::async_trait;
use hero_store::{Hero, HeroId, HeroStore, HeroStoreError, HeroStoreResult, NewHero};
use reqwest::{Method, StatusCode};
use serde_json::Value;

pub const DEFAULT_HEROES_API_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_HEROES_COLLECTION: &str = "api/heroes";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeroApiConfig {
    pub base_url: String,
    pub collection: String,
}

impl Default for HeroApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_HEROES_API_BASE_URL.to_string(),
            collection: DEFAULT_HEROES_COLLECTION.to_string(),
        }
    }
}

impl HeroApiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_value("HEROES_API_BASE_URL").unwrap_or(defaults.base_url),
            collection: env_value("HEROES_API_COLLECTION").unwrap_or(defaults.collection),
        }
    }

    pub fn validate(&self) -> HeroStoreResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(HeroStoreError::InvalidInput(format!(
                "base_url must start with http:// or https://: {}",
                self.base_url
            )));
        }
        if self.collection.trim_matches('/').is_empty() {
            return Err(HeroStoreError::InvalidInput(
                "collection must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Collection path without surrounding slashes, e.g. `api/heroes`.
    pub fn collection_path(&self) -> &str {
        self.collection.trim_matches('/')
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

#[derive(Clone, Debug)]
pub struct HttpHeroStore<T> {
    transport: T,
    collection: String,
}

impl<T> HttpHeroStore<T> {
    pub fn new(transport: T, collection: impl Into<String>) -> Self {
        Self {
            transport,
            collection: collection.into().trim_matches('/').to_string(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn collection_url(&self) -> String {
        self.collection.clone()
    }

    /// Filter queries go to `<collection>/?key=value`.
    fn filter_url(&self) -> String {
        format!("{}/", self.collection)
    }

    fn hero_url(&self, id: HeroId) -> String {
        format!("{}/{id}", self.collection)
    }
}

impl HttpHeroStore<ReqwestTransport> {
    pub fn connect(config: &HeroApiConfig) -> HeroStoreResult<Self> {
        config.validate()?;
        Ok(Self::new(
            ReqwestTransport::new(config.base_url.clone()),
            config.collection_path(),
        ))
    }
}

impl<T: HeroApiTransport> HttpHeroStore<T> {
    async fn send_expect_success(&self, request: ApiRequest) -> HeroStoreResult<ApiResponse> {
        let response = self.transport.send(request).await?;
        if !response.status.is_success() {
            return Err(map_http_status(response.status, response.body));
        }
        Ok(response)
    }
}

#[async_trait]
impl<T: HeroApiTransport> HeroStore for HttpHeroStore<T> {
    async fn list_heroes(&self) -> HeroStoreResult<Vec<Hero>> {
        let response = self
            .send_expect_success(ApiRequest::get(self.collection_url()))
            .await?;
        decode_body(&response.body)
    }

    async fn find_hero(&self, id: HeroId) -> HeroStoreResult<Option<Hero>> {
        let request = ApiRequest::get(self.filter_url()).with_query("id", id.to_string());
        let response = self.send_expect_success(request).await?;
        let heroes: Vec<Hero> = decode_body(&response.body)?;
        Ok(heroes.into_iter().next())
    }

    async fn get_hero(&self, id: HeroId) -> HeroStoreResult<Option<Hero>> {
        let response = self.transport.send(ApiRequest::get(self.hero_url(id))).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status.is_success() {
            return Err(map_http_status(response.status, response.body));
        }
        decode_body(&response.body).map(Some)
    }

    async fn search_heroes(&self, term: &str) -> HeroStoreResult<Vec<Hero>> {
        let request = ApiRequest::get(self.filter_url()).with_query("name", term);
        let response = self.send_expect_success(request).await?;
        decode_body(&response.body)
    }

    async fn add_hero(&self, hero: NewHero) -> HeroStoreResult<Hero> {
        let request = ApiRequest::new(Method::POST, self.collection_url())
            .with_json_body(encode_body(&hero)?);
        let response = self.send_expect_success(request).await?;
        decode_body(&response.body)
    }

    async fn update_hero(&self, hero: &Hero) -> HeroStoreResult<()> {
        let request = ApiRequest::new(Method::PUT, self.collection_url())
            .with_json_body(encode_body(hero)?);
        self.send_expect_success(request).await?;
        Ok(())
    }

    async fn delete_hero(&self, id: HeroId) -> HeroStoreResult<()> {
        let request = ApiRequest::new(Method::DELETE, self.hero_url(id)).with_json_content_type();
        self.send_expect_success(request).await?;
        Ok(())
    }
}

fn encode_body<S: serde::Serialize + ?Sized>(value: &S) -> HeroStoreResult<Value> {
    serde_json::to_value(value)
        .map_err(|err| HeroStoreError::Serialization(format!("http json encode failed: {err}")))
}

fn decode_body<D: serde::de::DeserializeOwned>(body: &str) -> HeroStoreResult<D> {
    serde_json::from_str(body)
        .map_err(|err| HeroStoreError::Serialization(format!("http json decode failed: {err}")))
}

fn map_http_status(status: StatusCode, body: String) -> HeroStoreError {
    match status {
        StatusCode::NOT_FOUND => HeroStoreError::NotFound {
            resource: "hero",
            id: body,
        },
        StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST => {
            HeroStoreError::InvalidInput(body)
        }
        _ => HeroStoreError::Backend(format!("http request failed with status {status}: {body}")),
    }
}
