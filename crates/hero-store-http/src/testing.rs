use crate::adapter::DEFAULT_HEROES_COLLECTION;
use crate::transport::{ApiRequest, ApiResponse, HeroApiTransport};
use async_trait::async_trait;
use hero_store::{
    Hero, HeroId, HeroStore, HeroStoreError, HeroStoreResult, MemoryHeroStore, NewHero,
};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// In-process stand-in for a REST hero collection.
///
/// Requests are served from a [`MemoryHeroStore`] and recorded so tests can assert on the
/// exact outbound calls. Transport failures can be queued or forced.
#[derive(Clone, Debug)]
pub struct MockHeroApi {
    store: MemoryHeroStore,
    collection: String,
    inner: Arc<Mutex<MockApiState>>,
}

#[derive(Debug, Default)]
struct MockApiState {
    requests: Vec<ApiRequest>,
    queued_failures: VecDeque<String>,
    offline: bool,
}

enum Target {
    Collection,
    Hero(HeroId),
}

impl Default for MockHeroApi {
    fn default() -> Self {
        Self::with_store(MemoryHeroStore::new())
    }
}

impl MockHeroApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixture() -> Self {
        Self::with_store(MemoryHeroStore::with_fixture())
    }

    pub fn with_store(store: MemoryHeroStore) -> Self {
        Self {
            store,
            collection: DEFAULT_HEROES_COLLECTION.to_string(),
            inner: Arc::default(),
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into().trim_matches('/').to_string();
        self
    }

    pub fn store(&self) -> &MemoryHeroStore {
        &self.store
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// The next request fails at the transport level with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.lock().queued_failures.push_back(message.into());
    }

    fn lock(&self) -> MutexGuard<'_, MockApiState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn target(&self, path: &str) -> Option<Target> {
        let rest = path
            .trim_start_matches('/')
            .strip_prefix(self.collection.as_str())?;
        let id = rest.trim_matches('/');
        if id.is_empty() {
            return Some(Target::Collection);
        }
        if !rest.starts_with('/') {
            return None;
        }
        id.parse().ok().map(Target::Hero)
    }

    async fn route(&self, request: &ApiRequest) -> HeroStoreResult<ApiResponse> {
        let Some(target) = self.target(&request.path) else {
            return Ok(ApiResponse::new(
                StatusCode::NOT_FOUND,
                format!("no collection at {}", request.path),
            ));
        };

        match (request.method.as_str(), target) {
            ("GET", Target::Collection) => self.query_collection(request).await,
            ("GET", Target::Hero(id)) => match self.store.get_hero(id).await {
                Ok(Some(hero)) => json_response(StatusCode::OK, &hero),
                Ok(None) => Ok(hero_not_found(id)),
                Err(error) => Ok(store_error_response(error)),
            },
            ("POST", Target::Collection) => {
                let hero: NewHero = match parse_body(request) {
                    Ok(hero) => hero,
                    Err(response) => return Ok(response),
                };
                match self.store.add_hero(hero).await {
                    Ok(hero) => json_response(StatusCode::CREATED, &hero),
                    Err(error) => Ok(store_error_response(error)),
                }
            }
            ("PUT", Target::Collection) => {
                let hero: Hero = match parse_body(request) {
                    Ok(hero) => hero,
                    Err(response) => return Ok(response),
                };
                Ok(empty_or_error(self.store.update_hero(&hero).await))
            }
            ("DELETE", Target::Hero(id)) => Ok(empty_or_error(self.store.delete_hero(id).await)),
            (method, _) => Ok(ApiResponse::new(
                StatusCode::METHOD_NOT_ALLOWED,
                format!("{method} not allowed on {}", request.path),
            )),
        }
    }

    async fn query_collection(&self, request: &ApiRequest) -> HeroStoreResult<ApiResponse> {
        let heroes: HeroStoreResult<Vec<Hero>> = if let Some(id) = request.query_value("id") {
            match id.parse::<HeroId>() {
                Ok(id) => self.store.find_hero(id).await.map(|hero| hero.into_iter().collect()),
                Err(_) => Ok(Vec::new()),
            }
        } else if let Some(name) = request.query_value("name") {
            self.store.search_heroes(name).await
        } else {
            self.store.list_heroes().await
        };
        match heroes {
            Ok(heroes) => json_response(StatusCode::OK, &heroes),
            Err(error) => Ok(store_error_response(error)),
        }
    }
}

#[async_trait]
impl HeroApiTransport for MockHeroApi {
    async fn send(&self, request: ApiRequest) -> HeroStoreResult<ApiResponse> {
        {
            let mut state = self.lock();
            state.requests.push(request.clone());
            if let Some(message) = state.queued_failures.pop_front() {
                return Err(HeroStoreError::Transport(message));
            }
            if state.offline {
                return Err(HeroStoreError::Transport(
                    "mock hero api is offline".to_string(),
                ));
            }
        }
        self.route(&request).await
    }
}

fn parse_body<D: serde::de::DeserializeOwned>(request: &ApiRequest) -> Result<D, ApiResponse> {
    let body = request.body.clone().unwrap_or(Value::Null);
    serde_json::from_value(body).map_err(|err| {
        ApiResponse::new(StatusCode::BAD_REQUEST, format!("invalid hero body: {err}"))
    })
}

fn json_response<S: serde::Serialize>(
    status: StatusCode,
    value: &S,
) -> HeroStoreResult<ApiResponse> {
    let body = serde_json::to_value(value)
        .map_err(|err| HeroStoreError::Serialization(format!("mock encode failed: {err}")))?;
    Ok(ApiResponse::json(status, &body))
}

fn hero_not_found(id: HeroId) -> ApiResponse {
    ApiResponse::new(StatusCode::NOT_FOUND, format!("hero {id} not found"))
}

fn empty_or_error(result: HeroStoreResult<()>) -> ApiResponse {
    match result {
        Ok(()) => ApiResponse::empty(StatusCode::NO_CONTENT),
        Err(error) => store_error_response(error),
    }
}

fn store_error_response(error: HeroStoreError) -> ApiResponse {
    match error {
        HeroStoreError::NotFound { id, .. } => {
            ApiResponse::new(StatusCode::NOT_FOUND, format!("hero {id} not found"))
        }
        HeroStoreError::InvalidInput(message) => ApiResponse::new(StatusCode::BAD_REQUEST, message),
        other => ApiResponse::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    #[tokio::test(flavor = "current_thread")]
    async fn get_collection_with_id_filter_expected_zero_or_one_element_array() {
        let api = MockHeroApi::with_fixture();

        let found = api
            .send(ApiRequest::get("api/heroes/").with_query("id", "12"))
            .await
            .expect("send should succeed");
        assert_eq!(found.status, StatusCode::OK);
        assert_eq!(found.body, r#"[{"id":12,"name":"Narco"}]"#);

        let missing = api
            .send(ApiRequest::get("api/heroes/").with_query("id", "99"))
            .await
            .expect("send should succeed");
        assert_eq!(missing.body, "[]");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn get_unknown_hero_path_expected_404() {
        let api = MockHeroApi::with_fixture();
        let response = api
            .send(ApiRequest::get("api/heroes/99"))
            .await
            .expect("send should succeed");
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn post_without_body_expected_bad_request() {
        let api = MockHeroApi::new();
        let response = api
            .send(ApiRequest::new(Method::POST, "api/heroes"))
            .await
            .expect("send should succeed");
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn other_collection_path_expected_404() {
        let api = MockHeroApi::with_fixture();
        let response = api
            .send(ApiRequest::get("api/heroesx"))
            .await
            .expect("send should succeed");
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn fail_next_expected_single_transport_failure_and_recorded_request() {
        let api = MockHeroApi::with_fixture();
        api.fail_next("connection reset");

        let error = api
            .send(ApiRequest::get("api/heroes"))
            .await
            .expect_err("first send should fail");
        assert_eq!(error.to_string(), "transport failure: connection reset");
        assert!(api.send(ApiRequest::get("api/heroes")).await.is_ok());
        assert_eq!(api.requests().len(), 2);
    }
}
