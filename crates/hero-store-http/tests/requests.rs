use hero_store::{
    Hero, HeroService, HeroStore, HeroStoreError, MemoryHeroStore, MessageService, NewHero,
};
use hero_store_http::{ApiRequest, HttpHeroStore, JSON_CONTENT_TYPE, MockHeroApi};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;

fn http_service(api: &MockHeroApi) -> (HeroService<HttpHeroStore<MockHeroApi>>, MessageService) {
    let messages = MessageService::new();
    let store = HttpHeroStore::new(api.clone(), "api/heroes");
    (HeroService::new(store, Arc::new(messages.clone())), messages)
}

#[tokio::test(flavor = "current_thread")]
async fn list_heroes_expected_get_collection() {
    let api = MockHeroApi::with_fixture();
    let (service, messages) = http_service(&api);

    let heroes = service.heroes().await.expect("list should succeed");

    assert_eq!(heroes.len(), 10);
    assert_eq!(heroes[0], Hero::new(11, "Mr. Nice"));
    assert_eq!(api.requests(), vec![ApiRequest::get("api/heroes")]);
    assert_eq!(messages.messages(), vec!["HeroService: fetched heroes"]);
}

#[tokio::test(flavor = "current_thread")]
async fn find_hero_expected_id_filter_query() {
    let api = MockHeroApi::with_fixture();
    let (service, messages) = http_service(&api);

    let absent = service.find_hero(99).await.expect("find should succeed");
    let present = service.find_hero(15).await.expect("find should succeed");

    assert_eq!(absent, None);
    assert_eq!(present, Some(Hero::new(15, "Magneta")));
    assert_eq!(
        api.requests(),
        vec![
            ApiRequest::get("api/heroes/").with_query("id", "99"),
            ApiRequest::get("api/heroes/").with_query("id", "15"),
        ]
    );
    assert_eq!(
        messages.messages(),
        vec![
            "HeroService: did not find hero id=99",
            "HeroService: fetched hero id=15",
        ]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn get_hero_missing_expected_absent_not_error() {
    let api = MockHeroApi::with_fixture();
    let (service, _messages) = http_service(&api);

    assert_eq!(service.hero(99).await.expect("404 maps to None"), None);
    assert_eq!(api.requests(), vec![ApiRequest::get("api/heroes/99")]);
}

#[tokio::test(flavor = "current_thread")]
async fn search_heroes_blank_term_expected_no_request() {
    let api = MockHeroApi::with_fixture();
    let (service, messages) = http_service(&api);

    for term in ["", "   ", "\t\n"] {
        assert!(service.search_heroes(term).await.expect("blank").is_empty());
    }

    assert!(api.requests().is_empty());
    assert!(messages.is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn search_heroes_term_expected_one_name_query_and_store_results() {
    let api = MockHeroApi::with_fixture();
    let (service, _messages) = http_service(&api);

    let heroes = service.search_heroes("Ma").await.expect("search should succeed");
    let expected = api
        .store()
        .search_heroes("Ma")
        .await
        .expect("direct search should succeed");

    assert_eq!(heroes, expected);
    assert_eq!(
        api.requests(),
        vec![ApiRequest::get("api/heroes/").with_query("name", "Ma")]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn add_and_update_expected_json_bodies_with_content_type() {
    let api = MockHeroApi::with_fixture();
    let (service, _messages) = http_service(&api);

    let created = service
        .add_hero(NewHero::new("Mx"))
        .await
        .expect("add should succeed");
    service
        .update_hero(&Hero::new(created.id, "Mx2"))
        .await
        .expect("update should succeed");

    let requests = api.requests();
    assert_eq!(
        requests[0],
        ApiRequest::new(Method::POST, "api/heroes").with_json_body(json!({"name": "Mx"}))
    );
    assert_eq!(
        requests[1],
        ApiRequest::new(Method::PUT, "api/heroes")
            .with_json_body(json!({"id": 21, "name": "Mx2"}))
    );
    assert_eq!(requests[1].content_type.as_deref(), Some(JSON_CONTENT_TYPE));
}

#[tokio::test(flavor = "current_thread")]
async fn delete_by_record_and_by_id_expected_identical_requests() {
    let by_record = MockHeroApi::with_fixture();
    let by_id = MockHeroApi::with_fixture();
    let hero = Hero::new(16, "RubberMan");

    let (service, _) = http_service(&by_record);
    service.delete_hero(&hero).await.expect("delete by record");
    let (service, _) = http_service(&by_id);
    service.delete_hero(hero.id).await.expect("delete by id");

    assert_eq!(by_record.requests(), by_id.requests());
    assert_eq!(
        by_id.requests(),
        vec![ApiRequest::new(Method::DELETE, "api/heroes/16").with_json_content_type()]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn list_heroes_transport_failure_expected_empty_fallback_and_one_message() {
    let api = MockHeroApi::with_fixture();
    api.fail_next("connection refused");
    let (service, messages) = http_service(&api);

    let result = service.heroes().await;

    assert!(matches!(result, Err(HeroStoreError::Transport(_))));
    assert!(result.unwrap_or_default().is_empty());
    assert_eq!(
        messages.messages(),
        vec!["HeroService: list_heroes failed: transport failure: connection refused"]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn update_unknown_hero_expected_not_found_from_404() {
    let api = MockHeroApi::with_fixture();
    let (service, messages) = http_service(&api);

    let error = service
        .update_hero(&Hero::new(99, "Nobody"))
        .await
        .expect_err("unknown hero should fail");

    assert!(matches!(error, HeroStoreError::NotFound { resource: "hero", .. }));
    assert_eq!(
        messages.messages(),
        vec!["HeroService: update_hero failed: resource not found: hero (hero 99 not found)"]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn custom_collection_expected_requests_under_that_path() {
    let api =
        MockHeroApi::with_store(MemoryHeroStore::with_fixture()).with_collection("api/villains");
    let store = HttpHeroStore::new(api.clone(), "/api/villains/");

    let heroes = store.list_heroes().await.expect("list should succeed");

    assert_eq!(heroes.len(), 10);
    assert_eq!(api.requests(), vec![ApiRequest::get("api/villains")]);
}

#[tokio::test(flavor = "current_thread")]
async fn offline_api_every_operation_expected_transport_error() {
    let api = MockHeroApi::with_fixture();
    api.set_offline(true);
    let store = HttpHeroStore::new(api.clone(), "api/heroes");

    assert!(matches!(
        store.get_hero(11).await,
        Err(HeroStoreError::Transport(_))
    ));
    assert!(matches!(
        store.add_hero(NewHero::new("x")).await,
        Err(HeroStoreError::Transport(_))
    ));
    assert!(matches!(
        store.delete_hero(11).await,
        Err(HeroStoreError::Transport(_))
    ));

    assert_eq!(api.requests().len(), 3);

    api.set_offline(false);
    api.clear_requests();
    assert!(store.get_hero(11).await.expect("back online").is_some());
    assert_eq!(api.requests(), vec![ApiRequest::get("api/heroes/11")]);
}
