use super::harness::{client, mount_catalog, moddable_games, one_location, single_game};
use gamehost::error::{CatalogError, GamehostError};
use gamehost::{SelectionState, catalog};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn loads_wrapped_single_game_and_bare_locations() {
    let server = MockServer::start().await;
    mount_catalog(
        &server,
        json!({"ok": true, "data": single_game()}),
        one_location(),
    )
    .await;

    let cat = catalog::load(&client(&server), None).await.unwrap();
    assert_eq!(cat.games().len(), 1);
    assert_eq!(cat.default_game().id, "ark");
    assert_eq!(
        cat.default_game()
            .server_config
            .as_ref()
            .and_then(|c| c.price_id.as_deref()),
        Some("price_ark")
    );
    assert_eq!(cat.default_location().map(|l| l.id.as_str()), Some("fra"));
}

#[tokio::test]
async fn requested_game_is_forwarded_to_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("file", "games.json"))
        .and(query_param("game", "Minecraft"))
        .respond_with(ResponseTemplate::new(200).set_body_json(moddable_games()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("file", "locations.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_location()))
        .expect(1)
        .mount(&server)
        .await;

    let cat = catalog::load(&client(&server), Some("Minecraft")).await.unwrap();
    assert_eq!(cat.games().len(), 2);
}

#[tokio::test]
async fn empty_games_list_fails_initialization() {
    let server = MockServer::start().await;
    mount_catalog(&server, json!({"ok": true, "data": []}), one_location()).await;

    let err = catalog::load(&client(&server), None).await.unwrap_err();
    assert!(matches!(err, GamehostError::Catalog(CatalogError::Empty)));
}

#[tokio::test]
async fn locations_failure_fails_whole_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("file", "games.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(moddable_games()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("file", "locations.json"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = catalog::load(&client(&server), None).await.unwrap_err();
    match err {
        GamehostError::Fetch(fetch) => assert_eq!(fetch.status(), Some(502)),
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn locations_object_is_malformed() {
    let server = MockServer::start().await;
    mount_catalog(
        &server,
        moddable_games(),
        json!({"ok": true, "data": {"id": "fra", "name": "Frankfurt"}}),
    )
    .await;

    let err = catalog::load(&client(&server), None).await.unwrap_err();
    assert!(matches!(
        err,
        GamehostError::Catalog(CatalogError::Malformed { what: "locations", .. })
    ));
}

#[tokio::test]
async fn loaded_catalog_seeds_default_selection() {
    let server = MockServer::start().await;
    mount_catalog(&server, single_game(), one_location()).await;

    let cat = catalog::load(&client(&server), None).await.unwrap();
    let state = SelectionState::new(Arc::new(cat));
    assert_eq!(state.players(), 2);
    assert!(state.mods().is_empty());
    assert!(state.can_submit());
}
