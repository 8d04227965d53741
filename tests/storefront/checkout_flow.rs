use super::harness::{
    RecordingNavigator, RecordingNotifier, checkout_flow, one_location, single_game,
};
use gamehost::checkout::CheckoutOutcome;
use gamehost::catalog::{Catalog, normalize};
use gamehost::error::{CheckoutError, GamehostError};
use gamehost::SelectionState;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ark_catalog() -> Arc<Catalog> {
    Arc::new(normalize(single_game(), one_location()).unwrap())
}

fn minecraft_catalog() -> Arc<Catalog> {
    let games = json!({"id": "mc", "name": "Minecraft", "minPlayers": 1, "maxPlayers": 50, "maxMods": 5});
    Arc::new(normalize(games, one_location()).unwrap())
}

#[tokio::test]
async fn nested_cart_link_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("handler", "buildlink"))
        .and(query_param("game", "ARK: Survival Evolved"))
        .and(query_param("players", "2"))
        .and(query_param("location", "fra"))
        .and(query_param("mods", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"ok": true, "data": {"link": {"cart-link": "https://pay.example/abc"}}}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let state = SelectionState::new(ark_catalog());
    assert!(state.can_submit());

    let flow = checkout_flow(&server);
    let navigator = RecordingNavigator::default();
    let notifier = RecordingNotifier::default();
    let outcome = flow.submit(&state, &navigator, &notifier).await;

    let expected = url::Url::parse("https://pay.example/abc").unwrap();
    assert_eq!(outcome, CheckoutOutcome::Redirected(expected.clone()));
    assert_eq!(navigator.visited(), vec![expected]);
    assert!(notifier.alerts().is_empty());
    assert!(!flow.is_busy());
}

#[tokio::test]
async fn mod_count_is_sent_instead_of_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("handler", "buildlink"))
        .and(query_param("mods", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true, "data": {"link": "https://pay.example/mods"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut state = SelectionState::new(minecraft_catalog());
    for m in ["a", "b", "c"] {
        assert!(state.add_mod(m));
    }

    let url = checkout_flow(&server).try_submit(&state).await.unwrap();
    assert_eq!(url.as_str(), "https://pay.example/mods");

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query.contains("a%2Cb"));
    assert!(!query.contains("=a&"));
}

#[tokio::test]
async fn url_field_wins_over_sibling_cart_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": {"url": "https://pay.example/y", "cart-link": "https://pay.example/z"}
        })))
        .mount(&server)
        .await;

    let state = SelectionState::new(ark_catalog());
    let url = checkout_flow(&server).try_submit(&state).await.unwrap();
    assert_eq!(url.as_str(), "https://pay.example/y");
}

#[tokio::test]
async fn server_error_is_reported_and_selection_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut state = SelectionState::new(minecraft_catalog());
    state.set_players(12);
    state.add_mod("worldedit");
    let before = state.selection().clone();

    let flow = checkout_flow(&server);
    let err = flow.try_submit(&state).await.unwrap_err();
    match err {
        GamehostError::Fetch(fetch) => assert_eq!(fetch.status(), Some(500)),
        other => panic!("expected fetch error, got {other:?}"),
    }
    assert!(!flow.is_busy());

    let navigator = RecordingNavigator::default();
    let notifier = RecordingNotifier::default();
    let outcome = flow.submit(&state, &navigator, &notifier).await;
    assert_eq!(outcome, CheckoutOutcome::Failed);
    assert!(navigator.visited().is_empty());
    assert_eq!(notifier.alerts().len(), 1);
    assert!(notifier.alerts()[0].contains("HTTP 500"));
    assert!(!flow.is_busy());
    assert_eq!(state.selection(), &before);
}

#[tokio::test]
async fn missing_link_is_checkout_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": true, "data": {"status": "queued"}})),
        )
        .mount(&server)
        .await;

    let state = SelectionState::new(ark_catalog());
    let err = checkout_flow(&server).try_submit(&state).await.unwrap_err();
    assert!(matches!(
        err,
        GamehostError::Checkout(CheckoutError::NoRedirectUrl)
    ));
}

#[tokio::test]
async fn invalid_selection_never_reaches_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let games = json!({"id": "fm", "name": "Factorio", "minPlayers": 1, "maxPlayers": 8, "minMods": 1, "maxMods": 3});
    let state = SelectionState::new(Arc::new(normalize(games, one_location()).unwrap()));

    let navigator = RecordingNavigator::default();
    let notifier = RecordingNotifier::default();
    let outcome = checkout_flow(&server)
        .submit(&state, &navigator, &notifier)
        .await;

    assert_eq!(outcome, CheckoutOutcome::Failed);
    assert_eq!(
        notifier.alerts(),
        vec!["mod count 0 must be between 1 and 3".to_string()]
    );
}

#[tokio::test]
async fn rejected_envelope_surfaces_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": false, "error": "location is full"})),
        )
        .mount(&server)
        .await;

    let state = SelectionState::new(ark_catalog());
    let notifier = RecordingNotifier::default();
    let outcome = checkout_flow(&server)
        .submit(&state, &RecordingNavigator::default(), &notifier)
        .await;
    assert_eq!(outcome, CheckoutOutcome::Failed);
    assert!(notifier.alerts()[0].contains("location is full"));
}

#[tokio::test]
async fn concurrent_submit_sends_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("handler", "buildlink"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true, "data": {"link": "https://pay.example/once"}}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let state = SelectionState::new(ark_catalog());
    let flow = checkout_flow(&server);
    let (first, second) = tokio::join!(flow.try_submit(&state), flow.try_submit(&state));

    assert_eq!(first.unwrap().as_str(), "https://pay.example/once");
    assert!(matches!(
        second,
        Err(GamehostError::Checkout(CheckoutError::InProgress))
    ));
    assert!(!flow.is_busy());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
