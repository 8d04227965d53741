#![allow(dead_code)]

use std::sync::Mutex;

use gamehost::checkout::{CheckoutFlow, CheckoutResolver, Navigator, Notifier};
use gamehost::config::HttpConfig;
use gamehost::error::CheckoutError;
use gamehost::ApiClient;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), &HttpConfig::default()).expect("mock server URI is valid")
}

pub fn checkout_flow(server: &MockServer) -> CheckoutFlow {
    CheckoutFlow::new(CheckoutResolver::new(client(server)))
}

pub fn single_game() -> Value {
    json!({
        "id": "ark",
        "name": "ARK: Survival Evolved",
        "minPlayers": 2,
        "maxPlayers": 20,
        "minMods": 0,
        "maxMods": 0,
        "serverConfig": {"ramPerPlayer": 0.5, "priceId": "price_ark"}
    })
}

pub fn moddable_games() -> Value {
    json!([
        {"id": "mc", "name": "Minecraft", "minPlayers": 1, "maxPlayers": 50, "maxMods": 5},
        {"id": "ark", "name": "ARK: Survival Evolved", "minPlayers": 2, "maxPlayers": 20}
    ])
}

pub fn one_location() -> Value {
    json!([{"id": "fra", "name": "Frankfurt", "latency": "12ms"}])
}

pub async fn mount_catalog(server: &MockServer, games: Value, locations: Value) {
    Mock::given(method("GET"))
        .and(query_param("handler", "pulldata"))
        .and(query_param("file", "games.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(games))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("handler", "pulldata"))
        .and(query_param("file", "locations.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(locations))
        .mount(server)
        .await;
}

/// Records every navigation instead of opening anything.
#[derive(Default)]
pub struct RecordingNavigator {
    pub visited: Mutex<Vec<Url>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &Url) -> Result<(), CheckoutError> {
        self.visited.lock().unwrap().push(url.clone());
        Ok(())
    }
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<Url> {
        self.visited.lock().unwrap().clone()
    }
}

/// Records alert messages.
#[derive(Default)]
pub struct RecordingNotifier {
    pub alerts: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}
