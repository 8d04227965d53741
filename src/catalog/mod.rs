//! Game and location catalog: fetching, shape coercion and validation.

pub mod types;

pub use types::{GameInfo, LocationInfo, ServerConfig};

use crate::api::ApiClient;
use crate::error::{CatalogError, GamehostError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info};

const GAMES_FILE: &str = "games.json";
const LOCATIONS_FILE: &str = "locations.json";

/// Validated reference data for one page load. Always holds at least one game.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    games: Vec<GameInfo>,
    locations: Vec<LocationInfo>,
}

impl Catalog {
    pub fn games(&self) -> &[GameInfo] {
        &self.games
    }

    pub fn locations(&self) -> &[LocationInfo] {
        &self.locations
    }

    pub fn default_game(&self) -> &GameInfo {
        &self.games[0]
    }

    pub fn default_location(&self) -> Option<&LocationInfo> {
        self.locations.first()
    }

    pub fn game(&self, id: &str) -> Option<&GameInfo> {
        self.games.iter().find(|g| g.id == id)
    }

    /// Look a game up the way a visitor would type it: id or display name.
    pub fn find_game(&self, name: &str) -> Option<&GameInfo> {
        self.game(name)
            .or_else(|| self.games.iter().find(|g| g.matches_name(name)))
    }

    pub fn location(&self, id: &str) -> Option<&LocationInfo> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn find_location(&self, name: &str) -> Option<&LocationInfo> {
        let name = name.trim();
        self.location(name).or_else(|| {
            self.locations
                .iter()
                .find(|l| l.id.eq_ignore_ascii_case(name) || l.name.eq_ignore_ascii_case(name))
        })
    }
}

/// Turn raw `games.json` / `locations.json` payloads into a [`Catalog`].
///
/// A single game object is accepted as a one-element list.
pub fn normalize(games: Value, locations: Value) -> Result<Catalog, CatalogError> {
    let raw_games = match games {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        obj @ Value::Object(_) => vec![obj],
        other => {
            return Err(CatalogError::Malformed {
                what: "games",
                message: format!("expected an object or a list, got {}", kind(&other)),
            });
        }
    };
    if raw_games.is_empty() {
        return Err(CatalogError::Empty);
    }

    let raw_locations = match locations {
        Value::Array(items) => items,
        other => {
            return Err(CatalogError::Malformed {
                what: "locations",
                message: format!("expected a list, got {}", kind(&other)),
            });
        }
    };

    let games: Vec<GameInfo> = decode_all("game", raw_games)?;
    for g in &games {
        if g.min_players > g.max_players {
            return Err(CatalogError::Malformed {
                what: "game",
                message: format!(
                    "{}: minPlayers {} exceeds maxPlayers {}",
                    g.id, g.min_players, g.max_players
                ),
            });
        }
        if g.min_mods > g.max_mods {
            return Err(CatalogError::Malformed {
                what: "game",
                message: format!(
                    "{}: minMods {} exceeds maxMods {}",
                    g.id, g.min_mods, g.max_mods
                ),
            });
        }
    }
    ensure_unique("game", games.iter().map(|g| g.id.as_str()))?;

    let locations: Vec<LocationInfo> = decode_all("location", raw_locations)?;
    ensure_unique("location", locations.iter().map(|l| l.id.as_str()))?;

    debug!(
        games = games.len(),
        locations = locations.len(),
        "catalog.normalized"
    );
    Ok(Catalog { games, locations })
}

/// Fetch games and locations concurrently and normalize them.
///
/// Either fetch failing fails the whole load.
pub async fn load(client: &ApiClient, requested_game: Option<&str>) -> Result<Catalog, GamehostError> {
    let mut games_query = vec![
        ("handler", "pulldata".to_string()),
        ("file", GAMES_FILE.to_string()),
    ];
    if let Some(name) = requested_game.map(str::trim).filter(|n| !n.is_empty()) {
        games_query.push(("game", name.to_string()));
    }
    let locations_query = [
        ("handler", "pulldata".to_string()),
        ("file", LOCATIONS_FILE.to_string()),
    ];

    let (games, locations) = tokio::try_join!(
        client.get_json("/", &games_query),
        client.get_json("/", &locations_query),
    )?;

    let catalog = normalize(games, locations)?;
    info!(
        games = catalog.games().len(),
        locations = catalog.locations().len(),
        requested = requested_game.unwrap_or(""),
        "catalog.loaded"
    );
    Ok(catalog)
}

fn decode_all<T: DeserializeOwned>(
    what: &'static str,
    raw: Vec<Value>,
) -> Result<Vec<T>, CatalogError> {
    raw.into_iter()
        .enumerate()
        .map(|(i, v)| {
            serde_json::from_value(v).map_err(|e| CatalogError::Malformed {
                what,
                message: format!("entry {i}: {e}"),
            })
        })
        .collect()
}

fn ensure_unique<'a>(
    what: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::Malformed {
                what,
                message: format!("duplicate id {id}"),
            });
        }
    }
    Ok(())
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
