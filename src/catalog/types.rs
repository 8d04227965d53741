use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A game offered for hosting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    pub id: String,
    pub name: String,
    #[serde(alias = "min_players")]
    pub min_players: u32,
    #[serde(alias = "max_players")]
    pub max_players: u32,
    #[serde(default, alias = "min_mods")]
    pub min_mods: u32,
    #[serde(default, alias = "max_mods")]
    pub max_mods: u32,
    #[serde(
        default,
        alias = "imageUrl",
        alias = "image_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    #[serde(
        default,
        alias = "server_config",
        skip_serializing_if = "Option::is_none"
    )]
    pub server_config: Option<ServerConfig>,
}

impl GameInfo {
    /// `max_mods == 0` means the game cannot be modded.
    pub fn supports_mods(&self) -> bool {
        self.max_mods > 0
    }

    pub fn clamp_players(&self, players: u32) -> u32 {
        players.clamp(self.min_players, self.max_players)
    }

    pub fn players_in_range(&self, players: u32) -> bool {
        (self.min_players..=self.max_players).contains(&players)
    }

    pub fn mod_count_allowed(&self, count: usize) -> bool {
        if self.supports_mods() {
            let count = u32::try_from(count).unwrap_or(u32::MAX);
            (self.min_mods..=self.max_mods).contains(&count)
        } else {
            count == 0
        }
    }

    /// Match on id or display name, ignoring ASCII case.
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.trim();
        self.id.eq_ignore_ascii_case(name) || self.name.eq_ignore_ascii_case(name)
    }
}

/// Per-game server sizing and pricing hints. Carried through untouched;
/// keys not modelled here are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, alias = "ram_per_player", skip_serializing_if = "Option::is_none")]
    pub ram_per_player: Option<f64>,
    #[serde(default, alias = "cpu_per_player", skip_serializing_if = "Option::is_none")]
    pub cpu_per_player: Option<f64>,
    #[serde(default, alias = "price_id", skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A datacenter region a server can be placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "ping", skip_serializing_if = "Option::is_none")]
    pub latency: Option<String>,
}
