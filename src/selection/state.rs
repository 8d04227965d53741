use super::types::{BillingPlan, PerformanceTier, Selection, SelectionSeed};
use crate::catalog::{Catalog, GameInfo, LocationInfo};
use crate::error::ValidationError;
use std::sync::Arc;
use tracing::{debug, warn};

/// A [`Selection`] bound to the catalog it was made from.
///
/// Every mutation re-establishes the range rules: players inside the
/// selected game's bounds, mods unique and never above `max_mods`.
#[derive(Debug, Clone)]
pub struct SelectionState {
    catalog: Arc<Catalog>,
    selection: Selection,
}

impl SelectionState {
    /// Start from the first game and location, minimum players, no mods.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_seed(catalog, &SelectionSeed::default())
    }

    pub fn with_seed(catalog: Arc<Catalog>, seed: &SelectionSeed) -> Self {
        let game = seed
            .game
            .as_deref()
            .and_then(|name| {
                let found = catalog.find_game(name);
                if found.is_none() {
                    warn!(game = %name, "selection.seed.unknown_game");
                }
                found
            })
            .unwrap_or_else(|| catalog.default_game());

        let selection = Selection {
            game_id: Some(game.id.clone()),
            players: game.min_players,
            location_id: catalog.default_location().map(|l| l.id.clone()),
            mods: Vec::new(),
            plan: seed.plan.unwrap_or_default(),
            tier: seed.tier.unwrap_or_default(),
        };

        Self { catalog, selection }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn game(&self) -> Option<&GameInfo> {
        self.selection
            .game_id
            .as_deref()
            .and_then(|id| self.catalog.game(id))
    }

    pub fn location(&self) -> Option<&LocationInfo> {
        self.selection
            .location_id
            .as_deref()
            .and_then(|id| self.catalog.location(id))
    }

    pub fn players(&self) -> u32 {
        self.selection.players
    }

    pub fn mods(&self) -> &[String] {
        &self.selection.mods
    }

    pub fn set_game(&mut self, id: &str) -> Result<(), ValidationError> {
        let game = self
            .catalog
            .game(id)
            .ok_or_else(|| ValidationError::UnknownGame(id.to_string()))?;

        let players = game.clamp_players(self.selection.players);
        if players != self.selection.players {
            debug!(game = %game.id, from = self.selection.players, to = players, "selection.players.clamped");
        }
        let max_mods = usize::try_from(game.max_mods).unwrap_or(usize::MAX);
        if self.selection.mods.len() > max_mods {
            debug!(game = %game.id, dropped = self.selection.mods.len() - max_mods, "selection.mods.truncated");
            self.selection.mods.truncate(max_mods);
        }

        self.selection.players = players;
        self.selection.game_id = Some(game.id.clone());
        Ok(())
    }

    /// Stores `players` clamped into the selected game's bounds.
    pub fn set_players(&mut self, players: u32) {
        self.selection.players = match self.game() {
            Some(game) => game.clamp_players(players),
            None => players,
        };
    }

    pub fn set_location(&mut self, id: &str) -> Result<(), ValidationError> {
        let location = self
            .catalog
            .location(id)
            .ok_or_else(|| ValidationError::UnknownLocation(id.to_string()))?;
        self.selection.location_id = Some(location.id.clone());
        Ok(())
    }

    /// Append a mod. Returns `false` without changing anything when the
    /// name is blank, already present, or the game's mod limit is reached.
    pub fn add_mod(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.selection.mods.iter().any(|m| m == name) {
            return false;
        }
        let max_mods = self.game().map_or(0, |g| g.max_mods);
        if u32::try_from(self.selection.mods.len()).unwrap_or(u32::MAX) >= max_mods {
            return false;
        }
        self.selection.mods.push(name.to_string());
        true
    }

    /// Remove the mod at `index`, if there is one.
    pub fn remove_mod(&mut self, index: usize) -> Option<String> {
        (index < self.selection.mods.len()).then(|| self.selection.mods.remove(index))
    }

    pub fn set_billing_plan(&mut self, plan: BillingPlan) {
        self.selection.plan = plan;
    }

    pub fn set_performance_tier(&mut self, tier: PerformanceTier) {
        self.selection.tier = tier;
    }

    /// First rule the selection breaks, checked as game, players, location,
    /// mods.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let game = match self.selection.game_id.as_deref() {
            None => return Err(ValidationError::NoGame),
            Some(id) => self
                .catalog
                .game(id)
                .ok_or_else(|| ValidationError::UnknownGame(id.to_string()))?,
        };

        if !game.players_in_range(self.selection.players) {
            return Err(ValidationError::PlayersOutOfRange {
                players: self.selection.players,
                min: game.min_players,
                max: game.max_players,
            });
        }

        match self.selection.location_id.as_deref() {
            None => return Err(ValidationError::NoLocation),
            Some(id) if self.catalog.location(id).is_none() => {
                return Err(ValidationError::UnknownLocation(id.to_string()));
            }
            Some(_) => {}
        }

        let count = self.selection.mods.len();
        if !game.mod_count_allowed(count) {
            if !game.supports_mods() {
                return Err(ValidationError::ModsUnsupported {
                    game: game.name.clone(),
                });
            }
            return Err(ValidationError::ModsOutOfRange {
                count,
                min: game.min_mods,
                max: game.max_mods,
            });
        }

        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    #[cfg(test)]
    pub(crate) fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }
}
