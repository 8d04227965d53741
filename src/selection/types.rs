use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::warn;

/// Billing period of the hosting contract.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BillingPlan {
    #[default]
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl BillingPlan {
    pub fn months(self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::Semiannual => 6,
            Self::Annual => 12,
        }
    }
}

/// Performance/pricing bucket, independent of the billing period.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PerformanceTier {
    Budget,
    #[default]
    Standard,
    Premium,
}

/// The visitor's current choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub game_id: Option<String>,
    pub players: u32,
    pub location_id: Option<String>,
    pub mods: Vec<String>,
    pub plan: BillingPlan,
    pub tier: PerformanceTier,
}

/// Starting hints for a fresh selection, e.g. from a `/games/<name>/<plan>`
/// deep link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSeed {
    pub game: Option<String>,
    pub plan: Option<BillingPlan>,
    pub tier: Option<PerformanceTier>,
}

impl SelectionSeed {
    pub fn for_game(name: impl Into<String>) -> Self {
        Self {
            game: Some(name.into()),
            ..Self::default()
        }
    }

    /// Parse `/games/<name>[/<plan-or-tier>]`. The leading `games` segment
    /// is optional. An unrecognised trailing segment is ignored.
    pub fn from_route(route: &str) -> Self {
        let mut segments = route
            .split(['/', '?', '#'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .peekable();

        if segments
            .peek()
            .is_some_and(|s| s.eq_ignore_ascii_case("games") || s.eq_ignore_ascii_case("game"))
        {
            segments.next();
        }

        let mut seed = Self {
            game: segments
                .next()
                .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned()),
            ..Self::default()
        };

        if let Some(segment) = segments.next() {
            seed.apply_segment(segment);
        }
        seed
    }

    fn apply_segment(&mut self, segment: &str) {
        if let Ok(plan) = segment.parse::<BillingPlan>() {
            self.plan = Some(plan);
        } else if let Ok(tier) = segment.parse::<PerformanceTier>() {
            self.tier = Some(tier);
        } else {
            warn!(segment = %segment, "selection.seed.unknown_segment");
        }
    }
}
