//! Plain-text views of catalog and selection data.

use super::style;
use crate::catalog::{GameInfo, LocationInfo};
use crate::selection::SelectionState;

pub fn game_line(game: &GameInfo) -> String {
    let mods = if game.supports_mods() {
        format!("mods {}–{}", game.min_mods, game.max_mods)
    } else {
        "no mods".to_string()
    };
    format!(
        "{} ({}) · players {}–{} · {}",
        game.name, game.id, game.min_players, game.max_players, mods
    )
}

pub fn location_line(location: &LocationInfo) -> String {
    match &location.latency {
        Some(latency) => format!("{} ({}) · {latency}", location.name, location.id),
        None => format!("{} ({})", location.name, location.id),
    }
}

/// Key/value rows describing the current selection.
pub fn summary_rows(state: &SelectionState) -> Vec<(&'static str, String)> {
    let sel = state.selection();
    let mods = if sel.mods.is_empty() {
        "none".to_string()
    } else {
        sel.mods.join(", ")
    };
    vec![
        ("Game", state.game().map_or_else(|| "—".into(), |g| g.name.clone())),
        ("Players", sel.players.to_string()),
        (
            "Location",
            state.location().map_or_else(|| "—".into(), |l| l.name.clone()),
        ),
        ("Mods", mods),
        ("Plan", sel.plan.to_string()),
        ("Tier", sel.tier.to_string()),
    ]
}

pub fn print_bullet(text: &str) {
    println!("  {} {}", style::accent("›"), text);
}

pub fn print_summary(state: &SelectionState) {
    println!();
    println!("  {}", style::header("Your server"));
    println!("  {}", style::dim("─".repeat(40)));
    for (key, val) in summary_rows(state) {
        println!("{}", summary_line(key, &val));
    }
    println!();
}

/// One aligned summary row. The key is padded before styling so escape
/// codes do not eat into the column width.
fn summary_line(key: &str, val: &str) -> String {
    format!("    {} {}", style::dim(format!("{key:<9}")), style::value(val))
}
