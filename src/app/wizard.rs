use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use gamehost::checkout::{CheckoutFlow, CheckoutOutcome, Navigator, Notifier};
use gamehost::ui::render::{game_line, location_line, print_bullet, print_summary};
use gamehost::ui::style;
use gamehost::{BillingPlan, PerformanceTier, SelectionState};
use strum::IntoEnumIterator;

/// Interactive configure-and-checkout loop. Returns `None` if the visitor
/// backs out before submitting.
pub async fn run(
    state: &mut SelectionState,
    flow: &CheckoutFlow,
    navigator: &dyn Navigator,
    notifier: &dyn Notifier,
) -> Result<Option<CheckoutOutcome>> {
    loop {
        choose_game(state)?;
        choose_players(state)?;
        if !choose_location(state)? {
            notifier.alert("No server locations are available right now.");
            return Ok(Some(CheckoutOutcome::Failed));
        }
        edit_mods(state)?;
        choose_plan(state)?;
        choose_tier(state)?;

        print_summary(state);

        let proceed = Confirm::new()
            .with_prompt("  Continue to checkout?")
            .default(true)
            .interact()?;
        if !proceed {
            return Ok(None);
        }

        let outcome = flow.submit(state, navigator, notifier).await;
        if matches!(outcome, CheckoutOutcome::Redirected(_)) {
            return Ok(Some(outcome));
        }

        let retry = Confirm::new()
            .with_prompt("  Adjust the configuration and try again?")
            .default(true)
            .interact()?;
        if !retry {
            return Ok(Some(outcome));
        }
    }
}

fn choose_game(state: &mut SelectionState) -> Result<()> {
    let games = state.catalog().games();
    if games.len() == 1 {
        print_bullet(&format!("Game: {}", style::value(&games[0].name)));
        return Ok(());
    }

    let labels: Vec<String> = games.iter().map(game_line).collect();
    let current = state
        .game()
        .and_then(|g| games.iter().position(|x| x.id == g.id))
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt("  Which game do you want to host?")
        .items(&labels)
        .default(current)
        .interact()?;

    let id = games[idx].id.clone();
    state.set_game(&id)?;
    Ok(())
}

fn choose_players(state: &mut SelectionState) -> Result<()> {
    let Some(game) = state.game() else {
        return Ok(());
    };
    let (min, max) = (game.min_players, game.max_players);
    if min == max {
        state.set_players(min);
        return Ok(());
    }

    let players: u32 = Input::new()
        .with_prompt(format!("  How many player slots? ({min}–{max})"))
        .default(state.players())
        .validate_with(move |p: &u32| -> Result<(), String> {
            if (min..=max).contains(p) {
                Ok(())
            } else {
                Err(format!("choose between {min} and {max}"))
            }
        })
        .interact_text()?;
    state.set_players(players);
    Ok(())
}

/// Returns `false` when the catalog has no locations to choose from.
fn choose_location(state: &mut SelectionState) -> Result<bool> {
    let locations = state.catalog().locations();
    if locations.is_empty() {
        return Ok(false);
    }

    let labels: Vec<String> = locations.iter().map(location_line).collect();
    let current = state
        .location()
        .and_then(|l| locations.iter().position(|x| x.id == l.id))
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt("  Where should the server run?")
        .items(&labels)
        .default(current)
        .interact()?;

    let id = locations[idx].id.clone();
    state.set_location(&id)?;
    Ok(true)
}

fn edit_mods(state: &mut SelectionState) -> Result<()> {
    let Some(game) = state.game() else {
        return Ok(());
    };
    if !game.supports_mods() {
        print_bullet(&format!("{} servers run without mods.", game.name));
        return Ok(());
    }
    let (min, max) = (game.min_mods, game.max_mods);

    loop {
        let count = state.mods().len();
        print_bullet(&format!(
            "Mods ({count}/{max}, at least {min}): {}",
            if count == 0 {
                style::dim("none")
            } else {
                style::value(state.mods().join(", "))
            }
        ));

        let mut actions = Vec::new();
        if u32::try_from(count).unwrap_or(u32::MAX) < max {
            actions.push("Add a mod");
        }
        if count > 0 {
            actions.push("Remove a mod");
        }
        actions.push("Done");

        let idx = Select::new()
            .with_prompt("  Mods")
            .items(&actions)
            .default(actions.len() - 1)
            .interact()?;

        match actions[idx] {
            "Add a mod" => {
                let name: String = Input::new()
                    .with_prompt("  Mod name")
                    .allow_empty(true)
                    .interact_text()?;
                if !state.add_mod(&name) && !name.trim().is_empty() {
                    print_bullet(&style::dim("Already added."));
                }
            }
            "Remove a mod" => {
                let idx = Select::new()
                    .with_prompt("  Remove which mod?")
                    .items(state.mods())
                    .default(0)
                    .interact()?;
                state.remove_mod(idx);
            }
            _ => return Ok(()),
        }
    }
}

fn choose_plan(state: &mut SelectionState) -> Result<()> {
    let plans: Vec<BillingPlan> = BillingPlan::iter().collect();
    let current = plans
        .iter()
        .position(|p| *p == state.selection().plan)
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt("  Billing period")
        .items(&plans)
        .default(current)
        .interact()?;
    state.set_billing_plan(plans[idx]);
    Ok(())
}

fn choose_tier(state: &mut SelectionState) -> Result<()> {
    let tiers: Vec<PerformanceTier> = PerformanceTier::iter().collect();
    let current = tiers
        .iter()
        .position(|t| *t == state.selection().tier)
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt("  Performance tier")
        .items(&tiers)
        .default(current)
        .interact()?;
    state.set_performance_tier(tiers[idx]);
    Ok(())
}
