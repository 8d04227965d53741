use crate::app::wizard;
use crate::cli::{Cli, Commands};
use anyhow::{Context, Result, bail};
use gamehost::checkout::{CheckoutFlow, CheckoutOutcome, CheckoutResolver, Navigator};
use gamehost::ui::render::{game_line, location_line, print_bullet};
use gamehost::ui::{BrowserNavigator, ConsoleNotifier, PrintNavigator, style};
use gamehost::{ApiClient, Catalog, Config, SelectionSeed, SelectionState};
use std::sync::Arc;
use tracing::info;

/// Config for `command`. `init` gets defaults at the usual path without
/// reading the file, so it can replace one that no longer parses.
pub fn startup_config(command: &Commands) -> Result<Config> {
    match command {
        Commands::Init { .. } => Ok(Config {
            config_path: Config::default_path()?,
            ..Config::default()
        }),
        _ => Config::load_or_default(),
    }
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Init { force } => init_config(&config, force),

        Commands::Games { game } => {
            let catalog = load_catalog(&config, game.as_deref()).await?;
            println!("  {}", style::header("Games"));
            for g in catalog.games() {
                print_bullet(&game_line(g));
            }
            Ok(())
        }

        Commands::Locations => {
            let catalog = load_catalog(&config, None).await?;
            println!("  {}", style::header("Locations"));
            if catalog.locations().is_empty() {
                print_bullet(&style::dim("none available"));
            }
            for l in catalog.locations() {
                print_bullet(&location_line(l));
            }
            Ok(())
        }

        Commands::Configure {
            game,
            route,
            no_open,
        } => {
            let mut seed = match (route, game) {
                (Some(route), _) => SelectionSeed::from_route(&route),
                (None, Some(game)) => SelectionSeed::for_game(game),
                (None, None) => SelectionSeed::default(),
            };
            apply_config_defaults(&mut seed, &config);

            let catalog = load_catalog(&config, seed.game.as_deref()).await?;
            let mut state = SelectionState::with_seed(Arc::new(catalog), &seed);
            let flow = checkout_flow(&config)?;
            let navigator = navigator(no_open);

            match wizard::run(&mut state, &flow, navigator.as_ref(), &ConsoleNotifier).await? {
                Some(CheckoutOutcome::Redirected(_)) => Ok(()),
                Some(CheckoutOutcome::Failed) => bail!("checkout did not complete"),
                None => {
                    print_bullet(&style::dim("Nothing was ordered."));
                    Ok(())
                }
            }
        }

        Commands::Checkout {
            game,
            players,
            location,
            mods,
            plan,
            tier,
            no_open,
        } => {
            let mut seed = SelectionSeed {
                game: Some(game),
                plan,
                tier,
            };
            apply_config_defaults(&mut seed, &config);
            let request = CheckoutRequest {
                players,
                location,
                mods,
            };

            let catalog = load_catalog(&config, seed.game.as_deref()).await?;
            let state = build_selection(Arc::new(catalog), &seed, request)?;
            let flow = checkout_flow(&config)?;
            let navigator = navigator(no_open);

            match flow
                .submit(&state, navigator.as_ref(), &ConsoleNotifier)
                .await
            {
                CheckoutOutcome::Redirected(_) => Ok(()),
                CheckoutOutcome::Failed => bail!("checkout did not complete"),
            }
        }
    }
}

/// Command-line choices applied on top of a seeded selection.
struct CheckoutRequest {
    players: Option<u32>,
    location: Option<String>,
    mods: Vec<String>,
}

fn build_selection(
    catalog: Arc<Catalog>,
    seed: &SelectionSeed,
    request: CheckoutRequest,
) -> Result<SelectionState> {
    let wanted = seed.game.as_deref().unwrap_or_default();
    let game_id = catalog
        .find_game(wanted)
        .map(|g| g.id.clone())
        .with_context(|| format!("game '{wanted}' is not in the catalog"))?;
    let location_id = match request.location.as_deref() {
        Some(name) => Some(
            catalog
                .find_location(name)
                .map(|l| l.id.clone())
                .with_context(|| format!("location '{name}' is not available"))?,
        ),
        None => None,
    };

    let mut state = SelectionState::with_seed(catalog, seed);
    state.set_game(&game_id)?;
    if let Some(id) = location_id {
        state.set_location(&id)?;
    }
    if let Some(players) = request.players {
        state.set_players(players);
        if state.players() != players {
            print_bullet(&style::dim(format!(
                "Player count adjusted to {} to fit the game's limits.",
                state.players()
            )));
        }
    }
    for name in &request.mods {
        if !state.add_mod(name) {
            print_bullet(&style::dim(format!("Skipped mod '{name}'.")));
        }
    }
    Ok(state)
}

fn apply_config_defaults(seed: &mut SelectionSeed, config: &Config) {
    seed.plan.get_or_insert(config.defaults.plan);
    seed.tier.get_or_insert(config.defaults.tier);
}

async fn load_catalog(config: &Config, game: Option<&str>) -> Result<Catalog> {
    let client = ApiClient::new(&config.api.base_url, &config.http)?;
    gamehost::catalog::load(&client, game)
        .await
        .context("Could not load the game catalog")
}

fn checkout_flow(config: &Config) -> Result<CheckoutFlow> {
    let client = ApiClient::new(&config.api.checkout_url, &config.http)?;
    Ok(CheckoutFlow::new(CheckoutResolver::new(client)))
}

fn navigator(no_open: bool) -> Box<dyn Navigator> {
    if no_open {
        Box::new(PrintNavigator)
    } else {
        Box::new(BrowserNavigator)
    }
}

fn init_config(config: &Config, force: bool) -> Result<()> {
    let fresh = Config::write_default(&config.config_path, force)?;
    info!(path = %fresh.config_path.display(), "config.written");
    println!(
        "  {} {}",
        style::success("Config written to"),
        style::value(fresh.config_path.display())
    );
    Ok(())
}
