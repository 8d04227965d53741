use clap::{Parser, Subcommand};
use gamehost::{BillingPlan, PerformanceTier};

/// `gamehost` - configure a game server and jump straight to checkout.
#[derive(Parser, Debug)]
#[command(name = "gamehost")]
#[command(version)]
#[command(about = "Configure a hosted game server and open its checkout page.", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default config file to ~/.gamehost/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// List the games available for hosting
    Games {
        /// Only ask the API for this game
        #[arg(long)]
        game: Option<String>,
    },

    /// List the datacenter locations
    Locations,

    /// Walk through an interactive configuration, then check out
    Configure {
        /// Preselect a game by id or name
        #[arg(long)]
        game: Option<String>,

        /// Preselect from a deep link such as /games/minecraft/premium
        #[arg(long, conflicts_with = "game")]
        route: Option<String>,

        /// Print the checkout link instead of opening a browser
        #[arg(long)]
        no_open: bool,
    },

    /// Check out a configuration given entirely on the command line
    Checkout {
        /// Game id or name
        #[arg(long)]
        game: String,

        /// Player slots (clamped to the game's limits)
        #[arg(short, long)]
        players: Option<u32>,

        /// Location id or name (default: first location)
        #[arg(short, long)]
        location: Option<String>,

        /// Mod to install; repeat for several
        #[arg(long = "mod", value_name = "NAME")]
        mods: Vec<String>,

        /// Billing period (monthly, quarterly, semiannual, annual)
        #[arg(long, value_parser = parse_plan)]
        plan: Option<BillingPlan>,

        /// Performance tier (budget, standard, premium)
        #[arg(long, value_parser = parse_tier)]
        tier: Option<PerformanceTier>,

        /// Print the checkout link instead of opening a browser
        #[arg(long)]
        no_open: bool,
    },
}

fn parse_plan(s: &str) -> Result<BillingPlan, String> {
    s.parse()
        .map_err(|_| format!("unknown plan '{s}' (monthly, quarterly, semiannual, annual)"))
}

fn parse_tier(s: &str) -> Result<PerformanceTier, String> {
    s.parse()
        .map_err(|_| format!("unknown tier '{s}' (budget, standard, premium)"))
}
