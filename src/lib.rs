#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod api;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod selection;
pub mod ui;

pub use api::ApiClient;
pub use catalog::{Catalog, GameInfo, LocationInfo, ServerConfig};
pub use checkout::{CheckoutFlow, CheckoutOutcome, CheckoutResolver, Navigator, Notifier};
pub use config::Config;
pub use error::{GamehostError, Result};
pub use selection::{BillingPlan, PerformanceTier, Selection, SelectionSeed, SelectionState};
