pub mod state;
pub mod types;

pub use state::SelectionState;
pub use types::{BillingPlan, PerformanceTier, Selection, SelectionSeed};
