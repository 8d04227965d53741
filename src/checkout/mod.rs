pub mod extract;
pub mod flow;
pub mod resolver;

pub use extract::{extract_link, extract_redirect};
pub use flow::{CheckoutFlow, CheckoutOutcome, Navigator, Notifier, alert_message};
pub use resolver::CheckoutResolver;
