pub mod navigate;
pub mod render;
pub mod style;

pub use navigate::{BrowserNavigator, ConsoleNotifier, PrintNavigator};
