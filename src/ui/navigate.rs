use super::style;
use crate::checkout::{Navigator, Notifier};
use crate::error::CheckoutError;
use std::process::{Command, Stdio};
use tracing::debug;
use url::Url;

/// Opens the checkout page in the system browser, printing the link too so
/// it is never lost if no browser is available.
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &Url) -> Result<(), CheckoutError> {
        println!("  {} {}", style::success("Checkout ready:"), style::url(url));
        let mut cmd = opener_command(url.as_str());
        match cmd.stdout(Stdio::null()).stderr(Stdio::null()).spawn() {
            Ok(_) => Ok(()),
            Err(e) => {
                debug!(error = %e, "navigate.opener_unavailable");
                println!("  {}", style::dim("Open the link above in your browser to finish."));
                Ok(())
            }
        }
    }
}

/// Only prints the checkout link.
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, url: &Url) -> Result<(), CheckoutError> {
        println!("{url}");
        Ok(())
    }
}

/// Prints alerts to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!();
        eprintln!("  {} {message}", style::error("✗"));
        eprintln!();
    }
}

fn opener_command(target: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(target);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", target]);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(target);
        cmd
    }
}
