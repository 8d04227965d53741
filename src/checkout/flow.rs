use super::resolver::CheckoutResolver;
use crate::error::{CheckoutError, GamehostError};
use crate::selection::SelectionState;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};
use url::Url;

const FALLBACK_ALERT: &str = "Something went wrong while preparing your checkout. Please try again.";

/// Where a resolved checkout URL is sent. Navigation ends the flow.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &Url) -> Result<(), CheckoutError>;
}

/// Blocking, user-facing error notification.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Redirected(Url),
    Failed,
}

/// Checkout with a busy flag so one selection cannot be submitted twice
/// at the same time.
#[derive(Debug)]
pub struct CheckoutFlow {
    resolver: CheckoutResolver,
    busy: AtomicBool,
}

impl CheckoutFlow {
    pub fn new(resolver: CheckoutResolver) -> Self {
        Self {
            resolver,
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Resolve the checkout URL while holding the busy flag.
    pub async fn try_submit(&self, state: &SelectionState) -> Result<Url, GamehostError> {
        let _busy = BusyGuard::acquire(&self.busy)?;
        self.resolver.resolve(state).await
    }

    /// Resolve, then navigate. Every failure is reported through `notifier`
    /// and leaves the selection as it was, so the visitor can retry.
    pub async fn submit(
        &self,
        state: &SelectionState,
        navigator: &dyn Navigator,
        notifier: &dyn Notifier,
    ) -> CheckoutOutcome {
        let result = match self.try_submit(state).await {
            Ok(url) => navigator
                .navigate(&url)
                .map(|()| url)
                .map_err(GamehostError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(url) => {
                info!(url = %url, "checkout.redirected");
                CheckoutOutcome::Redirected(url)
            }
            Err(e) => {
                warn!(error = %e, "checkout.failed");
                notifier.alert(&alert_message(&e));
                CheckoutOutcome::Failed
            }
        }
    }
}

/// Text shown to the visitor for a failed checkout.
pub fn alert_message(err: &GamehostError) -> String {
    let message = match err {
        GamehostError::Validation(v) => v.to_string(),
        other => other.to_string(),
    };
    if message.trim().is_empty() {
        FALLBACK_ALERT.to_string()
    } else {
        message
    }
}

/// Holds the busy flag; clears it on drop, whichever way the call exits.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, CheckoutError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CheckoutError::InProgress)?;
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
