use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `gamehost`.
///
/// Each stage of the configure-and-checkout flow defines its own error type.
/// Library callers can match on these to decide how to report a failure;
/// the CLI edge continues to use `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum GamehostError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Remote API transport ────────────────────────────────────────────
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),

    // ── Catalog normalization ───────────────────────────────────────────
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),

    // ── Selection rules ─────────────────────────────────────────────────
    #[error("selection: {0}")]
    Validation(#[from] ValidationError),

    // ── Checkout link resolution ────────────────────────────────────────
    #[error("checkout: {0}")]
    Checkout(#[from] CheckoutError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Fetch errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {path} failed with HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("request to {path} failed: {message}")]
    Transport { path: String, message: String },

    #[error("response from {path} is not valid JSON: {message}")]
    Decode { path: String, message: String },

    #[error("response from {path} was rejected by the API: {message}")]
    Rejected { path: String, message: String },

    #[error("response from {path} is malformed: {message}")]
    Malformed { path: String, message: String },
}

impl FetchError {
    /// HTTP status of the failed call, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ─── Catalog errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no games available")]
    Empty,

    #[error("malformed {what}: {message}")]
    Malformed { what: &'static str, message: String },
}

// ─── Validation errors ──────────────────────────────────────────────────────

/// A selection rule violated before checkout. Variants name the offending
/// field; `field()` gives the stable field name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please select a game")]
    NoGame,

    #[error("unknown game: {0}")]
    UnknownGame(String),

    #[error("player count {players} must be between {min} and {max}")]
    PlayersOutOfRange { players: u32, min: u32, max: u32 },

    #[error("please select a location")]
    NoLocation,

    #[error("unknown location: {0}")]
    UnknownLocation(String),

    #[error("{game} does not support mods")]
    ModsUnsupported { game: String },

    #[error("mod count {count} must be between {min} and {max}")]
    ModsOutOfRange { count: usize, min: u32, max: u32 },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::NoGame | Self::UnknownGame(_) => "game",
            Self::PlayersOutOfRange { .. } => "players",
            Self::NoLocation | Self::UnknownLocation(_) => "location",
            Self::ModsUnsupported { .. } | Self::ModsOutOfRange { .. } => "mods",
        }
    }
}

// ─── Checkout errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("checkout response did not contain a redirect link")]
    NoRedirectUrl,

    #[error("checkout returned an unusable redirect link: {0}")]
    InvalidRedirectUrl(String),

    #[error("a checkout request is already in progress")]
    InProgress,

    #[error("could not open checkout page: {0}")]
    Navigation(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, GamehostError>;
