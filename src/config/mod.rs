pub mod schema;

pub use schema::{
    ApiConfig, Config, DEFAULT_API_BASE_URL, DEFAULT_CHECKOUT_URL, DefaultsConfig, HttpConfig,
    ObservabilityConfig,
};
