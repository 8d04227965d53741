//! Redirect-link extraction from a build-link payload.
//!
//! The provider's response shape is not pinned down, so the lookup is an
//! ordered fallback chain:
//!
//! 1. first truthy of `link`, `url`, then the payload itself;
//! 2. a string is taken as-is; an object yields the first truthy of
//!    `cart-link`, `cart_link`.
//!
// TODO: replace the chain with a single typed response once the provider
// publishes its build-link schema.

use crate::error::CheckoutError;
use serde_json::Value;
use url::Url;

const OUTER_KEYS: [&str; 2] = ["link", "url"];
const CART_KEYS: [&str; 2] = ["cart-link", "cart_link"];

/// Pull the raw redirect string out of `payload`.
pub fn extract_link(payload: &Value) -> Result<&str, CheckoutError> {
    let resolved = first_truthy(payload, &OUTER_KEYS).unwrap_or(payload);

    let link = match resolved {
        Value::String(s) => Some(s.as_str()),
        Value::Object(_) => first_truthy(resolved, &CART_KEYS).and_then(Value::as_str),
        _ => None,
    };

    link.map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(CheckoutError::NoRedirectUrl)
}

/// Extract and validate the redirect as an absolute http(s) URL.
pub fn extract_redirect(payload: &Value) -> Result<Url, CheckoutError> {
    let raw = extract_link(payload)?;
    let url = Url::parse(raw).map_err(|_| CheckoutError::InvalidRedirectUrl(raw.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CheckoutError::InvalidRedirectUrl(raw.to_string()));
    }
    Ok(url)
}

fn first_truthy<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| value.get(*key).filter(|v| truthy(v)))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
