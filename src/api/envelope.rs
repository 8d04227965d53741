//! Response envelope decoding.
//!
//! The hosting API answers either with a bare JSON payload or with a
//! `{ "ok": bool, "data": ... }` wrapper. Anything carrying an `ok` key is
//! held to the wrapper schema; everything else is a bare payload.

use serde_json::{Map, Value};

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `{ "ok": true, "data": ... }`
    Success(Value),
    /// `{ "ok": false, ... }`, with whatever explanation the API attached.
    Failure { message: Option<String> },
    /// Any body without an `ok` key, taken as the payload itself.
    Bare(Value),
}

/// Why an envelope could not be turned into a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    Malformed(String),
    Rejected(String),
}

impl Envelope {
    pub fn decode(body: Value) -> Result<Self, EnvelopeError> {
        let mut map = match body {
            Value::Object(map) if map.contains_key("ok") => map,
            other => return Ok(Self::Bare(other)),
        };

        let ok = map.get("ok").and_then(Value::as_bool).ok_or_else(|| {
            EnvelopeError::Malformed("envelope field `ok` must be a boolean".into())
        })?;

        if !ok {
            return Ok(Self::Failure {
                message: failure_message(&map),
            });
        }

        match map.remove("data") {
            Some(data) => Ok(Self::Success(data)),
            None => Err(EnvelopeError::Malformed(
                "envelope with `ok: true` has no `data` field".into(),
            )),
        }
    }

    pub fn into_payload(self) -> Result<Value, EnvelopeError> {
        match self {
            Self::Success(data) | Self::Bare(data) => Ok(data),
            Self::Failure { message } => Err(EnvelopeError::Rejected(
                message.unwrap_or_else(|| "request was not accepted".into()),
            )),
        }
    }
}

/// Decode a body and hand back its payload in one step.
pub fn unwrap_payload(body: Value) -> Result<Value, EnvelopeError> {
    Envelope::decode(body)?.into_payload()
}

fn failure_message(map: &Map<String, Value>) -> Option<String> {
    ["error", "message"].iter().find_map(|key| match map.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Object(inner)) => inner
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    })
}
