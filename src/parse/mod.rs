//! Parse phase: JSON → call events.

pub mod types;

pub use types::*;

use serde_json::Value;

use crate::error::MapperError;

/// Deserialize a single `{ event, call }` payload.
///
/// A payload without a `call` object is accepted; discovery then yields the
/// baseline catalog only.
pub fn parse_event(json: &str) -> Result<CallEvent, Vec<MapperError>> {
    let value: Value = serde_json::from_str(json).map_err(|e| {
        vec![MapperError::parse(
            "P001",
            format!("Failed to parse call event JSON: {}", e),
        )]
    })?;
    event_from_value(value)
}

/// Interpret an already-parsed JSON value as a call event.
pub fn event_from_value(value: Value) -> Result<CallEvent, Vec<MapperError>> {
    let Value::Object(mut object) = value else {
        return Err(vec![MapperError::parse(
            "P002",
            "Call event payload must be a JSON object",
        )]);
    };

    let event = match object.remove("event") {
        Some(Value::String(s)) => s,
        _ => String::new(),
    };
    let call = match object.remove("call") {
        Some(Value::Object(map)) => Some(map),
        Some(Value::Null) | None => None,
        Some(_) => {
            return Err(vec![MapperError::parse(
                "P002",
                "Field 'call' must be a JSON object",
            )]);
        }
    };

    Ok(CallEvent { event, call })
}

/// Deserialize a recent-calls response into call events.
///
/// Accepts a list of `{ event, call }` payloads, a list of bare call objects, or
/// either of those wrapped as `{ "calls": [...] }`.
pub fn parse_recent_calls(json: &str) -> Result<Vec<CallEvent>, Vec<MapperError>> {
    let calls = serde_json::from_str::<RecentCalls>(json).map_err(|e| {
        vec![MapperError::parse(
            "P001",
            format!("Failed to parse recent calls JSON: {}", e),
        )]
    })?;

    let entries = match calls {
        RecentCalls::List(entries) => entries,
        RecentCalls::Wrapped { calls } => calls,
    };
    Ok(entries.into_iter().map(RecentCallEntry::into_event).collect())
}
