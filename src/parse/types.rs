//! Rust types for the call-event payloads the wizard hands us.
//!
//! The `call` object is semi-structured and varies per agent, so it stays a
//! `serde_json` map. Only the envelope is typed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event name given to bare call objects from a list-calls response.
pub const LISTED_CALL_EVENT: &str = "call_listed";

// =============================================================================
// CALL EVENT
// =============================================================================

/// One webhook-style payload: `{ "event": "call_analyzed", "call": { ... } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallEvent {
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub call: Option<Map<String, Value>>,
}

impl CallEvent {
    pub fn new(event: impl Into<String>, call: Map<String, Value>) -> Self {
        CallEvent {
            event: event.into(),
            call: Some(call),
        }
    }

    /// Wrap a bare call object, as returned by the voice platform's list endpoint.
    pub fn listed(call: Map<String, Value>) -> Self {
        CallEvent::new(LISTED_CALL_EVENT, call)
    }

    pub fn agent_id(&self) -> Option<&str> {
        self.call.as_ref()?.get("agent_id")?.as_str()
    }

    /// Read a dotted path (`call_analysis.custom_analysis_data.x`) out of the call object.
    ///
    /// At each level the remaining path is first tried as a literal key, so
    /// container keys that themselves contain dots (`v1.score`) still resolve.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        lookup_in(self.call.as_ref()?, path)
    }

    /// Nested object under the call, `None` if absent or not an object.
    pub fn container(&self, path: &str) -> Option<&Map<String, Value>> {
        self.lookup(path)?.as_object()
    }
}

fn lookup_in<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    if let Some(value) = map.get(path) {
        return Some(value);
    }
    path.match_indices('.').find_map(|(dot, _)| {
        let nested = map.get(&path[..dot])?.as_object()?;
        lookup_in(nested, &path[dot + 1..])
    })
}

// =============================================================================
// RECENT CALLS
// =============================================================================

/// Accepted shapes for a "recent calls" response.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RecentCalls {
    List(Vec<RecentCallEntry>),
    Wrapped { calls: Vec<RecentCallEntry> },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RecentCallEntry {
    /// `call` must be present but may be null.
    Event {
        #[serde(default)]
        event: String,
        #[serde(deserialize_with = "nullable_call")]
        call: Option<Map<String, Value>>,
    },
    Bare(Map<String, Value>),
}

fn nullable_call<'de, D>(deserializer: D) -> Result<Option<Map<String, Value>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::deserialize(deserializer)
}

impl RecentCallEntry {
    pub(crate) fn into_event(self) -> CallEvent {
        match self {
            RecentCallEntry::Event { event, call } => CallEvent { event, call },
            RecentCallEntry::Bare(call) => CallEvent::listed(call),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: Value) -> CallEvent {
        serde_json::from_value(value).expect("valid event")
    }

    #[test]
    fn lookup_nested_path() {
        let e = event(json!({
            "event": "call_analyzed",
            "call": { "call_analysis": { "custom_analysis_data": { "procedure interest": "implants" } } }
        }));
        assert_eq!(
            e.lookup("call_analysis.custom_analysis_data.procedure interest"),
            Some(&json!("implants"))
        );
        assert_eq!(e.lookup("call_analysis.missing"), None);
    }

    #[test]
    fn lookup_key_containing_dot() {
        let e = event(json!({
            "event": "call_analyzed",
            "call": { "call_analysis": { "custom_analysis_data": { "v1.score": 9, "v1": { "other": 1 } } } }
        }));
        assert_eq!(
            e.lookup("call_analysis.custom_analysis_data.v1.score"),
            Some(&json!(9))
        );
        assert_eq!(
            e.lookup("call_analysis.custom_analysis_data.v1.other"),
            Some(&json!(1))
        );
        assert_eq!(e.lookup(""), None);
    }

    #[test]
    fn lookup_without_call() {
        let e = event(json!({ "event": "call_started" }));
        assert!(e.call.is_none());
        assert_eq!(e.lookup("call_id"), None);
        assert_eq!(e.agent_id(), None);
    }

    #[test]
    fn container_rejects_scalars() {
        let e = event(json!({ "event": "x", "call": { "metadata": "oops" } }));
        assert!(e.container("metadata").is_none());
    }
}
