#![allow(dead_code)]

use mapper::catalog::FieldDescriptor;
use mapper::discover;
use mapper::parse::{self, CallEvent};
use mapper::schema::{self, SchemaField, TargetSchema};

// =============================================================================
// Payload fixtures
// =============================================================================

pub const SAMPLE_CALL: &str = include_str!("../fixtures/sample_call.json");
pub const RECENT_CALLS: &str = include_str!("../fixtures/recent_calls.json");
pub const PIPEDRIVE_SCHEMA: &str = include_str!("../fixtures/pipedrive_schema.json");

/// The analyzed dental-inbound call used across the suites.
pub fn sample_event() -> CallEvent {
    parse::parse_event(SAMPLE_CALL).expect("sample call should parse")
}

pub fn sample_catalog() -> Vec<FieldDescriptor> {
    discover::discover(&sample_event())
}

pub fn recent_events() -> Vec<CallEvent> {
    parse::parse_recent_calls(RECENT_CALLS).expect("recent calls should parse")
}

/// Payload with the given `call` object.
pub fn event_with(call: serde_json::Value) -> CallEvent {
    parse::event_from_value(serde_json::json!({ "event": "call_analyzed", "call": call }))
        .expect("payload should parse")
}

// =============================================================================
// Schema builders
// =============================================================================

pub fn pipedrive_schema() -> TargetSchema {
    schema::parse_schema(PIPEDRIVE_SCHEMA).expect("schema fixture should parse")
}

/// Schema with person fields only: no pipelines, no deal attributes.
pub fn contacts_only_schema() -> TargetSchema {
    TargetSchema {
        person_fields: vec![
            SchemaField::new("name", "Name", "varchar"),
            SchemaField::new("email", "Email", "varchar"),
            SchemaField::new("phone", "Phone", "phone"),
        ],
        ..TargetSchema::default()
    }
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// One `id | category` line per descriptor, for snapshotting catalogs.
pub fn catalog_lines(fields: &[FieldDescriptor]) -> String {
    fields
        .iter()
        .map(|f| format!("{} | {}", f.id, f.category))
        .collect::<Vec<_>>()
        .join("\n")
}
