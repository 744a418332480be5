//! Integration tests for field discovery: baseline catalog, container rules, recent-call batches.

mod helpers;

use std::collections::HashSet;

use mapper::catalog::{standard_fields, FieldCategory, FieldType, LINK_GLYPH};
use mapper::discover::{self, counts_by_agent, DiscoveryOptions, UNKNOWN_AGENT};
use mapper::parse::{self, CallEvent};
use serde_json::json;

#[test]
fn baseline_survives_any_payload() {
    let baseline = standard_fields();
    let payloads = [
        "{}",
        r#"{"event":"call_started"}"#,
        r#"{"event":"call_ended","call":null}"#,
        r#"{"event":"call_ended","call":{}}"#,
        helpers::SAMPLE_CALL,
    ];
    for payload in payloads {
        let event = parse::parse_event(payload).expect("payload should parse");
        let catalog = discover::discover(&event);
        for field in &baseline {
            let found = catalog.iter().find(|f| f.id == field.id);
            assert_eq!(found, Some(field), "baseline field {} altered for {}", field.id, payload);
        }
    }
}

#[test]
fn ids_are_unique() {
    // Custom keys that shadow baseline ids must not produce duplicates.
    let event = helpers::event_with(json!({
        "metadata": { "source": "a" },
        "retell_llm_dynamic_variables": { "name": "Ann" },
        "call_analysis": { "custom_analysis_data": { "score": 1 } }
    }));
    for catalog in [discover::discover(&event), helpers::sample_catalog()] {
        let mut seen = HashSet::new();
        for field in &catalog {
            assert!(seen.insert(field.id.clone()), "duplicate id {}", field.id);
        }
    }
}

#[test]
fn discovery_is_idempotent() {
    let event = helpers::sample_event();
    let first = discover::discover(&event);
    let second = discover::discover(&event);
    assert_eq!(first, second);
}

#[test]
fn metadata_linking_classification() {
    let event = helpers::event_with(json!({ "metadata": { "lead_id": "21", "source": "Web forms" } }));
    let catalog = discover::discover(&event);
    let lead = catalog.iter().find(|f| f.id == "metadata.lead_id").unwrap();
    let source = catalog.iter().find(|f| f.id == "metadata.source").unwrap();
    assert_eq!(lead.category, FieldCategory::Linking);
    assert_eq!(lead.name, format!("Lead Id {}", LINK_GLYPH));
    assert_eq!(source.category, FieldCategory::Metadata);
    assert_eq!(source.name, "Source");
}

#[test]
fn sample_call_end_to_end() {
    let catalog = helpers::sample_catalog();
    assert_eq!(catalog.len(), 25 + 15);

    let discovered: Vec<_> = catalog.iter().filter(|f| f.is_custom).collect();
    assert_eq!(discovered.len(), 15);

    let category = |id: &str| catalog.iter().find(|f| f.id == id).map(|f| f.category);
    assert_eq!(category("metadata.lead_id"), Some(FieldCategory::Linking));
    assert_eq!(category("metadata.inboundlead_id"), Some(FieldCategory::Linking));
    assert_eq!(category("metadata.source"), Some(FieldCategory::Metadata));

    let analysis: Vec<_> = catalog
        .iter()
        .filter(|f| f.id.starts_with("call_analysis.custom_analysis_data."))
        .collect();
    assert_eq!(analysis.len(), 8);
    assert!(analysis.iter().all(|f| f.category == FieldCategory::CustomAnalysis));

    insta::assert_snapshot!("sample_call_catalog", helpers::catalog_lines(&catalog));
}

#[test]
fn sample_call_labels_and_types() {
    let catalog = helpers::sample_catalog();
    let field = |id: &str| catalog.iter().find(|f| f.id == id).unwrap();

    let booked = field("call_analysis.custom_analysis_data._appointment_booked");
    assert_eq!(booked.name, "Appointment Booked");
    assert_eq!(booked.field_type, FieldType::Boolean);

    let interest = field("call_analysis.custom_analysis_data.procedure interest");
    assert_eq!(interest.name, "Procedure Interest");
    assert_eq!(interest.field_type, FieldType::String);

    assert_eq!(field("call_analysis.custom_analysis_data.urgency_score").field_type, FieldType::Number);
    assert_eq!(field("call_analysis.custom_analysis_data.objections").field_type, FieldType::String);
    assert_eq!(field("retell_llm_dynamic_variables.email").sample_value, Some(json!("Maria.Lopez@Example.com")));
    assert_eq!(field("metadata.inboundlead_id").name, format!("Inboundlead Id {}", LINK_GLYPH));
}

#[test]
fn samples_can_be_left_out() {
    let options = DiscoveryOptions {
        include_samples: false,
        ..DiscoveryOptions::default()
    };
    let catalog = discover::discover_with(&helpers::sample_event(), &options);
    assert_eq!(catalog.len(), 40);
    assert!(catalog.iter().all(|f| f.sample_value.is_none()));
}

#[test]
fn recent_calls_union() {
    let events = helpers::recent_events();
    assert_eq!(events.len(), 4);
    assert!(events.iter().all(|e| e.event == parse::LISTED_CALL_EVENT));

    let report = discover::discover_recent(&events, &DiscoveryOptions::default());
    assert_eq!(report.calls_scanned, 4);

    let counts = report.counts();
    // name, procedure (current_time and current_timezone are system keys)
    assert_eq!(counts.variables, 2);
    // lead_id, source, campaign, deal_id (access_token is a system key)
    assert_eq!(counts.metadata, 4);
    // consultation_booking_status, _appointment_booked, voicemail_left
    assert_eq!(counts.analysis, 3);
    assert_eq!(counts.total, 9);

    // First occurrence wins: source was a string in the first call.
    let source = report.fields.iter().find(|f| f.id == "metadata.source").unwrap();
    assert_eq!(source.field_type, FieldType::String);
    assert_eq!(source.sample_value, Some(json!("Google Ads")));
}

#[test]
fn recent_counts_per_agent() {
    let counts = counts_by_agent(&helpers::recent_events(), &DiscoveryOptions::default());
    assert_eq!(counts.len(), 3);
    assert_eq!(counts["agent_dental_inbound"].total, 7);
    assert_eq!(counts["agent_outbound_followup"].metadata, 1);
    assert_eq!(counts[UNKNOWN_AGENT].analysis, 1);
}

#[test]
fn payload_without_call_is_baseline_only() {
    let event = CallEvent::default();
    assert_eq!(discover::discover(&event), standard_fields());
}
