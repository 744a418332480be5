//! Baseline catalog: fields every call record carries, whatever the agent.

use super::types::{FieldCategory, FieldDescriptor, FieldType};

use FieldCategory::*;

type Row = (&'static str, &'static str, FieldType, FieldCategory, &'static str);

const STANDARD: &[Row] = &[
    // Core
    ("call_id", "Call ID", FieldType::String, Core, "Unique identifier of the call"),
    ("agent_id", "Agent ID", FieldType::String, Core, "Voice agent that handled the call"),
    ("call_type", "Call Type", FieldType::Enum, Core, "web_call or phone_call"),
    ("call_status", "Call Status", FieldType::Enum, Core, "registered, ongoing, ended or error"),
    ("direction", "Direction", FieldType::Enum, Core, "inbound or outbound"),
    // Timing
    ("start_timestamp", "Start Time", FieldType::Timestamp, Timing, "Call start, epoch milliseconds"),
    ("end_timestamp", "End Time", FieldType::Timestamp, Timing, "Call end, epoch milliseconds"),
    ("duration_ms", "Duration (ms)", FieldType::Number, Timing, "Call length in milliseconds"),
    // Contact
    ("from_number", "From Number", FieldType::String, Contact, "Caller phone number"),
    ("to_number", "To Number", FieldType::String, Contact, "Callee phone number"),
    // Content
    ("transcript", "Transcript", FieldType::Text, Content, "Full call transcript"),
    ("recording_url", "Recording URL", FieldType::Url, Content, "Link to the call recording"),
    ("public_log_url", "Public Log URL", FieldType::Url, Content, "Link to the public call log"),
    // Analysis
    ("call_analysis.call_summary", "Call Summary", FieldType::Text, Analysis, "Post-call summary"),
    ("call_analysis.user_sentiment", "User Sentiment", FieldType::Enum, Analysis, "Positive, Neutral, Negative or Unknown"),
    ("call_analysis.call_successful", "Call Successful", FieldType::Boolean, Analysis, "Whether the agent reached its goal"),
    ("call_analysis.in_voicemail", "In Voicemail", FieldType::Boolean, Analysis, "Whether the call reached voicemail"),
    ("disconnection_reason", "Disconnection Reason", FieldType::Enum, Analysis, "Why the call ended"),
    // Cost
    ("call_cost.combined_cost", "Combined Cost", FieldType::Number, Cost, "Total cost in cents"),
    ("call_cost.total_duration_seconds", "Billed Duration (s)", FieldType::Number, Cost, "Billed duration in seconds"),
    ("call_cost.total_duration_unit_price", "Unit Price", FieldType::Number, Cost, "Price per billed second"),
    // Technical
    ("latency.e2e.p50", "E2E Latency p50", FieldType::Number, Technical, "Median end-to-end latency in ms"),
    ("latency.llm.p50", "LLM Latency p50", FieldType::Number, Technical, "Median LLM latency in ms"),
    ("opt_out_sensitive_data_storage", "Sensitive Data Opt-out", FieldType::Boolean, Technical, "Whether transcripts and recordings are withheld"),
    ("telephony_identifier.twilio_call_sid", "Twilio Call SID", FieldType::String, Technical, "Carrier call identifier"),
];

/// The fixed baseline descriptors, in catalog order.
pub fn standard_fields() -> Vec<FieldDescriptor> {
    STANDARD
        .iter()
        .map(|&(id, name, field_type, category, description)| {
            FieldDescriptor::standard(id, name, field_type, category, description)
        })
        .collect()
}

pub fn is_standard_field(id: &str) -> bool {
    STANDARD.iter().any(|row| row.0 == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn baseline_has_25_unique_fields() {
        let fields = standard_fields();
        assert_eq!(fields.len(), 25);
        let ids: HashSet<&str> = fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), 25);
        assert!(fields.iter().all(|f| !f.is_custom && f.sample_value.is_none()));
    }

    #[test]
    fn baseline_lookup() {
        assert!(is_standard_field("call_analysis.in_voicemail"));
        assert!(!is_standard_field("metadata.lead_id"));
    }
}
