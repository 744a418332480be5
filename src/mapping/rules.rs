//! Library of known-good source → target associations.
//!
//! Several rules share a target on purpose (inbound caller number and outbound
//! callee number both feed the contact phone), and boolean sources appear once
//! per literal so each branch is its own mapping. Which one applies at runtime
//! is decided downstream.

use super::transform::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingRule {
    pub source_field: &'static str,
    /// Display name used when the id is not in the catalog.
    pub source_name: &'static str,
    pub target_field: &'static str,
    pub boolean_value: Option<bool>,
    pub required: bool,
    pub transform: Option<Transform>,
    pub description: &'static str,
}

const fn rule(
    source_field: &'static str,
    source_name: &'static str,
    target_field: &'static str,
    description: &'static str,
) -> MappingRule {
    MappingRule {
        source_field,
        source_name,
        target_field,
        boolean_value: None,
        required: false,
        transform: None,
        description,
    }
}

impl MappingRule {
    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    const fn when(mut self, value: bool) -> Self {
        self.boolean_value = Some(value);
        self
    }
}

pub const RULES: &[MappingRule] = &[
    // Contact identity
    rule("from_number", "From Number", "person.phone", "Inbound: the caller is the contact")
        .required()
        .transform(Transform::PhoneFormat),
    rule("to_number", "To Number", "person.phone", "Outbound: the callee is the contact")
        .required()
        .transform(Transform::PhoneFormat),
    rule("retell_llm_dynamic_variables.name", "Name", "person.name", "Customer name captured by the agent")
        .required()
        .transform(Transform::Capitalize),
    rule("retell_llm_dynamic_variables.email", "Email", "person.email", "Customer email captured by the agent")
        .transform(Transform::Lowercase),
    rule("retell_llm_dynamic_variables.phone", "Phone", "person.phone", "Callback number given during the call")
        .transform(Transform::PhoneFormat),
    // Linking to existing records
    rule("metadata.person_id", "Person Id", "person.id", "Update the linked person instead of creating one"),
    rule("metadata.deal_id", "Deal Id", "deal.id", "Update the linked deal instead of creating one"),
    // Deal
    rule("retell_llm_dynamic_variables.procedure", "Procedure", "deal.title", "Deal title from the requested procedure")
        .transform(Transform::Capitalize),
    rule("call_analysis.user_sentiment", "User Sentiment", "deal.label", "Label the deal with caller sentiment"),
    rule(
        "call_analysis.custom_analysis_data.consultation_booking_status",
        "Consultation Booking Status",
        "deal.stage_id",
        "Move the deal to the stage matching the booking outcome",
    ),
    // Voicemail branch
    rule("call_analysis.in_voicemail", "In Voicemail", "action.create_activity", "Voicemail: schedule a follow-up call")
        .when(true),
    rule("call_analysis.in_voicemail", "In Voicemail", "action.create_deal", "Conversation: open a deal")
        .when(false),
    // Call record
    rule("call_analysis.call_summary", "Call Summary", "action.create_note", "Attach the call summary as a note"),
    rule("transcript", "Transcript", "activity.note", "Store the transcript on the call activity"),
    rule("call_analysis.call_summary", "Call Summary", "activity.subject", "Activity subject from the summary")
        .transform(Transform::Truncate100),
    rule("recording_url", "Recording URL", "activity.recording_url", "Link the recording"),
    rule("duration_ms", "Duration (ms)", "activity.duration", "Activity duration from the call length"),
    rule("start_timestamp", "Start Time", "activity.due_date", "Activity date from the call start"),
];
