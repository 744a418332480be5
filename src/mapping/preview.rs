//! Review-step preview: what each mapping would write for a sample call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::FieldMapping;
use crate::parse::CallEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingPreview {
    pub source_field: String,
    pub target_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_level1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_level2: Option<String>,
    /// Transformed value; `None` when the sample call has no value for the source.
    pub value: Option<String>,
    /// False when a boolean condition on the mapping does not hold for this call.
    pub fires: bool,
}

/// Resolve every complete mapping against one call.
pub fn preview_mappings(mappings: &[FieldMapping], event: &CallEvent) -> Vec<MappingPreview> {
    mappings
        .iter()
        .filter(|m| m.is_complete())
        .map(|m| preview_one(m, event))
        .collect()
}

fn preview_one(mapping: &FieldMapping, event: &CallEvent) -> MappingPreview {
    let raw = event.lookup(&mapping.source_field).filter(|v| !v.is_null());

    let fires = match mapping.boolean_value {
        Some(expected) => raw.and_then(Value::as_bool) == Some(expected),
        None => true,
    };

    let value = raw.map(|v| {
        let text = value_text(v);
        match mapping.transform {
            Some(transform) => transform.apply(&text),
            None => text,
        }
    });

    MappingPreview {
        source_field: mapping.source_field.clone(),
        target_field: mapping.target_field.clone(),
        target_level1: mapping.target_level1.clone(),
        target_level2: mapping.target_level2.clone(),
        value,
        fires,
    }
}

/// Plain text for strings, JSON text for everything else.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Transform;
    use serde_json::json;

    fn event() -> CallEvent {
        serde_json::from_value(json!({
            "event": "call_analyzed",
            "call": {
                "from_number": "+1 (555) 010-2030",
                "duration_ms": 61000,
                "call_analysis": { "in_voicemail": true }
            }
        }))
        .unwrap()
    }

    #[test]
    fn applies_transform_and_stringifies() {
        let mut phone = FieldMapping::manual("from_number", "person.phone");
        phone.transform = Some(Transform::PhoneFormat);
        let duration = FieldMapping::manual("duration_ms", "activity.duration");
        let previews = preview_mappings(&[phone, duration], &event());
        assert_eq!(previews[0].value.as_deref(), Some("+15550102030"));
        assert_eq!(previews[1].value.as_deref(), Some("61000"));
        assert!(previews.iter().all(|p| p.fires));
    }

    #[test]
    fn boolean_pins_select_one_branch() {
        let mut yes = FieldMapping::manual("call_analysis.in_voicemail", "action.create_activity");
        yes.boolean_value = Some(true);
        let mut no = FieldMapping::manual("call_analysis.in_voicemail", "action.create_deal");
        no.boolean_value = Some(false);
        let previews = preview_mappings(&[yes, no], &event());
        assert!(previews[0].fires);
        assert!(!previews[1].fires);
    }

    #[test]
    fn incomplete_and_missing() {
        let half = FieldMapping::manual("from_number", "deal.stage_id");
        let missing = FieldMapping::manual("transcript", "activity.note");
        let previews = preview_mappings(&[half, missing], &event());
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].value, None);
    }

    #[test]
    fn dotted_analysis_key_resolves() {
        let event: CallEvent = serde_json::from_value(json!({
            "event": "call_analyzed",
            "call": { "call_analysis": { "custom_analysis_data": { "v1.score": 4 } } }
        }))
        .unwrap();
        let mapping = FieldMapping::manual("call_analysis.custom_analysis_data.v1.score", "deal.title");
        let previews = preview_mappings(&[mapping], &event);
        assert_eq!(previews[0].value.as_deref(), Some("4"));
    }
}
