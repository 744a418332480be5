//! Per-container discovery rules.
//!
//! Each well-known container on the call object yields descriptors whose ids
//! are built as `<container>.<key>`. Persisted configurations key off these ids.

use serde_json::{Map, Value};

use crate::catalog::{humanize, FieldCategory, FieldDescriptor, ValueKind, LINK_GLYPH};
use crate::parse::CallEvent;

pub const DYNAMIC_VARIABLES: &str = "retell_llm_dynamic_variables";
pub const METADATA: &str = "metadata";
pub const CUSTOM_ANALYSIS: &str = "call_analysis.custom_analysis_data";

/// Case-sensitive substrings that mark a metadata key as a CRM record link.
pub const LINKING_MARKERS: &[&str] = &["id", "_id", "lead", "contact", "person", "deal"];

pub fn is_linking_key(key: &str) -> bool {
    LINKING_MARKERS.iter().any(|marker| key.contains(marker))
}

/// Raw keys of one container, empty if the container is absent or malformed.
pub fn container_keys(event: &CallEvent, container: &str) -> Vec<String> {
    event
        .container(container)
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}

pub fn dynamic_variable_fields(event: &CallEvent, with_samples: bool) -> Vec<FieldDescriptor> {
    entries(event, DYNAMIC_VARIABLES)
        .map(|(key, value)| {
            let field = FieldDescriptor::custom(
                format!("{}.{}", DYNAMIC_VARIABLES, key),
                humanize(key),
                ValueKind::classify(value).field_type(),
                FieldCategory::DynamicVariables,
                format!("Dynamic variable '{}' set by the agent", key),
            );
            sample(field, value, with_samples)
        })
        .collect()
}

pub fn metadata_fields(event: &CallEvent, with_samples: bool) -> Vec<FieldDescriptor> {
    entries(event, METADATA)
        .map(|(key, value)| {
            let linking = is_linking_key(key);
            let (category, name) = if linking {
                (
                    FieldCategory::Linking,
                    format!("{} {}", humanize(key), LINK_GLYPH),
                )
            } else {
                (FieldCategory::Metadata, humanize(key))
            };
            let field = FieldDescriptor::custom(
                format!("{}.{}", METADATA, key),
                name,
                ValueKind::classify(value).field_type(),
                category,
                format!("Call metadata '{}'", key),
            );
            sample(field, value, with_samples)
        })
        .collect()
}

pub fn custom_analysis_fields(event: &CallEvent, with_samples: bool) -> Vec<FieldDescriptor> {
    entries(event, CUSTOM_ANALYSIS)
        .map(|(key, value)| {
            // The underscore only affects the label; the id keeps the raw key.
            let label = key.strip_prefix('_').unwrap_or(key);
            let field = FieldDescriptor::custom(
                format!("{}.{}", CUSTOM_ANALYSIS, key),
                humanize(label),
                ValueKind::classify(value).analysis_field_type(),
                FieldCategory::CustomAnalysis,
                format!("Post-call analysis result '{}'", label),
            );
            sample(field, value, with_samples)
        })
        .collect()
}

fn entries<'a>(
    event: &'a CallEvent,
    container: &str,
) -> impl Iterator<Item = (&'a String, &'a Value)> {
    event
        .container(container)
        .into_iter()
        .flat_map(Map::iter)
}

/// Null values carry no sample.
fn sample(field: FieldDescriptor, value: &Value, with_samples: bool) -> FieldDescriptor {
    if with_samples && !value.is_null() {
        field.with_sample(value.clone())
    } else {
        field
    }
}
