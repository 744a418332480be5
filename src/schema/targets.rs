//! Dynamic target-field catalog and target path validity.
//!
//! Path conventions: `person.<key>`, `deal.<key>`, `activity.<attribute>`,
//! `action.create_<object>`, plus the two-level roots in `two_level`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::two_level::{level1_options, two_level_kind, SelectOption, TwoLevelKind};
use super::types::{SchemaField, TargetObject, TargetSchema};

pub const ACTION_PREFIX: &str = "action.";

/// Targets that create a new record instead of setting an attribute.
pub const ACTIONS: &[(&str, &str, TargetObject)] = &[
    ("action.create_person", "Create person", TargetObject::Person),
    ("action.create_deal", "Create deal", TargetObject::Deal),
    ("action.create_activity", "Create activity", TargetObject::Activity),
    ("action.create_note", "Create note", TargetObject::Note),
];

/// Activities are schema-less; these attributes are offered for every CRM.
pub const ACTIVITY_ATTRIBUTES: &[(&str, &str)] = &[
    ("subject", "Subject"),
    ("note", "Note"),
    ("due_date", "Due Date"),
    ("duration", "Duration"),
    ("location", "Location"),
    ("recording_url", "Recording URL"),
];

/// Schema field keys whose options come from the user directory.
const OWNER_KEYS: &[&str] = &["user_id", "owner_id"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TargetKind {
    Attribute,
    TwoLevel { levels: TwoLevelKind },
    Action,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetField {
    pub id: String,
    pub label: String,
    pub object: TargetObject,
    #[serde(flatten)]
    pub kind: TargetKind,
    /// Allowed values for enum, label and owner fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

pub fn is_action(target_id: &str) -> bool {
    ACTIONS.iter().any(|(id, _, _)| *id == target_id)
}

/// The full target catalog for a schema: actions, two-level roots, schema
/// person/deal fields and the fixed activity attributes. Ids are unique.
pub fn target_fields(schema: &TargetSchema) -> Vec<TargetField> {
    let crm = schema.crm;
    let mut fields = Vec::new();

    for &(id, label, object) in ACTIONS {
        fields.push(TargetField {
            id: id.into(),
            label: format!("{} ({})", label, crm.object_label(object)),
            object,
            kind: TargetKind::Action,
            options: Vec::new(),
        });
    }

    for (levels, object, label) in [
        (TwoLevelKind::PipelineStage, TargetObject::Deal, "Pipeline stage"),
        (TwoLevelKind::ActivityAttribute, TargetObject::Activity, "Activity by type"),
        (TwoLevelKind::ContactDetail, TargetObject::Person, "Contact detail"),
    ] {
        let options = level1_options(levels, schema);
        if options.is_empty() {
            continue;
        }
        fields.push(TargetField {
            id: levels.root().into(),
            label: label.into(),
            object,
            kind: TargetKind::TwoLevel { levels },
            options,
        });
    }

    for object in [TargetObject::Person, TargetObject::Deal] {
        for field in schema.fields_of(object) {
            fields.push(schema_target(schema, object, field));
        }
    }

    for &(key, label) in ACTIVITY_ATTRIBUTES {
        fields.push(TargetField {
            id: format!("activity.{}", key),
            label: format!("{} {}", crm.object_label(TargetObject::Activity), label),
            object: TargetObject::Activity,
            kind: TargetKind::Attribute,
            options: Vec::new(),
        });
    }

    // A schema attribute that shadows an empty two-level root is not addressable either.
    let mut seen = HashSet::new();
    fields.retain(|f| seen.insert(f.id.clone()) && is_valid_target(&f.id, schema));
    fields
}

fn schema_target(schema: &TargetSchema, object: TargetObject, field: &SchemaField) -> TargetField {
    let options = if OWNER_KEYS.contains(&field.key.as_str()) {
        schema
            .users
            .iter()
            .map(|u| SelectOption::new(u.id.as_key(), u.name.clone()))
            .collect()
    } else {
        field
            .options
            .iter()
            .map(|o| SelectOption::new(o.id.as_key(), o.label.clone()))
            .collect()
    };

    TargetField {
        id: format!("{}.{}", object.prefix(), field.key),
        label: format!("{} {}", schema.crm.object_label(object), field.name),
        object,
        kind: TargetKind::Attribute,
        options,
    }
}

/// Whether a target path is legal for the current schema.
///
/// Activity paths are always valid; person and deal paths must name a schema
/// attribute key; two-level roots need at least one level-1 option.
pub fn is_valid_target(target_id: &str, schema: &TargetSchema) -> bool {
    if target_id.starts_with(ACTION_PREFIX) {
        return is_action(target_id);
    }

    let Some((prefix, key)) = target_id.split_once('.') else {
        return false;
    };
    if key.is_empty() {
        return false;
    }
    if prefix == TargetObject::Activity.prefix() {
        return true;
    }
    if let Some(levels) = two_level_kind(target_id) {
        return !level1_options(levels, schema).is_empty();
    }

    match prefix {
        "person" => schema.has_field(TargetObject::Person, key),
        "deal" => schema.has_field(TargetObject::Deal, key),
        _ => false,
    }
}
