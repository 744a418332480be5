//! Two-level target fields: a category choice followed by a conditioned sub-choice.
//!
//! Level-2 options only exist in the context of a chosen level-1 value; with no
//! level-1 value (or an unknown one) the level-2 list is empty.

use serde::{Deserialize, Serialize};

use super::targets::ACTIVITY_ATTRIBUTES;
use super::types::TargetSchema;

pub const PIPELINE_STAGE: &str = "deal.stage_id";
pub const ACTIVITY_ATTRIBUTE: &str = "activity.type";
pub const CONTACT_DETAIL: &str = "person.contact_detail";

const CONTACT_CHANNELS: &[(&str, &str)] = &[("phone", "Phone"), ("email", "Email")];
const PHONE_DETAILS: &[(&str, &str)] = &[
    ("work", "Work"),
    ("home", "Home"),
    ("mobile", "Mobile"),
    ("other", "Other"),
];
const EMAIL_DETAILS: &[(&str, &str)] = &[("work", "Work"), ("home", "Home"), ("other", "Other")];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TwoLevelKind {
    /// Pipeline, then one of that pipeline's stages.
    PipelineStage,
    /// Activity type, then an activity attribute.
    ActivityAttribute,
    /// Phone or email, then the detail subtype.
    ContactDetail,
}

impl TwoLevelKind {
    pub fn root(&self) -> &'static str {
        match self {
            TwoLevelKind::PipelineStage => PIPELINE_STAGE,
            TwoLevelKind::ActivityAttribute => ACTIVITY_ATTRIBUTE,
            TwoLevelKind::ContactDetail => CONTACT_DETAIL,
        }
    }
}

/// Two-level kind of a target id, `None` for single-level targets.
pub fn two_level_kind(target_id: &str) -> Option<TwoLevelKind> {
    match target_id {
        PIPELINE_STAGE => Some(TwoLevelKind::PipelineStage),
        ACTIVITY_ATTRIBUTE => Some(TwoLevelKind::ActivityAttribute),
        CONTACT_DETAIL => Some(TwoLevelKind::ContactDetail),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption {
            value: value.into(),
            label: label.into(),
        }
    }
}

fn fixed(options: &[(&str, &str)]) -> Vec<SelectOption> {
    options
        .iter()
        .map(|&(value, label)| SelectOption::new(value, label))
        .collect()
}

pub fn level1_options(kind: TwoLevelKind, schema: &TargetSchema) -> Vec<SelectOption> {
    match kind {
        TwoLevelKind::PipelineStage => schema
            .pipelines
            .iter()
            .map(|p| SelectOption::new(p.id.as_key(), p.name.clone()))
            .collect(),
        TwoLevelKind::ActivityAttribute => schema
            .activity_types
            .iter()
            .map(|t| SelectOption::new(t.key.clone(), t.name.clone()))
            .collect(),
        TwoLevelKind::ContactDetail => fixed(CONTACT_CHANNELS),
    }
}

pub fn level2_options(
    kind: TwoLevelKind,
    schema: &TargetSchema,
    level1: Option<&str>,
) -> Vec<SelectOption> {
    let Some(level1) = level1.map(str::trim).filter(|v| !v.is_empty()) else {
        return Vec::new();
    };

    match kind {
        TwoLevelKind::PipelineStage => schema
            .stages_of(level1)
            .into_iter()
            .map(|s| SelectOption::new(s.id.as_key(), s.name.clone()))
            .collect(),
        TwoLevelKind::ActivityAttribute => {
            if schema.activity_types.iter().any(|t| t.key == level1) {
                fixed(ACTIVITY_ATTRIBUTES)
            } else {
                Vec::new()
            }
        }
        TwoLevelKind::ContactDetail => match level1 {
            "phone" => fixed(PHONE_DETAILS),
            "email" => fixed(EMAIL_DETAILS),
            _ => Vec::new(),
        },
    }
}

/// Whether `(level1, level2)` is a legal pair for this schema.
pub fn is_valid_selection(
    kind: TwoLevelKind,
    schema: &TargetSchema,
    level1: &str,
    level2: &str,
) -> bool {
    level2_options(kind, schema, Some(level1))
        .iter()
        .any(|o| o.value == level2.trim())
}
