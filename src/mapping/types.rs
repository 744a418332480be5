//! Field mapping records.

use serde::{Deserialize, Serialize};

use super::transform::Transform;
use crate::schema::two_level_kind;

/// Where a mapping came from. Manual mappings are authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Universal,
    Workflow,
    #[default]
    Manual,
}

/// One source → target connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    /// A field descriptor id.
    pub source_field: String,
    /// Target path, two-level root or action id.
    pub target_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_level1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_level2: Option<String>,
    /// Fires only when a boolean source equals this literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,
    #[serde(default)]
    pub transform: Option<Transform>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub source: Provenance,
}

impl FieldMapping {
    /// A user-authored mapping with no options set.
    pub fn manual(source_field: impl Into<String>, target_field: impl Into<String>) -> Self {
        FieldMapping {
            source_field: source_field.into(),
            target_field: target_field.into(),
            target_level1: None,
            target_level2: None,
            boolean_value: None,
            transform: None,
            required: false,
            source: Provenance::Manual,
        }
    }

    pub fn is_two_level(&self) -> bool {
        two_level_kind(&self.target_field).is_some()
    }

    /// Both ends set and, for two-level targets, both levels chosen.
    pub fn is_complete(&self) -> bool {
        if self.source_field.trim().is_empty() || self.target_field.trim().is_empty() {
            return false;
        }
        if self.is_two_level() {
            return is_set(&self.target_level1) && is_set(&self.target_level2);
        }
        true
    }

    /// Choose level 1; any previously chosen level 2 no longer applies.
    pub fn set_level1(&mut self, value: Option<String>) {
        if self.target_level1 != value {
            self.target_level2 = None;
        }
        self.target_level1 = value;
    }

    /// Identity used to deduplicate generated mappings.
    pub(crate) fn dedup_key(&self) -> (String, String, Option<bool>, Option<String>, Option<String>) {
        (
            self.source_field.clone(),
            self.target_field.clone(),
            self.boolean_value,
            self.target_level1.clone(),
            self.target_level2.clone(),
        )
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
