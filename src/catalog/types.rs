//! Field descriptor model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// FIELD TYPE / CATEGORY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Text,
    Url,
    Timestamp,
    Enum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldCategory {
    Core,
    Timing,
    Contact,
    Content,
    Analysis,
    Cost,
    Technical,
    #[serde(rename = "Dynamic Variables")]
    DynamicVariables,
    Metadata,
    Linking,
    #[serde(rename = "Custom Analysis")]
    CustomAnalysis,
}

impl std::fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FieldCategory::Core => "Core",
            FieldCategory::Timing => "Timing",
            FieldCategory::Contact => "Contact",
            FieldCategory::Content => "Content",
            FieldCategory::Analysis => "Analysis",
            FieldCategory::Cost => "Cost",
            FieldCategory::Technical => "Technical",
            FieldCategory::DynamicVariables => "Dynamic Variables",
            FieldCategory::Metadata => "Metadata",
            FieldCategory::Linking => "Linking",
            FieldCategory::CustomAnalysis => "Custom Analysis",
        };
        write!(f, "{}", label)
    }
}

// =============================================================================
// VALUE CLASSIFIER
// =============================================================================

/// Closed type tag for an observed payload value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    /// null, arrays and objects.
    Structured,
}

impl ValueKind {
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Null | Value::Array(_) | Value::Object(_) => ValueKind::Structured,
        }
    }

    /// Field type for flat key/value containers (dynamic variables, metadata).
    /// Structured values are kept as serialized text.
    pub fn field_type(&self) -> FieldType {
        match self {
            ValueKind::String => FieldType::String,
            ValueKind::Number => FieldType::Number,
            ValueKind::Boolean => FieldType::Boolean,
            ValueKind::Structured => FieldType::Text,
        }
    }

    /// Field type for custom analysis results: anything not boolean or numeric is a string.
    pub fn analysis_field_type(&self) -> FieldType {
        match self {
            ValueKind::Boolean => FieldType::Boolean,
            ValueKind::Number => FieldType::Number,
            ValueKind::String | ValueKind::Structured => FieldType::String,
        }
    }
}

// =============================================================================
// FIELD DESCRIPTOR
// =============================================================================

/// One addressable piece of data extractable from a call event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Dotted path into the call object; the join key for mappings.
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub description: String,
    pub category: FieldCategory,
    #[serde(default)]
    pub is_custom: bool,
    /// Observed value, for UI preview only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_value: Option<Value>,
}

impl FieldDescriptor {
    pub fn standard(
        id: &str,
        name: &str,
        field_type: FieldType,
        category: FieldCategory,
        description: &str,
    ) -> Self {
        FieldDescriptor {
            id: id.into(),
            name: name.into(),
            field_type,
            description: description.into(),
            category,
            is_custom: false,
            sample_value: None,
        }
    }

    pub fn custom(
        id: impl Into<String>,
        name: impl Into<String>,
        field_type: FieldType,
        category: FieldCategory,
        description: impl Into<String>,
    ) -> Self {
        FieldDescriptor {
            id: id.into(),
            name: name.into(),
            field_type,
            description: description.into(),
            category,
            is_custom: true,
            sample_value: None,
        }
    }

    pub fn with_sample(mut self, value: Value) -> Self {
        self.sample_value = Some(value);
        self
    }
}
