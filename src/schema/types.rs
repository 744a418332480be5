//! Target schema: the CRM's field/object catalog, as supplied by the wizard.
//!
//! Collections default to empty so a partially loaded schema still parses.

use serde::{Deserialize, Serialize};

// =============================================================================
// CRM KIND
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrmKind {
    #[default]
    Pipedrive,
    Hubspot,
    Salesforce,
    Zoho,
}

/// Canonical object behind a target path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetObject {
    Person,
    Deal,
    Activity,
    Note,
}

impl TargetObject {
    pub fn prefix(&self) -> &'static str {
        match self {
            TargetObject::Person => "person",
            TargetObject::Deal => "deal",
            TargetObject::Activity => "activity",
            TargetObject::Note => "note",
        }
    }
}

impl CrmKind {
    /// What this CRM calls the canonical object.
    pub fn object_label(&self, object: TargetObject) -> &'static str {
        match (self, object) {
            (CrmKind::Pipedrive, TargetObject::Person) => "Person",
            (_, TargetObject::Person) => "Contact",
            (CrmKind::Salesforce, TargetObject::Deal) => "Opportunity",
            (_, TargetObject::Deal) => "Deal",
            (CrmKind::Pipedrive, TargetObject::Activity) => "Activity",
            (_, TargetObject::Activity) => "Task",
            (_, TargetObject::Note) => "Note",
        }
    }
}

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// A CRM identifier that may arrive as a JSON number or string.
/// Comparisons go through the string form so `10` and `"10"` are equal keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalId {
    Number(i64),
    /// Floats and integers outside `i64`. Whole floats key like integers (`10.0` → `"10"`).
    Decimal(serde_json::Number),
    Text(String),
}

impl ExternalId {
    pub fn as_key(&self) -> String {
        match self {
            ExternalId::Number(n) => n.to_string(),
            ExternalId::Decimal(n) => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
                _ => n.to_string(),
            },
            ExternalId::Text(s) => s.trim().to_string(),
        }
    }

    pub fn matches(&self, key: &str) -> bool {
        self.as_key() == key.trim()
    }
}

impl std::fmt::Display for ExternalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

impl From<i64> for ExternalId {
    fn from(n: i64) -> Self {
        ExternalId::Number(n)
    }
}

impl From<&str> for ExternalId {
    fn from(s: &str) -> Self {
        ExternalId::Text(s.to_string())
    }
}

// =============================================================================
// SCHEMA COLLECTIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    pub key: String,
    pub name: String,
    #[serde(default, alias = "type", alias = "field_type")]
    pub field_type: String,
    /// Enumerated value set for label/enum fields; empty otherwise.
    #[serde(default)]
    pub options: Vec<FieldOption>,
    #[serde(default, alias = "is_custom")]
    pub is_custom: bool,
}

impl SchemaField {
    pub fn new(key: &str, name: &str, field_type: &str) -> Self {
        SchemaField {
            key: key.into(),
            name: name.into(),
            field_type: field_type.into(),
            options: Vec::new(),
            is_custom: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub id: ExternalId,
    #[serde(alias = "name")]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityType {
    #[serde(alias = "key_string")]
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: ExternalId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: ExternalId,
    /// `None` for stages the CRM did not attach to a pipeline; they are never offered.
    #[serde(default, alias = "pipeline_id")]
    pub pipeline_id: Option<ExternalId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "order_nr")]
    pub order_nr: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: ExternalId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Read-only description of a CRM's addressable fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetSchema {
    pub crm: CrmKind,
    #[serde(alias = "person_fields", alias = "contactFields", alias = "contact_fields")]
    pub person_fields: Vec<SchemaField>,
    #[serde(alias = "deal_fields", alias = "opportunityFields", alias = "opportunity_fields")]
    pub deal_fields: Vec<SchemaField>,
    #[serde(alias = "activity_types")]
    pub activity_types: Vec<ActivityType>,
    pub pipelines: Vec<Pipeline>,
    pub stages: Vec<Stage>,
    #[serde(alias = "owners")]
    pub users: Vec<User>,
}

impl TargetSchema {
    pub fn fields_of(&self, object: TargetObject) -> &[SchemaField] {
        match object {
            TargetObject::Person => &self.person_fields,
            TargetObject::Deal => &self.deal_fields,
            TargetObject::Activity | TargetObject::Note => &[],
        }
    }

    pub fn has_field(&self, object: TargetObject, key: &str) -> bool {
        self.fields_of(object).iter().any(|f| f.key == key)
    }

    /// Label/enum fields of an object, i.e. those carrying an option set.
    pub fn label_fields(&self, object: TargetObject) -> impl Iterator<Item = &SchemaField> {
        self.fields_of(object).iter().filter(|f| !f.options.is_empty())
    }

    /// Stages of one pipeline, in board order.
    pub fn stages_of(&self, pipeline_key: &str) -> Vec<&Stage> {
        let mut stages: Vec<&Stage> = self
            .stages
            .iter()
            .filter(|s| s.pipeline_id.as_ref().is_some_and(|p| p.matches(pipeline_key)))
            .collect();
        stages.sort_by_key(|s| s.order_nr);
        stages
    }
}
