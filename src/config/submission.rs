//! Readiness checks (C001–C003) and the document submitted to the backend.

use serde::{Deserialize, Serialize};

use super::{CallRouting, IntegrationConfig};
use crate::error::MapperError;
use crate::mapping::{FieldMapping, Transform};
use crate::schema::CrmKind;

/// One mapping in backend wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedMapping {
    pub crm_field: String,
    pub retell_field: String,
    pub transform: Option<Transform>,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crm_field_level1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crm_field_level2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,
}

impl From<&FieldMapping> for SubmittedMapping {
    fn from(m: &FieldMapping) -> Self {
        SubmittedMapping {
            crm_field: m.target_field.clone(),
            retell_field: m.source_field.clone(),
            transform: m.transform,
            required: m.required,
            crm_field_level1: m.target_level1.clone(),
            crm_field_level2: m.target_level2.clone(),
            boolean_value: m.boolean_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationSubmission {
    pub version: u32,
    pub name: String,
    pub description: Option<String>,
    pub crm: CrmKind,
    pub retell_account_id: Option<String>,
    pub crm_account_id: Option<String>,
    pub agent_id: Option<String>,
    pub field_mappings: Vec<SubmittedMapping>,
    pub routing: CallRouting,
}

impl IntegrationConfig {
    /// Mappings with both ends (and both levels, where needed) chosen.
    pub fn complete_mappings(&self) -> impl Iterator<Item = &FieldMapping> {
        self.mappings.iter().filter(|m| m.is_complete())
    }

    /// Everything that blocks saving. Half-specified mappings are ignored, not reported.
    pub fn readiness(&self) -> Vec<MapperError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(MapperError::config("C001", "Integration needs a name"));
        }
        if self.agent_id.as_deref().is_none_or(|id| id.trim().is_empty()) {
            errors.push(MapperError::config("C002", "Select a voice agent"));
        }
        if self.complete_mappings().next().is_none() {
            errors.push(MapperError::config(
                "C003",
                "Add at least one complete field mapping",
            ));
        }
        errors
    }

    pub fn is_ready(&self) -> bool {
        self.readiness().is_empty()
    }

    pub fn to_submission(&self) -> IntegrationSubmission {
        IntegrationSubmission {
            version: self.version,
            name: self.name.clone(),
            description: self.description.clone(),
            crm: self.crm,
            retell_account_id: self.retell_account_id.clone(),
            crm_account_id: self.crm_account_id.clone(),
            agent_id: self.agent_id.clone(),
            field_mappings: self.complete_mappings().map(SubmittedMapping::from).collect(),
            routing: self.routing.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(errors: &[MapperError]) -> Vec<&str> {
        errors.iter().map(|e| e.code.as_str()).collect()
    }

    #[test]
    fn empty_config_is_not_ready() {
        let config = IntegrationConfig::default();
        assert_eq!(codes(&config.readiness()), vec!["C001", "C002", "C003"]);
        assert!(!config.is_ready());
    }

    #[test]
    fn half_specified_mapping_does_not_count() {
        let config = IntegrationConfig {
            name: "Inbound".into(),
            agent_id: Some("agent_a".into()),
            mappings: vec![FieldMapping::manual("from_number", "deal.stage_id")],
            ..IntegrationConfig::default()
        };
        assert_eq!(codes(&config.readiness()), vec!["C003"]);
        assert!(config.to_submission().field_mappings.is_empty());
    }

    #[test]
    fn submission_uses_backend_names() {
        let mut mapping = FieldMapping::manual("from_number", "person.phone");
        mapping.transform = Some(Transform::PhoneFormat);
        mapping.required = true;
        let config = IntegrationConfig {
            name: "Inbound".into(),
            agent_id: Some("agent_a".into()),
            mappings: vec![mapping],
            ..IntegrationConfig::default()
        };
        assert!(config.is_ready());

        let v = serde_json::to_value(config.to_submission()).unwrap();
        let first = &v["fieldMappings"][0];
        assert_eq!(first["crmField"], "person.phone");
        assert_eq!(first["retellField"], "from_number");
        assert_eq!(first["transform"], "phone_format");
        assert_eq!(first["required"], true);
        assert!(first.get("crmFieldLevel1").is_none());
    }
}
