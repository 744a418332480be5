//! Integration configuration: an explicit, versioned document updated through
//! a pure reducer (`old state + action → new state`).
//!
//! The discovery and mapping engines only ever see an immutable snapshot of it.

pub mod reduce;
pub mod submission;

pub use reduce::ConfigAction;
pub use submission::{IntegrationSubmission, SubmittedMapping};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::FieldDescriptor;
use crate::mapping::FieldMapping;
use crate::schema::CrmKind;

/// Current document format version.
pub const CONFIG_VERSION: u32 = 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Mapping index {index} is out of range ({len} mappings)")]
    MappingIndexOutOfRange { index: usize, len: usize },

    #[error("Mapping {index} targets '{target}', which has no second level")]
    NotTwoLevel { index: usize, target: String },

    #[error("Mapping {index}: level 1 must be chosen before level 2")]
    Level1NotChosen { index: usize },

    #[error("Config version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Failed to parse integration config: {0}")]
    Malformed(String),
}

/// Where calls land in the CRM: pipeline, stage and owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallRouting {
    pub pipeline_id: Option<String>,
    /// Only meaningful together with `pipeline_id`.
    pub stage_id: Option<String>,
    pub owner_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationConfig {
    pub version: u32,
    /// Incremented by every reducer step that changes the document.
    pub revision: u64,
    pub name: String,
    pub description: Option<String>,
    pub crm: CrmKind,
    pub retell_account_id: Option<String>,
    pub crm_account_id: Option<String>,
    pub agent_id: Option<String>,
    pub discovered_fields: Vec<FieldDescriptor>,
    pub mappings: Vec<FieldMapping>,
    pub routing: CallRouting,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        IntegrationConfig {
            version: CONFIG_VERSION,
            revision: 0,
            name: String::new(),
            description: None,
            crm: CrmKind::default(),
            retell_account_id: None,
            crm_account_id: None,
            agent_id: None,
            discovered_fields: Vec::new(),
            mappings: Vec::new(),
            routing: CallRouting::default(),
        }
    }
}

impl IntegrationConfig {
    pub fn new(name: impl Into<String>, crm: CrmKind) -> Self {
        IntegrationConfig {
            name: name.into(),
            crm,
            ..IntegrationConfig::default()
        }
    }

    /// Load a saved document, rejecting versions newer than this crate understands.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: IntegrationConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_VERSION,
            });
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::Malformed(e.to_string()))
    }
}
