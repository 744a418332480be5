//! Reducer for `IntegrationConfig`.

use serde::{Deserialize, Serialize};

use super::{CallRouting, ConfigError, IntegrationConfig};
use crate::catalog::FieldDescriptor;
use crate::mapping::{self, FieldMapping, GenerateOptions, Generation, Provenance};
use crate::schema::{CrmKind, TargetSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConfigAction {
    Rename {
        name: String,
    },
    Describe {
        description: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    ConnectAccounts {
        crm: CrmKind,
        retell_account_id: Option<String>,
        crm_account_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    SelectAgent {
        agent_id: Option<String>,
    },
    /// A fresh discovery result replaces the previous one wholesale.
    ReplaceDiscovered {
        fields: Vec<FieldDescriptor>,
    },
    AddMapping {
        mapping: FieldMapping,
    },
    UpdateMapping {
        index: usize,
        mapping: FieldMapping,
    },
    RemoveMapping {
        index: usize,
    },
    SetMappingLevel1 {
        index: usize,
        value: Option<String>,
    },
    SetMappingLevel2 {
        index: usize,
        value: Option<String>,
    },
    GenerateMappings {
        schema: Box<TargetSchema>,
        #[serde(default)]
        force: bool,
    },
    PruneStale {
        schema: Box<TargetSchema>,
    },
    #[serde(rename_all = "camelCase")]
    SetRouting {
        pipeline_id: Option<String>,
        stage_id: Option<String>,
        owner_id: Option<String>,
    },
}

impl IntegrationConfig {
    /// Apply one action and return the next state. `self` is never modified;
    /// a step that changes nothing returns an equal document with the same revision.
    pub fn reduce(&self, action: ConfigAction) -> Result<IntegrationConfig, ConfigError> {
        let mut next = self.clone();
        next.apply(action)?;
        if next != *self {
            next.revision = self.revision + 1;
        }
        Ok(next)
    }

    fn apply(&mut self, action: ConfigAction) -> Result<(), ConfigError> {
        match action {
            ConfigAction::Rename { name } => self.name = name,
            ConfigAction::Describe { description } => self.description = description,
            ConfigAction::ConnectAccounts {
                crm,
                retell_account_id,
                crm_account_id,
            } => {
                if crm != self.crm {
                    // Pipelines and owners belong to the previous CRM.
                    self.routing = CallRouting::default();
                }
                self.crm = crm;
                self.retell_account_id = retell_account_id;
                self.crm_account_id = crm_account_id;
            }
            ConfigAction::SelectAgent { agent_id } => {
                if agent_id != self.agent_id {
                    self.discovered_fields.clear();
                }
                self.agent_id = agent_id;
            }
            ConfigAction::ReplaceDiscovered { fields } => self.discovered_fields = fields,
            ConfigAction::AddMapping { mut mapping } => {
                mapping.source = Provenance::Manual;
                self.mappings.push(mapping);
            }
            ConfigAction::UpdateMapping { index, mut mapping } => {
                let slot = self.mapping_mut(index)?;
                mapping.source = Provenance::Manual;
                *slot = mapping;
            }
            ConfigAction::RemoveMapping { index } => {
                self.mapping_mut(index)?;
                self.mappings.remove(index);
            }
            ConfigAction::SetMappingLevel1 { index, value } => {
                let slot = self.two_level_mapping_mut(index)?;
                slot.set_level1(value);
                slot.source = Provenance::Manual;
            }
            ConfigAction::SetMappingLevel2 { index, value } => {
                let slot = self.two_level_mapping_mut(index)?;
                if value.is_some() && slot.target_level1.is_none() {
                    return Err(ConfigError::Level1NotChosen { index });
                }
                slot.target_level2 = value;
                slot.source = Provenance::Manual;
            }
            ConfigAction::GenerateMappings { schema, force } => {
                let existing = std::mem::take(&mut self.mappings);
                let outcome = mapping::generate_mappings(
                    existing,
                    &self.discovered_fields,
                    &schema,
                    GenerateOptions { force },
                );
                if let Generation::Empty = outcome {
                    tracing::info!(agent = ?self.agent_id, "nothing generated; run discovery first");
                }
                self.mappings = outcome.into_mappings();
            }
            ConfigAction::PruneStale { schema } => {
                let mappings = std::mem::take(&mut self.mappings);
                self.mappings = mapping::prune_stale(mappings, &schema);
            }
            ConfigAction::SetRouting {
                pipeline_id,
                stage_id,
                owner_id,
            } => {
                // A stage is only valid under a chosen pipeline.
                let stage_id = if pipeline_id.is_some() { stage_id } else { None };
                self.routing = CallRouting {
                    pipeline_id,
                    stage_id,
                    owner_id,
                };
            }
        }
        Ok(())
    }

    fn mapping_mut(&mut self, index: usize) -> Result<&mut FieldMapping, ConfigError> {
        let len = self.mappings.len();
        self.mappings
            .get_mut(index)
            .ok_or(ConfigError::MappingIndexOutOfRange { index, len })
    }

    fn two_level_mapping_mut(&mut self, index: usize) -> Result<&mut FieldMapping, ConfigError> {
        let slot = self.mapping_mut(index)?;
        if !slot.is_two_level() {
            return Err(ConfigError::NotTwoLevel {
                index,
                target: slot.target_field.clone(),
            });
        }
        Ok(slot)
    }
}
