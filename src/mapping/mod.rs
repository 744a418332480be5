//! Mapping phase: discovered fields → proposed CRM field mappings.

pub mod generate;
pub mod preview;
pub mod rules;
pub mod transform;
pub mod types;
pub mod validate;

pub use generate::{generate_from_rules, generate_mappings, GenerateOptions, Generation};
pub use preview::{preview_mappings, MappingPreview};
pub use rules::{MappingRule, RULES};
pub use transform::{suggest_transform, Transform};
pub use types::{FieldMapping, Provenance};
pub use validate::{prune_stale, validate_mappings};
