//! Target schema model and the dynamic target-field catalog built from it.

pub mod targets;
pub mod two_level;
pub mod types;

pub use targets::{is_action, is_valid_target, target_fields, TargetField, TargetKind};
pub use two_level::{
    is_valid_selection, level1_options, level2_options, two_level_kind, SelectOption, TwoLevelKind,
};
pub use types::*;

use crate::error::MapperError;

/// Deserialize a target schema JSON document.
pub fn parse_schema(json: &str) -> Result<TargetSchema, Vec<MapperError>> {
    serde_json::from_str::<TargetSchema>(json).map_err(|e| {
        vec![MapperError::parse(
            "P001",
            format!("Failed to parse target schema JSON: {}", e),
        )]
    })
}
