//! Mapping validation rules (M001–M005) and stale-mapping pruning.

use crate::catalog::{self, FieldDescriptor, FieldType};
use crate::error::MapperError;
use crate::schema::{is_valid_selection, is_valid_target, two_level_kind, TargetSchema};

use super::types::FieldMapping;

/// Run all mapping rules against the current catalog and schema. Returns all findings.
pub fn validate_mappings(
    mappings: &[FieldMapping],
    catalog: &[FieldDescriptor],
    schema: &TargetSchema,
) -> Vec<MapperError> {
    let mut errors = Vec::new();

    for mapping in mappings {
        if !m005_both_ends_set(mapping, &mut errors) {
            continue;
        }
        m001_source_known(mapping, catalog, &mut errors);
        m002_target_valid(mapping, schema, &mut errors);
        m003_two_level_specified(mapping, schema, &mut errors);
        m004_boolean_pin_on_boolean(mapping, catalog, &mut errors);
    }

    errors
}

fn m005_both_ends_set(mapping: &FieldMapping, errors: &mut Vec<MapperError>) -> bool {
    if mapping.source_field.trim().is_empty() || mapping.target_field.trim().is_empty() {
        errors.push(MapperError::map(
            "M005",
            "Mapping needs both a source and a target field",
            None,
        ));
        return false;
    }
    true
}

fn m001_source_known(mapping: &FieldMapping, catalog: &[FieldDescriptor], errors: &mut Vec<MapperError>) {
    if catalog::find(catalog, &mapping.source_field).is_none() {
        errors.push(MapperError::map(
            "M001",
            format!(
                "Source field '{}' is not in the discovered catalog",
                mapping.source_field
            ),
            Some(mapping.source_field.clone()),
        ));
    }
}

fn m002_target_valid(mapping: &FieldMapping, schema: &TargetSchema, errors: &mut Vec<MapperError>) {
    if !is_valid_target(&mapping.target_field, schema) {
        errors.push(MapperError::map(
            "M002",
            format!(
                "Target '{}' does not exist in the connected CRM",
                mapping.target_field
            ),
            Some(mapping.target_field.clone()),
        ));
    }
}

fn m003_two_level_specified(mapping: &FieldMapping, schema: &TargetSchema, errors: &mut Vec<MapperError>) {
    let Some(kind) = two_level_kind(&mapping.target_field) else {
        return;
    };
    if !mapping.is_complete() {
        errors.push(MapperError::map(
            "M003",
            format!(
                "Target '{}' needs both levels selected",
                mapping.target_field
            ),
            Some(mapping.target_field.clone()),
        ));
        return;
    }

    let level1 = mapping.target_level1.as_deref().unwrap_or_default();
    let level2 = mapping.target_level2.as_deref().unwrap_or_default();
    if !is_valid_selection(kind, schema, level1, level2) {
        errors.push(MapperError::map(
            "M003",
            format!(
                "'{}' is not a valid choice under '{}' for target '{}'",
                level2, level1, mapping.target_field
            ),
            Some(mapping.target_field.clone()),
        ));
    }
}

fn m004_boolean_pin_on_boolean(
    mapping: &FieldMapping,
    catalog: &[FieldDescriptor],
    errors: &mut Vec<MapperError>,
) {
    if mapping.boolean_value.is_none() {
        return;
    }
    let Some(source) = catalog::find(catalog, &mapping.source_field) else {
        return;
    };
    if source.field_type != FieldType::Boolean {
        errors.push(MapperError::map(
            "M004",
            format!(
                "Boolean condition set on non-boolean source '{}'",
                mapping.source_field
            ),
            Some(mapping.source_field.clone()),
        ));
    }
}

/// Drop mappings whose target no longer exists in `schema`, e.g. after switching CRM accounts.
pub fn prune_stale(mappings: Vec<FieldMapping>, schema: &TargetSchema) -> Vec<FieldMapping> {
    let before = mappings.len();
    let kept: Vec<FieldMapping> = mappings
        .into_iter()
        .filter(|m| is_valid_target(&m.target_field, schema))
        .collect();
    if kept.len() < before {
        tracing::info!(pruned = before - kept.len(), "pruned stale mappings");
    }
    kept
}
