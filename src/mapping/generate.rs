//! Mapping generator: rule library × discovered catalog × target schema.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::rules::{MappingRule, RULES};
use super::transform::suggest_transform;
use super::types::{FieldMapping, Provenance};
use crate::catalog::{self, FieldDescriptor};
use crate::schema::{is_valid_target, TargetSchema};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Replace existing mappings instead of leaving them alone.
    pub force: bool,
}

/// Outcome of a generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Mappings already existed and `force` was off; they are returned untouched.
    Skipped(Vec<FieldMapping>),
    Generated(Vec<FieldMapping>),
    /// No rule matched the catalog. Not an error: discovery probably has not run.
    Empty,
}

impl Generation {
    pub fn mappings(&self) -> &[FieldMapping] {
        match self {
            Generation::Skipped(m) | Generation::Generated(m) => m,
            Generation::Empty => &[],
        }
    }

    pub fn into_mappings(self) -> Vec<FieldMapping> {
        match self {
            Generation::Skipped(m) | Generation::Generated(m) => m,
            Generation::Empty => Vec::new(),
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Generation::Skipped(_) => "skipped",
            Generation::Generated(_) => "generated",
            Generation::Empty => "empty",
        }
    }
}

/// Propose mappings from the built-in rule library.
pub fn generate_mappings(
    existing: Vec<FieldMapping>,
    catalog: &[FieldDescriptor],
    schema: &TargetSchema,
    options: GenerateOptions,
) -> Generation {
    generate_from_rules(RULES, existing, catalog, schema, options)
}

/// Same as [`generate_mappings`] with a caller-supplied rule set.
pub fn generate_from_rules(
    rules: &[MappingRule],
    existing: Vec<FieldMapping>,
    catalog: &[FieldDescriptor],
    schema: &TargetSchema,
    options: GenerateOptions,
) -> Generation {
    if !existing.is_empty() && !options.force {
        tracing::debug!(
            existing = existing.len(),
            "mappings already present; skipping generation"
        );
        return Generation::Skipped(existing);
    }
    if options.force && !existing.is_empty() {
        tracing::info!(replaced = existing.len(), "forced mapping regeneration");
    }

    let mut seen = HashSet::new();
    let mut mappings = Vec::new();

    for rule in rules {
        let Some(source) = resolve_source(rule, catalog) else {
            tracing::debug!(
                source = rule.source_field,
                target = rule.target_field,
                "rule source not in catalog; dropped"
            );
            continue;
        };
        if !is_valid_target(rule.target_field, schema) {
            tracing::debug!(
                source = rule.source_field,
                target = rule.target_field,
                "rule target not in schema; dropped"
            );
            continue;
        }

        let mapping = FieldMapping {
            source_field: source.id.clone(),
            target_field: rule.target_field.to_string(),
            target_level1: None,
            target_level2: None,
            boolean_value: rule.boolean_value,
            transform: rule
                .transform
                .or_else(|| suggest_transform(source, rule.target_field)),
            required: rule.required,
            source: Provenance::Workflow,
        };
        if seen.insert(mapping.dedup_key()) {
            mappings.push(mapping);
        }
    }

    if mappings.is_empty() {
        tracing::info!("no mapping rule matched the discovered fields");
        return Generation::Empty;
    }
    tracing::info!(count = mappings.len(), "generated mappings");
    Generation::Generated(mappings)
}

/// Match a rule's source by id, falling back to display name.
fn resolve_source<'a>(rule: &MappingRule, catalog: &'a [FieldDescriptor]) -> Option<&'a FieldDescriptor> {
    catalog::find(catalog, rule.source_field)
        .or_else(|| catalog::find_by_name(catalog, rule.source_name))
}
