//! Discovery phase: call events → field descriptor catalog.
//!
//! Output is always the baseline catalog followed by whatever the payload's
//! well-known containers expose, with duplicate ids dropped (first one wins).

pub mod containers;
pub mod recent;

pub use containers::{CUSTOM_ANALYSIS, DYNAMIC_VARIABLES, METADATA};
pub use recent::{
    counts_by_agent, discover_recent, CustomFieldCounts, CustomKeySets, DiscoveryReport, UNKNOWN_AGENT,
};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{standard_fields, FieldDescriptor};
use crate::parse::CallEvent;

/// System keys that carry no business meaning and are left out of custom-field counts.
pub const DEFAULT_IGNORED_KEYS: &[&str] = &[
    "current_time",
    "current_timezone",
    "agent_version",
    "retell_llm_version",
    "access_token",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoveryOptions {
    pub ignored_keys: Vec<String>,
    /// Attach the observed value to each discovered descriptor.
    pub include_samples: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        DiscoveryOptions {
            ignored_keys: DEFAULT_IGNORED_KEYS.iter().map(|k| k.to_string()).collect(),
            include_samples: true,
        }
    }
}

impl DiscoveryOptions {
    pub fn is_ignored(&self, key: &str) -> bool {
        self.ignored_keys.iter().any(|k| k == key)
    }
}

/// Discover the field catalog of one payload with default options.
pub fn discover(event: &CallEvent) -> Vec<FieldDescriptor> {
    discover_with(event, &DiscoveryOptions::default())
}

pub fn discover_with(event: &CallEvent, options: &DiscoveryOptions) -> Vec<FieldDescriptor> {
    let mut catalog = CatalogBuilder::new();
    catalog.extend(discovered_fields(event, options));
    catalog.finish()
}

/// Only the payload-specific descriptors, without the baseline.
pub(crate) fn discovered_fields(event: &CallEvent, options: &DiscoveryOptions) -> Vec<FieldDescriptor> {
    if event.call.is_none() {
        tracing::debug!(event = %event.event, "payload has no call object; baseline catalog only");
        return Vec::new();
    }

    let samples = options.include_samples;
    let mut fields = containers::dynamic_variable_fields(event, samples);
    let variables = fields.len();
    fields.extend(containers::metadata_fields(event, samples));
    let metadata = fields.len() - variables;
    fields.extend(containers::custom_analysis_fields(event, samples));
    let analysis = fields.len() - variables - metadata;

    tracing::debug!(
        event = %event.event,
        variables,
        metadata,
        analysis,
        "discovered custom fields"
    );
    fields
}

/// Accumulates descriptors on top of the baseline, dropping repeated ids.
pub(crate) struct CatalogBuilder {
    fields: Vec<FieldDescriptor>,
    seen: HashSet<String>,
}

impl CatalogBuilder {
    pub(crate) fn new() -> Self {
        let fields = standard_fields();
        let seen = fields.iter().map(|f| f.id.clone()).collect();
        CatalogBuilder { fields, seen }
    }

    pub(crate) fn extend(&mut self, fields: impl IntoIterator<Item = FieldDescriptor>) {
        for field in fields {
            if self.seen.insert(field.id.clone()) {
                self.fields.push(field);
            }
        }
    }

    pub(crate) fn finish(self) -> Vec<FieldDescriptor> {
        self.fields
    }
}
