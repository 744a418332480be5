//! Discovery over a batch of recent calls, with per-source custom-field counts.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::containers::{container_keys, CUSTOM_ANALYSIS, DYNAMIC_VARIABLES, METADATA};
use super::{discovered_fields, CatalogBuilder, DiscoveryOptions};
use crate::catalog::FieldDescriptor;
use crate::parse::CallEvent;

/// Agent bucket for calls that carry no agent id.
pub const UNKNOWN_AGENT: &str = "unknown";

/// Raw container keys seen across a batch, system keys removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomKeySets {
    pub variables: BTreeSet<String>,
    pub metadata: BTreeSet<String>,
    pub analysis: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldCounts {
    pub variables: usize,
    pub metadata: usize,
    pub analysis: usize,
    pub total: usize,
}

impl CustomKeySets {
    fn collect(&mut self, event: &CallEvent, options: &DiscoveryOptions) {
        let keep = |key: &String| !options.is_ignored(key);
        self.variables
            .extend(container_keys(event, DYNAMIC_VARIABLES).into_iter().filter(keep));
        self.metadata
            .extend(container_keys(event, METADATA).into_iter().filter(keep));
        self.analysis
            .extend(container_keys(event, CUSTOM_ANALYSIS).into_iter().filter(keep));
    }

    pub fn counts(&self) -> CustomFieldCounts {
        let variables = self.variables.len();
        let metadata = self.metadata.len();
        let analysis = self.analysis.len();
        CustomFieldCounts {
            variables,
            metadata,
            analysis,
            total: variables + metadata + analysis,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryReport {
    /// Baseline followed by the union of discovered fields, first-seen order.
    pub fields: Vec<FieldDescriptor>,
    pub custom_keys: CustomKeySets,
    pub calls_scanned: usize,
}

impl DiscoveryReport {
    pub fn counts(&self) -> CustomFieldCounts {
        self.custom_keys.counts()
    }
}

/// Union the catalogs of several calls.
pub fn discover_recent(events: &[CallEvent], options: &DiscoveryOptions) -> DiscoveryReport {
    let mut catalog = CatalogBuilder::new();
    let mut custom_keys = CustomKeySets::default();

    for event in events {
        catalog.extend(discovered_fields(event, options));
        custom_keys.collect(event, options);
    }

    let report = DiscoveryReport {
        fields: catalog.finish(),
        custom_keys,
        calls_scanned: events.len(),
    };
    let counts = report.counts();
    tracing::info!(
        calls = report.calls_scanned,
        fields = report.fields.len(),
        custom = counts.total,
        "discovered fields from recent calls"
    );
    report
}

/// Custom-field counts per agent id.
pub fn counts_by_agent(
    events: &[CallEvent],
    options: &DiscoveryOptions,
) -> BTreeMap<String, CustomFieldCounts> {
    let mut per_agent: BTreeMap<String, CustomKeySets> = BTreeMap::new();
    for event in events {
        let agent = event.agent_id().unwrap_or(UNKNOWN_AGENT).to_string();
        per_agent.entry(agent).or_default().collect(event, options);
    }
    per_agent
        .into_iter()
        .map(|(agent, keys)| (agent, keys.counts()))
        .collect()
}
