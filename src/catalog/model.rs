//! Catalog data model and snapshot generation.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

use crate::catalog::CATALOG_VERSION;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_DEPRECATED: &str = "deprecated";

/// Risk levels always present in the statistics block, even at zero.
const RISK_LEVELS: &[&str] = &["low", "medium", "high", "critical"];

/// One catalog entry per workflow file.
///
/// Everything except the manual fields is recomputed on every run. The four
/// manual fields (`owner`, `risk_level`, `classification`, `maintenance`) are
/// operator-owned and only ever copied from the prior catalog; `extra`
/// round-trips keys this tool does not know about, so a deprecated entry is
/// carried forward exactly as the operator last saw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDescriptor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub endpoints: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub schema_validation: SchemaValidation,
    #[serde(default)]
    pub observability: Observability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl WorkflowDescriptor {
    /// Copy the manual fields from a prior catalog entry onto this one.
    /// Absent prior values leave the fresh (empty) values in place.
    pub fn adopt_manual_fields(&mut self, prior: &WorkflowDescriptor) {
        if prior.owner.is_some() {
            self.owner = prior.owner.clone();
        }
        if prior.risk_level.is_some() {
            self.risk_level = prior.risk_level.clone();
        }
        if prior.classification.is_some() {
            self.classification = prior.classification.clone();
        }
        if prior.maintenance.is_some() {
            self.maintenance = prior.maintenance.clone();
        }
    }

    fn risk_level_str(&self) -> Option<&str> {
        self.risk_level.as_ref().and_then(Value::as_str)
    }
}

fn default_status() -> String {
    STATUS_ACTIVE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaValidation {
    pub required: bool,
    pub schema_type: String,
}

impl Default for SchemaValidation {
    fn default() -> Self {
        Self {
            required: true,
            schema_type: "event".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observability {
    pub metrics_enabled: bool,
    pub logging_enabled: bool,
}

impl Default for Observability {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            logging_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub by_domain: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_status: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_risk_level: BTreeMap<String, u64>,
}

impl Statistics {
    pub fn for_workflows(workflows: &[WorkflowDescriptor]) -> Self {
        let mut stats = Self::default();
        for level in RISK_LEVELS {
            stats.by_risk_level.insert(level.to_string(), 0);
        }
        for workflow in workflows {
            *stats.by_domain.entry(workflow.domain.clone()).or_insert(0) += 1;
            *stats.by_status.entry(workflow.status.clone()).or_insert(0) += 1;
            if let Some(level) = workflow.risk_level_str() {
                *stats.by_risk_level.entry(level.to_string()).or_insert(0) += 1;
            }
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub version: String,
    pub generated_at: String,
    pub total_workflows: usize,
    #[serde(default)]
    pub workflows: Vec<WorkflowDescriptor>,
    #[serde(default)]
    pub statistics: Statistics,
}

/// On-disk shape: the catalog sits under a single top-level `catalog:` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub catalog: Catalog,
}

/// Wrap a descriptor sequence into a catalog snapshot. Pure aggregation
/// apart from reading the clock.
pub fn generate_catalog(workflows: Vec<WorkflowDescriptor>) -> Catalog {
    let statistics = Statistics::for_workflows(&workflows);
    Catalog {
        version: CATALOG_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        total_workflows: workflows.len(),
        workflows,
        statistics,
    }
}
