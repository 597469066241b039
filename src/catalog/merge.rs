//! Reconciliation of a fresh scan against the previously persisted catalog.
//!
//! Fresh-scan values always win except for the operator-owned manual fields.
//! Ids that vanished from the scan are carried forward as deprecated rather
//! than silently dropped; the merged sequence is sorted by id so catalog
//! diffs are stable regardless of directory traversal order.

use std::collections::BTreeMap;

use crate::catalog::model::{Catalog, STATUS_DEPRECATED, Statistics, WorkflowDescriptor};

pub fn merge_catalogs(existing: Option<Catalog>, fresh: Catalog) -> Catalog {
    let Some(existing) = existing.filter(|catalog| !catalog.workflows.is_empty()) else {
        return fresh;
    };

    let mut prior_by_id: BTreeMap<String, WorkflowDescriptor> = existing
        .workflows
        .into_iter()
        .map(|workflow| (workflow.id.clone(), workflow))
        .collect();

    let mut merged: BTreeMap<String, WorkflowDescriptor> = BTreeMap::new();
    let Catalog {
        version,
        generated_at,
        workflows,
        ..
    } = fresh;

    for mut descriptor in workflows {
        if let Some(prior) = prior_by_id.remove(&descriptor.id) {
            if prior.domain != descriptor.domain && !prior.domain.is_empty() {
                eprintln!(
                    "flowcat: warning: domain for '{}' changed from '{}' to '{}'",
                    descriptor.id, prior.domain, descriptor.domain
                );
            }
            descriptor.adopt_manual_fields(&prior);
        }
        merged.insert(descriptor.id.clone(), descriptor);
    }

    // Everything left in the prior catalog has no matching file anymore.
    for (id, mut prior) in prior_by_id {
        prior.status = STATUS_DEPRECATED.to_string();
        merged.insert(id, prior);
    }

    let workflows: Vec<WorkflowDescriptor> = merged.into_values().collect();
    let statistics = Statistics::for_workflows(&workflows);
    Catalog {
        version,
        generated_at,
        total_workflows: workflows.len(),
        workflows,
        statistics,
    }
}
