//! Directory scan and per-workflow metadata extraction.
//!
//! The scan walks the configured roots in order, file names sorted within
//! each root, and produces one descriptor per parseable workflow file. A
//! malformed file is warned about and skipped; it never aborts the pass.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Observability, STATUS_ACTIVE, SchemaValidation, WorkflowDescriptor};
use crate::config::BuilderConfig;
use crate::workflow::{self, WorkflowDocument};

const DESCRIPTOR_VERSION: &str = "1.0.0";
const WORKFLOW_EXTENSION: &str = "json";

/// Keyword to tag rules, matched case-insensitively against the workflow
/// name as substrings.
const TAG_RULES: &[(&[&str], &str)] = &[
    (&["error", "handler"], "error-handling"),
    (&["log"], "logging"),
    (&["slack", "notify"], "notifications"),
    (&["approval"], "approvals"),
    (&["health", "check"], "monitoring"),
];

/// Keyword to schema-type rules, matched case-insensitively against the
/// workflow id; first matching rule wins.
const SCHEMA_TYPE_RULES: &[(&[&str], &str)] = &[
    (&["contact", "lead"], "contact"),
    (&["incident", "error"], "incident"),
    (&["infra", "deploy", "terraform"], "infra_deploy"),
    (&["event", "log"], "event"),
];
const DEFAULT_SCHEMA_TYPE: &str = "event";

/// Scan every configured root and extract a descriptor per workflow file.
pub fn scan_workflows(config: &BuilderConfig) -> Result<Vec<WorkflowDescriptor>> {
    let mut descriptors = Vec::new();
    for root in &config.roots {
        if !root.is_dir() {
            continue;
        }
        for path in workflow_files(root)? {
            match workflow::load_workflow_from_path(&path) {
                Ok(document) => {
                    descriptors.push(descriptor_from_document(config, &path, &document));
                }
                Err(err) => {
                    eprintln!("flowcat: warning: skipping {}: {err:#}", path.display());
                }
            }
        }
    }
    Ok(descriptors)
}

fn workflow_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries =
        fs::read_dir(root).with_context(|| format!("reading directory {}", root.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("reading directory {}", root.display()))?
            .path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == WORKFLOW_EXTENSION)
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn descriptor_from_document(
    config: &BuilderConfig,
    path: &Path,
    document: &WorkflowDocument,
) -> WorkflowDescriptor {
    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let relative = path
        .strip_prefix(&config.workflows_dir)
        .unwrap_or(path)
        .to_path_buf();
    let domain = config.domain_for_path(&relative);
    let name = document.display_name(&id);
    let description = describe(document, &name);

    let endpoints = document
        .webhook_paths()
        .map(|path| format!("/webhook/{path}"))
        .collect();
    let dependencies = document
        .sub_workflow_ids()
        .map(str::to_string)
        .collect();

    let schema_validation = SchemaValidation {
        required: true,
        schema_type: infer_schema_type(&id),
    };
    let tags = infer_tags(document, &domain, &name);
    let file_path = relative.to_string_lossy().replace('\\', "/");

    WorkflowDescriptor {
        id,
        name,
        domain,
        description,
        version: DESCRIPTOR_VERSION.to_string(),
        status: STATUS_ACTIVE.to_string(),
        file_path,
        endpoints,
        dependencies,
        tags,
        schema_validation,
        observability: Observability::default(),
        owner: None,
        risk_level: None,
        classification: None,
        maintenance: None,
        extra: BTreeMap::new(),
    }
}

/// Best-effort description: start-node notes, then the declared execution
/// order hint, then a generated fallback.
fn describe(document: &WorkflowDocument, name: &str) -> String {
    if let Some(notes) = document.start_notes() {
        return notes.to_string();
    }
    if let Some(order) = document
        .settings
        .execution_order
        .as_deref()
        .filter(|order| !order.is_empty())
    {
        return order.to_string();
    }
    format!("{name} workflow")
}

/// Domain tag plus declared tags plus keyword-inferred tags, deduplicated
/// and sorted.
fn infer_tags(document: &WorkflowDocument, domain: &str, name: &str) -> Vec<String> {
    let mut tags: BTreeSet<String> = BTreeSet::new();
    tags.insert(domain.to_string());
    for tag in document.declared_tags() {
        tags.insert(tag.to_string());
    }
    let lowered = name.to_lowercase();
    for (keywords, tag) in TAG_RULES {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            tags.insert(tag.to_string());
        }
    }
    tags.into_iter().collect()
}

fn infer_schema_type(id: &str) -> String {
    let lowered = id.to_lowercase();
    for (keywords, schema_type) in SCHEMA_TYPE_RULES {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return schema_type.to_string();
        }
    }
    DEFAULT_SCHEMA_TYPE.to_string()
}
