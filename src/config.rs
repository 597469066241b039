//! Builder configuration and repository discovery.
//!
//! The builder never assumes a fixed repository layout. Callers construct a
//! `BuilderConfig` (usually via [`BuilderConfig::discover`]) and pass it into
//! scan and persist; tests build one against a scratch directory.

use anyhow::{Result, bail};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_ROOT: &str = "FLOWCAT_ROOT";
const WORKFLOWS_DIR: &str = "workflows";
const CATALOG_RELATIVE: &str = "metadata/workflows_catalog.yaml";

/// Path-substring to domain table, highest priority first. The trailing
/// entries cover the legacy directory layout kept around during migration.
const DOMAIN_MAPPINGS: &[(&str, &str)] = &[
    ("domains/shared", "shared"),
    ("domains/crm", "crm"),
    ("domains/infra", "infra"),
    ("domains/meta", "meta"),
    ("platform", "shared"),
    ("domain_crm", "crm"),
    ("domain_infra", "infra"),
];

/// Candidate roots scanned for workflow files, relative to the workflows
/// directory, in traversal order. Nonexistent roots are skipped.
const SCAN_ROOTS: &[&str] = &[
    "domains/shared",
    "domains/crm",
    "domains/infra",
    "domains/meta",
    "platform",
    "domain_crm",
    "domain_infra",
];

/// Fallback domain when no table entry matches a workflow's path.
pub const UNKNOWN_DOMAIN: &str = "unknown";

#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Base of the workflows tree; `file_path` fields are relative to it.
    pub workflows_dir: PathBuf,
    /// Directories scanned for `*.json` workflow files, in order.
    pub roots: Vec<PathBuf>,
    /// Path-substring to domain entries, checked in order.
    pub domain_map: Vec<(String, String)>,
    /// Where the catalog artifact is read from and written to.
    pub catalog_path: PathBuf,
}

impl BuilderConfig {
    /// Config for the standard layout rooted at `workflows_dir`.
    pub fn for_workflows_dir(workflows_dir: impl Into<PathBuf>) -> Self {
        let workflows_dir = workflows_dir.into();
        let roots = SCAN_ROOTS
            .iter()
            .map(|root| workflows_dir.join(root))
            .collect();
        let catalog_path = workflows_dir.join(CATALOG_RELATIVE);
        Self {
            workflows_dir,
            roots,
            domain_map: default_domain_map(),
            catalog_path,
        }
    }

    /// Locate the repository's workflows tree.
    ///
    /// `FLOWCAT_ROOT` wins when it points at a directory containing
    /// `workflows/`; otherwise the current directory and its ancestors are
    /// searched for one.
    pub fn discover() -> Result<Self> {
        if let Ok(env_root) = env::var(ENV_ROOT) {
            if let Some(root) = repo_root_from_hint(&env_root) {
                return Ok(Self::for_workflows_dir(root.join(WORKFLOWS_DIR)));
            }
        }

        let cwd = env::current_dir()?;
        if let Some(root) = search_upwards(&cwd) {
            return Ok(Self::for_workflows_dir(root.join(WORKFLOWS_DIR)));
        }

        bail!(
            "Unable to locate a workflows directory. Run from the automation repository or set {ENV_ROOT}."
        );
    }

    /// Resolve the domain for a workflow path (relative to the workflows
    /// dir) against the mapping table; first match wins.
    pub fn domain_for_path(&self, relative: &Path) -> String {
        let haystack = relative.to_string_lossy().replace('\\', "/");
        for (pattern, domain) in &self.domain_map {
            if haystack.contains(pattern.as_str()) {
                return domain.clone();
            }
        }
        UNKNOWN_DOMAIN.to_string()
    }
}

/// The standard domain mapping table as an owned value.
pub fn default_domain_map() -> Vec<(String, String)> {
    DOMAIN_MAPPINGS
        .iter()
        .map(|(pattern, domain)| (pattern.to_string(), domain.to_string()))
        .collect()
}

fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(WORKFLOWS_DIR).is_dir()
}

fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !is_repo_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
