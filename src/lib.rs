//! Workflow catalog tooling for an n8n automation repository.
//!
//! The repository organizes workflow definitions (opaque n8n JSON) under
//! per-domain directories; `flowcat` scans them, extracts per-workflow
//! metadata, reconciles the result against the previously generated catalog
//! so manual curation survives, and writes the catalog YAML back out.

pub mod catalog;
pub mod config;
pub mod scan;
pub mod workflow;

pub use catalog::{
    Catalog, CatalogFile, Observability, STATUS_ACTIVE, STATUS_DEPRECATED, SchemaValidation,
    Statistics, WorkflowDescriptor, generate_catalog, load_existing_catalog, merge_catalogs,
    save_catalog,
};
pub use config::BuilderConfig;
pub use scan::scan_workflows;
pub use workflow::{WorkflowDocument, WorkflowNode, load_workflow_from_path};
