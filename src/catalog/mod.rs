//! Catalog model, generation, merge, and persistence.
//!
//! The catalog on disk is a YAML document under a single top-level
//! `catalog:` key. Operators edit the manual fields between runs;
//! regeneration recomputes everything else and must leave those edits alone.

pub mod merge;
pub mod model;
pub mod store;

pub use merge::merge_catalogs;
pub use model::{
    Catalog, CatalogFile, Observability, STATUS_ACTIVE, STATUS_DEPRECATED, SchemaValidation,
    Statistics, WorkflowDescriptor, generate_catalog,
};
pub use store::{load_existing_catalog, save_catalog};

/// Catalog format version stamped into every generated snapshot.
pub const CATALOG_VERSION: &str = "1.0.0";
