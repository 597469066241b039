//! Catalog persistence.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::Path;

use crate::catalog::model::CatalogFile;

/// Load the previously generated catalog so manual edits can be preserved.
///
/// A missing file is "no prior state". An unreadable or unparseable file is
/// downgraded to a warning and also treated as empty; regeneration should
/// never be blocked by a corrupted artifact it is about to replace.
pub fn load_existing_catalog(path: &Path) -> Option<CatalogFile> {
    if !path.is_file() {
        return None;
    }
    match read_catalog(path) {
        Ok(catalog) => Some(catalog),
        Err(err) => {
            eprintln!("flowcat: warning: could not load existing catalog: {err:#}");
            None
        }
    }
}

fn read_catalog(path: &Path) -> Result<CatalogFile> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_yaml::from_reader(file).with_context(|| format!("parsing {}", path.display()))
}

/// Serialize the catalog, creating parent directories as needed. Overwrites
/// unconditionally; I/O errors propagate to the caller.
pub fn save_catalog(catalog: &CatalogFile, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_yaml::to_writer(file, catalog)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::generate_catalog;
    use tempfile::TempDir;

    #[test]
    fn missing_catalog_is_empty_prior_state() {
        let temp = TempDir::new().unwrap();
        assert!(load_existing_catalog(&temp.path().join("absent.yaml")).is_none());
    }

    #[test]
    fn malformed_catalog_is_downgraded_to_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.yaml");
        fs::write(&path, "catalog: [not, the, expected, shape").unwrap();
        assert!(load_existing_catalog(&path).is_none());
    }

    #[test]
    fn save_creates_parent_directories_and_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("metadata/workflows_catalog.yaml");
        let written = CatalogFile {
            catalog: generate_catalog(Vec::new()),
        };
        save_catalog(&written, &path).unwrap();
        let loaded = load_existing_catalog(&path).expect("catalog should load");
        assert_eq!(loaded, written);
    }
}
