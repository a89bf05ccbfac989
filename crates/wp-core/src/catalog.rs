//! Migration catalog
//!
//! A [`Catalog`] is the ordered list of migration scripts for one target. It
//! is built once, checked against the filesystem at construction, and never
//! reordered or deduplicated afterwards.

use crate::error::{CoreError, CoreResult};
use crate::index::{find_index, MigrationIndex};
use std::path::{Path, PathBuf};

/// One catalog item: a named script at a fixed position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationEntry {
    /// 1-based position in the catalog
    pub position: usize,
    /// Script file name, relative to the catalog's base directory
    pub name: String,
}

/// Ordered, immutable list of migration scripts
#[derive(Debug, Clone)]
pub struct Catalog {
    base_dir: PathBuf,
    entries: Vec<MigrationEntry>,
}

impl Catalog {
    /// Build a catalog from an ordered list of script names.
    ///
    /// Fails on the first name whose script does not exist under `base_dir`;
    /// no partial catalog is ever returned.
    pub fn resolve<I, S>(names: I, base_dir: impl Into<PathBuf>) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let base_dir = base_dir.into();
        let mut entries = Vec::new();

        for (idx, name) in names.into_iter().enumerate() {
            let name = name.into();
            let path = base_dir.join(&name);
            if !path.exists() {
                return Err(CoreError::MissingScript {
                    name,
                    path: path.display().to_string(),
                });
            }
            entries.push(MigrationEntry {
                position: idx + 1,
                name,
            });
        }

        Ok(Self { base_dir, entries })
    }

    /// Build a catalog from an index file; scripts live next to the index.
    pub fn from_index_file(path: &Path) -> CoreResult<Self> {
        let index = MigrationIndex::load(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::resolve(index.migrations, base_dir)
    }

    /// Build a catalog from the index file found in `dir`
    pub fn from_dir(dir: &Path) -> CoreResult<Self> {
        Self::from_index_file(&find_index(dir)?)
    }

    /// Directory that script names are resolved against
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// All entries in catalog order
    pub fn entries(&self) -> &[MigrationEntry] {
        &self.entries
    }

    /// Entry at a 0-based index
    pub fn get(&self, index: usize) -> Option<&MigrationEntry> {
        self.entries.get(index)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Script names in catalog order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Full path of an entry's script
    pub fn script_path(&self, entry: &MigrationEntry) -> PathBuf {
        self.base_dir.join(&entry.name)
    }

    /// Read an entry's script text
    pub fn load_script(&self, entry: &MigrationEntry) -> CoreResult<String> {
        let path = self.script_path(entry);
        std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
