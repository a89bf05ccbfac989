//! Migration index decoding
//!
//! The index is the document that lists migration scripts in the order they
//! must run. It may be written as YAML or JSON; the decoder is picked from the
//! file extension.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names probed by [`find_index`], in order of preference.
pub const INDEX_FILE_NAMES: &[&str] = &["index.yaml", "index.yml", "index.json"];

/// Decoder for an index document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    Yaml,
    Json,
}

impl IndexFormat {
    /// Select a decoder from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "yaml" | "yml" => Ok(IndexFormat::Yaml),
            "json" => Ok(IndexFormat::Json),
            _ => Err(CoreError::UnsupportedIndexFormat {
                path: path.display().to_string(),
                extension: format!(".{extension}"),
            }),
        }
    }
}

/// Decoded contents of an index file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationIndex {
    /// Script file names relative to the index file's directory, in run order
    pub migrations: Vec<String>,
}

impl MigrationIndex {
    /// Load and decode an index file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::IndexNotFound {
                path: path.display().to_string(),
            });
        }

        let format = IndexFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(&content, format).map_err(|message| CoreError::IndexParseError {
            path: path.display().to_string(),
            message,
        })
    }

    /// Decode index text with an explicit format
    pub fn parse(content: &str, format: IndexFormat) -> Result<Self, String> {
        match format {
            IndexFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            IndexFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// Locate the index file inside a migrations directory.
///
/// Probes [`INDEX_FILE_NAMES`] in order and returns the first that exists.
pub fn find_index(dir: &Path) -> CoreResult<PathBuf> {
    INDEX_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| CoreError::IndexNotFound {
            path: dir.join(INDEX_FILE_NAMES[0]).display().to_string(),
        })
}

#[cfg(test)]
#[path = "index_test.rs"]
mod tests;
