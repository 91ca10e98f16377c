//! Persisted association between logical paths and physical targets

use crate::error::{LinkError, Result};
use crate::util::{is_absolute_like, same_logical, validate_logical};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Ordered `logical -> physical` mapping
///
/// Insertion order is kept across load/persist and decides the order of the
/// rendered link blocks.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathMapping {
    entries: IndexMap<String, String>,
}

impl PathMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, keeping the position of an existing key
    pub fn insert(
        &mut self,
        logical: impl Into<String>,
        target: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(logical.into(), target.into())
    }

    pub fn get(&self, logical: &str) -> Option<&str> {
        self.entries.get(logical).map(String::as_str)
    }

    pub fn contains(&self, logical: &str) -> bool {
        self.entries.contains_key(logical)
    }

    /// Existing key naming the same directory on a case-insensitive host
    pub fn find_ignore_case(&self, logical: &str) -> Option<&str> {
        if let Some((key, _)) = self.entries.get_key_value(logical) {
            return Some(key.as_str());
        }
        self.entries
            .keys()
            .find(|key| same_logical(key, logical))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a mapping file; a missing file is an empty mapping
    ///
    /// Keys are normalized and must stay inside the project root. Hand-edited
    /// keys that collapse to the same directory, ignoring case, keep the
    /// first entry.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No mapping at {:?}, starting empty", path);
                return Ok(Self::new());
            }
            Err(e) => return Err(LinkError::mapping(path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let raw: IndexMap<String, String> =
            serde_json::from_str(&content).map_err(|e| LinkError::mapping(path, e))?;

        let mut mapping = Self::new();
        for (key, target) in raw {
            let logical = validate_logical(&key).map_err(|e| LinkError::mapping(path, e))?;
            let target = target.trim();
            if target.is_empty() || !is_absolute_like(target) {
                return Err(LinkError::mapping(
                    path,
                    format!("target for '{logical}' must be an absolute path, got '{target}'"),
                ));
            }
            if let Some(first) = mapping.find_ignore_case(&logical) {
                warn!(
                    "{} in {:?} names the same directory as {}, keeping the first",
                    logical, path, first
                );
                continue;
            }
            mapping.insert(logical, target);
        }

        debug!("Loaded {} mappings from {:?}", mapping.len(), path);
        Ok(mapping)
    }

    /// Write the mapping as pretty JSON, replacing the file through a rename
    pub fn persist(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut json =
            serde_json::to_string_pretty(self).map_err(|e| LinkError::mapping(path, e))?;
        json.push('\n');

        let temp = temp_path(path);
        std::fs::write(&temp, json)?;
        if let Err(e) = std::fs::rename(&temp, path) {
            let _ = std::fs::remove_file(&temp);
            return Err(e.into());
        }

        info!("Saved {} mappings to {:?}", self.len(), path);
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "mapping".into());
    name.push(".tmp");
    path.with_file_name(name)
}
