//! Discovery of logical output paths

pub mod collector;
pub mod filters;
pub mod literal;

pub use collector::FileCollector;
pub use filters::{ExtensionFilter, FileFilter};
pub use literal::{LiteralScanner, shape_literal};

use crate::config::LinkConfig;
use crate::error::Result;
use crate::util::{normalize_logical, same_logical};
use indexmap::IndexMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Discovered logical paths with the files that reference them
///
/// Well-known paths come first, then scan hits in first-seen order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Discovery {
    entries: IndexMap<String, Vec<PathBuf>>,
}

impl Discovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a logical path; returns false when it was already known
    ///
    /// Paths differing only by case name one directory on Windows, so the
    /// first spelling seen is kept.
    pub fn insert(&mut self, logical: &str, source: Option<PathBuf>) -> bool {
        let mut key = normalize_logical(logical);
        if key.is_empty() {
            return false;
        }
        if !self.entries.contains_key(&key)
            && let Some(first) = self.entries.keys().find(|known| same_logical(known, &key))
        {
            warn!("{} differs from {} only by case, treating them as one", key, first);
            key = first.clone();
        }
        let is_new = !self.entries.contains_key(&key);
        let sources = self.entries.entry(key).or_default();
        if let Some(source) = source
            && !sources.contains(&source)
        {
            sources.push(source);
        }
        is_new
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Files a logical path was found in; empty for well-known paths
    pub fn sources(&self, logical: &str) -> &[PathBuf] {
        self.entries.get(logical).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, logical: &str) -> bool {
        self.entries.contains_key(logical)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Scan the pipeline directory for output directory references
pub fn discover(config: &LinkConfig) -> Result<Discovery> {
    info!("Scanning pipeline sources in {:?}", config.pipelines_dir);

    let collector = FileCollector::new(ExtensionFilter::new(&config.extensions));
    let files = collector.collect(&config.pipelines_dir)?;
    let scanner = LiteralScanner::new(&config.root_markers)?;

    let mut discovery = Discovery::new();
    for logical in &config.well_known {
        discovery.insert(logical, None);
    }

    for file in files {
        let content = match std::fs::read(&file) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!("Skipping unreadable source {:?}: {}", file, e);
                continue;
            }
        };

        for logical in scanner.scan(&content) {
            if discovery.insert(&logical, Some(file.clone())) {
                debug!("Discovered {} in {:?}", logical, file);
            }
        }
    }

    info!("Discovery completed, found {} logical paths", discovery.len());
    Ok(discovery)
}
