use super::filters::FileFilter;
/// Pipeline source collector with filter support
use crate::config::constants;
use crate::error::{LinkError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

pub struct FileCollector<F: FileFilter> {
    filter: F,
}

impl<F: FileFilter> FileCollector<F> {
    pub fn new(filter: F) -> Self {
        Self { filter }
    }

    /// Collect matching files under `root`, sorted by path
    ///
    /// Fails only when `root` itself cannot be read; unreadable entries
    /// below it are logged and skipped.
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        std::fs::read_dir(root).map_err(|e| LinkError::scan_root(root, e))?;

        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_file() && self.filter.should_include(entry.path()) {
                debug!("Found pipeline source: {:?}", entry.path());
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        debug!("Skipping hidden directory: {:?}", entry.path());
        return true;
    }
    constants::SKIPPED_DIRS.contains(&name.as_ref())
}
