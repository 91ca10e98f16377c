//! Per-run debug log files kept under the project

use crate::config::constants::{LOG_DIR, MAX_LOG_FILES};
use crate::error::Result;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Directory holding the run logs of `project_dir`
pub fn log_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(LOG_DIR)
}

/// Unique log file path named after the project folder, PID and timestamp
pub fn log_file_path(project_dir: &Path) -> Result<PathBuf> {
    let project = project_dir
        .canonicalize()
        .unwrap_or_else(|_| project_dir.to_path_buf());
    let folder_name = project
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let pid = std::process::id();

    Ok(log_dir(project_dir).join(format!("{folder_name}_{pid}_{timestamp}.log")))
}

/// Delete the oldest `*.log` files in `dir` so at most `keep` remain
///
/// Returns the number of files removed.
pub fn prune_logs(dir: &Path, keep: usize) -> Result<usize> {
    let mut logs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "log") || !path.is_file() {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .unwrap_or(UNIX_EPOCH);
        logs.push((modified, path));
    }

    if logs.len() <= keep {
        return Ok(0);
    }

    logs.sort();
    let excess = logs.len() - keep;
    let mut removed = 0;
    for (_, path) in logs.into_iter().take(excess) {
        match std::fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => debug!("Could not remove old log {:?}: {}", path, e),
        }
    }
    Ok(removed)
}

/// Create this run's debug log file, pruning older runs first
pub fn create_log_file(project_dir: &Path) -> Result<File> {
    if !project_dir.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("project directory {} not found", project_dir.display()),
        )
        .into());
    }
    let dir = log_dir(project_dir);
    std::fs::create_dir_all(&dir)?;
    prune_logs(&dir, MAX_LOG_FILES.saturating_sub(1))?;

    let log_path = log_file_path(project_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    Ok(log_file)
}
