//! Constants for pathlink

/// Project-level configuration file
pub const CONFIG_FILE: &str = "pathlink.toml";

/// Default directory holding the pipeline scripts
pub const PIPELINES_DIR: &str = "scripts";

/// Default persisted mapping
pub const MAPPING_FILE: &str = "symlinks.json";

/// Default generated link-creation script
pub const SCRIPT_FILE: &str = "create_symlinks.ps1";

/// Default root markers a literal must start with to count as an output directory
pub const ROOT_MARKERS: &[&str] = &["outputs"];

/// Default scanned source extensions
pub const SOURCE_EXTENSIONS: &[&str] = &["py"];

/// Output directories the pipelines are known to write to
pub const WELL_KNOWN_PATHS: &[&str] = &["outputs/cultivos", "outputs/muestreos", "outputs/kmz"];

/// Directories never descended into while scanning
pub const SKIPPED_DIRS: &[&str] = &["__pycache__", "node_modules", "venv"];

/// Run logs, relative to the project root
pub const LOG_DIR: &str = ".pathlink/logs";

/// Run logs kept per project; older ones are deleted
pub const MAX_LOG_FILES: usize = 10;
