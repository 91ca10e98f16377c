/// Configurator settings, from defaults, `pathlink.toml` and CLI overrides
use crate::config::constants;
use crate::error::{LinkError, Result};
use crate::util::{is_absolute_like, normalize_logical, validate_logical};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Raw `pathlink.toml` contents, every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub pipelines_dir: Option<PathBuf>,
    pub mapping_file: Option<PathBuf>,
    pub script_file: Option<PathBuf>,
    pub target_project_root: Option<String>,
    pub root_markers: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub well_known: Option<Vec<String>>,
}

/// Values given on the command line; they win over the config file
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub pipelines_dir: Option<PathBuf>,
    pub mapping_file: Option<PathBuf>,
    pub script_file: Option<PathBuf>,
    pub target_project_root: Option<String>,
}

/// Resolved configuration passed to discover/collect/persist/render
#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub project_dir: PathBuf,
    pub pipelines_dir: PathBuf,
    pub mapping_file: PathBuf,
    pub script_file: PathBuf,
    /// Project root on the host that runs the script; `$PSScriptRoot` when unset
    pub target_project_root: Option<String>,
    pub root_markers: Vec<String>,
    pub extensions: Vec<String>,
    pub well_known: Vec<String>,
}

impl LinkConfig {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        Self {
            pipelines_dir: project_dir.join(constants::PIPELINES_DIR),
            mapping_file: project_dir.join(constants::MAPPING_FILE),
            script_file: project_dir.join(constants::SCRIPT_FILE),
            target_project_root: None,
            root_markers: to_strings(constants::ROOT_MARKERS),
            extensions: to_strings(constants::SOURCE_EXTENSIONS),
            well_known: to_strings(constants::WELL_KNOWN_PATHS),
            project_dir,
        }
    }

    /// Load settings for a project
    ///
    /// An explicit `config_path` must exist; otherwise `pathlink.toml` in the
    /// project directory is read when present.
    pub fn load(project_dir: &Path, config_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::new(project_dir);

        let path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default = project_dir.join(constants::CONFIG_FILE);
                default.is_file().then_some(default)
            }
        };

        if let Some(path) = path {
            debug!("Loading configuration from {:?}", path);
            let content = std::fs::read_to_string(&path).map_err(|e| {
                LinkError::invalid_config(format!("cannot read {}: {e}", path.display()))
            })?;
            let file: ConfigFile = toml::from_str(&content).map_err(|e| {
                LinkError::invalid_config(format!("{}: {e}", path.display()))
            })?;
            config.apply_file(file);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn apply_file(&mut self, file: ConfigFile) {
        if let Some(dir) = file.pipelines_dir {
            self.pipelines_dir = self.resolve(dir);
        }
        if let Some(path) = file.mapping_file {
            self.mapping_file = self.resolve(path);
        }
        if let Some(path) = file.script_file {
            self.script_file = self.resolve(path);
        }
        if file.target_project_root.is_some() {
            self.target_project_root = file.target_project_root;
        }
        if let Some(markers) = file.root_markers {
            self.root_markers = markers;
        }
        if let Some(extensions) = file.extensions {
            self.extensions = extensions;
        }
        if let Some(well_known) = file.well_known {
            self.well_known = well_known;
        }
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(dir) = overrides.pipelines_dir {
            self.pipelines_dir = self.resolve(dir);
        }
        if let Some(path) = overrides.mapping_file {
            self.mapping_file = self.resolve(path);
        }
        if let Some(path) = overrides.script_file {
            self.script_file = self.resolve(path);
        }
        if overrides.target_project_root.is_some() {
            self.target_project_root = overrides.target_project_root;
        }
    }

    /// Normalize markers, extensions and well-known paths in place
    pub fn validate(&mut self) -> Result<()> {
        let mut markers = Vec::new();
        for marker in &self.root_markers {
            let normalized = normalize_logical(marker);
            if normalized.is_empty() || normalized.contains('/') {
                return Err(LinkError::invalid_config(format!(
                    "root marker '{marker}' must be a single directory name"
                )));
            }
            if !markers.contains(&normalized) {
                markers.push(normalized);
            }
        }
        if markers.is_empty() {
            return Err(LinkError::invalid_config("at least one root marker is required"));
        }
        self.root_markers = markers;

        self.extensions = self
            .extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        self.well_known = self
            .well_known
            .iter()
            .map(|path| validate_logical(path))
            .collect::<Result<_>>()?;

        self.target_project_root = match self.target_project_root.take() {
            Some(root) if root.trim().is_empty() => None,
            Some(root) if !is_absolute_like(root.trim()) => {
                return Err(LinkError::invalid_config(format!(
                    "target project root '{root}' must be an absolute path"
                )));
            }
            root => root.map(|root| root.trim().to_string()),
        };

        Ok(())
    }

    fn resolve(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            self.project_dir.join(path)
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
