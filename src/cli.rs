use crate::config::{ConfigOverrides, LinkConfig};
use crate::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
#[command(version, about, long_about = None)]
pub enum Commands {
    /// Discover output directories, ask for missing targets, save and render
    Configure,

    /// List discovered output directories without prompting
    Scan,

    /// Show the saved mapping
    List,

    /// Add or update one mapping without prompting
    Set {
        /// Project-relative output directory
        logical: String,
        /// Absolute target directory on the host
        target: String,
    },

    /// Regenerate the link script from the saved mapping
    Render {
        /// Re-render whenever the mapping file changes
        #[clap(short, long)]
        watch: bool,
    },
}

/// Settings shared by every command
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root holding the pipelines and the mapping
    #[clap(short = 'p', long, global = true, default_value = ".")]
    pub project: PathBuf,
    /// Configuration file (defaults to pathlink.toml in the project root)
    #[clap(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,
    /// Pipeline scripts directory
    #[clap(long, global = true)]
    pub pipelines: Option<PathBuf>,
    /// Mapping file
    #[clap(short = 'm', long, global = true)]
    pub mapping: Option<PathBuf>,
    /// Output path of the link script
    #[clap(short = 'o', long, global = true)]
    pub script: Option<PathBuf>,
    /// Project root on the host that runs the script
    #[clap(short = 'r', long = "target-root", global = true)]
    pub target_root: Option<String>,
}

impl ProjectArgs {
    /// Resolve defaults, the config file and these flags into one configuration
    pub fn resolve(&self) -> Result<LinkConfig> {
        let mut config = LinkConfig::load(&self.project, self.config.as_deref())?;
        config.apply_overrides(ConfigOverrides {
            pipelines_dir: self.pipelines.clone(),
            mapping_file: self.mapping.clone(),
            script_file: self.script.clone(),
            target_project_root: self.target_root.clone(),
        });
        config.validate()?;
        Ok(config)
    }
}

/// pathlink Command
#[derive(Parser)]
#[command(about = "Redirect pipeline output directories to synced folders")]
pub struct Cli {
    #[command(flatten)]
    pub project: ProjectArgs,
    #[command(subcommand)]
    pub cmd: Commands,
}
