pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod prompt;
pub mod render;
pub mod scan;
pub mod util;

// Re-export commonly used types
pub use config::LinkConfig;
pub use error::{LinkError, Result};
pub use mapping::PathMapping;
pub use prompt::{Prompter, StdioPrompter, collect};
pub use render::render;
pub use scan::{Discovery, discover};
