/// File filter implementations
use std::path::Path;

/// File filter trait
pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Pipeline source filter, by file extension (case-insensitive)
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Self {
        Self {
            extensions: extensions
                .iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }
}

impl FileFilter for ExtensionFilter {
    fn should_include(&self, path: &Path) -> bool {
        if let Some(extension) = path.extension() {
            let ext_str = extension.to_string_lossy().to_lowercase();
            return self.extensions.iter().any(|ext| *ext == ext_str);
        }
        false
    }
}
