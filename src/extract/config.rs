//! Extraction settings

use std::path::{Path, PathBuf};

use super::router::PartitionRouter;

/// Directory whose history is extracted by default
pub const DEFAULT_DIRECTORY: &str = ".github/workflows";

/// Directory of stored blobs by default
pub const DEFAULT_CONTENT_DIR: &str = "workflows";

/// Settings of one extraction run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Repository directory the walk is restricted to
    pub directory: String,

    /// Where blob contents are saved
    pub content_dir: PathBuf,

    /// Also keep files of the directory that are not workflows
    pub save_auxiliaries: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_DIRECTORY.to_string(),
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
            save_auxiliaries: false,
        }
    }
}

impl ExtractConfig {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_auxiliaries(mut self, save_auxiliaries: bool) -> Self {
        self.save_auxiliaries = save_auxiliaries;
        self
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Partitions entries are routed to
    pub fn router(&self) -> PartitionRouter {
        PartitionRouter::workflows(self.save_auxiliaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::router::{AUXILIARIES, WORKFLOWS};

    #[test]
    fn test_default() {
        let config = ExtractConfig::default();
        assert_eq!(config.directory, ".github/workflows");
        assert_eq!(config.content_dir(), Path::new("workflows"));
        assert!(!config.save_auxiliaries);
    }

    #[test]
    fn test_router_follows_auxiliary_flag() {
        let config = ExtractConfig::new("/tmp/blobs");
        assert_eq!(config.router().names().collect::<Vec<_>>(), vec![WORKFLOWS]);

        let config = config.with_auxiliaries(true).with_directory(".github");
        assert_eq!(config.directory, ".github");
        assert_eq!(
            config.router().names().collect::<Vec<_>>(),
            vec![WORKFLOWS, AUXILIARIES]
        );
    }
}
