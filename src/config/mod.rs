//! Project configuration
//!
//! `gomk.toml` is optional. Its directory is the project root; without it the
//! current directory is used with default settings.

mod gomk_toml;

use std::path::{Path, PathBuf};

use tracing::debug;

pub use gomk_toml::{GomkConfig, CONFIG_FILE_NAME};

use crate::error::{hints, GomkError};
use crate::utils::paths::find_file_upwards;

/// Loaded configuration together with the directory commands run in
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Directory containing gomk.toml, or the starting directory
    pub root: PathBuf,
    pub config: GomkConfig,
}

impl Project {
    /// Discover the project from the current directory
    pub fn discover() -> Result<Self, GomkError> {
        let cwd = std::env::current_dir().map_err(|e| {
            GomkError::config_error_with_hint(
                "Failed to get current directory",
                Some(e.into()),
                "Run gomk from inside the project directory",
            )
        })?;
        Self::discover_from(&cwd)
    }

    /// Discover the project starting at `start`
    pub fn discover_from(start: &Path) -> Result<Self, GomkError> {
        match find_file_upwards(start, CONFIG_FILE_NAME) {
            Some(path) => {
                debug!(path = %path.display(), "loading configuration");
                let config = GomkConfig::load_from_path(&path).map_err(|e| {
                    GomkError::config_error_with_hint(
                        format!("{} is invalid", path.display()),
                        Some(e),
                        hints::invalid_gomk_toml(),
                    )
                })?;
                let root = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| start.to_path_buf());
                Ok(Self { root, config })
            }
            None => {
                debug!(dir = %start.display(), "no {} found, using defaults", CONFIG_FILE_NAME);
                Ok(Self {
                    root: start.to_path_buf(),
                    config: GomkConfig::default(),
                })
            }
        }
    }

    /// Path of the compiled binary for the host platform
    pub fn binary_path(&self) -> PathBuf {
        self.root
            .join(&self.config.project.output_dir)
            .join(self.config.project.binary_name())
    }
}
