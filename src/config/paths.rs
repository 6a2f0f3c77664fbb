//! Path resolution for revue configuration and data files.
//!
//! All revue data is stored in `~/.revue/`:
//! - `config.yaml` - Main configuration file
//! - `revue.db` - SQLite database for pages, members, logs, and jobs

use std::path::PathBuf;

use crate::error::RevueError;

/// Paths to revue configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.revue/`
    pub root: PathBuf,
    /// Config file: `~/.revue/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.revue/revue.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, RevueError> {
        let home = std::env::var("HOME")
            .map_err(|_| RevueError::Config("Could not determine home directory".to_string()))?;

        let root = PathBuf::from(home).join(".revue");

        Ok(Self {
            config_file: root.join("config.yaml"),
            database: root.join("revue.db"),
            root,
        })
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("revue.db"),
            root,
        }
    }

    /// Ensure the data directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), RevueError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                RevueError::Config(format!("Failed to create directory {:?}: {e}", self.root))
            })?;
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".revue"))
        })
    }
}
