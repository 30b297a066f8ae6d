//! Pipeline configuration.
//!
//! All paths the pipeline touches are resolved exactly once, at the
//! orchestration boundary, into an [`InstallConfig`] record that every stage
//! receives by reference. Stages never consult the environment or the home
//! directory themselves.

use std::path::PathBuf;

use crate::error::{ElmodoError, Result};

/// Resolved configuration for a single installer run.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// Base directory holding module files, `{base}/{tool}/{version}`.
    pub module_base_dir: PathBuf,
    /// Base directory holding installations, `{dir}/{version}`.
    pub module_dir: PathBuf,
}

impl InstallConfig {
    /// Build a config from explicit paths, falling back to the user-local
    /// defaults (`~/.local/modules/` and `~/.local/`).
    pub fn resolve(module_base_dir: Option<PathBuf>, module_dir: Option<PathBuf>) -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| ElmodoError::ConfigInvalid {
            message: "could not determine the home directory".into(),
        })?;

        let config = Self {
            module_base_dir: module_base_dir.unwrap_or_else(|| home.join(".local/modules")),
            module_dir: module_dir.unwrap_or_else(|| home.join(".local")),
        };
        config.validate()?;
        Ok(config)
    }

    /// Build a config from already-resolved paths (used by tests).
    pub fn new(module_base_dir: impl Into<PathBuf>, module_dir: impl Into<PathBuf>) -> Result<Self> {
        let config = Self {
            module_base_dir: module_base_dir.into(),
            module_dir: module_dir.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Directory a given tool version installs into.
    pub fn install_dir(&self, version: &str) -> PathBuf {
        self.module_dir.join(version)
    }

    /// Path of the module file for `tool/version`.
    pub fn module_file(&self, tool: &str, version: &str) -> PathBuf {
        self.module_base_dir.join(tool).join(version)
    }

    /// The module base directory must already exist; installations land in a
    /// module tree the operator has set up for Lmod beforehand.
    fn validate(&self) -> Result<()> {
        if !self.module_base_dir.is_dir() {
            return Err(ElmodoError::ConfigInvalid {
                message: format!(
                    "Module base directory {} does not exist.",
                    self.module_base_dir.display()
                ),
            });
        }
        Ok(())
    }
}
