//! Staging-then-rename installation commit.
//!
//! Installers write into `{dest}.staging-{pid}` beside the final
//! destination (same filesystem, so the commit rename is atomic). A crash
//! mid-install leaves only a clearly-named staging directory; the final
//! destination either does not exist or is a complete install.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::Result;

/// A staging directory for one installation.
#[derive(Debug)]
pub struct Staging {
    dir: PathBuf,
    dest: PathBuf,
    committed: bool,
}

impl Staging {
    /// Create the staging directory next to `dest`.
    pub fn create(dest: &Path) -> Result<Self> {
        let file_name = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "install".to_string());
        let dir = dest.with_file_name(format!(
            "{file_name}.staging-{}",
            std::process::id()
        ));
        if dir.exists() {
            std::fs::remove_dir_all(&dir)
                .with_context(|| format!("Failed to clear stale staging {}", dir.display()))?;
        }
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create staging {}", dir.display()))?;
        Ok(Self {
            dir,
            dest: dest.to_path_buf(),
            committed: false,
        })
    }

    /// The staging path; installers use this as their prefix.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// The final destination the staging directory will become.
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Rename the staging directory to the final destination.
    ///
    /// An existing destination is a previous install of the same version;
    /// it is removed and replaced wholesale, never merged into.
    pub fn commit(mut self) -> Result<PathBuf> {
        if let Some(parent) = self.dest.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        if self.dest.exists() {
            tracing::info!("Replacing existing installation at {}", self.dest.display());
            std::fs::remove_dir_all(&self.dest)
                .with_context(|| format!("Failed to remove old {}", self.dest.display()))?;
        }
        std::fs::rename(&self.dir, &self.dest).with_context(|| {
            format!(
                "Failed to move {} to {}",
                self.dir.display(),
                self.dest.display()
            )
        })?;
        self.committed = true;
        Ok(self.dest.clone())
    }
}

impl Drop for Staging {
    fn drop(&mut self) {
        if !self.committed && self.dir.exists() {
            if let Err(e) = std::fs::remove_dir_all(&self.dir) {
                tracing::warn!("Could not remove staging {}: {e}", self.dir.display());
            }
        }
    }
}
