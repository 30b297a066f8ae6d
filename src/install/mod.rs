//! Installation into version-namespaced prefixes.
//!
//! Three modes cover the supported tools: a self-extracting installer
//! binary (cmake), a classic configure/make source build (git), and a
//! single prebuilt binary dropped into place (ninja). All of them write
//! into a staging directory first and commit with a rename, so a failed
//! install never leaves a half-populated destination behind.
//!
//! Verification is two-layered on purpose: the installer's own output is
//! checked, and then the installed executable is re-invoked independently
//! to report its version. An installer that claims success but leaves a
//! stale binary fails the second check.

pub mod build;
pub mod installer;
pub mod staging;
pub mod verify;

pub use staging::Staging;
pub use verify::verify_executable_version;

use std::path::PathBuf;

/// A completed installation.
#[derive(Debug, Clone)]
pub struct InstallationRecord {
    /// Installed tool version.
    pub version: String,
    /// Version-namespaced prefix the tool was installed into.
    pub install_dir: PathBuf,
    /// The tool's executable under `install_dir`.
    pub executable_path: PathBuf,
}
