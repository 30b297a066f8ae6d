//! Release resolution.
//!
//! Every tool publishes its releases differently: cmake.org keeps a JSON
//! index of the latest files, kernel.org serves a plain HTML directory
//! listing, and GitHub offers both a latest-release endpoint and a raw tag
//! list. Each strategy lives in its own submodule and produces the same
//! [`ReleaseDescriptor`].
//!
//! Candidate selection is deliberately strict: zero matches and ambiguous
//! matches are both hard errors, never a silent pick.

pub mod github;
pub mod json_index;
pub mod listing;
pub mod tags;
pub mod version;

pub use version::{numeric_key, version_from_name};

use crate::error::{ElmodoError, Result};

/// The outcome of release resolution: which version to install and where
/// to download it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    /// Dotted numeric version, e.g. `3.28.0`.
    pub version: String,
    /// File name of the artifact, used as the local download name.
    pub artifact_name: String,
    /// Full download URL.
    pub artifact_url: String,
}

impl ReleaseDescriptor {
    /// Build a descriptor, rejecting versions that are empty or not a
    /// dotted numeric sequence. Version strings feed both directory names
    /// and numeric comparisons, so garbage must not get past this point.
    pub fn new(
        tool: &str,
        version: impl Into<String>,
        artifact_name: impl Into<String>,
        artifact_url: impl Into<String>,
    ) -> Result<Self> {
        let version = version.into();
        if version.is_empty() || !version.split('.').all(|t| t.parse::<u64>().is_ok()) {
            return Err(ElmodoError::Resolution {
                tool: tool.to_string(),
                message: format!("version {version:?} is not a dotted numeric sequence"),
            });
        }
        Ok(Self {
            version,
            artifact_name: artifact_name.into(),
            artifact_url: artifact_url.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_accepts_dotted_numeric_versions() {
        let descriptor = ReleaseDescriptor::new(
            "cmake",
            "3.28.0",
            "cmake-3.28.0-linux-x86_64.sh",
            "https://cmake.org/files/LatestRelease/cmake-3.28.0-linux-x86_64.sh",
        )
        .unwrap();
        assert_eq!(descriptor.version, "3.28.0");
    }

    #[test]
    fn descriptor_rejects_empty_version() {
        assert!(ReleaseDescriptor::new("git", "", "a", "https://x/a").is_err());
    }

    #[test]
    fn descriptor_rejects_non_numeric_version() {
        assert!(ReleaseDescriptor::new("ninja", "v1.12.1", "a", "https://x/a").is_err());
        assert!(ReleaseDescriptor::new("ninja", "1.12.1-rc1", "a", "https://x/a").is_err());
    }
}
