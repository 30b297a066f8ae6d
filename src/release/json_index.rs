//! JSON-index resolution strategy (cmake.org latest-files document).
//!
//! The index enumerates every artifact of the latest release; exactly one
//! entry is the installer for the host platform. Zero matches means the
//! platform is unsupported, more than one means the index changed shape.
//! Both abort resolution rather than guessing.

use serde::Deserialize;

use crate::error::{ElmodoError, Result};
use crate::fetch::client::join_url;
use crate::fetch::Fetcher;
use crate::platform::Platform;
use crate::release::ReleaseDescriptor;

/// The cmake.org latest-files document, e.g.
/// `https://cmake.org/files/LatestRelease/cmake-latest-files-v1.json`.
#[derive(Debug, Deserialize)]
pub struct LatestFilesIndex {
    pub version: VersionInfo,
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
pub struct VersionInfo {
    pub string: String,
}

#[derive(Debug, Deserialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(default)]
    pub os: Vec<String>,
    #[serde(default)]
    pub architecture: Vec<String>,
    #[serde(default)]
    pub class: String,
}

impl FileEntry {
    fn matches(&self, platform: &Platform) -> bool {
        self.class == "installer"
            && self.os.iter().any(|os| os == &platform.os)
            && self.architecture.iter().any(|m| m == &platform.machine)
    }
}

/// Fetch the index and resolve the installer for `platform`.
pub fn resolve(fetcher: &Fetcher, index_url: &str, platform: &Platform) -> Result<ReleaseDescriptor> {
    let index: LatestFilesIndex = fetcher.get_json(index_url)?;
    let descriptor = select(&index, platform)?;
    ReleaseDescriptor::new(
        "cmake",
        descriptor.0,
        &descriptor.1,
        join_url(index_url, &descriptor.1)?,
    )
}

/// Pick the single installer entry matching the platform.
fn select(index: &LatestFilesIndex, platform: &Platform) -> Result<(String, String)> {
    let candidates: Vec<&FileEntry> = index
        .files
        .iter()
        .filter(|entry| entry.matches(platform))
        .collect();

    match candidates.as_slice() {
        [entry] => Ok((index.version.string.clone(), entry.name.clone())),
        [] => Err(ElmodoError::Resolution {
            tool: "cmake".into(),
            message: format!(
                "no installer entry for {} {} in the latest-files index",
                platform.os, platform.machine
            ),
        }),
        many => Err(ElmodoError::Resolution {
            tool: "cmake".into(),
            message: format!(
                "expected exactly one installer entry, found {}: {}",
                many.len(),
                many.iter()
                    .map(|e| e.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"{
        "version": {"string": "3.28.0"},
        "files": [
            {"name": "cmake-3.28.0-linux-x86_64.sh",
             "os": ["Linux"], "architecture": ["x86_64"], "class": "installer"},
            {"name": "cmake-3.28.0-macos-universal.dmg",
             "os": ["Darwin"], "architecture": ["x86_64", "arm64"], "class": "volume"},
            {"name": "cmake-3.28.0.tar.gz",
             "os": ["source"], "architecture": [], "class": "archive"}
        ]
    }"#;

    fn parse(json: &str) -> LatestFilesIndex {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn selects_the_single_matching_installer() {
        let index = parse(INDEX);
        let (version, name) = select(&index, &Platform::new("Linux", "x86_64")).unwrap();
        assert_eq!(version, "3.28.0");
        assert_eq!(name, "cmake-3.28.0-linux-x86_64.sh");
    }

    #[test]
    fn zero_candidates_is_a_resolution_error() {
        let index = parse(INDEX);
        let err = select(&index, &Platform::new("Linux", "riscv64")).unwrap_err();
        assert!(matches!(err, ElmodoError::Resolution { .. }));
        assert!(err.to_string().contains("riscv64"));
    }

    #[test]
    fn ambiguous_candidates_are_a_resolution_error() {
        let mut index = parse(INDEX);
        index.files.push(FileEntry {
            name: "cmake-3.28.0-linux-x86_64-alt.sh".into(),
            os: vec!["Linux".into()],
            architecture: vec!["x86_64".into()],
            class: "installer".into(),
        });
        let err = select(&index, &Platform::new("Linux", "x86_64")).unwrap_err();
        assert!(err.to_string().contains("exactly one"));
    }

    #[test]
    fn non_installer_classes_never_match() {
        let index = parse(INDEX);
        // The .dmg is for Darwin/x86_64 but class "volume": no match.
        let err = select(&index, &Platform::new("Darwin", "arm64")).unwrap_err();
        assert!(matches!(err, ElmodoError::Resolution { .. }));
    }
}
