//! GitHub latest-release resolution strategy (ninja-build).
//!
//! The `releases/latest` endpoint names the release tag and its assets.
//! Exactly one asset is the Linux binary zip; zero or several mean the
//! upstream packaging changed and resolution must fail fast.

use serde::Deserialize;

use crate::error::{ElmodoError, Result};
use crate::fetch::Fetcher;
use crate::release::ReleaseDescriptor;

/// A GitHub `releases/latest` document, reduced to the fields used here.
#[derive(Debug, Deserialize)]
pub struct LatestRelease {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
}

/// Fetch the latest release and resolve the Linux zip asset for `tool`.
pub fn resolve(fetcher: &Fetcher, release_url: &str, tool: &str) -> Result<ReleaseDescriptor> {
    let release: LatestRelease = fetcher.get_json(release_url)?;
    select(&release, tool)
}

/// Pick the single `.zip` asset whose name contains `linux`.
pub fn select(release: &LatestRelease, tool: &str) -> Result<ReleaseDescriptor> {
    let candidates: Vec<&Asset> = release
        .assets
        .iter()
        .filter(|asset| asset.name.ends_with(".zip") && asset.name.contains("linux"))
        .collect();

    let asset = match candidates.as_slice() {
        [asset] => *asset,
        [] => {
            return Err(ElmodoError::Resolution {
                tool: tool.to_string(),
                message: format!("release {} has no linux zip asset", release.tag_name),
            })
        }
        many => {
            return Err(ElmodoError::Resolution {
                tool: tool.to_string(),
                message: format!(
                    "release {} has {} linux zip assets, expected exactly one",
                    release.tag_name,
                    many.len()
                ),
            })
        }
    };

    // Tags carry a leading `v` that the tool itself never reports.
    let version = release.tag_name.trim_start_matches('v');
    ReleaseDescriptor::new(tool, version, &asset.name, &asset.browser_download_url)
}
