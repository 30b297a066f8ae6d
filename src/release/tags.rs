//! Tag-list resolution strategy (GitHub tag API, Git alternate backend).
//!
//! Resolves only the version: the tag list says what the newest release is,
//! but the artifact is still downloaded from the kernel.org mirror, so the
//! caller combines the resolved version with its own artifact naming.

use serde::Deserialize;

use crate::error::{ElmodoError, Result};
use crate::fetch::Fetcher;
use crate::release::version::numeric_key;

/// One entry of a GitHub `tags` listing.
#[derive(Debug, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// Fetch the tag list and resolve the newest release version.
pub fn resolve(fetcher: &Fetcher, tags_url: &str, tool: &str) -> Result<String> {
    let tags: Vec<Tag> = fetcher.get_json(tags_url)?;
    latest_version(&tags, tool)
}

/// Newest non-prerelease version among the tags.
///
/// Pre-release tags (`v2.51.0-rc1`) are discarded; the leading `v` is
/// stripped; the rest compares as a dotted integer tuple.
pub fn latest_version(tags: &[Tag], tool: &str) -> Result<String> {
    tags.iter()
        .filter(|tag| !tag.name.contains("-rc"))
        .map(|tag| tag.name.trim_start_matches('v'))
        .filter(|version| {
            !version.is_empty() && version.split('.').all(|t| t.parse::<u64>().is_ok())
        })
        .max_by_key(|version| numeric_key(version))
        .map(str::to_string)
        .ok_or_else(|| ElmodoError::Resolution {
            tool: tool.to_string(),
            message: "tag list contains no release tags".into(),
        })
}
