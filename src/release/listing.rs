//! HTML directory-listing resolution strategy (kernel.org Git mirrors).
//!
//! The mirror serves a plain directory listing; the newest release is the
//! `.tar.xz` archive whose file name carries the greatest numeric version
//! key. Names usually appear twice on the page (href and link text), so
//! matches are deduplicated before the maximum is taken.

use std::collections::BTreeSet;

use regex::Regex;

use crate::error::{ElmodoError, Result};
use crate::fetch::client::join_url;
use crate::fetch::Fetcher;
use crate::release::version::{numeric_key, version_from_name};
use crate::release::ReleaseDescriptor;

/// Archive names on the listing page: `git-2.10.1.tar.xz` and friends.
const ARCHIVE_PATTERN: &str = r"[a-z0-9.-]+\.tar\.xz";

/// Fetch the listing and resolve the newest archive for `tool`.
pub fn resolve(fetcher: &Fetcher, listing_url: &str, tool: &str) -> Result<ReleaseDescriptor> {
    let html = fetcher.get_text(listing_url)?;
    let name = newest_archive(&html, tool)?;
    let version = version_from_name(&name);
    ReleaseDescriptor::new(tool, version, &name, join_url(listing_url, &name)?)
}

/// Scan listing HTML for archive names and return the newest one.
///
/// Only names shaped `{tool}-<dotted numeric version>.tar.xz` count; the
/// listing also carries manpage and html-docs tarballs that would otherwise
/// win the comparison, and pre-releases carry non-numeric tokens.
pub fn newest_archive(html: &str, tool: &str) -> Result<String> {
    let pattern = Regex::new(ARCHIVE_PATTERN).expect("archive pattern is valid");
    let prefix = format!("{tool}-");

    let candidates: BTreeSet<&str> = pattern
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|name| is_release_archive(name, &prefix))
        .collect();

    candidates
        .into_iter()
        .max_by_key(|name| numeric_key(name))
        .map(str::to_string)
        .ok_or_else(|| ElmodoError::Resolution {
            tool: tool.to_string(),
            message: "listing page contains no release archives".into(),
        })
}

fn is_release_archive(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(".tar.xz"))
        .is_some_and(|version| {
            !version.is_empty() && version.split('.').all(|t| t.parse::<u64>().is_ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body><pre>
        <a href="git-2.9.0.tar.xz">git-2.9.0.tar.xz</a>   01-Jan-2016
        <a href="git-2.10.1.tar.xz">git-2.10.1.tar.xz</a> 01-Oct-2016
        <a href="git-manpages-2.10.1.tar.xz">git-manpages-2.10.1.tar.xz</a>
        <a href="git-2.10.0.rc2.tar.xz">git-2.10.0.rc2.tar.xz</a>
        </pre></body></html>"#;

    #[test]
    fn newest_is_selected_numerically() {
        // 2.10.1 beats 2.9.0 as an integer tuple even though it loses
        // the string comparison.
        assert_eq!(newest_archive(LISTING, "git").unwrap(), "git-2.10.1.tar.xz");
    }

    #[test]
    fn duplicate_mentions_collapse() {
        // Each name appears in both href and text; dedup must leave one.
        let html = r#"<a href="git-1.0.0.tar.xz">git-1.0.0.tar.xz</a>"#;
        assert_eq!(newest_archive(html, "git").unwrap(), "git-1.0.0.tar.xz");
    }

    #[test]
    fn empty_listing_is_a_resolution_error() {
        let err = newest_archive("<html></html>", "git").unwrap_err();
        assert!(matches!(err, ElmodoError::Resolution { .. }));
    }

    #[test]
    fn companion_archives_are_ignored() {
        // manpages/htmldocs tarballs share the prefix but are not releases.
        let html = r#"
            <a href="git-htmldocs-2.50.0.tar.xz">git-htmldocs-2.50.0.tar.xz</a>
            <a href="git-2.10.1.tar.xz">git-2.10.1.tar.xz</a>"#;
        assert_eq!(newest_archive(html, "git").unwrap(), "git-2.10.1.tar.xz");
    }

    #[test]
    fn release_candidates_are_ignored() {
        let html = r#"<a href="git-2.10.0.rc2.tar.xz">git-2.10.0.rc2.tar.xz</a>"#;
        assert!(newest_archive(html, "git").is_err());
    }
}
