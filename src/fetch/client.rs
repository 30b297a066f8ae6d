//! Blocking HTTP client for release indexes and artifact downloads.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::error::{ElmodoError, Result};

/// Default request timeout for index queries and downloads.
const TIMEOUT: Duration = Duration::from_secs(300);

/// Fetches release indexes and downloads artifacts.
pub struct Fetcher {
    client: reqwest::blocking::Client,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .user_agent(concat!("elmodo/", env!("CARGO_PKG_VERSION")))
                .timeout(TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Fetch a URL and return the body as text.
    pub fn get_text(&self, url: &str) -> Result<String> {
        let response = self.send(url)?;
        response.text().map_err(|e| ElmodoError::Transfer {
            url: url.to_string(),
            message: format!("failed to read response body: {e}"),
        })
    }

    /// Fetch a URL and deserialize the body as JSON.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(url)?;
        response.json().map_err(|e| ElmodoError::Transfer {
            url: url.to_string(),
            message: format!("failed to parse JSON response: {e}"),
        })
    }

    /// Download a URL to a local file, streaming the body.
    ///
    /// Only the HTTP status is checked here; structural validation of the
    /// downloaded bytes is the caller's job (see [`super::validate`]).
    pub fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let mut response = self.send(url)?;
        let mut file = File::create(dest)
            .with_context(|| format!("Failed to create {}", dest.display()))?;
        response
            .copy_to(&mut file)
            .map_err(|e| ElmodoError::Transfer {
                url: url.to_string(),
                message: format!("download to {} failed: {e}", dest.display()),
            })?;
        Ok(())
    }

    fn send(&self, url: &str) -> Result<reqwest::blocking::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ElmodoError::Transfer {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ElmodoError::Transfer {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }
        Ok(response)
    }
}

/// Join a file name against the URL it was listed by.
///
/// Mirrors how directory-style indexes publish artifacts: the index URL and
/// the artifact differ only in the last path segment.
pub fn join_url(index_url: &str, name: &str) -> Result<String> {
    let base = reqwest::Url::parse(index_url).map_err(|e| ElmodoError::Transfer {
        url: index_url.to_string(),
        message: format!("invalid index URL: {e}"),
    })?;
    let joined = base.join(name).map_err(|e| ElmodoError::Transfer {
        url: index_url.to_string(),
        message: format!("could not join {name}: {e}"),
    })?;
    Ok(joined.to_string())
}
