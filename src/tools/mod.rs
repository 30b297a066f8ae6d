//! Per-tool provisioning pipelines.
//!
//! Each pipeline is the same five stages in the same order: resolve the
//! latest release, download and validate the artifact, install and verify
//! into `{module_dir}/{version}`, write and verify the Lmod module, then
//! clean up temporaries. The tool modules differ only in which resolver
//! and install mode they wire together.

pub mod cmake;
pub mod git;
pub mod ninja;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fetch::Fetcher;
use crate::release::ReleaseDescriptor;
use crate::ui::Reporter;

/// Download a resolved artifact into `work_dir`, reporting progress.
fn download_artifact(
    fetcher: &Fetcher,
    reporter: &Reporter,
    descriptor: &ReleaseDescriptor,
    work_dir: &Path,
) -> Result<PathBuf> {
    let dest = work_dir.join(&descriptor.artifact_name);
    let spinner = reporter.stage(&format!(
        "Downloading {} to {}...",
        descriptor.artifact_url,
        dest.display()
    ));
    match fetcher.download(&descriptor.artifact_url, &dest) {
        Ok(()) => {
            spinner.finish_success(&format!("Downloaded {}.", descriptor.artifact_name));
            Ok(dest)
        }
        Err(e) => {
            spinner.finish_failure();
            Err(e)
        }
    }
}

/// Run a fallible stage under a spinner, clearing it on failure.
fn with_stage<T>(
    reporter: &Reporter,
    running: &str,
    finished: &str,
    stage: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let spinner = reporter.stage(running);
    match stage() {
        Ok(value) => {
            spinner.finish_success(finished);
            Ok(value)
        }
        Err(e) => {
            spinner.finish_failure();
            Err(e)
        }
    }
}
