//! Error types for elmodo operations.
//!
//! This module defines [`ElmodoError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! Every pipeline stage is fail-fast: an error from any stage aborts the
//! whole run. Variants follow the four failure categories of the pipeline
//! (resolution, transfer, installation, registration) so messages can say
//! which stage gave up, plus wrappers for subprocess and IO failures.
//! Captured subprocess stderr is folded into the message where available.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for elmodo operations.
#[derive(Debug, Error)]
pub enum ElmodoError {
    /// The release index produced zero or ambiguous candidates.
    #[error("Release resolution failed for {tool}: {message}")]
    Resolution { tool: String, message: String },

    /// Download failed: HTTP error status or transport failure.
    #[error("Transfer failed for {url}: {message}")]
    Transfer { url: String, message: String },

    /// Downloaded artifact did not pass structural validation.
    #[error("Downloaded file {path} failed validation: {message}")]
    ArtifactInvalid { path: PathBuf, message: String },

    /// Archive extraction failed or an entry escaped the destination.
    #[error("Extraction of {archive} failed: {message}")]
    Extraction { archive: PathBuf, message: String },

    /// Installation failed: installer subprocess, missing binary, or
    /// version mismatch of the installed executable.
    #[error("Installation of {tool} failed: {message}")]
    Installation { tool: String, message: String },

    /// Module registration failed: the module system rejected the file or
    /// resolved to the wrong executable.
    #[error("Module registration failed for {module}: {message}")]
    Registration { module: String, message: String },

    /// A subprocess could not be spawned or was killed before exiting.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Configuration problem, e.g. a missing module base directory.
    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for elmodo operations.
pub type Result<T> = std::result::Result<T, ElmodoError>;
