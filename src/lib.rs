//! elmodo - provision developer tools into user-local prefixes with Lmod
//! modules.
//!
//! Each installer binary runs the same five-stage pipeline: resolve the
//! latest release of a tool, download and validate the artifact, install
//! it into a version-namespaced directory, write and verify an Lmod
//! module file that puts it on `PATH`, and clean up temporaries.
//!
//! # Modules
//!
//! - [`archive`] - Path-traversal-safe tar/zip extraction
//! - [`cleanup`] - Best-effort temporary-file removal
//! - [`cli`] - Shared CLI plumbing for the installer binaries
//! - [`config`] - The per-run configuration record
//! - [`error`] - Error types and result alias
//! - [`fetch`] - HTTP client and artifact validation
//! - [`install`] - Installation modes and post-install verification
//! - [`modulefile`] - Lmod module generation and registration
//! - [`platform`] - Host platform detection
//! - [`release`] - Release-resolution strategies
//! - [`shell`] - Captured subprocess execution
//! - [`testbed`] - Throwaway Docker test container
//! - [`tools`] - The per-tool pipelines (cmake, git, ninja)
//! - [`ui`] - Stage spinners and progress output

pub mod archive;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod install;
pub mod modulefile;
pub mod platform;
pub mod release;
pub mod shell;
pub mod testbed;
pub mod tools;
pub mod ui;

pub use error::{ElmodoError, Result};
