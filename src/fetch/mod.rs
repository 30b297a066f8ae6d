//! HTTP fetching and artifact validation.
//!
//! One blocking [`Fetcher`] serves both the release-index queries and the
//! artifact downloads, so user agent and timeout are configured in a single
//! place. Downloaded artifacts are checked structurally before anything is
//! executed or extracted; see [`validate`].

pub mod client;
pub mod validate;

pub use client::Fetcher;
pub use validate::{require_min_size, require_tar_xz, require_zip, MIN_INSTALLER_SIZE};
