//! Binary-installer mode (self-extracting installer, cmake-style).
//!
//! The installer contract: invoked as `sh <installer> --prefix=<dir>
//! --exclude-subdir`, it unpacks into the prefix and prints a success
//! marker, the version it unpacked, and the prefix path. All three are
//! required in stdout in addition to exit code 0; any one missing means
//! the wrong version or the wrong place.

use std::path::Path;

use crate::error::{ElmodoError, Result};
use crate::install::staging::Staging;
use crate::install::InstallationRecord;
use crate::shell::{run, CommandOptions, CommandResult};

/// Success marker printed by the self-extracting installer.
pub const UNPACK_MARKER: &str = "Unpacking finished successfully";

/// Run the installer into a staging prefix, check its output, commit.
pub fn run_binary_installer(
    tool: &str,
    installer: &Path,
    version: &str,
    dest: &Path,
    exe_relative: &Path,
) -> Result<InstallationRecord> {
    let staging = Staging::create(dest)?;
    let prefix = format!("--prefix={}", staging.path().display());
    let installer_arg = installer.to_string_lossy();

    let result = run(
        "sh",
        &[installer_arg.as_ref(), prefix.as_str(), "--exclude-subdir"],
        &CommandOptions::default(),
    )?;
    check_installer_output(tool, &result, version, &staging.path().to_string_lossy())?;

    let install_dir = staging.commit()?;
    Ok(InstallationRecord {
        version: version.to_string(),
        executable_path: install_dir.join(exe_relative),
        install_dir,
    })
}

/// Require exit 0 and the three stdout conditions.
///
/// Each condition is independently necessary: the marker proves unpacking
/// ran to completion, the version guards against a stale installer, and
/// the prefix guards against installing somewhere else entirely.
pub fn check_installer_output(
    tool: &str,
    result: &CommandResult,
    version: &str,
    prefix: &str,
) -> Result<()> {
    if !result.success {
        return Err(ElmodoError::Installation {
            tool: tool.to_string(),
            message: format!(
                "installer exited with code {:?}: {}",
                result.exit_code,
                result.stderr.trim()
            ),
        });
    }
    for (needle, what) in [
        (UNPACK_MARKER, "success marker"),
        (version, "expected version"),
        (prefix, "install prefix"),
    ] {
        if !result.stdout.contains(needle) {
            return Err(ElmodoError::Installation {
                tool: tool.to_string(),
                message: format!(
                    "installer stdout is missing the {what} {needle:?}: {}",
                    result.stdout.trim()
                ),
            });
        }
    }
    Ok(())
}
