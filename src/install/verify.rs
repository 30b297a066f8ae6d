//! Post-install verification, independent of installer output.

use std::path::Path;

use crate::error::{ElmodoError, Result};
use crate::install::staging::Staging;
use crate::install::InstallationRecord;
use crate::shell::{run, CommandOptions};

/// Require that `path` exists and carries an execute bit.
pub fn require_executable(tool: &str, path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(ElmodoError::Installation {
            tool: tool.to_string(),
            message: format!("executable {} does not exist", path.display()),
        });
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(path)?.permissions().mode();
        if mode & 0o111 == 0 {
            return Err(ElmodoError::Installation {
                tool: tool.to_string(),
                message: format!("{} is not executable", path.display()),
            });
        }
    }
    Ok(())
}

/// Invoke the installed executable with its version flag and require the
/// expected version substring in stdout.
///
/// This deliberately does not trust the installer's own success report:
/// an installer can exit 0 and still leave a stale binary behind.
pub fn verify_executable_version(
    tool: &str,
    executable: &Path,
    version_flag: &str,
    version: &str,
) -> Result<()> {
    require_executable(tool, executable)?;

    let exe = executable.to_string_lossy();
    let result = run(exe.as_ref(), &[version_flag], &CommandOptions::default())?;
    if !result.success {
        return Err(ElmodoError::Installation {
            tool: tool.to_string(),
            message: format!(
                "{} {version_flag} exited with code {:?}: {}",
                executable.display(),
                result.exit_code,
                result.stderr.trim()
            ),
        });
    }
    if !result.stdout.contains(version) {
        return Err(ElmodoError::Installation {
            tool: tool.to_string(),
            message: format!(
                "{} reports the wrong version, expected {version}: {}",
                executable.display(),
                result.stdout.trim()
            ),
        });
    }
    Ok(())
}

/// Single-binary mode (ninja-style): move an already-extracted executable
/// into the staging prefix and commit.
pub fn place_single_binary(
    tool: &str,
    extracted: &Path,
    version: &str,
    dest: &Path,
) -> Result<InstallationRecord> {
    require_executable(tool, extracted)?;

    let staging = Staging::create(dest)?;
    let staged = staging.path().join(tool);
    // The extraction scratch dir can be on another filesystem, where a
    // rename fails with EXDEV; fall back to copy-and-remove.
    if std::fs::rename(extracted, &staged).is_err() {
        // fs::copy carries the permission bits over.
        std::fs::copy(extracted, &staged)?;
        std::fs::remove_file(extracted)?;
    }

    let install_dir = staging.commit()?;
    Ok(InstallationRecord {
        version: version.to_string(),
        executable_path: install_dir.join(tool),
        install_dir,
    })
}
