//! Build-from-source mode (configure/make, git-style).

use std::path::Path;

use crate::error::{ElmodoError, Result};
use crate::install::staging::Staging;
use crate::install::InstallationRecord;
use crate::shell::{run, CommandOptions};

/// Fixed configure options for the Git source build.
const CONFIGURE_OPTIONS: &[&str] = &["--with-editor=vim", "--quiet"];

/// Configure and build the extracted source tree into a staging prefix,
/// then commit.
pub fn build_from_source(
    tool: &str,
    build_dir: &Path,
    version: &str,
    dest: &Path,
    exe_relative: &Path,
) -> Result<InstallationRecord> {
    let staging = Staging::create(dest)?;
    configure(tool, build_dir, staging.path())?;
    make_install(tool, build_dir)?;

    let install_dir = staging.commit()?;
    Ok(InstallationRecord {
        version: version.to_string(),
        executable_path: install_dir.join(exe_relative),
        install_dir,
    })
}

fn configure(tool: &str, build_dir: &Path, prefix: &Path) -> Result<()> {
    let prefix_arg = format!("--prefix={}", prefix.display());
    let mut args = vec![prefix_arg.as_str()];
    args.extend_from_slice(CONFIGURE_OPTIONS);

    let result = run("./configure", &args, &CommandOptions::in_dir(build_dir))?;
    if !result.success {
        return Err(ElmodoError::Installation {
            tool: tool.to_string(),
            message: format!(
                "configure exited with code {:?}: {}",
                result.exit_code,
                result.stderr.trim()
            ),
        });
    }
    Ok(())
}

fn make_install(tool: &str, build_dir: &Path) -> Result<()> {
    let jobs = format!("-j{}", parallelism());
    let result = run(
        "make",
        &["install", jobs.as_str(), "-s"],
        &CommandOptions::in_dir(build_dir),
    )?;
    if !result.success {
        return Err(ElmodoError::Installation {
            tool: tool.to_string(),
            message: format!(
                "make install exited with code {:?}: {}",
                result.exit_code,
                result.stderr.trim()
            ),
        });
    }
    Ok(())
}

fn parallelism() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}
