//! Module registration and verification.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::{ElmodoError, Result};
use crate::install::InstallationRecord;
use crate::modulefile::system::ModuleSystem;

/// A registered module.
#[derive(Debug, Clone)]
pub struct ModuleDefinition {
    /// Lmod name, `tool/version`.
    pub module_name: String,
    /// Path of the module file that was written.
    pub module_file_path: PathBuf,
    /// Installation directory the module points at.
    pub install_dir: PathBuf,
}

/// Write the module file and verify it end to end.
///
/// Three independent checks, in order:
/// 1. `module show` succeeds and echoes the exact file path written, so
///    Lmod found our file rather than a same-named one elsewhere on the
///    module path.
/// 2. `module load && which <tool>` resolves to the installed executable
///    by filesystem identity. Symlinked module trees are common, so path
///    strings are not compared.
/// 3. Invoking the tool through the loaded environment reports the
///    expected version.
pub fn register_and_check(
    system: &dyn ModuleSystem,
    tool: &str,
    module_file: &Path,
    content: &str,
    record: &InstallationRecord,
    version_flag: &str,
) -> Result<ModuleDefinition> {
    let module_name = format!("{tool}/{}", record.version);

    if let Some(parent) = module_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(module_file, content)
        .with_context(|| format!("Failed to write {}", module_file.display()))?;

    check_show(system, &module_name, module_file)?;
    check_resolved_executable(system, tool, &module_name, &record.executable_path)?;
    check_loaded_version(system, tool, &module_name, version_flag, &record.version)?;

    Ok(ModuleDefinition {
        module_name,
        module_file_path: module_file.to_path_buf(),
        install_dir: record.install_dir.clone(),
    })
}

fn check_show(system: &dyn ModuleSystem, module_name: &str, module_file: &Path) -> Result<()> {
    let result = system.show(module_name)?;
    if !result.success {
        return Err(ElmodoError::Registration {
            module: module_name.to_string(),
            message: format!("module show failed: {}", result.stderr.trim()),
        });
    }
    // Lmod prints `show` output on stderr.
    let echoed = format!("{}{}", result.stdout, result.stderr);
    if !echoed.contains(&module_file.display().to_string()) {
        return Err(ElmodoError::Registration {
            module: module_name.to_string(),
            message: format!(
                "module show did not reference {}; another module file shadows it",
                module_file.display()
            ),
        });
    }
    Ok(())
}

fn check_resolved_executable(
    system: &dyn ModuleSystem,
    tool: &str,
    module_name: &str,
    expected: &Path,
) -> Result<()> {
    let result = system.load_and_run(module_name, &format!("which {tool}"))?;
    if !result.success {
        return Err(ElmodoError::Registration {
            module: module_name.to_string(),
            message: format!(
                "{tool} is not on the PATH set by the module: {}",
                result.stderr.trim()
            ),
        });
    }
    let resolved = PathBuf::from(result.stdout.trim());
    if !same_file(&resolved, expected)? {
        return Err(ElmodoError::Registration {
            module: module_name.to_string(),
            message: format!(
                "module resolves {tool} to {}, expected {}",
                resolved.display(),
                expected.display()
            ),
        });
    }
    Ok(())
}

fn check_loaded_version(
    system: &dyn ModuleSystem,
    tool: &str,
    module_name: &str,
    version_flag: &str,
    version: &str,
) -> Result<()> {
    let result = system.load_and_run(module_name, &format!("{tool} {version_flag}"))?;
    if !result.success {
        return Err(ElmodoError::Registration {
            module: module_name.to_string(),
            message: format!(
                "failed to run {tool} through the loaded module: {}",
                result.stderr.trim()
            ),
        });
    }
    if !result.stdout.contains(version) {
        return Err(ElmodoError::Registration {
            module: module_name.to_string(),
            message: format!(
                "{tool} loaded through the module is not version {version}: {}",
                result.stdout.trim()
            ),
        });
    }
    Ok(())
}

/// Filesystem identity comparison, tolerant of symlinks and bind mounts.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> Result<bool> {
    use std::os::unix::fs::MetadataExt;
    let (meta_a, meta_b) = match (std::fs::metadata(a), std::fs::metadata(b)) {
        (Ok(a), Ok(b)) => (a, b),
        _ => return Ok(false),
    };
    Ok(meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino())
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> Result<bool> {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => Ok(a == b),
        _ => Ok(false),
    }
}
