//! CMake provisioning: cmake.org JSON index, self-extracting installer.

use std::path::{Path, PathBuf};

use crate::config::InstallConfig;
use crate::error::Result;
use crate::fetch::{require_min_size, Fetcher, MIN_INSTALLER_SIZE};
use crate::install::installer::run_binary_installer;
use crate::install::verify_executable_version;
use crate::modulefile::{register_and_check, ModuleDefinition, ModulefileBuilder, ModuleSystem};
use crate::platform::Platform;
use crate::release::json_index;
use crate::ui::Reporter;
use crate::{cleanup, tools};

/// cmake.org's latest-release file index.
pub const INDEX_URL: &str = "https://cmake.org/files/LatestRelease/cmake-latest-files-v1.json";

const TOOL: &str = "cmake";
const VERSION_FLAG: &str = "--version";

/// The CMake pipeline with its external collaborators injected.
pub struct CmakeInstaller<'a> {
    pub index_url: String,
    pub fetcher: &'a Fetcher,
    pub module_system: &'a dyn ModuleSystem,
    pub platform: Platform,
    /// Where the installer is downloaded to before running.
    pub work_dir: PathBuf,
}

impl<'a> CmakeInstaller<'a> {
    pub fn new(fetcher: &'a Fetcher, module_system: &'a dyn ModuleSystem) -> Self {
        Self {
            index_url: INDEX_URL.to_string(),
            fetcher,
            module_system,
            platform: Platform::detect(),
            work_dir: std::env::temp_dir(),
        }
    }

    /// Run the full pipeline: resolve, fetch, install, register, clean up.
    pub fn run(&self, config: &InstallConfig, reporter: &Reporter) -> Result<ModuleDefinition> {
        reporter.message(&format!(
            "Using module base directory {}.",
            config.module_base_dir.display()
        ));

        let descriptor = tools::with_stage(
            reporter,
            "Querying cmake.org latest files...",
            "Queried cmake.org latest files.",
            || json_index::resolve(self.fetcher, &self.index_url, &self.platform),
        )?;
        reporter.message(&format!(
            "Latest CMake: {}, installer: {}",
            descriptor.version, descriptor.artifact_name
        ));

        let installer =
            tools::download_artifact(self.fetcher, reporter, &descriptor, &self.work_dir)?;
        require_min_size(&installer, MIN_INSTALLER_SIZE)?;

        let dest = config.install_dir(&descriptor.version);
        let record = tools::with_stage(
            reporter,
            &format!(
                "Installing CMake {} in {}...",
                descriptor.version,
                dest.display()
            ),
            &format!(
                "Installed CMake {} in {}.",
                descriptor.version,
                dest.display()
            ),
            || {
                let record = run_binary_installer(
                    TOOL,
                    &installer,
                    &descriptor.version,
                    &dest,
                    Path::new("bin/cmake"),
                )?;
                verify_executable_version(
                    TOOL,
                    &record.executable_path,
                    VERSION_FLAG,
                    &record.version,
                )?;
                Ok(record)
            },
        )?;

        let module_file = config.module_file(TOOL, &record.version);
        let content = ModulefileBuilder::new(TOOL, "CMake", &record.version, &record.install_dir)
            .prepend_path("MANPATH", "man")
            .prepend_path("PATH", "bin")
            .prepend_path("ACLOCAL_PATH", "share/aclocal")
            .setenv("CMAKE_COMMAND", "$root/bin/cmake")
            .setenv("CMAKE_VERSION", &record.version)
            .render();

        let module = tools::with_stage(
            reporter,
            &format!(
                "Creating module file under {}...",
                config.module_base_dir.display()
            ),
            &format!("Created and checked module cmake/{}.", record.version),
            || {
                register_and_check(
                    self.module_system,
                    TOOL,
                    &module_file,
                    &content,
                    &record,
                    VERSION_FLAG,
                )
            },
        )?;

        cleanup::remove_artifact(&installer);
        Ok(module)
    }
}
