//! Ninja provisioning: GitHub latest release, single prebuilt binary.

use std::path::PathBuf;

use crate::config::InstallConfig;
use crate::error::Result;
use crate::fetch::{require_zip, Fetcher};
use crate::install::verify::place_single_binary;
use crate::install::verify_executable_version;
use crate::modulefile::{register_and_check, ModuleDefinition, ModulefileBuilder, ModuleSystem};
use crate::release::github;
use crate::ui::Reporter;
use crate::{archive, cleanup, tools};

/// GitHub latest-release endpoint for ninja-build.
pub const RELEASE_URL: &str = "https://api.github.com/repos/ninja-build/ninja/releases/latest";

const TOOL: &str = "ninja";
const VERSION_FLAG: &str = "-v";

/// The Ninja pipeline with its external collaborators injected.
pub struct NinjaInstaller<'a> {
    pub release_url: String,
    pub fetcher: &'a Fetcher,
    pub module_system: &'a dyn ModuleSystem,
    /// Where the zip is downloaded and unpacked.
    pub work_dir: PathBuf,
}

impl<'a> NinjaInstaller<'a> {
    pub fn new(fetcher: &'a Fetcher, module_system: &'a dyn ModuleSystem) -> Self {
        Self {
            release_url: RELEASE_URL.to_string(),
            fetcher,
            module_system,
            work_dir: std::env::temp_dir(),
        }
    }

    /// Run the full pipeline: resolve, fetch, place, register, clean up.
    pub fn run(&self, config: &InstallConfig, reporter: &Reporter) -> Result<ModuleDefinition> {
        reporter.message(&format!(
            "Using module base directory {}.",
            config.module_base_dir.display()
        ));

        let descriptor = tools::with_stage(
            reporter,
            "Querying latest Ninja release...",
            "Queried latest Ninja release.",
            || github::resolve(self.fetcher, &self.release_url, TOOL),
        )?;
        reporter.message(&format!("Latest Ninja: {}", descriptor.version));

        let zip = tools::download_artifact(self.fetcher, reporter, &descriptor, &self.work_dir)?;
        require_zip(&zip)?;

        let extract_dir = self
            .work_dir
            .join(format!("ninja-extract-{}", std::process::id()));
        std::fs::create_dir_all(&extract_dir)?;
        tools::with_stage(
            reporter,
            &format!("Extracting {}...", descriptor.artifact_name),
            &format!("Extracted {}.", descriptor.artifact_name),
            || archive::extract_zip(&zip, &extract_dir),
        )?;

        let dest = config.install_dir(&descriptor.version);
        let record = tools::with_stage(
            reporter,
            &format!(
                "Moving Ninja {} binary to {}...",
                descriptor.version,
                dest.display()
            ),
            &format!(
                "Moved Ninja {} binary to {}.",
                descriptor.version,
                dest.display()
            ),
            || {
                let record = place_single_binary(
                    TOOL,
                    &extract_dir.join("ninja"),
                    &descriptor.version,
                    &dest,
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
        let content = ModulefileBuilder::new(TOOL, "Ninja", &record.version, &record.install_dir)
            .prepend_path("PATH", "")
            .render();

        let module = tools::with_stage(
            reporter,
            &format!(
                "Creating module file under {}...",
                config.module_base_dir.display()
            ),
            &format!("Created and checked module ninja/{}.", record.version),
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

        cleanup::remove_artifact(&zip);
        cleanup::remove_tree(&extract_dir);
        Ok(module)
    }
}
