//! Git provisioning: kernel.org listing (or GitHub tags), source build.

use std::path::{Path, PathBuf};

use crate::config::InstallConfig;
use crate::error::Result;
use crate::fetch::client::join_url;
use crate::fetch::{require_tar_xz, Fetcher};
use crate::install::build::build_from_source;
use crate::install::verify_executable_version;
use crate::modulefile::{register_and_check, ModuleDefinition, ModulefileBuilder, ModuleSystem};
use crate::release::{listing, tags, ReleaseDescriptor};
use crate::ui::Reporter;
use crate::{archive, cleanup, tools};

/// kernel.org mirror serving the Git source tarballs.
pub const LISTING_URL: &str = "https://mirrors.edge.kernel.org/pub/software/scm/git/";

/// GitHub tag list for the alternate resolution backend.
pub const TAGS_URL: &str = "https://api.github.com/repos/git/git/tags";

const TOOL: &str = "git";
const VERSION_FLAG: &str = "--version";

/// Where the latest Git version is resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitSource {
    /// Scan the kernel.org directory listing for the newest tarball.
    KernelOrgListing,
    /// Ask the GitHub tag API; the tarball still comes from kernel.org.
    GithubTags,
}

/// The Git pipeline with its external collaborators injected.
pub struct GitInstaller<'a> {
    pub listing_url: String,
    pub tags_url: String,
    pub source: GitSource,
    pub fetcher: &'a Fetcher,
    pub module_system: &'a dyn ModuleSystem,
    /// Where the tarball is downloaded and the source tree extracted.
    pub work_dir: PathBuf,
}

impl<'a> GitInstaller<'a> {
    pub fn new(fetcher: &'a Fetcher, module_system: &'a dyn ModuleSystem) -> Self {
        Self {
            listing_url: LISTING_URL.to_string(),
            tags_url: TAGS_URL.to_string(),
            source: GitSource::KernelOrgListing,
            fetcher,
            module_system,
            work_dir: std::env::temp_dir(),
        }
    }

    fn resolve(&self) -> Result<ReleaseDescriptor> {
        match self.source {
            GitSource::KernelOrgListing => {
                listing::resolve(self.fetcher, &self.listing_url, TOOL)
            }
            GitSource::GithubTags => {
                let version = tags::resolve(self.fetcher, &self.tags_url, TOOL)?;
                let name = format!("git-{version}.tar.xz");
                let url = join_url(&self.listing_url, &name)?;
                ReleaseDescriptor::new(TOOL, version, name, url)
            }
        }
    }

    /// Run the full pipeline: resolve, fetch, build, register, clean up.
    pub fn run(&self, config: &InstallConfig, reporter: &Reporter) -> Result<ModuleDefinition> {
        reporter.message(&format!(
            "Using module base directory {}.",
            config.module_base_dir.display()
        ));

        let descriptor = tools::with_stage(
            reporter,
            "Querying latest Git release...",
            "Queried latest Git release.",
            || self.resolve(),
        )?;
        reporter.message(&format!("Latest Git version: {}", descriptor.version));

        let tarball =
            tools::download_artifact(self.fetcher, reporter, &descriptor, &self.work_dir)?;
        require_tar_xz(&tarball)?;

        let extract_root = self
            .work_dir
            .join(format!("git-build-{}", std::process::id()));
        std::fs::create_dir_all(&extract_root)?;
        let build_dir = tools::with_stage(
            reporter,
            &format!("Extracting {}...", descriptor.artifact_name),
            &format!("Extracted {}.", descriptor.artifact_name),
            || archive::extract_tar_xz(&tarball, &extract_root),
        )?;

        let dest = config.install_dir(&descriptor.version);
        let record = tools::with_stage(
            reporter,
            &format!(
                "Installing Git {} in {}...",
                descriptor.version,
                dest.display()
            ),
            &format!(
                "Installed Git {} in {}.",
                descriptor.version,
                dest.display()
            ),
            || {
                let record = build_from_source(
                    TOOL,
                    &build_dir,
                    &descriptor.version,
                    &dest,
                    Path::new("bin/git"),
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
        let content = ModulefileBuilder::new(TOOL, "Git", &record.version, &record.install_dir)
            .prepend_path("LD_LIBRARY_PATH", "lib64")
            .prepend_path("LIBRARY_PATH", "lib64")
            .prepend_path("MANPATH", "share/man")
            .prepend_path("PATH", "bin")
            .render();

        let module = tools::with_stage(
            reporter,
            &format!(
                "Creating module file under {}...",
                config.module_base_dir.display()
            ),
            &format!("Created and checked module git/{}.", record.version),
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

        cleanup::remove_artifact(&tarball);
        cleanup::remove_tree(&extract_root);
        Ok(module)
    }
}
