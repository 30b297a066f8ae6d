//! Build and install the latest Git and register an Lmod module for it.

use std::process::ExitCode;

use clap::Parser;

use elmodo::cli::{run_installer, InstallOpts};
use elmodo::fetch::Fetcher;
use elmodo::modulefile::Lmod;
use elmodo::tools::git::{GitInstaller, GitSource};

/// Download the latest Git tarball from kernel.org and generate a module.
#[derive(Debug, Parser)]
#[command(name = "install-git", version)]
struct Cli {
    #[command(flatten)]
    opts: InstallOpts,

    /// Resolve the latest version from the GitHub tag API instead of the
    /// kernel.org directory listing
    #[arg(long)]
    via_tags: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    run_installer(&cli.opts, |config, reporter| {
        let fetcher = Fetcher::new();
        let lmod = Lmod;
        let mut installer = GitInstaller::new(&fetcher, &lmod);
        if cli.via_tags {
            installer.source = GitSource::GithubTags;
        }
        installer.run(config, reporter).map(|_| ())
    })
}
