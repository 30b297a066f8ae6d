//! Install the latest CMake and register an Lmod module for it.

use std::process::ExitCode;

use clap::Parser;

use elmodo::cli::{run_installer, InstallOpts};
use elmodo::fetch::Fetcher;
use elmodo::modulefile::Lmod;
use elmodo::tools::cmake::CmakeInstaller;

/// Download the latest CMake installer from cmake.org and generate a module.
#[derive(Debug, Parser)]
#[command(name = "install-cmake", version)]
struct Cli {
    #[command(flatten)]
    opts: InstallOpts,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    run_installer(&cli.opts, |config, reporter| {
        let fetcher = Fetcher::new();
        let lmod = Lmod;
        CmakeInstaller::new(&fetcher, &lmod)
            .run(config, reporter)
            .map(|_| ())
    })
}
