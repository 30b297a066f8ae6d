//! Install the latest Ninja binary and register an Lmod module for it.

use std::process::ExitCode;

use clap::Parser;

use elmodo::cli::{run_installer, InstallOpts};
use elmodo::fetch::Fetcher;
use elmodo::modulefile::Lmod;
use elmodo::tools::ninja::NinjaInstaller;

/// Download the latest Ninja binary from GitHub and generate a module.
#[derive(Debug, Parser)]
#[command(name = "install-ninja", version)]
struct Cli {
    #[command(flatten)]
    opts: InstallOpts,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    run_installer(&cli.opts, |config, reporter| {
        let fetcher = Fetcher::new();
        let lmod = Lmod;
        NinjaInstaller::new(&fetcher, &lmod)
            .run(config, reporter)
            .map(|_| ())
    })
}
