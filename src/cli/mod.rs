//! Shared CLI plumbing for the installer binaries.
//!
//! Each binary defines its own `clap` entry struct and flattens
//! [`InstallOpts`] into it; [`run_installer`] owns the common boilerplate:
//! tracing setup, config resolution, error reporting, and the final
//! `Done.` line.

pub mod args;

pub use args::InstallOpts;

use std::process::ExitCode;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::InstallConfig;
use crate::error::Result;
use crate::ui::Reporter;

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN (stage progress is shown by the reporter instead)
pub fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("elmodo=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("elmodo=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Run one installer pipeline and translate the outcome to an exit code.
pub fn run_installer(
    opts: &InstallOpts,
    pipeline: impl FnOnce(&InstallConfig, &Reporter) -> Result<()>,
) -> ExitCode {
    init_tracing(opts.debug);
    let reporter = Reporter::new(opts.quiet);

    let config = match InstallConfig::resolve(
        opts.module_base_dir.clone(),
        opts.module_dir.clone(),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match pipeline(&config, &reporter) {
        Ok(()) => {
            reporter.done();
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
