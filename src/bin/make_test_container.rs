//! Build and run a throwaway Docker container for local testing.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use elmodo::cli::init_tracing;
use elmodo::testbed::{run_test_container, ContainerSpec};
use elmodo::ui::Reporter;

/// Build a throwaway Docker test container, run a smoke test in it, and
/// tear it down.
#[derive(Debug, Parser)]
#[command(name = "make-test-container", version)]
struct Cli {
    /// Base image to build from
    #[arg(long, default_value = "debian")]
    base_image: String,

    /// Image and container name
    #[arg(long, default_value = "elmodo")]
    tag: String,

    /// Host directory mounted as the container workspace
    #[arg(long, default_value = ".")]
    mount_dir: PathBuf,

    /// Command run inside the container as the smoke test
    #[arg(long, default_value = "ls")]
    smoke_command: String,

    /// Minimal output
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    let reporter = Reporter::new(cli.quiet);

    let user = std::env::var("USER").unwrap_or_else(|_| "tester".to_string());
    let hostname = std::env::var("HOSTNAME").unwrap_or_else(|_| "local".to_string());
    let spec = ContainerSpec {
        base_image: cli.base_image,
        tag: cli.tag,
        hostname: format!("{hostname}0"),
        user,
        mount_dir: cli.mount_dir,
        smoke_command: cli.smoke_command,
    };

    match run_test_container(&spec, &reporter) {
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
