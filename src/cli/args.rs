//! CLI argument definitions shared by the installer binaries.

use std::path::PathBuf;

use clap::Args;

/// Flags common to every installer binary.
#[derive(Debug, Clone, Args)]
pub struct InstallOpts {
    /// The base directory for the module files (default: ~/.local/modules/)
    #[arg(long, value_name = "PATH")]
    pub module_base_dir: Option<PathBuf>,

    /// The directory for the tool installations (default: ~/.local/)
    #[arg(long, value_name = "PATH")]
    pub module_dir: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        opts: InstallOpts,
    }

    #[test]
    fn defaults_leave_paths_unset() {
        let cli = TestCli::parse_from(["install-cmake"]);
        assert!(cli.opts.module_base_dir.is_none());
        assert!(cli.opts.module_dir.is_none());
        assert!(!cli.opts.quiet);
    }

    #[test]
    fn explicit_paths_are_parsed() {
        let cli = TestCli::parse_from([
            "install-cmake",
            "--module-base-dir",
            "/srv/modules",
            "--module-dir",
            "/srv/tools",
            "--quiet",
        ]);
        assert_eq!(
            cli.opts.module_base_dir,
            Some(PathBuf::from("/srv/modules"))
        );
        assert_eq!(cli.opts.module_dir, Some(PathBuf::from("/srv/tools")));
        assert!(cli.opts.quiet);
    }
}
