//! Terminal progress reporting.
//!
//! Each pipeline stage shows a spinner while it runs and collapses to a
//! one-line summary when it finishes, mirroring the transient
//! `Doing X... / Did X.` output of classic provisioning scripts. `--quiet`
//! suppresses the spinners but keeps errors on stderr.

pub mod spinner;

pub use spinner::StageSpinner;

use console::style;

/// Per-run progress reporter handed to the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    /// Create a reporter; `quiet` disables all non-error output.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Start a spinner for one stage.
    pub fn stage(&self, message: &str) -> StageSpinner {
        if self.quiet {
            StageSpinner::hidden()
        } else {
            StageSpinner::new(message)
        }
    }

    /// Print an informational line.
    pub fn message(&self, msg: &str) {
        if !self.quiet {
            println!("{msg}");
        }
    }

    /// Print the final success line.
    pub fn done(&self) {
        if !self.quiet {
            println!("{}", style("Done.").green().bold());
        }
    }
}
