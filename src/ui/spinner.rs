//! Progress spinners.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// A spinner shown while a pipeline stage runs.
pub struct StageSpinner {
    bar: ProgressBar,
}

impl StageSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .expect("spinner template is valid"),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    /// Create a spinner that doesn't show (for quiet mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Update the message while the stage runs.
    pub fn set_message(&self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    /// Replace the spinner line with a success summary.
    pub fn finish_success(self, msg: &str) {
        self.bar.set_style(
            ProgressStyle::default_spinner()
                .template("{msg}")
                .expect("spinner template is valid"),
        );
        self.bar
            .finish_with_message(format!("{} {msg}", style("✓").green()));
    }

    /// Drop the spinner line entirely (the caller reports the failure).
    pub fn finish_failure(self) {
        self.bar.finish_and_clear();
    }
}
