//! Capability interface over the external module system.
//!
//! The `module` command is a shell function, not a binary, so every
//! interaction goes through `sh -c`. Modeling the two interactions the
//! registrar needs as a trait lets tests substitute a fake instead of
//! requiring a live Lmod installation.

use crate::error::Result;
use crate::shell::{run_shell, CommandOptions, CommandResult};

/// The two module-system interactions the registrar performs.
pub trait ModuleSystem {
    /// `module show <name>`: parse the module file and describe it.
    fn show(&self, name: &str) -> Result<CommandResult>;

    /// `module load <name> && <command>`: run a command in the
    /// environment the module sets up.
    fn load_and_run(&self, name: &str, command: &str) -> Result<CommandResult>;
}

/// Production implementation shelling out to Lmod.
#[derive(Debug, Default)]
pub struct Lmod;

impl Lmod {
    fn options() -> CommandOptions {
        // Lmod pipes `show` output through a pager when one is configured;
        // an empty LMOD_PAGER keeps the output on stderr where we read it.
        CommandOptions::default().with_env("LMOD_PAGER", "")
    }
}

impl ModuleSystem for Lmod {
    fn show(&self, name: &str) -> Result<CommandResult> {
        run_shell(&format!("module show {name}"), &Self::options())
    }

    fn load_and_run(&self, name: &str, command: &str) -> Result<CommandResult> {
        run_shell(&format!("module load {name} && {command}"), &Self::options())
    }
}
