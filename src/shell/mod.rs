//! Subprocess execution.
//!
//! Two flavors are needed: argv-style invocation for installers and
//! builds, and `sh -c` invocation for commands that must run through a
//! shell (the module system's `module` function only exists in a shell).
//! Both capture stdout and stderr so assertion failures can quote them.

pub mod command;

pub use command::{run, run_shell, run_with_stdin, CommandOptions, CommandResult};
