//! Lmod module file generation and registration.
//!
//! A module file is a small Tcl document that Lmod evaluates to put one
//! tool version on `PATH`. The registrar writes the file and then proves,
//! through the module system itself, that (a) Lmod parses the file we
//! wrote and not some other one, and (b) loading the module resolves the
//! tool name to the exact executable that was just installed.

pub mod definition;
pub mod registrar;
pub mod system;

pub use definition::ModulefileBuilder;
pub use registrar::{register_and_check, ModuleDefinition};
pub use system::{Lmod, ModuleSystem};
