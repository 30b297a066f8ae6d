//! Shared test doubles for integration tests.

use std::path::PathBuf;

use elmodo::modulefile::ModuleSystem;
use elmodo::shell::CommandResult;
use elmodo::Result;

/// A fake module system backed by the filesystem.
///
/// `show` succeeds when the module file exists under `modules_root` and
/// echoes its path the way Lmod does (on stderr). `load_and_run` answers
/// `which <tool>` with a configured executable path and any other command
/// with a configured stdout.
pub struct FakeModuleSystem {
    pub modules_root: PathBuf,
    pub which_output: PathBuf,
    pub version_output: String,
}

impl ModuleSystem for FakeModuleSystem {
    fn show(&self, name: &str) -> Result<CommandResult> {
        let file = self.modules_root.join(name);
        if file.is_file() {
            Ok(CommandResult::synthetic(
                Some(0),
                "",
                &format!("{}:\n", file.display()),
            ))
        } else {
            Ok(CommandResult::synthetic(
                Some(1),
                "",
                &format!("Unable to locate a modulefile for '{name}'"),
            ))
        }
    }

    fn load_and_run(&self, _name: &str, command: &str) -> Result<CommandResult> {
        if command.starts_with("which ") {
            Ok(CommandResult::synthetic(
                Some(0),
                &format!("{}\n", self.which_output.display()),
                "",
            ))
        } else {
            Ok(CommandResult::synthetic(Some(0), &self.version_output, ""))
        }
    }
}
