//! Module file rendering.
//!
//! The rendered document follows the classic Tcl modulefile layout:
//! `#%Module` magic line, a `ModulesHelp` proc, `module-whatis`, a `root`
//! variable, a `conflict` on the bare tool name so two versions can never
//! be loaded together, then `prepend-path` and `setenv` directives.

use std::path::Path;

/// Builds the text of one Lmod module file.
#[derive(Debug, Clone)]
pub struct ModulefileBuilder {
    tool: String,
    display_name: String,
    version: String,
    root: String,
    prepend_paths: Vec<(String, String)>,
    setenvs: Vec<(String, String)>,
}

impl ModulefileBuilder {
    /// Start a module file for `tool` at `version`, rooted at the
    /// installation directory.
    pub fn new(tool: &str, display_name: &str, version: &str, install_dir: &Path) -> Self {
        Self {
            tool: tool.to_string(),
            display_name: display_name.to_string(),
            version: version.to_string(),
            root: install_dir.display().to_string(),
            prepend_paths: Vec::new(),
            setenvs: Vec::new(),
        }
    }

    /// Prepend `$root/<relative>` to the given environment variable, or
    /// `$root` itself when `relative` is empty.
    pub fn prepend_path(mut self, var: &str, relative: &str) -> Self {
        let value = if relative.is_empty() {
            "$root".to_string()
        } else {
            format!("$root/{relative}")
        };
        self.prepend_paths.push((var.to_string(), value));
        self
    }

    /// Add a `setenv` directive.
    pub fn setenv(mut self, var: &str, value: &str) -> Self {
        self.setenvs.push((var.to_string(), value.to_string()));
        self
    }

    /// Render the module file text.
    pub fn render(&self) -> String {
        let whatis = format!("{} {}", self.display_name, self.version);
        let mut lines = vec![
            "#%Module".to_string(),
            "proc ModulesHelp { } {".to_string(),
            format!("  puts stderr {{{whatis}}}"),
            "}".to_string(),
            format!("module-whatis {{{whatis}}}"),
            format!("set root    {}", self.root),
            format!("conflict    {}", self.tool),
        ];
        for (var, value) in &self.prepend_paths {
            lines.push(format!("prepend-path    {var:<15} {value}"));
        }
        for (var, value) in &self.setenvs {
            lines.push(format!("setenv          {var:<15} {value}"));
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn cmake_builder() -> ModulefileBuilder {
        ModulefileBuilder::new(
            "cmake",
            "CMake",
            "3.28.0",
            &PathBuf::from("/opt/tools/3.28.0"),
        )
        .prepend_path("MANPATH", "man")
        .prepend_path("PATH", "bin")
        .prepend_path("ACLOCAL_PATH", "share/aclocal")
        .setenv("CMAKE_COMMAND", "$root/bin/cmake")
        .setenv("CMAKE_VERSION", "3.28.0")
    }

    #[test]
    fn starts_with_module_magic() {
        assert!(cmake_builder().render().starts_with("#%Module\n"));
    }

    #[test]
    fn declares_conflict_on_bare_tool_name() {
        let text = cmake_builder().render();
        assert!(text.contains("conflict    cmake"));
    }

    #[test]
    fn roots_paths_at_the_install_dir() {
        let text = cmake_builder().render();
        assert!(text.contains("set root    /opt/tools/3.28.0"));
        assert!(text.contains("$root/bin"));
        assert!(text.contains("$root/share/aclocal"));
    }

    #[test]
    fn whatis_carries_name_and_version() {
        let text = cmake_builder().render();
        assert!(text.contains("module-whatis {CMake 3.28.0}"));
    }

    #[test]
    fn setenv_lines_are_rendered() {
        let text = cmake_builder().render();
        assert!(text.contains("CMAKE_COMMAND"));
        assert!(text.contains("CMAKE_VERSION"));
    }

    #[test]
    fn empty_relative_prepends_root_itself() {
        let text = ModulefileBuilder::new("ninja", "Ninja", "1.12.1", &PathBuf::from("/o/1.12.1"))
            .prepend_path("PATH", "")
            .render();
        assert!(text.contains("prepend-path    PATH            $root\n"));
    }
}
