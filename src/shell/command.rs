//! Captured subprocess execution.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{ElmodoError, Result};

/// Result of executing a subprocess.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Captured standard output.
    pub stdout: String,

    /// Captured standard error.
    pub stderr: String,

    /// Whether the command exited with code 0.
    pub success: bool,
}

impl CommandResult {
    /// Build a result from raw process output.
    fn from_output(output: std::process::Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        }
    }

    /// Fabricate a result without running anything (used by tests).
    pub fn synthetic(exit_code: Option<i32>, stdout: &str, stderr: &str) -> Self {
        Self {
            exit_code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            success: exit_code == Some(0),
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged over the inherited environment).
    pub env: HashMap<String, String>,
}

impl CommandOptions {
    /// Options running in the given directory.
    pub fn in_dir(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
            ..Self::default()
        }
    }

    /// Add an environment override.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }
}

/// Execute a program with arguments, capturing output.
///
/// Spawn failures and signal deaths surface as [`ElmodoError::CommandFailed`];
/// a non-zero exit is reported through the returned [`CommandResult`] so the
/// caller can quote stdout/stderr in its own error.
pub fn run(program: &str, args: &[&str], options: &CommandOptions) -> Result<CommandResult> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    configure(&mut cmd, options);

    let rendered = render(program, args);
    let output = cmd.output().map_err(|_| ElmodoError::CommandFailed {
        command: rendered,
        code: None,
    })?;
    Ok(CommandResult::from_output(output))
}

/// Execute a program with arguments, feeding `input` on stdin.
///
/// Used for commands that read a document from stdin, like
/// `docker build -f-`.
pub fn run_with_stdin(
    program: &str,
    args: &[&str],
    input: &str,
    options: &CommandOptions,
) -> Result<CommandResult> {
    use std::io::Write;

    let mut cmd = Command::new(program);
    cmd.args(args);
    configure(&mut cmd, options);
    cmd.stdin(Stdio::piped());

    let rendered = render(program, args);
    let spawn_failure = || ElmodoError::CommandFailed {
        command: rendered.clone(),
        code: None,
    };

    let mut child = cmd.spawn().map_err(|_| spawn_failure())?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes()).map_err(|_| spawn_failure())?;
    }
    let output = child.wait_with_output().map_err(|_| spawn_failure())?;
    Ok(CommandResult::from_output(output))
}

/// Execute a command line through `sh -c`, capturing output.
pub fn run_shell(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    configure(&mut cmd, options);

    let output = cmd.output().map_err(|_| ElmodoError::CommandFailed {
        command: command.to_string(),
        code: None,
    })?;
    Ok(CommandResult::from_output(output))
}

fn configure(cmd: &mut Command, options: &CommandOptions) {
    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }
    for (key, value) in &options.env {
        cmd.env(key, value);
    }
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
}

fn render(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|a| a.to_string()));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_captures_stdout() {
        let result = run("echo", &["hello"], &CommandOptions::default()).unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[test]
    fn run_reports_nonzero_exit_without_erroring() {
        let result = run_shell("exit 3", &CommandOptions::default()).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn missing_program_is_a_command_failure() {
        let err = run(
            "definitely-not-a-real-binary-4242",
            &[],
            &CommandOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ElmodoError::CommandFailed { .. }));
    }

    #[test]
    fn env_overrides_reach_the_child() {
        let options = CommandOptions::default().with_env("ELMODO_TEST_VAR", "42");
        let result = run_shell("printf '%s' \"$ELMODO_TEST_VAR\"", &options).unwrap();
        assert_eq!(result.stdout, "42");
    }

    #[test]
    fn cwd_is_respected() {
        let temp = tempfile::tempdir().unwrap();
        let canonical = temp.path().canonicalize().unwrap();
        let result = run_shell("pwd", &CommandOptions::in_dir(&canonical)).unwrap();
        assert_eq!(result.stdout.trim(), canonical.to_string_lossy());
    }

    #[test]
    fn stdin_is_fed_to_the_child() {
        let result = run_with_stdin("cat", &[], "hello stdin", &CommandOptions::default()).unwrap();
        assert!(result.success);
        assert_eq!(result.stdout, "hello stdin");
    }

    #[test]
    fn synthetic_results_mirror_exit_code() {
        let ok = CommandResult::synthetic(Some(0), "out", "");
        assert!(ok.success);
        let bad = CommandResult::synthetic(Some(1), "", "boom");
        assert!(!bad.success);
    }
}
