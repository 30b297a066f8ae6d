//! Throwaway Docker test container.
//!
//! Builds a minimal image around the current user, runs a detached
//! container with a host directory mounted as its workspace, executes a
//! smoke command inside it, and tears the container and image down again.
//! Any docker failure is fatal; the teardown only runs on the success
//! path, matching the throwaway nature of the container.

use std::path::PathBuf;

use crate::error::{ElmodoError, Result};
use crate::shell::{run, run_with_stdin, CommandOptions};
use crate::ui::Reporter;

/// What to build and run.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    /// Base image, e.g. `debian`.
    pub base_image: String,
    /// Image and container name.
    pub tag: String,
    /// Hostname inside the container.
    pub hostname: String,
    /// Non-root user created in the image and used for the run.
    pub user: String,
    /// Host directory mounted as the container workspace.
    pub mount_dir: PathBuf,
    /// Command executed inside the container as the smoke test.
    pub smoke_command: String,
}

impl ContainerSpec {
    fn workdir(&self) -> String {
        format!("/home/{}/workspace", self.user)
    }

    fn dockerfile(&self) -> String {
        [
            format!("FROM {}", self.base_image),
            format!(
                "RUN groupadd -r {user} && useradd -r -g {user} {user}",
                user = self.user
            ),
            format!("USER {}", self.user),
        ]
        .join("\n")
    }
}

/// Build, run, smoke-test, and tear down the container.
pub fn run_test_container(spec: &ContainerSpec, reporter: &Reporter) -> Result<()> {
    build_image(spec)?;
    reporter.message(&format!("Built image {}.", spec.tag));

    start_container(spec)?;
    reporter.message(&format!("Started container {}.", spec.tag));

    let smoke = docker(
        &[
            "exec",
            &spec.tag,
            "/bin/bash",
            "-c",
            &format!("cd {} && {}", spec.workdir(), spec.smoke_command),
        ],
        "docker exec",
    )?;
    reporter.message(&format!("Smoke test output: {}", smoke.trim()));

    docker(&["rm", "-f", &spec.tag], "docker rm")?;
    docker(&["rmi", &spec.tag], "docker rmi")?;
    Ok(())
}

fn build_image(spec: &ContainerSpec) -> Result<()> {
    let result = run_with_stdin(
        "docker",
        &["build", "-t", &spec.tag, "-f-", "."],
        &spec.dockerfile(),
        &CommandOptions::in_dir(&spec.mount_dir),
    )?;
    if !result.success {
        return Err(docker_error("docker build", &result.stderr, result.exit_code));
    }
    Ok(())
}

fn start_container(spec: &ContainerSpec) -> Result<()> {
    let volume = format!("{}:{}", spec.mount_dir.display(), spec.workdir());
    let workdir = spec.workdir();
    docker(
        &[
            "run",
            "-dt",
            "--rm",
            &format!("--name={}", spec.tag),
            &format!("--hostname={}", spec.hostname),
            &format!("--volume={volume}"),
            &format!("--user={}", spec.user),
            &format!("--workdir={workdir}"),
            &spec.tag,
        ],
        "docker run",
    )?;
    Ok(())
}

fn docker(args: &[&str], what: &str) -> Result<String> {
    let result = run("docker", args, &CommandOptions::default())?;
    if !result.success {
        return Err(docker_error(what, &result.stderr, result.exit_code));
    }
    Ok(result.stdout)
}

fn docker_error(what: &str, stderr: &str, code: Option<i32>) -> ElmodoError {
    ElmodoError::Installation {
        tool: "docker".into(),
        message: format!("{what} exited with code {code:?}: {}", stderr.trim()),
    }
}
