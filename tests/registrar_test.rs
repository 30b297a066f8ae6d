//! Integration tests for module registration and its verification steps.

mod common;

use std::path::PathBuf;

use common::FakeModuleSystem;
use elmodo::install::InstallationRecord;
use elmodo::modulefile::{register_and_check, ModulefileBuilder};
use elmodo::ElmodoError;

#[cfg(unix)]
fn stub_executable(dir: &std::path::Path, name: &str, stdout: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\necho '{stdout}'\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
fn record(executable: PathBuf, install_dir: PathBuf) -> InstallationRecord {
    InstallationRecord {
        version: "1.12.1".into(),
        install_dir,
        executable_path: executable,
    }
}

#[cfg(unix)]
#[test]
fn registration_writes_the_file_and_passes_all_checks() {
    let temp = tempfile::tempdir().unwrap();
    let modules = temp.path().join("modules");
    let install_dir = temp.path().join("1.12.1");
    std::fs::create_dir_all(&install_dir).unwrap();
    let exe = stub_executable(&install_dir, "ninja", "1.12.1");

    let system = FakeModuleSystem {
        modules_root: modules.clone(),
        which_output: exe.clone(),
        version_output: "1.12.1\n".into(),
    };
    let content = ModulefileBuilder::new("ninja", "Ninja", "1.12.1", &install_dir)
        .prepend_path("PATH", "")
        .render();

    let module = register_and_check(
        &system,
        "ninja",
        &modules.join("ninja/1.12.1"),
        &content,
        &record(exe, install_dir),
        "-v",
    )
    .unwrap();

    assert_eq!(module.module_name, "ninja/1.12.1");
    assert!(module.module_file_path.is_file());
    let written = std::fs::read_to_string(&module.module_file_path).unwrap();
    assert!(written.starts_with("#%Module"));
    assert!(written.contains("conflict    ninja"));
}

#[cfg(unix)]
#[test]
fn symlinked_executable_passes_identity_check() {
    let temp = tempfile::tempdir().unwrap();
    let modules = temp.path().join("modules");
    let install_dir = temp.path().join("1.12.1");
    std::fs::create_dir_all(&install_dir).unwrap();
    let exe = stub_executable(&install_dir, "ninja", "1.12.1");

    // `which` resolves through a symlink; identity comparison must accept.
    let link = temp.path().join("ninja-on-path");
    std::os::unix::fs::symlink(&exe, &link).unwrap();

    let system = FakeModuleSystem {
        modules_root: modules.clone(),
        which_output: link,
        version_output: "1.12.1\n".into(),
    };
    let content = ModulefileBuilder::new("ninja", "Ninja", "1.12.1", &install_dir)
        .prepend_path("PATH", "")
        .render();

    assert!(register_and_check(
        &system,
        "ninja",
        &modules.join("ninja/1.12.1"),
        &content,
        &record(exe, install_dir),
        "-v",
    )
    .is_ok());
}

#[cfg(unix)]
#[test]
fn resolving_to_a_different_binary_fails_registration() {
    let temp = tempfile::tempdir().unwrap();
    let modules = temp.path().join("modules");
    let install_dir = temp.path().join("1.12.1");
    std::fs::create_dir_all(&install_dir).unwrap();
    let exe = stub_executable(&install_dir, "ninja", "1.12.1");
    // Same basename, different file: string comparison would pass this.
    let impostor = stub_executable(temp.path(), "ninja", "1.11.0");

    let system = FakeModuleSystem {
        modules_root: modules.clone(),
        which_output: impostor,
        version_output: "1.12.1\n".into(),
    };
    let content = ModulefileBuilder::new("ninja", "Ninja", "1.12.1", &install_dir)
        .prepend_path("PATH", "")
        .render();

    let err = register_and_check(
        &system,
        "ninja",
        &modules.join("ninja/1.12.1"),
        &content,
        &record(exe, install_dir),
        "-v",
    )
    .unwrap_err();
    assert!(matches!(err, ElmodoError::Registration { .. }));
}

#[cfg(unix)]
#[test]
fn wrong_loaded_version_fails_registration() {
    let temp = tempfile::tempdir().unwrap();
    let modules = temp.path().join("modules");
    let install_dir = temp.path().join("1.12.1");
    std::fs::create_dir_all(&install_dir).unwrap();
    let exe = stub_executable(&install_dir, "ninja", "1.12.1");

    let system = FakeModuleSystem {
        modules_root: modules.clone(),
        which_output: exe.clone(),
        version_output: "1.11.0\n".into(),
    };
    let content = ModulefileBuilder::new("ninja", "Ninja", "1.12.1", &install_dir)
        .prepend_path("PATH", "")
        .render();

    let err = register_and_check(
        &system,
        "ninja",
        &modules.join("ninja/1.12.1"),
        &content,
        &record(exe, install_dir),
        "-v",
    )
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("not version 1.12.1"));
}
