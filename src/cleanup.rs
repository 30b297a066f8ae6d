//! Best-effort removal of temporary artifacts.
//!
//! Cleanup never fails the pipeline: by the time it runs the tool is
//! installed and registered, and a leftover tarball is an annoyance, not
//! an error. Already-missing paths are fine (an earlier partial run may
//! have removed them).

use std::path::Path;

/// Remove a downloaded artifact file.
pub fn remove_artifact(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!("Removed {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Could not remove {}: {e}", path.display()),
    }
}

/// Remove an extracted build tree.
pub fn remove_tree(path: &Path) {
    match std::fs::remove_dir_all(path) {
        Ok(()) => tracing::debug!("Removed {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Could not remove {}: {e}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_existing_artifact() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("cmake.sh");
        std::fs::write(&path, "x").unwrap();
        remove_artifact(&path);
        assert!(!path.exists());
    }

    #[test]
    fn missing_artifact_is_tolerated() {
        let temp = tempfile::tempdir().unwrap();
        remove_artifact(&temp.path().join("never-existed"));
    }

    #[test]
    fn removes_build_tree_recursively() {
        let temp = tempfile::tempdir().unwrap();
        let tree = temp.path().join("git-2.10.1");
        std::fs::create_dir_all(tree.join("src")).unwrap();
        std::fs::write(tree.join("src/main.c"), "int main(){}").unwrap();
        remove_tree(&tree);
        assert!(!tree.exists());
    }

    #[test]
    fn missing_tree_is_tolerated() {
        let temp = tempfile::tempdir().unwrap();
        remove_tree(&temp.path().join("no-such-tree"));
    }
}
