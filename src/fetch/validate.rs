//! Structural validation of downloaded artifacts.
//!
//! A download that "succeeds" can still be garbage: captive portals and
//! error pages come back with status 200. Installer binaries are gated on a
//! minimum size, archives on actually parsing their container format.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{ElmodoError, Result};

/// Minimum plausible size for a self-extracting installer.
///
/// Anything under 5 MiB is almost certainly an HTML error page that was
/// served instead of the binary.
pub const MIN_INSTALLER_SIZE: u64 = 5 * 1024 * 1024;

/// Require that the file exists and is at least `min_size` bytes.
pub fn require_min_size(path: &Path, min_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|_| ElmodoError::ArtifactInvalid {
        path: path.to_path_buf(),
        message: "file does not exist".into(),
    })?;
    if metadata.len() < min_size {
        return Err(ElmodoError::ArtifactInvalid {
            path: path.to_path_buf(),
            message: format!(
                "file is {} bytes, expected at least {} bytes",
                metadata.len(),
                min_size
            ),
        });
    }
    Ok(())
}

/// Require that the file is a readable zip archive.
///
/// Opens the archive and reads the central directory; a bad magic number or
/// truncated trailer fails here rather than at extraction time.
pub fn require_zip(path: &Path) -> Result<()> {
    let file = File::open(path).map_err(|_| ElmodoError::ArtifactInvalid {
        path: path.to_path_buf(),
        message: "file does not exist".into(),
    })?;
    zip::ZipArchive::new(file).map_err(|e| ElmodoError::ArtifactInvalid {
        path: path.to_path_buf(),
        message: format!("not a zip file: {e}"),
    })?;
    Ok(())
}

/// Require that the file is an xz-compressed tar archive.
///
/// Decodes enough of the stream to read the first tar header.
pub fn require_tar_xz(path: &Path) -> Result<()> {
    let file = File::open(path).map_err(|_| ElmodoError::ArtifactInvalid {
        path: path.to_path_buf(),
        message: "file does not exist".into(),
    })?;
    let decoder = xz2::read::XzDecoder::new(BufReader::new(file));
    let mut archive = tar::Archive::new(decoder);
    let mut entries = archive.entries().map_err(|e| ElmodoError::ArtifactInvalid {
        path: path.to_path_buf(),
        message: format!("not a tar archive: {e}"),
    })?;
    match entries.next() {
        Some(Ok(_)) => Ok(()),
        Some(Err(e)) => Err(ElmodoError::ArtifactInvalid {
            path: path.to_path_buf(),
            message: format!("not an xz-compressed tar archive: {e}"),
        }),
        None => Err(ElmodoError::ArtifactInvalid {
            path: path.to_path_buf(),
            message: "archive contains no entries".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn min_size_rejects_small_files() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_file(&temp, "installer.sh", b"<html>404</html>");
        let err = require_min_size(&path, MIN_INSTALLER_SIZE).unwrap_err();
        assert!(err.to_string().contains("bytes"));
    }

    #[test]
    fn min_size_accepts_large_enough_files() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_file(&temp, "installer.sh", &vec![0u8; 1024]);
        assert!(require_min_size(&path, 512).is_ok());
    }

    #[test]
    fn min_size_rejects_missing_files() {
        let temp = tempfile::tempdir().unwrap();
        let err = require_min_size(&temp.path().join("missing"), 1).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn zip_check_rejects_non_zip_bytes() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_file(&temp, "ninja.zip", b"<html>not a zip</html>");
        assert!(require_zip(&path).is_err());
    }

    #[test]
    fn zip_check_accepts_real_zip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("ninja.zip");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("ninja", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"#!/bin/sh\n").unwrap();
        writer.finish().unwrap();
        assert!(require_zip(&path).is_ok());
    }

    #[test]
    fn tar_xz_check_rejects_plain_text() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_file(&temp, "git.tar.xz", b"hello there");
        assert!(require_tar_xz(&path).is_err());
    }

    #[test]
    fn tar_xz_check_accepts_real_archive() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("git.tar.xz");
        let file = std::fs::File::create(&path).unwrap();
        let encoder = xz2::write::XzEncoder::new(file, 6);
        let mut builder = tar::Builder::new(encoder);
        let mut header = tar::Header::new_gnu();
        header.set_size(5);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, "git-2.10.1/README", &b"hello"[..])
            .unwrap();
        builder.into_inner().unwrap().finish().unwrap();
        assert!(require_tar_xz(&path).is_ok());
    }
}
