//! Path-traversal-safe archive extraction.
//!
//! Archives come from the network, so entry names are untrusted: an entry
//! named `../../.bashrc` must never land outside the destination. Tar
//! entries go through `unpack_in`, which refuses escaping paths; zip
//! entries go through `enclosed_name`, which rejects absolute paths and
//! parent-directory components. Unix mode bits recorded in zip entries are
//! preserved so extracted binaries stay executable.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::{ElmodoError, Result};

/// Extract an xz-compressed tarball into `dest`.
///
/// Returns the top-level directory the archive unpacked into (source
/// tarballs wrap everything in `{tool}-{version}/`).
pub fn extract_tar_xz(archive: &Path, dest: &Path) -> Result<PathBuf> {
    let file = File::open(archive)
        .with_context(|| format!("Failed to open {}", archive.display()))?;
    let decoder = xz2::read::XzDecoder::new(BufReader::new(file));
    let mut tar = tar::Archive::new(decoder);

    let mut top_level: Option<PathBuf> = None;
    for entry in tar.entries().map_err(|e| extraction_error(archive, e))? {
        let mut entry = entry.map_err(|e| extraction_error(archive, e))?;
        let path = entry
            .path()
            .map_err(|e| extraction_error(archive, e))?
            .into_owned();

        if top_level.is_none() {
            if let Some(first) = path.components().next() {
                top_level = Some(dest.join(first.as_os_str()));
            }
        }

        let unpacked = entry
            .unpack_in(dest)
            .map_err(|e| extraction_error(archive, e))?;
        if !unpacked {
            return Err(ElmodoError::Extraction {
                archive: archive.to_path_buf(),
                message: format!("entry {} escapes the destination", path.display()),
            });
        }
    }

    top_level.ok_or_else(|| ElmodoError::Extraction {
        archive: archive.to_path_buf(),
        message: "archive contains no entries".into(),
    })
}

/// Extract a zip archive into `dest`, preserving unix mode bits.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)
        .with_context(|| format!("Failed to open {}", archive.display()))?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| ElmodoError::Extraction {
        archive: archive.to_path_buf(),
        message: format!("not a zip file: {e}"),
    })?;

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(|e| ElmodoError::Extraction {
            archive: archive.to_path_buf(),
            message: e.to_string(),
        })?;

        let Some(relative) = entry.enclosed_name() else {
            return Err(ElmodoError::Extraction {
                archive: archive.to_path_buf(),
                message: format!("entry {} escapes the destination", entry.name()),
            });
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out_file = File::create(&out_path)
            .with_context(|| format!("Failed to create {}", out_path.display()))?;
        std::io::copy(&mut entry, &mut out_file)?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&out_path, std::fs::Permissions::from_mode(mode))?;
        }
    }
    Ok(())
}

fn extraction_error(archive: &Path, err: impl std::fmt::Display) -> ElmodoError {
    ElmodoError::Extraction {
        archive: archive.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn tar_xz_with(entries: &[(&str, &[u8])]) -> (tempfile::TempDir, PathBuf) {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("src.tar.xz");
        let encoder = xz2::write::XzEncoder::new(File::create(&path).unwrap(), 6);
        let mut builder = tar::Builder::new(encoder);
        for (name, content) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            // `append_data` refuses to encode `..` paths, but fixtures must
            // contain hostile entry names; write the name bytes directly.
            header.as_gnu_mut().unwrap().name[..name.len()]
                .copy_from_slice(name.as_bytes());
            header.set_cksum();
            builder.append(&header, *content).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
        (temp, path)
    }

    #[test]
    fn tarball_unpacks_and_reports_top_level() {
        let (temp, archive) = tar_xz_with(&[
            ("git-2.10.1/README", b"readme"),
            ("git-2.10.1/configure", b"#!/bin/sh\n"),
        ]);
        let dest = temp.path().join("build");
        std::fs::create_dir_all(&dest).unwrap();
        let top = extract_tar_xz(&archive, &dest).unwrap();
        assert_eq!(top, dest.join("git-2.10.1"));
        assert!(top.join("README").is_file());
    }

    #[test]
    fn escaping_tar_entries_are_rejected() {
        let (temp, archive) = tar_xz_with(&[("../evil.sh", b"#!/bin/sh\n")]);
        let dest = temp.path().join("build");
        std::fs::create_dir_all(&dest).unwrap();
        let err = extract_tar_xz(&archive, &dest).unwrap_err();
        assert!(err.to_string().contains("escapes the destination"));
        assert!(!temp.path().join("evil.sh").exists());
    }

    #[test]
    fn zip_unpacks_with_mode_bits() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("ninja.zip");
        let mut writer = zip::ZipWriter::new(File::create(&archive).unwrap());
        let options =
            zip::write::SimpleFileOptions::default().unix_permissions(0o755);
        writer.start_file("ninja", options).unwrap();
        writer.write_all(b"#!/bin/sh\necho 1.12.1\n").unwrap();
        writer.finish().unwrap();

        let dest = temp.path().join("out");
        std::fs::create_dir_all(&dest).unwrap();
        extract_zip(&archive, &dest).unwrap();

        let binary = dest.join("ninja");
        assert!(binary.is_file());
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&binary).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
        }
    }

    #[test]
    fn empty_tarball_is_an_error() {
        let (temp, archive) = tar_xz_with(&[]);
        let dest = temp.path().join("build");
        std::fs::create_dir_all(&dest).unwrap();
        assert!(extract_tar_xz(&archive, &dest).is_err());
    }
}
