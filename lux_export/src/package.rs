//! Archive serialization: folder trees on disk and downloadable zips.
//!
//! Packaging is one-shot. Either every file lands or the whole operation
//! fails with a single error; no partial archive is offered.

use std::fs::{self, File};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;
use zip::{CompressionMethod, ZipWriter, write::FileOptions};

use crate::compile::Archive;
use crate::sanitize::sanitize_title;

/// Errors surfaced while serializing an archive.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("io failure while packaging: {0}")]
    Io(#[from] io::Error),
    #[error("zip failure while packaging: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("walk failure while packaging: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Write every archive entry under `dest_dir`, creating parent folders.
///
/// # Errors
/// - `PackageError::Io` on any filesystem failure.
pub fn write_archive(archive: &Archive, dest_dir: &Path) -> Result<(), PackageError> {
    for (rel_path, contents) in archive.iter() {
        let target = dest_dir.join(rel_path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, contents)?;
    }
    Ok(())
}

/// Package an archive as `<sanitized quest title>.zip` inside `dest_dir`.
///
/// Stages the folder tree in a temporary directory, then walks it into the
/// zip so the entry layout matches exactly what `write_archive` produces.
///
/// # Errors
/// - `PackageError` on any staging, walking, or zip-writing failure.
pub fn zip_archive(
    archive: &Archive,
    quest_title: &str,
    dest_dir: &Path,
) -> Result<PathBuf, PackageError> {
    let staging = tempfile::tempdir()?;
    write_archive(archive, staging.path())?;

    fs::create_dir_all(dest_dir)?;
    let dest = dest_dir.join(format!("{}.zip", sanitize_title(quest_title)));
    zip_dir(staging.path(), &dest)?;
    Ok(dest)
}

fn zip_dir(src: &Path, dest: &Path) -> Result<(), PackageError> {
    let file = File::create(dest)?;
    let mut zip = ZipWriter::new(file);
    let dir_options = FileOptions::default().compression_method(CompressionMethod::Stored);
    let file_options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for entry in WalkDir::new(src) {
        let entry = entry?;
        let path = entry.path();
        let rel = match path.strip_prefix(src) {
            Ok(rel) if rel.as_os_str().is_empty() => continue,
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let mut name = rel.to_string_lossy().replace('\\', "/");
        if entry.file_type().is_dir() {
            if !name.ends_with('/') {
                name.push('/');
            }
            zip.add_directory(name, dir_options)?;
            continue;
        }

        zip.start_file(name, file_options)?;
        let contents = fs::read(path)?;
        zip.write_all(&contents)?;
    }

    zip.finish()?;
    Ok(())
}
