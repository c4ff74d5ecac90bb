//! Vendor tree archives (tar)

use std::fs::File;
use std::path::Path;

use tar::{Archive, Builder};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::infrastructure::{InfraError, InfraResult};

/// Pack every entry under `src_dir` into a tar archive at `dest`.
///
/// Entry names are relative to `src_dir` and written in sorted order, so the
/// same tree always produces the same listing. Returns the number of files.
/// A partially written `dest` is removed on failure.
#[instrument(level = "debug")]
pub fn pack_dir(src_dir: &Path, dest: &Path) -> InfraResult<usize> {
    let result = write_archive(src_dir, dest);
    if result.is_err() && dest.exists() {
        if let Err(e) = std::fs::remove_file(dest) {
            debug!("cannot remove partial archive {}: {}", dest.display(), e);
        }
    }
    result
}

fn write_archive(src_dir: &Path, dest: &Path) -> InfraResult<usize> {
    let file = File::create(dest)
        .map_err(|e| InfraError::io(format!("create archive {}", dest.display()), e))?;
    let mut builder = Builder::new(file);
    builder.follow_symlinks(false);

    let mut files = 0;
    for entry in WalkDir::new(src_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            InfraError::io(format!("walk {}", src_dir.display()), e.into())
        })?;
        let rel = entry
            .path()
            .strip_prefix(src_dir)
            .map_err(|e| {
                InfraError::io(
                    format!("relative path of {}", entry.path().display()),
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()),
                )
            })?;

        if entry.file_type().is_dir() {
            builder
                .append_dir(rel, entry.path())
                .map_err(|e| InfraError::archive(dest, format!("append {}", rel.display()), e))?;
        } else {
            builder
                .append_path_with_name(entry.path(), rel)
                .map_err(|e| InfraError::archive(dest, format!("append {}", rel.display()), e))?;
            files += 1;
        }
    }

    builder
        .into_inner()
        .map_err(|e| InfraError::archive(dest, "finish", e))?;
    debug!("packed {} files into {}", files, dest.display());
    Ok(files)
}

/// Unpack a tar archive into `dest_dir`, creating it if needed.
///
/// If `dest_dir` was created here and unpacking fails, it is removed again.
#[instrument(level = "debug")]
pub fn unpack(archive: &Path, dest_dir: &Path) -> InfraResult<()> {
    let file = File::open(archive)
        .map_err(|e| InfraError::io(format!("open archive {}", archive.display()), e))?;
    let created = !dest_dir.exists();
    std::fs::create_dir_all(dest_dir)
        .map_err(|e| InfraError::io(format!("create {}", dest_dir.display()), e))?;

    let result = Archive::new(file).unpack(dest_dir).map_err(|e| {
        InfraError::archive(archive, format!("unpack into {}", dest_dir.display()), e)
    });
    if result.is_err() && created {
        if let Err(e) = std::fs::remove_dir_all(dest_dir) {
            debug!("cannot remove {}: {}", dest_dir.display(), e);
        }
    }
    result
}
