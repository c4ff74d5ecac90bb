//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::path::Path;
use std::process::Output;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents as bytes.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write bytes to file, replacing its contents.
    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and all its contents.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove file or directory (auto-detect).
    fn remove_any(&self, path: &Path) -> io::Result<()>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;

    /// Rename a file or directory within one filesystem.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Move a file, replacing the destination.
    ///
    /// Tries atomic rename first. If that fails with EXDEV (cross-device link),
    /// falls back to copy + delete.
    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` inside `dir`, with extra environment variables.
    fn run(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
        envs: &[(&str, &str)],
    ) -> io::Result<Output>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }

    fn remove_any(&self, path: &Path) -> io::Result<()> {
        if path.is_dir() {
            self.remove_dir_all(path)
        } else {
            self.remove_file(path)
        }
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        match std::fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) => {
                // EXDEV = 18 on Unix (cross-device link not permitted)
                #[cfg(unix)]
                const EXDEV: i32 = 18;
                #[cfg(windows)]
                const EXDEV: i32 = 17; // ERROR_NOT_SAME_DEVICE

                if e.raw_os_error() == Some(EXDEV) {
                    let options = fs_extra::file::CopyOptions::new().overwrite(true);
                    fs_extra::file::move_file(from, to, &options)
                        .map(|_| ())
                        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
                } else {
                    Err(e)
                }
            }
        }
    }
}

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
        envs: &[(&str, &str)],
    ) -> io::Result<Output> {
        std::process::Command::new(program)
            .args(args)
            .current_dir(dir)
            .envs(envs.iter().copied())
            .output()
    }
}
