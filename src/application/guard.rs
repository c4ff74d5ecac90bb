//! Manifest guard: undo unintended rewrites of a file
//!
//! Toolchain invocations (`go mod vendor`, `go mod tidy`, ...) may rewrite
//! `go.mod` as a side effect. A [`ManifestGuard`] snapshots the file when
//! created and, when dropped, puts the original bytes back if the file
//! changed. Restoration is best effort: failures are logged and ignored.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::infrastructure::traits::FileSystem;

/// Scoped snapshot of a file's bytes.
///
/// If the file could not be read at creation, the guard does nothing on
/// drop, even if the file exists by then.
pub struct ManifestGuard {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    snapshot: Option<Vec<u8>>,
}

impl ManifestGuard {
    /// Snapshot `path`. A read failure disarms the guard.
    pub fn acquire(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let snapshot = match fs.read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                debug!("not guarding {}: {}", path.display(), e);
                None
            }
        };
        Self { fs, path, snapshot }
    }

    /// Whether a snapshot was taken.
    pub fn is_armed(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Whether the file currently differs from the snapshot.
    ///
    /// Returns `false` for a disarmed guard or an unreadable file.
    pub fn is_changed(&self) -> bool {
        match (&self.snapshot, self.fs.read(&self.path)) {
            (Some(original), Ok(current)) => *original != current,
            _ => false,
        }
    }

    /// Restore the snapshot now if the file changed. Returns whether the
    /// file was rewritten. The guard is disarmed afterwards.
    pub fn restore(&mut self) -> bool {
        let Some(original) = self.snapshot.take() else {
            return false;
        };
        let current = match self.fs.read(&self.path) {
            Ok(current) => current,
            Err(e) => {
                debug!("cannot re-read {}: {}", self.path.display(), e);
                return false;
            }
        };
        if current == original {
            return false;
        }
        match self.fs.write(&self.path, &original) {
            Ok(()) => {
                debug!("restored {}", self.path.display());
                true
            }
            Err(e) => {
                debug!("cannot restore {}: {}", self.path.display(), e);
                false
            }
        }
    }
}

impl Drop for ManifestGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::RealFileSystem;
    use tempfile::TempDir;

    fn fs() -> Arc<dyn FileSystem> {
        Arc::new(RealFileSystem)
    }

    #[test]
    fn given_changed_file_when_dropped_then_original_bytes_are_restored() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("go.mod");
        std::fs::write(&path, "module example.com/app\n").unwrap();

        {
            let guard = ManifestGuard::acquire(fs(), &path);
            assert!(guard.is_armed());
            std::fs::write(&path, "module example.com/app\n\nrequire x v1\n").unwrap();
            assert!(guard.is_changed());
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "module example.com/app\n");
    }

    #[test]
    fn given_unchanged_file_when_restoring_then_no_rewrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("go.mod");
        std::fs::write(&path, "module example.com/app\n").unwrap();
        let before = std::fs::metadata(&path).unwrap().modified().unwrap();

        let mut guard = ManifestGuard::acquire(fs(), &path);
        assert!(!guard.restore());
        drop(guard);

        let after = std::fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn given_absent_file_when_created_during_scope_then_left_alone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("go.mod");

        {
            let guard = ManifestGuard::acquire(fs(), &path);
            assert!(!guard.is_armed());
            std::fs::write(&path, "module created\n").unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "module created\n");
    }

    #[test]
    fn given_file_deleted_during_scope_when_dropped_then_nothing_happens() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("go.mod");
        std::fs::write(&path, "module example.com/app\n").unwrap();

        {
            let _guard = ManifestGuard::acquire(fs(), &path);
            std::fs::remove_file(&path).unwrap();
        }

        assert!(!path.exists());
    }

    #[test]
    fn given_restore_called_twice_then_second_call_is_noop() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("go.mod");
        std::fs::write(&path, "a").unwrap();

        let mut guard = ManifestGuard::acquire(fs(), &path);
        std::fs::write(&path, "b").unwrap();
        assert!(guard.restore());
        std::fs::write(&path, "c").unwrap();
        assert!(!guard.restore());
        drop(guard);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "c");
    }
}
