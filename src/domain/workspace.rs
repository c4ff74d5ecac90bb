//! Workspace layout: where the package, its vendor tree and manifest live

use std::path::{Path, PathBuf};

/// Module manifest guarded during command execution.
pub const MANIFEST_FILE: &str = "go.mod";

/// Module checksum file, hashed and checked alongside the manifest.
pub const SUM_FILE: &str = "go.sum";

/// Vendor directory name inside the repository directory.
pub const VENDOR_DIR: &str = "vendor";

/// Vendor index written by `go mod vendor`; not part of any package.
pub const VENDOR_MODULES_FILE: &str = "modules.txt";

/// Resolved workspace settings shared by every command.
///
/// All fields are non-empty once constructed through
/// [`crate::config::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Root directory as given
    pub root: String,
    /// Absolute form of `root`
    pub root_abs: PathBuf,
    /// Package import path, e.g. `storj.io/storj`
    pub package: String,
    /// Repository to clone the package from
    pub repo: String,
}

impl Workspace {
    pub fn new(
        root: impl Into<String>,
        root_abs: impl Into<PathBuf>,
        package: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            root_abs: root_abs.into(),
            package: package.into(),
            repo: repo.into(),
        }
    }

    /// Join path segments onto the absolute root.
    pub fn path<I, P>(&self, parts: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut path = self.root_abs.clone();
        for part in parts {
            path.push(part);
        }
        path
    }

    /// `<root>/src`, the tree vendored packages are flattened into.
    pub fn src_dir(&self) -> PathBuf {
        self.path(["src"])
    }

    /// `<root>/src/<package>`, with the import path split on `/`.
    pub fn repo_dir(&self) -> PathBuf {
        let mut dir = self.src_dir();
        for segment in self.package.split('/').filter(|s| !s.is_empty()) {
            dir.push(segment);
        }
        dir
    }

    pub fn vendor_dir(&self) -> PathBuf {
        self.repo_dir().join(VENDOR_DIR)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.repo_dir().join(MANIFEST_FILE)
    }

    pub fn sum_path(&self) -> PathBuf {
        self.repo_dir().join(SUM_FILE)
    }
}
