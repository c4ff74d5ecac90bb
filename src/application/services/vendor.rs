//! Vendor tree service
//!
//! Everything the subcommands do to a workspace: clone, vendor, flatten,
//! archive, hash and tidiness checks. All paths come from the shared
//! [`Workspace`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::application::guard::ManifestGuard;
use crate::application::hash::module_hash;
use crate::application::services::Toolchain;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{DomainError, Workspace, MANIFEST_FILE, SUM_FILE, VENDOR_MODULES_FILE};
use crate::infrastructure::archive;
use crate::infrastructure::traits::{CommandRunner, FileSystem};

/// What `setup` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    /// Whether the repository was cloned (false if it was already there)
    pub cloned: bool,
    /// Files moved out of the vendor tree
    pub flattened: usize,
}

/// Vendor tree operations for one workspace.
pub struct VendorService {
    fs: Arc<dyn FileSystem>,
    toolchain: Toolchain,
    workspace: Arc<Workspace>,
}

impl VendorService {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        workspace: Arc<Workspace>,
    ) -> Self {
        Self {
            fs,
            toolchain: Toolchain::new(cmd),
            workspace,
        }
    }

    /// Clone the repository if needed, vendor its dependencies and flatten
    /// them into the source root.
    ///
    /// With `overwrite`, an existing repository directory is removed first.
    #[instrument(level = "debug", skip(self))]
    pub fn setup(&self, overwrite: bool) -> ApplicationResult<SetupReport> {
        let src_dir = self.workspace.src_dir();
        let repo_dir = self.workspace.repo_dir();

        self.fs
            .create_dir_all(&src_dir)
            .with_path_context("create source root", &src_dir)?;

        if overwrite && self.fs.exists(&repo_dir) {
            info!("removing existing {}", repo_dir.display());
            self.fs
                .remove_dir_all(&repo_dir)
                .with_path_context("remove repository", &repo_dir)?;
        }

        let cloned = if self.fs.exists(&repo_dir) {
            debug!("repository already present: {}", repo_dir.display());
            false
        } else {
            self.fs
                .ensure_parent(&repo_dir)
                .with_path_context("create parent of", &repo_dir)?;
            let target = repo_dir.to_string_lossy();
            self.toolchain.git(
                &src_dir,
                &["clone", self.workspace.repo.as_str(), target.as_ref()],
            )?;
            true
        };

        let flattened = self.vendor_and_flatten()?;
        Ok(SetupReport { cloned, flattened })
    }

    /// Re-vendor an existing checkout and flatten the result.
    #[instrument(level = "debug", skip(self))]
    pub fn update(&self) -> ApplicationResult<usize> {
        let repo_dir = self.workspace.repo_dir();
        if !self.fs.is_dir(&repo_dir) {
            return Err(DomainError::RepoNotSetUp(repo_dir).into());
        }
        self.vendor_and_flatten()
    }

    fn vendor_and_flatten(&self) -> ApplicationResult<usize> {
        let repo_dir = self.workspace.repo_dir();
        self.toolchain.go(&repo_dir, &["mod", "vendor"])?;
        self.flatten()
    }

    /// Run `go mod tidy` and fail if it changes `go.mod` or `go.sum`.
    ///
    /// Both files are put back to their original content before returning.
    #[instrument(level = "debug", skip(self))]
    pub fn check_tidy(&self) -> ApplicationResult<()> {
        let manifest = self.workspace.manifest_path();
        if !self.fs.is_file(&manifest) {
            return Err(DomainError::ManifestMissing(manifest).into());
        }
        let sum_path = self.workspace.sum_path();

        let manifest_guard = ManifestGuard::acquire(self.fs.clone(), manifest);
        let sum_guard = ManifestGuard::acquire(self.fs.clone(), sum_path.clone());

        self.toolchain
            .go(&self.workspace.repo_dir(), &["mod", "tidy"])?;

        let mut changed = Vec::new();
        if manifest_guard.is_changed() {
            changed.push(MANIFEST_FILE.to_string());
        }
        let sum_created = !sum_guard.is_armed() && self.fs.exists(&sum_path);
        if sum_guard.is_changed() || sum_created {
            changed.push(SUM_FILE.to_string());
        }
        if sum_created {
            self.fs
                .remove_file(&sum_path)
                .with_path_context("remove created checksums", &sum_path)?;
        }

        if changed.is_empty() {
            Ok(())
        } else {
            Err(DomainError::NotTidy { files: changed }.into())
        }
    }

    /// Hash of `go.mod` and `go.sum`; a missing `go.sum` counts as empty.
    pub fn hash(&self) -> ApplicationResult<String> {
        let manifest = self.workspace.manifest_path();
        if !self.fs.is_file(&manifest) {
            return Err(DomainError::ManifestMissing(manifest).into());
        }
        let manifest_bytes = self
            .fs
            .read(&manifest)
            .with_path_context("read manifest", &manifest)?;

        let sum_path = self.workspace.sum_path();
        let sum_bytes = if self.fs.is_file(&sum_path) {
            self.fs
                .read(&sum_path)
                .with_path_context("read checksums", &sum_path)?
        } else {
            Vec::new()
        };

        Ok(module_hash(&manifest_bytes, &sum_bytes))
    }

    /// Pack the vendor directory into a tar archive at `dest`.
    ///
    /// `dest` must lie outside the vendor directory.
    #[instrument(level = "debug", skip(self))]
    pub fn pack(&self, dest: &Path) -> ApplicationResult<usize> {
        let vendor = self.existing_vendor_dir()?;
        let dest = std::path::absolute(dest).with_path_context("resolve archive path", dest)?;
        if dest.starts_with(&vendor) {
            return Err(DomainError::ArchiveInsideVendor(dest).into());
        }
        self.fs
            .ensure_parent(&dest)
            .with_path_context("create parent of", &dest)?;
        archive::pack_dir(&vendor, &dest).map_err(|e| {
            ApplicationError::failed(
                format!("pack {} into {}", vendor.display(), dest.display()),
                e,
            )
        })
    }

    /// Unpack a vendor archive into the vendor directory.
    ///
    /// An existing vendor directory is an error unless `overwrite` is set,
    /// in which case it is replaced. The archive is unpacked into a staging
    /// directory first; the vendor directory is only touched once that
    /// succeeded.
    #[instrument(level = "debug", skip(self))]
    pub fn unpack(&self, src: &Path, overwrite: bool) -> ApplicationResult<PathBuf> {
        let vendor = self.workspace.vendor_dir();
        let exists = self.fs.exists(&vendor);
        if exists && !overwrite {
            return Err(DomainError::VendorExists(vendor).into());
        }

        let repo_dir = self.workspace.repo_dir();
        self.fs
            .create_dir_all(&repo_dir)
            .with_path_context("create repository directory", &repo_dir)?;
        let staging = tempfile::Builder::new()
            .prefix(".vendor-")
            .tempdir_in(&repo_dir)
            .with_path_context("create staging directory in", &repo_dir)?;

        archive::unpack(src, staging.path()).map_err(|e| {
            ApplicationError::failed(
                format!("unpack {} into {}", src.display(), vendor.display()),
                e,
            )
        })?;

        if exists {
            self.fs
                .remove_any(&vendor)
                .with_path_context("remove vendor directory", &vendor)?;
        }
        self.fs
            .rename(staging.path(), &vendor)
            .with_path_context("move staged vendor directory to", &vendor)?;
        Ok(vendor)
    }

    /// Move every vendored file to the same relative path under the source
    /// root, then remove the vendor directory. Returns the number of files
    /// moved.
    ///
    /// The vendor index and anything that would land inside the repository
    /// itself are skipped.
    #[instrument(level = "debug", skip(self))]
    pub fn flatten(&self) -> ApplicationResult<usize> {
        let vendor = self.existing_vendor_dir()?;
        let src_dir = self.workspace.src_dir();
        let repo_dir = self.workspace.repo_dir();

        // collect everything first; a partial walk must not reach the removal below
        let mut files = Vec::new();
        for entry in WalkDir::new(&vendor).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                ApplicationError::failed(format!("walk {}", vendor.display()), e)
            })?;
            if !entry.file_type().is_dir() {
                files.push(entry.into_path());
            }
        }

        let mut moved = 0;
        for file in files {
            let Ok(rel) = file.strip_prefix(&vendor) else {
                continue;
            };
            if rel == Path::new(VENDOR_MODULES_FILE) {
                continue;
            }
            let dest = src_dir.join(rel);
            if dest.starts_with(&repo_dir) {
                debug!("skipping {}: inside repository", rel.display());
                continue;
            }
            self.fs
                .ensure_parent(&dest)
                .with_path_context("create parent of", &dest)?;
            self.fs
                .move_file(&file, &dest)
                .with_path_context("move vendored file", &file)?;
            moved += 1;
        }

        self.fs
            .remove_dir_all(&vendor)
            .with_path_context("remove vendor directory", &vendor)?;
        debug!("flattened {} files into {}", moved, src_dir.display());
        Ok(moved)
    }

    fn existing_vendor_dir(&self) -> ApplicationResult<PathBuf> {
        let vendor = self.workspace.vendor_dir();
        if self.fs.is_dir(&vendor) {
            Ok(vendor)
        } else {
            Err(DomainError::VendorMissing(vendor).into())
        }
    }
}
