//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors represent workspace rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("repository not set up: {0} (run `gospace setup` first)")]
    RepoNotSetUp(PathBuf),

    #[error("manifest not found: {0}")]
    ManifestMissing(PathBuf),

    #[error("vendor directory not found: {0}")]
    VendorMissing(PathBuf),

    #[error("vendor directory already exists: {0} (use --overwrite)")]
    VendorExists(PathBuf),

    #[error("archive would be written inside the vendor directory: {0}")]
    ArchiveInsideVendor(PathBuf),

    #[error("module is not tidy, `go mod tidy` changed: {}", files.join(", "))]
    NotTidy { files: Vec<String> },
}
