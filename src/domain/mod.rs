//! Domain layer: workspace layout and business rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod workspace;

pub use error::DomainError;
pub use workspace::{
    Workspace, MANIFEST_FILE, SUM_FILE, VENDOR_DIR, VENDOR_MODULES_FILE,
};
