//! Service container for dependency injection
//!
//! Wires the resolved workspace together with the I/O boundary that every
//! command shares.

use std::sync::Arc;

use crate::application::services::VendorService;
use crate::domain::Workspace;
use crate::infrastructure::traits::{CommandRunner, FileSystem, RealCommandRunner, RealFileSystem};

/// Container holding the workspace and I/O implementations.
pub struct ServiceContainer {
    /// Resolved workspace settings
    pub workspace: Arc<Workspace>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(workspace: Workspace) -> Self {
        Self::with_deps(
            workspace,
            Arc::new(RealFileSystem),
            Arc::new(RealCommandRunner),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        workspace: Workspace,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            workspace: Arc::new(workspace),
            fs,
            cmd,
        }
    }

    /// Vendor tree operations bound to this container's workspace.
    pub fn vendor(&self) -> VendorService {
        VendorService::new(self.fs.clone(), self.cmd.clone(), self.workspace.clone())
    }
}
