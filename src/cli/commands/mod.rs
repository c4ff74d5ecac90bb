//! Command registry
//!
//! Every subcommand implements [`Command`]: it owns its argument parser and
//! its execution entry point. [`registry`] lists them in dispatch order.

mod flatten_vendor;
mod hash;
mod istidy;
mod setup;
mod unzip_vendor;
mod update;
mod zip_vendor;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;

use crate::application::ApplicationResult;
use crate::domain::Workspace;
use crate::infrastructure::ServiceContainer;

pub use flatten_vendor::FlattenVendor;
pub use hash::Hash;
pub use istidy::IsTidy;
pub use setup::Setup;
pub use unzip_vendor::UnzipVendor;
pub use update::Update;
pub use zip_vendor::ZipVendor;

/// A dispatchable subcommand.
pub trait Command {
    /// Name matched (case-insensitively) against the first CLI argument.
    fn name(&self) -> &'static str;

    /// Parse the arguments following the command name.
    fn parse(&mut self, args: &[String]) -> Result<(), clap::Error>;

    /// Run the command with the parsed arguments.
    fn exec(&self) -> ApplicationResult<()>;

    fn workspace(&self) -> &Workspace;

    /// Directory holding the package source; its `go.mod` is guarded
    /// while the command runs.
    fn repo_dir(&self) -> PathBuf {
        self.workspace().repo_dir()
    }

    /// Join path segments onto the absolute workspace root.
    fn path(&self, parts: &[&str]) -> PathBuf {
        self.workspace().path(parts)
    }
}

/// All commands, in the order they are matched and listed.
pub fn registry(services: &Arc<ServiceContainer>) -> Vec<Box<dyn Command>> {
    vec![
        Box::new(Setup::new(services.clone())),
        Box::new(Update::new(services.clone())),
        Box::new(IsTidy::new(services.clone())),
        Box::new(Hash::new(services.clone())),
        Box::new(ZipVendor::new(services.clone())),
        Box::new(UnzipVendor::new(services.clone())),
        Box::new(FlattenVendor::new(services.clone())),
    ]
}

/// Parse `args` as if invoked as `<name> <args...>`.
fn parse_args<A: Parser>(name: &str, args: &[String]) -> Result<A, clap::Error> {
    A::try_parse_from(std::iter::once(name).chain(args.iter().map(String::as_str)))
}

/// Show `path` relative to the workspace root when it lies inside it.
fn display_path(workspace: &Workspace, path: &Path) -> String {
    pathdiff::diff_paths(path, &workspace.root_abs)
        .filter(|rel| !rel.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::{RealCommandRunner, RealFileSystem};

    fn services() -> Arc<ServiceContainer> {
        Arc::new(ServiceContainer::with_deps(
            Workspace::new("/ws", "/ws", "example.com/app", "repo"),
            Arc::new(RealFileSystem),
            Arc::new(RealCommandRunner),
        ))
    }

    #[test]
    fn given_registry_when_listing_names_then_in_registration_order() {
        let names: Vec<_> = registry(&services()).iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            [
                "setup",
                "update",
                "istidy",
                "hash",
                "zip-vendor",
                "unzip-vendor",
                "flatten-vendor"
            ]
        );
    }

    #[test]
    fn given_registered_command_when_resolving_paths_then_uses_workspace() {
        let commands = registry(&services());
        let hash = &commands[3];
        assert_eq!(hash.repo_dir(), PathBuf::from("/ws/src/example.com/app"));
        assert_eq!(hash.path(&["pkg", "mod"]), PathBuf::from("/ws/pkg/mod"));
    }

    #[test]
    fn given_path_inside_root_when_displaying_then_relative() {
        let ws = Workspace::new("/ws", "/ws", "example.com/app", "repo");
        assert_eq!(
            display_path(&ws, Path::new("/ws/src/example.com/app/vendor")),
            "src/example.com/app/vendor"
        );
        assert_eq!(display_path(&ws, Path::new("/tmp/v.tar")), "/tmp/v.tar");
    }
}
