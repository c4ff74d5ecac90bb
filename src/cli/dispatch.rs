//! Command dispatch
//!
//! Matches the requested name against the registry, hands the remaining
//! arguments to the matched command and runs it under a manifest guard.

use std::sync::Arc;

use clap::error::ErrorKind;
use tracing::{debug, instrument};

use crate::application::{ApplicationResult, ManifestGuard};
use crate::cli::commands::Command;
use crate::cli::{CliError, CliResult};
use crate::domain::MANIFEST_FILE;
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::InfraError;

/// Ordered command registry plus the filesystem used by the manifest guard.
pub struct Dispatcher {
    commands: Vec<Box<dyn Command>>,
    fs: Arc<dyn FileSystem>,
}

impl Dispatcher {
    pub fn new(commands: Vec<Box<dyn Command>>, fs: Arc<dyn FileSystem>) -> Self {
        Self { commands, fs }
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// First command whose name equals `name`, ignoring case.
    /// An empty name matches nothing.
    pub fn find(&mut self, name: &str) -> Option<&mut (dyn Command + 'static)> {
        if name.is_empty() {
            return None;
        }
        self.commands
            .iter_mut()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .map(|c| c.as_mut())
    }

    /// Parse `args` into the command called `name` and execute it.
    ///
    /// `--help` for a command prints its usage and succeeds.
    #[instrument(level = "debug", skip(self))]
    pub fn dispatch(&mut self, name: &str, args: &[String]) -> CliResult<()> {
        let fs = self.fs.clone();
        let supported = self.names();

        let Some(cmd) = self.find(name) else {
            return Err(CliError::UnknownCommand {
                name: name.to_string(),
                supported,
            });
        };
        debug!("matched command: {}", cmd.name());

        if let Err(source) = cmd.parse(args) {
            if matches!(
                source.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) {
                let _ = source.print();
                return Ok(());
            }
            return Err(CliError::InvalidArgs {
                command: cmd.name(),
                source,
            });
        }

        execute(cmd, fs).map_err(InfraError::from)?;
        Ok(())
    }
}

/// Run `cmd` while guarding `<repo dir>/go.mod`.
///
/// The manifest is restored if the command changed it, whether the command
/// succeeded, failed or panicked. A manifest that did not exist beforehand
/// is never touched.
pub fn execute(cmd: &dyn Command, fs: Arc<dyn FileSystem>) -> ApplicationResult<()> {
    let _guard = ManifestGuard::acquire(fs, cmd.repo_dir().join(MANIFEST_FILE));
    cmd.exec()
}
