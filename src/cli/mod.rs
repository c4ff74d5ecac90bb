//! CLI layer: argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod dispatch;
pub mod error;
pub mod output;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

pub use args::Cli;
pub use dispatch::Dispatcher;
pub use error::{CliError, CliResult};

use crate::config;
use crate::infrastructure::ServiceContainer;

/// Resolve the workspace and dispatch the requested command.
///
/// Configuration is checked before the registry is built, so a missing
/// setting never reaches command lookup.
pub fn run(cli: &Cli, env: &HashMap<String, String>) -> CliResult<()> {
    let workspace = config::resolve(&cli.flags(), env)?;
    debug!("workspace: {:?}", workspace);

    let services = Arc::new(ServiceContainer::new(workspace));
    let mut dispatcher = Dispatcher::new(commands::registry(&services), services.fs.clone());

    let (name, args) = cli.command_line();
    dispatcher.dispatch(name, args)
}
