//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::config::ConfigError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("invalid args {}", clap_message(.source))]
    InvalidArgs {
        command: &'static str,
        #[source]
        source: clap::Error,
    },

    #[error("unknown command: {name}\nsupported:\n{}", supported_list(.supported))]
    UnknownCommand {
        name: String,
        supported: Vec<&'static str>,
    },

    #[error("{0}")]
    Infra(#[from] InfraError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Configuration, argument, dispatch and command failures all exit 1.
    pub fn exit_code(&self) -> i32 {
        crate::exitcode::FAILURE
    }
}

/// clap renders its own `error:` prefix; drop it since ours is printed anyway.
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .trim_start_matches("error: ")
        .trim_end()
        .to_string()
}

fn supported_list(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("\t{}", name))
        .collect::<Vec<_>>()
        .join("\n")
}
