//! Infrastructure-level errors (wraps application errors)

use std::path::PathBuf;
use std::process::Output;

use thiserror::Error;

use crate::application::ApplicationError;

/// Errors from the filesystem, external tools and archives.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// An external program ran but exited non-zero.
    #[error("{program} failed: {message}")]
    Tool {
        program: String,
        message: String,
        exit_code: Option<i32>,
    },

    #[error("archive {}: {context}", archive.display())]
    Archive {
        archive: PathBuf,
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Tool failure from a finished process; stderr becomes the message.
    pub fn tool(program: impl Into<String>, output: &Output) -> Self {
        Self::Tool {
            program: program.into(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            exit_code: output.status.code(),
        }
    }

    pub fn archive(
        archive: impl Into<PathBuf>,
        context: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Archive {
            archive: archive.into(),
            context: context.into(),
            source,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
