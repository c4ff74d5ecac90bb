//! External tools: `go` and `git`

use std::path::Path;
use std::process::Output;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::infrastructure::traits::CommandRunner;
use crate::infrastructure::InfraError;

/// Module mode must be on for `go mod` to work inside a GOPATH tree.
const GO_ENV: &[(&str, &str)] = &[("GO111MODULE", "on")];

/// Runs toolchain commands and turns non-zero exits into errors.
pub struct Toolchain {
    cmd: Arc<dyn CommandRunner>,
}

impl Toolchain {
    pub fn new(cmd: Arc<dyn CommandRunner>) -> Self {
        Self { cmd }
    }

    /// Run `go <args>` inside `dir` with module mode enabled.
    pub fn go(&self, dir: &Path, args: &[&str]) -> ApplicationResult<Output> {
        self.run(dir, "go", args, GO_ENV)
    }

    /// Run `git <args>` inside `dir`.
    pub fn git(&self, dir: &Path, args: &[&str]) -> ApplicationResult<Output> {
        self.run(dir, "git", args, &[])
    }

    #[instrument(level = "debug", skip(self, envs))]
    fn run(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
        envs: &[(&str, &str)],
    ) -> ApplicationResult<Output> {
        let invocation = format!("{} {}", program, args.join(" "));
        let output = self
            .cmd
            .run(dir, program, args, envs)
            .map_err(|e| ApplicationError::failed(format!("run {}", invocation), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let context = format!("{} in {}: {}", invocation, dir.display(), stderr.trim());
            let err = InfraError::tool(program, &output);
            return Err(ApplicationError::failed(context, err));
        }

        debug!("{}: ok", invocation);
        Ok(output)
    }
}
