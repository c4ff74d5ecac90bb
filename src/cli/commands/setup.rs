use std::sync::Arc;

use clap::Parser;

use super::{display_path, parse_args, Command};
use crate::application::ApplicationResult;
use crate::cli::output;
use crate::domain::Workspace;
use crate::infrastructure::ServiceContainer;

/// Clone the repository, vendor its dependencies and flatten them into the source root
#[derive(Parser, Debug, Default)]
#[command(name = "setup")]
pub struct SetupArgs {
    /// Remove an existing checkout and clone again
    #[arg(long)]
    pub overwrite: bool,
}

pub struct Setup {
    services: Arc<ServiceContainer>,
    args: SetupArgs,
}

impl Setup {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self {
            services,
            args: SetupArgs::default(),
        }
    }
}

impl Command for Setup {
    fn name(&self) -> &'static str {
        "setup"
    }

    fn parse(&mut self, args: &[String]) -> Result<(), clap::Error> {
        self.args = parse_args(self.name(), args)?;
        Ok(())
    }

    fn exec(&self) -> ApplicationResult<()> {
        let report = self.services.vendor().setup(self.args.overwrite)?;
        let repo_dir = display_path(self.workspace(), &self.repo_dir());
        if report.cloned {
            output::action("Cloned", &format!("{} into {}", self.workspace().repo, repo_dir));
        }
        output::success(&format!(
            "{} set up, {} vendored files flattened",
            repo_dir, report.flattened
        ));
        Ok(())
    }

    fn workspace(&self) -> &Workspace {
        &self.services.workspace
    }
}
