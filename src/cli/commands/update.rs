use std::sync::Arc;

use clap::Parser;

use super::{parse_args, Command};
use crate::application::ApplicationResult;
use crate::cli::output;
use crate::domain::Workspace;
use crate::infrastructure::ServiceContainer;

/// Re-vendor dependencies of an existing checkout and flatten them
#[derive(Parser, Debug)]
#[command(name = "update")]
pub struct UpdateArgs {}

pub struct Update {
    services: Arc<ServiceContainer>,
}

impl Update {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self { services }
    }
}

impl Command for Update {
    fn name(&self) -> &'static str {
        "update"
    }

    fn parse(&mut self, args: &[String]) -> Result<(), clap::Error> {
        parse_args::<UpdateArgs>(self.name(), args)?;
        Ok(())
    }

    fn exec(&self) -> ApplicationResult<()> {
        let flattened = self.services.vendor().update()?;
        output::success(&format!("updated, {} vendored files flattened", flattened));
        Ok(())
    }

    fn workspace(&self) -> &Workspace {
        &self.services.workspace
    }
}
