use std::sync::Arc;

use clap::Parser;

use super::{parse_args, Command};
use crate::application::ApplicationResult;
use crate::cli::output;
use crate::domain::Workspace;
use crate::infrastructure::ServiceContainer;

/// Fail if `go mod tidy` would change go.mod or go.sum
#[derive(Parser, Debug)]
#[command(name = "istidy")]
pub struct IsTidyArgs {}

pub struct IsTidy {
    services: Arc<ServiceContainer>,
}

impl IsTidy {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self { services }
    }
}

impl Command for IsTidy {
    fn name(&self) -> &'static str {
        "istidy"
    }

    fn parse(&mut self, args: &[String]) -> Result<(), clap::Error> {
        parse_args::<IsTidyArgs>(self.name(), args)?;
        Ok(())
    }

    fn exec(&self) -> ApplicationResult<()> {
        self.services.vendor().check_tidy()?;
        output::success(&format!("{} is tidy", self.workspace().package));
        Ok(())
    }

    fn workspace(&self) -> &Workspace {
        &self.services.workspace
    }
}
