use std::sync::Arc;

use clap::Parser;

use super::{parse_args, Command};
use crate::application::ApplicationResult;
use crate::cli::output;
use crate::domain::Workspace;
use crate::infrastructure::ServiceContainer;

/// Print a hash of go.mod and go.sum, usable as a vendor cache key
#[derive(Parser, Debug)]
#[command(name = "hash")]
pub struct HashArgs {}

pub struct Hash {
    services: Arc<ServiceContainer>,
}

impl Hash {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self { services }
    }
}

impl Command for Hash {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn parse(&mut self, args: &[String]) -> Result<(), clap::Error> {
        parse_args::<HashArgs>(self.name(), args)?;
        Ok(())
    }

    fn exec(&self) -> ApplicationResult<()> {
        let hash = self.services.vendor().hash()?;
        output::info(&hash);
        Ok(())
    }

    fn workspace(&self) -> &Workspace {
        &self.services.workspace
    }
}
