use std::sync::Arc;

use clap::Parser;

use super::{display_path, parse_args, Command};
use crate::application::ApplicationResult;
use crate::cli::output;
use crate::domain::Workspace;
use crate::infrastructure::ServiceContainer;

/// Move vendored packages into the source root and remove the vendor directory
#[derive(Parser, Debug)]
#[command(name = "flatten-vendor")]
pub struct FlattenVendorArgs {}

pub struct FlattenVendor {
    services: Arc<ServiceContainer>,
}

impl FlattenVendor {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self { services }
    }
}

impl Command for FlattenVendor {
    fn name(&self) -> &'static str {
        "flatten-vendor"
    }

    fn parse(&mut self, args: &[String]) -> Result<(), clap::Error> {
        parse_args::<FlattenVendorArgs>(self.name(), args)?;
        Ok(())
    }

    fn exec(&self) -> ApplicationResult<()> {
        let moved = self.services.vendor().flatten()?;
        let src_dir = display_path(self.workspace(), &self.workspace().src_dir());
        output::action("Flattened", &format!("{} files into {}", moved, src_dir));
        Ok(())
    }

    fn workspace(&self) -> &Workspace {
        &self.services.workspace
    }
}
