use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueHint};

use super::{display_path, parse_args, Command};
use crate::application::ApplicationResult;
use crate::cli::output;
use crate::domain::Workspace;
use crate::infrastructure::ServiceContainer;

/// Pack the vendor directory into an archive
#[derive(Parser, Debug, Default)]
#[command(name = "zip-vendor")]
pub struct ZipVendorArgs {
    /// Archive to write
    #[arg(value_hint = ValueHint::FilePath)]
    pub dest: PathBuf,
}

pub struct ZipVendor {
    services: Arc<ServiceContainer>,
    args: ZipVendorArgs,
}

impl ZipVendor {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self {
            services,
            args: ZipVendorArgs::default(),
        }
    }
}

impl Command for ZipVendor {
    fn name(&self) -> &'static str {
        "zip-vendor"
    }

    fn parse(&mut self, args: &[String]) -> Result<(), clap::Error> {
        self.args = parse_args(self.name(), args)?;
        Ok(())
    }

    fn exec(&self) -> ApplicationResult<()> {
        let files = self.services.vendor().pack(&self.args.dest)?;
        output::action(
            "Packed",
            &format!(
                "{} files into {}",
                files,
                display_path(self.workspace(), &self.args.dest)
            ),
        );
        Ok(())
    }

    fn workspace(&self) -> &Workspace {
        &self.services.workspace
    }
}
