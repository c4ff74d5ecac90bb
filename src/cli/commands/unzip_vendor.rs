use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueHint};

use super::{display_path, parse_args, Command};
use crate::application::ApplicationResult;
use crate::cli::output;
use crate::domain::Workspace;
use crate::infrastructure::ServiceContainer;

/// Unpack an archive into the vendor directory
#[derive(Parser, Debug, Default)]
#[command(name = "unzip-vendor")]
pub struct UnzipVendorArgs {
    /// Replace an existing vendor directory
    #[arg(long)]
    pub overwrite: bool,

    /// Archive to read
    #[arg(value_hint = ValueHint::FilePath)]
    pub src: PathBuf,
}

pub struct UnzipVendor {
    services: Arc<ServiceContainer>,
    args: UnzipVendorArgs,
}

impl UnzipVendor {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self {
            services,
            args: UnzipVendorArgs::default(),
        }
    }
}

impl Command for UnzipVendor {
    fn name(&self) -> &'static str {
        "unzip-vendor"
    }

    fn parse(&mut self, args: &[String]) -> Result<(), clap::Error> {
        self.args = parse_args(self.name(), args)?;
        Ok(())
    }

    fn exec(&self) -> ApplicationResult<()> {
        let vendor = self
            .services
            .vendor()
            .unpack(&self.args.src, self.args.overwrite)?;
        output::action(
            "Unpacked",
            &format!(
                "{} into {}",
                self.args.src.display(),
                display_path(self.workspace(), &vendor)
            ),
        );
        Ok(())
    }

    fn workspace(&self) -> &Workspace {
        &self.services.workspace
    }
}
