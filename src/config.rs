//! Workspace configuration resolution
//!
//! Each setting is taken from its flag first, then from the matching
//! `GOSPACE_*` environment variable. A flag given explicitly wins even when
//! its value is empty. The environment is passed in as a map; nothing here
//! reads the process environment.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use ::config::{Config, Environment};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::Workspace;

/// Prefix of the fallback environment variables (`GOSPACE_ROOT`, ...).
pub const ENV_PREFIX: &str = "GOSPACE";

/// The three required settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Root,
    Package,
    Repo,
}

impl Setting {
    pub const ALL: [Setting; 3] = [Setting::Root, Setting::Package, Setting::Repo];

    /// Key used in the config layer, also the flag name.
    pub fn key(self) -> &'static str {
        match self {
            Setting::Root => "root",
            Setting::Package => "pkg",
            Setting::Repo => "repo",
        }
    }

    pub fn env_var(self) -> &'static str {
        match self {
            Setting::Root => "GOSPACE_ROOT",
            Setting::Package => "GOSPACE_PKG",
            Setting::Repo => "GOSPACE_REPO",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Setting::Root => "root directory",
            Setting::Package => "package name",
            Setting::Repo => "repo name",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is missing, please specify `-{}` or {} environment variable",
            self.label(),
            self.key(),
            self.env_var()
        )
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more required settings are empty; all of them are listed.
    #[error("{}", missing_lines(.0))]
    Missing(Vec<Setting>),

    #[error("cannot resolve root directory: {root}")]
    InvalidRoot {
        root: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Source(#[from] ::config::ConfigError),
}

fn missing_lines(settings: &[Setting]) -> String {
    settings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Values given on the command line; `None` means the flag was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    pub root: Option<String>,
    pub pkg: Option<String>,
    pub repo: Option<String>,
}

/// Settings after merging flags over environment, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    root: String,
    pkg: String,
    repo: String,
}

impl RawSettings {
    fn value(&self, setting: Setting) -> &str {
        match setting {
            Setting::Root => &self.root,
            Setting::Package => &self.pkg,
            Setting::Repo => &self.repo,
        }
    }
}

/// Resolve the workspace from flags with environment fallback.
///
/// # Errors
/// - [`ConfigError::Missing`] listing every setting that is still empty
/// - [`ConfigError::InvalidRoot`] if the root cannot be made absolute
pub fn resolve(flags: &Flags, env: &HashMap<String, String>) -> Result<Workspace, ConfigError> {
    // exact, case-sensitive names only; the config layer itself ignores case
    let source: ::config::Map<String, String> = Setting::ALL
        .iter()
        .filter_map(|s| {
            env.get(s.env_var())
                .map(|v| (s.env_var().to_string(), v.clone()))
        })
        .collect();

    let raw: RawSettings = Config::builder()
        .add_source(Environment::with_prefix(ENV_PREFIX).source(Some(source)))
        .set_override_option(Setting::Root.key(), flags.root.clone())?
        .set_override_option(Setting::Package.key(), flags.pkg.clone())?
        .set_override_option(Setting::Repo.key(), flags.repo.clone())?
        .build()?
        .try_deserialize()?;
    debug!("resolved settings: {:?}", raw);

    let missing: Vec<Setting> = Setting::ALL
        .into_iter()
        .filter(|s| raw.value(*s).is_empty())
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::Missing(missing));
    }

    let root_abs = absolute_root(&raw.root)?;
    Ok(Workspace::new(raw.root, root_abs, raw.pkg, raw.repo))
}

/// Expand `~` and make the root absolute against the current directory.
/// The directory does not have to exist yet.
fn absolute_root(root: &str) -> Result<PathBuf, ConfigError> {
    let expanded = shellexpand::tilde(root);
    std::path::absolute(expanded.as_ref()).map_err(|source| ConfigError::InvalidRoot {
        root: root.to_string(),
        source,
    })
}
