//! CLI argument definitions using clap

use clap::{ArgAction, Parser};

use crate::config::{Flags, Setting};

/// Manage vendored source trees in a GOPATH-style build root
#[derive(Parser, Debug)]
#[command(name = "gospace")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Root directory (default GOSPACE_ROOT)
    #[arg(long, value_name = "DIR")]
    pub root: Option<String>,

    /// Package import path (default GOSPACE_PKG)
    #[arg(long, value_name = "IMPORT_PATH")]
    pub pkg: Option<String>,

    /// Repository to clone the package from (default GOSPACE_REPO)
    #[arg(long, value_name = "URL")]
    pub repo: Option<String>,

    /// Command followed by its own arguments
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

impl Cli {
    pub fn flags(&self) -> Flags {
        Flags {
            root: self.root.clone(),
            pkg: self.pkg.clone(),
            repo: self.repo.clone(),
        }
    }

    /// Command name and the arguments that belong to it.
    /// The name is empty when no command was given.
    pub fn command_line(&self) -> (&str, &[String]) {
        match self.command.split_first() {
            Some((name, args)) => (name.as_str(), args),
            None => ("", &[]),
        }
    }
}

/// Rewrite single-dash long flags (`-root dir`, `-pkg=x`) to the
/// double-dash form clap expects.
///
/// Only global flags before the command name are touched; everything from
/// the first positional on is passed through unchanged.
pub fn normalize_go_flags<I, S>(argv: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut argv = argv.into_iter().map(Into::into);
    let mut out: Vec<String> = argv.next().into_iter().collect();
    let mut expect_value = false;

    while let Some(arg) = argv.next() {
        if expect_value {
            expect_value = false;
            out.push(arg);
            continue;
        }
        if arg == "--" || !arg.starts_with('-') {
            out.push(arg);
            out.extend(argv.by_ref());
            break;
        }

        let (flag, inline_value) = match arg.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (arg.as_str(), None),
        };
        let bare = flag.trim_start_matches('-');
        let is_setting = Setting::ALL.iter().any(|s| s.key() == bare);
        // `-root dir`: the next token is the value, even if it looks like a flag
        expect_value = is_setting && inline_value.is_none();

        if is_setting && !flag.starts_with("--") {
            match inline_value {
                Some(value) => out.push(format!("--{}={}", bare, value)),
                None => out.push(format!("--{}", bare)),
            }
        } else {
            out.push(arg);
        }
    }
    out
}
