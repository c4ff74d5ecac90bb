//! gospace: manage vendored source trees in a GOPATH-style build root
//!
//! Layers, innermost first:
//! - `domain`: workspace paths and business rule errors (no I/O)
//! - `application`: subcommands, manifest guard, hashing
//! - `infrastructure`: filesystem/process boundary, archives, DI container
//! - `cli`: argument parsing, command registry and dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
