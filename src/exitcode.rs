//! Process exit codes

/// Successful termination
pub const OK: i32 = 0;

/// Any failure: missing configuration, bad arguments, unknown command,
/// or a subcommand that did not complete
pub const FAILURE: i32 = 1;
