//! `stockroom-cli`
//!
//! Command-line front end over the inventory store. Argument parsing lives in
//! [`args`], command execution and output formatting in [`commands`].

pub mod args;
pub mod commands;

pub use args::{Cli, Command};
pub use commands::{RunOptions, execute, run};
