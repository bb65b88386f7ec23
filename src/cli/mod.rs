//! Command-line interface
//!
//! Argument parsing for the registry commands.

pub mod commands;

pub use commands::{Command, DurationArg, Opt};
