//! Console handlers module
//!
//! This module contains the command handlers behind the console binary.

pub mod commands;

pub use commands::CommandStatus;
