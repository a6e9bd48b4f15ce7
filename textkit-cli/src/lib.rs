//! textkit CLI library
//!
//! This library provides the command-line interface for textkit value
//! coercion and template formatting.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, CliResult};
