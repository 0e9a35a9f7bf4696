//! Muster CLI library.
//!
//! This library provides the core functionality for the muster command-line interface,
//! including configuration management, command execution, record writing and output
//! formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod writer;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use writer::{DelimitedWriter, Delimiter};
