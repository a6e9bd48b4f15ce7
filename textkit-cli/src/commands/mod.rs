//! CLI command implementations

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

use crate::config::{CliConfig, OutputFormat};
use crate::output::{create_formatter, OutputFormatter};

pub mod coerce;
pub mod format;
pub mod generate_config;
pub mod list;

/// Coerce text into typed values and format templates with graceful fallback
#[derive(Debug, Parser)]
#[command(name = "textkit", version, about, arg_required_else_help = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file
    #[arg(short, long, global = true, value_name = "FILE", env = "TEXTKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (overrides the configuration file)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Coerce values into a named type
    Coerce(coerce::CoerceArgs),

    /// Substitute arguments into a template
    Format(format::FormatArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: list::ListCommands,
    },

    /// Write a default configuration file
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// Settings shared by every command
#[derive(Debug, Default)]
pub struct RunContext {
    /// Loaded configuration
    pub config: CliConfig,
    /// Effective output format
    pub output_format: OutputFormat,
}

impl RunContext {
    /// Formatter writing to stdout in the effective output format
    pub fn formatter(&self, yes_no: bool) -> Box<dyn OutputFormatter> {
        create_formatter(
            self.output_format,
            io::stdout(),
            self.config.output.pretty_json,
            yes_no,
        )
    }
}

impl Cli {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let output_format = self.format.unwrap_or(config.output.format);
        let ctx = RunContext {
            config,
            output_format,
        };

        match &self.command {
            Commands::Coerce(args) => args.execute(&ctx),
            Commands::Format(args) => args.execute(&ctx),
            Commands::List { subcommand } => subcommand.execute(&ctx),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }
}
