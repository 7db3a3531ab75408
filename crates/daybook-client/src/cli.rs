//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use daybook_core::TracingOutputFormat;

use crate::config::ClientConfig;

/// daybook - a personal calendar kept in memory for one session
#[derive(Debug, Parser)]
#[command(name = "daybook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "DAYBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log line layout on stderr (pretty, compact, json)
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<TracingOutputFormat>,

    /// Print listings as JSON
    #[arg(long)]
    pub json: bool,

    /// Move an edited event to the day of its new start time
    #[arg(long)]
    pub rebucket_on_edit: bool,

    /// Maximum title length (truncated with ellipsis)
    #[arg(long)]
    pub max_title_length: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Overlays command-line flags on top of the loaded configuration.
    ///
    /// Flags only ever switch settings on; an unset flag keeps the file value.
    pub fn apply_to(&self, config: &mut ClientConfig) {
        config.debug |= self.debug;
        config.display.json |= self.json;
        config.store.rebucket_on_edit |= self.rebucket_on_edit;
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if self.max_title_length.is_some() {
            config.display.max_title_length = self.max_title_length;
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
