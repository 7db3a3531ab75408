//! Interactive menu, CLI and configuration for daybook
//!
//! This crate provides the `daybook` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod menu;

pub use cli::Cli;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use menu::{Menu, MenuOption};
