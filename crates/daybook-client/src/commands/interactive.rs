//! The interactive calendar session.

use std::io;

use daybook_core::{EventStore, OutputFormatter};
use tracing::info;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::menu::Menu;

/// Runs the menu on stdin/stdout until the user exits.
pub fn run(config: &ClientConfig) -> ClientResult<()> {
    config.validate()?;

    let store = EventStore::with_edit_policy(config.edit_policy());
    let formatter = OutputFormatter::new(config.format_options());
    info!(
        edit_policy = ?store.edit_policy(),
        output = ?config.output_format(),
        "Starting session"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(
        store,
        formatter,
        config.output_format(),
        stdin.lock(),
        stdout.lock(),
    );
    menu.run()
}
