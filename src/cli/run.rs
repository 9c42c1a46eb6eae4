use std::path::Path;

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, init::init, scan::scan},
};

/// Dispatch to the command handler.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Init) => init(Path::new(".")),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
