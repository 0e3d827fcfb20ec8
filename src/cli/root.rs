use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::config::DialogSettings;
use super::demo::DemoCommand;
use super::settings::SettingsCommand;

/// dialog-replace - non-blocking alert, confirm and prompt dialogs
#[derive(Parser)]
#[command(
    name = "dialog-replace",
    version,
    about = "Non-blocking alert, confirm and prompt dialogs",
    long_about = r#"dialog-replace drives alert, confirm, prompt and custom dialogs that resolve
a pending result instead of blocking the caller.

Examples:
  dialog-replace                          # Run the interactive tour
  dialog-replace demo --wait immediate    # Tour without exit animations
  dialog-replace settings --pretty        # Show the effective settings
  dialog-replace settings --schema        # Print the settings JSON schema"#
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Settings file (defaults to ./.dialogs.json, ./dialogs.json or the user config dir)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk through every dialog kind in the terminal
    Demo(DemoCommand),

    /// Print the effective settings or their schema
    Settings(SettingsCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.debug {
            debug!("Debug logging enabled");
        }

        let settings = DialogSettings::init(self.config.as_deref()).await?;
        debug!("Settings initialized");

        match self.command {
            Some(Commands::Settings(command)) => command.execute(&settings).await,
            Some(Commands::Demo(command)) => command.execute(settings).await,
            None => DemoCommand::default().execute(settings).await,
        }
    }
}
