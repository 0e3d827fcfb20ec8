//! Settings command: print the effective settings or their JSON schema

use anyhow::{Context, Result};
use clap::Args;
use schemars::schema_for;
use std::path::PathBuf;
use tracing::info;

use crate::config::DialogSettings;

/// Show the effective dialog settings
#[derive(Debug, Default, Args)]
pub struct SettingsCommand {
    /// Print the JSON schema of the settings file instead
    #[arg(long)]
    pub schema: bool,

    /// Pretty print the output
    #[arg(short, long)]
    pub pretty: bool,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl SettingsCommand {
    pub async fn execute(&self, settings: &DialogSettings) -> Result<()> {
        let content = self.render(settings)?;

        match &self.output {
            Some(path) => {
                tokio::fs::write(path, content)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Wrote {} to {}", self.subject(), path.display());
            }
            None => println!("{}", content),
        }

        Ok(())
    }

    fn subject(&self) -> &'static str {
        if self.schema {
            "settings schema"
        } else {
            "settings"
        }
    }

    fn render(&self, settings: &DialogSettings) -> Result<String> {
        let value = if self.schema {
            serde_json::to_value(schema_for!(DialogSettings))?
        } else {
            serde_json::to_value(settings)?
        };

        let content = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(content)
    }
}
