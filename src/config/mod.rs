use crate::dialog::{AnimationSet, WaitStrategy};
use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Labels and titles shown on the dialog controls
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Labels {
    /// Single acknowledgement control (alert, default custom button)
    pub ok: String,

    /// Affirmative control of confirm and prompt dialogs
    pub confirm: String,

    /// Negative control of confirm, prompt and list dialogs
    pub cancel: String,

    pub confirm_title: String,

    pub prompt_title: String,

    /// Title of a custom dialog that does not provide one
    pub dialog_title: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            ok: "OK".to_string(),
            confirm: "Confirm".to_string(),
            cancel: "Cancel".to_string(),
            confirm_title: "Confirm".to_string(),
            prompt_title: "Input".to_string(),
            dialog_title: "Dialog".to_string(),
        }
    }
}

/// Dialog configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DialogSettings {
    pub labels: Labels,

    /// Entry and exit animation per dialog role
    pub animations: AnimationSet,

    /// How the imperative controller waits for exit animations
    pub controller_wait: WaitStrategy,

    /// How the reactive store waits for exit animations
    pub store_wait: WaitStrategy,

    /// Delay before a prompt input receives focus
    pub focus_delay_ms: u64,

    /// How long a presentation lets an animation play before reporting its end
    pub animation_duration_ms: u64,
}

impl Default for DialogSettings {
    fn default() -> Self {
        Self {
            labels: Labels::default(),
            animations: AnimationSet::default(),
            controller_wait: WaitStrategy::AnimationEnd,
            store_wait: WaitStrategy::Timeout { millis: 300 },
            focus_delay_ms: 100,
            animation_duration_ms: 300,
        }
    }
}

const MAX_DELAY_MS: u64 = 10_000;

impl DialogSettings {
    /// Initialize settings from the configuration file and the environment
    pub async fn init(explicit_path: Option<&Path>) -> Result<Self> {
        debug!("Initializing dialog settings");

        let mut settings = match explicit_path {
            Some(path) => Self::load_from_file(path).await?,
            None => Self::discover().await?.unwrap_or_default(),
        };

        settings.load_from_env();
        settings.validate()?;

        Ok(settings)
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Search the usual locations for a settings file.
    ///
    /// Priority:
    /// 1. ./.dialogs.json
    /// 2. ./dialogs.json
    /// 3. $CONFIG_DIR/dialog-replace/dialogs.json
    pub async fn discover() -> Result<Option<Self>> {
        for path in Self::search_paths() {
            if path.exists() {
                return Self::load_from_file(&path).await.map(Some);
            }
        }
        Ok(None)
    }

    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./.dialogs.json"), PathBuf::from("./dialogs.json")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("dialog-replace").join("dialogs.json"));
        }

        paths
    }

    pub async fn load_from_file(path: &Path) -> Result<Self> {
        debug!("Loading dialog settings from: {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write settings file {}", path.display()))
    }

    /// Load overrides from environment variables
    pub fn load_from_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(wait) = lookup("DIALOG_WAIT").and_then(|value| parse_wait("DIALOG_WAIT", &value)) {
            self.controller_wait = wait;
            self.store_wait = wait;
        }

        if let Some(wait) = lookup("DIALOG_CONTROLLER_WAIT")
            .and_then(|value| parse_wait("DIALOG_CONTROLLER_WAIT", &value))
        {
            self.controller_wait = wait;
        }

        if let Some(wait) =
            lookup("DIALOG_STORE_WAIT").and_then(|value| parse_wait("DIALOG_STORE_WAIT", &value))
        {
            self.store_wait = wait;
        }

        if let Some(delay) = lookup("DIALOG_FOCUS_DELAY_MS") {
            match delay.trim().parse() {
                Ok(delay) => self.focus_delay_ms = delay,
                Err(_) => warn!("Ignoring DIALOG_FOCUS_DELAY_MS={}: not a number", delay),
            }
        }

        if let Some(duration) = lookup("DIALOG_ANIMATION_MS") {
            match duration.trim().parse() {
                Ok(duration) => self.animation_duration_ms = duration,
                Err(_) => warn!("Ignoring DIALOG_ANIMATION_MS={}: not a number", duration),
            }
        }

        if let Some(label) = lookup("DIALOG_OK_LABEL") {
            self.labels.ok = label;
        }

        if let Some(label) = lookup("DIALOG_CONFIRM_LABEL") {
            self.labels.confirm = label;
        }

        if let Some(label) = lookup("DIALOG_CANCEL_LABEL") {
            self.labels.cancel = label;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let labels = [
            ("ok", &self.labels.ok),
            ("confirm", &self.labels.confirm),
            ("cancel", &self.labels.cancel),
        ];
        for (name, label) in labels {
            if label.trim().is_empty() {
                return Err(anyhow::anyhow!("label '{}' must not be empty", name));
            }
        }

        if self.focus_delay_ms > MAX_DELAY_MS {
            return Err(anyhow::anyhow!(
                "focus_delay_ms must be at most {} (got {})",
                MAX_DELAY_MS,
                self.focus_delay_ms
            ));
        }

        if self.animation_duration_ms > MAX_DELAY_MS {
            return Err(anyhow::anyhow!(
                "animation_duration_ms must be at most {} (got {})",
                MAX_DELAY_MS,
                self.animation_duration_ms
            ));
        }

        for wait in [self.controller_wait, self.store_wait] {
            if let WaitStrategy::Timeout { millis } = wait {
                if millis > MAX_DELAY_MS {
                    return Err(anyhow::anyhow!(
                        "exit timeout must be at most {}ms (got {}ms)",
                        MAX_DELAY_MS,
                        millis
                    ));
                }
            }
        }

        Ok(())
    }
}

fn parse_wait(key: &str, value: &str) -> Option<WaitStrategy> {
    match value.parse() {
        Ok(wait) => Some(wait),
        Err(e) => {
            warn!("Ignoring {}: {}", key, e);
            None
        }
    }
}
