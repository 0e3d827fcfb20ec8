//! Core dialog types
//!
//! Roles, severities, button styles and the per-operation option records shared
//! by the imperative controller and the reactive store.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The four dialog surfaces a manager can drive
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum DialogRole {
    #[default]
    Alert,
    Confirm,
    Prompt,
    Custom,
}

impl DialogRole {
    pub const ALL: [DialogRole; 4] = [
        DialogRole::Alert,
        DialogRole::Confirm,
        DialogRole::Prompt,
        DialogRole::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DialogRole::Alert => "alert",
            DialogRole::Confirm => "confirm",
            DialogRole::Prompt => "prompt",
            DialogRole::Custom => "custom",
        }
    }

    /// Position of this role in [`DialogRole::ALL`]
    pub(crate) fn index(self) -> usize {
        match self {
            DialogRole::Alert => 0,
            DialogRole::Confirm => 1,
            DialogRole::Prompt => 2,
            DialogRole::Custom => 3,
        }
    }
}

impl fmt::Display for DialogRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialogRole {
    type Err = DialogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alert" => Ok(DialogRole::Alert),
            "confirm" => Ok(DialogRole::Confirm),
            "prompt" => Ok(DialogRole::Prompt),
            "custom" => Ok(DialogRole::Custom),
            other => Err(DialogError::UnknownRole(other.to_string())),
        }
    }
}

/// Alert classification controlling icon, title and styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Severity {
    Success,
    Error,
    #[default]
    Info,
}

/// Icon, title and class used to present an alert of a given severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertPresentation {
    pub icon: &'static str,
    pub title: &'static str,
    pub class: &'static str,
}

impl Severity {
    /// Parse a severity tag; anything unrecognised is presented as info.
    pub fn parse_lenient(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "error" => Severity::Error,
            _ => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }

    pub fn presentation(self) -> AlertPresentation {
        match self {
            Severity::Success => AlertPresentation {
                icon: "✔",
                title: "Success",
                class: "alert-success",
            },
            Severity::Error => AlertPresentation {
                icon: "✖",
                title: "Error",
                class: "alert-error",
            },
            Severity::Info => AlertPresentation {
                icon: "ℹ",
                title: "Notice",
                class: "alert-info",
            },
        }
    }

    /// Every class `presentation` can produce, used to strip a previous severity
    pub fn all_classes() -> [&'static str; 3] {
        ["alert-success", "alert-error", "alert-info"]
    }
}

impl From<&str> for Severity {
    fn from(tag: &str) -> Self {
        Self::parse_lenient(tag)
    }
}

impl From<String> for Severity {
    fn from(tag: String) -> Self {
        Self::parse_lenient(&tag)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Button styling options, rendered as `btn btn-<style>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ButtonStyle {
    Primary,
    #[default]
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
    Light,
    Dark,
    Link,
}

impl ButtonStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonStyle::Primary => "primary",
            ButtonStyle::Secondary => "secondary",
            ButtonStyle::Success => "success",
            ButtonStyle::Danger => "danger",
            ButtonStyle::Warning => "warning",
            ButtonStyle::Info => "info",
            ButtonStyle::Light => "light",
            ButtonStyle::Dark => "dark",
            ButtonStyle::Link => "link",
        }
    }

    /// Class list for a plain form button of this style
    pub fn class_name(&self) -> String {
        format!("btn btn-{}", self.as_str())
    }
}

impl From<&str> for ButtonStyle {
    fn from(style: &str) -> Self {
        match style.trim().to_ascii_lowercase().as_str() {
            "primary" => ButtonStyle::Primary,
            "success" => ButtonStyle::Success,
            "danger" => ButtonStyle::Danger,
            "warning" => ButtonStyle::Warning,
            "info" => ButtonStyle::Info,
            "light" => ButtonStyle::Light,
            "dark" => ButtonStyle::Dark,
            "link" => ButtonStyle::Link,
            _ => ButtonStyle::Secondary,
        }
    }
}

impl From<String> for ButtonStyle {
    fn from(style: String) -> Self {
        Self::from(style.as_str())
    }
}

/// Visual weight of the affirmative control in a confirm dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmKind {
    #[default]
    Default,
    Danger,
}

/// Options for `show_confirm`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmOptions {
    pub kind: ConfirmKind,
    /// Affirmative label, falls back to the configured "Confirm"
    pub confirm_label: Option<String>,
    /// Negative label, falls back to the configured "Cancel"
    pub cancel_label: Option<String>,
}

impl ConfirmOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn danger() -> Self {
        Self {
            kind: ConfirmKind::Danger,
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: ConfirmKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = Some(label.into());
        self
    }

    pub fn with_cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = Some(label.into());
        self
    }

    pub fn is_danger(&self) -> bool {
        self.kind == ConfirmKind::Danger
    }
}

/// Prompt validator: maps the current value to an error message.
///
/// `None` or an empty message means the value is accepted.
#[derive(Clone)]
pub struct Validator(Arc<dyn Fn(&str) -> Option<String> + Send + Sync>);

impl Validator {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(check))
    }

    /// Run the validator, normalising an empty message to acceptance
    pub fn check(&self, value: &str) -> Option<String> {
        (self.0)(value).filter(|error| !error.is_empty())
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// Options for `show_prompt`
#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    pub default_value: String,
    pub placeholder: String,
    pub validator: Option<Validator>,
}

impl PromptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_validator<F>(mut self, check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.validator = Some(Validator::new(check));
        self
    }
}

/// Render mode of a custom dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CustomMode {
    #[default]
    #[serde(rename = "default")]
    Buttons,
    List,
}

impl From<String> for CustomMode {
    fn from(mode: String) -> Self {
        if mode.trim().eq_ignore_ascii_case("list") {
            CustomMode::List
        } else {
            CustomMode::Buttons
        }
    }
}

/// A footer button of a custom dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DialogButton {
    pub text: String,
    #[serde(default)]
    pub style: ButtonStyle,
    /// Value the dialog resolves with; absent resolves with `"ok"`
    #[serde(default)]
    pub value: Option<String>,
}

impl DialogButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: ButtonStyle::default(),
            value: None,
        }
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// The value a click on this button resolves with
    pub fn resolved_value(&self) -> String {
        resolve_button_value(self.value.as_deref())
    }
}

/// Sentinel a custom dialog resolves with when a button carries no value
pub const DEFAULT_BUTTON_VALUE: &str = "ok";

pub(crate) fn resolve_button_value(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_BUTTON_VALUE.to_string(),
    }
}

/// A selectable entry of a list-mode custom dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ListOption {
    pub value: String,
    pub text: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl ListOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Structured configuration of a custom dialog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CustomDialog {
    /// Title, falls back to the configured "Dialog"
    pub title: Option<String>,
    pub icon: String,
    pub message: String,
    /// Raw HTML body; takes precedence over `message` in button mode
    pub html: Option<String>,
    pub buttons: Vec<DialogButton>,
    #[serde(rename = "type")]
    pub mode: CustomMode,
    pub options: Vec<ListOption>,
}

impl CustomDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn with_button(mut self, button: DialogButton) -> Self {
        self.buttons.push(button);
        self
    }

    /// Switch to list mode with the given options
    pub fn with_options(mut self, options: Vec<ListOption>) -> Self {
        self.mode = CustomMode::List;
        self.options = options;
        self
    }

    /// List mode needs both the mode flag and at least one option
    pub fn is_list_mode(&self) -> bool {
        self.mode == CustomMode::List && !self.options.is_empty()
    }

    /// HTML body if one was supplied and is non-empty
    pub fn html_body(&self) -> Option<&str> {
        self.html.as_deref().filter(|html| !html.is_empty())
    }
}

/// First argument of `show_dialog`: a plain message or a full configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogInput {
    Message(String),
    Config(CustomDialog),
}

impl DialogInput {
    /// Combine with the per-call options.
    ///
    /// A plain message is merged into `options`; a full configuration ignores them.
    pub fn resolve(self, options: CustomDialog) -> CustomDialog {
        match self {
            DialogInput::Message(message) => CustomDialog { message, ..options },
            DialogInput::Config(config) => config,
        }
    }
}

impl From<&str> for DialogInput {
    fn from(message: &str) -> Self {
        DialogInput::Message(message.to_string())
    }
}

impl From<String> for DialogInput {
    fn from(message: String) -> Self {
        DialogInput::Message(message)
    }
}

impl From<CustomDialog> for DialogInput {
    fn from(config: CustomDialog) -> Self {
        DialogInput::Config(config)
    }
}

/// Result type for dialog operations
pub type DialogResult<T> = std::result::Result<T, DialogError>;

/// Dialog-specific error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogError {
    #[error("{0} dialog not initialized")]
    NotInitialized(DialogRole),

    #[error("{0} dialog is already showing a pending request")]
    SurfaceBusy(DialogRole),

    #[error("{0} dialog was dropped before the user responded")]
    Abandoned(DialogRole),

    #[error("{role} dialog resolved with an unexpected outcome (expected {expected})")]
    OutcomeMismatch {
        role: DialogRole,
        expected: &'static str,
    },

    #[error("Unknown dialog role '{0}'")]
    UnknownRole(String),

    #[error("Invalid wait strategy '{0}'")]
    InvalidWaitStrategy(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_severity_falls_back_to_info() {
        for tag in ["warning", "", "SUCCESSFUL", "danger"] {
            assert_eq!(Severity::from(tag), Severity::Info, "tag {tag:?}");
        }
        assert_eq!(Severity::from("Success"), Severity::Success);
        assert_eq!(Severity::from(" error "), Severity::Error);
    }

    #[test]
    fn test_severity_deserializes_leniently() {
        let severity: Severity = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(severity, Severity::Info);
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
    }

    #[test]
    fn test_validator_treats_empty_message_as_success() {
        let validator = Validator::new(|value| {
            if value.is_empty() {
                Some("required".to_string())
            } else {
                Some(String::new())
            }
        });

        assert_eq!(validator.check(""), Some("required".to_string()));
        assert_eq!(validator.check("x"), None);
    }

    #[test]
    fn test_message_input_merges_options() {
        let options = CustomDialog::new()
            .with_title("Pick")
            .with_button(DialogButton::new("A").with_value("a"));

        let merged = DialogInput::from("hello").resolve(options.clone());
        assert_eq!(merged.message, "hello");
        assert_eq!(merged.title.as_deref(), Some("Pick"));
        assert_eq!(merged.buttons.len(), 1);

        let config = CustomDialog::new().with_message("own");
        let resolved = DialogInput::from(config.clone()).resolve(options);
        assert_eq!(resolved, config);
    }

    #[test]
    fn test_list_mode_requires_options() {
        let mut config = CustomDialog::new();
        config.mode = CustomMode::List;
        assert!(!config.is_list_mode());

        let config = config.with_options(vec![ListOption::new("1", "One")]);
        assert!(config.is_list_mode());
    }

    #[test]
    fn test_custom_dialog_from_json() {
        let config: CustomDialog = serde_json::from_str(
            r#"{
                "title": "Export",
                "type": "list",
                "options": [
                    {"value": "1", "text": "One", "icon": "1️⃣"},
                    {"value": "2", "text": "Two"}
                ]
            }"#,
        )
        .unwrap();

        assert!(config.is_list_mode());
        assert_eq!(config.options[1].icon, None);

        let config: CustomDialog =
            serde_json::from_str(r#"{"buttons": [{"text": "Go", "style": "fancy"}]}"#).unwrap();
        assert_eq!(config.mode, CustomMode::Buttons);
        assert_eq!(config.buttons[0].style, ButtonStyle::Secondary);
        assert_eq!(config.buttons[0].resolved_value(), "ok");
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Prompt".parse::<DialogRole>().unwrap(), DialogRole::Prompt);
        assert_eq!(
            "toast".parse::<DialogRole>(),
            Err(DialogError::UnknownRole("toast".to_string()))
        );
    }
}
