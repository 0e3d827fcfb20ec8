//! Reactive dialog store
//!
//! One dialog surface expressed as observable state. The store publishes a
//! [`DialogSnapshot`] on every change through a `watch` channel; a presentation
//! mounts itself by subscribing, renders snapshots with [`render`] and sends user
//! actions back as [`DialogAction`]s.

mod view;

pub use view::{render, ViewNode};

use crate::config::DialogSettings;
use crate::dialog::session::Session;
use crate::dialog::types::resolve_button_value;
use crate::dialog::{
    ConfirmOptions, CustomDialog, DialogButton, DialogError, DialogInput, DialogRequest,
    DialogResult, DialogRole, Effect, FromOutcome, ListOption, Outcome, PendingDialog, Phase,
    PromptOptions, Severity, Validator, WaitStrategy, DEFAULT_BUTTON_VALUE,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

/// Transient configuration of the dialog being shown.
///
/// Reset before every show-operation and when the dialog closes.
#[derive(Debug, Clone, Default)]
pub struct DialogConfig {
    pub title: String,
    pub icon: String,
    pub message: String,
    pub alert_type: Severity,

    /// Label of the acknowledgement control
    pub ok_text: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub is_danger: bool,

    pub input_value: String,
    pub placeholder: String,
    pub default_value: String,
    pub validator: Option<Validator>,
    pub error_message: String,

    pub html: String,
    pub buttons: Vec<DialogButton>,
    pub list_options: Vec<ListOption>,
    pub is_list_mode: bool,
}

/// Everything a presentation needs to draw the dialog
#[derive(Debug, Clone, Default)]
pub struct DialogSnapshot {
    pub is_open: bool,
    pub dialog_type: DialogRole,
    pub config: DialogConfig,
    /// `animate__animated animate__<name>` while an animation is applied
    pub animation_class: String,
    pub is_closing: bool,
    pub input_focused: bool,
    pub phase: Phase,
    /// Incremented on every show-operation, so a presentation can tell two
    /// consecutive dialogs apart
    pub sequence: u64,
}

/// Named user action emitted by a presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "kebab-case")]
pub enum DialogAction {
    AlertOk,
    ConfirmCancel,
    ConfirmOk,
    PromptCancel,
    PromptOk,
    InputChange(String),
    ButtonClick(Option<String>),
    ListItemClick(String),
    CustomCancel,
    /// Platform dismissal (escape)
    Dismiss,
    AnimationEnd,
}

/// Observable dialog state plus the handlers a presentation binds to
pub struct DialogStore {
    settings: DialogSettings,
    session: Session,
    active: DialogRole,
    config: DialogConfig,
    input_focused: bool,
    sequence: u64,
    state: watch::Sender<DialogSnapshot>,
}

impl Default for DialogStore {
    fn default() -> Self {
        Self::new(DialogSettings::default())
    }
}

impl DialogStore {
    pub fn new(settings: DialogSettings) -> Self {
        let (state, _) = watch::channel(DialogSnapshot::default());
        Self {
            session: Session::new(DialogRole::Alert, settings.store_wait),
            settings,
            active: DialogRole::Alert,
            config: DialogConfig::default(),
            input_focused: false,
            sequence: 0,
            state,
        }
    }

    /// Register a presentation. Show-operations fail until one is mounted.
    pub fn mount(&self) -> watch::Receiver<DialogSnapshot> {
        debug!("dialog presentation mounted");
        self.state.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        self.state.receiver_count() > 0
    }

    pub fn snapshot(&self) -> DialogSnapshot {
        self.state.borrow().clone()
    }

    pub fn settings(&self) -> &DialogSettings {
        &self.settings
    }

    /// Takes effect from the next show-operation
    pub fn set_wait_strategy(&mut self, wait: WaitStrategy) {
        self.settings.store_wait = wait;
    }

    pub fn is_open(&self) -> bool {
        self.session.lifecycle().is_open()
    }

    pub fn show_alert(
        &mut self,
        message: &str,
        severity: impl Into<Severity>,
    ) -> DialogResult<PendingDialog<()>> {
        self.ensure_available(DialogRole::Alert)?;
        self.reset_config();

        let severity = severity.into();
        let presentation = severity.presentation();
        self.config.title = presentation.title.to_string();
        self.config.icon = presentation.icon.to_string();
        self.config.message = message.to_string();
        self.config.alert_type = severity;

        Ok(self.open(DialogRole::Alert))
    }

    pub fn show_confirm(
        &mut self,
        message: &str,
        options: ConfirmOptions,
    ) -> DialogResult<PendingDialog<bool>> {
        self.ensure_available(DialogRole::Confirm)?;
        self.reset_config();

        self.config.title = self.settings.labels.confirm_title.clone();
        self.config.message = message.to_string();
        self.config.is_danger = options.is_danger();
        if let Some(label) = options.confirm_label {
            self.config.confirm_text = label;
        }
        if let Some(label) = options.cancel_label {
            self.config.cancel_text = label;
        }

        Ok(self.open(DialogRole::Confirm))
    }

    pub fn show_prompt(
        &mut self,
        message: &str,
        options: PromptOptions,
    ) -> DialogResult<PendingDialog<Option<String>>> {
        self.ensure_available(DialogRole::Prompt)?;
        self.reset_config();

        self.config.title = self.settings.labels.prompt_title.clone();
        self.config.message = message.to_string();
        self.config.input_value = options.default_value.clone();
        self.config.default_value = options.default_value;
        self.config.placeholder = options.placeholder;
        self.config.validator = options.validator;

        let pending = self.open(DialogRole::Prompt);
        if self.session.schedule_focus(self.settings.focus_delay(), Instant::now()) {
            self.input_focused = true;
            self.publish();
        }
        Ok(pending)
    }

    pub fn show_dialog(
        &mut self,
        input: impl Into<DialogInput>,
        options: CustomDialog,
    ) -> DialogResult<PendingDialog<Option<String>>> {
        self.ensure_available(DialogRole::Custom)?;
        self.reset_config();

        let dialog = input.into().resolve(options);
        self.config.is_list_mode = dialog.is_list_mode();
        self.config.html = dialog.html_body().unwrap_or_default().to_string();
        self.config.title = dialog
            .title
            .unwrap_or_else(|| self.settings.labels.dialog_title.clone());
        self.config.icon = dialog.icon;
        self.config.message = dialog.message;
        self.config.buttons = dialog.buttons;
        self.config.list_options = dialog.options;

        Ok(self.open(DialogRole::Custom))
    }

    pub fn alert_ok(&mut self) -> bool {
        self.close(DialogRole::Alert, Outcome::Acknowledged)
    }

    pub fn confirm_cancel(&mut self) -> bool {
        self.close(DialogRole::Confirm, Outcome::Confirmed(false))
    }

    pub fn confirm_ok(&mut self) -> bool {
        self.close(DialogRole::Confirm, Outcome::Confirmed(true))
    }

    pub fn prompt_cancel(&mut self) -> bool {
        self.close(DialogRole::Prompt, Outcome::Value(None))
    }

    /// Submit the prompt. A rejected value keeps the dialog open with the error shown.
    pub fn prompt_ok(&mut self) -> bool {
        if !self.accepts(DialogRole::Prompt) {
            return false;
        }

        let error = self
            .config
            .validator
            .as_ref()
            .and_then(|validator| validator.check(&self.config.input_value));

        if let Some(error) = error {
            debug!(%error, "prompt value rejected");
            self.config.error_message = error;
            self.input_focused = true;
            self.publish();
            return true;
        }

        let value = self.config.input_value.clone();
        self.close(DialogRole::Prompt, Outcome::Value(Some(value)))
    }

    /// The prompt input was edited; clears any error shown
    pub fn input_change(&mut self, value: impl Into<String>) -> bool {
        if !self.accepts(DialogRole::Prompt) {
            return false;
        }
        self.config.input_value = value.into();
        self.config.error_message.clear();
        self.publish();
        true
    }

    /// A footer button of a button-mode custom dialog; no value resolves with `"ok"`.
    /// The value must belong to one of the shown buttons.
    pub fn button_click(&mut self, value: Option<String>) -> bool {
        if !self.accepts(DialogRole::Custom) || self.config.is_list_mode {
            return false;
        }
        let value = resolve_button_value(value.as_deref());
        let known = if self.config.buttons.is_empty() {
            value == DEFAULT_BUTTON_VALUE
        } else {
            self.config
                .buttons
                .iter()
                .any(|button| button.resolved_value() == value)
        };
        if !known {
            trace!(%value, "ignoring click on unknown button");
            return false;
        }
        self.close(DialogRole::Custom, Outcome::Value(Some(value)))
    }

    pub fn list_item_click(&mut self, value: &str) -> bool {
        if !self.accepts(DialogRole::Custom) || !self.config.is_list_mode {
            return false;
        }
        if !self.config.list_options.iter().any(|option| option.value == value) {
            trace!(value, "ignoring click on unknown list item");
            return false;
        }
        self.close(DialogRole::Custom, Outcome::Value(Some(value.to_string())))
    }

    pub fn custom_cancel(&mut self) -> bool {
        if !self.config.is_list_mode {
            return false;
        }
        self.close(DialogRole::Custom, Outcome::Value(None))
    }

    /// Escape and similar platform dismissals are swallowed
    pub fn dismiss(&mut self) -> bool {
        let effects = self.session.dismiss();
        effects.contains(&Effect::SuppressDismiss) && self.is_open()
    }

    /// The presentation finished playing the current animation
    pub fn animation_end(&mut self) -> bool {
        let effects = self.session.animation_ended(Instant::now());
        self.apply(&effects)
    }

    /// Route a named action to its handler
    pub fn dispatch(&mut self, action: DialogAction) -> bool {
        trace!(?action, "dispatching dialog action");
        match action {
            DialogAction::AlertOk => self.alert_ok(),
            DialogAction::ConfirmCancel => self.confirm_cancel(),
            DialogAction::ConfirmOk => self.confirm_ok(),
            DialogAction::PromptCancel => self.prompt_cancel(),
            DialogAction::PromptOk => self.prompt_ok(),
            DialogAction::InputChange(value) => self.input_change(value),
            DialogAction::ButtonClick(value) => self.button_click(value),
            DialogAction::ListItemClick(value) => self.list_item_click(&value),
            DialogAction::CustomCancel => self.custom_cancel(),
            DialogAction::Dismiss => self.dismiss(),
            DialogAction::AnimationEnd => self.animation_end(),
        }
    }

    /// Fire due timers: timed exit wait and delayed input focus
    pub fn tick(&mut self, now: Instant) {
        let fired = self.session.poll_timers(now);
        if fired.focus && self.active == DialogRole::Prompt {
            self.input_focused = true;
            self.publish();
        }
        self.apply(&fired.effects);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.next_deadline()
    }

    fn ensure_available(&self, role: DialogRole) -> DialogResult<()> {
        if !self.is_mounted() {
            warn!(%role, "dialog shown before a presentation was mounted");
            return Err(DialogError::NotInitialized(role));
        }
        if self.session.is_busy() {
            warn!(%role, active = %self.active, "dialog shown while a previous request is pending");
            return Err(DialogError::SurfaceBusy(role));
        }
        Ok(())
    }

    fn reset_config(&mut self) {
        let labels = &self.settings.labels;
        self.config = DialogConfig {
            ok_text: labels.ok.clone(),
            confirm_text: labels.confirm.clone(),
            cancel_text: labels.cancel.clone(),
            ..DialogConfig::default()
        };
        self.input_focused = false;
    }

    fn open<T: FromOutcome>(&mut self, role: DialogRole) -> PendingDialog<T> {
        let (request, pending) = DialogRequest::open(role);
        let entry = self.settings.animations.for_role(role).entry;

        self.active = role;
        self.sequence += 1;
        self.session = Session::new(role, self.settings.store_wait);
        self.session.open(request, entry);
        self.publish();
        pending
    }

    fn accepts(&self, role: DialogRole) -> bool {
        let accepts = self.active == role && self.session.accepts_actions();
        if !accepts {
            trace!(%role, active = %self.active, phase = ?self.session.phase(), "ignoring dialog action");
        }
        accepts
    }

    fn close(&mut self, role: DialogRole, outcome: Outcome) -> bool {
        if !self.accepts(role) {
            return false;
        }
        let exit = self.settings.animations.for_role(role).exit;
        let effects = self.session.close(outcome, exit, Instant::now());
        self.input_focused = false;
        self.apply(&effects);
        self.publish();
        true
    }

    /// Returns whether anything changed
    fn apply(&mut self, effects: &[Effect]) -> bool {
        if effects.is_empty() {
            return false;
        }
        if effects.contains(&Effect::HideModal) {
            self.reset_config();
        }
        self.publish();
        true
    }

    fn publish(&self) {
        let lifecycle = self.session.lifecycle();
        let snapshot = DialogSnapshot {
            is_open: lifecycle.is_open(),
            dialog_type: self.active,
            config: self.config.clone(),
            animation_class: lifecycle.animation_class(),
            is_closing: lifecycle.is_closing(),
            input_focused: self.input_focused,
            phase: lifecycle.phase(),
            sequence: self.sequence,
        };
        self.state.send_replace(snapshot);
    }
}
