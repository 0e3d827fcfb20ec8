//! Imperative dialog controller
//!
//! The controller owns the registered surfaces and an adapter. Show-operations
//! populate a surface, open it and return a [`PendingDialog`]; the host feeds
//! user interaction back through [`DialogController::handle`] and drives timers
//! with [`DialogController::tick`].
//!
//! ```no_run
//! use dialog_replace::controller::{DialogController, DialogSurfaces, SurfaceEvent};
//! use dialog_replace::config::Labels;
//! use dialog_replace::dialog::{ConfirmOptions, DialogRole};
//!
//! # async fn example() -> dialog_replace::dialog::DialogResult<()> {
//! let mut dialogs = DialogController::init(DialogSurfaces::standard(&Labels::default()));
//! let answer = dialogs.show_confirm("Delete the file?", ConfirmOptions::danger())?;
//! dialogs.handle(DialogRole::Confirm, SurfaceEvent::Confirm);
//! dialogs.handle(DialogRole::Confirm, SurfaceEvent::AnimationEnd);
//! assert!(answer.await?);
//! # Ok(())
//! # }
//! ```

mod surface;

pub use surface::{
    AlertSurface, ConfirmSurface, CustomBody, CustomSurface, DialogSurfaces, ErrorLine,
    FooterAction, FooterButton, ModalFrame, PromptSurface,
};

use crate::adapter::{DialogAdapter, FormAdapter};
use crate::config::DialogSettings;
use crate::dialog::session::Session;
use crate::dialog::types::resolve_button_value;
use crate::dialog::{
    ButtonStyle, ConfirmOptions, CustomDialog, DialogError, DialogInput, DialogRequest,
    DialogResult, DialogRole, Effect, FromOutcome, Outcome, PendingDialog, Phase, PromptOptions,
    Severity, Validator, WaitStrategy,
};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// User interaction on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The alert's acknowledgement control
    Acknowledge,
    /// The affirmative control of a confirm dialog
    Confirm,
    /// Any negative control
    Cancel,
    /// Prompt form submission
    Submit,
    /// Footer button of a custom dialog, by position
    Button(usize),
    /// List item of a list-mode custom dialog, by position
    ListItem(usize),
    /// Platform dismissal (escape key)
    Escape,
    /// The surface finished its current animation
    AnimationEnd,
}

/// Caller-owned dialog manager over a set of surfaces
pub struct DialogController<A: DialogAdapter = FormAdapter> {
    adapter: A,
    surfaces: DialogSurfaces<A>,
    sessions: [Session; 4],
    settings: DialogSettings,
    validator: Option<Validator>,
}

impl DialogController<FormAdapter> {
    /// Controller with the default adapter and settings
    pub fn init(surfaces: DialogSurfaces<FormAdapter>) -> Self {
        Self::new(surfaces, FormAdapter, DialogSettings::default())
    }
}

impl<A: DialogAdapter> DialogController<A> {
    pub fn new(mut surfaces: DialogSurfaces<A>, adapter: A, settings: DialogSettings) -> Self {
        for role in DialogRole::ALL {
            if let Some(frame) = surfaces.frame_mut(role) {
                frame.suppress_cancel();
            }
        }

        debug!(registered = ?surfaces.roles(), wait = %settings.controller_wait, "dialog controller initialized");

        let wait = settings.controller_wait;
        Self {
            adapter,
            surfaces,
            sessions: DialogRole::ALL.map(|role| Session::new(role, wait)),
            settings,
            validator: None,
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn settings(&self) -> &DialogSettings {
        &self.settings
    }

    pub fn surfaces(&self) -> &DialogSurfaces<A> {
        &self.surfaces
    }

    pub fn surfaces_mut(&mut self) -> &mut DialogSurfaces<A> {
        &mut self.surfaces
    }

    pub fn phase(&self, role: DialogRole) -> Phase {
        self.sessions[role.index()].phase()
    }

    pub fn is_open(&self, role: DialogRole) -> bool {
        self.phase(role) != Phase::Closed
    }

    /// Change how closing surfaces wait for their exit animation.
    ///
    /// A surface that is already showing finishes with the strategy it was
    /// opened with; the change applies from its next show-operation.
    pub fn set_wait_strategy(&mut self, wait: WaitStrategy) {
        self.settings.controller_wait = wait;
        for session in &mut self.sessions {
            session.set_wait_strategy(wait);
        }
    }

    /// Show an alert; resolves once the acknowledgement control is used
    pub fn show_alert(
        &mut self,
        message: &str,
        severity: impl Into<Severity>,
    ) -> DialogResult<PendingDialog<()>> {
        let role = DialogRole::Alert;
        self.ensure_available(role)?;

        let presentation = severity.into().presentation();
        let surface = self
            .surfaces
            .alert_mut()
            .ok_or(DialogError::NotInitialized(role))?;

        for class in Severity::all_classes() {
            surface.frame.remove_class(class);
        }
        surface.frame.add_class(presentation.class);
        surface.frame.icon = presentation.icon.to_string();
        surface.frame.title = presentation.title.to_string();
        surface.message = message.to_string();

        Ok(self.open(role))
    }

    /// Show a confirmation; resolves `true` for the affirmative control
    pub fn show_confirm(
        &mut self,
        message: &str,
        options: ConfirmOptions,
    ) -> DialogResult<PendingDialog<bool>> {
        let role = DialogRole::Confirm;
        self.ensure_available(role)?;

        let labels = &self.settings.labels;
        let surface = self
            .surfaces
            .confirm_mut()
            .ok_or(DialogError::NotInitialized(role))?;

        surface.frame.title = labels.confirm_title.clone();
        surface.message = message.to_string();

        let confirm_label = options.confirm_label.as_deref().unwrap_or(&labels.confirm);
        let cancel_label = options.cancel_label.as_deref().unwrap_or(&labels.cancel);
        self.adapter.set_button_text(&mut surface.cancel_button, cancel_label);
        self.adapter.set_button_text(&mut surface.confirm_button, confirm_label);

        let style = if options.is_danger() {
            ButtonStyle::Danger
        } else {
            ButtonStyle::Primary
        };
        self.adapter.set_button_style(&mut surface.confirm_button, style);

        Ok(self.open(role))
    }

    /// Show a prompt; resolves with the submitted value or `None` when cancelled
    pub fn show_prompt(
        &mut self,
        message: &str,
        options: PromptOptions,
    ) -> DialogResult<PendingDialog<Option<String>>> {
        let role = DialogRole::Prompt;
        self.ensure_available(role)?;

        let surface = self
            .surfaces
            .prompt_mut()
            .ok_or(DialogError::NotInitialized(role))?;

        surface.frame.title = self.settings.labels.prompt_title.clone();
        self.adapter.set_input_label(&mut surface.label, message);
        self.adapter.set_input_value(&mut surface.input, &options.default_value);
        self.adapter.set_input_placeholder(&mut surface.input, &options.placeholder);
        surface.error.clear();
        self.validator = options.validator;

        let pending = self.open(role);

        let focus_now = self.sessions[role.index()].schedule_focus(self.settings.focus_delay(), Instant::now());
        if focus_now {
            self.focus_prompt();
        }

        Ok(pending)
    }

    /// Show a custom dialog in button or list mode
    pub fn show_dialog(
        &mut self,
        input: impl Into<DialogInput>,
        options: CustomDialog,
    ) -> DialogResult<PendingDialog<Option<String>>> {
        let role = DialogRole::Custom;
        self.ensure_available(role)?;

        let config = input.into().resolve(options);
        let labels = &self.settings.labels;
        let surface = self
            .surfaces
            .custom_mut()
            .ok_or(DialogError::NotInitialized(role))?;

        surface.frame.icon = config.icon.clone();
        surface.frame.title = config
            .title
            .clone()
            .unwrap_or_else(|| labels.dialog_title.clone());
        surface.footer.clear();

        if config.is_list_mode() {
            let message = Some(config.message).filter(|message| !message.is_empty());
            surface.body = CustomBody::List {
                message,
                items: config.options,
            };
            surface.footer.push(FooterButton {
                control: self.adapter.create_button(&labels.cancel, ButtonStyle::Secondary),
                action: FooterAction::Cancel,
            });
        } else {
            surface.body = match config.html_body() {
                Some(html) => CustomBody::Html(html.to_string()),
                None if !config.message.is_empty() => CustomBody::Text(config.message.clone()),
                None => CustomBody::Empty,
            };

            if config.buttons.is_empty() {
                surface.footer.push(FooterButton {
                    control: self.adapter.create_button(&labels.ok, ButtonStyle::Primary),
                    action: FooterAction::Value(None),
                });
            } else {
                for button in config.buttons {
                    surface.footer.push(FooterButton {
                        control: self.adapter.create_button(&button.text, button.style),
                        action: FooterAction::Value(button.value),
                    });
                }
            }
        }

        Ok(self.open(role))
    }

    /// Feed a user interaction on `role`'s surface.
    ///
    /// Returns whether the event was consumed. Events that do not apply to the
    /// role, or arrive while the dialog is not accepting actions, are ignored.
    pub fn handle(&mut self, role: DialogRole, event: SurfaceEvent) -> bool {
        if !self.surfaces.is_registered(role) {
            return false;
        }

        let now = Instant::now();
        match event {
            SurfaceEvent::Escape => {
                let effects = self.sessions[role.index()].dismiss();
                self.apply(role, &effects);
                return true;
            }
            SurfaceEvent::AnimationEnd => {
                let effects = self.sessions[role.index()].animation_ended(now);
                let consumed = !effects.is_empty();
                self.apply(role, &effects);
                return consumed;
            }
            _ => {}
        }

        if !self.sessions[role.index()].accepts_actions() {
            trace!(%role, ?event, "surface not accepting actions");
            return false;
        }

        let outcome = match (role, event) {
            (DialogRole::Alert, SurfaceEvent::Acknowledge) => Outcome::Acknowledged,
            (DialogRole::Confirm, SurfaceEvent::Confirm) => Outcome::Confirmed(true),
            (DialogRole::Confirm, SurfaceEvent::Cancel) => Outcome::Confirmed(false),
            (DialogRole::Prompt, SurfaceEvent::Submit) => match self.submit_prompt() {
                Some(value) => Outcome::Value(Some(value)),
                // rejected by the validator, dialog stays open
                None => return true,
            },
            (DialogRole::Prompt, SurfaceEvent::Cancel) => Outcome::Value(None),
            (DialogRole::Custom, event) => match self.custom_outcome(event) {
                Some(outcome) => outcome,
                None => return false,
            },
            _ => {
                trace!(%role, ?event, "event does not apply to surface");
                return false;
            }
        };

        let exit = self.settings.animations.for_role(role).exit;
        let effects = self.sessions[role.index()].close(outcome, exit, now);
        self.apply(role, &effects);
        true
    }

    /// Fire due timers: timed exit waits and delayed prompt focus
    pub fn tick(&mut self, now: Instant) {
        for role in DialogRole::ALL {
            let fired = self.sessions[role.index()].poll_timers(now);
            self.apply(role, &fired.effects);
            if fired.focus && role == DialogRole::Prompt {
                self.focus_prompt();
            }
        }
    }

    /// Earliest instant at which `tick` has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        self.sessions.iter().filter_map(Session::next_deadline).min()
    }

    fn ensure_available(&self, role: DialogRole) -> DialogResult<()> {
        if !self.surfaces.is_registered(role) {
            warn!(%role, "dialog shown before its surface was registered");
            return Err(DialogError::NotInitialized(role));
        }
        if self.sessions[role.index()].is_busy() {
            warn!(%role, "dialog shown while a previous request is pending");
            return Err(DialogError::SurfaceBusy(role));
        }
        Ok(())
    }

    fn open<T: FromOutcome>(&mut self, role: DialogRole) -> PendingDialog<T> {
        let (request, pending) = DialogRequest::open(role);
        let entry = self.settings.animations.for_role(role).entry;
        let effects = self.sessions[role.index()].open(request, entry);
        self.apply(role, &effects);
        pending
    }

    fn apply(&mut self, role: DialogRole, effects: &[Effect]) {
        if effects.is_empty() {
            return;
        }
        if let Some(frame) = self.surfaces.frame_mut(role) {
            for effect in effects {
                frame.apply(effect);
            }
        }
    }

    fn focus_prompt(&mut self) {
        if let Some(surface) = self.surfaces.prompt_mut() {
            self.adapter.focus_input(&mut surface.input);
        }
    }

    /// Validate the prompt value; `None` keeps the dialog open
    fn submit_prompt(&mut self) -> Option<String> {
        let surface = self.surfaces.prompt_mut()?;
        let value = self.adapter.input_value(&surface.input);

        if let Some(error) = self.validator.as_ref().and_then(|v| v.check(&value)) {
            debug!(%error, "prompt value rejected");
            surface.error.show(error);
            self.adapter.focus_input(&mut surface.input);
            return None;
        }

        Some(value)
    }

    fn custom_outcome(&self, event: SurfaceEvent) -> Option<Outcome> {
        let surface = self.surfaces.custom()?;
        match (event, &surface.body) {
            (SurfaceEvent::ListItem(index), CustomBody::List { items, .. }) => items
                .get(index)
                .map(|item| Outcome::Value(Some(item.value.clone()))),
            (SurfaceEvent::Cancel, CustomBody::List { .. }) => Some(Outcome::Value(None)),
            (SurfaceEvent::Button(index), _) => {
                surface.footer.get(index).map(|button| match &button.action {
                    FooterAction::Value(value) => {
                        Outcome::Value(Some(resolve_button_value(value.as_deref())))
                    }
                    FooterAction::Cancel => Outcome::Value(None),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::FormInput;
    use crate::config::Labels;
    use crate::dialog::{DialogButton, ListOption, CLOSING_CLASS};
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn controller() -> DialogController {
        DialogController::init(DialogSurfaces::standard(&Labels::default()))
    }

    fn finish(controller: &mut DialogController, role: DialogRole) {
        assert!(controller.handle(role, SurfaceEvent::AnimationEnd));
    }

    fn type_into_prompt(controller: &mut DialogController, value: &str) {
        controller.surfaces_mut().prompt_mut().unwrap().input.type_text(value);
    }

    #[test]
    fn test_show_before_registration_fails_fast() {
        let labels = Labels::default();
        let mut controller = DialogController::init(
            DialogSurfaces::new().with_alert(AlertSurface::build(&FormAdapter, &labels)),
        );

        let err = controller
            .show_confirm("Continue?", ConfirmOptions::default())
            .unwrap_err();
        assert_eq!(err, DialogError::NotInitialized(DialogRole::Confirm));
        assert!(!controller.is_open(DialogRole::Confirm));
        assert!(controller.show_alert("still works", Severity::Info).is_ok());
    }

    #[test]
    fn test_init_suppresses_cancel_on_registered_surfaces() {
        let controller = controller();
        for role in DialogRole::ALL {
            assert!(controller.surfaces().frame(role).unwrap().suppresses_cancel());
        }
    }

    #[tokio::test]
    async fn test_alert_presentation_and_resolution() {
        let mut controller = controller();
        let pending = controller.show_alert("Saved", "success").unwrap();

        let surface = controller.surfaces().alert().unwrap();
        assert!(surface.frame.is_open());
        assert_eq!(surface.frame.title, "Success");
        assert_eq!(surface.message, "Saved");
        assert!(surface.frame.has_class("alert-success"));
        assert!(surface.frame.has_class("animate__fadeInDown"));

        assert!(controller.handle(DialogRole::Alert, SurfaceEvent::Acknowledge));
        let frame = &controller.surfaces().alert().unwrap().frame;
        assert!(frame.has_class("animate__fadeOutUp"));
        assert!(frame.has_class(CLOSING_CLASS));
        assert!(frame.is_open());

        finish(&mut controller, DialogRole::Alert);
        assert!(!controller.surfaces().alert().unwrap().frame.is_open());
        assert_eq!(pending.await, Ok(()));
    }

    #[test]
    fn test_unknown_severity_uses_info_presentation() {
        let mut controller = controller();
        let _first = controller.show_alert("boom", "error").unwrap();
        controller.handle(DialogRole::Alert, SurfaceEvent::Acknowledge);
        finish(&mut controller, DialogRole::Alert);

        let _second = controller.show_alert("hmm", "warning").unwrap();
        let frame = &controller.surfaces().alert().unwrap().frame;
        assert_eq!(frame.title, "Notice");
        assert!(frame.has_class("alert-info"));
        assert!(!frame.has_class("alert-error"));
    }

    #[tokio::test]
    async fn test_confirm_resolves_true_only_for_affirmative() {
        let mut controller = controller();

        let yes = controller.show_confirm("Delete?", ConfirmOptions::danger()).unwrap();
        let surface = controller.surfaces().confirm().unwrap();
        assert_eq!(surface.confirm_button.style, ButtonStyle::Danger);
        assert_eq!(surface.confirm_button.text, "Confirm");
        controller.handle(DialogRole::Confirm, SurfaceEvent::Confirm);
        finish(&mut controller, DialogRole::Confirm);
        assert_eq!(yes.await, Ok(true));

        let no = controller
            .show_confirm(
                "Keep?",
                ConfirmOptions::new()
                    .with_confirm_label("Keep")
                    .with_cancel_label("Discard"),
            )
            .unwrap();
        let surface = controller.surfaces().confirm().unwrap();
        assert_eq!(surface.confirm_button.style, ButtonStyle::Primary);
        assert_eq!(surface.confirm_button.text, "Keep");
        assert_eq!(surface.cancel_button.text, "Discard");
        controller.handle(DialogRole::Confirm, SurfaceEvent::Cancel);
        finish(&mut controller, DialogRole::Confirm);
        assert_eq!(no.await, Ok(false));
    }

    #[test]
    fn test_escape_never_resolves() {
        let mut controller = controller();
        let mut pending = controller.show_confirm("Sure?", ConfirmOptions::default()).unwrap();

        assert!(controller.handle(DialogRole::Confirm, SurfaceEvent::Escape));
        assert!(controller.handle(DialogRole::Confirm, SurfaceEvent::Escape));
        assert!(!controller.handle(DialogRole::Confirm, SurfaceEvent::AnimationEnd));
        controller.tick(Instant::now() + Duration::from_secs(60));

        assert_eq!(controller.phase(DialogRole::Confirm), Phase::Open);
        assert_eq!(pending.try_result(), None);
    }

    #[test]
    fn test_second_action_after_terminal_is_ignored() {
        let mut controller = controller();
        let mut pending = controller.show_confirm("Sure?", ConfirmOptions::default()).unwrap();

        assert!(controller.handle(DialogRole::Confirm, SurfaceEvent::Cancel));
        assert!(!controller.handle(DialogRole::Confirm, SurfaceEvent::Confirm));
        finish(&mut controller, DialogRole::Confirm);
        assert_eq!(pending.try_result(), Some(Ok(false)));
    }

    #[test]
    fn test_busy_surface_rejects_second_show() {
        let mut controller = controller();
        let mut first = controller.show_confirm("One?", ConfirmOptions::default()).unwrap();

        let err = controller.show_confirm("Two?", ConfirmOptions::default()).unwrap_err();
        assert_eq!(err, DialogError::SurfaceBusy(DialogRole::Confirm));
        assert_eq!(controller.surfaces().confirm().unwrap().message, "One?");

        controller.handle(DialogRole::Confirm, SurfaceEvent::Confirm);
        assert_eq!(
            controller.show_confirm("Two?", ConfirmOptions::default()).unwrap_err(),
            DialogError::SurfaceBusy(DialogRole::Confirm)
        );
        finish(&mut controller, DialogRole::Confirm);
        assert_eq!(first.try_result(), Some(Ok(true)));
        assert!(controller.show_confirm("Two?", ConfirmOptions::default()).is_ok());
    }

    #[test]
    fn test_prompt_validation_loop() {
        let mut controller = controller();
        let mut pending = controller
            .show_prompt(
                "Name",
                PromptOptions::new().with_validator(|value| {
                    value.is_empty().then(|| "Name is required".to_string())
                }),
            )
            .unwrap();

        assert!(controller.handle(DialogRole::Prompt, SurfaceEvent::Submit));
        let surface = controller.surfaces().prompt().unwrap();
        assert!(surface.error.visible);
        assert_eq!(surface.error.text, "Name is required");
        assert!(surface.input.focused);
        assert_eq!(controller.phase(DialogRole::Prompt), Phase::Open);
        assert_eq!(pending.try_result(), None);

        type_into_prompt(&mut controller, "x");
        assert!(controller.handle(DialogRole::Prompt, SurfaceEvent::Submit));
        finish(&mut controller, DialogRole::Prompt);
        assert_eq!(pending.try_result(), Some(Ok(Some("x".to_string()))));
    }

    #[test]
    fn test_prompt_cancel_is_distinct_from_empty_value() {
        let mut controller = controller();

        let mut cancelled = controller.show_prompt("Name", PromptOptions::new()).unwrap();
        controller.handle(DialogRole::Prompt, SurfaceEvent::Cancel);
        finish(&mut controller, DialogRole::Prompt);
        assert_eq!(cancelled.try_result(), Some(Ok(None)));

        let mut empty = controller.show_prompt("Name", PromptOptions::new()).unwrap();
        controller.handle(DialogRole::Prompt, SurfaceEvent::Submit);
        finish(&mut controller, DialogRole::Prompt);
        assert_eq!(empty.try_result(), Some(Ok(Some(String::new()))));
    }

    #[test]
    fn test_prompt_state_is_reset_between_shows() {
        let mut controller = controller();
        let _first = controller
            .show_prompt(
                "Name",
                PromptOptions::new()
                    .with_default_value("draft")
                    .with_placeholder("Your name")
                    .with_validator(|_| Some("always wrong".to_string())),
            )
            .unwrap();
        controller.handle(DialogRole::Prompt, SurfaceEvent::Submit);
        assert!(controller.surfaces().prompt().unwrap().error.visible);
        controller.handle(DialogRole::Prompt, SurfaceEvent::Cancel);
        finish(&mut controller, DialogRole::Prompt);

        let mut second = controller.show_prompt("City", PromptOptions::new()).unwrap();
        let surface = controller.surfaces().prompt().unwrap();
        assert!(!surface.error.visible);
        assert!(surface.error.text.is_empty());
        assert_eq!(surface.label.text, "City");
        assert_eq!(surface.input.value, "");
        assert_eq!(surface.input.placeholder, "");

        controller.handle(DialogRole::Prompt, SurfaceEvent::Submit);
        finish(&mut controller, DialogRole::Prompt);
        assert_eq!(second.try_result(), Some(Ok(Some(String::new()))));
    }

    #[test]
    fn test_prompt_focus_is_delayed() {
        let mut controller = controller();
        let _pending = controller.show_prompt("Name", PromptOptions::new()).unwrap();
        assert!(!controller.surfaces().prompt().unwrap().input.focused);

        let deadline = controller.next_deadline().unwrap();
        controller.tick(deadline);
        let input: &FormInput = &controller.surfaces().prompt().unwrap().input;
        assert!(input.focused && input.selected);
    }

    #[tokio::test]
    async fn test_custom_buttons_resolve_with_value() {
        let mut controller = controller();
        let pending = controller
            .show_dialog(
                "Pick one",
                CustomDialog::new()
                    .with_button(DialogButton::new("A").with_value("a"))
                    .with_button(DialogButton::new("B").with_value("b")),
            )
            .unwrap();

        let surface = controller.surfaces().custom().unwrap();
        assert_eq!(surface.body, CustomBody::Text("Pick one".to_string()));
        assert_eq!(surface.footer[1].control.text, "B");
        assert_eq!(surface.frame.title, "Dialog");

        controller.handle(DialogRole::Custom, SurfaceEvent::Button(1));
        finish(&mut controller, DialogRole::Custom);
        assert_eq!(pending.await, Ok(Some("b".to_string())));
    }

    #[tokio::test]
    async fn test_custom_default_button_resolves_ok() {
        let mut controller = controller();
        let pending = controller
            .show_dialog(
                CustomDialog::new()
                    .with_title("About")
                    .with_message("ignored")
                    .with_html("<b>v1</b>"),
                CustomDialog::default(),
            )
            .unwrap();

        let surface = controller.surfaces().custom().unwrap();
        assert_eq!(surface.body, CustomBody::Html("<b>v1</b>".to_string()));
        assert_eq!(surface.footer.len(), 1);
        assert_eq!(surface.footer[0].control.style, ButtonStyle::Primary);

        assert!(!controller.handle(DialogRole::Custom, SurfaceEvent::Button(3)));
        controller.handle(DialogRole::Custom, SurfaceEvent::Button(0));
        finish(&mut controller, DialogRole::Custom);
        assert_eq!(pending.await, Ok(Some("ok".to_string())));
    }

    #[test]
    fn test_custom_list_mode() {
        let mut controller = controller();
        let options = || {
            CustomDialog::new().with_options(vec![
                ListOption::new("1", "One"),
                ListOption::new("2", "Two"),
            ])
        };

        let mut selected = controller.show_dialog("Choose", options()).unwrap();
        let surface = controller.surfaces().custom().unwrap();
        assert!(surface.is_list_mode());
        assert_eq!(surface.footer.len(), 1);
        assert_eq!(surface.footer[0].action, FooterAction::Cancel);
        assert!(!controller.handle(DialogRole::Custom, SurfaceEvent::ListItem(5)));
        controller.handle(DialogRole::Custom, SurfaceEvent::ListItem(1));
        finish(&mut controller, DialogRole::Custom);
        assert_eq!(selected.try_result(), Some(Ok(Some("2".to_string()))));

        let mut cancelled = controller.show_dialog("Choose", options()).unwrap();
        controller.handle(DialogRole::Custom, SurfaceEvent::Button(0));
        finish(&mut controller, DialogRole::Custom);
        assert_eq!(cancelled.try_result(), Some(Ok(None)));
    }

    #[test]
    fn test_list_mode_without_options_falls_back_to_buttons() {
        let mut controller = controller();
        let mut config = CustomDialog::new();
        config.mode = crate::dialog::CustomMode::List;

        let _pending = controller.show_dialog("Nothing to pick", config).unwrap();
        let surface = controller.surfaces().custom().unwrap();
        assert!(!surface.is_list_mode());
        assert_eq!(surface.footer[0].action, FooterAction::Value(None));
    }

    #[test]
    fn test_timeout_wait_strategy() {
        let mut controller = controller();
        controller.set_wait_strategy(WaitStrategy::Timeout { millis: 300 });

        let mut pending = controller.show_alert("hi", Severity::Info).unwrap();
        controller.handle(DialogRole::Alert, SurfaceEvent::Acknowledge);
        assert!(!controller.handle(DialogRole::Alert, SurfaceEvent::AnimationEnd));
        assert_eq!(pending.try_result(), None);

        controller.tick(Instant::now() + Duration::from_millis(400));
        assert_eq!(pending.try_result(), Some(Ok(())));
    }

    #[test]
    fn test_wait_strategy_change_while_closing() {
        let mut controller = controller();
        let mut pending = controller.show_alert("hi", Severity::Info).unwrap();
        controller.handle(DialogRole::Alert, SurfaceEvent::Acknowledge);

        controller.set_wait_strategy(WaitStrategy::Timeout { millis: 300 });
        controller.tick(Instant::now() + Duration::from_secs(5));
        assert_eq!(pending.try_result(), None);
        finish(&mut controller, DialogRole::Alert);
        assert_eq!(pending.try_result(), Some(Ok(())));

        let mut next = controller.show_alert("again", Severity::Info).unwrap();
        controller.handle(DialogRole::Alert, SurfaceEvent::Acknowledge);
        assert!(controller.next_deadline().is_some());
        controller.tick(Instant::now() + Duration::from_secs(1));
        assert_eq!(next.try_result(), Some(Ok(())));
    }

    #[test]
    fn test_immediate_wait_strategy() {
        let mut controller = controller();
        controller.set_wait_strategy(WaitStrategy::Immediate);

        let pending = controller.show_confirm("Go?", ConfirmOptions::default()).unwrap();
        controller.handle(DialogRole::Confirm, SurfaceEvent::Confirm);
        assert!(!controller.is_open(DialogRole::Confirm));
        assert_eq!(pending.now_or_never(), Some(Ok(true)));
    }

    #[test]
    fn test_dropping_controller_abandons_request() {
        let mut controller = controller();
        let pending = controller.show_alert("bye", Severity::Info).unwrap();
        drop(controller);
        assert_eq!(
            pending.now_or_never(),
            Some(Err(DialogError::Abandoned(DialogRole::Alert)))
        );
    }

    /// Adapter that counts focus requests, standing in for a component library
    #[derive(Default)]
    struct CountingAdapter {
        focus_calls: AtomicUsize,
    }

    impl DialogAdapter for CountingAdapter {
        type Button = String;
        type Input = String;
        type Label = String;

        fn create_button(&self, text: &str, style: ButtonStyle) -> String {
            format!("{}:{}", style.as_str(), text)
        }

        fn set_button_style(&self, button: &mut String, style: ButtonStyle) {
            let text = button.split_once(':').map(|(_, t)| t.to_string()).unwrap_or_default();
            *button = format!("{}:{}", style.as_str(), text);
        }

        fn set_button_text(&self, button: &mut String, text: &str) {
            let style = button.split_once(':').map(|(s, _)| s.to_string()).unwrap_or_default();
            *button = format!("{}:{}", style, text);
        }

        fn input_value(&self, input: &String) -> String {
            input.clone()
        }

        fn set_input_value(&self, input: &mut String, value: &str) {
            *input = value.to_string();
        }

        fn set_input_placeholder(&self, _input: &mut String, _placeholder: &str) {}

        fn set_input_label(&self, label: &mut String, text: &str) {
            *label = text.to_string();
        }

        fn focus_input(&self, _input: &mut String) {
            self.focus_calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_custom_adapter_drives_controls() {
        let labels = Labels::default();
        let adapter = CountingAdapter::default();
        let surfaces = DialogSurfaces::new()
            .with_confirm(ConfirmSurface::build(&adapter, &labels))
            .with_prompt(PromptSurface::build(&adapter, &labels, String::new(), String::new()));
        let mut settings = DialogSettings::default();
        settings.focus_delay_ms = 0;
        settings.controller_wait = WaitStrategy::Immediate;
        let mut controller = DialogController::new(surfaces, adapter, settings);

        let _confirm = controller.show_confirm("Drop table?", ConfirmOptions::danger()).unwrap();
        assert_eq!(
            controller.surfaces().confirm().unwrap().confirm_button,
            "danger:Confirm"
        );

        let mut prompt = controller
            .show_prompt("Table", PromptOptions::new().with_default_value("users"))
            .unwrap();
        assert_eq!(controller.adapter().focus_calls.load(Ordering::SeqCst), 1);
        controller.handle(DialogRole::Prompt, SurfaceEvent::Submit);
        assert_eq!(prompt.try_result(), Some(Ok(Some("users".to_string()))));
    }
}
