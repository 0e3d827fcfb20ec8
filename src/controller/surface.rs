//! Dialog surfaces driven by the imperative controller
//!
//! A surface is the pre-built modal region for one role: a [`ModalFrame`]
//! (visibility, class list, icon and title) plus the controls that role needs,
//! built through the adapter so they belong to the caller's component library.

use crate::adapter::{DialogAdapter, FormAdapter, FormInput, FormLabel};
use crate::config::Labels;
use crate::dialog::{
    Animation, ButtonStyle, DialogRole, Effect, ListOption, ANIMATED_CLASS, CLOSING_CLASS,
};
use std::collections::BTreeSet;

/// The modal element shared by every surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalFrame {
    classes: BTreeSet<String>,
    open: bool,
    cancel_suppressed: bool,
    pub icon: String,
    pub title: String,
}

impl ModalFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn show_modal(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Space separated class attribute
    pub fn class_name(&self) -> String {
        self.classes().collect::<Vec<_>>().join(" ")
    }

    /// Whether platform dismissal (escape) is intercepted on this surface
    pub fn suppresses_cancel(&self) -> bool {
        self.cancel_suppressed
    }

    pub(crate) fn suppress_cancel(&mut self) {
        self.cancel_suppressed = true;
    }

    fn clear_animation_classes(&mut self) {
        self.classes.retain(|class| !Animation::is_animation_class(class));
    }

    /// Apply a surface-level lifecycle effect
    pub(crate) fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::ApplyAnimation(animation) => {
                self.clear_animation_classes();
                self.remove_class(CLOSING_CLASS);
                self.add_class(ANIMATED_CLASS);
                self.add_class(&animation.class());
            }
            Effect::MarkClosing => self.add_class(CLOSING_CLASS),
            Effect::ClearAnimation => {
                self.clear_animation_classes();
                self.remove_class(CLOSING_CLASS);
            }
            Effect::ShowModal => self.show_modal(),
            Effect::HideModal => self.close(),
            Effect::SuppressDismiss | Effect::AwaitExit | Effect::Resolve(_) => {}
        }
    }
}

/// Error line under the prompt input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLine {
    pub text: String,
    pub visible: bool,
}

impl ErrorLine {
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.visible = true;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.visible = false;
    }
}

pub struct AlertSurface<A: DialogAdapter> {
    pub frame: ModalFrame,
    pub message: String,
    pub ok_button: A::Button,
}

impl<A: DialogAdapter> AlertSurface<A> {
    pub fn new(ok_button: A::Button) -> Self {
        Self {
            frame: ModalFrame::new(),
            message: String::new(),
            ok_button,
        }
    }

    pub fn build(adapter: &A, labels: &Labels) -> Self {
        Self::new(adapter.create_button(&labels.ok, ButtonStyle::Primary))
    }
}

pub struct ConfirmSurface<A: DialogAdapter> {
    pub frame: ModalFrame,
    pub message: String,
    pub confirm_button: A::Button,
    pub cancel_button: A::Button,
}

impl<A: DialogAdapter> ConfirmSurface<A> {
    pub fn new(confirm_button: A::Button, cancel_button: A::Button) -> Self {
        Self {
            frame: ModalFrame::new(),
            message: String::new(),
            confirm_button,
            cancel_button,
        }
    }

    pub fn build(adapter: &A, labels: &Labels) -> Self {
        Self::new(
            adapter.create_button(&labels.confirm, ButtonStyle::Primary),
            adapter.create_button(&labels.cancel, ButtonStyle::Secondary),
        )
    }
}

pub struct PromptSurface<A: DialogAdapter> {
    pub frame: ModalFrame,
    pub label: A::Label,
    pub input: A::Input,
    pub error: ErrorLine,
    pub submit_button: A::Button,
    pub cancel_button: A::Button,
}

impl<A: DialogAdapter> PromptSurface<A> {
    pub fn new(
        label: A::Label,
        input: A::Input,
        submit_button: A::Button,
        cancel_button: A::Button,
    ) -> Self {
        Self {
            frame: ModalFrame::new(),
            label,
            input,
            error: ErrorLine::default(),
            submit_button,
            cancel_button,
        }
    }

    /// Build the buttons through the adapter around caller-provided input controls
    pub fn build(adapter: &A, labels: &Labels, label: A::Label, input: A::Input) -> Self {
        Self::new(
            label,
            input,
            adapter.create_button(&labels.confirm, ButtonStyle::Primary),
            adapter.create_button(&labels.cancel, ButtonStyle::Secondary),
        )
    }
}

/// Body of a custom dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CustomBody {
    #[default]
    Empty,
    Text(String),
    Html(String),
    List {
        message: Option<String>,
        items: Vec<ListOption>,
    },
}

/// What a footer button does when clicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterAction {
    /// Resolve with the value, `"ok"` when absent
    Value(Option<String>),
    /// Resolve with no value
    Cancel,
}

#[derive(Debug)]
pub struct FooterButton<B> {
    pub control: B,
    pub action: FooterAction,
}

pub struct CustomSurface<A: DialogAdapter> {
    pub frame: ModalFrame,
    pub body: CustomBody,
    pub footer: Vec<FooterButton<A::Button>>,
}

impl<A: DialogAdapter> CustomSurface<A> {
    pub fn new() -> Self {
        Self {
            frame: ModalFrame::new(),
            body: CustomBody::Empty,
            footer: Vec::new(),
        }
    }

    pub fn is_list_mode(&self) -> bool {
        matches!(self.body, CustomBody::List { .. })
    }
}

impl<A: DialogAdapter> Default for CustomSurface<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of the surfaces a controller may drive
pub struct DialogSurfaces<A: DialogAdapter> {
    alert: Option<AlertSurface<A>>,
    confirm: Option<ConfirmSurface<A>>,
    prompt: Option<PromptSurface<A>>,
    custom: Option<CustomSurface<A>>,
}

impl<A: DialogAdapter> DialogSurfaces<A> {
    pub fn new() -> Self {
        Self {
            alert: None,
            confirm: None,
            prompt: None,
            custom: None,
        }
    }

    pub fn with_alert(mut self, surface: AlertSurface<A>) -> Self {
        self.alert = Some(surface);
        self
    }

    pub fn with_confirm(mut self, surface: ConfirmSurface<A>) -> Self {
        self.confirm = Some(surface);
        self
    }

    pub fn with_prompt(mut self, surface: PromptSurface<A>) -> Self {
        self.prompt = Some(surface);
        self
    }

    pub fn with_custom(mut self, surface: CustomSurface<A>) -> Self {
        self.custom = Some(surface);
        self
    }

    pub fn is_registered(&self, role: DialogRole) -> bool {
        self.frame(role).is_some()
    }

    pub fn roles(&self) -> Vec<DialogRole> {
        DialogRole::ALL
            .into_iter()
            .filter(|role| self.is_registered(*role))
            .collect()
    }

    pub fn frame(&self, role: DialogRole) -> Option<&ModalFrame> {
        match role {
            DialogRole::Alert => self.alert.as_ref().map(|s| &s.frame),
            DialogRole::Confirm => self.confirm.as_ref().map(|s| &s.frame),
            DialogRole::Prompt => self.prompt.as_ref().map(|s| &s.frame),
            DialogRole::Custom => self.custom.as_ref().map(|s| &s.frame),
        }
    }

    pub fn frame_mut(&mut self, role: DialogRole) -> Option<&mut ModalFrame> {
        match role {
            DialogRole::Alert => self.alert.as_mut().map(|s| &mut s.frame),
            DialogRole::Confirm => self.confirm.as_mut().map(|s| &mut s.frame),
            DialogRole::Prompt => self.prompt.as_mut().map(|s| &mut s.frame),
            DialogRole::Custom => self.custom.as_mut().map(|s| &mut s.frame),
        }
    }

    pub fn alert(&self) -> Option<&AlertSurface<A>> {
        self.alert.as_ref()
    }

    pub fn alert_mut(&mut self) -> Option<&mut AlertSurface<A>> {
        self.alert.as_mut()
    }

    pub fn confirm(&self) -> Option<&ConfirmSurface<A>> {
        self.confirm.as_ref()
    }

    pub fn confirm_mut(&mut self) -> Option<&mut ConfirmSurface<A>> {
        self.confirm.as_mut()
    }

    pub fn prompt(&self) -> Option<&PromptSurface<A>> {
        self.prompt.as_ref()
    }

    pub fn prompt_mut(&mut self) -> Option<&mut PromptSurface<A>> {
        self.prompt.as_mut()
    }

    pub fn custom(&self) -> Option<&CustomSurface<A>> {
        self.custom.as_ref()
    }

    pub fn custom_mut(&mut self) -> Option<&mut CustomSurface<A>> {
        self.custom.as_mut()
    }
}

impl<A: DialogAdapter> Default for DialogSurfaces<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogSurfaces<FormAdapter> {
    /// All four surfaces built from plain form controls
    pub fn standard(labels: &Labels) -> Self {
        let adapter = FormAdapter;
        Self::new()
            .with_alert(AlertSurface::build(&adapter, labels))
            .with_confirm(ConfirmSurface::build(&adapter, labels))
            .with_prompt(PromptSurface::build(
                &adapter,
                labels,
                FormLabel::default(),
                FormInput::default(),
            ))
            .with_custom(CustomSurface::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_animation_effects() {
        let mut frame = ModalFrame::new();
        frame.add_class("alert-info");

        frame.apply(&Effect::ApplyAnimation(Animation::ZoomIn));
        frame.apply(&Effect::ShowModal);
        assert!(frame.is_open());
        assert_eq!(frame.class_name(), "alert-info animate__animated animate__zoomIn");

        frame.apply(&Effect::ApplyAnimation(Animation::ZoomOut));
        frame.apply(&Effect::MarkClosing);
        assert!(!frame.has_class("animate__zoomIn"));
        assert!(frame.has_class("animate__zoomOut"));
        assert!(frame.has_class(CLOSING_CLASS));

        frame.apply(&Effect::ClearAnimation);
        frame.apply(&Effect::HideModal);
        assert!(!frame.is_open());
        assert_eq!(frame.class_name(), "alert-info");
    }

    #[test]
    fn test_reopening_strips_stale_closing_marker() {
        let mut frame = ModalFrame::new();
        frame.add_class(CLOSING_CLASS);
        frame.apply(&Effect::ApplyAnimation(Animation::FadeIn));
        assert!(!frame.has_class(CLOSING_CLASS));
    }

    #[test]
    fn test_registry_roles() {
        let labels = Labels::default();
        let surfaces = DialogSurfaces::<FormAdapter>::new()
            .with_alert(AlertSurface::build(&FormAdapter, &labels));
        assert_eq!(surfaces.roles(), vec![DialogRole::Alert]);
        assert!(!surfaces.is_registered(DialogRole::Prompt));

        let standard = DialogSurfaces::standard(&labels);
        assert_eq!(standard.roles(), DialogRole::ALL.to_vec());
        assert_eq!(standard.confirm().unwrap().cancel_button.text, "Cancel");
    }
}
