//! Default adapter over plain form controls

use super::DialogAdapter;
use crate::dialog::ButtonStyle;

/// A plain `<button type="button" class="btn btn-…">`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormButton {
    pub text: String,
    pub style: ButtonStyle,
    pub class_name: String,
}

/// A plain text input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub value: String,
    pub placeholder: String,
    pub focused: bool,
    /// Whether the whole value is selected
    pub selected: bool,
}

impl FormInput {
    /// Replace the value as a user typing would, dropping any selection
    pub fn type_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.selected = false;
    }
}

/// A plain `<label>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormLabel {
    pub text: String,
}

/// Adapter used when none is supplied
#[derive(Debug, Clone, Copy, Default)]
pub struct FormAdapter;

impl DialogAdapter for FormAdapter {
    type Button = FormButton;
    type Input = FormInput;
    type Label = FormLabel;

    fn create_button(&self, text: &str, style: ButtonStyle) -> FormButton {
        FormButton {
            text: text.to_string(),
            style,
            class_name: style.class_name(),
        }
    }

    fn set_button_style(&self, button: &mut FormButton, style: ButtonStyle) {
        button.style = style;
        button.class_name = style.class_name();
    }

    fn set_button_text(&self, button: &mut FormButton, text: &str) {
        button.text = text.to_string();
    }

    fn input_value(&self, input: &FormInput) -> String {
        input.value.clone()
    }

    fn set_input_value(&self, input: &mut FormInput, value: &str) {
        input.value = value.to_string();
    }

    fn set_input_placeholder(&self, input: &mut FormInput, placeholder: &str) {
        input.placeholder = placeholder.to_string();
    }

    fn set_input_label(&self, label: &mut FormLabel, text: &str) {
        label.text = text.to_string();
    }

    fn focus_input(&self, input: &mut FormInput) {
        input.focused = true;
        input.selected = true;
    }
}
