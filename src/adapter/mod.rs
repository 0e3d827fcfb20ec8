//! Adapter seam between dialog logic and a UI component library
//!
//! The controller never touches buttons or inputs directly; it asks the adapter
//! to build and manipulate them. A component library gets support by
//! implementing [`DialogAdapter`] for its own control types.

mod form;

pub use form::{FormAdapter, FormButton, FormInput, FormLabel};

use crate::dialog::ButtonStyle;
use std::fmt::Debug;

/// Button and input primitives of a UI component library
pub trait DialogAdapter: Send + Sync {
    type Button: Debug + Send;
    type Input: Debug + Send;
    type Label: Debug + Send;

    /// Construct a button control with the given label and style
    fn create_button(&self, text: &str, style: ButtonStyle) -> Self::Button;

    /// Restyle an existing button
    fn set_button_style(&self, button: &mut Self::Button, style: ButtonStyle);

    /// Replace the label of an existing button
    fn set_button_text(&self, button: &mut Self::Button, text: &str);

    fn input_value(&self, input: &Self::Input) -> String;

    fn set_input_value(&self, input: &mut Self::Input, value: &str);

    fn set_input_placeholder(&self, input: &mut Self::Input, placeholder: &str);

    fn set_input_label(&self, label: &mut Self::Label, text: &str);

    /// Move focus to the input and select its contents
    fn focus_input(&self, input: &mut Self::Input);
}
