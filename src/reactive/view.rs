//! Pure presentation of a dialog snapshot
//!
//! [`render`] turns a [`DialogSnapshot`] into a small element tree. Interactive
//! nodes carry the [`DialogAction`] they emit, so any front end that can draw the
//! tree can drive the store without knowing dialog semantics.

use super::{DialogAction, DialogConfig, DialogSnapshot};
use crate::dialog::{DialogRole, CLOSING_CLASS, DEFAULT_BUTTON_VALUE};
use std::collections::BTreeMap;

/// One element of the rendered dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewNode {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<&'static str, String>,
    pub text: Option<String>,
    pub children: Vec<ViewNode>,
    pub on_click: Option<DialogAction>,
    pub on_submit: Option<DialogAction>,
    /// Editing this node emits [`DialogAction::InputChange`]
    pub emits_input: bool,
}

impl ViewNode {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.insert(name, value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn on_click(mut self, action: DialogAction) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Depth-first search for the first node carrying `class`
    pub fn find_by_class(&self, class: &str) -> Option<&ViewNode> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_by_class(class))
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&ViewNode> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_by_tag(tag))
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    /// Clickable nodes in document order
    pub fn clickables(&self) -> Vec<&ViewNode> {
        let mut found = Vec::new();
        self.collect_clickables(&mut found);
        found
    }

    fn collect_clickables<'a>(&'a self, found: &mut Vec<&'a ViewNode>) {
        if self.on_click.is_some() {
            found.push(self);
        }
        for child in &self.children {
            child.collect_clickables(found);
        }
    }

    /// The first node whose edits emit input changes
    pub fn input(&self) -> Option<&ViewNode> {
        if self.emits_input {
            return Some(self);
        }
        self.children.iter().find_map(ViewNode::input)
    }

    /// The action emitted when the enclosing form is submitted
    pub fn submit_action(&self) -> Option<&DialogAction> {
        self.on_submit
            .as_ref()
            .or_else(|| self.children.iter().find_map(ViewNode::submit_action))
    }
}

/// Render the dialog, or `None` while it is closed
pub fn render(snapshot: &DialogSnapshot) -> Option<ViewNode> {
    if !snapshot.is_open {
        return None;
    }

    let config = &snapshot.config;
    let mut dialog = ViewNode::new("dialog")
        .class("dialog-container")
        .attr("open", "")
        .attr("data-role", snapshot.dialog_type.as_str());

    if snapshot.dialog_type == DialogRole::Alert {
        dialog = dialog.class(config.alert_type.presentation().class);
    }
    dialog = dialog.class(&snapshot.animation_class);
    if snapshot.is_closing {
        dialog = dialog.class(CLOSING_CLASS);
    }

    let content = match snapshot.dialog_type {
        DialogRole::Alert => render_alert(config),
        DialogRole::Confirm => render_confirm(config),
        DialogRole::Prompt => render_prompt(config, snapshot.input_focused),
        DialogRole::Custom if config.is_list_mode => render_list(config),
        DialogRole::Custom => render_custom(config),
    };

    Some(dialog.children(content))
}

fn header(config: &DialogConfig) -> ViewNode {
    ViewNode::new("div")
        .class("dialog-header")
        .child(ViewNode::new("span").class("dialog-icon").text(&config.icon))
        .child(ViewNode::new("h6").class("dialog-title").text(&config.title))
}

fn button(class: &str, label: &str, action: DialogAction) -> ViewNode {
    ViewNode::new("button")
        .attr("type", "button")
        .class(class)
        .text(label)
        .on_click(action)
}

fn message(config: &DialogConfig) -> ViewNode {
    ViewNode::new("p").class("message").text(&config.message)
}

fn render_alert(config: &DialogConfig) -> Vec<ViewNode> {
    vec![
        header(config),
        ViewNode::new("div").class("dialog-body").child(message(config)),
        ViewNode::new("div").class("dialog-footer").child(button(
            "btn btn-primary",
            &config.ok_text,
            DialogAction::AlertOk,
        )),
    ]
}

fn render_confirm(config: &DialogConfig) -> Vec<ViewNode> {
    let confirm_class = if config.is_danger {
        "btn btn-danger"
    } else {
        "btn btn-primary"
    };

    vec![
        header(config),
        ViewNode::new("div").class("dialog-body").child(message(config)),
        ViewNode::new("div")
            .class("dialog-footer")
            .child(button(
                "btn btn-secondary",
                &config.cancel_text,
                DialogAction::ConfirmCancel,
            ))
            .child(button(confirm_class, &config.confirm_text, DialogAction::ConfirmOk)),
    ]
}

fn render_prompt(config: &DialogConfig, focused: bool) -> Vec<ViewNode> {
    let mut input = ViewNode::new("input")
        .attr("type", "text")
        .class("form-control")
        .attr("value", &config.input_value)
        .attr("placeholder", &config.placeholder);
    input.emits_input = true;
    if focused {
        input = input.attr("data-focused", "");
    }

    let mut body = ViewNode::new("div")
        .class("dialog-body")
        .child(ViewNode::new("label").class("form-label message").text(&config.message))
        .child(input);
    if !config.error_message.is_empty() {
        body = body.child(
            ViewNode::new("div")
                .class("error-message show")
                .text(&config.error_message),
        );
    }

    let submit = ViewNode::new("button")
        .attr("type", "submit")
        .class("btn btn-primary")
        .text(&config.confirm_text)
        .on_click(DialogAction::PromptOk);

    let mut form = ViewNode::new("form")
        .child(header(config))
        .child(body)
        .child(
            ViewNode::new("div")
                .class("dialog-footer")
                .child(button(
                    "btn btn-secondary",
                    &config.cancel_text,
                    DialogAction::PromptCancel,
                ))
                .child(submit),
        );
    form.on_submit = Some(DialogAction::PromptOk);

    vec![form]
}

fn render_list(config: &DialogConfig) -> Vec<ViewNode> {
    let mut body = ViewNode::new("div").class("dialog-body");
    if !config.message.is_empty() {
        body = body.child(ViewNode::new("p").class("mb-3").text(&config.message));
    }

    let items = config.list_options.iter().map(|option| {
        let mut item = ViewNode::new("button")
            .attr("type", "button")
            .class("list-group-item list-group-item-action")
            .on_click(DialogAction::ListItemClick(option.value.clone()));
        if let Some(icon) = &option.icon {
            item = item.child(ViewNode::new("span").class("list-icon").text(icon));
        }
        item.child(ViewNode::new("span").text(&option.text))
    });
    body = body.child(ViewNode::new("div").class("list-group").children(items));

    vec![
        header(config),
        body,
        ViewNode::new("div").class("dialog-footer").child(button(
            "btn btn-secondary",
            &config.cancel_text,
            DialogAction::CustomCancel,
        )),
    ]
}

fn render_custom(config: &DialogConfig) -> Vec<ViewNode> {
    let content = if config.html.is_empty() {
        message(config)
    } else {
        ViewNode::new("div")
            .class("dialog-content")
            .attr("innerHTML", &config.html)
    };

    let buttons: Vec<ViewNode> = if config.buttons.is_empty() {
        vec![button(
            "btn btn-primary",
            &config.ok_text,
            DialogAction::ButtonClick(Some(DEFAULT_BUTTON_VALUE.to_string())),
        )]
    } else {
        config
            .buttons
            .iter()
            .map(|b| {
                button(
                    &b.style.class_name(),
                    &b.text,
                    DialogAction::ButtonClick(b.value.clone()),
                )
            })
            .collect()
    };

    vec![
        header(config),
        ViewNode::new("div").class("dialog-body").child(content),
        ViewNode::new("div").class("dialog-footer").children(buttons),
    ]
}
