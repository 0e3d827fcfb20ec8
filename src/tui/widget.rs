//! Terminal rendering of a dialog view tree
//!
//! The widget draws whatever [`render`](crate::reactive::render) produced as a
//! centered modal over a dimmed background and turns key presses into the
//! [`DialogAction`]s carried by the tree. It keeps only focus state of its own.

use super::theme::Theme;
use crate::reactive::{DialogAction, DialogSnapshot, ViewNode};
use crate::dialog::CLOSING_CLASS;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const MAX_WIDTH: u16 = 64;
const HELP_TEXT: &str = "Tab: Move • Enter: Select • Esc: Ignored • Ctrl+C: Quit";

/// What a key press amounts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Send this action to the store
    Action(DialogAction),
    /// Only focus changed
    Redraw,
    /// Leave the application
    Quit,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Input,
    Click(usize),
}

/// Focus-tracking presentation of the dialog
#[derive(Debug, Default)]
pub struct DialogWidget {
    theme: Theme,
    sequence: Option<u64>,
    focus: usize,
}

impl DialogWidget {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            sequence: None,
            focus: 0,
        }
    }

    /// Reset focus whenever a different dialog is shown
    pub fn sync(&mut self, snapshot: &DialogSnapshot, tree: &ViewNode) {
        if self.sequence == Some(snapshot.sequence) {
            return;
        }
        self.sequence = Some(snapshot.sequence);

        let targets = targets(tree);
        self.focus = if tree.input().is_some() || tree.find_by_class("list-group").is_some() {
            0
        } else {
            targets.len().saturating_sub(1)
        };
    }

    fn focused(&self, tree: &ViewNode) -> Option<Target> {
        targets(tree).get(self.focus).copied()
    }

    fn move_focus(&mut self, tree: &ViewNode, forward: bool) -> KeyOutcome {
        let count = targets(tree).len();
        if count == 0 {
            return KeyOutcome::Ignored;
        }
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
        KeyOutcome::Redraw
    }

    pub fn handle_key(&mut self, key: KeyEvent, tree: &ViewNode) -> KeyOutcome {
        let input_value = tree
            .input()
            .map(|input| input.get_attr("value").unwrap_or_default().to_string());

        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyOutcome::Quit,

            // Swallowed by the store, the dialog stays open
            (KeyCode::Esc, _) => KeyOutcome::Action(DialogAction::Dismiss),

            (KeyCode::Tab | KeyCode::Down, _) => self.move_focus(tree, true),
            (KeyCode::BackTab | KeyCode::Up, _) => self.move_focus(tree, false),
            (KeyCode::Right, _) if input_value.is_none() => self.move_focus(tree, true),
            (KeyCode::Left, _) if input_value.is_none() => self.move_focus(tree, false),

            (KeyCode::Enter, _) => match self.focused(tree) {
                Some(Target::Input) => tree
                    .submit_action()
                    .cloned()
                    .map(KeyOutcome::Action)
                    .unwrap_or(KeyOutcome::Ignored),
                Some(Target::Click(index)) => tree.clickables()[index]
                    .on_click
                    .clone()
                    .map(KeyOutcome::Action)
                    .unwrap_or(KeyOutcome::Ignored),
                None => KeyOutcome::Ignored,
            },

            (KeyCode::Backspace, _) => match input_value {
                Some(mut value) => {
                    value.pop();
                    self.focus = 0;
                    KeyOutcome::Action(DialogAction::InputChange(value))
                }
                None => KeyOutcome::Ignored,
            },

            (KeyCode::Char(c), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
                match input_value {
                    Some(mut value) => {
                        value.push(c);
                        self.focus = 0;
                        KeyOutcome::Action(DialogAction::InputChange(value))
                    }
                    None if c == ' ' => self.handle_key(KeyEvent::from(KeyCode::Enter), tree),
                    None => KeyOutcome::Ignored,
                }
            }

            _ => KeyOutcome::Ignored,
        }
    }

    pub fn handle_paste(&mut self, text: &str, tree: &ViewNode) -> KeyOutcome {
        match tree.input() {
            Some(input) => {
                let mut value = input.get_attr("value").unwrap_or_default().to_string();
                value.push_str(text.lines().next().unwrap_or_default());
                self.focus = 0;
                KeyOutcome::Action(DialogAction::InputChange(value))
            }
            None => KeyOutcome::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tree: &ViewNode) {
        let theme = &self.theme;
        let parts = DialogParts::from_tree(tree);

        // Modal background
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.bg_overlay)),
            area,
        );

        let width = area.width.saturating_sub(4).min(MAX_WIDTH).max(area.width.min(20));
        let inner_width = width.saturating_sub(2);
        let body_height = wrapped_height(&parts.body, inner_width);

        let mut constraints = Vec::new();
        if body_height > 0 {
            constraints.push(Constraint::Length(body_height));
        }
        if parts.input.is_some() {
            constraints.push(Constraint::Length(3));
        }
        if parts.error.is_some() {
            constraints.push(Constraint::Length(1));
        }
        if !parts.items.is_empty() {
            constraints.push(Constraint::Length(parts.items.len() as u16));
        }
        constraints.push(Constraint::Length(3));
        constraints.push(Constraint::Length(1));

        let content_height = constraints
            .iter()
            .map(|constraint| match constraint {
                Constraint::Length(n) => *n,
                _ => 0,
            })
            .fold(0u16, u16::saturating_add);
        let height = content_height.saturating_add(2).min(area.height);

        let dialog_area = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width: width.min(area.width),
            height,
        };

        let mut block_style = Style::default().bg(theme.bg_base).fg(theme.fg_base);
        if parts.closing {
            block_style = block_style.add_modifier(Modifier::DIM);
        }
        let title = if parts.icon.is_empty() {
            format!(" {} ", parts.title)
        } else {
            format!(" {} {} ", parts.icon, parts.title)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(theme.accent(&tree.classes)))
            .style(block_style);
        let inner = block.inner(dialog_area);

        frame.render_widget(Clear, dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);
        let mut chunks = chunks.iter().copied();
        let focused = self.focused(tree);

        if body_height > 0 {
            if let Some(chunk) = chunks.next() {
                let body = Paragraph::new(parts.body.clone())
                    .style(theme.text())
                    .wrap(Wrap { trim: false });
                frame.render_widget(body, chunk);
            }
        }

        if let Some(input) = parts.input {
            if let Some(chunk) = chunks.next() {
                self.render_input(frame, chunk, input, focused == Some(Target::Input));
            }
        }

        if let Some(error) = &parts.error {
            if let Some(chunk) = chunks.next() {
                let line = Paragraph::new(error.as_str()).style(Style::default().fg(theme.error));
                frame.render_widget(line, chunk);
            }
        }

        if !parts.items.is_empty() {
            if let Some(chunk) = chunks.next() {
                let lines: Vec<Line> = parts
                    .items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let style = if focused == Some(Target::Click(i)) {
                            theme.selected(theme.primary)
                        } else {
                            theme.text()
                        };
                        Line::from(Span::styled(format!(" {} ", item.text_content()), style))
                    })
                    .collect();
                frame.render_widget(Paragraph::new(lines), chunk);
            }
        }

        if let Some(chunk) = chunks.next() {
            self.render_buttons(frame, chunk, &parts.buttons, parts.items.len(), focused);
        }

        if let Some(chunk) = chunks.next() {
            let help = Paragraph::new(HELP_TEXT)
                .style(theme.muted())
                .alignment(Alignment::Center);
            frame.render_widget(help, chunk);
        }
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, input: &ViewNode, focused: bool) {
        let theme = &self.theme;
        let value = input.get_attr("value").unwrap_or_default();
        let placeholder = input.get_attr("placeholder").unwrap_or_default();

        let border = if focused { theme.border_focus } else { theme.border };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);

        let paragraph = if value.is_empty() {
            Paragraph::new(placeholder).style(theme.muted())
        } else {
            Paragraph::new(value).style(theme.text())
        };
        frame.render_widget(paragraph.block(block), area);

        if focused && inner.width > 0 {
            let offset = (value.width() as u16).min(inner.width - 1);
            frame.set_cursor(inner.x + offset, inner.y);
        }
    }

    fn render_buttons(
        &self,
        frame: &mut Frame,
        area: Rect,
        buttons: &[&ViewNode],
        first_index: usize,
        focused: Option<Target>,
    ) {
        if buttons.is_empty() {
            return;
        }
        let theme = &self.theme;
        let constraints: Vec<Constraint> = buttons
            .iter()
            .map(|_| Constraint::Ratio(1, buttons.len() as u32))
            .collect();
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (i, (button, slot)) in buttons.iter().zip(layout.iter()).enumerate() {
            let style = if focused == Some(Target::Click(first_index + i)) {
                theme.selected(theme.button_color(&button.classes))
            } else {
                theme.unselected()
            };
            let widget = Paragraph::new(format!(" {} ", button.text_content()))
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(widget, *slot);
        }
    }
}

/// Focus order: the input, then clickables in document order
fn targets(tree: &ViewNode) -> Vec<Target> {
    let mut targets = Vec::new();
    if tree.input().is_some() {
        targets.push(Target::Input);
    }
    targets.extend((0..tree.clickables().len()).map(Target::Click));
    targets
}

fn wrapped_height(text: &str, width: u16) -> u16 {
    if text.is_empty() {
        return 0;
    }
    let width = usize::from(width.max(1));
    let lines: usize = text
        .lines()
        .map(|line| line.width().max(1).div_ceil(width))
        .fold(0, usize::saturating_add);
    u16::try_from(lines).unwrap_or(u16::MAX)
}

/// The pieces of a dialog tree the terminal layout cares about
struct DialogParts<'a> {
    icon: String,
    title: String,
    body: String,
    input: Option<&'a ViewNode>,
    error: Option<String>,
    items: Vec<&'a ViewNode>,
    buttons: Vec<&'a ViewNode>,
    closing: bool,
}

impl<'a> DialogParts<'a> {
    fn from_tree(tree: &'a ViewNode) -> Self {
        let text_of = |class: &str| {
            tree.find_by_class(class)
                .map(ViewNode::text_content)
                .unwrap_or_default()
        };

        let body = match tree
            .find_by_class("dialog-content")
            .and_then(|content| content.get_attr("innerHTML"))
        {
            Some(html) => html2md::parse_html(html).trim().to_string(),
            None if tree.find_by_class("list-group").is_some() => text_of("mb-3"),
            None => text_of("message"),
        };

        Self {
            icon: text_of("dialog-icon"),
            title: text_of("dialog-title"),
            body,
            input: tree.input(),
            error: tree.find_by_class("error-message").map(ViewNode::text_content),
            items: tree
                .find_by_class("list-group")
                .map(|list| list.children.iter().collect())
                .unwrap_or_default(),
            buttons: tree
                .find_by_class("dialog-footer")
                .map(ViewNode::clickables)
                .unwrap_or_default(),
            closing: tree.has_class(CLOSING_CLASS),
        }
    }
}
