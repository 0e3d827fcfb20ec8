//! Colors for the terminal dialog presentation

use ratatui::style::{Color, Modifier, Style};

/// Semantic color set used by the dialog widget
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    pub primary: Color,
    pub secondary: Color,

    pub bg_base: Color,
    pub bg_overlay: Color,

    pub fg_base: Color,
    pub fg_muted: Color,
    pub fg_selected: Color,

    pub border: Color,
    pub border_focus: Color,

    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            primary: Color::Rgb(0x8A, 0x67, 0xFF),
            secondary: Color::Rgb(0x5A, 0x5A, 0x5A),
            bg_base: Color::Rgb(0x2D, 0x2D, 0x2D),
            bg_overlay: Color::Rgb(0x1A, 0x1A, 0x1A),
            fg_base: Color::Rgb(0xD0, 0xD0, 0xD0),
            fg_muted: Color::Rgb(0x90, 0x90, 0x90),
            fg_selected: Color::Rgb(0xF5, 0xF5, 0xF5),
            border: Color::Rgb(0x4A, 0x4A, 0x4A),
            border_focus: Color::Rgb(0x8A, 0x67, 0xFF),
            success: Color::Rgb(0x4C, 0xAF, 0x50),
            error: Color::Rgb(0xF4, 0x43, 0x36),
            warning: Color::Rgb(0xFF, 0xA5, 0x00),
            info: Color::Rgb(0x29, 0xB6, 0xF6),
        }
    }

    /// Border color of the dialog, picked from its severity class
    pub fn accent<'a>(&self, classes: impl IntoIterator<Item = &'a String>) -> Color {
        for class in classes {
            match class.as_str() {
                "alert-success" => return self.success,
                "alert-error" => return self.error,
                "alert-info" => return self.info,
                _ => {}
            }
        }
        self.border_focus
    }

    /// Fill color of a `btn btn-<style>` button
    pub fn button_color<'a>(&self, classes: impl IntoIterator<Item = &'a String>) -> Color {
        for class in classes {
            match class.as_str() {
                "btn-primary" => return self.primary,
                "btn-success" => return self.success,
                "btn-danger" => return self.error,
                "btn-warning" => return self.warning,
                "btn-info" => return self.info,
                "btn-light" => return self.fg_base,
                "btn-dark" => return self.bg_overlay,
                "btn-link" => return self.bg_base,
                _ => {}
            }
        }
        self.secondary
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg_base)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.fg_muted).add_modifier(Modifier::DIM)
    }

    pub fn selected(&self, fill: Color) -> Style {
        Style::default()
            .bg(fill)
            .fg(self.fg_selected)
            .add_modifier(Modifier::BOLD)
    }

    pub fn unselected(&self) -> Style {
        Style::default().bg(self.bg_base).fg(self.fg_base)
    }
}
