use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeConfig;

pub const LIST_HIGHLIGHT_SYMBOL: &str = "► ";

pub fn header_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn error_style() -> Style {
    Style::default().fg(Color::Red)
}

pub fn selection_style(theme: &ThemeConfig) -> Style {
    Style::default()
        .fg(theme.selection_fg)
        .add_modifier(Modifier::BOLD)
}

pub fn checked_row_style(theme: &ThemeConfig) -> Style {
    Style::default().fg(theme.unfocused_selection_fg())
}

pub fn tab_active_style(theme: &ThemeConfig) -> Style {
    Style::default()
        .fg(theme.selection_fg)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive_style() -> Style {
    Style::default().fg(Color::Gray)
}
