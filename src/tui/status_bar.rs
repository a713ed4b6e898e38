use std::time::SystemTime;

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::theme;

/// Render the bottom status line: an error if there is one, otherwise the
/// last-refresh time and key hints.
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    error_message: Option<&str>,
    last_refresh: Option<SystemTime>,
    time_format: &str,
) {
    let line = if let Some(error) = error_message {
        Line::from(Span::styled(format!(" {} ", error), theme::error_style()))
    } else {
        let refreshed = match last_refresh {
            Some(at) => {
                let local: DateTime<Local> = at.into();
                format!("refreshed {}", local.format(time_format))
            }
            None => "not yet refreshed".to_string(),
        };
        Line::from(Span::styled(
            format!(" q quit • 1-3 tabs • {} ", refreshed),
            theme::hint_style(),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}
