use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::config::ThemeConfig;

use super::theme;
use super::Tab;

/// Render the top tab bar with number hints.
pub fn render_tab_bar(f: &mut Frame, area: Rect, current: Tab, config: &ThemeConfig) {
    let mut spans = Vec::new();
    for (i, tab) in Tab::all().into_iter().enumerate() {
        let label = format!(" {} {} ", i + 1, tab.title());
        let style = if tab == current {
            theme::tab_active_style(config)
        } else {
            theme::tab_inactive_style()
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
