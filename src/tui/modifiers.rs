use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::config::ThemeConfig;
use crate::modifiers::{EditOutcome, ModifierKey, ModifierStore};

use super::theme;

/// Rows of the modifiers form: the four modifiers, then the global switch.
const ACTIVE_ROW: usize = 4;
const ROW_COUNT: usize = 5;

/// Modifiers tab: staged edits against the modifier store, committed with
/// 's'. While a value is being edited the view captures every key, so
/// digits do not trigger tab switching.
pub struct ModifiersView {
    cursor: usize,
    editing: bool,
    pub message: Option<String>,
}

impl ModifiersView {
    pub fn new() -> Self {
        ModifiersView {
            cursor: 0,
            editing: false,
            message: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    fn key_at(&self, row: usize) -> Option<ModifierKey> {
        ModifierKey::all().get(row).copied()
    }

    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        store: &ModifierStore,
        config: &ThemeConfig,
    ) {
        let mut constraints = vec![Constraint::Length(1); ROW_COUNT + 2];
        constraints.push(Constraint::Min(0));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (row, key) in ModifierKey::all().into_iter().enumerate() {
            let marker = if store.staged_enabled(key) { "[x]" } else { "[ ]" };
            let value = store.staged_value(key);
            let shown = if self.editing && self.cursor == row {
                format!("{}_", value)
            } else {
                value.to_string()
            };
            let text = format!("{} {:<20} {}", marker, key.label(), shown);
            let style = if self.cursor == row {
                theme::selection_style(config)
            } else {
                ratatui::style::Style::default()
            };
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(text, style))),
                chunks[row],
            );
        }

        let active_text = format!(
            "[{}] Modifiers active",
            if store.is_active() { "x" } else { " " }
        );
        let active_style = if self.cursor == ACTIVE_ROW {
            theme::selection_style(config)
        } else {
            ratatui::style::Style::default()
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(active_text, active_style))),
            chunks[ACTIVE_ROW],
        );

        let hint = if self.editing {
            "type a value • enter done • esc cancel"
        } else {
            "enter edit • space toggle • s save • d discard"
        };
        f.render_widget(
            Paragraph::new(hint).style(theme::hint_style()),
            chunks[ROW_COUNT + 1],
        );

        if let Some(message) = &self.message {
            f.render_widget(
                Paragraph::new(message.as_str()).style(theme::error_style()),
                chunks[ROW_COUNT],
            );
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, store: &mut ModifierStore) {
        if self.editing {
            self.handle_editing_key(key, store);
            return;
        }

        self.message = None;
        match key.code {
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.cursor + 1 < ROW_COUNT {
                    self.cursor += 1;
                }
            }
            KeyCode::Enter if self.cursor < ACTIVE_ROW => {
                self.editing = true;
            }
            KeyCode::Char(' ') => {
                if self.cursor == ACTIVE_ROW {
                    store.set_active(!store.is_active());
                } else if let Some(modifier_key) = self.key_at(self.cursor) {
                    store.toggle_enabled(modifier_key);
                }
            }
            KeyCode::Char('s') => match store.commit() {
                Ok(()) => self.message = Some("Saved".to_string()),
                Err(e) => self.message = Some(e.to_string()),
            },
            KeyCode::Char('d') => {
                store.discard();
                self.message = Some("Discarded".to_string());
            }
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent, store: &mut ModifierStore) {
        let Some(modifier_key) = self.key_at(self.cursor) else {
            self.editing = false;
            return;
        };
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.editing = false;
                self.message = None;
            }
            KeyCode::Backspace => {
                let mut value = store.staged_value(modifier_key).to_string();
                value.pop();
                store.stage_edit(modifier_key, &value);
            }
            KeyCode::Char(c) => {
                let candidate = format!("{}{}", store.staged_value(modifier_key), c);
                if store.stage_edit(modifier_key, &candidate) == EditOutcome::Rejected {
                    self.message = Some(format!("'{}' is not a valid value", candidate));
                } else {
                    self.message = None;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_typing_builds_staged_value() {
        let mut view = ModifiersView::new();
        let mut store = ModifierStore::new();

        view.handle_key(key(KeyCode::Enter), &mut store);
        assert!(view.is_editing());

        // Clear the default "1", then type "2.5"
        view.handle_key(key(KeyCode::Backspace), &mut store);
        for c in ['2', '.', '5'] {
            view.handle_key(key(KeyCode::Char(c)), &mut store);
        }
        assert_eq!(store.staged_value(ModifierKey::Goal), "2.5");

        view.handle_key(key(KeyCode::Enter), &mut store);
        assert!(!view.is_editing());
        // Staged only; committed value is untouched until save
        assert_eq!(store.modifiers().goal.value, 1.0);
    }

    #[test]
    fn test_rejected_keystroke_reports_and_keeps_value() {
        let mut view = ModifiersView::new();
        let mut store = ModifierStore::new();

        view.handle_key(key(KeyCode::Enter), &mut store);
        view.handle_key(key(KeyCode::Char('x')), &mut store);

        assert!(view.message.is_some());
        assert_eq!(store.staged_value(ModifierKey::Goal), "1");
    }

    #[test]
    fn test_save_commits_staged_state() {
        let mut view = ModifiersView::new();
        let mut store = ModifierStore::new();

        view.handle_key(key(KeyCode::Enter), &mut store);
        view.handle_key(key(KeyCode::Char('2')), &mut store);
        view.handle_key(key(KeyCode::Enter), &mut store);
        view.handle_key(key(KeyCode::Char('s')), &mut store);

        assert_eq!(store.modifiers().goal.value, 12.0);
        assert_eq!(view.message.as_deref(), Some("Saved"));
    }

    #[test]
    fn test_save_with_empty_value_reports_error() {
        let mut view = ModifiersView::new();
        let mut store = ModifierStore::new();

        view.handle_key(key(KeyCode::Enter), &mut store);
        view.handle_key(key(KeyCode::Backspace), &mut store);
        view.handle_key(key(KeyCode::Enter), &mut store);
        view.handle_key(key(KeyCode::Char('s')), &mut store);

        assert_eq!(store.modifiers().goal.value, 1.0);
        let message = view.message.expect("commit error should surface");
        assert!(message.contains("not a number"));
    }

    #[test]
    fn test_space_on_active_row_toggles_global_switch() {
        let mut view = ModifiersView::new();
        let mut store = ModifierStore::new();

        for _ in 0..ACTIVE_ROW {
            view.handle_key(key(KeyCode::Down), &mut store);
        }
        view.handle_key(key(KeyCode::Char(' ')), &mut store);
        assert!(!store.is_active());
    }
}
