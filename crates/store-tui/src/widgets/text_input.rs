//! TextInput — wraps tui-input as a labelled single-line form field.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{
    style_focused_border, style_unfocused_border, C_ERROR, C_INPUT_BG, C_MUTED, C_PRIMARY,
};

pub enum InputAction {
    Changed(String),
    Submitted,
    None,
}

pub struct TextInput {
    input: Input,
    placeholder: String,
}

impl TextInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            placeholder: placeholder.into(),
        }
    }

    pub fn set_value(&mut self, value: &str) {
        self.input = Input::new(value.to_string());
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        self.input.value()
    }

    /// Handle a key event. Enter submits; everything else edits the value.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Enter => InputAction::Submitted,
            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(&Event::Key(key));
                if self.input.value() != before {
                    InputAction::Changed(self.input.value().to_string())
                } else {
                    InputAction::None
                }
            }
        }
    }

    /// Render the bordered field into `area` (3 rows: border, value, border).
    pub fn draw(&self, frame: &mut Frame, area: Rect, focused: bool, disabled: bool, invalid: bool) {
        let border_style = if invalid {
            Style::default().fg(C_ERROR)
        } else if focused && !disabled {
            style_focused_border()
        } else {
            style_unfocused_border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(C_INPUT_BG));
        let inner = block.inner(area);

        let scroll = self.input.visual_scroll(inner.width.saturating_sub(1) as usize);
        let value = self.input.value();
        let span = if value.is_empty() {
            Span::styled(self.placeholder.as_str(), Style::default().fg(C_MUTED))
        } else {
            let fg = if disabled { C_MUTED } else { C_PRIMARY };
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(visible, Style::default().fg(fg))
        };

        frame.render_widget(Paragraph::new(Line::from(vec![span])).block(block), area);

        if focused && !disabled && inner.width > 0 {
            let cursor_x = inner.x + (self.input.visual_cursor().saturating_sub(scroll)) as u16;
            frame.set_cursor_position((cursor_x.min(inner.x + inner.width - 1), inner.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_reports_changes() {
        let mut input = TextInput::new("Store name");
        input.set_value("Acme");
        assert!(matches!(
            input.handle_key(key(KeyCode::Char('!'))),
            InputAction::Changed(ref s) if s == "Acme!"
        ));
        assert!(matches!(
            input.handle_key(key(KeyCode::Backspace)),
            InputAction::Changed(ref s) if s == "Acme"
        ));
        assert_eq!(input.text(), "Acme");
    }

    #[test]
    fn test_enter_submits_without_editing() {
        let mut input = TextInput::new("Store name");
        input.set_value("Acme");
        assert!(matches!(input.handle_key(key(KeyCode::Enter)), InputAction::Submitted));
        assert_eq!(input.text(), "Acme");
    }

    #[test]
    fn test_cursor_moves_are_not_changes() {
        let mut input = TextInput::new("Store name");
        input.set_value("Acme");
        assert!(matches!(input.handle_key(key(KeyCode::Left)), InputAction::None));
    }
}
