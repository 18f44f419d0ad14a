//! RootView component — landing screen for `/` after a store is deleted.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{style_muted, style_secondary, C_PRIMARY},
};

pub struct RootView;

impl RootView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RootView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for RootView {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
            KeyCode::Char('K') => vec![Action::ToggleKeys],
            _ => vec![],
        }
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "No store selected",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            rows[0],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Pick or create a store from the dashboard to continue.",
                style_secondary(),
            )),
            rows[1],
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("backend ", style_muted()),
                Span::styled(state.api_base_url.as_str(), style_secondary()),
            ])),
            rows[2],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;
    use store_proto::store::StoreId;

    #[test]
    fn test_q_quits() {
        let state = AppState::new(StoreId::new("123"), "http://localhost:3000");
        let mut view = RootView::new();
        let actions = view.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE), &state);
        assert_eq!(actions, vec![Action::Quit]);
    }
}
