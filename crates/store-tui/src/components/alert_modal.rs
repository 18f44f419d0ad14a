//! AlertModal component — yes/no gate in front of destructive actions.
//!
//! The modal owns no business state: the settings view's phase decides
//! whether it is open and busy (`sync`), and the modal answers with
//! `CloseDeleteDialog` (onClose) or `ConfirmDelete` (onConfirm). Both buttons
//! are disabled while `loading`.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    component::{hit, Component},
    form::Phase,
    theme::{style_button, C_ACCENT, C_DESTRUCTIVE, C_MODAL_BG, C_PANEL_BORDER, C_PRIMARY, C_SECONDARY},
};

const TITLE: &str = "Are you sure?";
const DESCRIPTION: &str = "This action cannot be undone.";
const CANCEL_LABEL: &str = " Cancel ";
const CONTINUE_LABEL: &str = " Continue ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModalButton {
    Cancel,
    Continue,
}

pub struct AlertModal {
    is_open: bool,
    loading: bool,
    selected: ModalButton,
    popup_area: Rect,
    cancel_area: Rect,
    continue_area: Rect,
}

impl AlertModal {
    pub fn new() -> Self {
        Self {
            is_open: false,
            loading: false,
            selected: ModalButton::Cancel,
            popup_area: Rect::default(),
            cancel_area: Rect::default(),
            continue_area: Rect::default(),
        }
    }

    /// Mirror `isOpen` / `loading` from the owning view's phase.
    pub fn sync(&mut self, phase: Phase) {
        let opening = !self.is_open && phase.dialog_open();
        self.is_open = phase.dialog_open();
        self.loading = phase.loading();
        if opening {
            self.selected = ModalButton::Cancel;
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    fn on_close(&self) -> Vec<Action> {
        if self.loading {
            return vec![];
        }
        vec![Action::CloseDeleteDialog]
    }

    fn on_confirm(&self) -> Vec<Action> {
        if self.loading {
            return vec![];
        }
        vec![Action::ConfirmDelete]
    }

    fn toggle_selected(&mut self) {
        self.selected = match self.selected {
            ModalButton::Cancel => ModalButton::Continue,
            ModalButton::Continue => ModalButton::Cancel,
        };
    }
}

impl Default for AlertModal {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for AlertModal {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.is_open {
            return vec![];
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => self.on_close(),
            KeyCode::Char('y') => self.on_confirm(),
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Char('h')
            | KeyCode::Char('l') => {
                self.toggle_selected();
                vec![]
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.selected {
                ModalButton::Cancel => self.on_close(),
                ModalButton::Continue => self.on_confirm(),
            },
            // Consume all other keys while the modal is open
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if !self.is_open || event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let (col, row) = (event.column, event.row);
        if hit(self.continue_area, col, row) {
            self.selected = ModalButton::Continue;
            return self.on_confirm();
        }
        if hit(self.cancel_area, col, row) || !hit(self.popup_area, col, row) {
            self.selected = ModalButton::Cancel;
            return self.on_close();
        }
        vec![]
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        if !self.is_open {
            self.popup_area = Rect::default();
            self.cancel_area = Rect::default();
            self.continue_area = Rect::default();
            return;
        }

        let popup = centered_rect(46, 7, area);
        self.popup_area = popup;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_PANEL_BORDER))
            .style(Style::default().bg(C_MODAL_BG));
        let inner = block.inner(popup);
        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(1), // description
                Constraint::Min(0),
                Constraint::Length(1), // buttons
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {}", TITLE),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ))),
            rows[0],
        );
        let description = if self.loading {
            format!(" {} Deleting…", DESCRIPTION)
        } else {
            format!(" {}", DESCRIPTION)
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                description,
                Style::default().fg(C_SECONDARY),
            ))),
            rows[1],
        );

        let cancel_w = CANCEL_LABEL.chars().count() as u16;
        let continue_w = CONTINUE_LABEL.chars().count() as u16;
        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(cancel_w),
                Constraint::Length(2),
                Constraint::Length(continue_w),
                Constraint::Length(1),
            ])
            .split(rows[3]);
        self.cancel_area = buttons[1];
        self.continue_area = buttons[3];

        frame.render_widget(
            Paragraph::new(Span::styled(
                CANCEL_LABEL,
                style_button(
                    C_ACCENT,
                    self.selected == ModalButton::Cancel,
                    self.loading,
                ),
            )),
            self.cancel_area,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                CONTINUE_LABEL,
                style_button(
                    C_DESTRUCTIVE,
                    self.selected == ModalButton::Continue,
                    self.loading,
                ),
            )),
            self.continue_area,
        );
    }
}

fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
