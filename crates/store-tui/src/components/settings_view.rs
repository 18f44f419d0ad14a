//! SettingsView component — rename or delete the current store.
//!
//! Owns the form draft and the request `Phase`. Key handling only ever emits
//! `UpdateStore` after validation passes; the App performs the request and
//! hands the outcome back through `finish_update` / `finish_delete`, both of
//! which resolve the phase to `Idle` before anything else happens.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use store_proto::client::ApiError;
use store_proto::store::Store;
use tracing::{debug, warn};

use crate::{
    action::Action,
    app_state::AppState,
    component::{hit, Component},
    focus::FocusRing,
    form::{FormDraft, Phase},
    route::Route,
    theme::{style_button, style_muted, style_secondary, C_ACCENT, C_DESTRUCTIVE, C_ERROR, C_PRIMARY},
    widgets::{
        status_bar::draw_separator,
        text_input::{InputAction, TextInput},
        toast::Severity,
    },
};

pub const UPDATE_SUCCESS: &str = "Store Updated successfully!";
pub const UPDATE_FAILURE: &str = "Something went wrong.";
pub const DELETE_SUCCESS: &str = "Store Deleted Successfully!";
pub const DELETE_FAILURE: &str = "Ensure you remove all the products and categories first.";

const DELETE_LABEL: &str = " ✗ Delete ";
const SUBMIT_LABEL: &str = " Update Store name ";
const INPUT_WIDTH: u16 = 40;

/// Focusable controls, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Name,
    Submit,
    Delete,
}

#[derive(Default, Clone, Copy)]
struct ControlAreas {
    name: Rect,
    submit: Rect,
    delete: Rect,
}

pub struct SettingsView {
    draft: FormDraft,
    name_input: TextInput,
    phase: Phase,
    focus: FocusRing<Control>,
    /// Set once `initialData` has populated the draft; later refreshes leave it alone.
    initialized: bool,
    areas: ControlAreas,
}

impl SettingsView {
    pub fn new() -> Self {
        Self {
            draft: FormDraft::default(),
            name_input: TextInput::new("Store name"),
            phase: Phase::Idle,
            focus: FocusRing::new(vec![Control::Name, Control::Submit, Control::Delete]),
            initialized: false,
            areas: ControlAreas::default(),
        }
    }

    /// Populate the draft from the first store copy. Returns false if the
    /// form was already populated.
    pub fn load_initial(&mut self, store: &Store) -> bool {
        if self.initialized {
            return false;
        }
        self.draft = FormDraft::new(store.name.clone());
        self.name_input.set_value(&store.name);
        self.initialized = true;
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    /// Controls are live only once `initialData` is in and nothing is in flight.
    fn editable(&self) -> bool {
        self.initialized && !self.phase.loading()
    }

    /// Replace the field value, as typing would. Ignored while not editable.
    pub fn set_name(&mut self, name: &str) {
        if !self.editable() {
            return;
        }
        self.name_input.set_value(name);
        self.draft.set_name(name);
    }

    /// Validate and, if valid and idle, start the update.
    pub fn submit(&mut self) -> Vec<Action> {
        if !self.initialized || self.phase != Phase::Idle {
            return vec![];
        }
        let Some(values) = self.draft.submit() else {
            debug!("settings: submit blocked by field errors {:?}", self.draft.errors);
            self.focus.set(Control::Name);
            return vec![];
        };
        if !self.phase.begin_update() {
            return vec![];
        }
        vec![Action::UpdateStore(values)]
    }

    /// Resolve an update request. Always leaves the phase idle.
    pub fn finish_update(&mut self, result: &Result<(), ApiError>) -> Vec<Action> {
        self.phase.finish();
        match result {
            Ok(()) => vec![
                Action::RefreshStore,
                Action::Toast(Severity::Success, UPDATE_SUCCESS.to_string()),
            ],
            Err(e) => {
                warn!("settings: update failed: {}", e);
                vec![Action::Toast(Severity::Error, UPDATE_FAILURE.to_string())]
            }
        }
    }

    /// Resolve a delete request. Always leaves the phase idle, which also
    /// closes the dialog.
    pub fn finish_delete(&mut self, result: &Result<(), ApiError>) -> Vec<Action> {
        self.phase.finish();
        match result {
            Ok(()) => vec![
                Action::EvictStore,
                Action::Navigate(Route::Root),
                Action::Toast(Severity::Success, DELETE_SUCCESS.to_string()),
            ],
            Err(e) => {
                warn!("settings: delete failed: {}", e);
                vec![Action::Toast(Severity::Error, DELETE_FAILURE.to_string())]
            }
        }
    }

    fn open_dialog(&self) -> Vec<Action> {
        if !self.editable() {
            return vec![];
        }
        vec![Action::OpenDeleteDialog]
    }

    fn activate(&mut self, control: Control) -> Vec<Action> {
        match control {
            Control::Name => vec![],
            Control::Submit => self.submit(),
            Control::Delete => self.open_dialog(),
        }
    }
}

impl Default for SettingsView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SettingsView {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => self.submit(),
                KeyCode::Char('d') => self.open_dialog(),
                _ => vec![],
            };
        }

        // Until the store arrives the only thing to do is retry or leave.
        if !self.initialized {
            return match key.code {
                KeyCode::Char('r') => vec![Action::ReloadStore],
                KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
                KeyCode::Char('K') => vec![Action::ToggleKeys],
                _ => vec![],
            };
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus.next();
                return vec![];
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus.prev();
                return vec![];
            }
            _ => {}
        }

        match self.focus.current() {
            Some(Control::Name) => {
                // Input is disabled while a request is in flight
                if !self.editable() {
                    return vec![];
                }
                match self.name_input.handle_key(key) {
                    InputAction::Submitted => self.submit(),
                    InputAction::Changed(name) => {
                        self.draft.set_name(name);
                        vec![]
                    }
                    InputAction::None => vec![],
                }
            }
            Some(control) => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.activate(control),
                KeyCode::Char('q') => vec![Action::Quit],
                KeyCode::Char('K') => vec![Action::ToggleKeys],
                _ => vec![],
            },
            None => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let (col, row) = (event.column, event.row);
        let targets = [
            (self.areas.name, Control::Name),
            (self.areas.submit, Control::Submit),
            (self.areas.delete, Control::Delete),
        ];
        for (area, control) in targets {
            if hit(area, col, row) {
                self.focus.set(control);
                return self.activate(control);
            }
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::OpenDeleteDialog => {
                self.phase.open_dialog();
                vec![]
            }
            Action::CloseDeleteDialog => {
                self.phase.close_dialog();
                vec![]
            }
            Action::ConfirmDelete => {
                if self.phase.begin_delete() {
                    vec![Action::DeleteStore]
                } else {
                    vec![]
                }
            }
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, _state: &AppState) {
        let disabled = !self.editable();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // heading + trash
                Constraint::Length(1), // description
                Constraint::Length(1), // separator
                Constraint::Length(1),
                Constraint::Length(1), // label
                Constraint::Length(3), // input
                Constraint::Length(1), // field error
                Constraint::Length(1),
                Constraint::Length(1), // submit
                Constraint::Min(0),
            ])
            .split(area);

        // ── Heading ───────────────────────────────────────────────────────────
        let delete_w = DELETE_LABEL.chars().count() as u16;
        let heading = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(delete_w)])
            .split(rows[0]);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Settings",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            heading[0],
        );
        self.areas.delete = heading[1];
        frame.render_widget(
            Paragraph::new(Span::styled(
                DELETE_LABEL,
                style_button(
                    C_DESTRUCTIVE,
                    focused && self.focus.is_focused(Control::Delete),
                    disabled,
                ),
            )),
            self.areas.delete,
        );
        frame.render_widget(
            Paragraph::new(Span::styled("Manage settings preferences", style_secondary())),
            rows[1],
        );
        draw_separator(frame, rows[2]);

        // ── Name field ────────────────────────────────────────────────────────
        let invalid = !self.draft.errors.is_empty();
        let label_style = if invalid {
            Style::default().fg(C_ERROR)
        } else {
            Style::default().fg(C_PRIMARY)
        };
        frame.render_widget(Paragraph::new(Span::styled("Name", label_style)), rows[4]);

        let input_area = Rect {
            width: rows[5].width.min(INPUT_WIDTH),
            ..rows[5]
        };
        self.areas.name = input_area;
        self.name_input.draw(
            frame,
            input_area,
            focused && self.focus.is_focused(Control::Name),
            disabled,
            invalid,
        );
        if let Some(message) = &self.draft.errors.name {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    message.as_str(),
                    Style::default().fg(C_ERROR),
                ))),
                rows[6],
            );
        }

        // ── Submit ────────────────────────────────────────────────────────────
        let submit_w = SUBMIT_LABEL.chars().count() as u16;
        self.areas.submit = Rect {
            width: rows[8].width.min(submit_w),
            ..rows[8]
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                SUBMIT_LABEL,
                style_button(
                    C_ACCENT,
                    focused && self.focus.is_focused(Control::Submit),
                    disabled,
                ),
            )),
            self.areas.submit,
        );
        if !self.initialized {
            frame.render_widget(
                Paragraph::new(Span::styled("loading store… (r to retry)", style_muted())),
                rows[9],
            );
        }
    }
}
