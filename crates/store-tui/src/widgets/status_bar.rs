//! Status bar — header line, separator, log line and keybindings footer.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::AppState;
use crate::route::Route;
use crate::theme::{
    C_ACCENT, C_BADGE_OK, C_BADGE_PENDING, C_DESTRUCTIVE, C_MUTED, C_PRIMARY, C_SECONDARY,
    C_SEPARATOR,
};

/// Which keybinding set the footer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeysContext {
    Settings,
    Dialog,
    Root,
}

impl KeysContext {
    pub fn label(self) -> &'static str {
        match self {
            Self::Settings => "SETTINGS",
            Self::Dialog => "CONFIRM",
            Self::Root => "HOME",
        }
    }

    fn keys(self) -> &'static str {
        match self {
            Self::Settings => {
                " Tab/↑↓ move  type to edit  Enter activate  Ctrl+S save  Ctrl+D delete  K keys  Ctrl+C quit"
            }
            Self::Dialog => " ←→/Tab choose  Enter select  y continue  n/Esc cancel",
            Self::Root => " q quit  K keys",
        }
    }
}

/// Draw the top line: app title, route path, store label and a busy badge.
pub fn draw_header(frame: &mut Frame, area: Rect, state: &AppState, loading: bool) {
    let mut spans = vec![
        Span::styled(
            " store-settings ",
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(state.route.path(), Style::default().fg(C_SECONDARY)),
    ];
    if let Route::Settings(_) = state.route {
        spans.push(Span::styled("  ", Style::default()));
        spans.push(Span::styled(
            state.store_label(),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(
        format!("  {}", state.api_base_url),
        Style::default().fg(C_MUTED),
    ));
    if loading {
        spans.push(Span::styled(
            "  BUSY",
            Style::default()
                .fg(C_BADGE_PENDING)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the log bar: connection dot plus last log line.
pub fn draw_log_bar(frame: &mut Frame, area: Rect, last_log: Option<&str>, reachable: bool) {
    let conn_span = if reachable {
        Span::styled("●", Style::default().fg(C_BADGE_OK))
    } else {
        Span::styled("○", Style::default().fg(C_DESTRUCTIVE))
    };

    let log_span = Span::styled(last_log.unwrap_or(""), Style::default().fg(C_SECONDARY));

    let line = Line::from(vec![conn_span, Span::raw(" "), log_span]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, context: KeysContext) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", context.label()),
            Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(context.keys(), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
