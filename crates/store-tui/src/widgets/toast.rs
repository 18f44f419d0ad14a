//! Toast notification system — transient status messages.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{C_TOAST_ERROR, C_TOAST_INFO, C_TOAST_SUCCESS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    fn color(self) -> ratatui::style::Color {
        match self {
            Self::Info => C_TOAST_INFO,
            Self::Success => C_TOAST_SUCCESS,
            Self::Error => C_TOAST_ERROR,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Info => "·",
            Self::Success => "✓",
            Self::Error => "✗",
        }
    }

    /// How long a toast of this severity stays on screen.
    pub fn duration(self) -> Duration {
        match self {
            Self::Info | Self::Success => Duration::from_secs(3),
            Self::Error => Duration::from_secs(5),
        }
    }
}

struct Toast {
    message: String,
    severity: Severity,
    expires: Instant,
}

/// A persistent spinner toast that animates until resolved.
struct SpinnerToast {
    message: String,
    frame: usize,
}

const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub struct ToastManager {
    toasts: VecDeque<Toast>,
    spinner: Option<SpinnerToast>,
    max_visible: usize,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            spinner: None,
            max_visible: 4,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity, duration: Duration) {
        // Remove duplicates (same message)
        let msg = message.into();
        self.toasts.retain(|t| t.message != msg);
        self.toasts.push_back(Toast {
            message: msg,
            severity,
            expires: Instant::now() + duration,
        });
        // Cap queue
        while self.toasts.len() > self.max_visible * 2 {
            self.toasts.pop_front();
        }
    }

    /// Push with the severity's default lifetime.
    pub fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.push(message, severity, severity.duration());
    }

    /// Start or replace the persistent spinner toast.  The spinner animates
    /// on every `tick()` call and does not expire until dismissed.
    pub fn spinner(&mut self, message: impl Into<String>) {
        self.spinner = Some(SpinnerToast {
            message: message.into(),
            frame: 0,
        });
    }

    pub fn dismiss_spinner(&mut self) {
        self.spinner = None;
    }

    pub fn has_spinner(&self) -> bool {
        self.spinner.is_some()
    }

    /// Remove expired toasts and advance the spinner frame. Call each tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|t| t.expires > now);
        if let Some(ref mut s) = self.spinner {
            s.frame = (s.frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty() && self.spinner.is_none()
    }

    /// Live toasts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (Severity, &str)> {
        self.toasts.iter().map(|t| (t.severity, t.message.as_str()))
    }

    /// Render toasts in the top-right corner of `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if self.is_empty() {
            return;
        }
        let max_width = (area.width / 2).clamp(30, 60).min(area.width);

        let mut y = area.y + 1;

        // Spinner always rendered first (topmost row)
        if let Some(ref s) = self.spinner {
            let icon = SPINNER_FRAMES[s.frame % SPINNER_FRAMES.len()];
            render_row(frame, area, y, max_width, icon, &s.message, Style::default().fg(C_TOAST_INFO));
            y += 1;
            if y >= area.y + area.height {
                return;
            }
        }

        // Normal toasts below the spinner, newest first
        for toast in self.toasts.iter().rev().take(self.max_visible) {
            render_row(
                frame,
                area,
                y,
                max_width,
                toast.severity.icon(),
                &toast.message,
                Style::default().fg(toast.severity.color()),
            );
            y += 1;
            if y >= area.y + area.height {
                break;
            }
        }
    }
}

fn render_row(
    frame: &mut Frame,
    area: Rect,
    y: u16,
    max_width: u16,
    icon: &str,
    message: &str,
    style: Style,
) {
    let text = format!(" {} {} ", icon, message);
    let w = (text.width() as u16).min(max_width);
    let x = area.x + area.width.saturating_sub(w + 1);
    let toast_area = Rect {
        x,
        y,
        width: w,
        height: 1,
    };
    frame.render_widget(Clear, toast_area);
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        style.add_modifier(Modifier::BOLD),
    )]));
    frame.render_widget(paragraph, toast_area);
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}
