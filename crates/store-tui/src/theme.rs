//! Color palette and style constants for the store settings TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_ACCENT: Color = Color::Rgb(120, 100, 200);
pub const C_DESTRUCTIVE: Color = Color::Rgb(255, 80, 80);
pub const C_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SEPARATOR: Color = Color::Rgb(40, 40, 52);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200); // same purple as the accent
pub const C_INPUT_BG: Color = Color::Rgb(20, 20, 32);
pub const C_MODAL_BG: Color = Color::Rgb(18, 18, 26);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_BADGE_PENDING: Color = Color::Rgb(255, 184, 80);
pub const C_BADGE_OK: Color = Color::Rgb(80, 200, 120);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

/// Button styling: `variant_fg` is the resting colour (accent or destructive).
pub fn style_button(variant_fg: Color, focused: bool, disabled: bool) -> Style {
    if disabled {
        return Style::default().fg(C_MUTED);
    }
    if focused {
        Style::default()
            .bg(variant_fg)
            .fg(C_BG)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(variant_fg).add_modifier(Modifier::BOLD)
    }
}
