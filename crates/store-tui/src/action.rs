//! Action enum — all user-initiated intents and internal events.

use crate::form::SettingsValues;
use crate::route::Route;
use crate::widgets::toast::Severity;

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Settings form ────────────────────────────────────────────────────────
    /// Validated form values; the App issues the PATCH.
    UpdateStore(SettingsValues),
    /// Trash control activated: show the confirmation dialog.
    OpenDeleteDialog,
    /// Dialog `onClose`.
    CloseDeleteDialog,
    /// Dialog `onConfirm`.
    ConfirmDelete,
    /// Confirmed; the App issues the DELETE.
    DeleteStore,

    // ── Cached store ─────────────────────────────────────────────────────────
    /// Re-fetch the store for the current route.
    RefreshStore,
    /// Retry the initial load after it failed.
    ReloadStore,
    /// Drop the cached store (it no longer exists remotely).
    EvictStore,

    // ── Navigation ───────────────────────────────────────────────────────────
    Navigate(Route),

    // ── UI ───────────────────────────────────────────────────────────────────
    Toast(Severity, String),
    ToggleKeys,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
