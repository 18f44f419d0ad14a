//! Settings form model — draft value, validation, and the request phase.
//!
//! # Phases
//! ```text
//!  Idle        — nothing in flight, dialog closed
//!  Updating    — PATCH in flight
//!  Confirming  — delete dialog open, waiting for the operator
//!  Deleting    — DELETE in flight, dialog still shown (busy)
//! ```
//! Every request completion goes through `Phase::finish`, which always lands
//! on `Idle`. `loading` and `dialog_open` are derived, never stored.

use store_proto::store::UpdateStore;

/// Error shown under the name field when it is empty.
pub const NAME_TOO_SHORT: &str = "String must contain at least 1 character(s)";

/// Values that passed validation and may be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsValues {
    pub name: String,
}

impl From<SettingsValues> for UpdateStore {
    fn from(values: SettingsValues) -> Self {
        UpdateStore { name: values.name }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

pub fn validate(draft: &FormDraft) -> Result<SettingsValues, FieldErrors> {
    if draft.name.chars().count() < 1 {
        return Err(FieldErrors {
            name: Some(NAME_TOO_SHORT.to_string()),
        });
    }
    Ok(SettingsValues {
        name: draft.name.clone(),
    })
}

/// The editable form value plus its current field errors.
///
/// Errors are only shown after the first submit attempt; from then on every
/// edit re-validates so the message clears as soon as the field is fixed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub name: String,
    pub errors: FieldErrors,
    submitted: bool,
}

impl FormDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            errors: FieldErrors::default(),
            submitted: false,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        if self.submitted {
            self.errors = validate(self).err().unwrap_or_default();
        }
    }

    /// Validate for submission, recording errors on failure.
    pub fn submit(&mut self) -> Option<SettingsValues> {
        self.submitted = true;
        match validate(self) {
            Ok(values) => {
                self.errors = FieldErrors::default();
                Some(values)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Updating,
    Confirming,
    Deleting,
}

impl Phase {
    pub fn loading(self) -> bool {
        matches!(self, Self::Updating | Self::Deleting)
    }

    pub fn dialog_open(self) -> bool {
        matches!(self, Self::Confirming | Self::Deleting)
    }

    /// `Idle → Updating`. Returns false (and stays put) from any other phase.
    pub fn begin_update(&mut self) -> bool {
        self.transition(Self::Idle, Self::Updating)
    }

    /// `Idle → Confirming`.
    pub fn open_dialog(&mut self) -> bool {
        self.transition(Self::Idle, Self::Confirming)
    }

    /// `Confirming → Idle`. Ignored while the delete is in flight.
    pub fn close_dialog(&mut self) -> bool {
        self.transition(Self::Confirming, Self::Idle)
    }

    /// `Confirming → Deleting`.
    pub fn begin_delete(&mut self) -> bool {
        self.transition(Self::Confirming, Self::Deleting)
    }

    /// Any phase → `Idle`. Clears loading and closes the dialog.
    pub fn finish(&mut self) {
        *self = Self::Idle;
    }

    fn transition(&mut self, from: Self, to: Self) -> bool {
        if *self == from {
            *self = to;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_non_empty() {
        for name in ["A", "Acme Co", " ", "Ünïcödé store"] {
            let values = validate(&FormDraft::new(name)).unwrap();
            assert_eq!(values.name, name);
        }
    }

    #[test]
    fn test_validate_rejects_empty() {
        let errors = validate(&FormDraft::new("")).unwrap_err();
        assert_eq!(errors.name.as_deref(), Some(NAME_TOO_SHORT));
    }

    #[test]
    fn test_errors_hidden_until_first_submit() {
        let mut draft = FormDraft::new("Acme");
        draft.set_name("");
        assert!(draft.errors.is_empty());

        assert_eq!(draft.submit(), None);
        assert_eq!(draft.errors.name.as_deref(), Some(NAME_TOO_SHORT));

        draft.set_name("A");
        assert!(draft.errors.is_empty());
        draft.set_name("");
        assert!(!draft.errors.is_empty());
    }

    #[test]
    fn test_values_convert_to_update_body() {
        let body: UpdateStore = SettingsValues {
            name: "Acme Co".into(),
        }
        .into();
        assert_eq!(body.name, "Acme Co");
    }

    #[test]
    fn test_phase_flags() {
        assert!(!Phase::Idle.loading() && !Phase::Idle.dialog_open());
        assert!(Phase::Updating.loading() && !Phase::Updating.dialog_open());
        assert!(!Phase::Confirming.loading() && Phase::Confirming.dialog_open());
        assert!(Phase::Deleting.loading() && Phase::Deleting.dialog_open());
    }

    #[test]
    fn test_update_is_not_reentrant() {
        let mut phase = Phase::Idle;
        assert!(phase.begin_update());
        assert!(!phase.begin_update());
        assert!(!phase.open_dialog());
        phase.finish();
        assert_eq!(phase, Phase::Idle);
    }

    #[test]
    fn test_delete_requires_confirmation_step() {
        let mut phase = Phase::Idle;
        assert!(!phase.begin_delete());
        assert!(phase.open_dialog());
        assert!(phase.begin_delete());
        assert!(!phase.close_dialog());
        assert_eq!(phase, Phase::Deleting);
        phase.finish();
        assert!(!phase.dialog_open());
        assert!(!phase.loading());
    }

    #[test]
    fn test_finish_always_idles() {
        for mut phase in [Phase::Idle, Phase::Updating, Phase::Confirming, Phase::Deleting] {
            phase.finish();
            assert_eq!(phase, Phase::Idle);
        }
    }
}
