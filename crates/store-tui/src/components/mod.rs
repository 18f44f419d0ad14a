pub mod alert_modal;
pub mod root_view;
pub mod settings_view;
