//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use store_proto::store::{Store, StoreId};

use crate::route::Route;

pub struct AppState {
    /// The store this session administers.
    pub store_id: StoreId,
    /// Last copy fetched from the backend; `None` until loaded or after eviction.
    pub store: Option<Store>,
    pub route: Route,
    /// Backend origin, shown in the header.
    pub api_base_url: String,
    /// Most recent log line, shown in the bottom bar.
    pub last_log: Option<String>,
}

impl AppState {
    pub fn new(store_id: StoreId, api_base_url: impl Into<String>) -> Self {
        Self {
            route: Route::Settings(store_id.clone()),
            store_id,
            store: None,
            api_base_url: api_base_url.into(),
            last_log: None,
        }
    }

    /// Display name for the header: cached name, else the raw id.
    pub fn store_label(&self) -> String {
        match &self.store {
            Some(store) => store.name.clone(),
            None => self.store_id.to_string(),
        }
    }
}
