use store_proto::store::StoreId;

/// Where the operator currently is in the admin panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Application root (`/`).
    Root,
    /// `/{storeId}/settings`.
    Settings(StoreId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Settings(id) => format!("/{}/settings", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::Root.path(), "/");
        assert_eq!(
            Route::Settings(StoreId::new("123")).path(),
            "/123/settings"
        );
    }
}
