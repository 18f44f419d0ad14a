//! HTTP client for the `/api/stores/{storeId}` resource.
//!
//! `StoreApi` is the seam the settings screen talks to; `StoreClient` is the
//! reqwest-backed implementation. Any non-2xx response is an error and the
//! response body is never interpreted beyond logging.

use std::future::Future;
use std::time::Duration;

use reqwest::{StatusCode, Url};
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::store::{Store, StoreId, UpdateStore};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API base url {0:?}")]
    InvalidBaseUrl(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// The task running the request ended without producing a result.
    #[error("request aborted: {0}")]
    Aborted(String),
}

/// Remote operations on a single store.
pub trait StoreApi: Send + Sync {
    fn get_store(&self, id: &StoreId) -> impl Future<Output = Result<Store, ApiError>> + Send;

    fn update_store(
        &self,
        id: &StoreId,
        body: &UpdateStore,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn delete_store(&self, id: &StoreId) -> impl Future<Output = Result<(), ApiError>> + Send;
}

#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl StoreClient {
    pub fn new(base_url: &str, timeout: Duration, token: Option<String>) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("store-settings/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            config.token.clone(),
        )
    }

    /// `{base}/api/stores/{id}` with the id percent-encoded as one segment.
    pub fn store_url(&self, id: &StoreId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "stores", id.as_str()]);
        }
        url
    }

    fn request(&self, method: reqwest::Method, id: &StoreId) -> reqwest::RequestBuilder {
        let req = self.http.request(method, self.store_url(id));
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!("[api] request rejected with {}: {}", status, body);
    Err(ApiError::Status { status, body })
}

impl StoreApi for StoreClient {
    async fn get_store(&self, id: &StoreId) -> Result<Store, ApiError> {
        debug!("[api] GET store {}", id);
        let response = self.request(reqwest::Method::GET, id).send().await?;
        let store = check(response).await?.json::<Store>().await?;
        Ok(store)
    }

    async fn update_store(&self, id: &StoreId, body: &UpdateStore) -> Result<(), ApiError> {
        debug!("[api] PATCH store {} name={:?}", id, body.name);
        let response = self
            .request(reqwest::Method::PATCH, id)
            .json(body)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn delete_store(&self, id: &StoreId) -> Result<(), ApiError> {
        debug!("[api] DELETE store {}", id);
        let response = self.request(reqwest::Method::DELETE, id).send().await?;
        check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> StoreClient {
        StoreClient::new(base, Duration::from_secs(1), None).unwrap()
    }

    #[test]
    fn test_store_url() {
        let c = client("http://localhost:3000");
        assert_eq!(
            c.store_url(&StoreId::new("123")).as_str(),
            "http://localhost:3000/api/stores/123"
        );
    }

    #[test]
    fn test_store_url_keeps_base_path() {
        let c = client("https://admin.example.com/shop/");
        assert_eq!(
            c.store_url(&StoreId::new("abc")).as_str(),
            "https://admin.example.com/shop/api/stores/abc"
        );
    }

    #[test]
    fn test_store_url_encodes_id() {
        let c = client("http://localhost:3000");
        assert_eq!(
            c.store_url(&StoreId::new("a/b c")).as_str(),
            "http://localhost:3000/api/stores/a%2Fb%20c"
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = StoreClient::new("not a url", Duration::from_secs(1), None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
        let err = StoreClient::new("mailto:ops@example.com", Duration::from_secs(1), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
    }
}
