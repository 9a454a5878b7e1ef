//! HTTP client for the capture backend.
//!
//! The backend owns tab enumeration, UPC extraction, and pattern
//! compilation; this client only forwards parameters and decodes results.

use serde::Deserialize;

use crate::error::{QotaError, Result};
use crate::types::{BrowserStatus, CaptureConfig, CaptureResult, TabListing};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_DEVTOOLS_URL: &str = "http://127.0.0.1:9222";

#[derive(Debug, Deserialize)]
struct BrowserStatusResponse {
    status: BrowserStatus,
}

#[derive(Debug, Clone)]
pub struct CaptureClient {
    client: reqwest::Client,
    base_url: String,
}

impl CaptureClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe whether the debugged browser is reachable. Any transport
    /// failure or non-decodable response counts as offline.
    pub async fn probe(&self, devtools_url: &str) -> BrowserStatus {
        match self.browser_status(devtools_url).await {
            Ok(status) => status,
            Err(_) => BrowserStatus::Offline,
        }
    }

    pub async fn browser_status(&self, devtools_url: &str) -> Result<BrowserStatus> {
        validate_devtools_url(devtools_url)?;
        let url = format!("{}/api/capture/browser-status", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("devtools_url", devtools_url)])
            .send()
            .await?;

        let body: BrowserStatusResponse = handle_response(response).await?;
        Ok(body.status)
    }

    /// Run one capture round. Patterns are forwarded verbatim (empty means
    /// no filtering on that axis); performance settings come from `config`.
    pub async fn capture_tabs(
        &self,
        devtools_url: &str,
        include_pattern: &str,
        exclude_pattern: &str,
        config: &CaptureConfig,
    ) -> Result<CaptureResult> {
        validate_devtools_url(devtools_url)?;
        let config = config.clamped();
        let url = format!("{}/api/capture/capture-tabs", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[
                ("devtools_url", devtools_url),
                ("include_pattern", include_pattern),
                ("exclude_pattern", exclude_pattern),
                ("fast", if config.fast_mode { "1" } else { "0" }),
                ("concurrency", &config.concurrency.to_string()),
                (
                    "per_page_timeout_ms",
                    &config.per_page_timeout_ms.to_string(),
                ),
            ])
            .send()
            .await?;

        handle_response(response).await
    }

    /// Diagnostic listing of open tabs, without UPC extraction.
    pub async fn list_tabs(&self, devtools_url: &str) -> Result<TabListing> {
        validate_devtools_url(devtools_url)?;
        let url = format!("{}/api/capture/list-tabs", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("devtools_url", devtools_url)])
            .send()
            .await?;

        handle_response(response).await
    }
}

fn validate_devtools_url(devtools_url: &str) -> Result<()> {
    if devtools_url.trim().is_empty() {
        return Err(QotaError::validation("DevTools URL must not be empty"));
    }
    Ok(())
}

async fn handle_response<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(QotaError::backend(Some(status), message));
    }

    Ok(response.json().await?)
}
