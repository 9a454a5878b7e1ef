use serde::{Deserialize, Serialize};

/// Placeholder display name for tabs where neither the backend nor the
/// browser produced a usable title.
pub const UNTITLED_PLACEHOLDER: &str = "Sem título";

/// Capture performance settings forwarded to the backend.
///
/// Loaded once at startup from the state store and re-persisted in full on
/// every mutation (last-write-wins, no partial merge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Fast vs. thorough extraction on the backend side.
    #[serde(default = "default_fast_mode")]
    pub fast_mode: bool,
    /// How many pages the backend may process in parallel (1..=16).
    /// This is a backend hint, not client-side parallelism.
    #[serde(default = "default_concurrency")]
    pub concurrency: u8,
    /// Per-page extraction timeout forwarded to the backend.
    #[serde(default = "default_per_page_timeout_ms")]
    pub per_page_timeout_ms: u64,
}

pub const CONCURRENCY_MIN: u8 = 1;
pub const CONCURRENCY_MAX: u8 = 16;

fn default_fast_mode() -> bool {
    true
}

fn default_concurrency() -> u8 {
    6
}

fn default_per_page_timeout_ms() -> u64 {
    1200
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            fast_mode: default_fast_mode(),
            concurrency: default_concurrency(),
            per_page_timeout_ms: default_per_page_timeout_ms(),
        }
    }
}

impl CaptureConfig {
    /// Clamp the backend parallelism hint into its documented range.
    pub fn clamped(mut self) -> Self {
        self.concurrency = self.concurrency.clamp(CONCURRENCY_MIN, CONCURRENCY_MAX);
        self
    }
}

/// One tab as returned by a capture round. Ephemeral: discarded when the
/// round is cleared, replaced, or consumed into the accumulated set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedTab {
    pub url: String,
    /// Raw browser tab title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Backend-inferred product name; preferred over `title` for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    /// Diagnostic label for how the UPC was derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upc_method: Option<String>,
}

impl CapturedTab {
    /// Display name: backend product title, then raw tab title, then the
    /// fixed placeholder. Blank strings count as absent.
    pub fn display_title(&self) -> &str {
        non_blank(self.product_title.as_deref())
            .or_else(|| non_blank(self.title.as_deref()))
            .unwrap_or(UNTITLED_PLACEHOLDER)
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Result of one capture round; tab order is whatever the backend returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureResult {
    pub total: usize,
    pub tabs: Vec<CapturedTab>,
}

/// Durable product entry, keyed by `url` in the accumulated set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulatedProduct {
    pub product_title: String,
    pub upc: String,
    pub upc_method: String,
    pub url: String,
}

impl From<&CapturedTab> for AccumulatedProduct {
    fn from(tab: &CapturedTab) -> Self {
        Self {
            product_title: tab.display_title().to_string(),
            upc: tab.upc.clone().unwrap_or_default(),
            upc_method: tab.upc_method.clone().unwrap_or_default(),
            url: tab.url.clone(),
        }
    }
}

/// Lightweight tab entry from the diagnostic listing (no UPC extraction).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSummary {
    #[serde(default)]
    pub title: String,
    pub url: String,
}

/// Diagnostic listing of the tabs currently open in the debugged browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabListing {
    pub total: usize,
    pub tabs: Vec<TabSummary>,
}

/// Reachability of the remote-debuggable browser as seen by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserStatus {
    /// Initial state, before the first probe completes.
    Checking,
    Online,
    Offline,
}

impl std::fmt::Display for BrowserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrowserStatus::Checking => write!(f, "checking"),
            BrowserStatus::Online => write!(f, "online"),
            BrowserStatus::Offline => write!(f, "offline"),
        }
    }
}
