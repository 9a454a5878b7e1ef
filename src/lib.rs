//! Qota capture client library
//!
//! Client-side core of the Qota sourcing workflow: drives tab-capture
//! rounds against the capture backend, accumulates products across rounds
//! with URL-keyed deduplication, persists configuration and the
//! accumulated list between sessions, and encodes CSV exports.
//!
//! # Module Overview
//!
//! - [`backend`] - HTTP client for the capture backend
//! - [`session`] - One-round-at-a-time capture session controller
//! - [`accumulate`] - Pure merge/clear over the durable product set
//! - [`export`] - CSV encoding for round and accumulated exports
//! - [`store`] - Fail-soft persisted state (config + accumulated list)
//! - [`monitor`] - Browser reachability tracking
//! - [`types`] - Core data types
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use qota_lib::{CaptureClient, CaptureSession, JsonFileStore, StateStore};
//!
//! # async fn example() -> qota_lib::Result<()> {
//! let store = JsonFileStore::default();
//! let config = store.load_config();
//!
//! let client = CaptureClient::new("http://127.0.0.1:8000")?;
//! let mut session = CaptureSession::new(client);
//! let result = session
//!     .capture("http://127.0.0.1:9222", "", "", &config)
//!     .await?;
//!
//! let merged = qota_lib::accumulate::merge(&store.load_accumulated(), &result.tabs);
//! store.save_accumulated(&merged);
//! # Ok(())
//! # }
//! ```

pub mod accumulate;
pub mod backend;
pub mod error;
pub mod export;
pub mod monitor;
pub mod output;
pub mod session;
pub mod store;
pub mod types;

pub use accumulate::{clear, merge};
pub use backend::{CaptureClient, DEFAULT_BACKEND_URL, DEFAULT_DEVTOOLS_URL};
pub use error::{ErrorCategory, ErrorPayload, QotaError, Result};
pub use export::{
    amazon_search_url, encode_accumulated, encode_round, ACCUMULATED_EXPORT_FILENAME,
    ROUND_EXPORT_FILENAME,
};
pub use monitor::ReachabilityMonitor;
pub use output::{
    CaptureOutput, ClearOutput, ConfigOutput, ErrorOutput, ExportOutput, ListTabsOutput,
    QotaOutput, StatusOutput, QOTA_OUTPUT_VERSION,
};
pub use session::{CaptureSession, SessionState};
pub use store::{JsonFileStore, MemoryStore, StateStore, ACCUMULATED_FILE, CONFIG_FILE};
pub use types::{
    AccumulatedProduct, BrowserStatus, CaptureConfig, CaptureResult, CapturedTab, TabListing,
    TabSummary, UNTITLED_PLACEHOLDER,
};
