use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ErrorPayload;
use crate::types::{BrowserStatus, CaptureConfig, CapturedTab, TabSummary};

/// Schema version for output payloads.
pub const QOTA_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum QotaOutput {
    Status(StatusOutput),
    ListTabs(ListTabsOutput),
    Capture(CaptureOutput),
    Export(ExportOutput),
    ClearAccumulated(ClearOutput),
    Config(ConfigOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOutput {
    pub version: String,
    pub devtools_url: String,
    pub status: BrowserStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTabsOutput {
    pub version: String,
    pub devtools_url: String,
    pub total: usize,
    pub tabs: Vec<TabSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOutput {
    pub version: String,
    pub devtools_url: String,
    pub total: usize,
    pub tabs: Vec<CapturedTab>,
    /// Size of the durable set after an optional merge.
    pub accumulated_count: usize,
    pub merged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutput {
    pub version: String,
    pub records: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearOutput {
    pub version: String,
    pub cleared: bool,
    pub remaining: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOutput {
    pub version: String,
    pub config: CaptureConfig,
    pub persisted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}
