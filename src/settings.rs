use qota_lib::CaptureConfig;

/// Capture settings after merging CLI flags over the persisted config.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedCaptureSettings {
    pub config: CaptureConfig,
    /// Whether the flags changed anything worth re-persisting.
    pub changed: bool,
}

/// Merge CLI flags with the persisted config, preferring flags when
/// present. The result is clamped into the documented ranges, so an
/// out-of-range `--concurrency` is corrected rather than rejected.
pub fn resolve_capture_settings(
    persisted: CaptureConfig,
    fast: Option<bool>,
    concurrency: Option<u8>,
    per_page_timeout_ms: Option<u64>,
) -> ResolvedCaptureSettings {
    let config = CaptureConfig {
        fast_mode: fast.unwrap_or(persisted.fast_mode),
        concurrency: concurrency.unwrap_or(persisted.concurrency),
        per_page_timeout_ms: per_page_timeout_ms.unwrap_or(persisted.per_page_timeout_ms),
    }
    .clamped();

    ResolvedCaptureSettings {
        config,
        changed: config != persisted,
    }
}
