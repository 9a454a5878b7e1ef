use std::path::PathBuf;
use std::process::ExitCode;

use qota_lib::output::{ConfigOutput, QOTA_OUTPUT_VERSION};
use qota_lib::{QotaOutput, StateStore};

use crate::cli::OutputFormat;
use crate::formatting::write_output;
use crate::settings::resolve_capture_settings;

/// Show the persisted capture performance settings, updating them first
/// when any setting flag was given.
pub async fn run_config(
    state_dir: Option<PathBuf>,
    fast: Option<bool>,
    concurrency: Option<u8>,
    per_page_timeout_ms: Option<u64>,
    format: OutputFormat,
) -> ExitCode {
    let store = super::store_for(state_dir);
    let updating = fast.is_some() || concurrency.is_some() || per_page_timeout_ms.is_some();

    let resolved =
        resolve_capture_settings(store.load_config(), fast, concurrency, per_page_timeout_ms);
    if updating {
        store.save_config(&resolved.config);
    }

    let body = QotaOutput::Config(ConfigOutput {
        version: QOTA_OUTPUT_VERSION.to_string(),
        config: resolved.config,
        persisted: updating,
    });
    if let Err(err) = write_output(&body, format, None) {
        eprintln!("Failed to write output: {}", err);
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}
