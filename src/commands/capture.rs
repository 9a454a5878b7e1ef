use std::path::PathBuf;
use std::process::ExitCode;

use qota_lib::output::{CaptureOutput, QOTA_OUTPUT_VERSION};
use qota_lib::{
    merge, BrowserStatus, CaptureClient, CaptureSession, QotaError, QotaOutput, StateStore,
};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::settings::resolve_capture_settings;

/// Run one capture round and optionally merge it into the accumulated set.
#[allow(clippy::too_many_arguments)]
pub async fn run_capture(
    backend_url: &str,
    devtools_url: &str,
    state_dir: Option<PathBuf>,
    verbose: bool,
    include_pattern: String,
    exclude_pattern: String,
    fast: Option<bool>,
    concurrency: Option<u8>,
    per_page_timeout_ms: Option<u64>,
    accumulate: bool,
    urls_only: bool,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> ExitCode {
    let store = super::store_for(state_dir);
    let resolved =
        resolve_capture_settings(store.load_config(), fast, concurrency, per_page_timeout_ms);
    // Flag overrides become the new persisted settings.
    if resolved.changed {
        store.save_config(&resolved.config);
    }

    let client = match CaptureClient::new(backend_url) {
        Ok(client) => client,
        Err(err) => return render_error(err, format),
    };
    let mut session = CaptureSession::new(client);

    if verbose {
        eprintln!(
            "Capturing from {} (fast: {}, concurrency: {}, per-page timeout: {} ms)",
            devtools_url,
            resolved.config.fast_mode,
            resolved.config.concurrency,
            resolved.config.per_page_timeout_ms
        );
    }

    if session.probe_reachability(devtools_url).await != BrowserStatus::Online {
        return render_error(
            QotaError::validation(format!(
                "debugged browser is unreachable at DevTools endpoint {}",
                devtools_url
            )),
            format,
        );
    }

    let result = match session
        .capture(devtools_url, &include_pattern, &exclude_pattern, &resolved.config)
        .await
    {
        Ok(result) => result.clone(),
        Err(err) => return render_error(err, format),
    };

    if urls_only {
        for tab in &result.tabs {
            println!("{}", tab.url);
        }
        return ExitCode::SUCCESS;
    }

    let output_path = match output {
        Some(path) => {
            if let Err(err) = std::fs::write(&path, qota_lib::encode_round(&result.tabs)) {
                return render_error(err.into(), format);
            }
            Some(path)
        }
        None => None,
    };

    let (accumulated_count, merged) = if accumulate {
        // Merging consumes the round; the session is done with it.
        let tabs = session.take_round().unwrap_or_else(|| result.tabs.clone());
        let merged_set = merge(&store.load_accumulated(), &tabs);
        store.save_accumulated(&merged_set);
        (merged_set.len(), true)
    } else {
        (store.load_accumulated().len(), false)
    };

    let body = QotaOutput::Capture(CaptureOutput {
        version: QOTA_OUTPUT_VERSION.to_string(),
        devtools_url: devtools_url.to_string(),
        total: result.total,
        tabs: result.tabs,
        accumulated_count,
        merged,
        output_path,
    });
    if let Err(err) = write_output(&body, format, None) {
        eprintln!("Failed to write output: {}", err);
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}
