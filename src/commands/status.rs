use std::process::ExitCode;

use qota_lib::output::{ListTabsOutput, StatusOutput, QOTA_OUTPUT_VERSION};
use qota_lib::{CaptureClient, QotaOutput, ReachabilityMonitor};

use crate::cli::OutputFormat;
use crate::formatting::{exit_code_for_status, render_error, write_output};

/// Check whether the debugged browser is reachable through the backend.
pub async fn run_status(
    backend_url: &str,
    devtools_url: &str,
    verbose: bool,
    format: OutputFormat,
) -> ExitCode {
    let client = match CaptureClient::new(backend_url) {
        Ok(client) => client,
        Err(err) => return render_error(err, format),
    };

    if verbose {
        eprintln!("Probing {} through {}", devtools_url, client.base_url());
    }

    let mut monitor = ReachabilityMonitor::new(devtools_url);
    let status = monitor.refresh(&client).await;

    let body = QotaOutput::Status(StatusOutput {
        version: QOTA_OUTPUT_VERSION.to_string(),
        devtools_url: devtools_url.to_string(),
        status,
    });
    if let Err(err) = write_output(&body, format, None) {
        eprintln!("Failed to write output: {}", err);
        return ExitCode::from(2);
    }

    exit_code_for_status(status)
}

/// Diagnostic listing of the tabs currently open in the debugged browser.
pub async fn run_list_tabs(
    backend_url: &str,
    devtools_url: &str,
    verbose: bool,
    format: OutputFormat,
) -> ExitCode {
    let client = match CaptureClient::new(backend_url) {
        Ok(client) => client,
        Err(err) => return render_error(err, format),
    };

    if verbose {
        eprintln!("Listing tabs at {} through {}", devtools_url, client.base_url());
    }

    let listing = match client.list_tabs(devtools_url).await {
        Ok(listing) => listing,
        Err(err) => return render_error(err, format),
    };

    let hint = (listing.total == 0).then(|| {
        "No tabs detected; open the product pages in the Chrome instance started with \
         --remote-debugging-port."
            .to_string()
    });

    let body = QotaOutput::ListTabs(ListTabsOutput {
        version: QOTA_OUTPUT_VERSION.to_string(),
        devtools_url: devtools_url.to_string(),
        total: listing.total,
        tabs: listing.tabs,
        hint,
    });
    if let Err(err) = write_output(&body, format, None) {
        eprintln!("Failed to write output: {}", err);
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}
