use std::path::PathBuf;
use std::process::ExitCode;

use qota_lib::output::{ClearOutput, ExportOutput, QOTA_OUTPUT_VERSION};
use qota_lib::{
    clear, encode_accumulated, QotaError, QotaOutput, StateStore, ACCUMULATED_EXPORT_FILENAME,
};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};

/// Export the accumulated product set as CSV.
pub async fn run_export(
    state_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> ExitCode {
    let store = super::store_for(state_dir);
    let products = store.load_accumulated();
    if products.is_empty() {
        return render_error(
            QotaError::validation("no accumulated products to export"),
            format,
        );
    }

    let path = output.unwrap_or_else(|| PathBuf::from(ACCUMULATED_EXPORT_FILENAME));
    if let Err(err) = std::fs::write(&path, encode_accumulated(&products)) {
        return render_error(err.into(), format);
    }

    let body = QotaOutput::Export(ExportOutput {
        version: QOTA_OUTPUT_VERSION.to_string(),
        records: products.len(),
        output_path: path,
    });
    if let Err(err) = write_output(&body, format, None) {
        eprintln!("Failed to write output: {}", err);
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}

/// Clear the accumulated product set. Without --yes this reports what
/// would be removed and removes nothing.
pub async fn run_clear_accumulated(
    state_dir: Option<PathBuf>,
    yes: bool,
    format: OutputFormat,
) -> ExitCode {
    let store = super::store_for(state_dir);
    let remaining = clear(store.load_accumulated(), yes);
    if yes {
        store.clear_accumulated();
    }

    let body = QotaOutput::ClearAccumulated(ClearOutput {
        version: QOTA_OUTPUT_VERSION.to_string(),
        cleared: yes,
        remaining: remaining.len(),
    });
    if let Err(err) = write_output(&body, format, None) {
        eprintln!("Failed to write output: {}", err);
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}
