use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use qota_lib::output::QOTA_OUTPUT_VERSION;
use qota_lib::{BrowserStatus, ErrorOutput, QotaError, QotaOutput};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &QotaOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the fatal exit code.
pub fn render_error(err: QotaError, format: OutputFormat) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = QotaOutput::Error(ErrorOutput {
        version: QOTA_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            println!("{content}");
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, None) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    // Reserve exit code 2 for fatal/errors; an offline browser uses 1.
    ExitCode::from(2)
}

/// Exit code for the status command: offline is a failure callers can
/// branch on without parsing output.
pub fn exit_code_for_status(status: BrowserStatus) -> ExitCode {
    if status == BrowserStatus::Online {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Write JSON output to stdout.
fn write_json_output(
    body: &QotaOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &QotaOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &QotaOutput, colorize: bool) -> String {
    match body {
        QotaOutput::Status(out) => {
            let mut buf = String::new();
            let (label, code) = match out.status {
                BrowserStatus::Online => ("ONLINE", "32"),
                BrowserStatus::Offline => ("OFFLINE", "31"),
                BrowserStatus::Checking => ("CHECKING", "33"),
            };
            let status = color(label, code, colorize);
            writeln!(buf, "Browser {} at {}", status, out.devtools_url).ok();
            if out.status == BrowserStatus::Offline {
                writeln!(
                    buf,
                    "Hint: start Chrome with --remote-debugging-port and re-check."
                )
                .ok();
            }
            buf
        }
        QotaOutput::ListTabs(out) => {
            let mut buf = String::new();
            let header = color("[TABS]", "36", colorize);
            writeln!(buf, "{} {} open tab(s) at {}", header, out.total, out.devtools_url).ok();
            for tab in &out.tabs {
                let title = if tab.title.is_empty() {
                    "(untitled)"
                } else {
                    tab.title.as_str()
                };
                writeln!(buf, "- {}", title).ok();
                writeln!(buf, "  {}", tab.url).ok();
            }
            if let Some(hint) = &out.hint {
                writeln!(buf, "Hint: {}", hint).ok();
            }
            buf
        }
        QotaOutput::Capture(out) => {
            let mut buf = String::new();
            let header = color("[CAPTURE]", "32", colorize);
            writeln!(buf, "{} {} tab(s) captured", header, out.total).ok();
            for tab in &out.tabs {
                let upc = tab.upc.as_deref().unwrap_or("-");
                writeln!(buf, "- {} (UPC {})", tab.display_title(), upc).ok();
                writeln!(buf, "  {}", tab.url).ok();
            }
            if out.merged {
                writeln!(buf, "Accumulated: {} product(s)", out.accumulated_count).ok();
            }
            if let Some(path) = &out.output_path {
                writeln!(buf, "CSV: {}", path.display()).ok();
            }
            buf
        }
        QotaOutput::Export(out) => {
            let mut buf = String::new();
            let header = color("[EXPORT]", "32", colorize);
            writeln!(
                buf,
                "{} {} record(s) -> {}",
                header,
                out.records,
                out.output_path.display()
            )
            .ok();
            buf
        }
        QotaOutput::ClearAccumulated(out) => {
            let mut buf = String::new();
            if out.cleared {
                writeln!(buf, "Accumulated set cleared.").ok();
            } else {
                writeln!(
                    buf,
                    "Nothing cleared; {} product(s) kept. Pass --yes to confirm.",
                    out.remaining
                )
                .ok();
            }
            buf
        }
        QotaOutput::Config(out) => {
            let mut buf = String::new();
            let header = color("[CONFIG]", "36", colorize);
            writeln!(buf, "{} capture performance settings", header).ok();
            writeln!(buf, "- fast mode:            {}", out.config.fast_mode).ok();
            writeln!(buf, "- concurrency:          {}", out.config.concurrency).ok();
            writeln!(buf, "- per-page timeout:     {} ms", out.config.per_page_timeout_ms).ok();
            if out.persisted {
                writeln!(buf, "Saved.").ok();
            }
            buf
        }
        QotaOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
