use clap::{Parser, Subcommand, ValueEnum};
use qota_lib::{DEFAULT_BACKEND_URL, DEFAULT_DEVTOOLS_URL};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qota")]
#[command(
    version,
    about = "Qota capture client - harvest product tabs from a debugged browser and build a deduplicated catalog",
    long_about = "Qota capture client\n\nDrives capture rounds against the Qota capture backend: enumerate the tabs of a Chrome instance started with --remote-debugging-port, harvest product titles and UPCs, accumulate products across rounds (deduplicated by URL), and export CSV files.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "URL",
        default_value = DEFAULT_BACKEND_URL,
        help = "Base URL of the capture backend"
    )]
    pub backend_url: String,

    #[arg(
        long,
        global = true,
        value_name = "URL",
        default_value = DEFAULT_DEVTOOLS_URL,
        help = "DevTools endpoint of the debugged Chrome instance"
    )]
    pub devtools_url: String,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Directory for persisted state (settings + accumulated products); defaults to $QOTA_STATE_DIR or ~/.config/qota"
    )]
    pub state_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether the debugged browser is reachable
    Status {
        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// List the tabs currently open in the debugged browser (no extraction)
    ListTabs {
        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// Run one capture round against the debugged browser
    Capture {
        #[arg(
            long,
            default_value = "",
            value_name = "PATTERN",
            help = "Only capture tabs whose URL matches this pattern (forwarded to the backend verbatim)"
        )]
        include_pattern: String,

        #[arg(
            long,
            default_value = "",
            value_name = "PATTERN",
            help = "Skip tabs whose URL matches this pattern (forwarded to the backend verbatim)"
        )]
        exclude_pattern: String,

        #[arg(
            long,
            value_name = "BOOL",
            help = "Fast extraction mode (overrides and re-persists the saved setting)"
        )]
        fast: Option<bool>,

        #[arg(
            long,
            value_name = "N",
            help = "Backend page parallelism, 1-16 (overrides and re-persists the saved setting)"
        )]
        concurrency: Option<u8>,

        #[arg(
            long,
            value_name = "MS",
            help = "Per-page extraction timeout in ms (overrides and re-persists the saved setting)"
        )]
        per_page_timeout_ms: Option<u64>,

        #[arg(
            long,
            help = "Merge this round into the accumulated product set (deduplicated by URL)"
        )]
        accumulate: bool,

        #[arg(long, help = "Print only the captured URLs, one per line")]
        urls_only: bool,

        #[arg(
            long,
            short,
            value_name = "PATH",
            help = "Write this round as CSV to the given file"
        )]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// Export the accumulated product set as CSV
    Export {
        #[arg(
            long,
            short,
            value_name = "PATH",
            help = "Output file (defaults to produtos_acumulados.csv)"
        )]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// Clear the accumulated product set (irreversible)
    ClearAccumulated {
        #[arg(long, help = "Confirm the clear; without it nothing is removed")]
        yes: bool,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// Show or update the persisted capture performance settings
    Config {
        #[arg(long, value_name = "BOOL", help = "Set fast extraction mode")]
        fast: Option<bool>,

        #[arg(long, value_name = "N", help = "Set backend page parallelism (1-16)")]
        concurrency: Option<u8>,

        #[arg(long, value_name = "MS", help = "Set per-page extraction timeout in ms")]
        per_page_timeout_ms: Option<u64>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
