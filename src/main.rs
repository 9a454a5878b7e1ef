mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{
    run_capture, run_clear_accumulated, run_config, run_export, run_list_tabs, run_status,
};

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let args = cli::parse();

    match args.command {
        Commands::Status { format } => {
            run_status(&args.backend_url, &args.devtools_url, args.verbose, format).await
        }
        Commands::ListTabs { format } => {
            run_list_tabs(&args.backend_url, &args.devtools_url, args.verbose, format).await
        }
        Commands::Capture {
            include_pattern,
            exclude_pattern,
            fast,
            concurrency,
            per_page_timeout_ms,
            accumulate,
            urls_only,
            output,
            format,
        } => {
            run_capture(
                &args.backend_url,
                &args.devtools_url,
                args.state_dir,
                args.verbose,
                include_pattern,
                exclude_pattern,
                fast,
                concurrency,
                per_page_timeout_ms,
                accumulate,
                urls_only,
                output,
                format,
            )
            .await
        }
        Commands::Export { output, format } => run_export(args.state_dir, output, format).await,
        Commands::ClearAccumulated { yes, format } => {
            run_clear_accumulated(args.state_dir, yes, format).await
        }
        Commands::Config {
            fast,
            concurrency,
            per_page_timeout_ms,
            format,
        } => run_config(args.state_dir, fast, concurrency, per_page_timeout_ms, format).await,
    }
}
