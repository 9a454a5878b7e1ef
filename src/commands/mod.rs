mod accumulated;
mod capture;
mod config;
mod status;

pub use accumulated::{run_clear_accumulated, run_export};
pub use capture::run_capture;
pub use config::run_config;
pub use status::{run_list_tabs, run_status};

use std::path::PathBuf;

use qota_lib::JsonFileStore;

/// State store for this invocation: explicit --state-dir or the default.
pub(crate) fn store_for(state_dir: Option<PathBuf>) -> JsonFileStore {
    state_dir.map(JsonFileStore::new).unwrap_or_default()
}
