//! Persisted client-side state: capture performance settings and the
//! accumulated product list.
//!
//! Persistence is deliberately fail-soft. Configuration loss is non-fatal,
//! so read, parse, and write errors never reach the caller; a load falls
//! back to defaults (or an empty list) and a failed save leaves the
//! in-memory values authoritative until the next successful write.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::types::{AccumulatedProduct, CaptureConfig};

/// File holding the capture performance settings.
pub const CONFIG_FILE: &str = "capture_perf.json";
/// File holding the accumulated product list.
pub const ACCUMULATED_FILE: &str = "produtos_acumulados.json";

/// Durable key-value storage for the capture workflow. Injected as a
/// dependency so tests can substitute an in-memory double.
pub trait StateStore {
    /// Never fails: any read or parse error yields defaults.
    fn load_config(&self) -> CaptureConfig;

    /// Never fails: write errors are swallowed.
    fn save_config(&self, config: &CaptureConfig);

    /// Never fails: returns empty on any error. A stored value that does
    /// not deserialize to an array is discarded entirely, no partial
    /// recovery.
    fn load_accumulated(&self) -> Vec<AccumulatedProduct>;

    /// Never fails: write errors are swallowed.
    fn save_accumulated(&self, products: &[AccumulatedProduct]);

    /// Best-effort deletion; a failure to delete is not surfaced. The
    /// caller clears its in-memory list regardless, so the stale copy is
    /// overwritten on the next successful save.
    fn clear_accumulated(&self);
}

/// File-backed store keeping one JSON document per key under a state
/// directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default state directory: `$QOTA_STATE_DIR`, else `~/.config/qota`,
    /// else a per-user temp directory.
    pub fn default_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("QOTA_STATE_DIR") {
            if !dir.trim().is_empty() {
                return PathBuf::from(dir);
            }
        }
        if let Ok(home) = std::env::var("HOME") {
            if !home.trim().is_empty() {
                return Path::new(&home).join(".config").join("qota");
            }
        }
        std::env::temp_dir().join("qota")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, file: &str) -> Option<T> {
        let raw = fs::read_to_string(self.dir.join(file)).ok()?;
        serde_json::from_str(&raw).ok()
    }

    fn write_json<T: serde::Serialize>(&self, file: &str, value: &T) {
        let Ok(raw) = serde_json::to_string_pretty(value) else {
            return;
        };
        let _ = fs::create_dir_all(&self.dir);
        let _ = fs::write(self.dir.join(file), raw);
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}

impl StateStore for JsonFileStore {
    fn load_config(&self) -> CaptureConfig {
        self.read_json(CONFIG_FILE).unwrap_or_default()
    }

    fn save_config(&self, config: &CaptureConfig) {
        self.write_json(CONFIG_FILE, config);
    }

    fn load_accumulated(&self) -> Vec<AccumulatedProduct> {
        self.read_json(ACCUMULATED_FILE).unwrap_or_default()
    }

    fn save_accumulated(&self, products: &[AccumulatedProduct]) {
        self.write_json(ACCUMULATED_FILE, &products);
    }

    fn clear_accumulated(&self) {
        let _ = fs::remove_file(self.dir.join(ACCUMULATED_FILE));
    }
}

/// In-memory store, primarily a test double.
#[derive(Debug, Default)]
pub struct MemoryStore {
    config: Mutex<Option<CaptureConfig>>,
    accumulated: Mutex<Vec<AccumulatedProduct>>,
}

impl StateStore for MemoryStore {
    fn load_config(&self) -> CaptureConfig {
        self.config
            .lock()
            .map(|guard| guard.unwrap_or_default())
            .unwrap_or_default()
    }

    fn save_config(&self, config: &CaptureConfig) {
        if let Ok(mut guard) = self.config.lock() {
            *guard = Some(*config);
        }
    }

    fn load_accumulated(&self) -> Vec<AccumulatedProduct> {
        self.accumulated
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn save_accumulated(&self, products: &[AccumulatedProduct]) {
        if let Ok(mut guard) = self.accumulated.lock() {
            *guard = products.to_vec();
        }
    }

    fn clear_accumulated(&self) {
        if let Ok(mut guard) = self.accumulated.lock() {
            guard.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn product(url: &str) -> AccumulatedProduct {
        AccumulatedProduct {
            product_title: "Widget".into(),
            upc: "012345678905".into(),
            upc_method: "jsonld".into(),
            url: url.into(),
        }
    }

    #[test]
    fn config_round_trips_through_files() {
        let dir = TempDir::new().expect("tempdir");
        let store = JsonFileStore::new(dir.path());

        let cfg = CaptureConfig {
            fast_mode: false,
            concurrency: 8,
            per_page_timeout_ms: 2500,
        };
        store.save_config(&cfg);
        assert_eq!(store.load_config(), cfg);
    }

    #[test]
    fn missing_config_yields_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let store = JsonFileStore::new(dir.path());
        assert_eq!(store.load_config(), CaptureConfig::default());
    }

    #[test]
    fn corrupted_config_yields_defaults() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), "{not json").expect("write garbage");
        let store = JsonFileStore::new(dir.path());
        assert_eq!(store.load_config(), CaptureConfig::default());
    }

    #[test]
    fn accumulated_round_trips_through_files() {
        let dir = TempDir::new().expect("tempdir");
        let store = JsonFileStore::new(dir.path());

        let products = vec![product("https://a.example/1"), product("https://a.example/2")];
        store.save_accumulated(&products);
        assert_eq!(store.load_accumulated(), products);
    }

    #[test]
    fn non_array_accumulated_value_is_discarded_entirely() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(
            dir.path().join(ACCUMULATED_FILE),
            r#"{"product_title":"Widget"}"#,
        )
        .expect("write object");
        let store = JsonFileStore::new(dir.path());
        assert!(store.load_accumulated().is_empty());
    }

    #[test]
    fn clear_removes_the_accumulated_file() {
        let dir = TempDir::new().expect("tempdir");
        let store = JsonFileStore::new(dir.path());
        store.save_accumulated(&[product("https://a.example/1")]);
        store.clear_accumulated();
        assert!(store.load_accumulated().is_empty());
        // Clearing again is still fail-soft.
        store.clear_accumulated();
    }

    #[test]
    fn memory_store_behaves_like_the_file_store() {
        let store = MemoryStore::default();
        assert_eq!(store.load_config(), CaptureConfig::default());

        let cfg = CaptureConfig {
            concurrency: 3,
            ..CaptureConfig::default()
        };
        store.save_config(&cfg);
        assert_eq!(store.load_config(), cfg);

        store.save_accumulated(&[product("https://a.example/1")]);
        assert_eq!(store.load_accumulated().len(), 1);
        store.clear_accumulated();
        assert!(store.load_accumulated().is_empty());
    }
}
