//! Multi-round accumulation against a real file-backed store.

use qota_lib::{clear, merge, CapturedTab, JsonFileStore, StateStore};
use tempfile::TempDir;

fn tab(url: &str, title: &str, upc: Option<&str>) -> CapturedTab {
    CapturedTab {
        url: url.into(),
        title: None,
        product_title: Some(title.into()),
        upc: upc.map(Into::into),
        upc_method: upc.map(|_| "jsonld".into()),
    }
}

#[test]
fn products_accumulate_across_rounds_with_url_dedup() {
    let dir = TempDir::new().expect("tempdir");
    let store = JsonFileStore::new(dir.path());

    let round1 = vec![
        tab("https://supplier.example/p/1", "One", Some("111")),
        tab("https://supplier.example/p/2", "Two", None),
    ];
    let merged = merge(&store.load_accumulated(), &round1);
    store.save_accumulated(&merged);
    assert_eq!(store.load_accumulated().len(), 2);

    // Second round overlaps on p/2 and adds p/3.
    let round2 = vec![
        tab("https://supplier.example/p/2", "Two updated", Some("222")),
        tab("https://supplier.example/p/3", "Three", None),
    ];
    let merged = merge(&store.load_accumulated(), &round2);
    store.save_accumulated(&merged);

    let accumulated = store.load_accumulated();
    assert_eq!(accumulated.len(), 3);
    // First write wins: p/2 keeps its original fields.
    assert_eq!(accumulated[1].url, "https://supplier.example/p/2");
    assert_eq!(accumulated[1].product_title, "Two");
    assert_eq!(accumulated[1].upc, "");
    assert_eq!(accumulated[2].product_title, "Three");
}

#[test]
fn accumulated_set_survives_a_store_reopen() {
    let dir = TempDir::new().expect("tempdir");
    {
        let store = JsonFileStore::new(dir.path());
        let merged = merge(
            &[],
            &[tab("https://supplier.example/p/1", "One", Some("111"))],
        );
        store.save_accumulated(&merged);
    }

    let reopened = JsonFileStore::new(dir.path());
    let accumulated = reopened.load_accumulated();
    assert_eq!(accumulated.len(), 1);
    assert_eq!(accumulated[0].upc, "111");
}

#[test]
fn unconfirmed_clear_leaves_the_stored_set_intact() {
    let dir = TempDir::new().expect("tempdir");
    let store = JsonFileStore::new(dir.path());
    let merged = merge(&[], &[tab("https://supplier.example/p/1", "One", None)]);
    store.save_accumulated(&merged);

    let remaining = clear(store.load_accumulated(), false);
    assert_eq!(remaining.len(), 1);
    assert_eq!(store.load_accumulated().len(), 1);
}

#[test]
fn confirmed_clear_empties_the_store() {
    let dir = TempDir::new().expect("tempdir");
    let store = JsonFileStore::new(dir.path());
    let merged = merge(&[], &[tab("https://supplier.example/p/1", "One", None)]);
    store.save_accumulated(&merged);

    let remaining = clear(store.load_accumulated(), true);
    assert!(remaining.is_empty());
    store.clear_accumulated();
    assert!(store.load_accumulated().is_empty());
}
