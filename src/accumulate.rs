//! Cross-round product accumulation.
//!
//! A capture round is transient; merging it into the durable set is the
//! only way its products survive. Deduplication is keyed by URL with a
//! first-write-wins rule: a URL captured again in a later round never
//! overwrites the entry recorded for it the first time.

use std::collections::HashSet;

use crate::types::{AccumulatedProduct, CapturedTab};

/// Merge one capture round into the accumulated set.
///
/// Pure: inputs are not mutated. All of `current` is preserved, newly
/// admitted entries follow in `incoming` order, and tabs whose URL is
/// already present are dropped. Applying the same round twice is a no-op.
pub fn merge(current: &[AccumulatedProduct], incoming: &[CapturedTab]) -> Vec<AccumulatedProduct> {
    let mut seen: HashSet<&str> = current.iter().map(|p| p.url.as_str()).collect();
    let mut merged = current.to_vec();

    for tab in incoming {
        if seen.insert(tab.url.as_str()) {
            merged.push(AccumulatedProduct::from(tab));
        }
    }

    merged
}

/// Remove every accumulated entry, but only when the operator confirmed.
/// This is the sole operation that shrinks the durable set.
pub fn clear(current: Vec<AccumulatedProduct>, confirmed: bool) -> Vec<AccumulatedProduct> {
    if confirmed {
        Vec::new()
    } else {
        current
    }
}
