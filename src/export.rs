//! CSV export of capture rounds and the accumulated set.
//!
//! The byte format is fixed by the downstream sheet imports this feeds:
//! UTF-8 with a leading byte-order mark, comma-delimited, every cell
//! wrapped in double quotes, rows newline-terminated. Embedded double
//! quotes are NOT escaped; the importers tolerate them and changing the
//! bytes would break diffing against previously exported files.

use url::Url;

use crate::types::{AccumulatedProduct, CapturedTab};

/// Suggested filename for a single-round export.
pub const ROUND_EXPORT_FILENAME: &str = "produtos_capturados.csv";
/// Suggested filename for the accumulated export.
pub const ACCUMULATED_EXPORT_FILENAME: &str = "produtos_acumulados.csv";

const AMAZON_SEARCH_BASE: &str = "https://www.amazon.com/s";
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

pub const ROUND_HEADERS: [&str; 6] = [
    "Produto",
    "UPC",
    "Método",
    "URL Fornecedor",
    "Amazon UPC",
    "Amazon Título",
];

pub const ACCUMULATED_HEADERS: [&str; 4] = ["Produto", "UPC", "Método", "URL"];

/// Marketplace search link for a UPC or product title.
pub fn amazon_search_url(query: &str) -> String {
    match Url::parse_with_params(AMAZON_SEARCH_BASE, &[("k", query)]) {
        Ok(url) => url.to_string(),
        // The base is a valid constant; parse can only fail on it.
        Err(_) => AMAZON_SEARCH_BASE.to_string(),
    }
}

/// Encode one capture round in the 6-column layout. The Amazon columns are
/// filled only when a UPC / product title is available.
pub fn encode_round(tabs: &[CapturedTab]) -> Vec<u8> {
    let rows = tabs.iter().map(|tab| {
        let amazon_upc = tab
            .upc
            .as_deref()
            .filter(|upc| !upc.is_empty())
            .map(amazon_search_url)
            .unwrap_or_default();
        let amazon_title = tab
            .product_title
            .as_deref()
            .filter(|title| !title.is_empty())
            .map(amazon_search_url)
            .unwrap_or_default();

        vec![
            tab.display_title().to_string(),
            tab.upc.clone().unwrap_or_default(),
            tab.upc_method.clone().unwrap_or_default(),
            tab.url.clone(),
            amazon_upc,
            amazon_title,
        ]
    });

    encode(&ROUND_HEADERS, rows)
}

/// Encode the accumulated set in the 4-column layout.
pub fn encode_accumulated(products: &[AccumulatedProduct]) -> Vec<u8> {
    let rows = products.iter().map(|p| {
        vec![
            p.product_title.clone(),
            p.upc.clone(),
            p.upc_method.clone(),
            p.url.clone(),
        ]
    });

    encode(&ACCUMULATED_HEADERS, rows)
}

fn encode(headers: &[&str], rows: impl Iterator<Item = Vec<String>>) -> Vec<u8> {
    let mut out = String::new();
    push_row(&mut out, headers.iter().copied());
    for row in rows {
        push_row(&mut out, row.iter().map(String::as_str));
    }

    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + out.len());
    bytes.extend_from_slice(UTF8_BOM);
    bytes.extend_from_slice(out.as_bytes());
    bytes
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    let mut first = true;
    for cell in cells {
        if !first {
            out.push(',');
        }
        first = false;
        out.push('"');
        out.push_str(cell);
        out.push('"');
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UNTITLED_PLACEHOLDER;

    fn widget_tab() -> CapturedTab {
        CapturedTab {
            url: "https://supplier.example/x".into(),
            title: None,
            product_title: Some("Widget".into()),
            upc: Some("012345678905".into()),
            upc_method: Some("barcode".into()),
        }
    }

    fn decode(bytes: &[u8]) -> String {
        assert_eq!(&bytes[..3], b"\xef\xbb\xbf", "missing UTF-8 BOM");
        String::from_utf8(bytes[3..].to_vec()).expect("valid utf-8")
    }

    #[test]
    fn round_export_has_six_named_columns_and_search_links() {
        let bytes = encode_round(&[widget_tab()]);
        let text = decode(&bytes);
        let mut lines = text.lines();

        let header = lines.next().expect("header row");
        assert_eq!(
            header,
            "\"Produto\",\"UPC\",\"Método\",\"URL Fornecedor\",\"Amazon UPC\",\"Amazon Título\""
        );

        let row = lines.next().expect("data row");
        let cells: Vec<&str> = row.split(',').collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], "\"Widget\"");
        assert_eq!(cells[1], "\"012345678905\"");
        assert!(cells[4].contains("012345678905"), "Amazon UPC cell: {}", cells[4]);
        assert!(cells[4].starts_with("\"https://www.amazon.com/s?k="));
        assert!(cells[5].contains("Widget"), "Amazon title cell: {}", cells[5]);

        assert!(lines.next().is_none());
    }

    #[test]
    fn round_export_leaves_amazon_cells_empty_without_upc_or_title() {
        let tab = CapturedTab {
            url: "https://supplier.example/x".into(),
            title: Some("Raw tab title".into()),
            product_title: None,
            upc: None,
            upc_method: None,
        };
        let text = decode(&encode_round(&[tab]));
        let row = text.lines().nth(1).expect("data row");
        assert!(row.ends_with(",\"\",\"\""), "row was: {row}");
        assert!(row.starts_with("\"Raw tab title\""));
    }

    #[test]
    fn round_export_uses_placeholder_for_untitled_tabs() {
        let tab = CapturedTab {
            url: "https://supplier.example/x".into(),
            title: None,
            product_title: None,
            upc: None,
            upc_method: None,
        };
        let text = decode(&encode_round(&[tab]));
        assert!(text.contains(&format!("\"{UNTITLED_PLACEHOLDER}\"")));
    }

    #[test]
    fn accumulated_export_has_four_named_columns() {
        let product = AccumulatedProduct {
            product_title: "Widget".into(),
            upc: "012345678905".into(),
            upc_method: "barcode".into(),
            url: "https://supplier.example/x".into(),
        };
        let text = decode(&encode_accumulated(&[product]));
        let mut lines = text.lines();
        assert_eq!(
            lines.next().expect("header row"),
            "\"Produto\",\"UPC\",\"Método\",\"URL\""
        );
        assert_eq!(
            lines.next().expect("data row"),
            "\"Widget\",\"012345678905\",\"barcode\",\"https://supplier.example/x\""
        );
    }

    #[test]
    fn empty_input_yields_a_header_only_stream() {
        let text = decode(&encode_round(&[]));
        assert_eq!(text.lines().count(), 1);

        let text = decode(&encode_accumulated(&[]));
        assert_eq!(text.lines().count(), 1);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn amazon_search_url_encodes_the_query_term() {
        let url = amazon_search_url("Widget Deluxe 2000");
        assert!(url.starts_with("https://www.amazon.com/s?k="));
        assert!(!url.contains(' '));
    }
}
