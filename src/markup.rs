//! Markup-path emission helpers.
//!
//! The markup channel produces a self-contained printable document: one
//! stylesheet (with an `@page` rule matching the physical label size, so the
//! platform print pipeline does not rescale) followed by one label fragment
//! per copy. Barcode fields are emitted as placeholder elements carrying the
//! raw payload; the host instantiates Code128 symbols into them before the
//! print flow runs (see [`crate::dispatch`]).

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// CSS class marking a barcode placeholder for the host-side Code128 pass.
pub const BARCODE_CLASS: &str = "barcode";

/// A barcode placeholder element. The payload travels verbatim (escaped, not
/// sanitized: HTML has no ZPL metacharacters to protect).
pub fn barcode_placeholder(field_class: &str, payload: &str) -> String {
    format!(
        "<div class=\"f-{field_class} {BARCODE_CLASS}\" data-barcode=\"{}\"></div>",
        escape(payload)
    )
}

/// A positioned text block for one field.
pub fn field_block(field_class: &str, text: &str) -> String {
    format!("<div class=\"f-{field_class}\">{}</div>", escape(text))
}

/// Assemble the complete printable document: stylesheet attached once, then
/// every fragment in request order.
pub fn document(stylesheet: &str, fragments: &[String]) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n");
    out.push_str(stylesheet);
    out.push_str("</style>\n</head>\n<body>\n");
    for fragment in fragments {
        out.push_str(fragment);
        out.push('\n');
    }
    out.push_str("</body>\n</html>\n");
    out
}

/// The `@page` rule pinning the physical page size in millimeters.
pub fn page_rule(width_mm: f64, height_mm: f64) -> String {
    format!("@page {{ size: {width_mm}mm {height_mm}mm; margin: 0; }}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn test_barcode_placeholder_keeps_payload_verbatim() {
        let html = barcode_placeholder("code", "ABC123");
        assert!(html.contains("data-barcode=\"ABC123\""));
        assert!(html.contains(BARCODE_CLASS));
    }

    #[test]
    fn test_document_attaches_stylesheet_once() {
        let doc = document(
            ".x { color: red; }",
            &["<div>1</div>".into(), "<div>2</div>".into()],
        );
        assert_eq!(doc.matches(".x { color: red; }").count(), 1);
        let first = doc.find("<div>1</div>").unwrap();
        let second = doc.find("<div>2</div>").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_page_rule() {
        assert_eq!(page_rule(69.8, 25.4), "@page { size: 69.8mm 25.4mm; margin: 0; }\n");
    }
}
