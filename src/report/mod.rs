/// Report export: deterministic pagination plus PDF serialization.
///
/// Architecture:
/// ```text
///   title / metadata / answer text
///        │
///        ▼
///   ┌──────────┐
///   │  layout   │  wrap lines onto fixed-height pages → Vec<Page>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   pdf     │  serialize pages → PDF 1.4 byte stream
///   └──────────┘
/// ```
pub mod layout;
pub mod pdf;

pub use pdf::ExportError;

use layout::PageGeometry;

/// Build the complete report document for download.
///
/// `body` is the stored assistant answer; it is split on newlines and laid
/// out verbatim. Reads session state only; nothing is mutated and nothing
/// touches the filesystem here.
pub fn build_report(title: &str, metadata: &str, body: &str) -> Result<Vec<u8>, ExportError> {
    let geo = PageGeometry::default();
    let pages = layout::paginate(title, metadata, body, &geo);
    pdf::render_pdf(&pages, &geo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_produces_a_pdf_header() {
        let bytes = build_report("Title", "Rows: 1 | Columns: 1", "hello").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
    }

    #[test]
    fn encoding_failure_offers_no_bytes() {
        assert!(build_report("Title", "meta", "日本語").is_err());
    }
}
