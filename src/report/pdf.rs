use thiserror::Error;

use super::layout::{LineRole, Page, PageGeometry};

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Failures while serializing a report to PDF bytes.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The text contains a character the built-in Helvetica/WinAnsi font
    /// cannot represent. No partial file is produced.
    #[error("character {ch:?} (U+{code:04X}) cannot be encoded in the report font")]
    UnsupportedCharacter { ch: char, code: u32 },
}

// ---------------------------------------------------------------------------
// Font sizes per line role
// ---------------------------------------------------------------------------

const TITLE_FONT_SIZE: f64 = 18.0;
const METADATA_FONT_SIZE: f64 = 11.0;
const BODY_FONT_SIZE: f64 = 10.0;

fn font_for(role: LineRole) -> (&'static str, f64) {
    match role {
        LineRole::Title => ("F2", TITLE_FONT_SIZE),
        LineRole::Metadata => ("F1", METADATA_FONT_SIZE),
        LineRole::Body => ("F1", BODY_FONT_SIZE),
    }
}

// ---------------------------------------------------------------------------
// PDF document assembly
// ---------------------------------------------------------------------------

/// Serialize laid-out pages to a complete PDF 1.4 byte stream.
///
/// Object layout: 1 catalog, 2 pages tree, then per page one page object and
/// one content stream, then the two Helvetica font objects. Streams are
/// uncompressed and no timestamp is embedded, so identical inputs produce
/// byte-identical documents.
pub fn render_pdf(pages: &[Page], geo: &PageGeometry) -> Result<Vec<u8>, ExportError> {
    let page_streams: Vec<String> = pages
        .iter()
        .map(|p| content_stream(p, geo))
        .collect::<Result<_, _>>()?;
    let page_count = page_streams.len();

    let mut pdf = Vec::new();
    pdf.extend_from_slice(b"%PDF-1.4\n");
    pdf.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

    let mut xref_positions: Vec<usize> = Vec::new();

    // Object 1: catalog.
    xref_positions.push(pdf.len());
    pdf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    // Object 2: pages tree, written after the kids so the ids are known.
    let pages_slot = xref_positions.len();
    xref_positions.push(0);

    // Objects 3..: page + content stream pairs.
    let font_obj_start = 3 + page_count * 2;
    let mut page_obj_ids = Vec::with_capacity(page_count);

    for (page_idx, stream) in page_streams.iter().enumerate() {
        let page_obj_id = 3 + page_idx * 2;
        let content_obj_id = page_obj_id + 1;
        page_obj_ids.push(page_obj_id);

        xref_positions.push(pdf.len());
        let page_obj = format!(
            "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] /Contents {} 0 R /Resources << /Font << /F1 {} 0 R /F2 {} 0 R >> >> >>\nendobj\n",
            page_obj_id,
            geo.page_width,
            geo.page_height,
            content_obj_id,
            font_obj_start,
            font_obj_start + 1
        );
        pdf.extend_from_slice(page_obj.as_bytes());

        xref_positions.push(pdf.len());
        let content_obj = format!(
            "{} 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
            content_obj_id,
            stream.len(),
            stream
        );
        pdf.extend_from_slice(content_obj.as_bytes());
    }

    xref_positions[pages_slot] = pdf.len();
    let kids: Vec<String> = page_obj_ids.iter().map(|id| format!("{id} 0 R")).collect();
    let pages_obj = format!(
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
        kids.join(" "),
        page_count
    );
    pdf.extend_from_slice(pages_obj.as_bytes());

    // Font objects: body/metadata regular, title bold.
    xref_positions.push(pdf.len());
    pdf.extend_from_slice(
        format!(
            "{} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>\nendobj\n",
            font_obj_start
        )
        .as_bytes(),
    );
    xref_positions.push(pdf.len());
    pdf.extend_from_slice(
        format!(
            "{} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>\nendobj\n",
            font_obj_start + 1
        )
        .as_bytes(),
    );

    // Cross-reference table and trailer.
    let xref_start = pdf.len();
    pdf.extend_from_slice(b"xref\n");
    pdf.extend_from_slice(format!("0 {}\n", xref_positions.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for pos in &xref_positions {
        pdf.extend_from_slice(format!("{pos:010} 00000 n \n").as_bytes());
    }
    pdf.extend_from_slice(b"trailer\n");
    pdf.extend_from_slice(
        format!("<< /Size {} /Root 1 0 R >>\n", xref_positions.len() + 1).as_bytes(),
    );
    pdf.extend_from_slice(b"startxref\n");
    pdf.extend_from_slice(format!("{xref_start}\n").as_bytes());
    pdf.extend_from_slice(b"%%EOF\n");

    Ok(pdf)
}

/// Build one page's uncompressed content stream (`BT .. Tj .. ET` per line).
fn content_stream(page: &Page, geo: &PageGeometry) -> Result<String, ExportError> {
    let mut stream = String::new();
    for line in &page.lines {
        let (font, size) = font_for(line.role);
        stream.push_str("BT\n");
        stream.push_str(&format!("/{font} {size:.1} Tf\n"));
        stream.push_str(&format!("{:.2} {:.2} Td\n", geo.margin, line.y));
        stream.push_str(&format!("({}) Tj\n", escape_pdf_string(&line.text)?));
        stream.push_str("ET\n");
    }
    Ok(stream)
}

// ---------------------------------------------------------------------------
// WinAnsi string encoding
// ---------------------------------------------------------------------------

/// Encode text as a WinAnsi PDF string literal, escaping `(`, `)` and `\`.
///
/// Bytes outside ASCII are written as octal escapes so the content stream
/// stays valid UTF-8 on the Rust side while decoding to CP1252 in the PDF.
fn escape_pdf_string(text: &str) -> Result<String, ExportError> {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let byte = winansi_byte(ch).ok_or(ExportError::UnsupportedCharacter {
            ch,
            code: ch as u32,
        })?;
        match byte {
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7E => out.push(byte as char),
            _ => out.push_str(&format!("\\{byte:03o}")),
        }
    }
    Ok(out)
}

/// Map a char to its WinAnsi (CP1252) byte, or `None` when unrepresentable.
fn winansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        // Printable ASCII.
        0x20..=0x7E => Some(code as u8),
        // Latin-1 upper half maps straight through.
        0xA0..=0xFF => Some(code as u8),
        // CP1252 additions in the 0x80–0x9F window.
        _ => match ch {
            '\u{20AC}' => Some(0x80), // euro
            '\u{201A}' => Some(0x82),
            '\u{0192}' => Some(0x83),
            '\u{201E}' => Some(0x84),
            '\u{2026}' => Some(0x85), // ellipsis
            '\u{2020}' => Some(0x86),
            '\u{2021}' => Some(0x87),
            '\u{02C6}' => Some(0x88),
            '\u{2030}' => Some(0x89),
            '\u{0160}' => Some(0x8A),
            '\u{2039}' => Some(0x8B),
            '\u{0152}' => Some(0x8C),
            '\u{017D}' => Some(0x8E),
            '\u{2018}' => Some(0x91), // curly quotes
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '\u{2022}' => Some(0x95), // bullet
            '\u{2013}' => Some(0x96), // en dash
            '\u{2014}' => Some(0x97), // em dash
            '\u{02DC}' => Some(0x98),
            '\u{2122}' => Some(0x99), // trademark
            '\u{0161}' => Some(0x9A),
            '\u{203A}' => Some(0x9B),
            '\u{0153}' => Some(0x9C),
            '\u{017E}' => Some(0x9E),
            '\u{0178}' => Some(0x9F),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::layout::paginate;

    /// Pull the `(...) Tj` string literals back out of the raw bytes, in
    /// order, undoing the escapes the writer applies.
    fn extract_text(pdf: &[u8]) -> Vec<String> {
        let text = String::from_utf8_lossy(pdf);
        let mut out = Vec::new();
        for raw in text.lines() {
            let Some(stripped) = raw.strip_suffix(") Tj") else {
                continue;
            };
            let Some(inner) = stripped.strip_prefix('(') else {
                continue;
            };
            let mut unescaped = String::new();
            let mut chars = inner.chars().peekable();
            while let Some(c) = chars.next() {
                if c != '\\' {
                    unescaped.push(c);
                    continue;
                }
                match chars.peek() {
                    Some('(') | Some(')') | Some('\\') => {
                        unescaped.push(chars.next().unwrap());
                    }
                    Some(d) if d.is_digit(8) => {
                        let mut octal = String::new();
                        while octal.len() < 3
                            && chars.peek().map(|c| c.is_digit(8)).unwrap_or(false)
                        {
                            octal.push(chars.next().unwrap());
                        }
                        let byte = u8::from_str_radix(&octal, 8).unwrap();
                        unescaped.push(cp1252_char(byte));
                    }
                    _ => unescaped.push('\\'),
                }
            }
            out.push(unescaped);
        }
        out
    }

    /// Inverse of `winansi_byte`, for the bytes the tests exercise.
    fn cp1252_char(byte: u8) -> char {
        match byte {
            0x96 => '\u{2013}',
            0x95 => '\u{2022}',
            0xE9 => '\u{00E9}',
            other => other as char,
        }
    }

    #[test]
    fn text_round_trips_in_order() {
        let geo = PageGeometry::default();
        let title = "AnalytiQ – Executive AI Report";
        let metadata = "Rows: 120 | Columns: 5";
        let body = "Key Insights\n• margin (est.) is stable\nRisks / Anomalies\n- none";
        let pages = paginate(title, metadata, body, &geo);
        let pdf = render_pdf(&pages, &geo).unwrap();

        let mut expected = vec![title.to_string(), metadata.to_string()];
        expected.extend(body.split('\n').map(str::to_string));
        assert_eq!(extract_text(&pdf), expected);
    }

    #[test]
    fn output_is_byte_identical_across_runs() {
        let geo = PageGeometry::default();
        let pages = paginate("T", "M", "a\nb\nc", &geo);
        let a = render_pdf(&pages, &geo).unwrap();
        let b = render_pdf(&pages, &geo).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn page_objects_match_page_count() {
        let geo = PageGeometry::default();
        let long_body = (0..geo.first_page_capacity() + 1)
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        let pages = paginate("T", "M", &long_body, &geo);
        assert_eq!(pages.len(), 2);

        let pdf = render_pdf(&pages, &geo).unwrap();
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/Count 2"));
        assert_eq!(text.matches("/Type /Page /Parent").count(), 2);
        assert!(text.ends_with("%%EOF\n"));
    }

    #[test]
    fn unsupported_character_fails_without_partial_output() {
        let geo = PageGeometry::default();
        let pages = paginate("T", "M", "revenue in ¥ vs 日本", &geo);
        let err = render_pdf(&pages, &geo).unwrap_err();
        match err {
            ExportError::UnsupportedCharacter { ch, .. } => assert_eq!(ch, '日'),
        }
    }

    #[test]
    fn parens_and_backslashes_are_escaped() {
        assert_eq!(escape_pdf_string("a(b)c\\d").unwrap(), "a\\(b\\)c\\\\d");
    }

    #[test]
    fn winansi_covers_latin1_and_cp1252_extras() {
        assert_eq!(winansi_byte('é'), Some(0xE9));
        assert_eq!(winansi_byte('–'), Some(0x96));
        assert_eq!(winansi_byte('€'), Some(0x80));
        assert_eq!(winansi_byte('\u{2603}'), None); // snowman
    }
}
