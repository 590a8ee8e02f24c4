// ---------------------------------------------------------------------------
// Page geometry
// ---------------------------------------------------------------------------

/// Fixed constants governing pagination, in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    /// Left margin and top margin (text starts at `page_height - margin`).
    pub margin: f64,
    /// No line is placed below this height.
    pub bottom_margin: f64,
    /// Vertical advance after the title line.
    pub title_step: f64,
    /// Vertical advance after the metadata line.
    pub metadata_step: f64,
    /// Vertical advance after each body line.
    pub line_step: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        // A4 in points.
        PageGeometry {
            page_width: 595.0,
            page_height: 842.0,
            margin: 50.0,
            bottom_margin: 50.0,
            title_step: 40.0,
            metadata_step: 30.0,
            line_step: 14.0,
        }
    }
}

impl PageGeometry {
    /// Body lines that fit on the first page (below title + metadata).
    pub fn first_page_capacity(&self) -> usize {
        let start = self.page_height - self.margin - self.title_step - self.metadata_step;
        self.capacity_from(start)
    }

    /// Body lines that fit on a continuation page.
    pub fn continuation_capacity(&self) -> usize {
        self.capacity_from(self.page_height - self.margin)
    }

    fn capacity_from(&self, start_y: f64) -> usize {
        if start_y < self.bottom_margin {
            return 0;
        }
        ((start_y - self.bottom_margin) / self.line_step) as usize + 1
    }
}

// ---------------------------------------------------------------------------
// Laid-out pages
// ---------------------------------------------------------------------------

/// The role of a line decides which font/size the serializer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Title,
    Metadata,
    Body,
}

/// One line of text positioned at a height on a page. `x` is the left margin.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub text: String,
    pub role: LineRole,
    pub y: f64,
}

/// One fixed-size page of the report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PositionedLine>,
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Lay out title, one metadata line, and the body text onto fixed-size pages.
///
/// The title and metadata are drawn on the first page only; continuation
/// pages restart at the top margin. Body lines are placed verbatim, one per
/// line of `body`. There is no word-wrap, so an over-long line may overflow
/// the right edge. Deterministic for identical inputs and geometry.
pub fn paginate(title: &str, metadata: &str, body: &str, geo: &PageGeometry) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut page = Page::default();
    let mut y = geo.page_height - geo.margin;

    page.lines.push(PositionedLine {
        text: title.to_string(),
        role: LineRole::Title,
        y,
    });
    y -= geo.title_step;

    page.lines.push(PositionedLine {
        text: metadata.to_string(),
        role: LineRole::Metadata,
        y,
    });
    y -= geo.metadata_step;

    if !body.is_empty() {
        for line in body.split('\n') {
            if y < geo.bottom_margin {
                pages.push(std::mem::take(&mut page));
                y = geo.page_height - geo.margin;
            }
            page.lines.push(PositionedLine {
                text: line.to_string(),
                role: LineRole::Body,
                y,
            });
            y -= geo.line_step;
        }
    }

    pages.push(page);
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(n: usize) -> String {
        (0..n).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n")
    }

    /// All text of all pages, in reading order.
    fn all_lines(pages: &[Page]) -> Vec<&str> {
        pages
            .iter()
            .flat_map(|p| p.lines.iter().map(|l| l.text.as_str()))
            .collect()
    }

    #[test]
    fn empty_body_yields_one_page_with_header_only() {
        let geo = PageGeometry::default();
        let pages = paginate("Title", "Rows: 0 | Columns: 0", "", &geo);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].lines.len(), 2);
        assert_eq!(pages[0].lines[0].role, LineRole::Title);
        assert_eq!(pages[0].lines[1].role, LineRole::Metadata);
    }

    #[test]
    fn header_positions_follow_fixed_steps() {
        let geo = PageGeometry::default();
        let pages = paginate("T", "M", "a\nb", &geo);
        let lines = &pages[0].lines;
        assert_eq!(lines[0].y, geo.page_height - geo.margin);
        assert_eq!(lines[1].y, lines[0].y - geo.title_step);
        assert_eq!(lines[2].y, lines[1].y - geo.metadata_step);
        assert_eq!(lines[3].y, lines[2].y - geo.line_step);
    }

    #[test]
    fn executive_report_scenario_fits_one_page() {
        let geo = PageGeometry::default();
        let pages = paginate(
            "AnalytiQ – Executive AI Report",
            "Rows: 120 | Columns: 5",
            "Key Insights\n- A\n- B\nRisks / Anomalies\n- C",
            &geo,
        );
        assert_eq!(pages.len(), 1);
        // Title + metadata + five body lines.
        assert_eq!(pages[0].lines.len(), 7);
        let body_count = pages[0]
            .lines
            .iter()
            .filter(|l| l.role == LineRole::Body)
            .count();
        assert_eq!(body_count, 5);
    }

    #[test]
    fn no_line_ever_crosses_the_bottom_margin() {
        let geo = PageGeometry::default();
        let pages = paginate("T", "M", &body_of(500), &geo);
        for page in &pages {
            for line in &page.lines {
                assert!(line.y >= geo.bottom_margin, "line at y={}", line.y);
            }
        }
    }

    #[test]
    fn page_count_matches_capacity_formula() {
        let geo = PageGeometry::default();
        let first = geo.first_page_capacity();
        let rest = geo.continuation_capacity();

        for &n in &[0, 1, first, first + 1, first + rest, first + rest + 1, 500] {
            let pages = paginate("T", "M", &body_of(n), &geo);
            let expected = if n <= first {
                1
            } else {
                1 + (n - first).div_ceil(rest)
            };
            assert_eq!(pages.len(), expected, "body of {n} lines");
            // Every body line survives, in order.
            let body: Vec<&str> = all_lines(&pages)[2..].to_vec();
            assert_eq!(body.len(), n);
        }
    }

    #[test]
    fn continuation_page_starts_at_top_margin_without_header() {
        let geo = PageGeometry::default();
        let n = geo.first_page_capacity() + 3;
        let pages = paginate("T", "M", &body_of(n), &geo);
        assert_eq!(pages.len(), 2);

        let second = &pages[1];
        assert_eq!(second.lines.len(), 3);
        assert!(second.lines.iter().all(|l| l.role == LineRole::Body));
        assert_eq!(second.lines[0].y, geo.page_height - geo.margin);
    }

    #[test]
    fn body_lines_preserve_original_order_across_pages() {
        let geo = PageGeometry::default();
        let n = geo.first_page_capacity() + geo.continuation_capacity() + 5;
        let pages = paginate("T", "M", &body_of(n), &geo);
        assert_eq!(pages.len(), 3);

        let body: Vec<&str> = all_lines(&pages)[2..].to_vec();
        for (i, line) in body.iter().enumerate() {
            assert_eq!(*line, format!("line {i}"));
        }
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let geo = PageGeometry::default();
        let a = paginate("T", "M", &body_of(100), &geo);
        let b = paginate("T", "M", &body_of(100), &geo);
        assert_eq!(a, b);
    }
}
