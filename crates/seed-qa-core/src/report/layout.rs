//! Page layout of the analysis report.
//!
//! Positions are in millimetres from the top-left corner of an A4 portrait
//! page; text positions are baselines.

use super::text::{text_width, wrap};
use crate::domain::{AnalysisBatch, SeedAnalysis};

/// Page width (A4 portrait).
pub const PAGE_WIDTH: f32 = 210.0;
/// Page height (A4 portrait).
pub const PAGE_HEIGHT: f32 = 297.0;
/// Left, right and bottom margin.
pub const MARGIN: f32 = 14.0;
/// Baseline of the report title.
pub const TITLE_Y: f32 = 20.0;
/// Baseline of the generation timestamp.
pub const TIMESTAMP_Y: f32 = 28.0;
/// Where the first section starts.
pub const FIRST_SECTION_Y: f32 = 40.0;
/// A section starting below this line moves to a new page.
pub const SECTION_BREAK_Y: f32 = 250.0;
/// Where content resumes on a continuation page.
pub const CONTINUATION_Y: f32 = 20.0;
/// Table rows must end above this line.
pub const TABLE_BOTTOM: f32 = PAGE_HEIGHT - MARGIN;

const TITLE_SIZE: f32 = 20.0;
const TIMESTAMP_SIZE: f32 = 10.0;
const HEADER_SIZE: f32 = 14.0;
const SUMMARY_SIZE: f32 = 11.0;
const TABLE_SIZE: f32 = 10.0;

const HEADER_ADVANCE: f32 = 8.0;
const HEADER_LINE_HEIGHT: f32 = 6.0;
const SUMMARY_ADVANCE: f32 = 10.0;
const SECTION_GAP: f32 = 15.0;

const CELL_PADDING: f32 = 1.8;
const LINE_HEIGHT: f32 = 4.2;
const BASELINE_OFFSET: f32 = 3.0;
/// Absorbs rounding when a fragment fills the remaining space exactly.
const FIT_TOLERANCE: f32 = 1e-3;

/// Table column headings.
pub const TABLE_HEADERS: [&str; 4] = ["Parameter", "Value", "Status", "Interpretation"];
const COLUMN_WIDTHS: [f32; 4] = [40.0, 18.0, 24.0, PAGE_WIDTH - 2.0 * MARGIN - 82.0];

const TITLE_COLOR: Rgb = Rgb(34, 139, 34);
const MUTED_COLOR: Rgb = Rgb(100, 100, 100);
const TEXT_COLOR: Rgb = Rgb(0, 0, 0);
const HEAD_TEXT_COLOR: Rgb = Rgb(255, 255, 255);
const GRID_COLOR: Rgb = Rgb(200, 200, 200);

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Font weight of the Helvetica family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    /// Helvetica.
    Regular,
    /// Helvetica-Bold.
    Bold,
}

/// A positioned drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A single line of text.
    Text {
        /// Left edge.
        x: f32,
        /// Baseline.
        y: f32,
        /// Font size in points.
        size: f32,
        /// Font weight.
        weight: FontWeight,
        /// Text color.
        color: Rgb,
        /// Content.
        text: String,
    },
    /// A rectangle, optionally filled and/or stroked.
    Rect {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
        /// Fill color.
        fill: Option<Rgb>,
        /// Stroke color.
        stroke: Option<Rgb>,
    },
}

/// One page of drawing primitives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    elements: Vec<Element>,
}

impl Page {
    /// Elements in drawing order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Text lines in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            Element::Rect { .. } => None,
        })
    }

    /// Baseline of the first text equal to `text`, if any.
    #[must_use]
    pub fn baseline_of(&self, text: &str) -> Option<f32> {
        self.elements.iter().find_map(|e| match e {
            Element::Text { y, text: t, .. } if t == text => Some(*y),
            _ => None,
        })
    }
}

/// A complete report, page by page.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pages: Vec<Page>,
}

impl ReportLayout {
    /// Pages in order. Never empty.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page width in millimetres.
    #[must_use]
    pub const fn width(&self) -> f32 {
        PAGE_WIDTH
    }

    /// Page height in millimetres.
    #[must_use]
    pub const fn height(&self) -> f32 {
        PAGE_HEIGHT
    }
}

/// Wrapped cell lines of one table row.
struct Row {
    cells: [Vec<String>; 4],
    height: f32,
}

impl Row {
    fn new(cells: [String; 4]) -> Self {
        Self::from_lines(std::array::from_fn(|i| {
            wrap(&cells[i], COLUMN_WIDTHS[i] - 2.0 * CELL_PADDING, TABLE_SIZE)
        }))
    }

    fn from_lines(cells: [Vec<String>; 4]) -> Self {
        let lines = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
        Self {
            cells,
            height: row_height(lines),
        }
    }

    fn head() -> Self {
        Self::new(TABLE_HEADERS.map(String::from))
    }

    /// Splits off everything after the first `lines` lines of every cell.
    fn split_off(&mut self, lines: usize) -> Self {
        let rest = std::array::from_fn(|i| {
            let at = lines.min(self.cells[i].len());
            self.cells[i].split_off(at)
        });
        *self = Self::from_lines(std::mem::take(&mut self.cells));
        Self::from_lines(rest)
    }
}

#[allow(clippy::cast_precision_loss)]
fn row_height(lines: usize) -> f32 {
    lines as f32 * LINE_HEIGHT + 2.0 * CELL_PADDING
}

/// Number of text lines a row fragment may carry in `space` millimetres.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lines_fitting(space: f32) -> usize {
    let room = space - 2.0 * CELL_PADDING + FIT_TOLERANCE;
    if room < LINE_HEIGHT {
        0
    } else {
        (room / LINE_HEIGHT).floor() as usize
    }
}

/// Accumulates pages while tracking the vertical cursor.
struct Composer {
    done: Vec<Page>,
    current: Page,
    y: f32,
}

impl Composer {
    fn new() -> Self {
        Self {
            done: Vec::new(),
            current: Page::default(),
            y: 0.0,
        }
    }

    fn new_page(&mut self) {
        self.done.push(std::mem::take(&mut self.current));
        self.y = CONTINUATION_Y;
    }

    fn text(&mut self, x: f32, y: f32, size: f32, weight: FontWeight, color: Rgb, text: String) {
        self.current.elements.push(Element::Text {
            x,
            y,
            size,
            weight,
            color,
            text,
        });
    }

    fn centered(&mut self, y: f32, size: f32, color: Rgb, text: String) {
        let x = (PAGE_WIDTH - text_width(&text, size)) / 2.0;
        self.text(x, y, size, FontWeight::Regular, color, text);
    }

    fn row(&mut self, row: &Row, head: bool) {
        let (fill, weight, color) = if head {
            (Some(TITLE_COLOR), FontWeight::Bold, HEAD_TEXT_COLOR)
        } else {
            (None, FontWeight::Regular, TEXT_COLOR)
        };

        let mut x = MARGIN;
        for (lines, width) in row.cells.iter().zip(COLUMN_WIDTHS) {
            self.current.elements.push(Element::Rect {
                x,
                y: self.y,
                width,
                height: row.height,
                fill,
                stroke: Some(GRID_COLOR),
            });
            let mut baseline = self.y + CELL_PADDING + BASELINE_OFFSET;
            for line in lines {
                self.text(x + CELL_PADDING, baseline, TABLE_SIZE, weight, color, line.clone());
                baseline += LINE_HEIGHT;
            }
            x += width;
        }
        self.y += row.height;
    }

    fn finish(mut self) -> ReportLayout {
        self.done.push(self.current);
        ReportLayout { pages: self.done }
    }
}

/// Lays out the report for `batch`.
///
/// `generated` is the already-formatted generation timestamp; it is the only
/// input besides the batch, so equal inputs give equal layouts.
#[must_use]
pub fn layout_report(title: &str, generated: &str, batch: &AnalysisBatch) -> ReportLayout {
    let mut c = Composer::new();

    c.centered(TITLE_Y, TITLE_SIZE, TITLE_COLOR, title.to_string());
    c.centered(
        TIMESTAMP_Y,
        TIMESTAMP_SIZE,
        MUTED_COLOR,
        format!("Generated: {generated}"),
    );
    c.y = FIRST_SECTION_Y;

    for (index, analysis) in batch.iter().enumerate() {
        if c.y > SECTION_BREAK_Y {
            c.new_page();
        }
        section(&mut c, index, analysis);
    }

    c.finish()
}

fn section(c: &mut Composer, index: usize, analysis: &SeedAnalysis) {
    let header = format!("Seed {}: {}", index + 1, analysis.file_name());
    for (i, line) in wrap(&header, PAGE_WIDTH - 2.0 * MARGIN, HEADER_SIZE)
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            c.y += HEADER_LINE_HEIGHT;
        }
        c.text(MARGIN, c.y, HEADER_SIZE, FontWeight::Bold, TEXT_COLOR, line);
    }
    c.y += HEADER_ADVANCE;

    c.text(
        MARGIN,
        c.y,
        SUMMARY_SIZE,
        FontWeight::Regular,
        TEXT_COLOR,
        format!(
            "Quality: {} | Grade: {} | Score: {}/100",
            analysis.quality_tier(),
            analysis.grade(),
            analysis.score()
        ),
    );
    c.y += SUMMARY_ADVANCE;

    table(c, analysis);
    c.y += SECTION_GAP;
}

fn table(c: &mut Composer, analysis: &SeedAnalysis) {
    let head = Row::head();
    let rows: Vec<Row> = analysis
        .parameters()
        .iter()
        .map(|p| {
            Row::new([
                p.name().to_string(),
                format!("{}%", p.value()),
                p.status().to_string(),
                p.interpretation().to_string(),
            ])
        })
        .collect();

    // Keep the heading row together with the first line of the first body row.
    if c.y + head.height + row_height(1) > TABLE_BOTTOM {
        c.new_page();
    }
    c.row(&head, true);

    for mut row in rows {
        // Rows taller than the remaining space continue on the next page.
        while c.y + row.height > TABLE_BOTTOM {
            let fit = lines_fitting(TABLE_BOTTOM - c.y);
            if fit > 0 {
                let rest = row.split_off(fit);
                c.row(&row, false);
                row = rest;
            }
            c.new_page();
            c.row(&head, true);
        }
        c.row(&row, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch_has_title_page() {
        let layout = layout_report("Report", "now", &AnalysisBatch::default());
        assert_eq!(layout.page_count(), 1);
        let texts: Vec<_> = layout.pages()[0].texts().collect();
        assert_eq!(texts, ["Report", "Generated: now"]);
    }

    #[test]
    fn test_head_row_height() {
        let head = Row::head();
        assert!((head.height - (LINE_HEIGHT + 2.0 * CELL_PADDING)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_long_interpretation_grows_row() {
        let row = Row::new([
            "Edge Sharpness".into(),
            "80%".into(),
            "good".into(),
            "word ".repeat(40),
        ]);
        assert!(row.height > 2.0 * LINE_HEIGHT);
    }

    #[test]
    fn test_split_off_keeps_leading_lines() {
        let mut row = Row::new([
            "Edge Sharpness".into(),
            "80%".into(),
            "good".into(),
            "word ".repeat(60),
        ]);
        let total = row.cells[3].len();
        let rest = row.split_off(2);

        assert_eq!(row.cells[3].len(), 2);
        assert_eq!(row.cells[0], ["Edge Sharpness"]);
        assert_eq!(rest.cells[3].len(), total - 2);
        assert!(rest.cells[0].is_empty());
        assert!((row.height - row_height(2)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_lines_fitting() {
        assert_eq!(lines_fitting(row_height(3)), 3);
        assert_eq!(lines_fitting(row_height(1) - 0.5), 0);
    }

    #[test]
    fn test_columns_span_printable_width() {
        let total: f32 = COLUMN_WIDTHS.iter().sum();
        assert!((total - (PAGE_WIDTH - 2.0 * MARGIN)).abs() < 0.001);
    }
}
