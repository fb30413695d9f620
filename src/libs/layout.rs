//! Page layout for paginated report documents.
//!
//! A document is described as a list of [`Section`]s and laid out by folding
//! an explicit [`Cursor`] over them. Every section knows its height before it
//! is placed; when placing it would cross the bottom margin, the cursor moves
//! to the top of a new page first. Tables are placed row by row and repeat
//! their header on every page they continue onto.
//!
//! Coordinates are millimetres measured downward from the top edge of an A4
//! page. The PDF writer converts them to PDF's bottom-up coordinates.

use crate::libs::attendance::DayBucket;
use crate::libs::report::{flat_rows, summary_rows, Cell, FlatRow, SummaryRow, FLAT_HEADER, SUMMARY_HEADER};
use chrono::NaiveDateTime;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_TOP_MM: f32 = 20.0;
pub const MARGIN_BOTTOM_MM: f32 = 20.0;
pub const MARGIN_LEFT_MM: f32 = 15.0;
pub const MARGIN_RIGHT_MM: f32 = 15.0;

pub const NO_DATA_NOTE: &str = "No attendance data for this day";

/// Lowest y a line may reach.
pub const PRINTABLE_BOTTOM_MM: f32 = PAGE_HEIGHT_MM - MARGIN_BOTTOM_MM;

// A heading is never left alone at the bottom of a page: it needs room for
// itself plus this many table lines below it.
const HEADING_KEEP_LINES: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Subtitle,
    Heading,
    TableHeader,
    Body,
    Note,
}

impl TextStyle {
    pub fn font_size(&self) -> f32 {
        match self {
            TextStyle::Title => 18.0,
            TextStyle::Subtitle => 10.0,
            TextStyle::Heading => 13.0,
            TextStyle::TableHeader | TextStyle::Body => 10.0,
            TextStyle::Note => 10.0,
        }
    }

    pub fn line_height(&self) -> f32 {
        match self {
            TextStyle::Title => 12.0,
            TextStyle::Heading => 10.0,
            _ => 7.0,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, TextStyle::Title | TextStyle::Heading | TextStyle::TableHeader)
    }
}

/// Position of the next line: 1-based page and distance from the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f32,
}

impl Cursor {
    pub fn start() -> Self {
        Self {
            page: 1,
            y: MARGIN_TOP_MM,
        }
    }

    pub fn fits(&self, height: f32) -> bool {
        self.y + height <= PRINTABLE_BOTTOM_MM
    }

    pub fn next_page(&self) -> Self {
        Self {
            page: self.page + 1,
            y: MARGIN_TOP_MM,
        }
    }

    pub fn at_page_top(&self) -> bool {
        self.y <= MARGIN_TOP_MM
    }

    /// The cursor itself if `height` fits, the top of the next page otherwise.
    pub fn reserve(&self, height: f32) -> Self {
        if self.fits(height) || self.at_page_top() {
            *self
        } else {
            self.next_page()
        }
    }

    fn advance(&self, height: f32) -> Self {
        Self {
            page: self.page,
            y: self.y + height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Title(String),
    Subtitle(String),
    Heading(String),
    Table { header: Vec<String>, rows: Vec<Vec<Cell>> },
    Note(String),
    /// Vertical gap in millimetres. Dropped at the top of a page.
    Gap(f32),
    PageBreak,
}

impl Section {
    pub fn table(header: &[&str], rows: Vec<Vec<Cell>>) -> Self {
        Section::Table {
            header: header.iter().map(|title| title.to_string()).collect(),
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCell {
    /// Left edge, millimetres from the left page edge.
    pub x: f32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub page: usize,
    /// Top of the line box, millimetres from the top page edge.
    pub y: f32,
    pub style: TextStyle,
    pub cells: Vec<PlacedCell>,
}

impl PlacedLine {
    /// Text baseline in PDF coordinates (millimetres from the bottom edge).
    pub fn baseline_from_bottom(&self) -> f32 {
        PAGE_HEIGHT_MM - (self.y + self.style.line_height() * 0.75)
    }

    pub fn text(&self) -> String {
        self.cells.iter().map(|cell| cell.text.as_str()).collect::<Vec<_>>().join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentLayout {
    pub page_count: usize,
    pub lines: Vec<PlacedLine>,
}

impl DocumentLayout {
    pub fn lines_on(&self, page: usize) -> impl Iterator<Item = &PlacedLine> {
        self.lines.iter().filter(move |line| line.page == page)
    }

    /// First line whose text contains `needle`.
    pub fn find(&self, needle: &str) -> Option<&PlacedLine> {
        self.lines.iter().find(|line| line.text().contains(needle))
    }
}

/// Lays out `sections` top to bottom, starting on page 1.
pub fn place(sections: &[Section]) -> DocumentLayout {
    let mut lines = Vec::new();
    let end = sections.iter().fold(Cursor::start(), |cursor, section| place_section(cursor, section, &mut lines));
    DocumentLayout {
        page_count: end.page,
        lines,
    }
}

fn place_section(cursor: Cursor, section: &Section, lines: &mut Vec<PlacedLine>) -> Cursor {
    match section {
        Section::Title(text) => place_text(cursor, TextStyle::Title, text, lines),
        Section::Subtitle(text) => place_text(cursor, TextStyle::Subtitle, text, lines),
        Section::Note(text) => place_text(cursor, TextStyle::Note, text, lines),
        Section::Heading(text) => {
            let keep = TextStyle::Heading.line_height() + TextStyle::Body.line_height() * HEADING_KEEP_LINES;
            let cursor = cursor.reserve(keep);
            place_text(cursor, TextStyle::Heading, text, lines)
        }
        Section::Table { header, rows } => place_table(cursor, header, rows, lines),
        Section::Gap(_) if cursor.at_page_top() => cursor,
        Section::Gap(height) if cursor.fits(*height) => cursor.advance(*height),
        Section::Gap(_) => cursor.next_page(),
        Section::PageBreak if cursor.at_page_top() => cursor,
        Section::PageBreak => cursor.next_page(),
    }
}

fn place_text(cursor: Cursor, style: TextStyle, text: &str, lines: &mut Vec<PlacedLine>) -> Cursor {
    let height = style.line_height();
    let cursor = cursor.reserve(height);
    lines.push(PlacedLine {
        page: cursor.page,
        y: cursor.y,
        style,
        cells: vec![PlacedCell {
            x: MARGIN_LEFT_MM,
            text: fit_text(text, PAGE_WIDTH_MM - MARGIN_LEFT_MM - MARGIN_RIGHT_MM, style.font_size()),
        }],
    });
    cursor.advance(height)
}

fn place_table(cursor: Cursor, header: &[String], rows: &[Vec<Cell>], lines: &mut Vec<PlacedLine>) -> Cursor {
    let row_height = TextStyle::Body.line_height();
    let header_height = TextStyle::TableHeader.line_height();

    // The header always starts a page together with at least one row.
    let mut cursor = cursor.reserve(header_height + row_height);
    cursor = place_row(cursor, TextStyle::TableHeader, header, lines);

    for row in rows {
        if !cursor.fits(row_height) {
            cursor = place_row(cursor.next_page(), TextStyle::TableHeader, header, lines);
        }
        let cells: Vec<String> = row.iter().map(Cell::to_string).collect();
        cursor = place_row(cursor, TextStyle::Body, &cells, lines);
    }
    cursor
}

fn place_row(cursor: Cursor, style: TextStyle, cells: &[String], lines: &mut Vec<PlacedLine>) -> Cursor {
    let width = (PAGE_WIDTH_MM - MARGIN_LEFT_MM - MARGIN_RIGHT_MM) / cells.len().max(1) as f32;
    lines.push(PlacedLine {
        page: cursor.page,
        y: cursor.y,
        style,
        cells: cells
            .iter()
            .enumerate()
            .map(|(index, text)| PlacedCell {
                x: MARGIN_LEFT_MM + width * index as f32,
                text: fit_text(text, width - 2.0, style.font_size()),
            })
            .collect(),
    });
    cursor.advance(style.line_height())
}

/// Cuts `text` so it fits `width_mm` at `font_size` points, marking the cut
/// with `...`. Uses an average Helvetica glyph width.
pub fn fit_text(text: &str, width_mm: f32, font_size: f32) -> String {
    let glyph_mm = font_size * 0.19;
    let max_chars = (width_mm / glyph_mm).floor().max(4.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars - 3).collect();
    format!("{}...", kept)
}

/// Sections of an attendance report over one or more days.
///
/// Page 1 carries the title, generation time and the per-day summary table.
/// Every day then gets a heading and either its flat table or a no-data
/// line, starting on page 2.
pub fn attendance_document(title: &str, class_label: &str, buckets: &[DayBucket], generated_at: NaiveDateTime) -> Vec<Section> {
    let mut sections = vec![
        Section::Title(title.to_string()),
        Section::Subtitle(format!("Class: {}", class_label)),
        Section::Subtitle(format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M"))),
        Section::Gap(4.0),
        Section::table(&SUMMARY_HEADER, summary_rows(buckets).iter().map(SummaryRow::cells).collect()),
        Section::PageBreak,
    ];

    for bucket in buckets {
        sections.push(Section::Heading(bucket.date.format("%A, %Y-%m-%d").to_string()));
        if bucket.is_empty() {
            sections.push(Section::Note(NO_DATA_NOTE.to_string()));
        } else {
            sections.push(Section::table(&FLAT_HEADER, flat_rows(&bucket.records).iter().map(FlatRow::cells).collect()));
        }
        sections.push(Section::Gap(6.0));
    }

    sections
}
