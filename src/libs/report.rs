//! Report planning shared by every export format.
//!
//! Nothing here touches the file system. The planners turn buckets into
//! plain rows and sheet plans that the writers in [`crate::libs::export`]
//! serialize, so the content of an export can be checked without opening
//! the produced file.
//!
//! ## Workbook Layout (date window)
//!
//! ```text
//! Summary      one row per day: Date | Present | Absent | Total | Rate %
//! 2024-06-03   the day's flat table          (days without records skipped)
//! ...
//! All Days     Date | Name | Roll Number | Status | Remarks
//! ```

use crate::libs::attendance::{AttendanceRecord, DayBucket};
use crate::libs::stats::{weekly_trend, TrendPoint};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt;

pub const FLAT_HEADER: [&str; 4] = ["Name", "Roll Number", "Status", "Remarks"];
pub const CONSOLIDATED_HEADER: [&str; 5] = ["Date", "Name", "Roll Number", "Status", "Remarks"];
pub const SUMMARY_HEADER: [&str; 5] = ["Date", "Present", "Absent", "Total", "Rate %"];

pub const SUMMARY_SHEET: &str = "Summary";
pub const CONSOLIDATED_SHEET: &str = "All Days";

/// Longest sheet name a workbook accepts.
pub const SHEET_NAME_LIMIT: usize = 31;

/// Label used in file names when no class is selected.
pub const ALL_CLASSES: &str = "all";

const INVALID_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// One table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => write!(f, "{}", text),
            Cell::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

impl From<usize> for Cell {
    fn from(number: usize) -> Self {
        Cell::Number(number as f64)
    }
}

impl From<u32> for Cell {
    fn from(number: u32) -> Self {
        Cell::Number(f64::from(number))
    }
}

/// A record as it appears in every flat table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub name: String,
    pub roll_number: String,
    pub status: &'static str,
    pub remarks: String,
}

impl From<&AttendanceRecord> for FlatRow {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            name: record.student_name.clone(),
            roll_number: record.roll_number.clone(),
            status: record.status.label(),
            remarks: record.remarks_label().to_string(),
        }
    }
}

impl FlatRow {
    pub fn cells(&self) -> Vec<Cell> {
        vec![
            self.name.as_str().into(),
            self.roll_number.as_str().into(),
            self.status.into(),
            self.remarks.as_str().into(),
        ]
    }

    /// Cells prefixed with the date, for the consolidated table.
    pub fn dated_cells(&self, date: NaiveDate) -> Vec<Cell> {
        let mut cells = vec![Cell::Text(date.to_string())];
        cells.extend(self.cells());
        cells
    }
}

pub fn flat_rows(records: &[AttendanceRecord]) -> Vec<FlatRow> {
    records.iter().map(FlatRow::from).collect()
}

/// One line of the per-day summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub date: NaiveDate,
    pub present: usize,
    pub absent: usize,
    pub total: usize,
    pub rate: u32,
}

impl From<&TrendPoint> for SummaryRow {
    fn from(point: &TrendPoint) -> Self {
        Self {
            date: point.date,
            present: point.present,
            absent: point.absent,
            total: point.total,
            rate: point.rate,
        }
    }
}

impl SummaryRow {
    pub fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.date.to_string()),
            self.present.into(),
            self.absent.into(),
            self.total.into(),
            self.rate.into(),
        ]
    }
}

/// Summary rows for every bucket, empty days included.
pub fn summary_rows(buckets: &[DayBucket]) -> Vec<SummaryRow> {
    weekly_trend(buckets).iter().map(SummaryRow::from).collect()
}

/// True when at least one bucket holds a record.
pub fn has_records(buckets: &[DayBucket]) -> bool {
    buckets.iter().any(|bucket| !bucket.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetPlan {
    fn new(name: String, header: &[&str], rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name,
            header: header.iter().map(|title| title.to_string()).collect(),
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkbookPlan {
    pub sheets: Vec<SheetPlan>,
}

impl WorkbookPlan {
    /// A single sheet with one day's flat table.
    pub fn for_day(bucket: &DayBucket) -> Self {
        let mut plan = Self::default();
        let rows = flat_rows(&bucket.records).iter().map(FlatRow::cells).collect();
        plan.push(&bucket.date.to_string(), &FLAT_HEADER, rows);
        plan
    }

    /// Summary, one sheet per day with records, and the consolidated table.
    pub fn for_window(buckets: &[DayBucket]) -> Self {
        let mut plan = Self::default();

        let summary = summary_rows(buckets).iter().map(SummaryRow::cells).collect();
        plan.push(SUMMARY_SHEET, &SUMMARY_HEADER, summary);

        for bucket in buckets.iter().filter(|bucket| !bucket.is_empty()) {
            let rows = flat_rows(&bucket.records).iter().map(FlatRow::cells).collect();
            plan.push(&bucket.date.to_string(), &FLAT_HEADER, rows);
        }

        plan.push(CONSOLIDATED_SHEET, &CONSOLIDATED_HEADER, consolidated_rows(buckets));
        plan
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetPlan> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }

    fn push(&mut self, raw_name: &str, header: &[&str], rows: Vec<Vec<Cell>>) {
        let taken: HashSet<String> = self.sheets.iter().map(|sheet| sheet.name.to_lowercase()).collect();
        let name = unique_sheet_name(&sheet_name(raw_name), &taken);
        self.sheets.push(SheetPlan::new(name, header, rows));
    }
}

/// Every record of every bucket, each row prefixed with its date.
pub fn consolidated_rows(buckets: &[DayBucket]) -> Vec<Vec<Cell>> {
    buckets
        .iter()
        .flat_map(|bucket| bucket.records.iter().map(move |record| FlatRow::from(record).dated_cells(bucket.date)))
        .collect()
}

/// Makes `raw` a valid sheet name: forbidden characters become `-`,
/// surrounding apostrophes are dropped, and the result is cut to
/// [`SHEET_NAME_LIMIT`] characters.
pub fn sheet_name(raw: &str) -> String {
    let cleaned: String = raw.chars().map(|c| if INVALID_SHEET_CHARS.contains(&c) { '-' } else { c }).collect();
    let cleaned = cleaned.trim().trim_matches('\'');
    let name: String = cleaned.chars().take(SHEET_NAME_LIMIT).collect();
    if name.is_empty() {
        "Sheet".to_string()
    } else {
        name
    }
}

// Sheet names are compared case-insensitively by spreadsheet applications.
fn unique_sheet_name(name: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(&name.to_lowercase()) {
        return name.to_string();
    }
    (2..)
        .map(|n| {
            let suffix = format!(" ({})", n);
            let base: String = name.chars().take(SHEET_NAME_LIMIT - suffix.len()).collect();
            format!("{}{}", base, suffix)
        })
        .find(|candidate| !taken.contains(&candidate.to_lowercase()))
        .unwrap_or_else(|| name.to_string())
}

/// File-name safe class label, [`ALL_CLASSES`] when none is given.
pub fn class_label(label: Option<&str>) -> String {
    let slug = label
        .unwrap_or_default()
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        ALL_CLASSES.to_string()
    } else {
        slug
    }
}

/// `attendance-{date}-{class|all}.{ext}`
pub fn day_file_name(date: NaiveDate, label: Option<&str>, extension: &str) -> String {
    format!("attendance-{}-{}.{}", date, class_label(label), extension)
}

/// `last-week-attendance-{class|all}-{start}-to-{end}.{ext}`
pub fn window_file_name(start: NaiveDate, end: NaiveDate, label: Option<&str>, extension: &str) -> String {
    format!("last-week-attendance-{}-{}-to-{}.{}", class_label(label), start, end, extension)
}
