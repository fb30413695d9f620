//! Attendance export to CSV, Excel and PDF.
//!
//! The exporter takes buckets that have already been fetched and writes one
//! file per call into the output directory. File names follow two patterns:
//!
//! ```text
//! attendance-{date}-{class|all}.{csv|xlsx|pdf}                          single day
//! last-week-attendance-{class|all}-{start}-to-{end}.{csv|xlsx|pdf}      date window
//! ```
//!
//! ## Formats
//!
//! - **CSV**: flat table. A window export is the consolidated table with a
//!   leading `Date` column.
//! - **Excel**: a single-day sheet, or for a window a summary sheet, one
//!   sheet per day with records and a consolidated sheet.
//! - **PDF**: A4 document with a summary page followed by one section per
//!   day (see [`crate::libs::layout`]).
//!
//! ## Empty Data
//!
//! When there is not a single record to write, no file is created. The
//! caller gets [`ExportOutcome::NothingToExport`] and one warning is shown.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rollbook::libs::export::{Exporter, ExportFormat, ExportOutcome};
//! use rollbook::libs::attendance::DayBucket;
//!
//! let exporter = Exporter::new(ExportFormat::Excel, None);
//! let bucket = DayBucket::empty(chrono::Local::now().date_naive());
//! if let ExportOutcome::Written(path) = exporter.export_day(&bucket, Some("Grade 5A"))? {
//!     println!("{}", path.display());
//! }
//! ```

use crate::{
    libs::{
        attendance::DayBucket,
        layout::{self, DocumentLayout, PAGE_HEIGHT_MM, PAGE_WIDTH_MM},
        messages::Message,
        report::{self, consolidated_rows, Cell, SheetPlan, WorkbookPlan, CONSOLIDATED_HEADER, FLAT_HEADER},
    },
    msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use rust_xlsxwriter::{Color, Format, Workbook};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values.
    Csv,
    /// Excel workbook (`.xlsx`).
    Excel,
    /// Paginated A4 document.
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Range of data an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportData {
    /// One date.
    Day,
    /// The configured window of days before today.
    Week,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(PathBuf),
    NothingToExport,
}

pub struct Exporter {
    format: ExportFormat,
    output_dir: PathBuf,
    generated_at: NaiveDateTime,
}

impl Exporter {
    /// Creates an exporter writing into `output_dir`, or the current
    /// directory when none is given.
    pub fn new(format: ExportFormat, output_dir: Option<PathBuf>) -> Self {
        Self {
            format,
            output_dir: output_dir.unwrap_or_else(|| PathBuf::from(".")),
            generated_at: Local::now().naive_local(),
        }
    }

    /// Overrides the timestamp printed in PDF reports.
    pub fn generated_at(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Exports a single day.
    pub fn export_day(&self, bucket: &DayBucket, class_label: Option<&str>) -> Result<ExportOutcome> {
        if bucket.is_empty() {
            return Ok(nothing_to_export());
        }

        let path = self.output_dir.join(report::day_file_name(bucket.date, class_label, self.format.extension()));
        let title = format!("Attendance Report - {}", bucket.date);
        let buckets = std::slice::from_ref(bucket);

        self.write(&path, |path| match self.format {
            ExportFormat::Csv => write_csv(path, &FLAT_HEADER, report_rows_for_day(bucket)),
            ExportFormat::Excel => write_workbook(path, &WorkbookPlan::for_day(bucket)),
            ExportFormat::Pdf => write_pdf(path, &title, &self.document(&title, class_label, buckets)),
        })
    }

    /// Exports a window of days. `buckets` are expected oldest first.
    pub fn export_window(&self, buckets: &[DayBucket], class_label: Option<&str>) -> Result<ExportOutcome> {
        let (first, last) = match (buckets.first(), buckets.last()) {
            (Some(first), Some(last)) if report::has_records(buckets) => (first.date, last.date),
            _ => return Ok(nothing_to_export()),
        };

        let path = self.output_dir.join(report::window_file_name(first, last, class_label, self.format.extension()));
        let title = format!("Last Week Attendance - {} to {}", first, last);

        self.write(&path, |path| match self.format {
            ExportFormat::Csv => write_csv(path, &CONSOLIDATED_HEADER, consolidated_rows(buckets)),
            ExportFormat::Excel => write_workbook(path, &WorkbookPlan::for_window(buckets)),
            ExportFormat::Pdf => write_pdf(path, &title, &self.document(&title, class_label, buckets)),
        })
    }

    fn document(&self, title: &str, class_label: Option<&str>, buckets: &[DayBucket]) -> DocumentLayout {
        let label = class_label.filter(|label| !label.trim().is_empty()).unwrap_or("All classes");
        layout::place(&layout::attendance_document(title, label, buckets, self.generated_at))
    }

    // A failed write never leaves a partial file behind.
    fn write<F>(&self, path: &Path, writer: F) -> Result<ExportOutcome>
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        fs::create_dir_all(&self.output_dir)?;
        if let Err(error) = writer(path) {
            let _ = fs::remove_file(path);
            return Err(error);
        }
        msg_success!(Message::ExportCompleted(path.display().to_string()));
        Ok(ExportOutcome::Written(path.to_path_buf()))
    }
}

fn nothing_to_export() -> ExportOutcome {
    msg_warning!(Message::NothingToExport);
    ExportOutcome::NothingToExport
}

fn report_rows_for_day(bucket: &DayBucket) -> Vec<Vec<Cell>> {
    report::flat_rows(&bucket.records).iter().map(report::FlatRow::cells).collect()
}

fn write_csv(path: &Path, header: &[&str], rows: Vec<Vec<Cell>>) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(row.iter().map(Cell::to_string))?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_workbook(path: &Path, plan: &WorkbookPlan) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold().set_background_color(Color::Gray);

    for sheet in &plan.sheets {
        write_sheet(&mut workbook, sheet, &header_format)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_sheet(workbook: &mut Workbook, sheet: &SheetPlan, header_format: &Format) -> Result<()> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&sheet.name)?;

    for (col, title) in sheet.header.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, title, header_format)?;
    }

    for (index, cells) in sheet.rows.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, cell) in cells.iter().enumerate() {
            match cell {
                Cell::Text(text) => worksheet.write_string(row, col as u16, text)?,
                Cell::Number(number) => worksheet.write_number(row, col as u16, *number)?,
            };
        }
    }

    worksheet.autofit();
    Ok(())
}

fn write_pdf(path: &Path, title: &str, document: &DocumentLayout) -> Result<()> {
    let (doc, first_page, first_layer) = PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
    for _ in 1..document.page_count {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for line in &document.lines {
        let Some(layer) = line.page.checked_sub(1).and_then(|index| layers.get(index)) else {
            continue;
        };
        let font = if line.style.is_bold() { &bold } else { &regular };
        for cell in &line.cells {
            layer.use_text(cell.text.clone(), line.style.font_size(), Mm(cell.x), Mm(line.baseline_from_bottom()), font);
        }
    }

    doc.save(&mut BufWriter::new(File::create(path)?))?;
    Ok(())
}
