use super::attendance::AttendanceRecord;
use super::pager::PaginationState;
use super::stats::{ClassRollup, TrendPoint};
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn records(records: &[AttendanceRecord], state: &PaginationState) -> Result<()> {
        let mut table = Table::new();
        let first = (state.current_page as usize - 1) * state.page_size as usize;

        table.add_row(row!["#", "NAME", "ROLL NUMBER", "STATUS", "REMARKS"]);
        for (index, record) in records.iter().enumerate() {
            table.add_row(row![
                first + index + 1,
                record.student_name,
                record.roll_number,
                record.status.label(),
                record.remarks_label()
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn trend(trend: &[TrendPoint]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "PRESENT", "ABSENT", "TOTAL", "RATE"]);
        for point in trend {
            table.add_row(row![
                point.date.format("%a %Y-%m-%d"),
                point.present,
                point.absent,
                point.total,
                format!("{}%", point.rate)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn classes(classes: &[ClassRollup]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["CLASS", "STUDENTS", "RATE"]);
        for class in classes {
            let rate = match class.rate {
                0 => "-".to_string(),
                rate => format!("{}%", rate),
            };
            table.add_row(row![class.class_name, class.total_students, rate]);
        }
        table.printstd();

        Ok(())
    }
}
