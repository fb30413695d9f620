mod common;

#[cfg(test)]
mod tests {
    use super::common::{date, student, students};
    use rollbook::libs::attendance::{AttendanceRecord, DayBucket};
    use rollbook::libs::normalizer::normalize;
    use rollbook::libs::report::{
        class_label, consolidated_rows, day_file_name, flat_rows, sheet_name, summary_rows, window_file_name, Cell, WorkbookPlan,
        CONSOLIDATED_HEADER, CONSOLIDATED_SHEET, SUMMARY_SHEET,
    };
    use serde_json::json;

    fn window() -> Vec<DayBucket> {
        vec![
            DayBucket::new(date(2024, 6, 7), normalize(&json!(students(3)))),
            DayBucket::empty(date(2024, 6, 8)),
            DayBucket::new(date(2024, 6, 9), normalize(&json!(students(2)))),
        ]
    }

    #[test]
    fn test_flat_row_labels() {
        let records: Vec<AttendanceRecord> = [
            json!({ "studentId": 1, "studentName": "Ann", "rollNumber": "01", "status": "ABSENT", "remarks": "Flu" }),
            json!({ "studentId": 2, "studentName": "Bob", "rollNumber": "02", "status": "ABSENT", "remarks": "  " }),
            json!({ "studentId": 3, "studentName": "Cy", "rollNumber": "03", "status": "PRESENT", "remarks": "Late" }),
            json!({ "studentId": 4, "studentName": "Di", "rollNumber": "04" }),
        ]
        .iter()
        .map(AttendanceRecord::from_value)
        .collect();

        let rows = flat_rows(&records);
        assert_eq!(rows[0].remarks, "Flu");
        assert_eq!(rows[1].remarks, "-");
        assert_eq!(rows[2].remarks, "-");
        assert_eq!(rows[3].status, "NOT MARKED");
        assert_eq!(
            rows[0].cells(),
            vec![Cell::Text("Ann".into()), Cell::Text("01".into()), Cell::Text("ABSENT".into()), Cell::Text("Flu".into())]
        );
    }

    #[test]
    fn test_summary_rows_include_empty_days() {
        let rows = summary_rows(&window());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].date, date(2024, 6, 8));
        assert_eq!((rows[1].present, rows[1].absent, rows[1].total, rows[1].rate), (0, 0, 0, 0));
        assert_eq!(rows[0].cells()[4], Cell::Number(67.0));
        assert_eq!(rows[0].cells()[1], Cell::Number(2.0));
    }

    #[test]
    fn test_window_workbook_layout() {
        let plan = WorkbookPlan::for_window(&window());

        assert_eq!(plan.sheet_names(), vec![SUMMARY_SHEET, "2024-06-07", "2024-06-09", CONSOLIDATED_SHEET]);
        assert_eq!(plan.sheet(SUMMARY_SHEET).unwrap().rows.len(), 3);
        assert_eq!(plan.sheet("2024-06-07").unwrap().rows.len(), 3);

        let consolidated = plan.sheet(CONSOLIDATED_SHEET).unwrap();
        assert_eq!(consolidated.header, CONSOLIDATED_HEADER.to_vec());
        assert_eq!(consolidated.rows.len(), 5);
        assert_eq!(consolidated.rows[0][0], Cell::Text("2024-06-07".into()));
        assert_eq!(consolidated.rows[4][0], Cell::Text("2024-06-09".into()));
    }

    #[test]
    fn test_day_workbook_has_single_sheet() {
        let bucket = DayBucket::new(date(2024, 6, 10), normalize(&json!([student(1, None)])));
        let plan = WorkbookPlan::for_day(&bucket);

        assert_eq!(plan.sheet_names(), vec!["2024-06-10"]);
        assert_eq!(plan.sheets[0].rows[0][2], Cell::Text("NOT MARKED".into()));
    }

    #[test]
    fn test_duplicate_sheet_names_get_suffix() {
        let buckets = vec![
            DayBucket::new(date(2024, 6, 7), normalize(&json!(students(1)))),
            DayBucket::new(date(2024, 6, 7), normalize(&json!(students(1)))),
        ];

        let plan = WorkbookPlan::for_window(&buckets);
        assert_eq!(plan.sheet_names(), vec![SUMMARY_SHEET, "2024-06-07", "2024-06-07 (2)", CONSOLIDATED_SHEET]);
    }

    #[test]
    fn test_sheet_name_sanitizing() {
        assert_eq!(sheet_name("06/07/2024"), "06-07-2024");
        assert_eq!(sheet_name("a[b]c:d*e?f\\g"), "a-b-c-d-e-f-g");
        assert_eq!(sheet_name("'quoted'"), "quoted");
        assert_eq!(sheet_name(""), "Sheet");

        let long = sheet_name("Attendance for Grade 5A on Monday 2024-06-10");
        assert_eq!(long.chars().count(), 31);
        assert!(long.starts_with("Attendance for Grade 5A"));
    }

    #[test]
    fn test_consolidated_rows_skip_nothing() {
        let rows = consolidated_rows(&window());
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|row| row.len() == 5));
    }

    #[test]
    fn test_file_names() {
        let day = date(2024, 6, 10);
        assert_eq!(day_file_name(day, None, "csv"), "attendance-2024-06-10-all.csv");
        assert_eq!(day_file_name(day, Some("Grade 5A"), "pdf"), "attendance-2024-06-10-Grade-5A.pdf");
        assert_eq!(
            window_file_name(date(2024, 6, 3), date(2024, 6, 9), Some("5/B"), "xlsx"),
            "last-week-attendance-5-B-2024-06-03-to-2024-06-09.xlsx"
        );
        assert_eq!(class_label(Some("  ")), "all");
        assert_eq!(class_label(Some("--Science / Lab--")), "Science-Lab");
    }
}
