mod common;

#[cfg(test)]
mod tests {
    use super::common::{date, student};
    use rollbook::libs::attendance::{AttendanceRecord, ClassSummary, DayBucket};
    use rollbook::libs::stats::{average_rate, rate, weekly_trend, window_totals, AverageRate, ClassRollup, SummaryStats, TrendPoint};
    use serde_json::json;

    fn record(id: i64, status: Option<&str>) -> AttendanceRecord {
        AttendanceRecord::from_value(&student(id, status))
    }

    fn rollup(name: &str, rate: u32) -> ClassRollup {
        ClassRollup {
            class_name: name.to_string(),
            rate,
            total_students: 30,
        }
    }

    #[test]
    fn test_rate_formula() {
        assert_eq!(rate(0, 0), 0);
        assert_eq!(rate(3, 1), 75);
        assert_eq!(rate(1, 3), 25);
        assert_eq!(rate(2, 1), 67);
        assert_eq!(rate(1, 2), 33);
        assert_eq!(rate(5, 0), 100);
    }

    #[test]
    fn test_unset_records_are_not_counted() {
        let records = vec![
            record(1, Some("PRESENT")),
            record(2, Some("PRESENT")),
            record(3, Some("PRESENT")),
            record(4, Some("ABSENT")),
            record(5, None),
            record(6, None),
        ];

        let stats = SummaryStats::from_records(&records);
        assert_eq!(stats.present_count, 3);
        assert_eq!(stats.absent_count, 1);
        assert_eq!(stats.total_marked(), 4);
        assert_eq!(stats.rate(), 75);
    }

    #[test]
    fn test_trend_keeps_empty_days() {
        let buckets = vec![
            DayBucket::new(date(2024, 6, 7), vec![record(1, Some("PRESENT")), record(2, None)]),
            DayBucket::empty(date(2024, 6, 8)),
            DayBucket::new(date(2024, 6, 9), vec![record(1, Some("ABSENT"))]),
        ];

        let trend = weekly_trend(&buckets);

        assert_eq!(trend.len(), 3);
        assert_eq!(
            trend[1],
            TrendPoint {
                date: date(2024, 6, 8),
                present: 0,
                absent: 0,
                total: 0,
                rate: 0,
            }
        );
        assert_eq!(trend[0].total, 2);
        assert_eq!(trend[0].rate, 100);
        assert_eq!(trend[2].rate, 0);
        assert_eq!(trend.iter().map(|p| p.date).collect::<Vec<_>>(), buckets.iter().map(|b| b.date).collect::<Vec<_>>());
    }

    #[test]
    fn test_window_totals() {
        let buckets = vec![
            DayBucket::new(date(2024, 6, 8), vec![record(1, Some("PRESENT")), record(2, Some("ABSENT"))]),
            DayBucket::new(date(2024, 6, 9), vec![record(1, Some("PRESENT")), record(2, Some("PRESENT"))]),
        ];

        let totals = window_totals(&weekly_trend(&buckets));
        assert_eq!(totals.present_count, 3);
        assert_eq!(totals.absent_count, 1);
        assert_eq!(totals.rate(), 75);
        assert_eq!(window_totals(&[]), SummaryStats::default());
    }

    #[test]
    fn test_average_ignores_classes_without_signal() {
        let classes = vec![rollup("5A", 90), rollup("5B", 0), rollup("5C", 81)];

        let average = average_rate(&classes, &[]);
        assert_eq!(average, AverageRate::Classes { rate: 86, reporting: 2 });
        assert_eq!(average.value(), 86);
    }

    #[test]
    fn test_average_falls_back_to_today_records() {
        let classes = vec![rollup("5A", 0), rollup("5B", 0)];
        let today = vec![record(1, Some("PRESENT")), record(2, Some("ABSENT")), record(3, Some("PRESENT")), record(4, Some("PRESENT"))];

        assert_eq!(average_rate(&classes, &today), AverageRate::TodayRecords(75));
        assert_eq!(average_rate(&[], &[]), AverageRate::TodayRecords(0));
    }

    #[test]
    fn test_class_rollup_from_summary() {
        let reported = ClassSummary::from_value(&json!({ "id": 1, "name": "5A", "attendanceRate": "92.6%", "totalStudents": 28 }));
        let silent = ClassSummary::from_value(&json!({ "id": 2, "className": "5B", "studentCount": "31" }));

        let reported = ClassRollup::from(&reported);
        assert_eq!(reported.class_name, "5A");
        assert_eq!(reported.rate, 93);
        assert_eq!(reported.total_students, 28);

        let silent = ClassRollup::from(&silent);
        assert_eq!(silent.class_name, "5B");
        assert_eq!(silent.rate, 0);
        assert_eq!(silent.total_students, 31);
    }

    #[test]
    fn test_trend_serializes_dates_as_iso_strings() {
        let buckets = vec![DayBucket::new(date(2024, 6, 10), vec![record(1, Some("PRESENT"))])];

        let value = serde_json::to_value(weekly_trend(&buckets)).unwrap();
        assert_eq!(value[0]["date"], json!("2024-06-10"));
        assert_eq!(value[0]["rate"], json!(100));

        let bucket = serde_json::to_value(&buckets[0]).unwrap();
        assert_eq!(bucket["date"], json!("2024-06-10"));
        assert_eq!(bucket["records"][0]["studentId"], json!(1));
    }
}
