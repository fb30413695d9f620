#![allow(dead_code)]

use chrono::NaiveDate;
use parking_lot::Mutex;
use rollbook::api::{ApiError, AttendanceQuery, AttendanceSource};
use rollbook::libs::attendance::{ClassSummary, RosterEntry};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// In-memory attendance source with configurable failures and latency.
#[derive(Default)]
pub struct FakeSource {
    days: HashMap<NaiveDate, Value>,
    failing: HashSet<NaiveDate>,
    latency: HashMap<NaiveDate, Duration>,
    class_latency: HashMap<i64, Duration>,
    roster: Option<Vec<RosterEntry>>,
    classes: Vec<ClassSummary>,
    pub queries: Mutex<Vec<AttendanceQuery>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, date: NaiveDate, payload: Value) -> Self {
        self.days.insert(date, payload);
        self
    }

    pub fn failing_on(mut self, date: NaiveDate) -> Self {
        self.failing.insert(date);
        self
    }

    pub fn with_latency(mut self, date: NaiveDate, millis: u64) -> Self {
        self.latency.insert(date, Duration::from_millis(millis));
        self
    }

    pub fn with_class_latency(mut self, class_id: i64, millis: u64) -> Self {
        self.class_latency.insert(class_id, Duration::from_millis(millis));
        self
    }

    pub fn with_roster(mut self, roster: Vec<RosterEntry>) -> Self {
        self.roster = Some(roster);
        self
    }

    pub fn with_classes(mut self, classes: Vec<ClassSummary>) -> Self {
        self.classes = classes;
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().len()
    }
}

impl AttendanceSource for FakeSource {
    async fn attendance_for_date(&self, query: &AttendanceQuery) -> Result<Value, ApiError> {
        self.queries.lock().push(*query);

        let delay = self
            .latency
            .get(&query.date)
            .or_else(|| query.class_id.and_then(|id| self.class_latency.get(&id)))
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.contains(&query.date) {
            return Err(ApiError::Status {
                status: 500,
                url: format!("fake://attendance?date={}", query.date),
            });
        }
        Ok(self.days.get(&query.date).cloned().unwrap_or_else(|| json!([])))
    }

    async fn roster(&self, _class_id: Option<i64>) -> Result<Vec<RosterEntry>, ApiError> {
        self.roster.clone().ok_or(ApiError::Network {
            message: "roster unavailable".to_string(),
        })
    }

    async fn classes(&self) -> Result<Vec<ClassSummary>, ApiError> {
        Ok(self.classes.clone())
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A raw student record as the API sends it.
pub fn student(id: i64, status: Option<&str>) -> Value {
    json!({
        "studentId": id,
        "studentName": format!("Student {}", id),
        "rollNumber": format!("R-{:03}", id),
        "status": status,
    })
}

/// `count` raw records with ids starting at 1, alternating present and absent.
pub fn students(count: usize) -> Vec<Value> {
    (1..=count as i64)
        .map(|id| student(id, Some(if id % 2 == 0 { "ABSENT" } else { "PRESENT" })))
        .collect()
}

pub fn roster(count: usize) -> Vec<RosterEntry> {
    (1..=count as i64)
        .map(|id| RosterEntry {
            id: Some(id),
            name: format!("Student {}", id),
            roll_number: format!("R-{:03}", id),
        })
        .collect()
}
