//! Attendance data model.
//!
//! Records and buckets are rebuilt on every fetch and never persisted. The
//! remote service is loose about field names and value types, so record
//! construction from JSON is best-effort: missing or oddly typed fields fall
//! back to defaults instead of failing the whole payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Placeholder used when a record carries no student name.
pub const UNKNOWN_STUDENT: &str = "Unknown student";

/// Attendance mark for one student on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
    /// No mark has been entered yet.
    Unset,
}

impl AttendanceStatus {
    /// Parses a status value case-insensitively. Anything unrecognised,
    /// including `null`, is [`AttendanceStatus::Unset`].
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str).map(|s| s.trim().to_ascii_uppercase()) {
            Some(s) if s == "PRESENT" => AttendanceStatus::Present,
            Some(s) if s == "ABSENT" => AttendanceStatus::Absent,
            _ => AttendanceStatus::Unset,
        }
    }

    /// Label used in exported tables.
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "PRESENT",
            AttendanceStatus::Absent => "ABSENT",
            AttendanceStatus::Unset => "NOT MARKED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// `None` when the payload carries no usable student id.
    pub student_id: Option<i64>,
    pub student_name: String,
    pub roll_number: String,
    pub status: AttendanceStatus,
    /// Free text, only meaningful for absences.
    pub remarks: Option<String>,
}

impl AttendanceRecord {
    /// Builds a record from an arbitrary JSON element.
    ///
    /// Accepts both camelCase and snake_case keys, a nested `student`
    /// object for id/name/roll number, and numbers encoded as strings.
    /// Never fails: a non-object element yields a record made of defaults.
    pub fn from_value(value: &Value) -> Self {
        let student = value.get("student");
        let field = |keys: &[&str]| lookup(value, keys).or_else(|| student.and_then(|s| lookup(s, keys)));

        // A top-level `id` may be the attendance row's own id, so it only
        // counts when nothing more specific is present.
        let student_id = field(&["studentId", "student_id"])
            .or_else(|| student.and_then(|s| s.get("id")))
            .or_else(|| value.get("id"))
            .and_then(as_i64);
        let student_name = field(&["studentName", "student_name", "name"])
            .and_then(as_text)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_STUDENT.to_string());
        let roll_number = field(&["rollNumber", "roll_number", "rollNo"]).and_then(as_text).unwrap_or_default();
        let status = AttendanceStatus::from_value(value.get("status"));
        let remarks = value.get("remarks").and_then(as_text).filter(|r| !r.trim().is_empty());

        Self {
            student_id,
            student_name,
            roll_number,
            status,
            remarks,
        }
    }

    /// An unmarked record for a roster entry.
    pub fn unset(entry: &RosterEntry) -> Self {
        Self {
            student_id: entry.id,
            student_name: entry.name.clone(),
            roll_number: entry.roll_number.clone(),
            status: AttendanceStatus::Unset,
            remarks: None,
        }
    }

    /// Remarks column value: the remark for absences, `-` otherwise.
    pub fn remarks_label(&self) -> &str {
        match (&self.status, &self.remarks) {
            (AttendanceStatus::Absent, Some(remarks)) => remarks.as_str(),
            _ => "-",
        }
    }
}

/// All attendance records for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub records: Vec<AttendanceRecord>,
}

impl DayBucket {
    /// Wraps records for a date. Later duplicates of a student id are
    /// dropped so each student appears at most once per day. Records
    /// without an id are always kept.
    pub fn new(date: NaiveDate, records: Vec<AttendanceRecord>) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter(|r| r.student_id.map_or(true, |id| seen.insert(id)))
            .collect();
        Self { date, records }
    }

    /// A bucket with no data, used when a day's fetch failed.
    pub fn empty(date: NaiveDate) -> Self {
        Self { date, records: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One student in a class roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: Option<i64>,
    pub name: String,
    pub roll_number: String,
}

impl RosterEntry {
    pub fn from_value(value: &Value) -> Self {
        let record = AttendanceRecord::from_value(value);
        Self {
            id: record.student_id,
            name: record.student_name,
            roll_number: record.roll_number,
        }
    }
}

/// Class listing as reported by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub id: i64,
    pub name: String,
    /// Today's attendance rate, if the class has reported one.
    pub rate: Option<u32>,
    pub total_students: u32,
}

impl ClassSummary {
    pub fn from_value(value: &Value) -> Self {
        let get = |keys: &[&str]| lookup(value, keys);
        Self {
            id: get(&["id", "classId", "class_id"]).and_then(as_i64).unwrap_or_default(),
            name: get(&["name", "className", "class_name"]).and_then(as_text).unwrap_or_default(),
            rate: get(&["rate", "attendanceRate", "attendance_rate"])
                .and_then(as_f64)
                .map(|r| r.round().clamp(0.0, 100.0) as u32),
            total_students: get(&["totalStudents", "total_students", "studentCount"])
                .and_then(as_i64)
                .map(|n| n.max(0) as u32)
                .unwrap_or_default(),
        }
    }
}

/// First non-null value among `keys`.
fn lookup<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| value.get(*key).filter(|v| !v.is_null()))
}

/// Reads an integer from a JSON number or numeric string.
pub(crate) fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse().ok(),
        _ => None,
    }
}

/// Reads text from a JSON string or number.
pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
