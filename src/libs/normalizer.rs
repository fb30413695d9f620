//! Response normalization for attendance payloads.
//!
//! The attendance endpoint has answered with different shapes over its
//! history and across call sites. This module classifies a decoded payload
//! into a [`ResponseShape`] using a fixed, ordered probe table and extracts
//! the record sequence from it. Classification never fails; anything that
//! does not match a known shape is [`ResponseShape::Unknown`] and yields no
//! records.
//!
//! ## Probe Order
//!
//! ```text
//! 1. bare array            [ {...}, {...} ]
//! 2. `records` field       { "records": [...] }
//! 3. `attendance` field    { "attendance": [...] }
//! 4. first array field     { "data": [...], ... }   (covers paginated `rows`)
//! 5. unknown               null, 42, "text", {}, { "foo": "bar" }
//! ```

use crate::libs::attendance::AttendanceRecord;
use serde_json::Value;

/// Classified shape of an attendance response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseShape<'a> {
    BareArray(&'a [Value]),
    Records(&'a [Value]),
    Attendance(&'a [Value]),
    /// First array-valued field of an object, with its key.
    FirstArrayField(&'a str, &'a [Value]),
    Unknown,
}

type Probe = for<'a> fn(&'a Value) -> Option<ResponseShape<'a>>;

/// Probe table, evaluated top to bottom. The first match wins.
const PROBES: &[Probe] = &[probe_bare_array, probe_records, probe_attendance, probe_first_array_field];

impl<'a> ResponseShape<'a> {
    /// Classifies a payload.
    pub fn classify(payload: &'a Value) -> Self {
        PROBES
            .iter()
            .find_map(|probe| probe(payload))
            .unwrap_or(ResponseShape::Unknown)
    }

    /// The raw elements carried by this shape.
    pub fn elements(&self) -> &'a [Value] {
        match *self {
            ResponseShape::BareArray(items)
            | ResponseShape::Records(items)
            | ResponseShape::Attendance(items)
            | ResponseShape::FirstArrayField(_, items) => items,
            ResponseShape::Unknown => &[],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResponseShape::BareArray(_) => "bare-array",
            ResponseShape::Records(_) => "records",
            ResponseShape::Attendance(_) => "attendance",
            ResponseShape::FirstArrayField(..) => "first-array-field",
            ResponseShape::Unknown => "unknown",
        }
    }
}

fn probe_bare_array(payload: &Value) -> Option<ResponseShape<'_>> {
    payload.as_array().map(|items| ResponseShape::BareArray(items.as_slice()))
}

fn probe_records(payload: &Value) -> Option<ResponseShape<'_>> {
    payload.get("records")?.as_array().map(|items| ResponseShape::Records(items.as_slice()))
}

fn probe_attendance(payload: &Value) -> Option<ResponseShape<'_>> {
    payload.get("attendance")?.as_array().map(|items| ResponseShape::Attendance(items.as_slice()))
}

fn probe_first_array_field(payload: &Value) -> Option<ResponseShape<'_>> {
    payload
        .as_object()?
        .iter()
        .find_map(|(key, value)| value.as_array().map(|items| ResponseShape::FirstArrayField(key.as_str(), items.as_slice())))
}

/// Extracts the raw element sequence of any payload, using the same probe
/// order as [`normalize`]. Shared with roster and class listings.
pub fn extract_sequence(payload: &Value) -> &[Value] {
    ResponseShape::classify(payload).elements()
}

/// Extracts attendance records from an arbitrarily shaped payload.
///
/// Elements are converted optimistically with
/// [`AttendanceRecord::from_value`]; malformed elements are kept with
/// default fields rather than dropped.
pub fn normalize(payload: &Value) -> Vec<AttendanceRecord> {
    let shape = ResponseShape::classify(payload);
    tracing::trace!(shape = shape.name(), elements = shape.elements().len(), "normalized attendance payload");
    shape.elements().iter().map(AttendanceRecord::from_value).collect()
}
