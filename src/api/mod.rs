//! Remote attendance service.
//!
//! Everything rollbook knows about the school comes through the
//! [`AttendanceSource`] trait: per-day attendance, class rosters, and the
//! class listing. [`school::SchoolApi`] is the HTTP implementation; tests
//! substitute an in-memory source.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rollbook::api::{AttendanceQuery, AttendanceSource, SchoolApi, ApiConfig};
//! use chrono::NaiveDate;
//!
//! let api = SchoolApi::new(&ApiConfig {
//!     api_url: "https://school.example.com/api".to_string(),
//!     auth_token: "token".to_string(),
//! });
//! let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
//! let payload = api.attendance_for_date(&AttendanceQuery::day(date, Some(4))).await?;
//! ```

use crate::libs::attendance::{ClassSummary, RosterEntry};
use chrono::NaiveDate;
use serde_json::Value;

pub mod error;
pub mod school;

pub use error::ApiError;
pub use school::{ApiConfig, SchoolApi};

/// Parameters of one attendance query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttendanceQuery {
    pub date: NaiveDate,
    pub class_id: Option<i64>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl AttendanceQuery {
    /// An unpaginated query for a whole day.
    pub fn day(date: NaiveDate, class_id: Option<i64>) -> Self {
        Self {
            date,
            class_id,
            page: None,
            page_size: None,
        }
    }

    pub fn paged(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }
}

/// Provider of attendance data.
///
/// `attendance_for_date` returns the decoded payload untouched: its shape
/// varies and is resolved by the normalizer and the pager, not here.
#[allow(async_fn_in_trait)]
pub trait AttendanceSource {
    /// Attendance for one date, optionally filtered by class and paginated.
    async fn attendance_for_date(&self, query: &AttendanceQuery) -> Result<Value, ApiError>;

    /// Students of a class, or of the whole school when `class_id` is `None`.
    async fn roster(&self, class_id: Option<i64>) -> Result<Vec<RosterEntry>, ApiError>;

    /// All classes with their reported attendance rate.
    async fn classes(&self) -> Result<Vec<ClassSummary>, ApiError>;
}
