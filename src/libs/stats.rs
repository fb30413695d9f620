//! Attendance statistics.
//!
//! ## Rate
//!
//! ```text
//! rate = round(present / (present + absent) * 100)   when present + absent > 0
//!      = 0                                           otherwise
//! ```
//!
//! Unset records count towards neither side of the ratio.
//!
//! ## Cross-class average
//!
//! Classes that report a rate of 0 (or none at all) are treated as "not
//! reported yet" and left out of the average. When no class has reported,
//! the average falls back to the raw rate of today's records.

use crate::libs::attendance::{AttendanceRecord, AttendanceStatus, ClassSummary, DayBucket};
use chrono::NaiveDate;
use serde::Serialize;

/// Integer attendance percentage, `0` when nothing is marked.
pub fn rate(present: usize, absent: usize) -> u32 {
    let total = present + absent;
    if total == 0 {
        return 0;
    }
    (present as f64 / total as f64 * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub present_count: usize,
    pub absent_count: usize,
}

impl SummaryStats {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        records.iter().fold(Self::default(), |mut stats, record| {
            match record.status {
                AttendanceStatus::Present => stats.present_count += 1,
                AttendanceStatus::Absent => stats.absent_count += 1,
                AttendanceStatus::Unset => {}
            }
            stats
        })
    }

    pub fn total_marked(&self) -> usize {
        self.present_count + self.absent_count
    }

    pub fn rate(&self) -> u32 {
        rate(self.present_count, self.absent_count)
    }
}

impl std::ops::Add for SummaryStats {
    type Output = SummaryStats;

    fn add(self, other: SummaryStats) -> SummaryStats {
        SummaryStats {
            present_count: self.present_count + other.present_count,
            absent_count: self.absent_count + other.absent_count,
        }
    }
}

/// One point of the trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub present: usize,
    pub absent: usize,
    /// Records in the bucket, unset ones included.
    pub total: usize,
    pub rate: u32,
}

impl TrendPoint {
    pub fn from_bucket(bucket: &DayBucket) -> Self {
        let stats = SummaryStats::from_records(&bucket.records);
        Self {
            date: bucket.date,
            present: stats.present_count,
            absent: stats.absent_count,
            total: bucket.records.len(),
            rate: stats.rate(),
        }
    }

    pub fn stats(&self) -> SummaryStats {
        SummaryStats {
            present_count: self.present,
            absent_count: self.absent,
        }
    }
}

/// One point per bucket, in bucket order. Empty buckets stay in the series
/// as zero points so dates keep their position.
pub fn weekly_trend(buckets: &[DayBucket]) -> Vec<TrendPoint> {
    buckets.iter().map(TrendPoint::from_bucket).collect()
}

/// Sums a trend series into window-wide stats.
pub fn window_totals(trend: &[TrendPoint]) -> SummaryStats {
    trend.iter().map(TrendPoint::stats).fold(SummaryStats::default(), |acc, stats| acc + stats)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRollup {
    pub class_name: String,
    /// 0 means the class has not reported.
    pub rate: u32,
    pub total_students: u32,
}

impl From<&ClassSummary> for ClassRollup {
    fn from(summary: &ClassSummary) -> Self {
        Self {
            class_name: summary.name.clone(),
            rate: summary.rate.unwrap_or(0).min(100),
            total_students: summary.total_students,
        }
    }
}

impl From<ClassSummary> for ClassRollup {
    fn from(summary: ClassSummary) -> Self {
        ClassRollup::from(&summary)
    }
}

/// Where an average attendance figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AverageRate {
    /// Mean over classes with a non-zero rate.
    Classes { rate: u32, reporting: usize },
    /// No class reported; raw rate of today's records.
    TodayRecords(u32),
}

impl AverageRate {
    pub fn value(&self) -> u32 {
        match *self {
            AverageRate::Classes { rate, .. } => rate,
            AverageRate::TodayRecords(rate) => rate,
        }
    }
}

/// Average attendance across classes, see the module docs for the rules.
pub fn average_rate(classes: &[ClassRollup], today: &[AttendanceRecord]) -> AverageRate {
    let reporting: Vec<u32> = classes.iter().map(|c| c.rate).filter(|rate| *rate > 0).collect();
    if reporting.is_empty() {
        return AverageRate::TodayRecords(SummaryStats::from_records(today).rate());
    }

    let sum: u32 = reporting.iter().sum();
    AverageRate::Classes {
        rate: (sum as f64 / reporting.len() as f64).round() as u32,
        reporting: reporting.len(),
    }
}
