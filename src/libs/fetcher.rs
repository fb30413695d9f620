//! Per-day attendance fetching.
//!
//! ## Date Window
//!
//! A [`DateWindow`] of `N` days anchored on `today` covers the `N` calendar
//! days strictly before the anchor, oldest first:
//!
//! ```text
//! today = 2024-06-10, N = 7
//! 2024-06-03  2024-06-04  ...  2024-06-09      (2024-06-10 excluded)
//! ```
//!
//! ## Fault Isolation
//!
//! [`fetch_window`] sends one query per date, all in flight at once, and
//! waits for every one of them to settle. A failed day becomes an empty
//! [`DayBucket`] at the join point; the rest of the window is unaffected.
//! There are no retries.
//!
//! ## Stale Results
//!
//! A window fetch cannot be cancelled once started. [`WindowState`] tags
//! every refresh with a [`FetchTicket`] and only stores results whose ticket
//! is still the latest one issued, so a slow fetch for an old selection can
//! never overwrite a newer one.

use crate::api::{ApiError, AttendanceQuery, AttendanceSource};
use crate::libs::attendance::{AttendanceRecord, DayBucket};
use crate::libs::messages::Message;
use crate::libs::normalizer::normalize;
use crate::libs::pager::{select_pager, ComputedPagination, Page, PageQuery, Pager};
use crate::libs::stats::SummaryStats;
use crate::{msg_debug, msg_error_anyhow};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use futures::future::join_all;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

/// The `days` calendar days before `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub today: NaiveDate,
    pub days: u32,
}

impl DateWindow {
    /// A window of at least one day before `today`.
    pub fn new(today: NaiveDate, days: u32) -> Self {
        Self { today, days: days.max(1) }
    }

    /// A window anchored on the local current date.
    pub fn ending_today(days: u32) -> Self {
        Self::new(Local::now().date_naive(), days)
    }

    /// Window dates, oldest first.
    pub fn dates(&self) -> Vec<NaiveDate> {
        (1..=i64::from(self.days)).rev().map(|back| self.today - Duration::days(back)).collect()
    }

    pub fn start(&self) -> NaiveDate {
        self.today - Duration::days(i64::from(self.days))
    }

    pub fn end(&self) -> NaiveDate {
        self.today - Duration::days(1)
    }
}

/// Fetches and normalizes a whole day.
pub async fn fetch_day<S: AttendanceSource>(source: &S, date: NaiveDate, class_id: Option<i64>) -> Result<DayBucket, ApiError> {
    let payload = source.attendance_for_date(&AttendanceQuery::day(date, class_id)).await?;
    Ok(DayBucket::new(date, normalize(&payload)))
}

/// Fetches every date of the window concurrently.
///
/// Always returns exactly one bucket per window date, in window order.
pub async fn fetch_window<S: AttendanceSource>(source: &S, window: &DateWindow, class_id: Option<i64>) -> Vec<DayBucket> {
    let dates = window.dates();
    msg_debug!(Message::FetchingWindow(dates.len(), window.start().to_string(), window.end().to_string()));

    let requests = dates.into_iter().map(|date| async move {
        let outcome: Result<Value, ApiError> = source.attendance_for_date(&AttendanceQuery::day(date, class_id)).await;
        (date, outcome)
    });

    // join_all keeps input order regardless of settlement order.
    join_all(requests)
        .await
        .into_iter()
        .map(|(date, outcome)| match outcome {
            Ok(payload) => DayBucket::new(date, normalize(&payload)),
            Err(error) => {
                msg_debug!(Message::DayFetchFailed(date.to_string(), error.to_string()));
                DayBucket::empty(date)
            }
        })
        .collect()
}

/// Where the records of a [`DayPage`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSource {
    Attendance,
    /// The attendance query failed; every student is listed as unset.
    RosterFallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayPage {
    pub date: NaiveDate,
    pub page: Page<AttendanceRecord>,
    pub source: PageSource,
    /// Present and absent counts for the whole day. `None` when the server
    /// sent only part of the day.
    pub totals: Option<SummaryStats>,
}

/// Fetches one page of a day's attendance.
///
/// The source may or may not paginate; [`select_pager`] hides the
/// difference. When the attendance query fails the class roster is used to
/// build an all-unset page instead.
///
/// # Errors
///
/// Fails only when both the attendance query and the roster query fail.
pub async fn fetch_day_page<S: AttendanceSource>(
    source: &S,
    date: NaiveDate,
    class_id: Option<i64>,
    query: PageQuery,
) -> Result<DayPage> {
    let request = AttendanceQuery::day(date, class_id).paged(query.page, query.page_size);

    let (pager, page_source) = match source.attendance_for_date(&request).await {
        Ok(payload) => (select_pager(&payload), PageSource::Attendance),
        Err(error) => {
            msg_debug!(Message::DayFetchFailed(date.to_string(), error.to_string()));
            let roster = source
                .roster(class_id)
                .await
                .map_err(|roster_error| msg_error_anyhow!(Message::AttendanceUnavailable(date.to_string(), roster_error.to_string())))?;

            msg_debug!(Message::RosterFallbackUsed(date.to_string()));
            let records = DayBucket::new(date, roster.iter().map(AttendanceRecord::unset).collect()).records;
            let pager: Box<dyn Pager> = Box::new(ComputedPagination::new(records));
            (pager, PageSource::RosterFallback)
        }
    };

    let page = pager.page(query);

    if page.state.is_out_of_range() {
        msg_debug!(Message::PageOutOfRange(page.state.current_page, page.state.total_pages));
    }

    Ok(DayPage {
        date,
        page,
        source: page_source,
        totals: pager.day_totals(),
    })
}

/// Identifies one fetch issued by a [`FetchGeneration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Monotonic counter of issued fetches.
#[derive(Debug, Default)]
pub struct FetchGeneration {
    latest: AtomicU64,
}

impl FetchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new ticket, invalidating every earlier one.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest() == ticket.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A newer fetch was started; these results were dropped.
    Stale,
}

/// Holds the buckets of the most recent window fetch.
#[derive(Debug, Default)]
pub struct WindowState {
    generation: FetchGeneration,
    buckets: Mutex<Vec<DayBucket>>,
}

impl WindowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fetch. Any fetch started earlier becomes stale.
    pub fn begin(&self) -> FetchTicket {
        self.generation.begin()
    }

    /// Stores `buckets` if `ticket` is still the latest.
    pub fn apply(&self, ticket: FetchTicket, buckets: Vec<DayBucket>) -> RefreshOutcome {
        let mut current = self.buckets.lock();
        if !self.generation.is_current(ticket) {
            msg_debug!(Message::StaleFetchDiscarded(ticket.id(), self.generation.latest()));
            return RefreshOutcome::Stale;
        }
        *current = buckets;
        RefreshOutcome::Applied
    }

    /// Fetches `window` and stores the result unless a newer refresh was
    /// started in the meantime.
    pub async fn refresh<S: AttendanceSource>(&self, source: &S, window: &DateWindow, class_id: Option<i64>) -> RefreshOutcome {
        let ticket = self.begin();
        let buckets = fetch_window(source, window, class_id).await;
        self.apply(ticket, buckets)
    }

    pub fn buckets(&self) -> Vec<DayBucket> {
        self.buckets.lock().clone()
    }
}
