//! Uniform pagination over server-paginated and unpaginated responses.
//!
//! Two [`Pager`] implementations satisfy the same contract:
//!
//! - [`AdoptedPagination`]: the server already paginated (`rows` plus page
//!   metadata). Its metadata is adopted, with missing fields derived from
//!   the request.
//! - [`ComputedPagination`]: the response is the full record set and the
//!   page is sliced locally.
//!
//! For the same full record set and the same query both produce identical
//! slices and [`PaginationState`]s, so callers never need to know which
//! one they got. [`select_pager`] picks the implementation from the raw
//! payload shape.
//!
//! ## Out-of-range pages
//!
//! A page past the last one is not clamped. It yields an empty slice with
//! `current_page` kept as requested, `has_next_page = false` and
//! `has_previous_page = true`, which is what a paginating server returns
//! for the same request.

use crate::libs::attendance::{as_i64, AttendanceRecord};
use crate::libs::messages::Message;
use crate::libs::normalizer::normalize;
use crate::libs::stats::SummaryStats;
use crate::msg_debug;
use serde::Serialize;
use serde_json::Value;

/// Requested page, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
}

impl PageQuery {
    /// Builds a query, raising `page` and `page_size` to at least 1.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Zero-based index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.page_size as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: usize,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationState {
    /// Derives the full state from a query and the total item count.
    pub fn compute(query: PageQuery, total_items: usize) -> Self {
        let total_pages = total_pages(total_items, query.page_size);
        Self {
            current_page: query.page,
            page_size: query.page_size,
            total_items,
            total_pages,
            has_next_page: query.page < total_pages,
            has_previous_page: query.page > 1,
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        self.current_page > self.total_pages
    }
}

/// `ceil(total_items / page_size)`, never less than 1.
pub fn total_pages(total_items: usize, page_size: u32) -> u32 {
    let page_size = page_size.max(1) as usize;
    (total_items.div_ceil(page_size) as u32).max(1)
}

/// One page of items with its pagination state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub state: PaginationState,
}

pub trait Pager {
    fn page(&self, query: PageQuery) -> Page<AttendanceRecord>;

    /// Counts over the whole day, when the pager holds every record of it.
    fn day_totals(&self) -> Option<SummaryStats>;
}

/// Page metadata as sent by a paginating server. Every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerPageMeta {
    pub count: Option<usize>,
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
    pub total_pages: Option<u32>,
    pub has_next_page: Option<bool>,
    pub has_previous_page: Option<bool>,
}

impl ServerPageMeta {
    pub fn from_value(payload: &Value) -> Self {
        let number = |key: &str| payload.get(key).and_then(as_i64).filter(|n| *n >= 0);
        let flag = |key: &str| payload.get(key).and_then(Value::as_bool);
        Self {
            count: number("count").map(|n| n as usize),
            current_page: number("currentPage").map(|n| n as u32).filter(|n| *n >= 1),
            page_size: number("pageSize").map(|n| n as u32).filter(|n| *n >= 1),
            total_pages: number("totalPages").map(|n| n as u32),
            has_next_page: flag("hasNextPage"),
            has_previous_page: flag("hasPreviousPage"),
        }
    }
}

/// Server-side pagination: rows and metadata are taken as given.
#[derive(Debug, Clone, PartialEq)]
pub struct AdoptedPagination {
    rows: Vec<AttendanceRecord>,
    meta: ServerPageMeta,
}

impl AdoptedPagination {
    pub fn new(rows: Vec<AttendanceRecord>, meta: ServerPageMeta) -> Self {
        Self { rows, meta }
    }

    /// Builds from a payload carrying `rows`. Returns `None` for any other
    /// shape.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let rows = payload.get("rows")?.as_array()?;
        Some(Self::new(rows.iter().map(AttendanceRecord::from_value).collect(), ServerPageMeta::from_value(payload)))
    }
}

impl Pager for AdoptedPagination {
    fn page(&self, query: PageQuery) -> Page<AttendanceRecord> {
        let current_page = self.meta.current_page.unwrap_or(query.page);
        let page_size = self.meta.page_size.unwrap_or(query.page_size);
        let effective = PageQuery::new(current_page, page_size);

        // Without a count the best lower bound is everything up to this page.
        let total_items = self.meta.count.unwrap_or(effective.offset() + self.rows.len());
        let derived = PaginationState::compute(effective, total_items);

        let state = PaginationState {
            total_pages: self.meta.total_pages.unwrap_or(derived.total_pages),
            ..derived
        };
        let state = PaginationState {
            has_next_page: self.meta.has_next_page.unwrap_or(state.current_page < state.total_pages),
            has_previous_page: self.meta.has_previous_page.unwrap_or(derived.has_previous_page),
            ..state
        };

        Page {
            items: self.rows.clone(),
            state,
        }
    }

    // Only a single page that the server says is complete covers the day.
    fn day_totals(&self) -> Option<SummaryStats> {
        let complete = self.meta.count == Some(self.rows.len()) && self.meta.current_page.unwrap_or(1) == 1;
        complete.then(|| SummaryStats::from_records(&self.rows))
    }
}

/// Client-side pagination over the full record set.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedPagination {
    records: Vec<AttendanceRecord>,
}

impl ComputedPagination {
    pub fn new(records: Vec<AttendanceRecord>) -> Self {
        Self { records }
    }
}

impl Pager for ComputedPagination {
    fn page(&self, query: PageQuery) -> Page<AttendanceRecord> {
        let state = PaginationState::compute(query, self.records.len());
        let start = query.offset().min(self.records.len());
        let end = (start + query.page_size as usize).min(self.records.len());

        Page {
            items: self.records[start..end].to_vec(),
            state,
        }
    }

    fn day_totals(&self) -> Option<SummaryStats> {
        Some(SummaryStats::from_records(&self.records))
    }
}

/// Chooses the pager for a raw attendance payload: adopted when the server
/// sent `rows`, computed over the normalized records otherwise.
pub fn select_pager(payload: &Value) -> Box<dyn Pager> {
    match AdoptedPagination::from_payload(payload) {
        Some(adopted) => {
            msg_debug!(Message::PagerAdopted(adopted.rows.len()));
            Box::new(adopted)
        }
        None => {
            let records = normalize(payload);
            msg_debug!(Message::PagerComputed(records.len()));
            Box::new(ComputedPagination::new(records))
        }
    }
}
