//! Core library modules for rollbook.
//!
//! ## Features
//!
//! - **Data Model**: attendance records, day buckets, rosters and classes
//! - **Fetching**: response normalization, concurrent window fetches, pagination
//! - **Statistics**: attendance rates, trends and class rollups
//! - **Reporting**: report planning, page layout and CSV / Excel / PDF export
//! - **Infrastructure**: configuration, data storage, messaging, console views
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rollbook::libs::fetcher::{fetch_window, DateWindow};
//! use rollbook::libs::stats::weekly_trend;
//!
//! let buckets = fetch_window(&api, &DateWindow::ending_today(7), None).await;
//! for point in weekly_trend(&buckets) {
//!     println!("{} {}%", point.date, point.rate);
//! }
//! ```

pub mod attendance;
pub mod config;
pub mod data_storage;
pub mod export;
pub mod fetcher;
pub mod layout;
pub mod messages;
pub mod normalizer;
pub mod pager;
pub mod report;
pub mod stats;
pub mod view;
