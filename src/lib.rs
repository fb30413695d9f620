//! # Rollbook - School Attendance Reports
//!
//! A command-line client that pulls attendance from a school API and turns
//! it into views and reports.
//!
//! ## Features
//!
//! - **Tolerant Parsing**: attendance payloads of any known shape
//! - **Window Fetching**: concurrent per-day queries with per-day fault isolation
//! - **Pagination**: one view over server-paginated and unpaginated responses
//! - **Statistics**: present/absent rates, daily trends, class averages
//! - **Export**: CSV, multi-sheet Excel workbooks and paginated PDF reports
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rollbook::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
