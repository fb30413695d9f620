//! Attendance trend over the configured window.

use super::{load_config, school_api};
use crate::{
    libs::{
        fetcher::{DateWindow, WindowState},
        messages::Message,
        stats::{weekly_trend, window_totals},
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct WeekArgs {
    /// Class id to filter by
    #[arg(short, long)]
    class: Option<i64>,

    /// Number of days before today, defaults to the configured window
    #[arg(short, long)]
    days: Option<u32>,
}

pub async fn cmd(args: WeekArgs) -> Result<()> {
    let config = load_config()?;
    let api = school_api(&config)?;
    let window = DateWindow::ending_today(args.days.unwrap_or(config.report_or_default().window_days));

    msg_info!(Message::FetchingWindow(window.days as usize, window.start().to_string(), window.end().to_string()));
    let state = WindowState::new();
    state.refresh(&api, &window, args.class).await;

    let trend = weekly_trend(&state.buckets());
    msg_print!(Message::WeekHeader(window.start().to_string(), window.end().to_string()), true);
    View::trend(&trend)?;

    let totals = window_totals(&trend);
    msg_print!(Message::DaySummary(totals.present_count, totals.absent_count, totals.rate()));

    Ok(())
}
