//! One day of attendance, page by page.

use super::{class_label, load_config, parse_date, school_api};
use crate::{
    libs::{
        fetcher::{fetch_day_page, PageSource},
        messages::Message,
        pager::PageQuery,
        report::ALL_CLASSES,
        view::View,
    },
    msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DayArgs {
    /// `today` or YYYY-MM-DD
    #[arg(default_value = "today")]
    date: String,

    /// Class id to filter by
    #[arg(short, long)]
    class: Option<i64>,

    /// Class name shown in the header
    #[arg(short, long)]
    label: Option<String>,

    /// Page to show, starting at 1
    #[arg(short, long, default_value_t = 1)]
    page: u32,

    /// Records per page, defaults to the configured page size
    #[arg(short = 's', long)]
    page_size: Option<u32>,
}

pub async fn cmd(args: DayArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let config = load_config()?;
    let api = school_api(&config)?;
    let page_size = args.page_size.unwrap_or(config.report_or_default().page_size);
    let label = class_label(args.label, args.class).unwrap_or_else(|| ALL_CLASSES.to_string());

    msg_info!(Message::FetchingDay(date.to_string()));
    let query = PageQuery::new(args.page, page_size);
    let day_page = fetch_day_page(&api, date, args.class, query).await?;

    msg_print!(Message::DayHeader(date.to_string(), label), true);
    if day_page.source == PageSource::RosterFallback {
        msg_warning!(Message::RosterFallbackNotice);
    }

    let state = day_page.page.state;
    if day_page.page.items.is_empty() {
        msg_print!(Message::NoRecordsForDay(date.to_string()));
    } else {
        View::records(&day_page.page.items, &state)?;
    }
    msg_print!(Message::PageFooter(state.current_page, state.total_pages, state.total_items));

    if let Some(totals) = day_page.totals {
        msg_print!(Message::DaySummary(totals.present_count, totals.absent_count, totals.rate()));
    }

    Ok(())
}
