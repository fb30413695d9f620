//! Per-class attendance rates and the cross-class average.

use super::{load_config, school_api};
use crate::{
    api::AttendanceSource,
    libs::{
        fetcher::fetch_day,
        messages::Message,
        stats::{average_rate, AverageRate, ClassRollup},
        view::View,
    },
    msg_print,
};
use anyhow::Result;
use chrono::Local;

pub async fn cmd() -> Result<()> {
    let config = load_config()?;
    let api = school_api(&config)?;

    let rollups: Vec<ClassRollup> = api.classes().await?.iter().map(ClassRollup::from).collect();

    msg_print!(Message::ClassesHeader, true);
    if rollups.is_empty() {
        msg_print!(Message::NoClassesFound);
    } else {
        View::classes(&rollups)?;
    }

    // Today's records are only needed when no class has reported a rate.
    let today = if rollups.iter().any(|rollup| rollup.rate > 0) {
        Vec::new()
    } else {
        fetch_day(&api, Local::now().date_naive(), None)
            .await
            .map(|bucket| bucket.records)
            .unwrap_or_default()
    };

    match average_rate(&rollups, &today) {
        AverageRate::Classes { rate, .. } => msg_print!(Message::AverageAttendance(rate)),
        AverageRate::TodayRecords(rate) => msg_print!(Message::AverageFromTodayRecords(rate)),
    }

    Ok(())
}
