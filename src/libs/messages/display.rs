//! Human-readable text for [`Message`].

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleApi => "School API settings".to_string(),
            Message::ConfigModuleReport => "Report settings".to_string(),
            Message::ApiNotConfigured => "The school API is not configured. Run `rollbook init` or set ROLLBOOK_API_URL.".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptApiUrl => "Enter the school API URL".to_string(),
            Message::PromptApiToken => "Enter the API access token".to_string(),
            Message::PromptWindowDays => "Days in the weekly window".to_string(),
            Message::PromptPageSize => "Records per page".to_string(),
            Message::PromptOutputDir => "Directory for exported reports (empty for current directory)".to_string(),

            // === FETCH MESSAGES ===
            Message::FetchingDay(date) => format!("Fetching attendance for {}...", date),
            Message::FetchingWindow(days, start, end) => format!("Fetching {} days of attendance ({} to {})...", days, start, end),
            Message::DayFetchFailed(date, error) => format!("Attendance for {} could not be loaded, treating it as no data: {}", date, error),
            Message::RosterFallbackUsed(date) => format!("Attendance for {} is unavailable, showing the class roster as not marked", date),
            Message::AttendanceUnavailable(date, error) => format!("No attendance or roster available for {}: {}", date, error),
            Message::StaleFetchDiscarded(ticket, current) => format!("Discarded stale window fetch #{} (current selection is #{})", ticket, current),
            Message::PagerAdopted(rows) => format!("Using server pagination ({} rows on this page)", rows),
            Message::PagerComputed(total) => format!("Paginating {} records locally", total),
            Message::PageOutOfRange(page, total) => format!("Page {} is past the last page ({}), nothing to show", page, total),

            // === VIEW MESSAGES ===
            Message::DayHeader(date, class) => format!("Attendance for {} ({})", date, class),
            Message::WeekHeader(start, end) => format!("Attendance trend {} to {}", start, end),
            Message::ClassesHeader => "Attendance by class".to_string(),
            Message::NoClassesFound => "No classes found".to_string(),
            Message::NoRecordsForDay(date) => format!("No attendance data for {}", date),
            Message::RosterFallbackNotice => "Attendance could not be loaded; listing the class roster as not marked".to_string(),
            Message::PageFooter(page, total_pages, total_items) => format!("Page {} of {} ({} students)", page, total_pages, total_items),
            Message::DaySummary(present, absent, rate) => format!("Present: {}  Absent: {}  Rate: {}%", present, absent, rate),
            Message::AverageAttendance(rate) => format!("Average attendance across reporting classes: {}%", rate),
            Message::AverageFromTodayRecords(rate) => format!("No class has reported a rate yet, today's raw rate: {}%", rate),

            // === EXPORT MESSAGES ===
            Message::ExportingData(data, format) => format!("Exporting {} in {} format...", data, format),
            Message::ExportCompleted(path) => format!("Export completed successfully: {}", path),
            Message::NothingToExport => "Nothing to export: the selected range has no attendance records".to_string(),

            // === INPUT MESSAGES ===
            Message::InvalidDate(input) => format!("Invalid date '{}', expected 'today' or YYYY-MM-DD", input),
        };
        write!(f, "{}", text)
    }
}
