//! Message catalogue for every user-facing string in rollbook.
//!
//! Messages are grouped by the subsystem that emits them. Variants carry
//! their dynamic parameters so formatting stays in one place
//! (see [`super::display`]).

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleApi,
    ConfigModuleReport,
    ApiNotConfigured,
    PromptSelectModules,
    PromptApiUrl,
    PromptApiToken,
    PromptWindowDays,
    PromptPageSize,
    PromptOutputDir,

    // === FETCH MESSAGES ===
    FetchingDay(String),                    // date
    FetchingWindow(usize, String, String),  // days, start, end
    DayFetchFailed(String, String),         // date, error
    RosterFallbackUsed(String),             // date
    AttendanceUnavailable(String, String),  // date, error
    StaleFetchDiscarded(u64, u64),          // ticket, current
    PagerAdopted(usize),                    // rows on page
    PagerComputed(usize),                   // total items
    PageOutOfRange(u32, u32),               // page, total pages

    // === VIEW MESSAGES ===
    DayHeader(String, String),   // date, class label
    WeekHeader(String, String),  // start, end
    ClassesHeader,
    NoClassesFound,
    NoRecordsForDay(String),     // date
    RosterFallbackNotice,
    PageFooter(u32, u32, usize), // page, total pages, total items
    DaySummary(usize, usize, u32),
    AverageAttendance(u32),
    AverageFromTodayRecords(u32),

    // === EXPORT MESSAGES ===
    ExportingData(String, String), // data, format
    ExportCompleted(String),       // path
    NothingToExport,

    // === INPUT MESSAGES ===
    InvalidDate(String),
}
