// src/config/consts.rs

// Section III endpoints
pub const TEAMS_INDEX_URL: &str =
    "http://www.swimdata.info/NYState/Sec3/BSwimMeet.nsf/WebTeams?OpenView";
pub const MEETS_INDEX_URL: &str =
    "http://www.swimdata.info/NYState/Sec3/BSwimMeet.nsf/Meets?OpenView";

// Site bases for relative hrefs
pub const SWIMDATA_BASE: &str = "http://www.swimdata.info";
pub const RESULTS_BASE: &str = "http://www.section3swim.com";

// Meet-list links on a date page carry this href fragment.
pub const MEET_LIST_MARKER: &str = "Meet%20List";

// Results page: the dual-meet table is the fifteenth table of the page.
pub const MEET_RESULTS_TABLE: usize = 14;

// Class year: a graduation code equal to this year reads as SR.
pub const DEFAULT_SENIOR_YEAR: u16 = 2020;

// Net
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms

// Log
pub const LOG_DIR: &str = ".swim_scrape";
pub const LOG_FILE: &str = ".swim_scrape/debug.log";
