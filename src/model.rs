// src/model.rs
// Typed records produced by the scrapers. Everything here is transient:
// built within one parse call, handed to the caller, compared structurally.

use chrono::NaiveDate;

use crate::error::Result;
use crate::times;

/// One recorded time inside an event. Not yet numerically parsed; that is a
/// separate pure step applied on demand via [`TimeEntry::seconds`].
#[derive(Clone, Debug, PartialEq)]
pub struct TimeEntry {
    pub raw_time: String,
    pub swimmer_name: String,
    pub is_exhibition: bool,
}

impl TimeEntry {
    /// Numeric seconds for this entry; `None` for DQ/blank times.
    pub fn seconds(&self) -> Result<Option<f64>> {
        times::parse_seconds(&self.raw_time)
    }
}

/// One event of a dual meet with its home and away time lists. The lists
/// grow row by row and are positionally independent of each other.
#[derive(Clone, Debug, PartialEq)]
pub struct EventResult {
    pub name: String,
    pub home: Vec<TimeEntry>,
    pub away: Vec<TimeEntry>,
}

impl EventResult {
    pub(crate) fn named(name: String) -> Self {
        Self { name, home: Vec::new(), away: Vec::new() }
    }
}

/// Competitive eligibility class, displayed with the site's own codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassYear {
    Senior,
    Junior,
    Sophomore,
    Freshman,
    Grade8,
    Grade7,
}

impl ClassYear {
    pub fn code(&self) -> &'static str {
        match self {
            ClassYear::Senior => "SR",
            ClassYear::Junior => "JR",
            ClassYear::Sophomore => "SO",
            ClassYear::Freshman => "FR",
            ClassYear::Grade8 => "'8",
            ClassYear::Grade7 => "'7",
        }
    }
}

impl std::fmt::Display for ClassYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One swim from a swimmer's history table.
#[derive(Clone, Debug, PartialEq)]
pub struct Performance {
    pub event: String,
    pub date: NaiveDate,
    pub seconds: Option<f64>,
}

/// A swimmer profile. `history` is `None` when the profile page carries no
/// performance table at all, `Some(vec![])` when the table is present but
/// empty; both read as an empty [`Swimmer::performances`] slice.
#[derive(Clone, Debug, PartialEq)]
pub struct Swimmer {
    pub name: String,
    pub class_year: ClassYear,
    pub history: Option<Vec<Performance>>,
}

impl Swimmer {
    pub fn performances(&self) -> &[Performance] {
        self.history.as_deref().unwrap_or(&[])
    }
}

/// (name, url) as listed in the teams dropdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamRef {
    pub name: String,
    pub url: String,
}

/// (name, url) as linked from a team page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwimmerRef {
    pub name: String,
    pub url: String,
}

/// (name, date, url) from a team's meet-history table. The date stays the
/// raw cell text; the listing page's format is not a contract we own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeetRef {
    pub name: String,
    pub date: String,
    pub url: String,
}
