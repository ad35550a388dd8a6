// src/scrape/meet_results.rs
// Dual-meet results. The page renders every event and time as rows of one
// big table; a three-mode walk over those rows rebuilds the
// event → swimmer → time structure.

use std::time::Instant;

use crate::config::consts::MEET_RESULTS_TABLE;
use crate::config::options::ScrapeOptions;
use crate::core::html;
use crate::error::{Result, ScrapeError};
use crate::model::{EventResult, TimeEntry};

// Fixed column layout of the results table: home side on the left, away on
// the right. Columns 3 and 4 hold place/points and never feed the model.
const HOME_TIME: usize = 0;
const HOME_NAME: usize = 1;
const HOME_EXHIB: usize = 2;
const AWAY_EXHIB: usize = 5;
const AWAY_NAME: usize = 6;
const AWAY_TIME: usize = 7;
const TIME_ROW_WIDTH: usize = 8;

// Row markers.
const EXHIBITION_MARKER: &str = "Exhibition";
const EXHIBITION_FLAG: &str = "ex";

/// Parse mode while walking rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Expecting an event header.
    Event,
    /// Inside an event's time rows.
    Times,
    /// Inside an exhibition block; rows are discarded until a lone header.
    Exhib,
}

/// What one row does to the output.
#[derive(Debug, PartialEq)]
enum Step {
    /// Open a new event with this name.
    Start(String),
    /// Append one home and one away entry to the current event.
    Record { home: TimeEntry, away: TimeEntry },
    /// Mode bookkeeping only.
    Skip,
}

/// Fetch a meet results page and parse it.
pub fn fetch(url: &str, opts: &ScrapeOptions) -> Result<Vec<EventResult>> {
    let doc = super::get(url, opts)?;
    let t = Instant::now();
    let out = parse_doc(&doc).map_err(|e| e.at(url));
    logd!("Meet results: parse {url} in {:?}", t.elapsed());
    out
}

/// Split out for unit tests: locate the results table and run the row fold.
pub fn parse_doc(doc: &str) -> Result<Vec<EventResult>> {
    let tables = html::tag_blocks_ci(doc, "table");
    let &(tb_s, tb_e) = tables.get(MEET_RESULTS_TABLE).ok_or_else(|| {
        ScrapeError::markup(format!(
            "a results table at position {} ({} tables on page)",
            MEET_RESULTS_TABLE + 1,
            tables.len()
        ))
    })?;
    let table = &doc[tb_s..tb_e];

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (tr_s, tr_e) in html::tag_blocks_ci(table, "tr") {
        let tr = &table[tr_s..tr_e];
        let cells = html::tag_blocks_ci(tr, "td")
            .into_iter()
            .map(|(c_s, c_e)| html::text_of(&tr[c_s..c_e]))
            .collect();
        rows.push(cells);
    }

    // The table's first and last rows are header/footer chrome.
    if rows.len() < 2 {
        return Err(ScrapeError::markup(
            "a results table with header and footer rows",
        ));
    }
    parse_rows(&rows[1..rows.len() - 1])
}

/// The core fold: ordered rows of cell text → events.
pub fn parse_rows(rows: &[Vec<String>]) -> Result<Vec<EventResult>> {
    let mut events: Vec<EventResult> = Vec::new();
    let mut mode = Mode::Event;

    for (i, row) in rows.iter().enumerate() {
        let (next, action) = step(mode, row, i)?;
        mode = next;
        match action {
            Step::Start(name) => events.push(EventResult::named(name)),
            Step::Record { home, away } => {
                let event = events.last_mut().ok_or_else(|| {
                    ScrapeError::markup_row(i, "an event header before time rows")
                })?;
                event.home.push(home);
                event.away.push(away);
            }
            Step::Skip => {}
        }
    }
    Ok(events)
}

/// One transition of the row walk. Precedence: the exhibition marker wins
/// over everything, then the lone-cell header check, then the mode itself.
fn step(mode: Mode, row: &[String], index: usize) -> Result<(Mode, Step)> {
    let first = row.first().ok_or_else(|| {
        ScrapeError::markup_row(index, "a row with at least one cell")
    })?;

    if first.contains(EXHIBITION_MARKER) {
        return Ok((Mode::Exhib, Step::Skip));
    }

    // A lone cell is always an event header. Inside an exhibition block it
    // doubles as the end of the block; the rows before it stay discarded.
    if row.len() == 1 {
        return Ok((Mode::Times, Step::Start(first.clone())));
    }

    match mode {
        Mode::Event => Ok((Mode::Times, Step::Start(first.clone()))),
        Mode::Times => {
            if row.len() < TIME_ROW_WIDTH {
                return Err(ScrapeError::markup_row(
                    index,
                    format!("{TIME_ROW_WIDTH} cells in a time row, got {}", row.len()),
                ));
            }
            if row[HOME_TIME].is_empty() && row[AWAY_TIME].is_empty() {
                // Sentinel: the current event's time block is over.
                Ok((Mode::Event, Step::Skip))
            } else {
                Ok((
                    Mode::Times,
                    Step::Record {
                        home: entry(row, HOME_TIME, HOME_NAME, HOME_EXHIB),
                        away: entry(row, AWAY_TIME, AWAY_NAME, AWAY_EXHIB),
                    },
                ))
            }
        }
        Mode::Exhib => Ok((Mode::Exhib, Step::Skip)),
    }
}

fn entry(row: &[String], time: usize, name: usize, exhib: usize) -> TimeEntry {
    TimeEntry {
        raw_time: row[time].clone(),
        swimmer_name: row[name].clone(),
        is_exhibition: row[exhib].to_ascii_lowercase().contains(EXHIBITION_FLAG),
    }
}
