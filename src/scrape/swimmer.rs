// src/scrape/swimmer.rs
// Swimmer profile: a small name/metadata table up top, then an event/time
// history table of dated swims grouped under bold event-name rows.

use std::time::Instant;

use chrono::NaiveDate;

use crate::config::options::{ClassYears, ScrapeOptions};
use crate::core::html;
use crate::core::sanitize::to_lowercase_fast;
use crate::error::{Result, ScrapeError};
use crate::model::{Performance, Swimmer};
use crate::times;

// Cell layout of the metadata table.
const LAST_NAME_CELL: usize = 1;
const FIRST_NAME_CELL: usize = 2;
const YEAR_CODE_CELL: usize = 9;

// Tables on the page: metadata first, history third.
const INFO_TABLE: usize = 0;
const HISTORY_TABLE: usize = 2;

// History rows: the date fills the first 10 characters of the row text,
// the time starts at character 13.
const DATE_CHARS: usize = 10;
const TIME_START: usize = 13;
const DATE_FORMAT: &str = "%m/%d/%Y";

/// Fetch a profile page and parse it.
pub fn fetch(url: &str, opts: &ScrapeOptions) -> Result<Swimmer> {
    let doc = super::get(url, opts)?;
    let t = Instant::now();
    let out = parse_doc(&doc, &opts.class_years).map_err(|e| e.at(url));
    logd!("Swimmer: parse {url} in {:?}", t.elapsed());
    out
}

/// Split out for unit tests.
pub fn parse_doc(doc: &str, years: &ClassYears) -> Result<Swimmer> {
    let tables = html::tag_blocks_ci(doc, "table");

    let &(info_s, info_e) = tables
        .get(INFO_TABLE)
        .ok_or_else(|| ScrapeError::markup("a swimmer info table"))?;
    let info = &doc[info_s..info_e];

    let cells = html::tag_blocks_ci(info, "td");
    let last = bold_cell_text(info, &cells, LAST_NAME_CELL, "last name")?;
    let first = bold_cell_text(info, &cells, FIRST_NAME_CELL, "first name")?;
    let year_raw = bold_cell_text(info, &cells, YEAR_CODE_CELL, "graduation year")?;

    let code: u16 = year_raw.trim().parse().map_err(|_| {
        ScrapeError::markup(format!("a numeric graduation year, got {year_raw:?}"))
    })?;
    let class_year = years.class_for(code)?;

    // The history table is the one tolerated absence: profiles without any
    // recorded swims simply don't render it.
    let history = match tables.get(HISTORY_TABLE) {
        Some(&(h_s, h_e)) => Some(parse_history(&doc[h_s..h_e])?),
        None => None,
    };

    Ok(Swimmer {
        name: join!(first, " ", &last),
        class_year,
        history,
    })
}

/// `<b>` text of the nth cell of the info table.
fn bold_cell_text(
    info: &str,
    cells: &[(usize, usize)],
    index: usize,
    what: &str,
) -> Result<String> {
    let &(c_s, c_e) = cells.get(index).ok_or_else(|| {
        ScrapeError::markup(format!("info cell {index} ({what})"))
    })?;
    let cell = &info[c_s..c_e];
    let (b_s, b_e) = html::next_tag_block_ci(cell, "b", 0).ok_or_else(|| {
        ScrapeError::markup(format!("bold {what} in info cell {index}"))
    })?;
    Ok(html::text_of(&cell[b_s..b_e]))
}

/// Walk the history rows. Bold rows name the event for the rows after them
/// and produce nothing themselves; every other row is "MM/DD/YYYY  <time>"
/// at the fixed character offsets.
fn parse_history(table: &str) -> Result<Vec<Performance>> {
    let mut out = Vec::new();
    let rows = html::tag_blocks_ci(table, "tr");

    let mut current_event = match rows.first() {
        Some(&(r_s, r_e)) => html::text_of(&table[r_s..r_e]),
        None => return Ok(out), // present but empty: zero performances
    };

    for &(r_s, r_e) in &rows {
        let row = &table[r_s..r_e];
        if to_lowercase_fast(row).contains("<b>") {
            current_event = html::text_of(row);
            continue;
        }

        let text = html::text_of(row);
        let (date_part, time_part) = split_fixed(&text);
        let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(|source| {
            ScrapeError::DateFormat { raw: s!(date_part), source }
        })?;
        let seconds = times::parse_seconds(time_part)?;
        out.push(Performance {
            event: current_event.clone(),
            date,
            seconds,
        });
    }
    Ok(out)
}

/// Slice a history row's text at the fixed character offsets, staying on
/// char boundaries. Short rows surface as date/time parse errors.
fn split_fixed(text: &str) -> (&str, &str) {
    let offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let date_end = offsets.get(DATE_CHARS).copied().unwrap_or(text.len());
    let time_start = offsets.get(TIME_START).copied().unwrap_or(text.len());
    (&text[..date_end], &text[time_start..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassYear;

    // Cells 0-2 of the first row, 3-7 of the second, 8-9 of the third:
    // the graduation year lands in cell 9 as the live site renders it.
    const INFO: &str = concat!(
        "<table>",
        "<tr><td>Name:</td><td><b>Smith</b></td><td><b>Jane</b></td></tr>",
        "<tr><td>a</td><td>b</td><td>c</td><td>d</td><td>e</td></tr>",
        "<tr><td>Grad:</td><td><b>2023</b></td></tr>",
        "</table>",
    );

    const NAV: &str = "<table><tr><td>nav chrome</td></tr></table>";

    fn profile(history: &str) -> String {
        join!(INFO, NAV, history)
    }

    #[test]
    fn name_and_class_from_fixed_cells() {
        let doc = profile("");
        let swimmer = parse_doc(&doc, &ClassYears::default()).unwrap();
        assert_eq!(swimmer.name, "Jane Smith");
        assert_eq!(swimmer.class_year, ClassYear::Freshman);
    }

    #[test]
    fn missing_history_table_is_tolerated() {
        let doc = profile("");
        let swimmer = parse_doc(&doc, &ClassYears::default()).unwrap();
        assert_eq!(swimmer.history, None);
        assert!(swimmer.performances().is_empty());
    }

    #[test]
    fn rowless_history_table_reads_as_zero_performances() {
        let doc = profile("<table></table>");
        let swimmer = parse_doc(&doc, &ClassYears::default()).unwrap();
        assert_eq!(swimmer.history, Some(vec![]));
        assert!(swimmer.performances().is_empty());
    }

    #[test]
    fn performances_grouped_under_bold_event_rows() {
        let doc = profile(concat!(
            "<table>",
            "<tr><td><b>100 Free</b></td></tr>",
            "<tr><td>09/12/2019&nbsp;&nbsp;&nbsp;58.21</td></tr>",
            "<tr><td>09/19/2019&nbsp;&nbsp;&nbsp;1:03.55</td></tr>",
            "<tr><td><b>200 IM</b></td></tr>",
            "<tr><td>10/01/2019&nbsp;&nbsp;&nbsp;DQ</td></tr>",
            "</table>",
        ));
        let swimmer = parse_doc(&doc, &ClassYears::default()).unwrap();
        let perfs = swimmer.performances();
        assert_eq!(perfs.len(), 3);

        assert_eq!(perfs[0].event, "100 Free");
        assert_eq!(perfs[0].date, NaiveDate::from_ymd_opt(2019, 9, 12).unwrap());
        assert_eq!(perfs[0].seconds, Some(58.21));

        assert_eq!(perfs[1].event, "100 Free");
        assert_eq!(perfs[1].seconds, Some(63.55));

        assert_eq!(perfs[2].event, "200 IM");
        assert_eq!(perfs[2].date, NaiveDate::from_ymd_opt(2019, 10, 1).unwrap());
        assert_eq!(perfs[2].seconds, None); // DQ
    }

    #[test]
    fn malformed_history_row_surfaces_a_date_error() {
        let doc = profile(concat!(
            "<table>",
            "<tr><td><b>100 Free</b></td></tr>",
            "<tr><td>next Tuesday maybe</td></tr>",
            "</table>",
        ));
        let err = parse_doc(&doc, &ClassYears::default()).unwrap_err();
        assert!(matches!(err, ScrapeError::DateFormat { .. }));
    }

    #[test]
    fn unknown_graduation_code_is_a_hard_error() {
        let doc = profile("").replace("2023", "1999");
        let err = parse_doc(&doc, &ClassYears::default()).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::UnknownClassYear { code: 1999 }
        ));
    }

    #[test]
    fn non_numeric_graduation_code_is_a_markup_error() {
        let doc = profile("").replace("2023", "FR");
        let err = parse_doc(&doc, &ClassYears::default()).unwrap_err();
        assert!(matches!(err, ScrapeError::Markup { .. }));
    }

    #[test]
    fn season_anchor_shifts_the_mapping() {
        let doc = profile("").replace("2023", "2026");
        let swimmer = parse_doc(&doc, &ClassYears::for_season(2026)).unwrap();
        assert_eq!(swimmer.class_year, ClassYear::Senior);
    }

    #[test]
    fn missing_info_cells_are_markup_errors() {
        let doc = "<table><tr><td>only</td></tr></table>";
        let err = parse_doc(doc, &ClassYears::default()).unwrap_err();
        assert!(matches!(err, ScrapeError::Markup { .. }));
    }
}
