// src/scrape/meets.rs
// Meet listings: a team's meet-history table, and the section-wide crawl
// over the meets index (date pages → meet-list links).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use crate::config::consts::{MEETS_INDEX_URL, MEET_LIST_MARKER, RESULTS_BASE};
use crate::config::options::ScrapeOptions;
use crate::core::html;
use crate::error::{Result, ScrapeError};
use crate::model::MeetRef;
use crate::progress::Progress;

// Team meet-history page: the meet table sits third from the end.
const MEETS_TABLE_FROM_END: usize = 3;

// Meet-history row layout.
const DATE_CELL: usize = 0;
const NAME_CELL: usize = 1;

pub fn fetch(team_url: &str, opts: &ScrapeOptions) -> Result<Vec<MeetRef>> {
    let doc = super::get(team_url, opts)?;
    parse_doc(&doc).map_err(|e| e.at(team_url))
}

/// Meets a team has swum, from its history page. Hrefs stay verbatim.
pub fn parse_doc(doc: &str) -> Result<Vec<MeetRef>> {
    let tables = html::tag_blocks_ci(doc, "table");
    if tables.len() < MEETS_TABLE_FROM_END {
        return Err(ScrapeError::markup(format!(
            "at least {MEETS_TABLE_FROM_END} tables on the meet-history page, got {}",
            tables.len()
        )));
    }
    let (t_s, t_e) = tables[tables.len() - MEETS_TABLE_FROM_END];
    let table = &doc[t_s..t_e];

    let mut meets = Vec::new();
    for (i, (tr_s, tr_e)) in html::tag_blocks_ci(table, "tr").into_iter().enumerate() {
        let tr = &table[tr_s..tr_e];
        let anchors = html::tag_blocks_ci(tr, "a");
        let Some(&(a_s, a_e)) = anchors.first() else {
            continue; // header/spacer rows carry no link
        };
        let href = html::attr_value(html::opener_of(&tr[a_s..a_e]), "href")
            .ok_or_else(|| ScrapeError::markup_row(i, "an href on the meet link"))?;

        let cells = html::tag_blocks_ci(tr, "td");
        let cell_text = |n: usize| -> Result<String> {
            let &(c_s, c_e) = cells.get(n).ok_or_else(|| {
                ScrapeError::markup_row(i, format!("cell {n} in a meet row"))
            })?;
            Ok(html::text_of(&tr[c_s..c_e]))
        };

        meets.push(MeetRef {
            name: cell_text(NAME_CELL)?,
            date: cell_text(DATE_CELL)?,
            url: href,
        });
    }
    Ok(meets)
}

/// (label, url) for every date page linked from the meets index.
pub fn parse_date_links(doc: &str) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    for (a_s, a_e) in html::tag_blocks_ci(doc, "a") {
        let block = &doc[a_s..a_e];
        let text = html::text_of(block);
        let label = text.trim();
        if label.is_empty() {
            continue;
        }
        let href = html::attr_value(html::opener_of(block), "href")
            .ok_or_else(|| ScrapeError::markup(format!("an href on date link {label:?}")))?;
        out.push((s!(label), join!(RESULTS_BASE, &href)));
    }
    Ok(out)
}

/// Meet-list links on one date page, recognized by the href marker.
/// Anchors without an href are skipped.
pub fn parse_meet_links(doc: &str) -> Vec<String> {
    let mut out = Vec::new();
    for (a_s, a_e) in html::tag_blocks_ci(doc, "a") {
        match html::attr_value(html::opener_of(&doc[a_s..a_e]), "href") {
            Some(href) if href.contains(MEET_LIST_MARKER) => {
                out.push(join!(RESULTS_BASE, &href));
            }
            _ => {}
        }
    }
    out
}

/// Crawl every meet url in the section: the meets index lists one page per
/// date, each date page links the meets swum that day. Date pages go
/// through a small worker pool; per-page failures are logged and reported
/// through `progress`, not fatal.
pub fn fetch_all(
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<String>> {
    let index = super::get(MEETS_INDEX_URL, opts)?;
    let dates = parse_date_links(&index).map_err(|e| e.at(MEETS_INDEX_URL))?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(dates.len());
    }

    let dates = Arc::new(dates);
    let cursor = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<Vec<String>>)>();

    let workers = opts.workers.min(dates.len()).max(1);

    for _ in 0..workers {
        let dates = Arc::clone(&dates);
        let cursor = Arc::clone(&cursor);
        let tx = res_tx.clone();
        let opts = opts.clone();

        thread::spawn(move || {
            loop {
                let i = cursor.fetch_add(1, Ordering::Relaxed);
                if i >= dates.len() {
                    break;
                }
                let (_, url) = &dates[i];
                let result = super::get(url, &opts).map(|doc| parse_meet_links(&doc));
                let _ = tx.send((i, result));
                let jitter = (i as u64) % opts.jitter_ms.max(1);
                thread::sleep(Duration::from_millis(opts.pause_ms + jitter)); // be polite
            }
        });
    }
    drop(res_tx); // main thread is sole receiver now

    let mut per_date: Vec<(usize, Vec<String>)> = Vec::new();
    for _ in 0..dates.len() {
        match res_rx.recv() {
            Ok((i, Ok(urls))) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&dates[i].0);
                }
                per_date.push((i, urls));
            }
            Ok((i, Err(e))) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&dates[i].0);
                }
                loge!("Date page {}: {e}", dates[i].1);
            }
            Err(_) => break, // workers ended early; bail gracefully
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    // Back to index order
    per_date.sort_by_key(|(i, _)| *i);
    let mut urls = Vec::new();
    for (_, mut list) in per_date {
        urls.append(&mut list);
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meet_rows_need_a_link() {
        let doc = concat!(
            "<table><tr><td>chrome</td></tr></table>",
            "<table>",
            "<tr><td>Date</td><td>Meet</td></tr>",
            "<tr><td>12/05</td><td>vs Beta</td><td><a href=\"/m/1?Open\">results</a></td></tr>",
            "<tr><td>12/12</td><td>vs Gamma</td><td><a href=\"/m/2?Open\">results</a></td></tr>",
            "</table>",
            "<table><tr><td>chrome</td></tr></table>",
            "<table><tr><td>chrome</td></tr></table>",
        );
        let meets = parse_doc(doc).unwrap();
        assert_eq!(
            meets,
            vec![
                MeetRef { name: s!("vs Beta"), date: s!("12/05"), url: s!("/m/1?Open") },
                MeetRef { name: s!("vs Gamma"), date: s!("12/12"), url: s!("/m/2?Open") },
            ]
        );
    }

    #[test]
    fn too_few_tables_is_a_markup_error() {
        let doc = "<table><tr><td>x</td></tr></table>";
        assert!(matches!(
            parse_doc(doc).unwrap_err(),
            ScrapeError::Markup { .. }
        ));
    }

    #[test]
    fn date_links_skip_blank_labels() {
        let doc = concat!(
            "<a href=\"/d/1\">12/05/2019</a>",
            "<a href=\"/icon\"> </a>",
            "<a href=\"/d/2\">12/12/2019</a>",
        );
        let dates = parse_date_links(doc).unwrap();
        assert_eq!(
            dates,
            vec![
                (s!("12/05/2019"), s!("http://www.section3swim.com/d/1")),
                (s!("12/12/2019"), s!("http://www.section3swim.com/d/2")),
            ]
        );
    }

    #[test]
    fn meet_links_filter_on_the_href_marker() {
        let doc = concat!(
            "<a href=\"/x/Meet%20List/1?Open\">meet one</a>",
            "<a href=\"/y/Other/2?Open\">not a meet</a>",
            "<a name=anchor>no href</a>",
            "<a href=\"/x/Meet%20List/3?Open\">meet three</a>",
        );
        let urls = parse_meet_links(doc);
        assert_eq!(
            urls,
            vec![
                s!("http://www.section3swim.com/x/Meet%20List/1?Open"),
                s!("http://www.section3swim.com/x/Meet%20List/3?Open"),
            ]
        );
    }
}
