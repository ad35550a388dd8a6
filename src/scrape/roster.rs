// src/scrape/roster.rs
// Swimmers of one team: every anchor inside the last table of the team page.

use crate::config::consts::SWIMDATA_BASE;
use crate::config::options::ScrapeOptions;
use crate::core::html;
use crate::error::{Result, ScrapeError};
use crate::model::SwimmerRef;

pub fn fetch(team_url: &str, opts: &ScrapeOptions) -> Result<Vec<SwimmerRef>> {
    let doc = super::get(team_url, opts)?;
    parse_doc(&doc).map_err(|e| e.at(team_url))
}

/// Split out for unit tests.
pub fn parse_doc(doc: &str) -> Result<Vec<SwimmerRef>> {
    let tables = html::tag_blocks_ci(doc, "table");
    let &(t_s, t_e) = tables
        .last()
        .ok_or_else(|| ScrapeError::markup("a swimmer table on the team page"))?;
    let table = &doc[t_s..t_e];

    let mut swimmers = Vec::new();
    for (a_s, a_e) in html::tag_blocks_ci(table, "a") {
        let block = &table[a_s..a_e];
        let href = html::attr_value(html::opener_of(block), "href")
            .ok_or_else(|| ScrapeError::markup("an href on a swimmer link"))?;
        swimmers.push(SwimmerRef {
            name: html::text_of(block),
            url: join!(SWIMDATA_BASE, &href),
        });
    }
    Ok(swimmers)
}
