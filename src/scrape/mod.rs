// src/scrape/mod.rs
mod scrape;

pub mod meet_results;
pub mod meets;
pub mod roster;
pub mod swimmer;
pub mod teams;

pub use scrape::{
    collect_all_meet_urls, collect_meet_results, collect_meets, collect_roster,
    collect_swimmer, collect_teams,
};

use crate::config::options::ScrapeOptions;
use crate::core::net;
use crate::error::{Result, ScrapeError};

/// One GET with the configured timeout, failures tagged with the url.
pub(crate) fn get(url: &str, opts: &ScrapeOptions) -> Result<String> {
    net::http_get(url, opts.timeout)
        .map_err(|source| ScrapeError::Network { url: s!(url), source })
}
