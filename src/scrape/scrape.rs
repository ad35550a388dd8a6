// src/scrape/scrape.rs
// Collection entry points: one per page kind, typed results out.

use crate::config::options::ScrapeOptions;
use crate::error::Result;
use crate::model::{EventResult, MeetRef, Swimmer, SwimmerRef, TeamRef};
use crate::progress::Progress;

use super::{meet_results, meets, roster, swimmer, teams};

/// All teams in the section.
pub fn collect_teams(
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<TeamRef>> {
    if let Some(p) = progress.as_deref_mut() {
        p.log("Fetching team list…");
    }
    teams::fetch(opts)
}

/// Swimmers listed on a team page.
pub fn collect_roster(team_url: &str, opts: &ScrapeOptions) -> Result<Vec<SwimmerRef>> {
    roster::fetch(team_url, opts)
}

/// Meets a team has swum.
pub fn collect_meets(team_url: &str, opts: &ScrapeOptions) -> Result<Vec<MeetRef>> {
    meets::fetch(team_url, opts)
}

/// Every meet url in the section (pooled crawl over the date pages).
pub fn collect_all_meet_urls(
    opts: &ScrapeOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<Vec<String>> {
    meets::fetch_all(opts, progress)
}

/// Events and times of one dual meet.
pub fn collect_meet_results(url: &str, opts: &ScrapeOptions) -> Result<Vec<EventResult>> {
    meet_results::fetch(url, opts)
}

/// One swimmer's profile and history.
pub fn collect_swimmer(url: &str, opts: &ScrapeOptions) -> Result<Swimmer> {
    swimmer::fetch(url, opts)
}
