// src/scrape/teams.rs
// Team list from the section index page: one <option> per team in the
// dropdown; the first option is the menu's title entry.

use crate::config::consts::TEAMS_INDEX_URL;
use crate::config::options::ScrapeOptions;
use crate::core::html;
use crate::error::{Result, ScrapeError};
use crate::model::TeamRef;

pub fn fetch(opts: &ScrapeOptions) -> Result<Vec<TeamRef>> {
    let doc = super::get(TEAMS_INDEX_URL, opts)?;
    parse_doc(&doc).map_err(|e| e.at(TEAMS_INDEX_URL))
}

/// Split out for unit tests.
pub fn parse_doc(doc: &str) -> Result<Vec<TeamRef>> {
    let mut teams = Vec::new();

    // Skip the first option: it is the dropdown's placeholder title.
    for (i, (o_s, o_e)) in html::tag_openers_ci(doc, "option")
        .into_iter()
        .enumerate()
        .skip(1)
    {
        let opener = &doc[o_s..o_e];
        let url = html::attr_value(opener, "value").ok_or_else(|| {
            ScrapeError::markup(format!("a value attribute on team option {i}"))
        })?;
        // Lotus markup leaves <option> unclosed; the label runs to the next tag.
        let name = html::text_until_tag(&doc[o_e..]);
        teams.push(TeamRef { name, url });
    }
    Ok(teams)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_the_placeholder_and_reads_value_attrs() {
        let doc = concat!(
            "<select name=teams>",
            "<option selected>-- Pick a team --</option>",
            "<option value=\"/NYState/Sec3/a?OpenDocument\">Alpha</option>",
            "<option value=\"/NYState/Sec3/b?OpenDocument\">Beta</option>",
            "</select>",
        );
        let teams = parse_doc(doc).unwrap();
        assert_eq!(
            teams,
            vec![
                TeamRef {
                    name: s!("Alpha"),
                    url: s!("/NYState/Sec3/a?OpenDocument"),
                },
                TeamRef {
                    name: s!("Beta"),
                    url: s!("/NYState/Sec3/b?OpenDocument"),
                },
            ]
        );
    }

    #[test]
    fn tolerates_unclosed_options() {
        let doc = concat!(
            "<select>",
            "<option>Teams",
            "<option value=u1>One",
            "<option value=u2>Two",
            "</select>",
        );
        let teams = parse_doc(doc).unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].name, "One");
        assert_eq!(teams[1].url, "u2");
    }

    #[test]
    fn missing_value_attr_is_a_markup_error() {
        let doc = "<option>title</option><option>No value here</option>";
        assert!(matches!(
            parse_doc(doc).unwrap_err(),
            ScrapeError::Markup { .. }
        ));
    }
}
