// src/error.rs
// Error taxonomy for everything the scrapers can hit: fetch failures,
// unexpected page structure, and unparseable field values. All of these
// surface to the caller; nothing is retried or recovered internally.

use thiserror::Error;

use crate::core::net::NetError;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A fetch failed. Carries the url; propagated, never retried.
    #[error("GET {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: NetError,
    },

    /// A parse-stage error wrapped with the page it came from.
    #[error("{url}: {source}")]
    At {
        url: String,
        #[source]
        source: Box<ScrapeError>,
    },

    /// An expected table/cell/attribute is absent.
    #[error("page structure: expected {expected}")]
    Markup { expected: String },

    /// Same, pinned to a row index of the table being walked.
    #[error("row {row}: expected {expected}")]
    MarkupRow { row: usize, expected: String },

    /// A time string matching none of: plain seconds, DQ, mm:ss.
    #[error("unparseable time {raw:?}")]
    TimeFormat { raw: String },

    /// A history row whose leading characters do not hold MM/DD/YYYY.
    #[error("unparseable date {raw:?}")]
    DateFormat {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Graduation-year code outside the configured mapping.
    #[error("unknown class year code {code}")]
    UnknownClassYear { code: u16 },
}

impl ScrapeError {
    pub(crate) fn markup(expected: impl Into<String>) -> Self {
        ScrapeError::Markup { expected: expected.into() }
    }

    pub(crate) fn markup_row(row: usize, expected: impl Into<String>) -> Self {
        ScrapeError::MarkupRow { row, expected: expected.into() }
    }

    /// Attach the page url; the fetch wrappers call this on parse errors.
    pub(crate) fn at(self, url: &str) -> Self {
        ScrapeError::At { url: s!(url), source: Box::new(self) }
    }
}
