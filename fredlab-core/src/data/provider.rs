//! Series provider trait and structured error types.
//!
//! The SeriesProvider trait abstracts over the economic-data source so the
//! front-ends can be exercised against a mock and the memoization layer
//! stays provider-agnostic.

use crate::domain::{DateRange, TimeSeries};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One ranked search result, as presented to the user.
///
/// The two observation dates are canonical `YYYY-MM-DD` strings after
/// normalization (see [`crate::data::search`]); straight off the provider
/// they are whatever the wire carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub observation_start: String,
    pub observation_end: String,
    pub frequency: String,
    pub units: String,
}

/// Structured error types for data operations.
///
/// Designed to be displayable in both CLI and TUI contexts. Every variant
/// degrades to a user-visible warning at the call site — nothing here is
/// fatal to the session.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("series not found: {series_id}")]
    SeriesNotFound { series_id: String },

    #[error("response format changed: {0}")]
    BadResponse(String),

    #[error("no observations for series '{series_id}' in the requested range")]
    NoData { series_id: String },
}

/// Trait for economic-data providers.
///
/// `search` returns the provider's ranking verbatim — truncation and date
/// normalization are applied above this seam. `fetch` returns the series
/// at full resolution for the requested window.
pub trait SeriesProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Keyword search, provider ranking preserved.
    fn search(&self, query: &str) -> Result<Vec<SearchHit>, DataError>;

    /// Fetch observations for a series id over a date range.
    fn fetch(&self, series_id: &str, range: DateRange) -> Result<TimeSeries, DataError>;
}

impl SeriesProvider for Box<dyn SeriesProvider> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn search(&self, query: &str) -> Result<Vec<SearchHit>, DataError> {
        (**self).search(query)
    }

    fn fetch(&self, series_id: &str, range: DateRange) -> Result<TimeSeries, DataError> {
        (**self).fetch(series_id, range)
    }
}
