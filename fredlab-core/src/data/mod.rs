//! Data access: the FRED facade, memoization, normalization, and export.

pub mod export;
pub mod fred;
pub mod memo;
pub mod popular;
pub mod provider;
pub mod search;

pub use export::{export_series_csv, export_series_quarterly_csv, ExportError};
pub use fred::FredProvider;
pub use memo::{DataService, MemoCache, MemoKey};
pub use popular::{PopularIndicator, PopularList};
pub use provider::{DataError, SearchHit, SeriesProvider};
pub use search::normalize_search_results;
