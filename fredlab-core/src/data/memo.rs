//! Session-scoped memoization over the provider facade.
//!
//! Results are keyed by the operation plus its full argument set and live
//! for the lifetime of the session — no expiry, no cross-key reuse. A hit
//! is byte-equivalent to a fresh fetch of the same key. Only successes
//! are memoized; errors always retry on the next action.

use super::provider::{DataError, SearchHit, SeriesProvider};
use super::search::normalize_search_results;
use crate::domain::{DateRange, TimeSeries};
use std::collections::HashMap;

/// Operation + arguments. Distinct keys never share a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemoKey {
    Search { query: String },
    Fetch { series_id: String, range: DateRange },
}

#[derive(Debug, Clone)]
enum MemoValue {
    Search(Vec<SearchHit>),
    Fetch(TimeSeries),
}

/// The key → result map itself.
#[derive(Debug, Default)]
pub struct MemoCache {
    entries: HashMap<MemoKey, MemoValue>,
}

impl MemoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The facade the shells call: a provider with the memo layer in front.
///
/// Normalization of search results happens here, above the provider seam,
/// so cached and fresh paths return identical data.
pub struct DataService<P: SeriesProvider> {
    provider: P,
    memo: MemoCache,
}

impl<P: SeriesProvider> DataService<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            memo: MemoCache::new(),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Keyword search: memo first, then the provider, then normalize.
    pub fn search(&mut self, query: &str) -> Result<Vec<SearchHit>, DataError> {
        let key = MemoKey::Search {
            query: query.to_string(),
        };

        if let Some(MemoValue::Search(hits)) = self.memo.entries.get(&key) {
            log::debug!("memo hit: search '{query}'");
            return Ok(hits.clone());
        }

        let hits = normalize_search_results(self.provider.search(query)?);
        self.memo
            .entries
            .insert(key, MemoValue::Search(hits.clone()));
        Ok(hits)
    }

    /// Series fetch: memo first, then the provider.
    pub fn fetch(&mut self, series_id: &str, range: DateRange) -> Result<TimeSeries, DataError> {
        let key = MemoKey::Fetch {
            series_id: series_id.to_string(),
            range,
        };

        if let Some(MemoValue::Fetch(series)) = self.memo.entries.get(&key) {
            log::debug!("memo hit: fetch {series_id}");
            return Ok(series.clone());
        }

        let series = self.provider.fetch(series_id, range)?;
        self.memo
            .entries
            .insert(key, MemoValue::Fetch(series.clone()));
        Ok(series)
    }

    pub fn memoized_entries(&self) -> usize {
        self.memo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;
    use chrono::NaiveDate;
    use std::cell::Cell;

    /// Provider that counts calls and can be told to fail.
    struct CountingProvider {
        search_calls: Cell<usize>,
        fetch_calls: Cell<usize>,
        fail: bool,
    }

    impl CountingProvider {
        fn new(fail: bool) -> Self {
            Self {
                search_calls: Cell::new(0),
                fetch_calls: Cell::new(0),
                fail,
            }
        }
    }

    impl SeriesProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        fn search(&self, query: &str) -> Result<Vec<SearchHit>, DataError> {
            self.search_calls.set(self.search_calls.get() + 1);
            if self.fail {
                return Err(DataError::Network("down".into()));
            }
            Ok(vec![SearchHit {
                id: format!("{}-1", query.to_uppercase()),
                title: query.to_string(),
                observation_start: "2000-01-01".into(),
                observation_end: "2020-01-01".into(),
                frequency: "Monthly".into(),
                units: "Percent".into(),
            }])
        }

        fn fetch(&self, series_id: &str, _range: DateRange) -> Result<TimeSeries, DataError> {
            self.fetch_calls.set(self.fetch_calls.get() + 1);
            if self.fail {
                return Err(DataError::Network("down".into()));
            }
            Ok(TimeSeries::new(
                series_id,
                vec![Observation::new(
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    Some(1.0),
                )],
            ))
        }
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(
            Some(NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap()),
            Some(NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap()),
        )
    }

    #[test]
    fn repeated_search_hits_the_memo() {
        let mut service = DataService::new(CountingProvider::new(false));

        let first = service.search("gdp").unwrap();
        let second = service.search("gdp").unwrap();

        assert_eq!(first, second);
        assert_eq!(service.provider.search_calls.get(), 1);
    }

    #[test]
    fn different_keys_do_not_share_entries() {
        let mut service = DataService::new(CountingProvider::new(false));

        service.fetch("UNRATE", range("2020-01-01", "2021-01-01")).unwrap();
        service.fetch("UNRATE", range("2020-01-01", "2022-01-01")).unwrap();
        service.fetch("GDPC1", range("2020-01-01", "2021-01-01")).unwrap();

        assert_eq!(service.provider.fetch_calls.get(), 3);
        assert_eq!(service.memoized_entries(), 3);
    }

    #[test]
    fn errors_are_not_memoized() {
        let mut service = DataService::new(CountingProvider::new(true));

        assert!(service.search("gdp").is_err());
        assert!(service.search("gdp").is_err());

        assert_eq!(service.provider.search_calls.get(), 2);
        assert_eq!(service.memoized_entries(), 0);
    }
}
