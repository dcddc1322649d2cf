//! Search-result normalization.
//!
//! The provider's ranking is consumed verbatim: we keep the first three
//! hits and coerce their two observation-date fields to canonical
//! `YYYY-MM-DD` strings. A date that cannot be parsed gets the sentinel
//! `1900-01-01` instead of failing the whole search.

use super::provider::SearchHit;
use chrono::NaiveDate;

/// Placeholder for an unparseable provider date.
pub const SENTINEL_DATE: &str = "1900-01-01";

/// How many ranked hits survive normalization.
pub const MAX_RESULTS: usize = 3;

/// Truncate to the top results and canonicalize their date fields.
pub fn normalize_search_results(hits: Vec<SearchHit>) -> Vec<SearchHit> {
    hits.into_iter()
        .take(MAX_RESULTS)
        .map(|mut hit| {
            hit.observation_start = normalize_date(&hit.observation_start);
            hit.observation_end = normalize_date(&hit.observation_end);
            hit
        })
        .collect()
}

/// Coerce a provider date string to `YYYY-MM-DD`, or the sentinel.
fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    log::warn!("unparseable search date '{raw}', substituting {SENTINEL_DATE}");
    SENTINEL_DATE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, start: &str, end: &str) -> SearchHit {
        SearchHit {
            id: id.into(),
            title: format!("{id} title"),
            observation_start: start.into(),
            observation_end: end.into(),
            frequency: "Monthly".into(),
            units: "Percent".into(),
        }
    }

    #[test]
    fn truncates_to_top_three_keeping_order() {
        let hits = vec![
            hit("A", "2000-01-01", "2020-01-01"),
            hit("B", "2000-01-01", "2020-01-01"),
            hit("C", "2000-01-01", "2020-01-01"),
            hit("D", "2000-01-01", "2020-01-01"),
        ];

        let normalized = normalize_search_results(hits);
        let ids: Vec<&str> = normalized.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["A", "B", "C"]);
    }

    #[test]
    fn unparseable_date_gets_the_sentinel_not_an_error() {
        let normalized = normalize_search_results(vec![hit("A", "not-a-date", "2020-01-01")]);
        assert_eq!(normalized[0].observation_start, SENTINEL_DATE);
        assert_eq!(normalized[0].observation_end, "2020-01-01");
    }

    #[test]
    fn alternate_formats_are_canonicalized() {
        let normalized = normalize_search_results(vec![hit("A", "01/15/2000", "20200315")]);
        assert_eq!(normalized[0].observation_start, "2000-01-15");
        assert_eq!(normalized[0].observation_end, "2020-03-15");
    }

    #[test]
    fn fewer_than_three_hits_pass_through() {
        let normalized = normalize_search_results(vec![hit("A", "2000-01-01", "2020-01-01")]);
        assert_eq!(normalized.len(), 1);
    }
}
