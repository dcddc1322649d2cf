//! FRED (Federal Reserve Economic Data) provider.
//!
//! Talks to the FRED JSON API: `series/search` for keyword search and
//! `series/observations` for the data itself. Handles rate limiting,
//! retries with exponential backoff, and response parsing. FRED reports
//! missing periods as the literal value `"."`, which becomes `None`.
//!
//! The API key is an opaque credential: it rides along in request URLs
//! and is redacted from every log line and error message.

use super::provider::{DataError, SearchHit, SeriesProvider};
use crate::domain::{DateRange, Observation, TimeSeries};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org/fred";

/// Page size requested from `series/search`. The ranking is consumed
/// verbatim; truncation to the displayed top 3 happens in the
/// normalization layer above the provider.
const SEARCH_PAGE_LIMIT: usize = 25;

// ── Wire format ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    seriess: Vec<RawSeries>,
}

#[derive(Debug, Deserialize)]
struct RawSeries {
    id: String,
    title: String,
    #[serde(default)]
    observation_start: String,
    #[serde(default)]
    observation_end: String,
    #[serde(default)]
    frequency: String,
    #[serde(default)]
    units: String,
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_message: String,
}

// ── Provider ────────────────────────────────────────────────────────

/// FRED data provider over the blocking HTTP client.
pub struct FredProvider {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
    max_retries: u32,
    base_delay: Duration,
}

impl FredProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point at a non-default endpoint (mirrors, test servers).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            max_retries: 2,
            base_delay: Duration::from_millis(500),
        }
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{base}/series/search?search_text={query}&api_key={key}&file_type=json&limit={limit}",
            base = self.base_url,
            query = urlencode(query),
            key = self.api_key,
            limit = SEARCH_PAGE_LIMIT,
        )
    }

    fn observations_url(&self, series_id: &str, range: DateRange) -> String {
        let mut url = format!(
            "{base}/series/observations?series_id={id}&api_key={key}&file_type=json",
            base = self.base_url,
            id = urlencode(series_id),
            key = self.api_key,
        );
        if let Some(start) = range.start {
            url.push_str(&format!("&observation_start={start}"));
        }
        if let Some(end) = range.end {
            url.push_str(&format!("&observation_end={end}"));
        }
        url
    }

    /// Execute a GET with retry on transient failures. Returns the body text.
    fn get_with_retry(&self, url: &str, resource: &str) -> Result<String, DataError> {
        log::debug!("GET {}", redact_api_key(url));

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
            }

            match self.client.get(url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    let body = resp.text().map_err(|e| {
                        DataError::Network(redact_api_key(&e.to_string()))
                    })?;

                    if !status.is_success() {
                        return Err(classify_http_error(status, &body, resource));
                    }

                    return Ok(body);
                }
                Err(e) => {
                    let msg = redact_api_key(&e.to_string());
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::Network(msg));
                        continue;
                    }
                    return Err(DataError::Network(msg));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Network("max retries exceeded".into())))
    }
}

impl SeriesProvider for FredProvider {
    fn name(&self) -> &str {
        "fred"
    }

    fn search(&self, query: &str) -> Result<Vec<SearchHit>, DataError> {
        let body = self.get_with_retry(&self.search_url(query), query)?;
        parse_search_response(&body)
    }

    fn fetch(&self, series_id: &str, range: DateRange) -> Result<TimeSeries, DataError> {
        let body = self.get_with_retry(&self.observations_url(series_id, range), series_id)?;
        let observations = parse_observations_response(series_id, &body)?;

        if observations.is_empty() {
            return Err(DataError::NoData {
                series_id: series_id.to_string(),
            });
        }

        Ok(TimeSeries::new(series_id, observations))
    }
}

// ── Parsing (kept free for unit testing) ────────────────────────────

fn parse_search_response(body: &str) -> Result<Vec<SearchHit>, DataError> {
    let resp: SearchResponse = serde_json::from_str(body)
        .map_err(|e| DataError::BadResponse(format!("search response: {e}")))?;

    Ok(resp
        .seriess
        .into_iter()
        .map(|raw| SearchHit {
            id: raw.id,
            title: raw.title,
            observation_start: raw.observation_start,
            observation_end: raw.observation_end,
            frequency: raw.frequency,
            units: raw.units,
        })
        .collect())
}

fn parse_observations_response(
    series_id: &str,
    body: &str,
) -> Result<Vec<Observation>, DataError> {
    let resp: ObservationsResponse = serde_json::from_str(body)
        .map_err(|e| DataError::BadResponse(format!("observations response: {e}")))?;

    let mut observations = Vec::with_capacity(resp.observations.len());

    for raw in resp.observations {
        let date = chrono::NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d").map_err(|_| {
            DataError::BadResponse(format!(
                "invalid observation date '{}' for {series_id}",
                raw.date
            ))
        })?;

        // "." is FRED's missing marker. Anything else unparseable is
        // treated the same way rather than failing the whole series.
        let value = match raw.value.as_str() {
            "." => None,
            text => match text.parse::<f64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    log::warn!("unparseable value '{text}' for {series_id} on {date}");
                    None
                }
            },
        };

        observations.push(Observation::new(date, value));
    }

    Ok(observations)
}

/// Map a non-success HTTP status plus FRED's error body onto the taxonomy.
fn classify_http_error(
    status: reqwest::StatusCode,
    body: &str,
    resource: &str,
) -> DataError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error_message)
        .unwrap_or_default();

    match status {
        reqwest::StatusCode::BAD_REQUEST => {
            let lower = message.to_lowercase();
            if lower.contains("series does not exist") {
                DataError::SeriesNotFound {
                    series_id: resource.to_string(),
                }
            } else if lower.contains("api_key") || lower.contains("api key") {
                DataError::Auth(message)
            } else {
                DataError::BadResponse(format!("HTTP 400: {message}"))
            }
        }
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
            DataError::Auth(if message.is_empty() {
                format!("HTTP {status}")
            } else {
                message
            })
        }
        _ => DataError::BadResponse(format!("HTTP {status} for {resource}")),
    }
}

/// Strip the api_key query value out of a string destined for logs.
fn redact_api_key(text: &str) -> String {
    match text.find("api_key=") {
        None => text.to_string(),
        Some(start) => {
            let value_start = start + "api_key=".len();
            let value_end = text[value_start..]
                .find('&')
                .map(|i| value_start + i)
                .unwrap_or(text.len());
            format!("{}***{}", &text[..value_start], &text[value_end..])
        }
    }
}

/// Percent-encode the characters that matter in a query value.
fn urlencode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_search_hits_in_provider_order() {
        let body = r#"{
            "seriess": [
                {"id": "UNRATE", "title": "Unemployment Rate",
                 "observation_start": "1948-01-01", "observation_end": "2025-05-01",
                 "frequency": "Monthly", "units": "Percent"},
                {"id": "UNRATENSA", "title": "Unemployment Rate (NSA)",
                 "observation_start": "1948-01-01", "observation_end": "2025-05-01",
                 "frequency": "Monthly", "units": "Percent"}
            ]
        }"#;

        let hits = parse_search_response(body).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "UNRATE");
        assert_eq!(hits[1].id, "UNRATENSA");
    }

    #[test]
    fn missing_marker_becomes_none() {
        let body = r#"{
            "observations": [
                {"date": "2024-01-01", "value": "3.7"},
                {"date": "2024-02-01", "value": "."},
                {"date": "2024-03-01", "value": "3.9"}
            ]
        }"#;

        let obs = parse_observations_response("UNRATE", body).unwrap();
        assert_eq!(obs.len(), 3);
        assert_eq!(obs[0].value, Some(3.7));
        assert_eq!(obs[1].value, None);
        assert_eq!(
            obs[1].date,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn malformed_observation_date_is_a_bad_response() {
        let body = r#"{"observations": [{"date": "02/01/2024", "value": "3.7"}]}"#;
        let err = parse_observations_response("UNRATE", body).unwrap_err();
        assert!(matches!(err, DataError::BadResponse(_)));
    }

    #[test]
    fn unknown_series_maps_to_not_found() {
        let body = r#"{"error_code": 400, "error_message": "Bad Request. The series does not exist."}"#;
        let err = classify_http_error(reqwest::StatusCode::BAD_REQUEST, body, "NOPE");
        assert!(matches!(err, DataError::SeriesNotFound { series_id } if series_id == "NOPE"));
    }

    #[test]
    fn bad_key_maps_to_auth() {
        let body = r#"{"error_code": 400, "error_message": "Bad Request. The value for variable api_key is not registered."}"#;
        let err = classify_http_error(reqwest::StatusCode::BAD_REQUEST, body, "UNRATE");
        assert!(matches!(err, DataError::Auth(_)));
    }

    #[test]
    fn api_key_never_reaches_logs() {
        let url = "https://api.stlouisfed.org/fred/series/search?search_text=gdp&api_key=s3cr3t&file_type=json";
        let redacted = redact_api_key(url);
        assert!(!redacted.contains("s3cr3t"));
        assert!(redacted.contains("api_key=***&file_type=json"));

        // Key at the end of the string, no trailing params.
        let tail = redact_api_key("…?api_key=s3cr3t");
        assert!(!tail.contains("s3cr3t"));
    }

    #[test]
    fn query_encoding() {
        assert_eq!(urlencode("unemployment rate"), "unemployment+rate");
        assert_eq!(urlencode("m2/gdp"), "m2%2Fgdp");
    }
}
