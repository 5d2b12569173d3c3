//! FRED release-calendar client over the proxy chain.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{CalendarDate, DateWindow, RawRelease, ReleaseId};
use crate::envelope::EnvelopeError;
use crate::proxy::{FetchResult, ProxyChain, ProxyId};
use crate::ValidationError;

const FRED_API_BASE: &str = "https://api.stlouisfed.org/fred";
const PAGE_LIMIT: u32 = 1000;

/// Successful calendar fetch: deduplicated, window-filtered raw releases
/// with names joined in.
#[derive(Debug, Clone)]
pub struct CalendarSuccess {
    pub releases: Vec<RawRelease>,
    pub proxy_chain: Vec<ProxyId>,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
}

/// Calendar fetch that exhausted the proxy chain on either series.
/// Surfaces downstream as an empty record sequence plus envelope errors.
#[derive(Debug, Clone)]
pub struct CalendarFailure {
    pub proxy_chain: Vec<ProxyId>,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
}

pub type CalendarFetch = Result<CalendarSuccess, CalendarFailure>;

/// Client for the two FRED series the calendar needs: release dates and
/// release names.
pub struct FredClient {
    chain: ProxyChain,
    api_key: String,
}

impl std::fmt::Debug for FredClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FredClient")
            .field("proxies", &self.chain.proxies())
            .finish_non_exhaustive()
    }
}

impl FredClient {
    pub fn new(chain: ProxyChain, api_key: impl Into<String>) -> Result<Self, ValidationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ValidationError::EmptyApiKey);
        }
        Ok(Self { chain, api_key })
    }

    pub fn proxies(&self) -> &[ProxyId] {
        self.chain.proxies()
    }

    fn release_dates_url(&self, window: &DateWindow) -> String {
        format!(
            "{FRED_API_BASE}/releases/dates?realtime_start={}&realtime_end={}\
             &include_release_dates_with_no_data=true&order_by=release_date&sort_order=desc\
             &file_type=json&api_key={}&limit={PAGE_LIMIT}",
            window.start, window.end, self.api_key
        )
    }

    fn releases_url(&self) -> String {
        format!(
            "{FRED_API_BASE}/releases?file_type=json&api_key={}&limit={PAGE_LIMIT}",
            self.api_key
        )
    }

    /// Fetches both series concurrently and joins them into raw release
    /// records. A mock transport serves the built-in sample calendar so
    /// tests and demos stay offline.
    pub async fn calendar(&self, window: &DateWindow) -> CalendarFetch {
        if self.chain.is_mock() {
            return Ok(CalendarSuccess {
                releases: sample_calendar(window),
                proxy_chain: self.chain.proxies().to_vec(),
                warnings: vec![String::from(
                    "mock transport active; serving built-in sample calendar",
                )],
                errors: Vec::new(),
                latency_ms: 0,
            });
        }

        let started = Instant::now();
        let release_dates_url = self.release_dates_url(window);
        let releases_url = self.releases_url();
        let (dates_result, names_result) = tokio::join!(
            self.chain.fetch_json(&release_dates_url),
            self.chain.fetch_json(&releases_url),
        );

        match (dates_result, names_result) {
            (Ok(dates), Ok(names)) => {
                let mut warnings = Vec::new();
                let mut errors = Vec::new();
                let proxy_chain = merge_chains(&dates.proxy_chain, &names.proxy_chain);
                warnings.extend(dates.warnings);
                warnings.extend(names.warnings);
                errors.extend(dates.errors);
                errors.extend(names.errors);

                let releases =
                    join_series(&dates.payload, &names.payload, window, &mut warnings);

                Ok(CalendarSuccess {
                    releases,
                    proxy_chain,
                    warnings,
                    errors,
                    latency_ms: elapsed_ms(started),
                })
            }
            (dates_result, names_result) => {
                let mut warnings = Vec::new();
                let mut errors = Vec::new();
                let mut chains: Vec<ProxyId> = Vec::new();

                for result in [dates_result, names_result] {
                    match result {
                        Ok(success) => {
                            chains = merge_chains(&chains, &success.proxy_chain);
                            warnings.extend(success.warnings);
                            errors.extend(success.errors);
                        }
                        Err(failure) => {
                            chains = merge_chains(&chains, &failure.proxy_chain);
                            warnings.extend(failure.warnings);
                            errors.extend(failure.errors);
                        }
                    }
                }

                Err(CalendarFailure {
                    proxy_chain: chains,
                    warnings,
                    errors,
                    latency_ms: elapsed_ms(started),
                })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReleaseDateEntry {
    release_id: i64,
    date: CalendarDate,
}

#[derive(Debug, Deserialize)]
struct ReleaseEntry {
    id: i64,
    name: String,
}

/// Joins the two payloads: names by id with a `Release {id}` fallback,
/// window filtering, and (release_id, date) deduplication. Entry order
/// follows the upstream response; the normalizer sorts later.
fn join_series(
    dates_payload: &Value,
    names_payload: &Value,
    window: &DateWindow,
    warnings: &mut Vec<String>,
) -> Vec<RawRelease> {
    let (date_entries, skipped_dates) =
        parse_entries::<ReleaseDateEntry>(dates_payload, "release_dates");
    let (name_entries, skipped_names) = parse_entries::<ReleaseEntry>(names_payload, "releases");

    if skipped_dates + skipped_names > 0 {
        warnings.push(format!(
            "skipped {} malformed upstream entr(ies)",
            skipped_dates + skipped_names
        ));
    }

    let names: HashMap<i64, String> = name_entries
        .into_iter()
        .map(|entry| (entry.id, entry.name))
        .collect();

    let mut seen = HashSet::new();
    let mut releases = Vec::with_capacity(date_entries.len());
    for entry in date_entries {
        if !window.contains(entry.date) {
            continue;
        }
        if !seen.insert((entry.release_id, entry.date)) {
            continue;
        }

        let name = names
            .get(&entry.release_id)
            .cloned()
            .unwrap_or_else(|| format!("Release {}", entry.release_id));
        let release = RawRelease::new(ReleaseId(entry.release_id), name, entry.date)
            .expect("joined names are never empty");
        releases.push(release);
    }

    releases
}

/// Decodes the entries under `key`, skipping elements that do not match
/// the expected shape. A missing or non-array value decodes as empty, the
/// way the source treats partial payloads.
fn parse_entries<T: DeserializeOwned>(payload: &Value, key: &str) -> (Vec<T>, usize) {
    let Some(entries) = payload.get(key).and_then(Value::as_array) else {
        return (Vec::new(), 0);
    };

    let mut parsed = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for entry in entries {
        match serde_json::from_value::<T>(entry.clone()) {
            Ok(value) => parsed.push(value),
            Err(_) => skipped += 1,
        }
    }
    (parsed, skipped)
}

fn merge_chains(first: &[ProxyId], second: &[ProxyId]) -> Vec<ProxyId> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(first.len() + second.len());
    for &proxy in first.iter().chain(second) {
        if seen.insert(proxy) {
            merged.push(proxy);
        }
    }
    merged
}

/// Deterministic sample calendar used with a mock transport; fills the
/// degrade-to-fallback role the source's bundled sample data served.
fn sample_calendar(window: &DateWindow) -> Vec<RawRelease> {
    let samples: [(i64, &str, i64); 6] = [
        (10, "Consumer Price Index", 1),
        (50, "Employment Situation", 2),
        (9, "Advance Monthly Sales for Retail and Food Services", 3),
        (53, "Gross Domestic Product", 5),
        (13, "G.17 Industrial Production and Capacity Utilization", 6),
        (86, "Beige Book", 7),
    ];

    samples
        .into_iter()
        .map(|(id, name, offset)| (id, name, window.start.offset_days(offset)))
        .filter(|(_, _, date)| window.contains(*date))
        .map(|(id, name, date)| {
            RawRelease::new(ReleaseId(id), name, date).expect("sample names are never empty")
        })
        .collect()
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn window() -> DateWindow {
        DateWindow::new(
            "2025-08-04".parse().expect("valid test date"),
            "2025-08-20".parse().expect("valid test date"),
        )
        .expect("valid test window")
    }

    #[test]
    fn joins_names_with_fallback_for_unknown_ids() {
        let dates = json!({"release_dates": [
            {"release_id": 10, "date": "2025-08-13"},
            {"release_id": 999, "date": "2025-08-14"},
        ]});
        let names = json!({"releases": [{"id": 10, "name": "Consumer Price Index"}]});

        let mut warnings = Vec::new();
        let releases = join_series(&dates, &names, &window(), &mut warnings);

        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].raw_name, "Consumer Price Index");
        assert_eq!(releases[1].raw_name, "Release 999");
        assert!(warnings.is_empty());
    }

    #[test]
    fn filters_dates_outside_the_window() {
        let dates = json!({"release_dates": [
            {"release_id": 10, "date": "2025-08-01"},
            {"release_id": 10, "date": "2025-08-13"},
            {"release_id": 10, "date": "2025-09-01"},
        ]});
        let names = json!({"releases": []});

        let mut warnings = Vec::new();
        let releases = join_series(&dates, &names, &window(), &mut warnings);

        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].date.to_string(), "2025-08-13");
    }

    #[test]
    fn dedupes_repeated_release_dates() {
        let dates = json!({"release_dates": [
            {"release_id": 10, "date": "2025-08-13"},
            {"release_id": 10, "date": "2025-08-13"},
            {"release_id": 10, "date": "2025-08-14"},
        ]});
        let names = json!({"releases": []});

        let mut warnings = Vec::new();
        let releases = join_series(&dates, &names, &window(), &mut warnings);
        assert_eq!(releases.len(), 2);
    }

    #[test]
    fn malformed_entries_are_skipped_with_a_warning() {
        let dates = json!({"release_dates": [
            {"release_id": 10, "date": "2025-08-13"},
            {"release_id": "not-a-number", "date": "2025-08-13"},
            {"release_id": 11, "date": "13/08/2025"},
        ]});
        let names = json!({"releases": []});

        let mut warnings = Vec::new();
        let releases = join_series(&dates, &names, &window(), &mut warnings);

        assert_eq!(releases.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("2 malformed"));
    }

    #[test]
    fn missing_arrays_decode_as_empty() {
        let mut warnings = Vec::new();
        let releases = join_series(&json!({}), &json!({}), &window(), &mut warnings);
        assert!(releases.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn sample_calendar_stays_inside_the_window() {
        let narrow = DateWindow::new(
            "2025-08-04".parse().expect("valid test date"),
            "2025-08-07".parse().expect("valid test date"),
        )
        .expect("valid test window");

        let releases = sample_calendar(&narrow);
        assert!(!releases.is_empty());
        assert!(releases.iter().all(|release| narrow.contains(release.date)));
    }

    #[test]
    fn release_dates_url_carries_window_and_key() {
        let chain = ProxyChain::new(std::sync::Arc::new(crate::http::NoopHttpClient));
        let client = FredClient::new(chain, "test-api-key").expect("valid client");
        let url = client.release_dates_url(&window());

        assert!(url.starts_with("https://api.stlouisfed.org/fred/releases/dates?"));
        assert!(url.contains("realtime_start=2025-08-04"));
        assert!(url.contains("realtime_end=2025-08-20"));
        assert!(url.contains("api_key=test-api-key"));
        assert!(url.contains("include_release_dates_with_no_data=true"));
    }

    #[test]
    fn rejects_blank_api_key() {
        let chain = ProxyChain::new(std::sync::Arc::new(crate::http::NoopHttpClient));
        let err = FredClient::new(chain, "  ").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyApiKey));
    }
}
