//! Value objects exchanged with the walker service.
//!
//! Field names on the wire are the backend's PascalCase names (`TargetURL`,
//! `MinDur`, `@context`, ...). Durations travel as integer nanoseconds.
//! Collections may arrive as `null` when the backend has nothing to report;
//! they decode to empty collections.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Duration helpers
// ============================================================================

/// Convert wire nanoseconds into a [`Duration`]. Negative values clamp to zero.
pub fn nanos_to_duration(nanos: i64) -> Duration {
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(0))
}

/// Convert a [`Duration`] into wire nanoseconds, saturating at `i64::MAX`.
pub fn duration_to_nanos(duration: Duration) -> i64 {
    i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX)
}

/// Accept `null` where a collection is expected.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Query types
// ============================================================================

/// Filter request for `GetResults`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Filters {
    /// Only results whose target URL starts with this prefix. Empty = no filter.
    #[serde(default)]
    pub prefix: String,

    /// Only results with one of these HTTP status codes. Empty = no filter.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Vec<i64>,

    /// Only results slower than this many nanoseconds. Zero = no filter.
    #[serde(default)]
    pub min_dur: i64,

    /// Only results faster than this many nanoseconds. Zero = no filter.
    #[serde(default)]
    pub max_dur: i64,
}

impl Filters {
    /// Empty filter set that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to target URLs with the given prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Restrict to the given status codes.
    pub fn with_status(mut self, codes: impl IntoIterator<Item = i64>) -> Self {
        self.status = codes.into_iter().collect();
        self
    }

    /// Lower duration bound (exclusive).
    pub fn with_min_duration(mut self, min: Duration) -> Self {
        self.min_dur = duration_to_nanos(min);
        self
    }

    /// Upper duration bound (exclusive).
    pub fn with_max_duration(mut self, max: Duration) -> Self {
        self.max_dur = duration_to_nanos(max);
        self
    }
}

/// One bucket of the status code histogram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusStats {
    /// HTTP status code (0 when the request never completed).
    pub code: i64,
    /// Number of results with this code.
    pub count: i64,
}

/// Options the dashboard can offer for filtering, computed over all results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FilterOptions {
    /// Status code histogram.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Vec<StatusStats>,
    /// Fastest observed duration in nanoseconds.
    pub min_dur: i64,
    /// Slowest observed duration in nanoseconds.
    pub max_dur: i64,
}

impl FilterOptions {
    /// Duration bounds as `(min, max)`.
    pub fn duration_bounds(&self) -> (Duration, Duration) {
        (nanos_to_duration(self.min_dur), nanos_to_duration(self.max_dur))
    }
}

// ============================================================================
// Page structure
// ============================================================================

/// A heading (`h1`..`h6`) found on a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Heading {
    /// Heading level, 1 to 6.
    pub level: i64,
    /// Heading text.
    pub text: String,
}

/// A JSON-LD structured data entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedData {
    /// `@context` value.
    #[serde(rename = "@context")]
    pub context: String,
    /// `@type` value.
    #[serde(rename = "@type")]
    pub kind: String,
}

/// Parsed page structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Structure {
    /// `<title>` text.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Headings in document order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub headings: Vec<Heading>,
    /// Meta robots directive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,
    /// JSON-LD entries.
    #[serde(default, deserialize_with = "null_as_default")]
    pub linked_data: Vec<LinkedData>,
    /// `<link rel="canonical">` target.
    pub canonical: String,
    /// `<link rel="prev">` target.
    pub link_prev: String,
    /// `<link rel="next">` target.
    pub link_next: String,
}

// ============================================================================
// Results
// ============================================================================

/// Outbound link targets and how often each occurs on a page.
pub type LinkList = HashMap<String, i64>;

/// Outcome of scraping one URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScrapeResult {
    /// The scraped URL.
    #[serde(rename = "TargetURL")]
    pub target_url: String,
    /// Error text; empty on success.
    pub error: String,
    /// HTTP status code.
    pub code: i64,
    /// HTTP status line, e.g. `"200 OK"`.
    pub status: String,
    /// Response content type.
    pub content_type: String,
    /// Response body length in bytes.
    pub length: i64,
    /// Outbound link counts.
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: LinkList,
    /// Request duration in nanoseconds.
    pub duration: i64,
    /// Parsed page structure.
    #[serde(default)]
    pub structure: Structure,
    /// When the page was scraped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    /// Result group assigned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl ScrapeResult {
    /// Request duration.
    pub fn duration(&self) -> Duration {
        nanos_to_duration(self.duration)
    }

    /// True when the scrape recorded an error or never got a status code.
    pub fn is_failure(&self) -> bool {
        !self.error.is_empty() || self.code == 0
    }

    /// Total number of outbound links, counting repeats.
    pub fn total_links(&self) -> i64 {
        self.links.values().sum()
    }
}

/// Progress of the crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceStatus {
    /// Crawl root.
    #[serde(rename = "TargetURL")]
    pub target_url: String,
    /// Queued jobs not yet started.
    pub open: i64,
    /// Finished results.
    pub done: i64,
    /// Jobs in flight.
    pub pending: i64,
}

/// Named result of `GetResults`.
///
/// Not a wire type: the backend sends the three fields positionally and the
/// client names them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetResultsResponse {
    /// Filter options over the unfiltered result set.
    pub filter_options: FilterOptions,
    /// The requested page of results.
    pub results: Vec<ScrapeResult>,
    /// Number of pages for the current filter.
    pub num_pages: i64,
}
