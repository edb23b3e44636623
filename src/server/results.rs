//! In-memory walker backend.
//!
//! Holds scrape results keyed by target URL and the crawl's job table, and
//! answers `GetResults`/`GetStatus` from them. Suitable for development,
//! tests and dashboards fed by a crawler in the same process.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{RpcError, RpcResult};
use crate::types::{
    FilterOptions, Filters, GetResultsResponse, ScrapeResult, ServiceStatus, StatusStats,
};

use super::service::WalkerService;

/// In-memory results store implementing [`WalkerService`].
///
/// Thread-safe via `tokio::sync::RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryResults {
    target_url: String,
    results: RwLock<HashMap<String, ScrapeResult>>,
    /// Job URL -> currently being scraped.
    jobs: RwLock<HashMap<String, bool>>,
}

impl InMemoryResults {
    /// Create an empty store for a crawl rooted at `target_url`.
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            ..Self::default()
        }
    }

    /// Crawl root reported by `GetStatus`.
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// Store a result, replacing any earlier result for the same URL.
    pub async fn insert_result(&self, result: ScrapeResult) {
        let url = result.target_url.clone();
        self.results.write().await.insert(url.clone(), result);
        debug!(target_url = %url, "result stored");
    }

    /// Record a job as open (`active == false`) or in flight (`active == true`).
    pub async fn set_job(&self, url: impl Into<String>, active: bool) {
        self.jobs.write().await.insert(url.into(), active);
    }

    /// Forget a job.
    pub async fn remove_job(&self, url: &str) {
        self.jobs.write().await.remove(url);
    }

    /// Number of stored results.
    pub async fn len(&self) -> usize {
        self.results.read().await.len()
    }

    /// True when no results are stored.
    pub async fn is_empty(&self) -> bool {
        self.results.read().await.is_empty()
    }

    /// Drop all results and jobs.
    pub async fn clear(&self) {
        self.results.write().await.clear();
        self.jobs.write().await.clear();
    }
}

#[async_trait]
impl WalkerService for InMemoryResults {
    async fn get_results(
        &self,
        filters: Filters,
        page: i64,
        page_size: i64,
    ) -> RpcResult<GetResultsResponse> {
        if page_size <= 0 {
            return Err(RpcError::InvalidParams(format!(
                "pageSize must be positive, got {page_size}"
            )));
        }
        if page < 0 {
            return Err(RpcError::InvalidParams(format!(
                "page must not be negative, got {page}"
            )));
        }

        let results = self.results.read().await;
        let filter_options = filter_options(results.values());

        let mut matching: Vec<&ScrapeResult> = results
            .values()
            .filter(|result| matches(&filters, result))
            .collect();
        matching.sort_by(|a, b| a.target_url.cmp(&b.target_url));

        let total = matching.len() as i64;
        let num_pages = total / page_size + i64::from(total % page_size != 0);
        let start = page.saturating_mul(page_size);
        let page_results = if start >= total {
            Vec::new()
        } else {
            let end = start.saturating_add(page_size).min(total);
            matching[start as usize..end as usize]
                .iter()
                .map(|result| (*result).clone())
                .collect()
        };

        debug!(
            total,
            page,
            page_size,
            returned = page_results.len(),
            "results page served"
        );

        Ok(GetResultsResponse {
            filter_options,
            results: page_results,
            num_pages,
        })
    }

    async fn get_status(&self) -> RpcResult<ServiceStatus> {
        let done = self.results.read().await.len() as i64;
        let jobs = self.jobs.read().await;
        let pending = jobs.values().filter(|active| **active).count() as i64;
        let open = jobs.len() as i64 - pending;
        Ok(ServiceStatus {
            target_url: self.target_url.clone(),
            open,
            done,
            pending,
        })
    }
}

/// Whether `result` passes every active filter.
///
/// Duration bounds are exclusive and only active when positive.
pub fn matches(filters: &Filters, result: &ScrapeResult) -> bool {
    if !filters.prefix.is_empty() && !result.target_url.starts_with(&filters.prefix) {
        return false;
    }
    if !filters.status.is_empty() && !filters.status.contains(&result.code) {
        return false;
    }
    if filters.max_dur > 0 && result.duration >= filters.max_dur {
        return false;
    }
    if filters.min_dur > 0 && result.duration <= filters.min_dur {
        return false;
    }
    true
}

/// Status histogram (ascending by code) and duration bounds over `results`.
///
/// Bounds are zero when there are no results.
pub fn filter_options<'a>(results: impl IntoIterator<Item = &'a ScrapeResult>) -> FilterOptions {
    let mut histogram: BTreeMap<i64, i64> = BTreeMap::new();
    let mut bounds: Option<(i64, i64)> = None;
    for result in results {
        *histogram.entry(result.code).or_insert(0) += 1;
        bounds = Some(match bounds {
            None => (result.duration, result.duration),
            Some((min, max)) => (min.min(result.duration), max.max(result.duration)),
        });
    }
    let (min_dur, max_dur) = bounds.unwrap_or((0, 0));
    FilterOptions {
        status: histogram
            .into_iter()
            .map(|(code, count)| StatusStats { code, count })
            .collect(),
        min_dur,
        max_dur,
    }
}
