//! Tests for InMemoryResults: query semantics and job bookkeeping.

mod common;

use common::sample_result;
use walker_rpc::error::RpcError;
use walker_rpc::server::{InMemoryResults, WalkerService};
use walker_rpc::types::Filters;

#[tokio::test]
async fn new_store_is_empty() {
    let store = InMemoryResults::new("http://site");
    assert!(store.is_empty().await);
    assert_eq!(store.target_url(), "http://site");

    let status = store.get_status().await.unwrap();
    assert_eq!((status.open, status.done, status.pending), (0, 0, 0));

    let page = store.get_results(Filters::new(), 0, 10).await.unwrap();
    assert!(page.results.is_empty());
    assert_eq!(page.num_pages, 0);
    assert_eq!(page.filter_options.min_dur, 0);
    assert_eq!(page.filter_options.max_dur, 0);
}

#[tokio::test]
async fn insert_replaces_result_for_same_url() {
    let store = InMemoryResults::new("http://site");
    store.insert_result(sample_result("http://site/a", 500, 1)).await;
    store.insert_result(sample_result("http://site/a", 200, 2)).await;
    assert_eq!(store.len().await, 1);

    let page = store.get_results(Filters::new(), 0, 10).await.unwrap();
    assert_eq!(page.results[0].code, 200);
}

#[tokio::test]
async fn num_pages_rounds_up() {
    let store = InMemoryResults::new("http://site");
    for i in 0..5 {
        store
            .insert_result(sample_result(&format!("http://site/{i}"), 200, 1))
            .await;
    }
    let page = store.get_results(Filters::new(), 0, 2).await.unwrap();
    assert_eq!(page.num_pages, 3);

    let last = store.get_results(Filters::new(), 2, 2).await.unwrap();
    assert_eq!(last.results.len(), 1);
    assert_eq!(last.results[0].target_url, "http://site/4");
}

#[tokio::test]
async fn huge_page_size_returns_everything_on_one_page() {
    let store = InMemoryResults::new("http://site");
    for i in 0..3 {
        store
            .insert_result(sample_result(&format!("http://site/{i}"), 200, 1))
            .await;
    }
    let page = store.get_results(Filters::new(), 0, i64::MAX).await.unwrap();
    assert_eq!(page.num_pages, 1);
    assert_eq!(page.results.len(), 3);

    let past_end = store.get_results(Filters::new(), 1, i64::MAX).await.unwrap();
    assert_eq!(past_end.num_pages, 1);
    assert!(past_end.results.is_empty());
}

#[tokio::test]
async fn negative_page_is_rejected() {
    let store = InMemoryResults::new("http://site");
    let err = store.get_results(Filters::new(), -1, 10).await.unwrap_err();
    assert!(matches!(err, RpcError::InvalidParams(_)));
}

#[tokio::test]
async fn jobs_count_as_open_or_pending() {
    let store = InMemoryResults::new("http://site");
    store.set_job("http://site/a", false).await;
    store.set_job("http://site/b", true).await;
    store.set_job("http://site/a", true).await;

    let status = store.get_status().await.unwrap();
    assert_eq!(status.open, 0);
    assert_eq!(status.pending, 2);

    store.remove_job("http://site/b").await;
    let status = store.get_status().await.unwrap();
    assert_eq!(status.pending, 1);
}

#[tokio::test]
async fn clear_drops_results_and_jobs() {
    let store = InMemoryResults::new("http://site");
    store.insert_result(sample_result("http://site/a", 200, 1)).await;
    store.set_job("http://site/b", true).await;
    store.clear().await;

    let status = store.get_status().await.unwrap();
    assert_eq!((status.open, status.done, status.pending), (0, 0, 0));
}
