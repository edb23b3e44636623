//! Print crawl progress and the first page of results from a walker service.
//!
//! Usage:
//!   cargo run --example walker_status -- http://localhost:8080 [prefix]
//!
//! Set `RUST_LOG=walker_rpc=debug` to see each call as it is dispatched.

use walker_rpc::builders::ClientBuilder;
use walker_rpc::client::ServiceClient;
use walker_rpc::types::Filters;
use walker_rpc::utils::classify;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let base_url = args
        .next()
        .unwrap_or_else(|| "http://localhost:8080".to_string());
    let prefix = args.next().unwrap_or_default();

    let client: ServiceClient = ClientBuilder::new(base_url).build();

    let status = client.get_status().await?;
    println!(
        "{}: {} done, {} open, {} pending",
        status.target_url, status.done, status.open, status.pending
    );

    let page = client
        .get_results(&Filters::new().with_prefix(prefix), 0, 20)
        .await?;

    println!("status codes:");
    for stats in &page.filter_options.status {
        println!("  {:>3}  {}", stats.code, stats.count);
    }

    println!("first page of {}:", page.num_pages);
    for result in &page.results {
        let grade = classify(result.duration()).map_or("off the scale", |b| b.name);
        println!(
            "  {:>3}  {:>8.1?}  {}  ({})",
            result.code,
            result.duration(),
            result.target_url,
            grade
        );
    }

    Ok(())
}
