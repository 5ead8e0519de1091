//! Compare two product keywords against the live Naver Open API
//!
//! ```text
//! NAVER_CLIENT_ID=... NAVER_CLIENT_SECRET=... \
//!     cargo run --example compare_keywords -- 오메가3 비타민D
//! ```

use anyhow::{bail, Context, Result};
use shoplens::config::Config;
use shoplens::logging::setup_from_config;
use shoplens::models::{FacetOutcome, KeywordRecord};
use shoplens::pipeline::KeywordAnalyzer;
use shoplens::source::{Credentials, NaverClient};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    config.validate()?;
    setup_from_config(&config.logging)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [first, second] = args.as_slice() else {
        bail!("usage: compare_keywords <keyword> <keyword>");
    };

    let credentials = Credentials::new(
        std::env::var("NAVER_CLIENT_ID").context("NAVER_CLIENT_ID is not set")?,
        std::env::var("NAVER_CLIENT_SECRET").context("NAVER_CLIENT_SECRET is not set")?,
    );
    let client = NaverClient::with_config(credentials, &config.api)?;
    let analyzer = KeywordAnalyzer::with_config(client, config.analysis);

    let comparison = analyzer.compare(first, second).await;
    for record in comparison.records() {
        print_record(record);
    }

    Ok(())
}

fn print_record(record: &KeywordRecord) {
    println!("=== {} ===", record.keyword());

    for (facet, outcome) in [
        ("trend", &record.facet_status().trend),
        ("blogs", &record.facet_status().corpus),
        ("listings", &record.facet_status().listings),
    ] {
        match outcome {
            FacetOutcome::Loaded { rows } => println!("  {facet}: {rows} rows"),
            FacetOutcome::Failed { reason } => println!("  {facet}: no data available ({reason})"),
        }
    }

    let aggregates = record.listing_aggregates();
    if let Some(ratio) = aggregates.descriptive_stats.values().next() {
        println!(
            "  trend ratio: mean {:.2}, min {:.2}, max {:.2}",
            ratio.mean.unwrap_or_default(),
            ratio.min.unwrap_or_default(),
            ratio.max.unwrap_or_default()
        );
    }

    println!("  key terms:");
    for term in record.term_ranking() {
        println!("    {:<20} {:.4}", term.term, term.weight);
    }

    println!("  mean price by brand:");
    for (brand, price) in &aggregates.brand_mean_price {
        println!("    {brand:<20} {price:>12.0}");
    }

    println!("  listings by mall:");
    for (mall, count) in &aggregates.mall_counts {
        println!("    {mall:<20} {count:>5}");
    }
}
