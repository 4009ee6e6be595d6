//! Demo: Market Snapshot
//!
//! Showcases: public endpoints, request hooks, envelope unwrapping
//!
//! Run: cargo run --bin market_snapshot -- ETHCLP

use colored::*;
use cryptomkt_rest::hooks::Hooks;
use cryptomkt_rest::{BookRequest, ClientConfig, CryptomktClient, OrderSide, TradesRequest};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let market = std::env::args().nth(1).unwrap_or_else(|| "ETHCLP".to_string());

    println!("{}", "═".repeat(60).cyan());
    println!("{}", format!("  MARKET SNAPSHOT: {}", market).cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let hooks = Hooks::new().on_response(|info| {
        println!(
            "  {} {} {} ({} bytes, {:?})",
            "·".dimmed(),
            info.status,
            info.path,
            info.bytes,
            info.elapsed
        );
    });

    let client = CryptomktClient::with_config(ClientConfig::from_env()?.with_hooks(hooks))?;

    println!("{}", "Ticker".yellow().bold());
    let ticker = client.ticker(Some(market.as_str())).await?;
    if let Some(tick) = ticker.as_array().and_then(|t| t.first()) {
        println!("  Last: {}", field(tick, "last_price"));
        println!("  Bid:  {}", field(tick, "bid").green());
        println!("  Ask:  {}", field(tick, "ask").red());
        println!("  Vol:  {}", field(tick, "volume"));
    }
    println!();

    for side in [OrderSide::Buy, OrderSide::Sell] {
        println!("{}", format!("Top of book ({})", side).yellow().bold());
        let book = client
            .book(&BookRequest::new(&market, side).with_limit(5))
            .await?;
        for level in book.as_array().into_iter().flatten() {
            println!("  {:>14} @ {}", field(level, "amount"), field(level, "price"));
        }
        println!();
    }

    println!("{}", "Today's trades".yellow().bold());
    let trades = client
        .trades(&TradesRequest::new(&market).with_limit(10))
        .await?;
    let count = trades.as_array().map_or(0, Vec::len);
    println!("  {} trades on the first page", count);

    Ok(())
}

fn field(value: &Value, key: &str) -> String {
    match &value[key] {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
