//! Demo: Order Lifecycle
//!
//! Showcases: signed GET and POST requests, typed request structs, error mapping
//!
//! Places a small limit order far from the market, checks its status and
//! cancels it.
//!
//! Run: CRYPTOMKT_API_KEY=... CRYPTOMKT_API_SECRET=... cargo run --bin order_lifecycle
//!
//! NOTE: This places a real order on your account.

use colored::*;
use cryptomkt_rest::{ClientConfig, CreateOrderRequest, CryptomktClient, OrdersRequest, RestError};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

const MARKET: &str = "ETHCLP";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = CryptomktClient::with_config(ClientConfig::from_env()?)?;

    if !client.has_credentials() {
        eprintln!(
            "{} Set CRYPTOMKT_API_KEY and CRYPTOMKT_API_SECRET to run this demo",
            "✗".red()
        );
        return Ok(());
    }

    println!("{}", "--- Balances ---".cyan().bold());
    match client.balance().await {
        Ok(balance) => {
            for wallet in balance.as_array().into_iter().flatten() {
                println!("  {}: {}", wallet["wallet"], wallet["available"]);
            }
        }
        Err(e) if e.is_auth_error() => {
            eprintln!("{} Credentials rejected: {}", "✗".red(), e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }
    println!();

    println!("{}", "--- Placing order ---".cyan().bold());
    let request = CreateOrderRequest::buy(MARKET, dec!(0.001), dec!(1000));
    let order = client.create_order(&request).await?;
    let id = order["id"].as_str().unwrap_or_default().to_string();
    println!("  {} Created order {}", "✓".green(), id);

    let status = client.order_status(&id).await?;
    println!("  Status: {}", status["status"]);

    let active = client.active_orders(&OrdersRequest::new(MARKET)).await?;
    println!(
        "  Active orders on {}: {}",
        MARKET,
        active.as_array().map_or(0, Vec::len)
    );

    println!("{}", "--- Cancelling ---".cyan().bold());
    match client.cancel_order(&id).await {
        Ok(_) => println!("  {} Cancelled {}", "✓".green(), id),
        Err(RestError::Api { message, .. }) => {
            println!("  {} Cancel rejected: {}", "!".yellow(), message)
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
