//! List customers example.
//!
//! Prints every customer of the account, fetching pages lazily, followed by
//! the web hook events the account can subscribe to.
//!
//! Run with: IUGU_TOKEN=... cargo run --example list_customers

use futures_util::StreamExt;
use iugu_rs::IuguClient;

#[tokio::main]
async fn main() -> iugu_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = IuguClient::from_env()?;

    let mut customers = client.customers().list().into_stream();
    let mut count = 0;
    while let Some(customer) = customers.next().await {
        let customer = customer?;
        count += 1;
        println!(
            "  - {} <{}> ({})",
            customer.name,
            customer.email,
            customer.id.as_deref().unwrap_or("no id")
        );
    }
    println!("\nFound {} customer(s)", count);

    let events = client.hooks().supported_events().await?;
    println!("\nSupported hook events:");
    for event in events {
        println!("  - {}", event);
    }

    Ok(())
}
