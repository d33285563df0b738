use bulksmsbd::BulkSmsClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = BulkSmsClient::from_env()?;

    if !client.test_connection().await {
        eprintln!("connection test failed; check BULKSMS_API_KEY and the IP whitelist");
        std::process::exit(1);
    }

    let response = client.get_balance().await?;
    match response.balance() {
        Some(balance) => println!("balance: {balance} BDT"),
        None => println!("response: {}", response.raw()),
    }

    Ok(())
}
