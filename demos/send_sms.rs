use std::io;

use bulksmsbd::BulkSmsClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let phone = std::env::var("BULKSMS_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BULKSMS_PHONE environment variable is required",
        )
    })?;
    let message = std::env::var("BULKSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the bulksmsbd demo.".to_owned());

    let client = BulkSmsClient::from_env()?;

    let estimate = client.estimate_cost(&message, 1);
    println!(
        "parts: {}, estimated cost: {:.2} {}",
        estimate.sms_parts, estimate.total_cost, estimate.currency
    );

    let response = client.send_sms(phone.as_str(), &message, None).await?;
    println!(
        "code: {:?}, message: {:?}",
        response.code(),
        response.message()
    );

    Ok(())
}
