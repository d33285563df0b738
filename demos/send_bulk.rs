use std::io;

use bulksmsbd::BulkSmsClient;
use tracing_subscriber::EnvFilter;

/// Reads `number:message` pairs separated by `;` from `BULKSMS_BATCH`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let batch = std::env::var("BULKSMS_BATCH").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BULKSMS_BATCH environment variable is required (e.g. \"017...:Hi John;018...:Hi Jane\")",
        )
    })?;

    let pairs = batch
        .split(';')
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            entry.split_once(':').ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("expected number:message, got {entry:?}"),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let client = BulkSmsClient::from_env()?;
    let response = client.send_bulk_sms(pairs, None).await?;
    println!("{}", response.payload());

    Ok(())
}
