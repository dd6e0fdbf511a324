use std::path::PathBuf;
use std::time::Duration;

use scout_control::Endpoint;

use crate::transport::HttpSink;

pub async fn run(output: PathBuf, endpoint: Endpoint) -> anyhow::Result<()> {
    let sink = HttpSink::new(endpoint)?;
    let response = sink
        .client()
        .get(sink.endpoint().capture_url())
        .timeout(Duration::from_secs(10))
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("capture failed: {}", response.status());
    }

    let bytes = response.bytes().await?;
    tokio::fs::write(&output, &bytes).await?;
    println!("Saved {} bytes to {}", bytes.len(), output.display());
    Ok(())
}
