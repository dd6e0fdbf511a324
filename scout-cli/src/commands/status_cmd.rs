use std::time::Duration;

use scout_control::Endpoint;
use serde::Deserialize;

use crate::transport::HttpSink;

/// Camera status reported by `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceStatus {
    pub framesize: u32,
    pub quality: u32,
}

pub async fn run(endpoint: Endpoint) -> anyhow::Result<()> {
    let sink = HttpSink::new(endpoint)?;
    let response = sink
        .client()
        .get(sink.endpoint().status_url())
        .timeout(Duration::from_secs(5))
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("status request failed: {}", response.status());
    }

    let status = parse_status(&response.text().await?)?;
    println!("framesize\t{}", status.framesize);
    println!("quality\t{}", status.quality);
    Ok(())
}

/// The firmware leaves a comma before the closing brace, which strict JSON
/// rejects.
fn parse_status(body: &str) -> anyhow::Result<DeviceStatus> {
    let body = body.trim();
    let json = match body.strip_suffix('}') {
        Some(fields) => format!("{}}}", fields.trim_end().trim_end_matches(',')),
        None => body.to_string(),
    };
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        let status = parse_status(r#"{"framesize":5,"quality":10}"#).unwrap();
        assert_eq!(status, DeviceStatus { framesize: 5, quality: 10 });
    }

    #[test]
    fn test_parse_status_firmware_trailing_comma() {
        let status = parse_status(r#"{"framesize":5,"quality":10,}"#).unwrap();
        assert_eq!(status, DeviceStatus { framesize: 5, quality: 10 });

        let status = parse_status("{\"framesize\":4,\"quality\":12, }\r\n").unwrap();
        assert_eq!(status, DeviceStatus { framesize: 4, quality: 12 });
    }

    #[test]
    fn test_parse_status_ignores_extra_fields() {
        let status = parse_status(r#"{"framesize":6,"quality":12,"brightness":0}"#).unwrap();
        assert_eq!(status.framesize, 6);
    }

    #[test]
    fn test_parse_status_rejects_garbage() {
        assert!(parse_status("not json").is_err());
        assert!(parse_status(r#"{"framesize":5}"#).is_err());
    }
}
