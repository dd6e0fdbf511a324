use scout_control::settings::resolve_param;
use scout_control::{ConfigParam, Endpoint, Setting};

use crate::transport::HttpSink;

pub async fn run(name: String, value: Option<String>, endpoint: Endpoint) -> anyhow::Result<()> {
    let requested = requested_param(&name, value)?;
    let param = resolve_param(&requested.name, &requested.value)?;
    let label = Setting::lookup(&param.name).map_or(param.name.as_str(), |s| s.label);
    if param.value != requested.value.trim() {
        println!("{label} clamped to {}", param.value);
    }

    let sink = HttpSink::new(endpoint)?;
    let status = sink.set_parameter_now(&param).await?;
    if !status.is_success() {
        anyhow::bail!("rover rejected {}: {status}", param.query());
    }
    println!("{label} set to {}", param.value);
    Ok(())
}

/// `set NAME VALUE` or `set NAME=VALUE`.
fn requested_param(name: &str, value: Option<String>) -> anyhow::Result<ConfigParam> {
    match value {
        Some(value) => Ok(ConfigParam::new(name, value)),
        None => Ok(ConfigParam::parse(name)?),
    }
}
