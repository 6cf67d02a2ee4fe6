use anyhow::Context;
use serde_json::{json, Value};

use crate::cli::{utils::output_success, OutputFormat};

pub async fn handle(base_url: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let url = format!("{}/health", base_url.trim_end_matches('/'));
    let res = reqwest::get(&url)
        .await
        .with_context(|| format!("failed to reach {}", url))?;

    let status = res.status();
    let body: Value = res.json().await.context("health response was not JSON")?;

    if !status.is_success() {
        anyhow::bail!("{} answered {}: {}", url, status, body);
    }

    output_success(
        &output_format,
        &format!("{} is healthy", base_url),
        Some(json!({ "status": body["status"], "database": body["database"] })),
    )
}
