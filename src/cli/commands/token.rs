use anyhow::Context;
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::{utils::output_success, OutputFormat};
use crate::config;

pub fn handle(user_id: i64, username: &str, role: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;
    let claims = Claims::new(user_id, username, role, security);
    let token = generate_jwt(&claims, &security.jwt_secret).context("failed to sign token")?;

    output_success(
        &output_format,
        &format!("Token for {} (id {})", username, user_id),
        Some(json!({ "token": token, "expires_at": claims.exp })),
    )
}
