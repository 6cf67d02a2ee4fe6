use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config;
use crate::database::{schema, DatabaseManager};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Insert a user that can own todos")]
    Add {
        #[arg(help = "Unique username")]
        username: String,
        #[arg(long, default_value = "user", help = "Role")]
        role: String,
    },
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Add { username, role } => {
            let pool = DatabaseManager::connect(&config::config().database)
                .await
                .context("failed to connect to DATABASE_URL")?;
            let user = schema::create_user(&pool, &username, &role)
                .await
                .with_context(|| format!("failed to create user '{}'", username))?;
            pool.close().await;

            output_success(
                &output_format,
                &format!("Created user {}", user.username),
                Some(json!({ "id": user.id, "username": user.username, "role": user.role })),
            )
        }
    }
}
