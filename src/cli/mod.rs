pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "todoctl")]
#[command(about = "Operator tooling for the Todo API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create the users and todos tables if missing")]
    Migrate,

    #[command(about = "Manage todo owners")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Mint a bearer token for a user")]
    Token {
        #[arg(help = "User id (owner_id of the user's todos)")]
        user_id: i64,
        #[arg(help = "Username, stored as the token subject")]
        username: String,
        #[arg(long, default_value = "user", help = "Role claim")]
        role: String,
    },

    #[command(about = "Check a running server's /health endpoint")]
    Health {
        #[arg(long, default_value = "http://127.0.0.1:8000", help = "Server base URL")]
        url: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Migrate => commands::migrate::handle(output_format).await,
        Commands::User { cmd } => commands::user::handle(cmd, output_format).await,
        Commands::Token { user_id, username, role } => {
            commands::token::handle(user_id, &username, &role, output_format)
        }
        Commands::Health { url } => commands::health::handle(&url, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_token_command() {
        let cli = Cli::try_parse_from(["todoctl", "--json", "token", "1", "alice", "--role", "admin"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        match cli.command {
            Commands::Token { user_id, username, role } => {
                assert_eq!(user_id, 1);
                assert_eq!(username, "alice");
                assert_eq!(role, "admin");
            }
            _ => panic!("expected token command"),
        }
    }

    #[test]
    fn health_url_has_default() {
        let cli = Cli::try_parse_from(["todoctl", "health"]).unwrap();
        match cli.command {
            Commands::Health { url } => assert_eq!(url, "http://127.0.0.1:8000"),
            _ => panic!("expected health command"),
        }
    }
}
