//! Authorization commands

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};
use colored::*;

use module_catalogue::auth::{Authenticator, FileTokenStore};
use module_catalogue::config::Config;

use crate::cli::ui;

#[derive(Args)]
pub struct AuthCommands {
    #[command(subcommand)]
    pub command: AuthSubcommands,
}

#[derive(Subcommand)]
pub enum AuthSubcommands {
    /// Obtain or refresh the cached access token
    Login,
    /// Show the cached token without contacting Google
    Status,
}

pub async fn auth_command(args: AuthCommands, config: &Config) -> Result<()> {
    let authenticator = Authenticator::new(
        config.credentials_path.clone(),
        Box::new(FileTokenStore::new(config.token_cache_path.clone())),
    );

    match args.command {
        AuthSubcommands::Login => {
            let token = authenticator.token().await?;
            ui::success(&format!(
                "Authorized, token valid until {}",
                token.expires_at.to_rfc3339().bright_green()
            ));
        }
        AuthSubcommands::Status => {
            ui::header("Authorization status");
            ui::field("Client secret", config.credentials_path.display().to_string().cyan());
            ui::field("Token cache", config.token_cache_path.display().to_string().cyan());

            match authenticator.cached_token()? {
                None => ui::warning("No cached token, run 'module-catalogue auth login'"),
                Some(token) => {
                    let state = if token.is_expired_at(Utc::now()) {
                        "expired".bright_red()
                    } else {
                        "valid".bright_green()
                    };
                    ui::field("Token", state);
                    ui::field("Expires", token.expires_at.to_rfc3339());
                    ui::field(
                        "Refreshable",
                        if token.can_refresh() { "yes" } else { "no" },
                    );
                }
            }
        }
    }

    Ok(())
}
