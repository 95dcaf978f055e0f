use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::path::Path;

pub const CREDENTIALS_HELP_URL: &str =
    "https://developers.google.com/workspace/guides/create-credentials";

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// OAuth client registered in the Google Cloud console
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Downloaded client secret files wrap the client in `installed` or `web`
#[derive(Debug, Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

impl ClientSecret {
    pub fn from_file(path: &Path) -> Result<ClientSecret> {
        info!("Loading OAuth client secret from {}", path.display());

        if !path.exists() {
            anyhow::bail!(
                "Couldn't find credentials at {}. See {} for creating a credential file.",
                path.display(),
                CREDENTIALS_HELP_URL
            );
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid credentials file: {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<ClientSecret> {
        let file: ClientSecretFile =
            serde_json::from_str(content).context("Failed to parse client secret JSON")?;

        file.installed.or(file.web).ok_or_else(|| {
            anyhow::anyhow!("Client secret has neither an 'installed' nor a 'web' section")
        })
    }
}
