//! Google OAuth for the Sheets API
//!
//! [`Authenticator::token`] resolves a usable bearer token in this order:
//! 1. cached token from the [`TokenStore`], if not expired
//! 2. refresh of the cached token, if it carries a refresh token
//! 3. interactive consent in the browser with a loopback redirect
//!
//! Any newly obtained token is written back to the store. The client secret
//! file is checked first so a missing file fails before anything else runs.

pub mod credentials;
pub mod loopback;
pub mod oauth;
pub mod store;
pub mod token;

use anyhow::Result;
use colored::*;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::constants::SPREADSHEETS_SCOPE;
pub use credentials::ClientSecret;
use loopback::CallbackServer;
pub use oauth::OAuthClient;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use token::Token;

/// How long the browser consent may take before login gives up
const CONSENT_TIMEOUT: Duration = Duration::from_secs(300);

pub struct Authenticator {
    credentials_path: PathBuf,
    store: Box<dyn TokenStore>,
    scope: String,
    http_client: reqwest::Client,
}

impl Authenticator {
    pub fn new(credentials_path: impl Into<PathBuf>, store: Box<dyn TokenStore>) -> Self {
        Self {
            credentials_path: credentials_path.into(),
            store,
            scope: SPREADSHEETS_SCOPE.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Use a custom HTTP client for token endpoint calls
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// Token currently held by the store, without refreshing it
    pub fn cached_token(&self) -> Result<Option<Token>> {
        self.store.load()
    }

    /// A valid access token, refreshing or authorizing as needed
    pub async fn token(&self) -> Result<Token> {
        let secret = ClientSecret::from_file(&self.credentials_path)?;

        let cached = self.store.load()?;
        if let Some(token) = &cached {
            if !token.is_expired() {
                log::debug!("Using cached token");
                return Ok(token.clone());
            }
            log::debug!("Cached token expired");
        }

        let client = OAuthClient::with_http_client(secret, self.http_client.clone());
        let token = match cached {
            Some(token) if token.can_refresh() => client.refresh(&token).await?,
            _ => authorize_interactively(&client, &self.scope).await?,
        };

        self.store.save(&token)?;
        log::info!("Obtained access token valid until {}", token.expires_at);
        Ok(token)
    }
}

async fn authorize_interactively(client: &OAuthClient, scope: &str) -> Result<Token> {
    let server = CallbackServer::bind().await?;
    let redirect_uri = server.redirect_uri();
    let state = uuid::Uuid::new_v4().simple().to_string();
    let url = client.authorization_url(&redirect_uri, scope, &state);

    log::info!("Starting interactive authorization, redirect to {}", redirect_uri);
    println!();
    println!(
        "  {}",
        "Open this URL in your browser to grant spreadsheet access:"
            .bright_white()
            .bold()
    );
    println!("  {}", url.cyan());
    println!();

    let code = server.wait_for_code(&state, CONSENT_TIMEOUT).await?;
    client.exchange_code(&code, &redirect_uri).await
}
