//! Token endpoint calls for the authorization code grant

use chrono::Utc;

use super::credentials::ClientSecret;
use super::token::{Token, TokenResponse};

/// OAuth client for one registered Google application
pub struct OAuthClient {
    secret: ClientSecret,
    http_client: reqwest::Client,
}

impl OAuthClient {
    /// Create a client that sends token requests through `http_client`
    pub fn with_http_client(secret: ClientSecret, http_client: reqwest::Client) -> Self {
        Self {
            secret,
            http_client,
        }
    }

    /// Consent page URL the user opens in a browser
    pub fn authorization_url(&self, redirect_uri: &str, scope: &str, state: &str) -> String {
        let params = [
            ("client_id", self.secret.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("scope", scope),
            ("state", state),
            // Offline access is what makes Google hand out a refresh token
            ("access_type", "offline"),
            ("prompt", "consent"),
        ];

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.secret.auth_uri, query)
    }

    /// Exchange an authorization code for tokens
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> anyhow::Result<Token> {
        log::info!("Exchanging authorization code at {}", self.secret.token_uri);

        let response = self
            .http_client
            .post(&self.secret.token_uri)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.secret.client_id.as_str()),
                ("client_secret", self.secret.client_secret.as_str()),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await?;

        log::debug!("Token request status: {}", response.status());

        if response.status().is_success() {
            let token_data: TokenResponse = response.json().await?;
            token_data.into_token(Utc::now(), None)
        } else {
            let error_text = response.text().await?;
            anyhow::bail!("Authentication failed: {}", error_text)
        }
    }

    /// Obtain a fresh access token for an expired one
    pub async fn refresh(&self, token: &Token) -> anyhow::Result<Token> {
        let refresh_token = token
            .refresh_token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Token has no refresh token"))?;

        log::info!("Refreshing access token");

        let response = self
            .http_client
            .post(&self.secret.token_uri)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", self.secret.client_id.as_str()),
                ("client_secret", self.secret.client_secret.as_str()),
            ])
            .send()
            .await?;

        log::debug!("Refresh request status: {}", response.status());

        if response.status().is_success() {
            let token_data: TokenResponse = response.json().await?;
            token_data.into_token(Utc::now(), Some(refresh_token.to_string()))
        } else {
            let error_text = response.text().await?;
            anyhow::bail!("Token refresh failed: {}", error_text)
        }
    }
}
