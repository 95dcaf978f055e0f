//! OAuth tokens and token endpoint responses

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Tokens are treated as expired this long before their actual expiry
const EXPIRY_LEEWAY_SECS: i64 = 60;

/// Lifetime assumed when the token endpoint doesn't report one
const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

/// Cached credentials for the Sheets API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl Token {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_LEEWAY_SECS) <= now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Body returned by the token endpoint for code exchange and refresh
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Convert into a token issued at `now`.
    ///
    /// Refresh responses usually omit the refresh token; the previous one
    /// stays valid and is carried over.
    pub fn into_token(
        self,
        now: DateTime<Utc>,
        previous_refresh_token: Option<String>,
    ) -> anyhow::Result<Token> {
        let access_token = match self.access_token {
            Some(token) if !token.is_empty() => token,
            _ => anyhow::bail!("No access token in response"),
        };

        let expires_in = self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        let expires_at = i64::try_from(expires_in)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| anyhow::anyhow!("Token lifetime out of range: {}s", expires_in))?;

        Ok(Token {
            access_token,
            expires_at,
            refresh_token: self.refresh_token.or(previous_refresh_token),
            scope: self.scope,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap()
    }

    fn response(json: &str) -> TokenResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_expiry_uses_leeway() {
        let token = Token {
            access_token: "a".to_string(),
            expires_at: now() + Duration::seconds(30),
            refresh_token: None,
            scope: None,
        };
        assert!(token.is_expired_at(now()));
        assert!(!token.is_expired_at(now() - Duration::seconds(120)));
    }

    #[test]
    fn test_into_token() {
        let token = response(
            r#"{"access_token": "ya29.x", "expires_in": 3599, "refresh_token": "1//r", "scope": "s", "token_type": "Bearer"}"#,
        )
        .into_token(now(), None)
        .unwrap();

        assert_eq!(token.access_token, "ya29.x");
        assert_eq!(token.expires_at, now() + Duration::seconds(3599));
        assert_eq!(token.refresh_token.as_deref(), Some("1//r"));
        assert!(token.can_refresh());
    }

    #[test]
    fn test_refresh_keeps_previous_refresh_token() {
        let token = response(r#"{"access_token": "new", "token_type": "Bearer"}"#)
            .into_token(now(), Some("old-refresh".to_string()))
            .unwrap();

        assert_eq!(token.refresh_token.as_deref(), Some("old-refresh"));
        assert_eq!(token.expires_at, now() + Duration::seconds(3600));
    }

    #[test]
    fn test_absurd_lifetime_is_an_error() {
        let json = format!(r#"{{"access_token": "a", "expires_in": {}}}"#, u64::MAX);
        let err = response(&json).into_token(now(), None).unwrap_err();
        assert!(err.to_string().contains("out of range"));

        let json = format!(r#"{{"access_token": "a", "expires_in": {}}}"#, i64::MAX);
        assert!(response(&json).into_token(now(), None).is_err());
    }

    #[test]
    fn test_missing_access_token() {
        let result = response(r#"{"error": "invalid_grant"}"#).into_token(now(), None);
        assert!(result.is_err());
    }
}
