//! Bearer token acquisition.
//!
//! Tokens live in memory for the lifetime of one client and are never
//! refreshed or written to disk.

use async_trait::async_trait;
use yup_oauth2::{ApplicationSecret, InstalledFlowAuthenticator, InstalledFlowReturnMethod};

use crate::config::Config;
use crate::error::{PageError, PageResult};

#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self, scopes: &[String]) -> PageResult<String>;
}

/// A token obtained out of band (environment, CLI flag, tests).
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self, _scopes: &[String]) -> PageResult<String> {
        Ok(self.0.clone())
    }
}

/// Installed-app authorization code flow against the configured authority.
///
/// Opens a loopback listener and prints the sign-in URL; the user finishes
/// the login in a browser.
pub struct InteractiveTokenSource {
    secret: ApplicationSecret,
}

impl InteractiveTokenSource {
    pub fn from_config(config: &Config) -> Self {
        let authority = config.authority.trim_end_matches('/');
        let secret = ApplicationSecret {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            auth_uri: format!("{}/oauth2/v2.0/authorize", authority),
            token_uri: format!("{}/oauth2/v2.0/token", authority),
            ..Default::default()
        };

        Self { secret }
    }
}

#[async_trait]
impl TokenSource for InteractiveTokenSource {
    async fn access_token(&self, scopes: &[String]) -> PageResult<String> {
        let auth = InstalledFlowAuthenticator::builder(
            self.secret.clone(),
            InstalledFlowReturnMethod::HTTPRedirect,
        )
        .build()
        .await
        .map_err(|e| {
            PageError::AuthenticationFailed(format!("Failed to build authenticator: {}", e))
        })?;

        let token = auth
            .token(scopes)
            .await
            .map_err(|e| PageError::AuthenticationFailed(e.to_string()))?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| PageError::AuthenticationFailed("No access token in response".into()))
    }
}
