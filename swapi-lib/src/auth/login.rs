//! Login flow and automatic re-login.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use super::AccessToken;
use super::TokenProvider;
use crate::error::AuthError;
use crate::error::HttpErrorDetail;

/// Path of the login endpoint, relative to the base URL.
pub(crate) const LOGIN_PATH: &str = "/_/security/login";

/// Login credentials, sent as `{"clientId", "authToken", "login", "password"}`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Client (tenant) identifier.
    pub client_id: String,
    /// Application auth token issued for the client.
    pub auth_token: String,
    /// User login.
    pub login: String,
    /// User password.
    pub password: String,
}

impl Credentials {
    /// Creates a new set of credentials.
    pub fn new(
        client_id: impl Into<String>,
        auth_token: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            auth_token: auth_token.into(),
            login: login.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("auth_token", &"[REDACTED]")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Extracts the token from a login response body.
pub(crate) fn token_from_login_response(body: &Value) -> Result<AccessToken, AuthError> {
    body.get("token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(AccessToken::new)
        .ok_or(AuthError::MissingToken)
}

/// Trait for flows that can obtain a fresh token.
///
/// Used with [`AutoLoginTokenProvider`] for automatic token management.
#[async_trait]
pub trait AuthFlow: Send + Sync {
    /// Obtains a new token for the API at `base_url`.
    async fn authenticate(&self, base_url: &str) -> Result<AccessToken, AuthError>;
}

/// Username/password login against `POST {base}/_/security/login`.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use swapi_lib::auth::{AuthFlow, Credentials, LoginFlow};
///
/// let flow = LoginFlow::new(Credentials::new("client", "app-token", "jan", "secret"))
///     .timeout(Duration::from_secs(10));
/// let token = flow.authenticate("https://example.serwisplanner.pl").await?;
/// ```
#[derive(Debug, Clone)]
pub struct LoginFlow {
    credentials: Credentials,
    http_client: reqwest::Client,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl LoginFlow {
    /// Creates a login flow with its own HTTP client.
    pub fn new(credentials: Credentials) -> Self {
        Self::with_http_client(credentials, reqwest::Client::new())
    }

    /// Creates a login flow reusing an existing HTTP client.
    pub fn with_http_client(credentials: Credentials, http_client: reqwest::Client) -> Self {
        Self {
            credentials,
            http_client,
            timeout: None,
            user_agent: None,
        }
    }

    /// Sets the timeout of the login request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the `User-Agent` header of the login request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Returns the credentials used by this flow.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[async_trait]
impl AuthFlow for LoginFlow {
    async fn authenticate(&self, base_url: &str) -> Result<AccessToken, AuthError> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), LOGIN_PATH);
        log::debug!("POST {} (login as {})", LOGIN_PATH, self.credentials.login);

        let mut request = self.http_client.post(&url).json(&self.credentials);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            request = request.header(USER_AGENT, user_agent.as_str());
        }

        let response = request.send().await.map_err(|e| {
            log::warn!("Login request failed: {}", e);
            AuthError::Network(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let detail = HttpErrorDetail::from_body(status.as_u16(), &text);
            log::warn!("Login rejected: {}", detail);
            return Err(AuthError::LoginRejected(detail));
        }

        let body: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| AuthError::Parse(e.to_string()))?
        };
        let token = token_from_login_response(&body)?;
        log::info!("Logged in as {}", self.credentials.login);
        Ok(token)
    }
}

/// A token provider that logs in lazily and again after a rejection.
///
/// Wraps any [`AuthFlow`]:
/// - the first request triggers a login and the token is cached,
/// - later requests reuse the cached token,
/// - after a 401 the client invalidates the token and the next request
///   logs in again.
///
/// Concurrent callers waiting on an empty cache perform a single login.
///
/// # Example
///
/// ```ignore
/// use swapi_lib::SwapiClient;
/// use swapi_lib::auth::{AutoLoginTokenProvider, Credentials, LoginFlow};
///
/// let flow = LoginFlow::new(Credentials::new(client_id, auth_token, login, password));
///
/// let client = SwapiClient::builder()
///     .url("https://example.serwisplanner.pl")
///     .token_provider(AutoLoginTokenProvider::new(flow))
///     .build()?;
///
/// // Logs in on first use.
/// let me = client.me().await?;
/// ```
pub struct AutoLoginTokenProvider<F> {
    flow: F,
    token: RwLock<Option<AccessToken>>,
}

impl<F: AuthFlow> AutoLoginTokenProvider<F> {
    /// Creates a provider with an empty cache.
    pub fn new(flow: F) -> Self {
        Self {
            flow,
            token: RwLock::new(None),
        }
    }

    /// Clears the cached token, forcing a login on next request.
    pub async fn clear_token(&self) {
        let mut token = self.token.write().await;
        *token = None;
    }

    /// Returns the cached token, if any.
    pub async fn cached_token(&self) -> Option<AccessToken> {
        self.token.read().await.clone()
    }
}

#[async_trait]
impl<F: AuthFlow> TokenProvider for AutoLoginTokenProvider<F> {
    async fn get_token(&self, base_url: &str) -> Result<AccessToken, AuthError> {
        {
            let token_guard = self.token.read().await;
            if let Some(token) = &*token_guard {
                return Ok(token.clone());
            }
        }

        let mut token_guard = self.token.write().await;

        // Another task may have logged in while we waited for the lock.
        if let Some(token) = &*token_guard {
            return Ok(token.clone());
        }

        let token = self.flow.authenticate(base_url).await?;
        *token_guard = Some(token.clone());
        Ok(token)
    }

    async fn invalidate(&self, stale: &AccessToken) {
        let mut token_guard = self.token.write().await;
        if token_guard.as_ref() == Some(stale) {
            *token_guard = None;
        }
    }
}
