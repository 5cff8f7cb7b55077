//! Main SwapiClient

use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::time::Duration;

use reqwest::Client;

use crate::auth::AccessToken;
use crate::auth::AutoLoginTokenProvider;
use crate::auth::Credentials;
use crate::auth::LoginFlow;
use crate::auth::TokenProvider;
use crate::error::Error;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = "SWApiClient/3.0 (Rust)";

/// The main client for interacting with the Serwis Planner REST API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. All clones share the token slot, so a login on one
/// clone authenticates every other clone too.
///
/// A built client is ready to use; there is no open or close step. The
/// connection pool is released when the last clone is dropped.
///
/// # Example
///
/// ```ignore
/// use swapi_lib::SwapiClient;
/// use swapi_lib::query::Query;
///
/// let client = SwapiClient::builder()
///     .url("https://example.serwisplanner.pl")
///     .token("my-token")
///     .build()?;
///
/// let companies = client
///     .account()
///     .companies()
///     .list(&Query::new().filter("name__contains", "STB"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct SwapiClient {
    pub(crate) inner: Arc<SwapiClientInner>,
}

pub(crate) struct SwapiClientInner {
    pub(crate) base_url: String,
    pub(crate) http_client: Client,
    pub(crate) timeout: Duration,
    pub(crate) user_agent: String,
    pub(crate) token: RwLock<Option<AccessToken>>,
    pub(crate) token_provider: Option<Arc<dyn TokenProvider>>,
}

impl SwapiClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> SwapiClientBuilder<Missing> {
        SwapiClientBuilder::new()
    }

    /// Returns the base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Returns the `User-Agent` sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.inner.user_agent
    }

    /// Returns `true` if a token provider is configured.
    pub fn has_token_provider(&self) -> bool {
        self.inner.token_provider.is_some()
    }

    // =========================================================================
    // Token slot
    // =========================================================================

    /// Returns the token currently used for requests, if any.
    pub fn token(&self) -> Option<AccessToken> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sets the token used for subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        self.store_token(AccessToken::new(token));
    }

    /// Removes the token. Later requests are sent without `Authorization`
    /// unless a token provider supplies a new one.
    pub fn clear_token(&self) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub(crate) fn store_token(&self, token: AccessToken) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Clears the slot only if it still holds `stale`.
    pub(crate) fn discard_token(&self, stale: &AccessToken) {
        let mut slot = self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref() == Some(stale) {
            *slot = None;
        }
    }
}

impl std::fmt::Debug for SwapiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapiClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .field("user_agent", &self.inner.user_agent)
            .field("has_token", &self.token().is_some())
            .field("has_token_provider", &self.has_token_provider())
            .finish()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`SwapiClient`].
///
/// Uses the typestate pattern to ensure the base URL is set at compile time.
///
/// # Required Fields
///
/// - `url` - The API base URL
///
/// # Optional Fields
///
/// - `token` - An initial Bearer token
/// - `token_provider` / `credentials` - Where to get a token when none is set
///   or after a 401
/// - `timeout` - Per-request timeout (default 30 s)
/// - `user_agent` - `User-Agent` header (default `SWApiClient/3.0 (Rust)`)
/// - `http_client` - A preconfigured `reqwest::Client`
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use swapi_lib::SwapiClient;
///
/// let client = SwapiClient::builder()
///     .url("https://example.serwisplanner.pl/")
///     .token("my-token")
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
///
/// assert_eq!(client.base_url(), "https://example.serwisplanner.pl");
/// ```
pub struct SwapiClientBuilder<Url> {
    url: Url,
    token: Option<String>,
    token_provider: Option<Arc<dyn TokenProvider>>,
    credentials: Option<Credentials>,
    timeout: Duration,
    user_agent: String,
    http_client: Option<Client>,
}

impl SwapiClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token: None,
            token_provider: None,
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_client: None,
        }
    }

    /// Sets the API base URL. A trailing `/` is stripped.
    pub fn url(self, url: impl Into<String>) -> SwapiClientBuilder<Set<String>> {
        SwapiClientBuilder {
            url: Set(url.into()),
            token: self.token,
            token_provider: self.token_provider,
            credentials: self.credentials,
            timeout: self.timeout,
            user_agent: self.user_agent,
            http_client: self.http_client,
        }
    }
}

impl Default for SwapiClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> SwapiClientBuilder<U> {
    /// Sets the initial Bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the token provider consulted when no token is set and after a 401.
    pub fn token_provider<T: TokenProvider + 'static>(mut self, provider: T) -> Self {
        self.token_provider = Some(Arc::new(provider));
        self
    }

    /// Logs in with these credentials on first use and again after a 401.
    ///
    /// Shorthand for an [`AutoLoginTokenProvider`] over a [`LoginFlow`] that
    /// shares the client's HTTP client, timeout and `User-Agent`. Ignored when
    /// a token provider is set.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl SwapiClientBuilder<Set<String>> {
    /// Builds the [`SwapiClient`].
    ///
    /// Fails with [`Error::InvalidUrl`] when the base URL does not parse.
    pub fn build(self) -> Result<SwapiClient, Error> {
        let base_url = self.url.0.trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => Client::builder().build().map_err(Error::HttpClient)?,
        };

        let token_provider = match (self.token_provider, self.credentials) {
            (Some(provider), _) => Some(provider),
            (None, Some(credentials)) => {
                let flow = LoginFlow::with_http_client(credentials, http_client.clone())
                    .timeout(self.timeout)
                    .user_agent(self.user_agent.as_str());
                Some(Arc::new(AutoLoginTokenProvider::new(flow)) as Arc<dyn TokenProvider>)
            }
            (None, None) => None,
        };

        Ok(SwapiClient {
            inner: Arc::new(SwapiClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
                user_agent: self.user_agent,
                token: RwLock::new(self.token.map(AccessToken::new)),
                token_provider,
            }),
        })
    }
}
