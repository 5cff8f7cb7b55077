//! TokenProvider trait and AccessToken

use async_trait::async_trait;

use crate::error::AuthError;

/// A Bearer token accepted by the API.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// The raw token string.
    pub access_token: String,
}

impl AccessToken {
    /// Creates a new access token from the token string.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// Returns the raw token string.
    pub fn as_str(&self) -> &str {
        &self.access_token
    }

    /// Returns the token as a bearer authorization header value.
    pub fn as_bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Trait for supplying tokens to the client.
///
/// The client asks the provider for a token whenever it holds none, and
/// calls [`TokenProvider::invalidate`] with the rejected token after a 401
/// before asking again. Providers that cache tokens should drop the stale one
/// there.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use swapi_lib::auth::{AccessToken, TokenProvider};
/// use swapi_lib::error::AuthError;
///
/// struct VaultTokenProvider {
///     vault: VaultClient,
/// }
///
/// #[async_trait]
/// impl TokenProvider for VaultTokenProvider {
///     async fn get_token(&self, base_url: &str) -> Result<AccessToken, AuthError> {
///         let secret = self.vault.read(base_url).await?;
///         Ok(AccessToken::new(secret))
///     }
/// }
/// ```
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Gets a token for the API at `base_url` (e.g. `https://example.serwisplanner.pl`).
    async fn get_token(&self, base_url: &str) -> Result<AccessToken, AuthError>;

    /// Notifies the provider that `stale` was rejected with a 401.
    async fn invalidate(&self, _stale: &AccessToken) {}
}

/// A token provider that always returns the same static token.
///
/// # Example
///
/// ```
/// use swapi_lib::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("my-access-token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Creates a new static token provider with the given token string.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(access_token),
        }
    }

    /// Creates a new static token provider from an existing AccessToken.
    pub fn from_token(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self, _base_url: &str) -> Result<AccessToken, AuthError> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        assert_eq!(AccessToken::new("abc").as_bearer(), "Bearer abc");
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", AccessToken::new("secret-token"));
        assert!(!debug.contains("secret-token"));
    }

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticTokenProvider::new("abc");
        let token = provider.get_token("https://example.com").await.unwrap();
        assert_eq!(token.as_str(), "abc");

        provider.invalidate(&token).await;
        assert_eq!(provider.get_token("https://example.com").await.unwrap(), token);
    }
}
