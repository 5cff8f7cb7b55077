//! Login and token verification.

use reqwest::Method;
use serde_json::Value;

use crate::SwapiClient;
use crate::auth::AccessToken;
use crate::auth::Credentials;
use crate::auth::LOGIN_PATH;
use crate::auth::token_from_login_response;
use crate::error::ApiError;
use crate::error::AuthError;
use crate::error::Error;
use crate::request::ApiRequest;

/// Login endpoints, reached through [`SwapiClient::auth`].
#[derive(Debug, Clone, Copy)]
pub struct AuthResource<'a> {
    client: &'a SwapiClient,
}

impl<'a> AuthResource<'a> {
    pub(crate) fn new(client: &'a SwapiClient) -> Self {
        Self { client }
    }

    /// Logs in and stores the returned token on the client.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use swapi_lib::auth::Credentials;
    ///
    /// let token = client
    ///     .auth()
    ///     .login(&Credentials::new("client", "app-token", "jan", "secret"))
    ///     .await?;
    /// ```
    pub async fn login(&self, credentials: &Credentials) -> Result<AccessToken, Error> {
        let request = ApiRequest::new(Method::POST, LOGIN_PATH)
            .json(credentials)?
            .anonymous();

        let body = self.client.execute(request).await.map_err(|e| match e {
            Error::Api(ApiError::Connection(e)) => Error::Auth(AuthError::Network(e)),
            Error::Api(api) => match api.detail() {
                Some(detail) => Error::Auth(AuthError::LoginRejected(detail.clone())),
                None => Error::Api(api),
            },
            other => other,
        })?;

        let token = token_from_login_response(&body)?;
        self.client.store_token(token.clone());
        log::info!("Logged in as {}", credentials.login);
        Ok(token)
    }

    /// Checks the current token against `GET /api/me` and returns the user.
    pub async fn verify_token(&self) -> Result<Value, Error> {
        self.client
            .me()
            .await
            .map_err(|e| Error::Auth(AuthError::VerificationFailed(Box::new(e))))
    }
}
