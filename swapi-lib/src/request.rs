//! Request pipeline: URL assembly, auth header, error mapping, JSON decoding.

use std::time::Duration;

use reqwest::Method;
use reqwest::Response;
use reqwest::header::ACCEPT;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::RETRY_AFTER;
use reqwest::header::USER_AGENT;
use reqwest::multipart::Form;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::SwapiClient;
use crate::auth::AccessToken;
use crate::error::ApiError;
use crate::error::Error;
use crate::error::HttpErrorDetail;
use crate::query::Query;
use crate::query::QueryParams;

/// Longest error message written to the log.
const LOGGED_MESSAGE_LIMIT: usize = 200;

pub(crate) enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Form),
}

impl RequestBody {
    /// Multipart forms are streamed once and cannot be replayed.
    fn try_clone(&self) -> Option<RequestBody> {
        match self {
            RequestBody::Empty => Some(RequestBody::Empty),
            RequestBody::Json(value) => Some(RequestBody::Json(value.clone())),
            RequestBody::Multipart(_) => None,
        }
    }
}

/// A single API call, before authentication is attached.
pub(crate) struct ApiRequest {
    method: Method,
    path: String,
    params: QueryParams,
    body: RequestBody,
    authenticated: bool,
}

impl ApiRequest {
    pub(crate) fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: QueryParams::new(),
            body: RequestBody::Empty,
            authenticated: true,
        }
    }

    /// Encodes `query` into the request's parameters.
    pub(crate) fn query(mut self, query: Option<&Query>) -> Result<Self, Error> {
        if let Some(query) = query {
            self.params.merge(query.to_params()?);
        }
        Ok(self)
    }

    pub(crate) fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }

    pub(crate) fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub(crate) fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Sends the request without `Authorization` and without the 401 retry.
    pub(crate) fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

impl SwapiClient {
    // =========================================================================
    // Low-level verbs
    // =========================================================================

    /// Sends a `GET` request to `path` (relative to the base URL).
    ///
    /// # Example
    ///
    /// ```ignore
    /// use swapi_lib::query::Query;
    ///
    /// let me = client.get("/api/me", None).await?;
    /// let open = client
    ///     .get("/api/commissions", &Query::new().filter("status", "open"))
    ///     .await?;
    /// ```
    pub async fn get<'q>(&self, path: &str, query: impl Into<Option<&'q Query>>) -> Result<Value, Error> {
        self.execute(ApiRequest::new(Method::GET, path).query(query.into())?)
            .await
    }

    /// Sends a `POST` request with a JSON body.
    pub async fn post<'q, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<Value, Error> {
        self.execute(ApiRequest::new(Method::POST, path).query(query.into())?.json(body)?)
            .await
    }

    /// Sends a `PUT` request with a JSON body.
    pub async fn put<'q, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<Value, Error> {
        self.execute(ApiRequest::new(Method::PUT, path).query(query.into())?.json(body)?)
            .await
    }

    /// Sends a `PATCH` request with a JSON body.
    pub async fn patch<'q, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<Value, Error> {
        self.execute(ApiRequest::new(Method::PATCH, path).query(query.into())?.json(body)?)
            .await
    }

    /// Sends a `DELETE` request.
    pub async fn delete<'q>(&self, path: &str, query: impl Into<Option<&'q Query>>) -> Result<Value, Error> {
        self.execute(ApiRequest::new(Method::DELETE, path).query(query.into())?)
            .await
    }

    /// Sends a request and decodes the JSON response into `T`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use reqwest::Method;
    ///
    /// #[derive(serde::Deserialize)]
    /// struct Me { id: u64, login: String }
    ///
    /// let me: Me = client.request_json(Method::GET, "/api/me", None, None).await?;
    /// ```
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Query>,
        body: Option<Value>,
    ) -> Result<T, Error> {
        let mut request = ApiRequest::new(method, path).query(query)?;
        if let Some(body) = body {
            request.body = RequestBody::Json(body);
        }
        let value = self.execute(request).await?;
        decode_value(&value)
    }

    /// Sends a `GET` request and decodes the JSON response into `T`.
    pub async fn get_as<'q, T: DeserializeOwned>(
        &self,
        path: &str,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<T, Error> {
        self.request_json(Method::GET, path, query.into(), None).await
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    pub(crate) async fn execute(&self, request: ApiRequest) -> Result<Value, Error> {
        let ApiRequest {
            method,
            path,
            params,
            body,
            authenticated,
        } = request;

        let url = self.request_url(&path, &params)?;
        let retry_body = if authenticated && self.inner.token_provider.is_some() {
            body.try_clone()
        } else {
            None
        };

        let token = if authenticated {
            self.current_token().await?
        } else {
            None
        };
        log::debug!("{} {}", method, path);
        let response = self.send(method.clone(), &url, body, token.as_ref()).await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED
            && let (Some(retry_body), Some(provider)) = (retry_body, &self.inner.token_provider)
        {
            log::debug!("{} {} returned 401, fetching a fresh token", method, path);
            if let Some(stale) = &token {
                provider.invalidate(stale).await;
                self.discard_token(stale);
            }
            let fresh = provider.get_token(&self.inner.base_url).await?;
            self.store_token(fresh.clone());
            let response = self.send(method.clone(), &url, retry_body, Some(&fresh)).await?;
            return self.read_response(&method, &path, response).await;
        }

        self.read_response(&method, &path, response).await
    }

    /// Returns the slot token, asking the provider when the slot is empty.
    async fn current_token(&self) -> Result<Option<AccessToken>, Error> {
        if let Some(token) = self.token() {
            return Ok(Some(token));
        }
        let Some(provider) = &self.inner.token_provider else {
            return Ok(None);
        };
        let token = provider.get_token(&self.inner.base_url).await?;
        self.store_token(token.clone());
        Ok(Some(token))
    }

    pub(crate) fn request_url(&self, path: &str, params: &QueryParams) -> Result<Url, Error> {
        let joined = if path.starts_with('/') {
            format!("{}{}", self.inner.base_url, path)
        } else {
            format!("{}/{}", self.inner.base_url, path)
        };
        let mut url = Url::parse(&joined).map_err(|e| Error::InvalidUrl(format!("{}: {}", joined, e)))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params.iter() {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: &Url,
        body: RequestBody,
        token: Option<&AccessToken>,
    ) -> Result<Response, Error> {
        let mut builder = self
            .inner
            .http_client
            .request(method, url.clone())
            .timeout(self.inner.timeout)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, self.inner.user_agent.as_str());

        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, token.as_bearer());
        }

        builder = match body {
            RequestBody::Empty => builder.header(CONTENT_TYPE, "application/json"),
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        builder.send().await.map_err(|e| {
            log::warn!("Request to {} failed: {}", url.path(), e);
            Error::Api(ApiError::Connection(e))
        })
    }

    async fn read_response(&self, method: &Method, path: &str, response: Response) -> Result<Value, Error> {
        let status = response.status();
        let retry_after = parse_retry_after(response.headers());
        let text = response.text().await.map_err(ApiError::from)?;

        if !status.is_success() {
            let detail = HttpErrorDetail::from_body(status.as_u16(), &text);
            log::warn!(
                "{} {} returned {}: {}",
                method,
                path,
                detail.status,
                truncate(&detail.message, LOGGED_MESSAGE_LIMIT)
            );
            return Err(ApiError::from_status(detail, retry_after).into());
        }

        if text.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }

        serde_json::from_str(&text).map_err(|e| Error::decode(e.to_string(), text))
    }
}

/// Decodes a response value into `T`, keeping the value as the error body.
pub(crate) fn decode_value<T: DeserializeOwned>(value: &Value) -> Result<T, Error> {
    <T as serde::Deserialize>::deserialize(value).map_err(|e| Error::decode(e.to_string(), value.to_string()))
}

/// Reads `Retry-After` given in seconds.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

fn truncate(message: &str, limit: usize) -> String {
    if message.chars().count() <= limit {
        message.to_string()
    } else {
        let mut short: String = message.chars().take(limit).collect();
        short.push_str("...");
        short
    }
}
