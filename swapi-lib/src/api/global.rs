//! Endpoints outside any collection.

use serde_json::Value;

use crate::SwapiClient;
use crate::error::Error;
use crate::query::Query;
use crate::request::ApiRequest;

impl SwapiClient {
    /// Returns the logged-in user (`GET /api/me`).
    pub async fn me(&self) -> Result<Value, Error> {
        self.get("/api/me", None).await
    }

    /// Returns the API home document (`GET /api`).
    pub async fn home(&self) -> Result<Value, Error> {
        self.get("/api", None).await
    }

    /// Returns the instance settings (`GET /api/settings`).
    pub async fn settings(&self) -> Result<Value, Error> {
        self.get("/api/settings", None).await
    }

    /// Searches across modules (`GET /api/search?query=...`).
    ///
    /// The query's parameters are sent after `query`.
    pub async fn search<'q>(&self, text: &str, query: impl Into<Option<&'q Query>>) -> Result<Value, Error> {
        let request = ApiRequest::new(reqwest::Method::GET, "/api/search")
            .param("query", text)
            .query(query.into())?;
        self.execute(request).await
    }

    /// Returns the extra translations of a module (`GET /api/additional_i18ns/{module}`).
    pub async fn additional_i18ns<'q>(
        &self,
        module: &str,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<Value, Error> {
        let path = format!("/api/additional_i18ns/{}", urlencoding::encode(module));
        self.get(&path, query).await
    }

    /// Returns the audit trail of a module (`GET /api/audits/{module}`).
    pub async fn audits<'q>(&self, module: &str, query: impl Into<Option<&'q Query>>) -> Result<Value, Error> {
        let path = format!("/api/audits/{}", urlencoding::encode(module));
        self.get(&path, query).await
    }
}
