//! Account companies and account users.

use std::fmt::Display;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::Resource;
use super::resource::resource_handle;
use crate::SwapiClient;
use crate::error::Error;
use crate::query::Query;

/// Namespace for `/api/account_*` resources.
#[derive(Debug, Clone, Copy)]
pub struct Account<'a> {
    client: &'a SwapiClient,
}

impl<'a> Account<'a> {
    pub(crate) fn new(client: &'a SwapiClient) -> Self {
        Self { client }
    }

    /// Customer companies (`/api/account_companies`).
    pub fn companies(&self) -> AccountCompanies<'a> {
        AccountCompanies::new(self.client, "/api/account_companies")
    }

    /// Contact persons of customer companies (`/api/account_users`).
    pub fn users(&self) -> AccountUsers<'a> {
        AccountUsers::new(self.client, "/api/account_users")
    }
}

resource_handle!(
    /// Customer companies (`/api/account_companies`).
    AccountCompanies
);

impl<'a> AccountCompanies<'a> {
    /// Company attribute definitions (`/api/account_company_attributes`).
    pub fn attributes(&self) -> Resource<'a> {
        Resource::new(self.client(), "/api/account_company_attributes")
    }

    /// Change history of one company (`/api/account_companies/{id}/histories`).
    pub fn histories(&self, company_id: impl Display) -> Resource<'a> {
        self.nested(company_id, "histories")
    }

    /// Refreshes company data from the GUS registry (`PUT /{id}/gus`).
    pub async fn gus_update<B: Serialize + ?Sized>(&self, company_id: impl Display, body: &B) -> Result<Value, Error> {
        let path = format!("{}/gus", self.item_path(company_id));
        self.client().put(&path, body, None).await
    }

    /// ODBC reports of one company (`GET /{id}/odbc_reports`).
    pub async fn odbc_reports<'q>(
        &self,
        company_id: impl Display,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<Value, Error> {
        self.item_action(Method::GET, company_id, "odbc_reports", query).await
    }

    /// E-mail messages of one company (`GET /{id}/email_messages`).
    pub async fn email_messages<'q>(
        &self,
        company_id: impl Display,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<Value, Error> {
        self.item_action(Method::GET, company_id, "email_messages", query).await
    }
}

resource_handle!(
    /// Contact persons of customer companies (`/api/account_users`).
    AccountUsers
);

impl<'a> AccountUsers<'a> {
    /// Account user attribute definitions (`/api/account_user_attributes`).
    pub fn attributes(&self) -> Resource<'a> {
        Resource::new(self.client(), "/api/account_user_attributes")
    }

    /// Change history of one account user (`/api/account_users/{id}/histories`).
    pub fn histories(&self, user_id: impl Display) -> Resource<'a> {
        self.nested(user_id, "histories")
    }
}
