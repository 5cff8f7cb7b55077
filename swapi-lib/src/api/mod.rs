//! Web API operations
//!
//! Collections are reached through accessors on [`SwapiClient`] that return
//! [`Resource`] handles, grouped the way the API groups its modules:
//!
//! ```ignore
//! client.account().companies().attributes().list(None).await?;
//! client.commissions().attributes().criterias().list(None).await?;
//! client.products().generate_pdf(12, 0).await?;
//! client.module("baskets").all(None).await?;
//! ```

mod account;
mod auth;
mod commissions;
mod global;
mod files;
mod pages;
mod places;
mod products;
mod resource;
mod response;
mod users;

pub use account::Account;
pub use account::AccountCompanies;
pub use account::AccountUsers;
pub use auth::AuthResource;
pub use commissions::CommissionAttributes;
pub use commissions::Commissions;
pub use files::Files;
pub use files::UploadFile;
pub use pages::DEFAULT_PAGE_LIMIT;
pub use pages::Page;
pub use pages::Pages;
pub use places::Places;
pub use products::Products;
pub use products::ServicedProducts;
pub use resource::Resource;
pub use response::ListResponse;
pub use users::Users;

use crate::SwapiClient;

impl SwapiClient {
    /// Login and token verification.
    pub fn auth(&self) -> AuthResource<'_> {
        AuthResource::new(self)
    }

    /// Account companies and account users.
    pub fn account(&self) -> Account<'_> {
        Account::new(self)
    }

    /// Commissions (`/api/commissions`) and their dictionaries.
    pub fn commissions(&self) -> Commissions<'_> {
        Commissions::new(self, "/api/commissions")
    }

    /// Files (`/api/files`).
    pub fn files(&self) -> Files<'_> {
        Files::new(self, "/api/files")
    }

    /// Kanban boards (`/api/kanbans`).
    pub fn kanbans(&self) -> Resource<'_> {
        Resource::new(self, "/api/kanbans")
    }

    /// ODBC reports (`/api/odbc/reports`).
    pub fn odbc_reports(&self) -> Resource<'_> {
        Resource::new(self, "/api/odbc/reports")
    }

    /// Places (`/api/places`).
    pub fn places(&self) -> Places<'_> {
        Places::new(self, "/api/places")
    }

    /// Products (`/api/products`).
    pub fn products(&self) -> Products<'_> {
        Products::new(self, "/api/products")
    }

    /// Serviced products (`/api/serviced_products`).
    pub fn serviced_products(&self) -> ServicedProducts<'_> {
        ServicedProducts::new(self, "/api/serviced_products")
    }

    /// Internal users (`/api/user_users`).
    pub fn users(&self) -> Users<'_> {
        Users::new(self, "/api/user_users")
    }

    /// User profiles (`/api/user_profiles`).
    pub fn user_profiles(&self) -> Resource<'_> {
        Resource::new(self, "/api/user_profiles")
    }

    /// Any module by name, e.g. `module("baskets")` for `/api/baskets`.
    pub fn module(&self, name: &str) -> Resource<'_> {
        Resource::new(self, format!("/api/{}", name.trim_matches('/')))
    }
}
