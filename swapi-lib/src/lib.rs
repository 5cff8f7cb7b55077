//! Serwis Planner API client library
//!
//! A Rust async client for the Serwis Planner REST API.
//!
//! - [`query`] builds the API's bracketed parameter dialect
//!   (`filter[field][op]=value`, `order[field]=asc`, `page[limit]=n`, ...).
//! - [`SwapiClient`] sends requests with Bearer authentication and maps error
//!   responses to [`error::ApiError`].
//! - [`api`] exposes every collection as a CRUD [`api::Resource`] with
//!   auto-pagination.
//!
//! # Example
//!
//! ```ignore
//! use swapi_lib::SwapiClient;
//! use swapi_lib::auth::Credentials;
//! use swapi_lib::query::{OrderBy, Query};
//!
//! let client = SwapiClient::builder()
//!     .url("https://example.serwisplanner.pl")
//!     .build()?;
//!
//! client
//!     .auth()
//!     .login(&Credentials::new("client", "app-token", "jan", "secret"))
//!     .await?;
//!
//! let query = Query::new()
//!     .filter("name__contains", "STB")
//!     .filter("attributes.476__hasText", "keyword")
//!     .order_by(OrderBy::desc("createdAt"))
//!     .with_relations(true);
//!
//! for company in client.account().companies().all(&query).await? {
//!     println!("{}", company["name"]);
//! }
//! ```

pub mod api;
pub mod auth;
pub mod error;
pub mod query;

mod client;
mod request;

pub use client::*;
pub use error::Error;
pub use query::Query;
