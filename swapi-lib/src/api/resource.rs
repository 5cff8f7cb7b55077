//! Generic CRUD handle bound to a base path.

use std::fmt::Display;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ListResponse;
use super::Page;
use super::Pages;
use crate::SwapiClient;
use crate::error::Error;
use crate::query::Query;
use crate::request::ApiRequest;
use crate::request::decode_value;

/// CRUD operations on one API collection, e.g. `/api/commissions`.
///
/// Every operation takes an optional [`Query`]; pass `None` or `&query`.
/// Identifiers are escaped as a single path segment.
///
/// # Example
///
/// ```ignore
/// use serde_json::json;
/// use swapi_lib::query::Query;
///
/// let places = client.places();
///
/// let created = places.create(&json!({"name": "Warehouse"}), None).await?;
/// let one = places.retrieve(15, &Query::new().with_relations(true)).await?;
/// places.partial_update(15, &json!({"name": "Depot"}), None).await?;
/// places.delete(15, None).await?;
///
/// let everything = places.all(&Query::new().filter("active", true)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Resource<'a> {
    client: &'a SwapiClient,
    path: String,
}

impl<'a> Resource<'a> {
    /// Creates a handle for `path` (relative to the base URL, e.g. `/api/kanbans`).
    pub fn new(client: &'a SwapiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }

    /// Returns the client this handle sends requests with.
    pub fn client(&self) -> &'a SwapiClient {
        self.client
    }

    /// Returns the base path of the collection.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the path of one record.
    pub fn item_path(&self, id: impl Display) -> String {
        format!("{}/{}", self.path, urlencoding::encode(&id.to_string()))
    }

    /// Returns a handle for a nested collection of one record,
    /// e.g. `/api/account_companies/{id}/histories`.
    pub fn nested(&self, id: impl Display, name: &str) -> Resource<'a> {
        Resource::new(self.client, format!("{}/{}", self.item_path(id), name))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Lists records (`GET {path}`), one page at a time.
    pub async fn list<'q>(&self, query: impl Into<Option<&'q Query>>) -> Result<Value, Error> {
        self.client.get(&self.path, query).await
    }

    /// Lists records and decodes the response envelope.
    pub async fn list_as<'q, T: DeserializeOwned>(
        &self,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<ListResponse<T>, Error> {
        self.client.get_as(&self.path, query).await
    }

    /// Fetches one record (`GET {path}/{id}`).
    pub async fn retrieve<'q>(&self, id: impl Display, query: impl Into<Option<&'q Query>>) -> Result<Value, Error> {
        self.client.get(&self.item_path(id), query).await
    }

    /// Fetches one record and decodes it into `T`.
    pub async fn retrieve_as<'q, T: DeserializeOwned>(
        &self,
        id: impl Display,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<T, Error> {
        self.client.get_as(&self.item_path(id), query).await
    }

    /// Fetches the collection metadata (`GET {path}/meta`).
    pub async fn meta<'q>(&self, query: impl Into<Option<&'q Query>>) -> Result<Value, Error> {
        self.client.get(&format!("{}/meta", self.path), query).await
    }

    /// Fetches select-box options (`GET {path}/autoselect`).
    pub async fn autoselect<'q>(&self, query: impl Into<Option<&'q Query>>) -> Result<Value, Error> {
        self.client.get(&format!("{}/autoselect", self.path), query).await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Creates a record (`POST {path}`).
    pub async fn create<'q, B: Serialize + ?Sized>(
        &self,
        body: &B,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<Value, Error> {
        self.client.post(&self.path, body, query).await
    }

    /// Replaces a record (`PUT {path}/{id}`).
    pub async fn update<'q, B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        body: &B,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<Value, Error> {
        self.client.put(&self.item_path(id), body, query).await
    }

    /// Updates some fields of a record (`PATCH {path}/{id}`).
    pub async fn partial_update<'q, B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        body: &B,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<Value, Error> {
        self.client.patch(&self.item_path(id), body, query).await
    }

    /// Deletes a record (`DELETE {path}/{id}`).
    pub async fn delete<'q>(&self, id: impl Display, query: impl Into<Option<&'q Query>>) -> Result<Value, Error> {
        self.client.delete(&self.item_path(id), query).await
    }

    /// Updates every record matched by the query (`PUT {path}`).
    pub async fn bulk_update<'q, B: Serialize + ?Sized>(
        &self,
        body: &B,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<Value, Error> {
        self.client.put(&self.path, body, query).await
    }

    /// Deletes every record matched by the query (`DELETE {path}`).
    pub async fn bulk_delete<'q>(&self, query: impl Into<Option<&'q Query>>) -> Result<Value, Error> {
        self.client.delete(&self.path, query).await
    }

    /// Creates several records in one call (`POST {path}/bulk` with `{"data": [...]}`).
    ///
    /// # Example
    ///
    /// ```ignore
    /// use serde_json::json;
    ///
    /// client
    ///     .places()
    ///     .bulk_create(&[json!({"name": "North"}), json!({"name": "South"})])
    ///     .await?;
    /// ```
    pub async fn bulk_create<T: Serialize>(&self, items: &[T]) -> Result<Value, Error> {
        self.client
            .post(&self.bulk_path(), &DataEnvelope { data: items }, None)
            .await
    }

    /// Updates several records in one call (`PUT {path}/bulk` with `{"data": [...]}`).
    ///
    /// Each item carries its own `id`.
    pub async fn bulk_update_records<T: Serialize>(&self, items: &[T]) -> Result<Value, Error> {
        self.client
            .put(&self.bulk_path(), &DataEnvelope { data: items }, None)
            .await
    }

    /// Deletes records by id (`DELETE {path}/bulk?ids=1,2,3`).
    pub async fn bulk_delete_ids<I: Display>(&self, ids: impl IntoIterator<Item = I>) -> Result<Value, Error> {
        let ids = ids
            .into_iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let request = ApiRequest::new(Method::DELETE, self.bulk_path()).param("ids", ids);
        self.client.execute(request).await
    }

    fn bulk_path(&self) -> String {
        format!("{}/bulk", self.path)
    }

    // =========================================================================
    // Contextual writes
    // =========================================================================

    /// Creates a record with server-side context defaults (`POST {path}/contextual`).
    pub async fn contextual_create<'q, B: Serialize + ?Sized>(
        &self,
        body: &B,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<Value, Error> {
        self.client
            .post(&format!("{}/contextual", self.path), body, query)
            .await
    }

    /// Updates a record in context (`PUT {path}/{id}/contextual`).
    pub async fn contextual_update<'q, B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        body: &B,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<Value, Error> {
        self.client
            .put(&format!("{}/contextual", self.item_path(id)), body, query)
            .await
    }

    /// Deletes a record in context (`DELETE {path}/{id}/contextual`).
    pub async fn contextual_delete<'q>(
        &self,
        id: impl Display,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<Value, Error> {
        self.client
            .delete(&format!("{}/contextual", self.item_path(id)), query)
            .await
    }

    // =========================================================================
    // Documents
    // =========================================================================

    /// Renders a record with a document template
    /// (`POST {path}/{id}/generate/pdf` with `{"data": {"templateId": ..}}`).
    ///
    /// Template 0 selects the module's default template.
    pub async fn generate_pdf(&self, id: impl Display, template_id: u32) -> Result<Value, Error> {
        let path = format!("{}/generate/pdf", self.item_path(id));
        let body = DataEnvelope {
            data: &TemplateRef { template_id },
        };
        self.client.post(&path, &body, None).await
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Returns an async iterator over all pages matching the query.
    pub fn pages<'q>(&self, query: impl Into<Option<&'q Query>>) -> Pages<'a> {
        Pages::new(self.clone(), query.into().cloned().unwrap_or_default())
    }

    /// Returns the number of matching records.
    ///
    /// Requests a single record (`page[limit]=1`, `page[offset]=0`) and reads
    /// the total from the meta. Without a total, counts the returned items.
    pub async fn count<'q>(&self, query: impl Into<Option<&'q Query>>) -> Result<usize, Error> {
        let query = query.into().cloned().unwrap_or_default().limit(1).offset(0);
        let page = Page::from_response(1, self.list(&query).await?);
        Ok(page.total().unwrap_or(page.len()))
    }

    /// Returns the first matching record, if any.
    pub async fn first<'q>(&self, query: impl Into<Option<&'q Query>>) -> Result<Option<Value>, Error> {
        let query = query.into().cloned().unwrap_or_default().limit(1).page(1);
        let page = Page::from_response(1, self.list(&query).await?);
        Ok(page.into_items().into_iter().next())
    }

    /// Returns `true` if at least one record matches.
    pub async fn exists<'q>(&self, query: impl Into<Option<&'q Query>>) -> Result<bool, Error> {
        Ok(self.first(query).await?.is_some())
    }

    /// Fetches every page and returns the concatenated items.
    pub async fn all<'q>(&self, query: impl Into<Option<&'q Query>>) -> Result<Vec<Value>, Error> {
        self.pages(query).collect_items().await
    }

    /// Fetches every page and decodes the items into `T`.
    pub async fn all_as<'q, T: DeserializeOwned>(
        &self,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<Vec<T>, Error> {
        self.all(query)
            .await?
            .into_iter()
            .map(|item| decode_value(&item))
            .collect()
    }

    // =========================================================================
    // Record actions
    // =========================================================================

    /// Sends `method` to `{path}/{id}/{action}`.
    pub(crate) async fn item_action<'q>(
        &self,
        method: Method,
        id: impl Display,
        action: &str,
        query: impl Into<Option<&'q Query>>,
    ) -> Result<Value, Error> {
        let path = format!("{}/{}", self.item_path(id), action);
        let request = ApiRequest::new(method, path).query(query.into())?;
        self.client.execute(request).await
    }
}

/// `{"data": ...}` request envelope.
#[derive(Serialize)]
struct DataEnvelope<'b, T: ?Sized> {
    data: &'b T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TemplateRef {
    template_id: u32,
}

/// Declares a resource wrapper that dereferences to [`Resource`].
macro_rules! resource_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name<'a> {
            resource: $crate::api::Resource<'a>,
        }

        impl<'a> $name<'a> {
            pub(crate) fn new(client: &'a $crate::SwapiClient, path: &str) -> Self {
                Self {
                    resource: $crate::api::Resource::new(client, path),
                }
            }

            /// Returns the plain CRUD handle.
            pub fn resource(&self) -> &$crate::api::Resource<'a> {
                &self.resource
            }
        }

        impl<'a> std::ops::Deref for $name<'a> {
            type Target = $crate::api::Resource<'a>;

            fn deref(&self) -> &Self::Target {
                &self.resource
            }
        }
    };
}

pub(crate) use resource_handle;
