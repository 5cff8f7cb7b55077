//! Auto-pagination over list endpoints.

use futures::Stream;
use futures::TryStreamExt;
use futures::stream;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Resource;
use super::response::total_from_meta;
use crate::error::Error;
use crate::query::Query;
use crate::request::decode_value;

/// Page size used when the query does not set one.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// One page of a list response.
#[derive(Debug, Clone)]
pub struct Page {
    number: u32,
    items: Vec<Value>,
    meta: Value,
    total: Option<usize>,
}

impl Page {
    /// Splits a list response into its items and meta.
    ///
    /// A bare JSON array is accepted as a page without meta.
    pub(crate) fn from_response(number: u32, response: Value) -> Self {
        let (items, meta) = match response {
            Value::Array(items) => (items, Value::Null),
            Value::Object(mut map) => {
                let items = match map.remove("data") {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                };
                (items, map.remove("meta").unwrap_or(Value::Null))
            }
            _ => (Vec::new(), Value::Null),
        };
        let total = total_from_meta(&meta);
        Self {
            number,
            items,
            meta,
            total,
        }
    }

    /// Returns the 1-based page number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Returns the items of this page.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Consumes the page and returns the items.
    pub fn into_items(self) -> Vec<Value> {
        self.items
    }

    /// Decodes the items into `T`.
    pub fn items_as<T: DeserializeOwned>(&self) -> Result<Vec<T>, Error> {
        self.items
            .iter()
            .map(decode_value::<T>)
            .collect()
    }

    /// Returns the response `meta` object.
    pub fn meta(&self) -> &Value {
        &self.meta
    }

    /// Returns the total record count reported by the server, if any.
    pub fn total(&self) -> Option<usize> {
        self.total
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Async iterator over the pages of a list endpoint.
///
/// Requests `page[number]` 1, 2, 3, ... with `page[limit]` taken from the
/// query (100 when unset) and stops after:
/// - an empty page,
/// - the page that brings the collected count to the server's total,
/// - a page shorter than the limit, when the server reports no total.
///
/// Any `page[number]` set on the query is overridden. An error ends the
/// iteration.
///
/// # Example
///
/// ```ignore
/// let mut pages = client.commissions().pages(&Query::new().limit(50));
///
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     for commission in page.items() {
///         println!("{}", commission["id"]);
///     }
/// }
/// ```
pub struct Pages<'a> {
    resource: Resource<'a>,
    query: Query,
    limit: u32,
    next_page: u32,
    collected: usize,
    done: bool,
}

impl<'a> Pages<'a> {
    pub(crate) fn new(resource: Resource<'a>, query: Query) -> Self {
        let limit = query.limit_value().unwrap_or(DEFAULT_PAGE_LIMIT);
        Self {
            resource,
            query,
            limit,
            next_page: 1,
            collected: 0,
            done: false,
        }
    }

    /// Returns the page size in use.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Fetches the next page of results.
    ///
    /// Returns `None` when all pages have been consumed.
    pub async fn next(&mut self) -> Option<Result<Page, Error>> {
        if self.done {
            return None;
        }

        let query = self.query.clone().limit(self.limit).page(self.next_page);
        let response = match self.resource.list(&query).await {
            Ok(response) => response,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        let page = Page::from_response(self.next_page, response);
        self.collected += page.len();
        self.next_page += 1;

        self.done = match page.total() {
            _ if page.is_empty() => true,
            Some(total) => self.collected >= total,
            None => page.len() < self.limit as usize,
        };

        log::debug!(
            "{} page {}: {} items ({} collected)",
            self.resource.path(),
            page.number(),
            page.len(),
            self.collected
        );

        Some(Ok(page))
    }

    /// Collects the items of every remaining page.
    pub async fn collect_items(mut self) -> Result<Vec<Value>, Error> {
        let mut items = Vec::new();
        while let Some(page) = self.next().await {
            items.extend(page?.into_items());
        }
        Ok(items)
    }

    /// Turns the pages into a stream of items.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use futures::TryStreamExt;
    ///
    /// let stream = client.products().pages(None).into_stream();
    /// futures::pin_mut!(stream);
    /// while let Some(product) = stream.try_next().await? {
    ///     println!("{}", product["name"]);
    /// }
    /// ```
    pub fn into_stream(self) -> impl Stream<Item = Result<Value, Error>> + 'a {
        stream::unfold(self, |mut pages| async move {
            let page = pages.next().await?;
            Some((page, pages))
        })
        .map_ok(|page| stream::iter(page.into_items().into_iter().map(Ok::<Value, Error>)))
        .try_flatten()
    }
}
