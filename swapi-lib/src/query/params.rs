//! Query description and its flat parameter encoding.

use super::filter::Condition;
use super::filter::FilterValue;
use super::order::OrderBy;
use crate::error::QueryError;

/// Flat, ordered list of URL query parameters.
///
/// Behaves like an insertion-ordered map: inserting a key that is already
/// present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter, replacing the value of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Inserts every parameter of `other`, in order.
    pub fn merge(&mut self, other: QueryParams) {
        for (key, value) in other.pairs {
            self.insert(key, value);
        }
    }

    /// Returns the value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Consumes the parameters and returns the key/value pairs.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

impl IntoIterator for QueryParams {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

/// Server-side settings sent as `setting[...]` parameters.
///
/// Only settings that were set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub with_relations: Option<bool>,
    pub with_cache: Option<bool>,
    pub limit_to_my_settings: Option<bool>,
    pub lang: Option<String>,
    pub with_editable_settings_for_action: Option<String>,
}

impl Settings {
    fn encode(&self, params: &mut QueryParams) {
        if let Some(value) = self.with_relations {
            params.insert("setting[with_relations]", bool_str(value));
        }
        if let Some(value) = self.with_cache {
            params.insert("setting[with_cache]", bool_str(value));
        }
        if let Some(value) = self.limit_to_my_settings {
            params.insert("setting[limit_to_my_settings]", bool_str(value));
        }
        if let Some(lang) = &self.lang {
            params.insert("setting[lang]", lang.as_str());
        }
        if let Some(action) = &self.with_editable_settings_for_action {
            params.insert("setting[with_editable_settings_for_action]", action.as_str());
        }
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Structured description of a request's filtering, ordering, projection,
/// pagination and settings.
///
/// `Query` is a plain value: building it never touches the network, and
/// [`Query::to_params`] turns it into the API's bracketed parameter dialect.
///
/// Filter keys use the `field__operator` form. A missing operator means `eq`.
/// Invalid keys are reported by [`Query::to_params`], not by the builder
/// methods, so chains stay infallible.
///
/// # Example
///
/// ```
/// use swapi_lib::query::{OrderBy, Query};
///
/// let params = Query::new()
///     .filter("name__contains", "STB")
///     .filter("attributes.476__hasText", "keyword")
///     .filter_or([("status", "active"), ("status", "pending")])
///     .order_by(OrderBy::asc("name"))
///     .fields(&["id", "name"])
///     .limit(50)
///     .page(1)
///     .with_relations(true)
///     .to_params()
///     .unwrap();
///
/// assert_eq!(params.get("filter[name][contains]"), Some("STB"));
/// assert_eq!(params.get("filter[attributes][476][hasText]"), Some("keyword"));
/// assert_eq!(params.get("filterOr[0][status][eq]"), Some("pending"));
/// assert_eq!(params.get("order[name]"), Some("asc"));
/// assert_eq!(params.get("fields"), Some("id,name"));
/// assert_eq!(params.get("page[limit]"), Some("50"));
/// assert_eq!(params.get("setting[with_relations]"), Some("true"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<Condition>,
    or_groups: Vec<Vec<Condition>>,
    and_groups: Vec<Vec<Condition>>,
    order: Option<OrderBy>,
    fields: Option<Vec<String>>,
    extra_fields: Option<Vec<String>>,
    limit: Option<u32>,
    page: Option<u32>,
    offset: Option<u32>,
    settings: Settings,
    for_metadata: Vec<(String, FilterValue)>,
    extra: Vec<(String, String)>,
    error: Option<QueryError>,
}

impl Query {
    /// Creates an empty query. An empty query encodes to no parameters.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Adds a `filter[...]` condition from a `field__operator` key.
    pub fn filter(mut self, key: impl AsRef<str>, value: impl Into<FilterValue>) -> Self {
        match Condition::parse(key.as_ref(), value) {
            Ok(condition) => self.filters.push(condition),
            Err(e) => self.fail(e),
        }
        self
    }

    /// Adds several `filter[...]` conditions.
    pub fn filters<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<FilterValue>,
    {
        for (key, value) in pairs {
            self = self.filter(key, value);
        }
        self
    }

    /// Adds a typed `filter[...]` condition.
    pub fn condition(mut self, condition: Condition) -> Self {
        self.filters.push(condition);
        self
    }

    /// Adds a `filter[...]` condition with the operator negated
    /// (`eq` becomes `neq`, `in` becomes `notIn`, and so on).
    pub fn exclude(mut self, key: impl AsRef<str>, value: impl Into<FilterValue>) -> Self {
        match Condition::parse(key.as_ref(), value).and_then(Condition::negate) {
            Ok(condition) => self.filters.push(condition),
            Err(e) => self.fail(e),
        }
        self
    }

    /// Adds one `filterOr[i]` group. Each call adds the next group index.
    pub fn filter_or<K, V>(mut self, group: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<FilterValue>,
    {
        let group = self.parse_group(group);
        self.or_groups.push(group);
        self
    }

    /// Adds one `filterOr[i]` group of typed conditions.
    pub fn any_of(mut self, group: impl IntoIterator<Item = Condition>) -> Self {
        self.or_groups.push(group.into_iter().collect());
        self
    }

    /// Adds one `filterAnd[i]` group. Each call adds the next group index.
    pub fn filter_and<K, V>(mut self, group: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<FilterValue>,
    {
        let group = self.parse_group(group);
        self.and_groups.push(group);
        self
    }

    /// Adds one `filterAnd[i]` group of typed conditions.
    pub fn all_of(mut self, group: impl IntoIterator<Item = Condition>) -> Self {
        self.and_groups.push(group.into_iter().collect());
        self
    }

    fn parse_group<K, V>(&mut self, group: impl IntoIterator<Item = (K, V)>) -> Vec<Condition>
    where
        K: AsRef<str>,
        V: Into<FilterValue>,
    {
        let mut conditions = Vec::new();
        for (key, value) in group {
            match Condition::parse(key.as_ref(), value) {
                Ok(condition) => conditions.push(condition),
                Err(e) => self.fail(e),
            }
        }
        conditions
    }

    fn fail(&mut self, error: QueryError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    // =========================================================================
    // Ordering and projection
    // =========================================================================

    /// Sets the ordering. Repeated calls append further fields.
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order = Some(match self.order.take() {
            Some(existing) => existing.then(order),
            None => order,
        });
        self
    }

    /// Restricts the returned fields (`fields=a,b`).
    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = Some(fields.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Requests additional computed fields (`extra_fields=a,b`).
    pub fn extra_fields(mut self, fields: &[&str]) -> Self {
        self.extra_fields = Some(fields.iter().map(|s| (*s).to_string()).collect());
        self
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Sets the page size (`page[limit]`).
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the 1-based page number (`page[number]`).
    pub fn page(mut self, number: u32) -> Self {
        self.page = Some(number);
        self
    }

    /// Sets the record offset (`page[offset]`).
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns the page size, if set.
    pub fn limit_value(&self) -> Option<u32> {
        self.limit
    }

    /// Returns the page number, if set.
    pub fn page_value(&self) -> Option<u32> {
        self.page
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn with_relations(mut self, enabled: bool) -> Self {
        self.settings.with_relations = Some(enabled);
        self
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.settings.with_cache = Some(enabled);
        self
    }

    pub fn limit_to_my_settings(mut self, enabled: bool) -> Self {
        self.settings.limit_to_my_settings = Some(enabled);
        self
    }

    /// Sets the response language (`setting[lang]`), e.g. `"pl"`.
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.settings.lang = Some(lang.into());
        self
    }

    pub fn with_editable_settings_for_action(mut self, action: impl Into<String>) -> Self {
        self.settings.with_editable_settings_for_action = Some(action.into());
        self
    }

    /// Replaces all settings at once.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    // =========================================================================
    // Metadata context and raw parameters
    // =========================================================================

    /// Adds a `for[field]=value` metadata context parameter.
    pub fn for_metadata(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.for_metadata.push((field.into(), value.into()));
        self
    }

    /// Adds a raw parameter, sent as-is after all structured parameters.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra.push((key.into(), value.to_string()));
        self
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    /// Encodes the query into flat URL parameters.
    ///
    /// Parameters are emitted in a fixed order: filters, OR groups, AND groups,
    /// ordering, projection, pagination, settings, `for` metadata, raw
    /// parameters. Only what was set is emitted.
    ///
    /// Fails with the first invalid filter key passed to a builder method.
    pub fn to_params(&self) -> Result<QueryParams, QueryError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        let mut params = QueryParams::new();

        for condition in &self.filters {
            params.insert(condition.key.render("filter"), condition.render_value());
        }
        for (index, group) in self.or_groups.iter().enumerate() {
            let prefix = format!("filterOr[{}]", index);
            for condition in group {
                params.insert(condition.key.render(&prefix), condition.render_value());
            }
        }
        for (index, group) in self.and_groups.iter().enumerate() {
            let prefix = format!("filterAnd[{}]", index);
            for condition in group {
                params.insert(condition.key.render(&prefix), condition.render_value());
            }
        }

        if let Some(order) = &self.order {
            for (field, direction) in order.fields() {
                params.insert(format!("order[{}]", field), direction.as_str());
            }
        }

        if let Some(fields) = &self.fields {
            params.insert("fields", fields.join(","));
        }
        if let Some(fields) = &self.extra_fields {
            params.insert("extra_fields", fields.join(","));
        }

        if let Some(limit) = self.limit {
            params.insert("page[limit]", limit.to_string());
        }
        if let Some(page) = self.page {
            params.insert("page[number]", page.to_string());
        }
        if let Some(offset) = self.offset {
            params.insert("page[offset]", offset.to_string());
        }

        self.settings.encode(&mut params);

        for (field, value) in &self.for_metadata {
            params.insert(format!("for[{}]", field), value.to_string());
        }

        for (key, value) in &self.extra {
            params.insert(key.as_str(), value.as_str());
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Condition;

    #[test]
    fn test_empty_query() {
        assert!(Query::new().to_params().unwrap().is_empty());
    }

    #[test]
    fn test_basic_filter() {
        let params = Query::new()
            .filter("name", "John")
            .filter("age__gte", 18)
            .filter("status__isNotNull", "")
            .to_params()
            .unwrap();

        assert_eq!(params.get("filter[name][eq]"), Some("John"));
        assert_eq!(params.get("filter[age][gte]"), Some("18"));
        assert_eq!(params.get("filter[status][isNotNull]"), Some(""));
    }

    #[test]
    fn test_nested_filter() {
        let params = Query::new()
            .filter("attributes.476__hasText", "some text")
            .filter("commissionPhase.commissionPhaseId", 1)
            .to_params()
            .unwrap();

        assert_eq!(
            params.get("filter[attributes][476][hasText]"),
            Some("some text")
        );
        assert_eq!(
            params.get("filter[commissionPhase.commissionPhaseId][eq]"),
            Some("1")
        );
    }

    #[test]
    fn test_filter_or() {
        let params = Query::new()
            .filter_or([("name__contains", "STB")])
            .filter_or([("status", "active")])
            .to_params()
            .unwrap();

        assert_eq!(params.get("filterOr[0][name][contains]"), Some("STB"));
        assert_eq!(params.get("filterOr[1][status][eq]"), Some("active"));
    }

    #[test]
    fn test_filter_and() {
        let params = Query::new()
            .filter_and([("name__contains", "STB")])
            .filter_and([("status", "active")])
            .to_params()
            .unwrap();

        assert_eq!(params.get("filterAnd[0][name][contains]"), Some("STB"));
        assert_eq!(params.get("filterAnd[1][status][eq]"), Some("active"));
    }

    #[test]
    fn test_typed_groups() {
        let params = Query::new()
            .any_of([Condition::contains("name", "STB"), Condition::gt("id", 10)])
            .all_of([Condition::is_in("status", ["open", "closed"])])
            .to_params()
            .unwrap();

        assert_eq!(params.get("filterOr[0][name][contains]"), Some("STB"));
        assert_eq!(params.get("filterOr[0][id][gt]"), Some("10"));
        assert_eq!(params.get("filterAnd[0][status][in]"), Some("open,closed"));
    }

    #[test]
    fn test_order() {
        let params = Query::new()
            .order_by(OrderBy::asc("name"))
            .order_by(OrderBy::desc("created_at"))
            .to_params()
            .unwrap();

        assert_eq!(params.get("order[name]"), Some("asc"));
        assert_eq!(params.get("order[created_at]"), Some("desc"));
    }

    #[test]
    fn test_fields_and_extra_fields() {
        let params = Query::new()
            .fields(&["id", "name", "email"])
            .extra_fields(&["address"])
            .to_params()
            .unwrap();

        assert_eq!(params.get("fields"), Some("id,name,email"));
        assert_eq!(params.get("extra_fields"), Some("address"));
    }

    #[test]
    fn test_pagination() {
        let params = Query::new()
            .limit(50)
            .page(2)
            .offset(100)
            .to_params()
            .unwrap();

        assert_eq!(params.get("page[limit]"), Some("50"));
        assert_eq!(params.get("page[number]"), Some("2"));
        assert_eq!(params.get("page[offset]"), Some("100"));
    }

    #[test]
    fn test_settings() {
        let params = Query::new()
            .with_relations(true)
            .with_cache(false)
            .lang("pl")
            .limit_to_my_settings(true)
            .with_editable_settings_for_action("edit")
            .to_params()
            .unwrap();

        assert_eq!(params.get("setting[with_relations]"), Some("true"));
        assert_eq!(params.get("setting[with_cache]"), Some("false"));
        assert_eq!(params.get("setting[lang]"), Some("pl"));
        assert_eq!(params.get("setting[limit_to_my_settings]"), Some("true"));
        assert_eq!(
            params.get("setting[with_editable_settings_for_action]"),
            Some("edit")
        );
    }

    #[test]
    fn test_for_metadata() {
        let params = Query::new()
            .for_metadata("id", 1)
            .for_metadata("type", "company")
            .to_params()
            .unwrap();

        assert_eq!(params.get("for[id]"), Some("1"));
        assert_eq!(params.get("for[type]"), Some("company"));
    }

    #[test]
    fn test_combined_output_order() {
        let params = Query::new()
            .param("template_id", 3)
            .lang("en")
            .page(1)
            .fields(&["id"])
            .order_by(OrderBy::asc("name"))
            .filter_and([("b", 2)])
            .filter_or([("a", 1)])
            .filter("name__contains", "STB")
            .for_metadata("id", 7)
            .to_params()
            .unwrap();

        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "filter[name][contains]",
                "filterOr[0][a][eq]",
                "filterAnd[0][b][eq]",
                "order[name]",
                "fields",
                "page[number]",
                "setting[lang]",
                "for[id]",
                "template_id",
            ]
        );
    }

    #[test]
    fn test_duplicate_keys_replace_in_place() {
        let params = Query::new()
            .filter("status", "open")
            .filter("name", "x")
            .filter("status", "closed")
            .to_params()
            .unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(
            params.into_pairs(),
            vec![
                ("filter[status][eq]".to_string(), "closed".to_string()),
                ("filter[name][eq]".to_string(), "x".to_string()),
            ]
        );
    }

    #[test]
    fn test_exclude() {
        let params = Query::new()
            .exclude("status", "closed")
            .exclude("id__in", vec![1, 2, 3])
            .exclude("deletedAt__isNull", "")
            .to_params()
            .unwrap();

        assert_eq!(params.get("filter[status][neq]"), Some("closed"));
        assert_eq!(params.get("filter[id][notIn]"), Some("1,2,3"));
        assert_eq!(params.get("filter[deletedAt][isNotNull]"), Some(""));
    }

    #[test]
    fn test_invalid_key_is_reported_on_encode() {
        let query = Query::new().filter("name", "ok").filter("name__", "x");
        assert_eq!(
            query.to_params(),
            Err(QueryError::EmptyOperator {
                key: "name__".to_string()
            })
        );

        let query = Query::new().filter_or([("__eq", 1)]);
        assert!(matches!(
            query.to_params(),
            Err(QueryError::EmptyField { .. })
        ));

        let query = Query::new().exclude("name__contains", "x");
        assert!(matches!(
            query.to_params(),
            Err(QueryError::NotNegatable { .. })
        ));
    }

    #[test]
    fn test_list_value_in_filter() {
        let params = Query::new()
            .filter("id__in", vec![1, 2, 3])
            .to_params()
            .unwrap();
        assert_eq!(params.get("filter[id][in]"), Some("1,2,3"));
    }

    #[test]
    fn test_unsigned_id_filters() {
        let id: u64 = 9_007_199_254_740_993;
        let ids: Vec<usize> = vec![4, 5];
        let params = Query::new()
            .filter("id", id)
            .filter("commission.id__in", ids)
            .to_params()
            .unwrap();
        assert_eq!(params.get("filter[id][eq]"), Some("9007199254740993"));
        assert_eq!(params.get("filter[commission.id][in]"), Some("4,5"));
    }
}
