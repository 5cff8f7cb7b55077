//! Ordering of list results.

use std::fmt;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the wire name (`asc` or `desc`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specifies the ordering of list results.
///
/// Each field becomes one `order[field]=asc|desc` parameter, in the order the
/// fields were added.
///
/// # Example
///
/// ```
/// use swapi_lib::query::OrderBy;
///
/// // Single field ordering
/// let order = OrderBy::desc("createdAt");
///
/// // Multiple field ordering
/// let order = OrderBy::asc("name").then_desc("createdAt");
///
/// // Django-style shorthand: leading `-` means descending
/// assert_eq!(OrderBy::parse("-createdAt"), OrderBy::desc("createdAt"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub(crate) fields: Vec<(String, Direction)>,
}

impl OrderBy {
    /// Creates an ascending order on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Asc)],
        }
    }

    /// Creates a descending order on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Desc)],
        }
    }

    /// Parses `name` (ascending) or `-name` (descending).
    pub fn parse(input: &str) -> Self {
        match input.strip_prefix('-') {
            Some(field) => Self::desc(field),
            None => Self::asc(input),
        }
    }

    /// Adds a secondary ascending order on a field.
    pub fn then_asc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Asc));
        self
    }

    /// Adds a secondary descending order on a field.
    pub fn then_desc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Desc));
        self
    }

    /// Appends every field of `other` after the fields of `self`.
    pub fn then(mut self, other: OrderBy) -> Self {
        self.fields.extend(other.fields);
        self
    }

    /// Returns the ordered fields with their directions.
    pub fn fields(&self) -> &[(String, Direction)] {
        &self.fields
    }
}
