//! Filter conditions for the bracketed query dialect.

use std::fmt;

use crate::error::QueryError;

/// Comparison operator of a filter condition.
///
/// Unknown operator names are carried through verbatim in [`Operator::Other`],
/// so new server-side operators work without a library update.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
    Like,
    ILike,
    NotLike,
    Contains,
    HasText,
    IsNull,
    IsNotNull,
    /// Any operator not known to this library.
    Other(String),
}

impl Operator {
    /// Parses an operator from its wire name (e.g. `"gte"`, `"notIn"`).
    pub fn parse(name: &str) -> Self {
        match name {
            "eq" => Operator::Eq,
            "neq" => Operator::Neq,
            "lt" => Operator::Lt,
            "lte" => Operator::Lte,
            "gt" => Operator::Gt,
            "gte" => Operator::Gte,
            "in" => Operator::In,
            "notIn" => Operator::NotIn,
            "like" => Operator::Like,
            "ilike" => Operator::ILike,
            "notLike" => Operator::NotLike,
            "contains" => Operator::Contains,
            "hasText" => Operator::HasText,
            "isNull" => Operator::IsNull,
            "isNotNull" => Operator::IsNotNull,
            other => Operator::Other(other.to_string()),
        }
    }

    /// Returns the wire name of the operator.
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::In => "in",
            Operator::NotIn => "notIn",
            Operator::Like => "like",
            Operator::ILike => "ilike",
            Operator::NotLike => "notLike",
            Operator::Contains => "contains",
            Operator::HasText => "hasText",
            Operator::IsNull => "isNull",
            Operator::IsNotNull => "isNotNull",
            Operator::Other(name) => name,
        }
    }

    /// Returns `false` for operators whose value is always sent empty.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Operator::IsNull | Operator::IsNotNull)
    }

    /// Returns the operator matching the complement of this one, if the API has one.
    ///
    /// `ilike` and `hasText` have no exact complement and map to `notLike`.
    pub fn negated(&self) -> Option<Operator> {
        let op = match self {
            Operator::Eq => Operator::Neq,
            Operator::Neq => Operator::Eq,
            Operator::Lt => Operator::Gte,
            Operator::Lte => Operator::Gt,
            Operator::Gt => Operator::Lte,
            Operator::Gte => Operator::Lt,
            Operator::Like => Operator::NotLike,
            Operator::NotLike => Operator::Like,
            Operator::ILike => Operator::NotLike,
            Operator::HasText => Operator::NotLike,
            Operator::In => Operator::NotIn,
            Operator::NotIn => Operator::In,
            Operator::IsNull => Operator::IsNotNull,
            Operator::IsNotNull => Operator::IsNull,
            Operator::Contains | Operator::Other(_) => return None,
        };
        Some(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Operator {
    fn from(name: &str) -> Self {
        Operator::parse(name)
    }
}

/// A value compared against a field.
///
/// # Example
///
/// ```
/// use swapi_lib::query::FilterValue;
///
/// assert_eq!(FilterValue::from(18).to_string(), "18");
/// assert_eq!(FilterValue::from(vec![1, 2, 3]).to_string(), "1,2,3");
/// assert_eq!(FilterValue::from(true).to_string(), "true");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Rendered as an empty string.
    Empty,
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    /// Rendered as comma-separated items.
    List(Vec<FilterValue>),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Empty => Ok(()),
            FilterValue::Text(s) => f.write_str(s),
            FilterValue::Int(n) => write!(f, "{}", n),
            FilterValue::UInt(n) => write!(f, "{}", n),
            FilterValue::Float(n) => {
                let s = n.to_string();
                if n.is_finite() && !s.contains('.') && !s.contains('e') {
                    write!(f, "{}.0", s)
                } else {
                    f.write_str(&s)
                }
            }
            FilterValue::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            FilterValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<&String> for FilterValue {
    fn from(s: &String) -> Self {
        FilterValue::Text(s.clone())
    }
}

macro_rules! int_filter_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FilterValue {
                fn from(n: $t) -> Self {
                    FilterValue::Int(i64::from(n))
                }
            }
        )*
    };
}

int_filter_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for FilterValue {
    fn from(n: u64) -> Self {
        FilterValue::UInt(n)
    }
}

impl From<usize> for FilterValue {
    fn from(n: usize) -> Self {
        FilterValue::UInt(n as u64)
    }
}

impl From<f32> for FilterValue {
    fn from(n: f32) -> Self {
        FilterValue::Float(f64::from(n))
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Float(n)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(items: Vec<T>) -> Self {
        FilterValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FilterValue>, const N: usize> From<[T; N]> for FilterValue {
    fn from(items: [T; N]) -> Self {
        FilterValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FilterValue::Empty, Into::into)
    }
}

/// The field part of a filter key, already disambiguated.
///
/// A dotted path containing a purely numeric segment (an attribute id, for
/// example) addresses nested data, so every segment gets its own bracket.
/// Any other dotted path is a relation field name whose dot stays literal
/// inside one bracket.
///
/// # Example
///
/// ```
/// use swapi_lib::query::FieldPath;
///
/// assert_eq!(FieldPath::parse("attributes.476").brackets(), "[attributes][476]");
/// assert_eq!(
///     FieldPath::parse("commissionPhase.commissionPhaseId").brackets(),
///     "[commissionPhase.commissionPhaseId]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldPath {
    /// Rendered in a single bracket, dots included.
    Literal(String),
    /// Rendered as one bracket per segment.
    Segments(Vec<String>),
}

impl FieldPath {
    /// Applies the numeric-segment rule to a dotted field name.
    pub fn parse(field: &str) -> Self {
        let segments: Vec<&str> = field.split('.').collect();
        if segments.len() > 1 && segments.iter().any(|s| is_numeric_segment(s)) {
            FieldPath::Segments(segments.into_iter().map(str::to_string).collect())
        } else {
            FieldPath::Literal(field.to_string())
        }
    }

    /// Renders the bracket part of a parameter key, e.g. `[attributes][476]`.
    pub fn brackets(&self) -> String {
        match self {
            FieldPath::Literal(field) => format!("[{}]", field),
            FieldPath::Segments(segments) => segments.iter().map(|s| format!("[{}]", s)).collect(),
        }
    }
}

fn is_numeric_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// A parsed `field__operator` filter key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterKey {
    pub path: FieldPath,
    pub op: Operator,
}

impl FilterKey {
    /// Parses a `field__operator` key.
    ///
    /// The key is split on its last `__`. Without a `__` the operator is `eq`.
    ///
    /// # Example
    ///
    /// ```
    /// use swapi_lib::query::{FieldPath, FilterKey, Operator};
    ///
    /// let key = FilterKey::parse("attributes.476__hasText").unwrap();
    /// assert_eq!(key.op, Operator::HasText);
    /// assert_eq!(key.path.brackets(), "[attributes][476]");
    ///
    /// let key = FilterKey::parse("status").unwrap();
    /// assert_eq!(key.op, Operator::Eq);
    /// ```
    pub fn parse(key: &str) -> Result<Self, QueryError> {
        let (field, op) = key.rsplit_once("__").unwrap_or((key, "eq"));
        if field.is_empty() {
            return Err(QueryError::EmptyField {
                key: key.to_string(),
            });
        }
        if op.is_empty() {
            return Err(QueryError::EmptyOperator {
                key: key.to_string(),
            });
        }
        Ok(Self {
            path: FieldPath::parse(field),
            op: Operator::parse(op),
        })
    }

    /// Renders the full parameter key under the given prefix,
    /// e.g. `filter[name][contains]` or `filterOr[0][status][eq]`.
    pub fn render(&self, prefix: &str) -> String {
        format!("{}{}[{}]", prefix, self.path.brackets(), self.op)
    }
}

/// A single filter condition: field path, operator and value.
///
/// Conditions can be parsed from `field__op` keys or built with the typed
/// constructors.
///
/// # Example
///
/// ```
/// use swapi_lib::query::Condition;
///
/// let by_key = Condition::parse("name__contains", "STB").unwrap();
/// let typed = Condition::contains("name", "STB");
/// assert_eq!(by_key, typed);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub key: FilterKey,
    pub value: FilterValue,
}

impl Condition {
    /// Creates a condition from a field name, operator and value.
    ///
    /// The field goes through the numeric-segment rule of [`FieldPath::parse`].
    pub fn new(field: &str, op: impl Into<Operator>, value: impl Into<FilterValue>) -> Self {
        Self {
            key: FilterKey {
                path: FieldPath::parse(field),
                op: op.into(),
            },
            value: value.into(),
        }
    }

    /// Parses a `field__op` key and pairs it with a value.
    pub fn parse(key: &str, value: impl Into<FilterValue>) -> Result<Self, QueryError> {
        Ok(Self {
            key: FilterKey::parse(key)?,
            value: value.into(),
        })
    }

    pub fn eq(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, Operator::Eq, value)
    }

    pub fn neq(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, Operator::Neq, value)
    }

    pub fn gt(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, Operator::Gt, value)
    }

    pub fn gte(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, Operator::Gte, value)
    }

    pub fn lt(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, Operator::Lt, value)
    }

    pub fn lte(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, Operator::Lte, value)
    }

    pub fn like(field: &str, pattern: impl Into<String>) -> Self {
        Self::new(field, Operator::Like, pattern.into())
    }

    pub fn ilike(field: &str, pattern: impl Into<String>) -> Self {
        Self::new(field, Operator::ILike, pattern.into())
    }

    pub fn contains(field: &str, text: impl Into<String>) -> Self {
        Self::new(field, Operator::Contains, text.into())
    }

    pub fn has_text(field: &str, text: impl Into<String>) -> Self {
        Self::new(field, Operator::HasText, text.into())
    }

    /// Membership test; the values are sent comma-separated.
    pub fn is_in<T: Into<FilterValue>>(field: &str, values: impl IntoIterator<Item = T>) -> Self {
        Self::new(field, Operator::In, FilterValue::List(values.into_iter().map(Into::into).collect()))
    }

    pub fn not_in<T: Into<FilterValue>>(field: &str, values: impl IntoIterator<Item = T>) -> Self {
        Self::new(field, Operator::NotIn, FilterValue::List(values.into_iter().map(Into::into).collect()))
    }

    pub fn is_null(field: &str) -> Self {
        Self::new(field, Operator::IsNull, FilterValue::Empty)
    }

    pub fn is_not_null(field: &str) -> Self {
        Self::new(field, Operator::IsNotNull, FilterValue::Empty)
    }

    /// Returns the complementary condition.
    ///
    /// Fails with [`QueryError::NotNegatable`] for operators without a complement.
    pub fn negate(self) -> Result<Self, QueryError> {
        let op = self.key.op.negated().ok_or_else(|| QueryError::NotNegatable {
            op: self.key.op.to_string(),
        })?;
        Ok(Self {
            key: FilterKey { path: self.key.path, op },
            value: self.value,
        })
    }

    /// Renders the parameter value. Null checks always send an empty value.
    pub fn render_value(&self) -> String {
        if self.key.op.takes_value() {
            self.value.to_string()
        } else {
            String::new()
        }
    }
}
