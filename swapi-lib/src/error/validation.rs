//! Validation error types

use serde_json::Value;

/// Error information for a specific field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Human-readable validation error message.
    pub message: String,
    /// Optional error code.
    pub code: Option<String>,
}

impl FieldValidationError {
    /// Creates a new field validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Creates a new field validation error with an error code.
    pub fn with_code(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// Extracts per-field errors from a 422 `errors` payload.
    ///
    /// Two shapes are understood:
    /// - a list of `{"field": ..., "message": ..., "code": ...}` objects
    ///   (`propertyPath` is accepted in place of `field`),
    /// - an object mapping field names to a message or a list of messages.
    ///
    /// Anything else yields an empty list; the raw payload stays available on
    /// the error itself.
    pub fn collect(errors: &Value) -> Vec<Self> {
        match errors {
            Value::Array(items) => items.iter().filter_map(Self::from_entry).collect(),
            Value::Object(map) => {
                let mut out = Vec::new();
                for (field, messages) in map {
                    match messages {
                        Value::String(message) => out.push(Self::new(field, message)),
                        Value::Array(list) => {
                            for message in list.iter().filter_map(Value::as_str) {
                                out.push(Self::new(field, message));
                            }
                        }
                        _ => {}
                    }
                }
                out
            }
            _ => Vec::new(),
        }
    }

    fn from_entry(entry: &Value) -> Option<Self> {
        let field = entry
            .get("field")
            .or_else(|| entry.get("propertyPath"))
            .and_then(Value::as_str)?;
        let message = entry.get("message").and_then(Value::as_str)?;
        let code = match entry.get("code") {
            Some(Value::String(code)) => Some(code.clone()),
            Some(Value::Number(code)) => Some(code.to_string()),
            _ => None,
        };
        Some(Self {
            field: field.to_string(),
            message: message.to_string(),
            code,
        })
    }
}

impl std::fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(code) = &self.code {
            write!(f, "{}: {} ({})", self.field, self.message, code)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collect_list_shape() {
        let errors = json!([
            {"field": "name", "message": "This value should not be blank.", "code": "c1"},
            {"propertyPath": "email", "message": "Invalid email."},
            {"unrelated": true}
        ]);
        assert_eq!(
            FieldValidationError::collect(&errors),
            vec![
                FieldValidationError::with_code("name", "This value should not be blank.", "c1"),
                FieldValidationError::new("email", "Invalid email."),
            ]
        );
    }

    #[test]
    fn test_collect_map_shape() {
        let errors = json!({
            "name": ["Too short.", "Must be unique."],
            "email": "Invalid email.",
            "nested": {"ignored": 1}
        });
        let collected = FieldValidationError::collect(&errors);
        assert_eq!(collected.len(), 3);
        assert!(collected.contains(&FieldValidationError::new("name", "Must be unique.")));
        assert!(collected.contains(&FieldValidationError::new("email", "Invalid email.")));
    }

    #[test]
    fn test_collect_unknown_shape() {
        assert!(FieldValidationError::collect(&json!("boom")).is_empty());
        assert!(FieldValidationError::collect(&Value::Null).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            FieldValidationError::with_code("name", "blank", "c1").to_string(),
            "name: blank (c1)"
        );
        assert_eq!(FieldValidationError::new("name", "blank").to_string(), "name: blank");
    }
}
