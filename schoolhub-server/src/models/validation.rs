//! Validation error types

use std::fmt;

use serde::Serialize;

/// Where in the request a field was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Query,
    Params,
}

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub field: String,
    pub location: Location,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, location: Location, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            location,
            message: message.into(),
        }
    }
}

/// Every violation found while checking one request.
///
/// Never empty when returned as an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<Violation>,
}

impl ValidationErrors {
    pub fn single(violation: Violation) -> Self {
        Self {
            errors: vec![violation],
        }
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(errors: Vec<Violation>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationErrors {
            errors: vec![
                Violation::new("name", Location::Body, "Name must be a string"),
                Violation::new("id", Location::Params, "School ID must be an integer"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "name: Name must be a string; id: School ID must be an integer"
        );
    }

    #[test]
    fn empty_list_is_ok() {
        assert!(ValidationErrors::into_result(Vec::new()).is_ok());
    }

    #[test]
    fn location_serializes_lowercase() {
        let v = Violation::new("latitude", Location::Query, "bad");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["location"], "query");
    }
}
