//! Declarative per-field rule sets, one per endpoint.
//!
//! A rule set is a static table of [`FieldRule`]s. [`apply`] walks the table
//! against one request source (body, query string or path) and returns the
//! converted values together with every violation found, so a request is
//! rejected with the full list rather than the first failure.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::validation::{Location, Violation};

pub const LATITUDE_MIN: f64 = -90.0;
pub const LATITUDE_MAX: f64 = 90.0;
pub const LONGITUDE_MIN: f64 = -180.0;
pub const LONGITUDE_MAX: f64 = 180.0;

/// What a field must look like
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// String that is non-empty after trimming. The trimmed value is kept.
    NonEmptyString,
    /// JSON number or numeric string, finite and within `min..=max`.
    FloatRange { min: f64, max: f64 },
    /// JSON integer or integer string that fits a 32-bit id column.
    Integer,
}

/// A field, where it is read from, and the message reported when it fails.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub location: Location,
    pub required: bool,
    pub rule: Rule,
    pub message: &'static str,
}

/// A value that passed its rule
#[derive(Debug, Clone, PartialEq)]
pub enum Checked {
    Text(String),
    Float(f64),
    Int(i32),
}

const LATITUDE: Rule = Rule::FloatRange {
    min: LATITUDE_MIN,
    max: LATITUDE_MAX,
};
const LONGITUDE: Rule = Rule::FloatRange {
    min: LONGITUDE_MIN,
    max: LONGITUDE_MAX,
};

const SCHOOL_ID: FieldRule = FieldRule {
    field: "id",
    location: Location::Params,
    required: true,
    rule: Rule::Integer,
    message: "School ID must be an integer",
};

/// POST /schools/addSchool body
pub const ADD_SCHOOL: &[FieldRule] = &[
    FieldRule {
        field: "name",
        location: Location::Body,
        required: true,
        rule: Rule::NonEmptyString,
        message: "Name is required and must be a string",
    },
    FieldRule {
        field: "address",
        location: Location::Body,
        required: true,
        rule: Rule::NonEmptyString,
        message: "Address is required and must be a string",
    },
    FieldRule {
        field: "latitude",
        location: Location::Body,
        required: true,
        rule: LATITUDE,
        message: "Latitude must be a valid number between -90 and 90",
    },
    FieldRule {
        field: "longitude",
        location: Location::Body,
        required: true,
        rule: LONGITUDE,
        message: "Longitude must be a valid number between -180 and 180",
    },
];

/// GET /schools/listSchools query string
pub const LIST_SCHOOLS: &[FieldRule] = &[
    FieldRule {
        field: "latitude",
        location: Location::Query,
        required: true,
        rule: LATITUDE,
        message: "Latitude is required and must be a valid number",
    },
    FieldRule {
        field: "longitude",
        location: Location::Query,
        required: true,
        rule: LONGITUDE,
        message: "Longitude is required and must be a valid number",
    },
];

/// PUT /schools/updateSchool/{id} path
pub const UPDATE_SCHOOL_PARAMS: &[FieldRule] = &[SCHOOL_ID];

/// PUT /schools/updateSchool/{id} body
pub const UPDATE_SCHOOL_BODY: &[FieldRule] = &[
    FieldRule {
        field: "name",
        location: Location::Body,
        required: false,
        rule: Rule::NonEmptyString,
        message: "Name must be a string",
    },
    FieldRule {
        field: "address",
        location: Location::Body,
        required: false,
        rule: Rule::NonEmptyString,
        message: "Address must be a string",
    },
    FieldRule {
        field: "latitude",
        location: Location::Body,
        required: false,
        rule: LATITUDE,
        message: "Latitude must be between -90 and 90",
    },
    FieldRule {
        field: "longitude",
        location: Location::Body,
        required: false,
        rule: LONGITUDE,
        message: "Longitude must be between -180 and 180",
    },
];

/// DELETE /schools/deleteSchool/{id} path
pub const DELETE_SCHOOL_PARAMS: &[FieldRule] = &[SCHOOL_ID];

impl Rule {
    /// Check one value, returning the converted form on success.
    pub fn check(&self, value: &Value) -> Option<Checked> {
        match *self {
            Rule::NonEmptyString => match value {
                Value::String(s) => {
                    let trimmed = s.trim();
                    (!trimmed.is_empty()).then(|| Checked::Text(trimmed.to_owned()))
                }
                _ => None,
            },
            Rule::FloatRange { min, max } => {
                let n = match value {
                    Value::Number(n) => n.as_f64()?,
                    Value::String(s) => s.trim().parse::<f64>().ok()?,
                    _ => return None,
                };
                (n.is_finite() && (min..=max).contains(&n)).then_some(Checked::Float(n))
            }
            Rule::Integer => {
                let n = match value {
                    Value::Number(n) => n.as_i64()?,
                    Value::String(s) => s.trim().parse::<i64>().ok()?,
                    _ => return None,
                };
                i32::try_from(n).ok().map(Checked::Int)
            }
        }
    }
}

/// Values that passed, keyed by field name
#[derive(Debug, Default)]
pub struct Fields(HashMap<&'static str, Checked>);

impl Fields {
    pub fn text(&mut self, field: &str) -> Option<String> {
        match self.0.remove(field)? {
            Checked::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn float(&self, field: &str) -> Option<f64> {
        match self.0.get(field)? {
            Checked::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn int(&self, field: &str) -> Option<i32> {
        match self.0.get(field)? {
            Checked::Int(n) => Some(*n),
            _ => None,
        }
    }
}

/// Run a rule set against one request source.
///
/// A missing optional field is skipped. An explicit JSON `null` counts as
/// present and fails its rule.
pub fn apply(rules: &[FieldRule], source: &Map<String, Value>) -> (Fields, Vec<Violation>) {
    let mut fields = Fields::default();
    let mut violations = Vec::new();

    for rule in rules {
        match source.get(rule.field) {
            None if !rule.required => {}
            None => violations.push(Violation::new(rule.field, rule.location, rule.message)),
            Some(value) => match rule.rule.check(value) {
                Some(checked) => {
                    fields.0.insert(rule.field, checked);
                }
                None => violations.push(Violation::new(rule.field, rule.location, rule.message)),
            },
        }
    }

    (fields, violations)
}

/// Lift string pairs (query string, path params) into a JSON map so they go
/// through the same rules as body fields.
pub fn string_source<'a, I>(pairs: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_owned(), Value::String(v.to_owned())))
        .collect()
}
