//! School record and the validated request shapes that lead to it

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::rules::{self, Fields};
use super::validation::{Location, ValidationErrors, Violation};

/// Keys accepted in an update body. `id` is only compared against the path.
const UPDATABLE_KEYS: &[&str] = &["id", "name", "address", "latitude", "longitude"];

/// Persisted school row
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct School {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Storage-assigned school id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SchoolId(pub i32);

impl SchoolId {
    /// Parse the `{id}` path segment.
    pub fn from_path(raw: &str) -> Result<Self, ValidationErrors> {
        let source = rules::string_source([("id", raw)]);
        let (fields, violations) = rules::apply(rules::DELETE_SCHOOL_PARAMS, &source);
        ValidationErrors::into_result(violations)?;
        // apply() only leaves a value behind when the Integer rule passed
        fields.int("id").map(Self).ok_or_else(|| {
            ValidationErrors::single(Violation::new(
                "id",
                Location::Params,
                "School ID must be an integer",
            ))
        })
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A school that has passed the add rules and has no id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewSchool {
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let (mut fields, violations) = rules::apply(rules::ADD_SCHOOL, body);
        ValidationErrors::into_result(violations)?;

        match (
            fields.text("name"),
            fields.text("address"),
            fields.float("latitude"),
            fields.float("longitude"),
        ) {
            (Some(name), Some(address), Some(latitude), Some(longitude)) => Ok(Self {
                name,
                address,
                latitude,
                longitude,
            }),
            _ => Err(ValidationErrors::single(Violation::new(
                "body",
                Location::Body,
                "Request body is incomplete",
            ))),
        }
    }
}

/// The subset of columns an update writes. At least one is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchoolPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl SchoolPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }

    fn from_fields(mut fields: Fields) -> Self {
        Self {
            name: fields.text("name"),
            address: fields.text("address"),
            latitude: fields.float("latitude"),
            longitude: fields.float("longitude"),
        }
    }

    /// Copy the supplied fields onto an existing record.
    pub fn apply_to(&self, school: &mut School) {
        if let Some(name) = &self.name {
            school.name = name.clone();
        }
        if let Some(address) = &self.address {
            school.address = address.clone();
        }
        if let Some(latitude) = self.latitude {
            school.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            school.longitude = longitude;
        }
    }
}

/// A fully validated update request
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSchool {
    pub id: SchoolId,
    pub patch: SchoolPatch,
    /// `id` echoed in the body, if any. Must match the path id.
    pub body_id: Option<Value>,
}

impl UpdateSchool {
    pub fn parse(raw_id: &str, body: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let path = rules::string_source([("id", raw_id)]);
        let (params, mut violations) = rules::apply(rules::UPDATE_SCHOOL_PARAMS, &path);
        let (fields, body_violations) = rules::apply(rules::UPDATE_SCHOOL_BODY, body);
        violations.extend(body_violations);

        for key in body.keys() {
            if !UPDATABLE_KEYS.contains(&key.as_str()) {
                violations.push(Violation::new(
                    key.as_str(),
                    Location::Body,
                    format!("Unknown field '{}'", key),
                ));
            }
        }

        let patch = SchoolPatch::from_fields(fields);
        if violations.is_empty() && patch.is_empty() {
            violations.push(Violation::new(
                "body",
                Location::Body,
                "At least one of name, address, latitude or longitude must be provided",
            ));
        }
        ValidationErrors::into_result(violations)?;

        let id = params.int("id").map(SchoolId).ok_or_else(|| {
            ValidationErrors::single(Violation::new(
                "id",
                Location::Params,
                "School ID must be an integer",
            ))
        })?;

        Ok(Self {
            id,
            patch,
            body_id: body.get("id").filter(|v| !v.is_null()).cloned(),
        })
    }

    /// True when the body carries an `id` that names a different record.
    ///
    /// Numeric strings compare by value, anything non-numeric never matches.
    pub fn id_mismatch(&self) -> bool {
        let Some(body_id) = &self.body_id else {
            return false;
        };
        let parsed = match body_id {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed != Some(f64::from(self.id.0))
    }
}

/// Caller-supplied coordinate that listings are ordered around
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl ReferencePoint {
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, ValidationErrors> {
        let source = rules::string_source(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        let (fields, violations) = rules::apply(rules::LIST_SCHOOLS, &source);
        ValidationErrors::into_result(violations)?;

        match (fields.float("latitude"), fields.float("longitude")) {
            (Some(latitude), Some(longitude)) => Ok(Self {
                latitude,
                longitude,
            }),
            _ => Err(ValidationErrors::single(Violation::new(
                "latitude",
                Location::Query,
                "Latitude is required and must be a valid number",
            ))),
        }
    }
}
