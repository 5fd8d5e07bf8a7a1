//! Custom Axum extractors
//!
//! Framework rejections are turned into validation errors so every 400 the
//! service sends has the same `{"errors": [...]}` shape.

use std::collections::HashMap;

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::{Form, Json};
use serde_json::{Map, Value};

use super::error::ApiError;
use crate::models::rules;
use crate::models::{Location, SchoolId, ValidationErrors, Violation};

fn body_violation(message: impl Into<String>) -> ApiError {
    ApiError::Validation(ValidationErrors::single(Violation::new(
        "body",
        Location::Body,
        message,
    )))
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"))
}

/// Request body as a field map.
///
/// A JSON body must be an object. A form-encoded body becomes string values,
/// which the numeric rules parse the same way as numeric JSON strings.
pub struct BodyObject(pub Map<String, Value>);

impl<S> FromRequest<S> for BodyObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(pairs) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|rejection| body_violation(rejection.body_text()))?;
            let source = rules::string_source(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            return Ok(Self(source));
        }

        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| body_violation(rejection.body_text()))?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(body_violation("Request body must be a JSON object")),
        }
    }
}

/// Query string as raw key/value pairs, checked later by a rule set
pub struct QueryParams(pub HashMap<String, String>);

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiError::Validation(ValidationErrors::single(Violation::new(
                    "query",
                    Location::Query,
                    rejection.body_text(),
                )))
            })?;
        Ok(Self(params))
    }
}

fn invalid_id() -> ApiError {
    ApiError::Validation(ValidationErrors::single(Violation::new(
        "id",
        Location::Params,
        "School ID must be an integer",
    )))
}

/// The unparsed `{id}` path segment
pub struct RawId(pub String);

impl<S> FromRequestParts<S> for RawId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid_id())?;
        Ok(Self(id))
    }
}

/// Extract and validate a school id from path
pub struct ValidSchoolId(pub SchoolId);

impl<S> FromRequestParts<S> for ValidSchoolId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RawId(raw) = RawId::from_request_parts(parts, state).await?;
        Ok(Self(SchoolId::from_path(&raw)?))
    }
}
