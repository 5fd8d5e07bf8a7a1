//! School endpoints
//!
//! Every handler validates first, then makes exactly one repository call.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{BodyObject, QueryParams, RawId, ValidSchoolId};
use crate::http::server::AppState;
use crate::models::{NewSchool, ReferencePoint, School, SchoolId, UpdateSchool};
use crate::proximity::sort_by_distance;

/// Plain acknowledgement body
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Body returned after an insert
#[derive(Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: SchoolId,
}

/// POST /schools/addSchool - insert a school
async fn add_school(
    State(state): State<Arc<AppState>>,
    BodyObject(body): BodyObject,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let school = NewSchool::from_body(&body)?;
    let id = state.store.create(school).await?;
    tracing::info!(%id, "school added");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "School added successfully!",
            id,
        }),
    ))
}

/// GET /schools/listSchools?latitude=..&longitude=.. - all schools, nearest first
async fn list_schools(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams,
) -> Result<Json<Vec<School>>, ApiError> {
    let reference = ReferencePoint::from_query(&query)?;
    let schools = state.store.list_all().await?;

    Ok(Json(sort_by_distance(schools, reference)))
}

/// PUT /schools/updateSchool/{id} - write the supplied fields
async fn update_school(
    State(state): State<Arc<AppState>>,
    RawId(raw_id): RawId,
    BodyObject(body): BodyObject,
) -> Result<Json<MessageResponse>, ApiError> {
    let update = UpdateSchool::parse(&raw_id, &body)?;
    if update.id_mismatch() {
        return Err(ApiError::IdMismatch { path: update.id });
    }

    let affected = state.store.update_partial(update.id, &update.patch).await?;
    if affected == 0 {
        return Err(ApiError::NotFound(update.id));
    }
    tracing::info!(id = %update.id, "school updated");

    Ok(Json(MessageResponse {
        message: "School updated successfully!",
    }))
}

/// DELETE /schools/deleteSchool/{id}
async fn delete_school(
    State(state): State<Arc<AppState>>,
    ValidSchoolId(id): ValidSchoolId,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = state.store.delete(id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound(id));
    }
    tracing::info!(%id, "school deleted");

    Ok(Json(MessageResponse {
        message: "School deleted successfully!",
    }))
}

/// School routes, mounted under `/schools`
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/addSchool", post(add_school))
        .route("/listSchools", get(list_schools))
        .route("/updateSchool/{id}", put(update_school))
        .route("/deleteSchool/{id}", delete(delete_school))
}
