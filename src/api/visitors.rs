//! Visitors API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::visitor::{CreateVisitor, UpdateVisitor, VisitorQuery},
    schema::{self, SchemaVersion},
};

use super::AuthenticatedUser;

/// Paginated visitors response
#[derive(Serialize, ToSchema)]
pub struct VisitorsListResponse {
    /// Visitor records in the requested wire-schema version
    #[schema(value_type = Vec<Object>)]
    pub visitors: Vec<Value>,
    pub total: i64,
    /// Wire-schema version of the records
    pub schema_version: u8,
}

/// Query parameters selecting the wire-schema version
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct VersionQuery {
    /// Wire-schema version of the response (1 or 2, default 2)
    pub schema_version: Option<u8>,
}

fn resolve_version(requested: Option<u8>) -> AppResult<SchemaVersion> {
    match requested {
        None => Ok(SchemaVersion::CURRENT),
        Some(n) => SchemaVersion::from_number(n)
            .ok_or_else(|| AppError::Validation(format!("Unknown schema version {}", n))),
    }
}

/// List visitors with filters and pagination
#[utoipa::path(
    get,
    path = "/visitors",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(VisitorQuery),
    responses(
        (status = 200, description = "Visitors list", body = VisitorsListResponse)
    )
)]
pub async fn list_visitors(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<VisitorQuery>,
) -> AppResult<Json<VisitorsListResponse>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let version = resolve_version(query.schema_version)?;

    let (visitors, total) = state.services.visitors.list(&query).await?;
    let visitors = visitors
        .iter()
        .map(|v| schema::encode(v, version))
        .collect();

    Ok(Json(VisitorsListResponse {
        visitors,
        total,
        schema_version: version.number(),
    }))
}

/// Get visitor by ID
#[utoipa::path(
    get,
    path = "/visitors/{id}",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Visitor ID"),
        VersionQuery
    ),
    responses(
        (status = 200, description = "Visitor record in the requested wire-schema version"),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn get_visitor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Query(query): Query<VersionQuery>,
) -> AppResult<Json<Value>> {
    let version = resolve_version(query.schema_version)?;
    let visitor = state.services.visitors.get_by_id(id).await?;
    Ok(Json(schema::encode(&visitor, version)))
}

/// Register a visitor
#[utoipa::path(
    post,
    path = "/visitors",
    tag = "visitors",
    security(("bearer_auth" = [])),
    request_body = CreateVisitor,
    responses(
        (status = 201, description = "Visitor registered")
    )
)]
pub async fn create_visitor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateVisitor>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let visitor = state.services.visitors.create(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(schema::encode(&visitor, SchemaVersion::CURRENT)),
    ))
}

/// Update a visitor record
#[utoipa::path(
    put,
    path = "/visitors/{id}",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Visitor ID")),
    request_body = UpdateVisitor,
    responses(
        (status = 200, description = "Visitor updated"),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn update_visitor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateVisitor>,
) -> AppResult<Json<Value>> {
    let visitor = state.services.visitors.update(id, &data).await?;
    Ok(Json(schema::encode(&visitor, SchemaVersion::CURRENT)))
}

/// Delete a visitor record
#[utoipa::path(
    delete,
    path = "/visitors/{id}",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Visitor ID")),
    responses(
        (status = 204, description = "Visitor deleted"),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn delete_visitor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.visitors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
