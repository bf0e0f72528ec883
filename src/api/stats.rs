//! Visitor statistics endpoints

use axum::{extract::Query, extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, AppResult};

use super::AuthenticatedUser;

/// Query parameters for visitor statistics
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema, Validate)]
pub struct VisitorStatsQuery {
    /// Year of the monthly series (default: current year)
    #[validate(range(min = 1, max = 9998))]
    pub year: Option<i32>,
}

/// Visits in one month of the requested year
#[derive(Serialize, ToSchema)]
pub struct MonthlyVisitorCount {
    /// Month number (1-12)
    pub month: i32,
    pub count: i64,
}

/// Visitor statistics response
#[derive(Serialize, ToSchema)]
pub struct VisitorStatsResponse {
    /// Visits today
    pub today: i64,
    /// Visits in the current month
    pub this_month: i64,
    /// Visits in the current year
    pub this_year: i64,
    /// Year of the monthly series
    pub year: i32,
    /// Visits per month of `year`, zero-filled
    pub monthly: Vec<MonthlyVisitorCount>,
}

/// Get visitor statistics
#[utoipa::path(
    get,
    path = "/stats/visitors",
    tag = "stats",
    security(("bearer_auth" = [])),
    params(VisitorStatsQuery),
    responses(
        (status = 200, description = "Visitor statistics", body = VisitorStatsResponse)
    )
)]
pub async fn get_visitor_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<VisitorStatsQuery>,
) -> AppResult<Json<VisitorStatsResponse>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let stats = state.services.stats.visitor_stats(query.year).await?;
    Ok(Json(stats))
}
