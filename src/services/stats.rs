//! Visitor statistics service

use chrono::{Datelike, NaiveDate, Utc};
use sqlx::Row;

use crate::{
    api::stats::{MonthlyVisitorCount, VisitorStatsResponse},
    error::AppResult,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Visit counts for today, the current month, and the current year,
    /// plus a per-month series for the requested year.
    pub async fn visitor_stats(&self, year: Option<i32>) -> AppResult<VisitorStatsResponse> {
        let pool = &self.repository.pool;

        let today: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM visitors \
             WHERE visit_date >= DATE_TRUNC('day', NOW()) \
               AND visit_date < DATE_TRUNC('day', NOW()) + INTERVAL '1 day'",
        )
        .fetch_one(pool)
        .await?;

        let this_month: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM visitors \
             WHERE visit_date >= DATE_TRUNC('month', NOW()) \
               AND visit_date < DATE_TRUNC('month', NOW()) + INTERVAL '1 month'",
        )
        .fetch_one(pool)
        .await?;

        let this_year: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM visitors \
             WHERE visit_date >= DATE_TRUNC('year', NOW()) \
               AND visit_date < DATE_TRUNC('year', NOW()) + INTERVAL '1 year'",
        )
        .fetch_one(pool)
        .await?;

        // Per-month series; the year is validated at the API boundary
        let year = year.unwrap_or_else(|| Utc::now().year());
        let year_start = NaiveDate::from_ymd_opt(year, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_local_timezone(Utc)
            .unwrap();
        let year_end = NaiveDate::from_ymd_opt(year + 1, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_local_timezone(Utc)
            .unwrap();

        let rows = sqlx::query(
            "SELECT EXTRACT(MONTH FROM visit_date)::int AS month, COUNT(*) AS count \
             FROM visitors WHERE visit_date >= $1 AND visit_date < $2 \
             GROUP BY month ORDER BY month",
        )
        .bind(year_start)
        .bind(year_end)
        .fetch_all(pool)
        .await?;

        // One entry per month, zero-filled
        let mut monthly: Vec<MonthlyVisitorCount> = (1..=12)
            .map(|month| MonthlyVisitorCount { month, count: 0 })
            .collect();
        for row in rows {
            let month: i32 = row.get("month");
            let count: i64 = row.get("count");
            if let Some(entry) = monthly.get_mut((month - 1) as usize) {
                entry.count = count;
            }
        }

        Ok(VisitorStatsResponse {
            today,
            this_month,
            this_year,
            year,
            monthly,
        })
    }
}
