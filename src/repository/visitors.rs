//! Visitors repository

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::visitor::{CreateVisitor, UpdateVisitor, Visitor, VisitorQuery},
    schema,
};

#[derive(Clone)]
pub struct VisitorsRepository {
    pool: Pool<Postgres>,
}

impl VisitorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List visitors with optional filters and pagination
    pub async fn list(&self, query: &VisitorQuery) -> AppResult<(Vec<Visitor>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(50);
        let offset = (page - 1) * per_page;

        // Parse dates once; invalid values are ignored like any other
        // unrecognized filter
        let start = query
            .start_date
            .as_ref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .map(|d| d.and_hms_opt(0, 0, 0).unwrap().and_local_timezone(Utc).unwrap());
        let end = query
            .end_date
            .as_ref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .and_then(|d| d.succ_opt())
            .map(|d| d.and_hms_opt(0, 0, 0).unwrap().and_local_timezone(Utc).unwrap());

        let mut conditions = Vec::new();
        let mut idx = 1;

        if start.is_some() {
            conditions.push(format!("visit_date >= ${}", idx));
            idx += 1;
        }
        if end.is_some() {
            conditions.push(format!("visit_date < ${}", idx));
            idx += 1;
        }
        if query.department.is_some() {
            conditions.push(format!("department = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        // Count total
        let count_q = format!("SELECT COUNT(*) FROM visitors {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_q);
        if let Some(sd) = start {
            count_builder = count_builder.bind(sd);
        }
        if let Some(ed) = end {
            count_builder = count_builder.bind(ed);
        }
        if let Some(ref dep) = query.department {
            count_builder = count_builder.bind(dep);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        // Fetch rows
        let select_q = format!(
            "SELECT {} FROM visitors {} ORDER BY visit_date DESC, id DESC LIMIT {} OFFSET {}",
            schema::select_columns(),
            where_clause,
            per_page,
            offset
        );
        let mut builder = sqlx::query_as::<_, Visitor>(&select_q);
        if let Some(sd) = start {
            builder = builder.bind(sd);
        }
        if let Some(ed) = end {
            builder = builder.bind(ed);
        }
        if let Some(ref dep) = query.department {
            builder = builder.bind(dep);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok((rows, total))
    }

    /// Get visitor by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Visitor> {
        let query = format!(
            "SELECT {} FROM visitors WHERE {} = $1",
            schema::select_columns(),
            schema::primary_key().column
        );
        sqlx::query_as::<_, Visitor>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Visitor {} not found", id)))
    }

    /// Register a visitor
    pub async fn create(&self, data: &CreateVisitor) -> AppResult<Visitor> {
        let columns = schema::insert_columns();
        let placeholders = (1..=columns.len())
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "INSERT INTO visitors ({}) VALUES ({}) RETURNING {}",
            columns.join(", "),
            placeholders,
            schema::select_columns()
        );

        // Bind order follows the field table
        let row = sqlx::query_as::<_, Visitor>(&query)
            .bind(data.name.as_deref().unwrap_or(""))
            .bind(data.gender.as_deref().unwrap_or(""))
            .bind(data.purpose.as_deref().unwrap_or(""))
            .bind(data.address.as_deref().unwrap_or(""))
            .bind(data.institution.as_deref().unwrap_or(""))
            .bind(data.phone.as_deref().unwrap_or(""))
            .bind(data.department.as_deref().unwrap_or(""))
            .bind(data.visit_date.unwrap_or_else(schema::zero_datetime))
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    /// Update a visitor; `id` and `created_at` are never touched
    pub async fn update(&self, id: i32, data: &UpdateVisitor) -> AppResult<Visitor> {
        let mut sets = Vec::new();
        let mut idx = 1;

        macro_rules! add_f {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_f!(data.name, "name");
        add_f!(data.gender, "gender");
        add_f!(data.purpose, "purpose");
        add_f!(data.address, "address");
        add_f!(data.institution, "institution");
        add_f!(data.phone, "phone");
        add_f!(data.department, "department");
        add_f!(data.visit_date, "visit_date");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE visitors SET {} WHERE id = ${} RETURNING {}",
            sets.join(", "),
            idx,
            schema::select_columns()
        );

        let mut builder = sqlx::query_as::<_, Visitor>(&query);

        macro_rules! bind_f {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_f!(data.name);
        bind_f!(data.gender);
        bind_f!(data.purpose);
        bind_f!(data.address);
        bind_f!(data.institution);
        bind_f!(data.phone);
        bind_f!(data.department);
        if let Some(vd) = data.visit_date {
            builder = builder.bind(vd);
        }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Visitor {} not found", id)))
    }

    /// Delete a visitor record
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM visitors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Visitor {} not found", id)));
        }
        Ok(())
    }
}
