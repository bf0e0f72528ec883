//! Visitor record models

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::schema;

/// One logged visit to the facility.
///
/// A plain value object: its JSON forms and column mapping live in
/// [`crate::schema`], not on the type.
#[derive(Debug, Clone, PartialEq, FromRow, ToSchema)]
pub struct Visitor {
    pub id: i32,
    /// Visitor's full name
    pub name: String,
    pub gender: String,
    /// Reason for the visit
    pub purpose: String,
    pub address: String,
    /// Affiliated organization
    pub institution: String,
    pub phone: String,
    /// Department visited within the facility
    pub department: String,
    /// When the visit takes place; independent of `created_at`
    pub visit_date: DateTime<Utc>,
    /// Record-creation timestamp, assigned by the database
    pub created_at: DateTime<Utc>,
}

impl Default for Visitor {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            gender: String::new(),
            purpose: String::new(),
            address: String::new(),
            institution: String::new(),
            phone: String::new(),
            department: String::new(),
            visit_date: schema::zero_datetime(),
            created_at: schema::zero_datetime(),
        }
    }
}

/// Create visitor request. Every field is optional; absent fields take
/// their zero values. `id` and `created_at` are assigned by the server.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateVisitor {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub purpose: Option<String>,
    pub address: Option<String>,
    pub institution: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    /// Visit date-time (RFC 3339)
    #[serde(rename = "visitDate")]
    pub visit_date: Option<DateTime<Utc>>,
}

/// Update visitor request; only the provided fields change
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateVisitor {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub purpose: Option<String>,
    pub address: Option<String>,
    pub institution: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    /// Visit date-time (RFC 3339)
    #[serde(rename = "visitDate")]
    pub visit_date: Option<DateTime<Utc>>,
}

/// Query parameters for listing visitors
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema, Validate)]
pub struct VisitorQuery {
    /// Visits from this day (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Visits until this day, inclusive (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Filter by department visited
    pub department: Option<String>,
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Items per page
    #[validate(range(min = 1, max = 1000))]
    pub per_page: Option<i64>,
    /// Wire-schema version of the response (1 or 2, default 2)
    pub schema_version: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_visitor_has_zero_values() {
        let v = Visitor::default();
        assert_eq!(v.id, 0);
        assert_eq!(v.name, "");
        assert_eq!(v.department, "");
        assert_eq!(v.visit_date, schema::zero_datetime());
        assert_eq!(v.created_at, schema::zero_datetime());
    }

    #[test]
    fn create_visitor_accepts_camel_case_visit_date() {
        let data: CreateVisitor = serde_json::from_value(serde_json::json!({
            "name": "Budi Santoso",
            "visitDate": "2024-03-15T09:30:00Z",
        }))
        .unwrap();
        assert_eq!(data.name.as_deref(), Some("Budi Santoso"));
        assert_eq!(
            data.visit_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap())
        );
        assert!(data.gender.is_none());
    }

    #[test]
    fn create_visitor_all_fields_optional() {
        let data: CreateVisitor = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(data.name.is_none());
        assert!(data.visit_date.is_none());
    }

    #[test]
    fn visitor_query_rejects_oversized_page() {
        let query = VisitorQuery {
            per_page: Some(5000),
            ..Default::default()
        };
        assert!(query.validate().is_err());

        let query = VisitorQuery {
            per_page: Some(50),
            ..Default::default()
        };
        assert!(query.validate().is_ok());
    }
}
