//! Visitors service

use crate::{
    error::AppResult,
    models::visitor::{CreateVisitor, UpdateVisitor, Visitor, VisitorQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct VisitorsService {
    repository: Repository,
}

impl VisitorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List visitors with filters and pagination
    pub async fn list(&self, query: &VisitorQuery) -> AppResult<(Vec<Visitor>, i64)> {
        self.repository.visitors.list(query).await
    }

    /// Get visitor by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Visitor> {
        self.repository.visitors.get_by_id(id).await
    }

    /// Register a visitor
    pub async fn create(&self, data: &CreateVisitor) -> AppResult<Visitor> {
        self.repository.visitors.create(data).await
    }

    /// Update a visitor record
    pub async fn update(&self, id: i32, data: &UpdateVisitor) -> AppResult<Visitor> {
        self.repository.visitors.update(id, data).await
    }

    /// Delete a visitor record
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.visitors.delete(id).await
    }
}
