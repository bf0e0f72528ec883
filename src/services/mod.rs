//! Business logic services

pub mod auth;
pub mod stats;
pub mod visitors;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub visitors: visitors::VisitorsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(auth_config),
            visitors: visitors::VisitorsService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}
