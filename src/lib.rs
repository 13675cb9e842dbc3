pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    application_service::ApplicationService, dashboard_service::DashboardService,
    identity_service::IdentityService, job_position_service::JobPositionService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub application_service: ApplicationService,
    pub identity_service: IdentityService,
    pub job_position_service: JobPositionService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let application_service = ApplicationService::new(pool.clone());
        let identity_service = IdentityService::new(pool.clone());
        let job_position_service = JobPositionService::new(pool.clone());
        let dashboard_service = DashboardService::new(pool.clone());

        Self {
            pool,
            application_service,
            identity_service,
            job_position_service,
            dashboard_service,
        }
    }
}
