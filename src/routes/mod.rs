pub mod admin_routes;
pub mod application_routes;
pub mod auth_routes;
pub mod export;
pub mod health;
pub mod job_position_routes;
pub mod profile_routes;
pub mod upload;
pub mod wilaya_routes;
