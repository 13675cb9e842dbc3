pub mod admin;
pub mod application;
pub mod candidate;
pub mod education;
pub mod job_position;
pub mod wilaya;
