use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::admin::Admin;
use crate::models::candidate::Candidate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupPayload {
    #[validate(length(min = 2))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl AuthUser {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            role: "candidate".to_string(),
        }
    }

    pub fn from_admin(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            name: admin.name.clone(),
            email: admin.email.clone(),
            role: admin.role.to_lowercase(),
        }
    }
}
