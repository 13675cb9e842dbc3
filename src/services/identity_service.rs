use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::admin_dto::CreateAdminPayload;
use crate::dto::auth_dto::{LoginPayload, SignupPayload};
use crate::dto::profile_dto::{ChangePasswordPayload, UpdateProfilePayload};
use crate::error::{Error, Result};
use crate::models::admin::{Admin, ADMIN_ROLES};
use crate::models::candidate::Candidate;
use crate::utils::crypto;

const CANDIDATE_COLUMNS: &str =
    "id, name, email, password_hash, phone, address, status, created_at, updated_at";
const ADMIN_COLUMNS: &str =
    "id, name, email, password_hash, role, status, created_at, updated_at";

#[derive(Clone)]
pub struct IdentityService {
    pool: PgPool,
}

impl IdentityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn signup_candidate(&self, payload: SignupPayload) -> Result<Candidate> {
        if payload.password != payload.confirm_password {
            return Err(Error::BadRequest("Passwords do not match".to_string()));
        }

        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM candidates WHERE email = $1")
                .bind(&payload.email)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Err(Error::Conflict("Email already registered".to_string()));
        }

        let password_hash = crypto::hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;

        let sql = format!(
            "INSERT INTO candidates (name, email, password_hash, status) \
             VALUES ($1, $2, $3, 'ACTIVE') RETURNING {}",
            CANDIDATE_COLUMNS
        );
        let candidate = sqlx::query_as::<_, Candidate>(&sql)
            .bind(&payload.name)
            .bind(&payload.email)
            .bind(&password_hash)
            .fetch_one(&self.pool)
            .await?;
        Ok(candidate)
    }

    /// Invalid email and invalid password are indistinguishable to the
    /// caller.
    pub async fn login_candidate(&self, payload: LoginPayload) -> Result<Candidate> {
        let sql = format!("SELECT {} FROM candidates WHERE email = $1", CANDIDATE_COLUMNS);
        let candidate = sqlx::query_as::<_, Candidate>(&sql)
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid credentials".to_string()))?;

        let valid = crypto::verify_password(&payload.password, &candidate.password_hash)
            .map_err(|e| Error::Internal(format!("Failed to verify password: {}", e)))?;
        if !valid {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        }
        if candidate.status != "ACTIVE" {
            return Err(Error::Unauthorized("Account is inactive".to_string()));
        }
        Ok(candidate)
    }

    pub async fn login_admin(&self, payload: LoginPayload) -> Result<Admin> {
        let sql = format!("SELECT {} FROM admins WHERE email = $1", ADMIN_COLUMNS);
        let admin = sqlx::query_as::<_, Admin>(&sql)
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid credentials".to_string()))?;

        let valid = crypto::verify_password(&payload.password, &admin.password_hash)
            .map_err(|e| Error::Internal(format!("Failed to verify password: {}", e)))?;
        if !valid {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        }
        match admin.status.as_str() {
            "ACTIVE" => Ok(admin),
            "PENDING" => Err(Error::Unauthorized(
                "Account is pending approval".to_string(),
            )),
            _ => Err(Error::Unauthorized("Account is inactive".to_string())),
        }
    }

    pub async fn create_admin(&self, payload: CreateAdminPayload) -> Result<Admin> {
        if !ADMIN_ROLES.contains(&payload.role.as_str()) {
            return Err(Error::BadRequest(
                "Invalid role. Must be either RH or DRH".to_string(),
            ));
        }

        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM admins WHERE email = $1")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(Error::Conflict("Email already exists".to_string()));
        }

        let password_hash = crypto::hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;

        let sql = format!(
            "INSERT INTO admins (name, email, password_hash, role, status) \
             VALUES ($1, $2, $3, $4, 'ACTIVE') RETURNING {}",
            ADMIN_COLUMNS
        );
        let admin = sqlx::query_as::<_, Admin>(&sql)
            .bind(&payload.name)
            .bind(&payload.email)
            .bind(&password_hash)
            .bind(&payload.role)
            .fetch_one(&self.pool)
            .await?;
        Ok(admin)
    }

    pub async fn list_admins(&self) -> Result<Vec<Admin>> {
        let sql = format!("SELECT {} FROM admins ORDER BY created_at DESC", ADMIN_COLUMNS);
        let admins = sqlx::query_as::<_, Admin>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(admins)
    }

    pub async fn count_admins(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn get_candidate(&self, id: Uuid) -> Result<Candidate> {
        let sql = format!("SELECT {} FROM candidates WHERE id = $1", CANDIDATE_COLUMNS);
        sqlx::query_as::<_, Candidate>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Profile not found".to_string()))
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        payload: UpdateProfilePayload,
    ) -> Result<Candidate> {
        if let Some(name) = payload.name.as_deref() {
            if name.len() < 2 {
                return Err(Error::BadRequest(
                    "Name must be at least 2 characters long".to_string(),
                ));
            }
        }
        if let Some(phone) = payload.phone.as_deref() {
            if !is_valid_phone(phone) {
                return Err(Error::BadRequest(
                    "Invalid phone number format".to_string(),
                ));
            }
        }

        let sql = format!(
            "UPDATE candidates SET name = COALESCE($2, name), phone = COALESCE($3, phone), \
             address = COALESCE($4, address), updated_at = NOW() WHERE id = $1 RETURNING {}",
            CANDIDATE_COLUMNS
        );
        sqlx::query_as::<_, Candidate>(&sql)
            .bind(id)
            .bind(payload.name)
            .bind(payload.phone)
            .bind(payload.address)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Profile not found".to_string()))
    }

    pub async fn change_password(&self, id: Uuid, payload: ChangePasswordPayload) -> Result<()> {
        let candidate = self.get_candidate(id).await?;

        let valid = crypto::verify_password(&payload.current_password, &candidate.password_hash)
            .map_err(|e| Error::Internal(format!("Failed to verify password: {}", e)))?;
        if !valid {
            return Err(Error::Unauthorized(
                "Current password is incorrect".to_string(),
            ));
        }

        let password_hash = crypto::hash_password(&payload.new_password)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;
        sqlx::query("UPDATE candidates SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(&password_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Optional leading +, then at least eight digits, spaces, or dashes.
fn is_valid_phone(phone: &str) -> bool {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    rest.len() >= 8
        && !rest.is_empty()
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_format() {
        assert!(is_valid_phone("0550123456"));
        assert!(is_valid_phone("+213 550 12 34 56"));
        assert!(is_valid_phone("0550-12-34-56"));
        assert!(!is_valid_phone("call me"));
        assert!(!is_valid_phone("12345"));
    }
}
