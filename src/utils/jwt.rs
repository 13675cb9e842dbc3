use crate::config::get_config;
use crate::error::{Error, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ROLE_CANDIDATE: &str = "candidate";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

impl Claims {
    pub fn principal_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| Error::Unauthorized("Malformed token subject".to_string()))
    }
}

pub fn issue_token(subject: Uuid, role: &str) -> Result<String> {
    let config = get_config();
    let exp = chrono::Utc::now() + chrono::Duration::hours(config.token_ttl_hours);
    let claims = Claims {
        sub: subject.to_string(),
        role: role.to_string(),
        exp: exp.timestamp() as usize,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
}

pub fn decode_token(token: &str) -> Result<Claims> {
    let config = get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| Error::Unauthorized("Invalid token".to_string()))
}
