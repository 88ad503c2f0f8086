use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Global cached JwtService instance
static JWT_SERVICE: OnceLock<JwtService> = OnceLock::new();

/// Get the cached JwtService instance
///
/// Uses OnceLock for thread-safe lazy initialization; the service is built
/// once from config and reused for all requests.
pub fn get_jwt_service() -> &'static JwtService {
    JWT_SERVICE.get_or_init(JwtService::from_config)
}

/// Admin session claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// User id
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// JWT service for admin session tokens
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_days: u64,
}

impl JwtService {
    pub fn new(secret: &str, token_days: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_days,
        }
    }

    /// Create JwtService from config
    ///
    /// An empty secret gets replaced with a random one, which invalidates
    /// sessions across restarts but never runs with a guessable key.
    pub fn from_config() -> Self {
        let config = crate::config::get_config();

        let jwt_secret = if config.api.jwt_secret.is_empty() {
            use tracing::warn;
            warn!("JWT secret not configured, generating secure random token");
            crate::utils::generate_secure_token(32)
        } else {
            config.api.jwt_secret.clone()
        };

        Self::new(&jwt_secret, config.api.token_days)
    }

    pub fn token_days(&self) -> u64 {
        self.token_days
    }

    /// Generate a session token for an authenticated admin
    pub fn generate_session_token(
        &self,
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = AdminClaims {
            sub: user_id.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(self.token_days as i64)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Validate a session token and return its claims
    pub fn validate_session_token(
        &self,
        token: &str,
    ) -> Result<AdminClaims, jsonwebtoken::errors::Error> {
        let token_data = decode::<AdminClaims>(token, &self.decoding_key, &Validation::default())?;

        if token_data.claims.role != "ADMIN" {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }

        Ok(token_data.claims)
    }
}
