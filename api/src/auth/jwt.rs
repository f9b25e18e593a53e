//! JWT token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Token expired")]
    Expired,

    #[error("Token unsupported")]
    Unsupported,

    #[error("Token malformed")]
    Malformed,

    #[error("Bad signature")]
    BadSignature,
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidSignature => JwtError::BadSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => JwtError::Unsupported,
            _ => JwtError::Malformed,
        }
    }
}

/// A granted role, serialized as `{"authority": "ADMIN"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    pub authority: String,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<Authority>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.authority.clone()).collect()
    }
}

/// Signs and verifies tokens with a shared secret
pub struct JwtProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_ms: i64,
}

impl JwtProvider {
    pub fn new(secret: &str, expiration_ms: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration_ms,
        }
    }

    /// Issue a token for `email` holding a single role
    pub fn generate_token(&self, email: &str, role: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let exp = now + Duration::milliseconds(self.expiration_ms);

        let claims = Claims {
            sub: email.to_string(),
            roles: vec![Authority {
                authority: role.to_string(),
            }],
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            let err = JwtError::from(e);
            tracing::debug!(error = %err, "Token rejected");
            err
        })?;

        Ok(data.claims)
    }
}
