//! Login session tokens.
//!
//! A session is a signed HS256 bearer token. Logging out records the token's
//! `jti` in an in-memory revocation list until the token would have expired
//! anyway, so revoked tokens are rejected even though their signature is
//! still valid.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{User, UserRole};
use crate::error::{AppError, ErrorCode};

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub role: UserRole,
    /// Unique token id, the revocation key.
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Parses the subject as a user id.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues, verifies and revokes session tokens.
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
    /// Revoked `jti` mapped to the token's `exp`.
    revoked: DashMap<String, i64>,
}

impl AuthService {
    /// Creates a service signing with `secret`; tokens live `token_ttl_seconds`.
    pub fn new(secret: &str, token_ttl_seconds: u64) -> Self {
        let ttl = i64::try_from(token_ttl_seconds).unwrap_or(i64::MAX);
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
            token_ttl: Duration::try_seconds(ttl).unwrap_or(Duration::MAX),
            revoked: DashMap::new(),
        }
    }

    /// Signs a new session token for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue(&self, user: &User) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.token_ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let claims = Claims {
            sub: user.id.to_string(),
            role: user.user_role,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("failed to sign session token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verifies signature, expiry and revocation.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::NotLoginError`] if the token is malformed, forged,
    /// expired or revoked.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "rejected session token");
                AppError::business(ErrorCode::NotLoginError)
            })?
            .claims;

        if self.is_revoked(&claims.jti) {
            return Err(AppError::business(ErrorCode::NotLoginError));
        }

        Ok(claims)
    }

    /// Revokes the token described by `claims` and prunes expired entries.
    pub fn revoke(&self, claims: &Claims) {
        let now = Utc::now().timestamp();
        self.revoked.retain(|_, exp| *exp > now);
        self.revoked.insert(claims.jti.clone(), claims.exp);
    }

    pub fn is_revoked(&self, jti: &str) -> bool {
        self.revoked.contains_key(jti)
    }
}
