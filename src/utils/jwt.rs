//! Stateless bearer tokens.
//!
//! A token carries the identity and an absolute expiry, signed with HS256 using
//! a process-wide secret. Nothing is stored server-side; verification is a pure
//! function of the token bytes, the key and the clock reading.

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{AppError, AppResult};

/// Why a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("Token is malformed")]
    Malformed,
    #[error("Token signature is invalid")]
    InvalidSignature,
    #[error("Token has expired")]
    Expired,
}

/// The authenticated principal. There is a single capability level, so this
/// is all a protected handler learns about the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
}

/// JWT claims. `sub` holds the username, `uid` the numeric user id.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub uid: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

/// A freshly signed token together with its absolute expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Issues and verifies tokens with a fixed signing key and horizon.
///
/// The keys are read-only after construction, so one instance is shared
/// across all requests behind an `Arc`.
pub struct TokenAuthenticator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    horizon: SignedDuration,
}

impl TokenAuthenticator {
    pub fn new(secret: &str, horizon: SignedDuration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against an explicit clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            horizon,
        }
    }

    pub fn horizon(&self) -> SignedDuration {
        self.horizon
    }

    /// Issues a token for `identity` that expires one horizon from now.
    pub fn issue(&self, identity: &Identity) -> AppResult<IssuedToken> {
        self.issue_at(identity, Timestamp::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, identity: &Identity, now: Timestamp) -> AppResult<IssuedToken> {
        let expires_at = now.checked_add(self.horizon).map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Token expiry is out of range: {}", e),
        })?;

        let claims = Claims {
            sub: identity.username.clone(),
            uid: identity.user_id,
            iat: now.as_second(),
            exp: expires_at.as_second(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| AppError::Internal {
                source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
            },
        )?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verifies `token` against the current time.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthFailure> {
        self.verify_at(token, Timestamp::now())
    }

    /// Verifies `token` as if the current time were `now`.
    ///
    /// A token is expired at and after its `exp` second.
    pub fn verify_at(&self, token: &str, now: Timestamp) -> Result<Identity, AuthFailure> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    AuthFailure::InvalidSignature
                }
                ErrorKind::ExpiredSignature => AuthFailure::Expired,
                _ => AuthFailure::Malformed,
            }
        })?;

        if now.as_second() >= data.claims.exp {
            return Err(AuthFailure::Expired);
        }

        Ok(Identity {
            user_id: data.claims.uid,
            username: data.claims.sub,
        })
    }
}
