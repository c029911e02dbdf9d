use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the username. Optional on decode so that a token without
    /// a subject is reported as [`TokenError::MissingClaim`] rather than as malformed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default)]
    pub iat: i64,
}

/// Why a token was not accepted. Callers outside this module only ever see the uniform
/// `AppError::Unauthorized`; the variant is kept for logging.
#[derive(Debug)]
pub enum TokenError {
    /// Bad signature, malformed, wrong algorithm or expired.
    Invalid(jsonwebtoken::errors::Error),
    /// Signature and expiry were fine but there is no `sub` claim.
    MissingClaim,
    /// Signing failed.
    Encoding(String),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::Invalid(e) => write!(f, "Invalid token: {:?}", e.kind()),
            TokenError::MissingClaim => write!(f, "Token has no subject claim"),
            TokenError::Encoding(msg) => write!(f, "Token encoding failed: {}", msg),
        }
    }
}

impl std::error::Error for TokenError {}

/// Issues and verifies signed, time-bound bearer tokens.
///
/// Stateless: a token is a pure function of the secret, the subject and the clock, so
/// the service can be cloned freely across workers.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], algorithm: Algorithm, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            ttl,
        }
    }

    /// Generates a token whose subject is `subject`, expiring after the configured TTL.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: Some(subject.to_string()),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Checks signature, algorithm and expiry, then returns the subject claim.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)?;

        claims.sub.ok_or(TokenError::MissingClaim)
    }
}
