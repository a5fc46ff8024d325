//! Password hashing and session tokens.
//!
//! Passwords are stored as `hex(salt)$hex(sha256(salt || password))` with a
//! fresh random 16-byte salt per user. Sessions are HS256 JWTs carrying the
//! username as subject and an absolute expiry; the signing secret comes from
//! [`Config::session_secret`][crate::config::Config::session_secret].

use crate::error::Error;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::Duration;
use time::OffsetDateTime;

const SALT_LEN: usize = 16;

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username the session was issued for.
    pub sub: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash a password with a fresh random salt.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    format!("{}${}", hex::encode(salt), digest(&salt, password))
}

/// Check a password against a stored `salt$digest` hash. Malformed stored
/// values verify as false rather than erroring.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, expected)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    digest(&salt, password) == expected
}

/// Mint a session token for `username`, valid for `ttl` from now.
///
/// # Errors
///
/// Returns [`Error::Token`] if JWT encoding fails.
pub fn issue_token(username: &str, secret: &[u8], ttl: Duration) -> Result<String, Error> {
    let claims = Claims {
        sub: username.to_string(),
        exp: (OffsetDateTime::now_utc() + ttl).unix_timestamp(),
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )?)
}

/// Verify a session token and return its claims. A leading `Bearer ` prefix
/// is tolerated, matching the cookie value set on login.
///
/// # Errors
///
/// Returns [`Error::Token`] for expired, tampered, or malformed tokens.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<Claims, Error> {
    let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
