//! Error types.

use crate::generator::MAX_LABEL_LEN;
use axum::extract::rejection::JsonRejection;

/// Error enumerates the possible dyndash error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a requested main domain is not a member of the
    /// configured allowlist. Membership is exact and case-sensitive.
    #[error("main domain \"{0}\" is not in the allowed list")]
    InvalidDomain(String),

    /// Returned when a custom subdomain label is empty, either as supplied
    /// or after normalization stripped every character.
    #[error("subdomain label is empty or contains only invalid characters")]
    EmptyLabel,

    /// Returned when a normalized custom label exceeds the DNS label limit
    /// of 63 characters.
    #[error("subdomain label is too long ({0} characters, max {MAX_LABEL_LEN})")]
    LabelTooLong(usize),

    /// Returned when a DNS record type is not one of the supported kinds
    /// (A, TXT, MX, SPF).
    #[error("unsupported DNS record type \"{0}\"")]
    UnsupportedRecordType(String),

    /// Returned when a request carries no session token, an invalid or
    /// expired one, or one naming a user that no longer exists.
    #[error("not authenticated")]
    Unauthorized,

    /// Returned on login with an unknown username or a wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Returned on registration when the username is already taken.
    #[error("username \"{0}\" already exists")]
    UserExists(String),

    /// Returned when an account id does not exist or belongs to another user.
    #[error("account {0} not found")]
    AccountNotFound(u64),

    /// Returned when clients `POST` invalid JSON.
    #[error(transparent)]
    JsonExtractorRejection(#[from] JsonRejection),

    /// Returned when the configuration file fails validation after parsing.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Returned when minting or verifying a session token fails.
    #[error("session token error")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Returned when a request to the DNS provider API fails at the
    /// transport level. Provider-side rejections of individual names are
    /// reported as per-name outcomes, not as this error.
    #[error("DNS provider request failed")]
    Provider(#[from] reqwest::Error),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when processing JSON from disk (e.g. trying to load a
    /// [`Config`][crate::config::Config], or the store state file) fails due
    /// to invalid content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}
