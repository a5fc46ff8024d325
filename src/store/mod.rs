//! User and account storage.
//!
//! Users own zero or more provider accounts, each holding a name and a Dynu
//! API key. Every account read or delete is scoped to the owning user, so a
//! valid session can never touch another user's credentials.
//!
//! Two implementations are provided, [`memory::InMemoryStore`] and
//! [`file::FileStore`]. The former is not durable across restarts. The latter
//! writes its state to a JSON file after each mutation and loads this state
//! again on startup.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::RwLock;

pub mod file;
pub mod memory;

#[allow(clippy::module_name_repetitions)]
pub use file::FileStore;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryStore;

/// `DynStore` is a type alias for a [`Store`] that can be used by multiple
/// read/write consumers that coordinate through an [`Arc`] and a [`RwLock`]
/// wrapping the [`Store`].
#[allow(clippy::module_name_repetitions)]
pub type DynStore = Arc<RwLock<dyn Store + Send + Sync>>;

/// A registered user. The password is stored only in hashed form.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub password_hash: String,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub created_at: OffsetDateTime,
}

/// A set of DNS provider credentials registered by a user.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: u64,
    pub user_id: u64,
    pub name: String,
    pub api_key: String,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub created_at: OffsetDateTime,
}

/// An async trait describing storage of users and their provider accounts.
#[async_trait::async_trait]
pub trait Store {
    /// Create a user with the given (already hashed) password.
    ///
    /// Fails with [`Error::UserExists`] when the username is taken. The
    /// uniqueness check is exact and case-sensitive.
    async fn add_user(&mut self, username: &str, password_hash: &str) -> Result<User, Error>;

    /// Look up a user by exact username.
    async fn user_by_username(&self, username: &str) -> Option<User>;

    /// Register provider credentials under the given user.
    async fn add_account(
        &mut self,
        user_id: u64,
        name: &str,
        api_key: &str,
    ) -> Result<Account, Error>;

    /// All accounts belonging to the user, in id order.
    async fn accounts_for_user(&self, user_id: u64) -> Vec<Account>;

    /// One account, only if it belongs to the user.
    async fn account_for_user(&self, user_id: u64, account_id: u64) -> Option<Account>;

    /// Delete an account, only if it belongs to the user.
    ///
    /// Fails with [`Error::AccountNotFound`] otherwise.
    async fn remove_account(&mut self, user_id: u64, account_id: u64) -> Result<(), Error>;
}
