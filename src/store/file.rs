//! A JSON file-backed implementation of the [`Store`][super::Store] trait.
//!
//! Wraps an [`InMemoryStore`][super::memory::InMemoryStore] instance,
//! persisting updates to a JSON file on disk that can be reloaded across
//! restarts.
use crate::error::Error;
use crate::store::memory::InMemoryStore;
use crate::store::{Account, Store, User};
use std::io::ErrorKind;
use tokio::fs::File;
use tokio::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// A file-backed implementation of the user/account store. After each
/// mutation the JSON file on disk is updated with the new data. This file is
/// reloaded across restarts to avoid losing state.
///
/// Wraps an [`InMemoryStore`][super::memory::InMemoryStore], operating the
/// same way except for maintaining state beyond in-memory.
#[derive(Default, Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct FileStore {
    store: InMemoryStore,
    path: String,
}

impl FileStore {
    /// Save the state of the store as JSON to the configured path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJSON`] if the state can't be serialized, or
    /// [`Error::IO`] if it can't be written to the backing file path.
    pub async fn save(&self) -> Result<(), Error> {
        let data = serde_json::to_string_pretty(&self.store)?;
        let mut output_file = File::create(&self.path).await?;
        output_file.write_all(data.as_bytes()).await?;
        output_file.flush().await?;
        Ok(())
    }

    /// Load a [`FileStore`] from the JSON state located at the given path. A
    /// missing file is created with empty state rather than treated as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJSON`] if the JSON state file is invalid, or
    /// [`Error::IO`] if the path can't be opened or read.
    pub async fn try_from_file(p: &str) -> Result<Self, Error> {
        let contents = match File::open(p).await {
            Ok(mut f) => {
                let mut buf = vec![];
                f.read_to_end(&mut buf).await?;
                buf
            }
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Self::write_empty_state(File::create(&p).await?).await?,
                _ => return Err(Error::IO(err)),
            },
        };

        let store: InMemoryStore = serde_json::from_slice(&contents)?;
        Ok(Self {
            path: p.to_string(),
            store,
        })
    }

    async fn write_empty_state(mut f: File) -> io::Result<Vec<u8>> {
        let default_data = serde_json::to_string_pretty(&InMemoryStore::default())?;
        let default_bytes = default_data.as_bytes();
        f.write_all(default_bytes).await?;
        f.flush().await?;
        Ok(default_bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl Store for FileStore {
    async fn add_user(&mut self, username: &str, password_hash: &str) -> Result<User, Error> {
        let user = self.store.add_user(username, password_hash).await?;
        self.save().await?;
        Ok(user)
    }

    async fn user_by_username(&self, username: &str) -> Option<User> {
        self.store.user_by_username(username).await
    }

    async fn add_account(
        &mut self,
        user_id: u64,
        name: &str,
        api_key: &str,
    ) -> Result<Account, Error> {
        let account = self.store.add_account(user_id, name, api_key).await?;
        self.save().await?;
        Ok(account)
    }

    async fn accounts_for_user(&self, user_id: u64) -> Vec<Account> {
        self.store.accounts_for_user(user_id).await
    }

    async fn account_for_user(&self, user_id: u64, account_id: u64) -> Option<Account> {
        self.store.account_for_user(user_id, account_id).await
    }

    async fn remove_account(&mut self, user_id: u64, account_id: u64) -> Result<(), Error> {
        self.store.remove_account(user_id, account_id).await?;
        self.save().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("dyndash-store-{}-{name}.json", std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let path = temp_path("missing");
        let _ = tokio::fs::remove_file(&path).await;
        let store = FileStore::try_from_file(&path).await.unwrap();
        assert!(store.user_by_username("alice").await.is_none());
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn state_survives_reload() {
        let path = temp_path("reload");
        let _ = tokio::fs::remove_file(&path).await;

        let mut store = FileStore::try_from_file(&path).await.unwrap();
        let user = store.add_user("alice", "hash").await.unwrap();
        store.add_account(user.id, "primary", "key-1").await.unwrap();

        let reloaded = FileStore::try_from_file(&path).await.unwrap();
        let user = reloaded.user_by_username("alice").await.unwrap();
        let accounts = reloaded.accounts_for_user(user.id).await;
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name, "primary");
        assert_eq!(accounts[0].api_key, "key-1");

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn corrupt_state_file_is_an_error() {
        let path = temp_path("corrupt");
        tokio::fs::write(&path, b"{ not json").await.unwrap();
        assert!(matches!(
            FileStore::try_from_file(&path).await,
            Err(Error::InvalidJSON(_))
        ));
        tokio::fs::remove_file(&path).await.unwrap();
    }
}
