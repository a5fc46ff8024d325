use crate::error::Error;
use crate::store::{Account, Store, User};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::OffsetDateTime;

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct InMemoryStore {
    users: HashMap<u64, User>,
    accounts: HashMap<u64, Account>,
    next_user_id: u64,
    next_account_id: u64,
}

#[async_trait::async_trait]
impl Store for InMemoryStore {
    async fn add_user(&mut self, username: &str, password_hash: &str) -> Result<User, Error> {
        if self.users.values().any(|u| u.username == username) {
            return Err(Error::UserExists(username.to_string()));
        }
        self.next_user_id += 1;
        let user = User {
            id: self.next_user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn user_by_username(&self, username: &str) -> Option<User> {
        self.users.values().find(|u| u.username == username).cloned()
    }

    async fn add_account(
        &mut self,
        user_id: u64,
        name: &str,
        api_key: &str,
    ) -> Result<Account, Error> {
        self.next_account_id += 1;
        let account = Account {
            id: self.next_account_id,
            user_id,
            name: name.to_string(),
            api_key: api_key.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn accounts_for_user(&self, user_id: u64) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        accounts.sort_by_key(|a| a.id);
        accounts
    }

    async fn account_for_user(&self, user_id: u64, account_id: u64) -> Option<Account> {
        self.accounts
            .get(&account_id)
            .filter(|a| a.user_id == user_id)
            .cloned()
    }

    async fn remove_account(&mut self, user_id: u64, account_id: u64) -> Result<(), Error> {
        match self.accounts.get(&account_id) {
            Some(account) if account.user_id == user_id => {
                self.accounts.remove(&account_id);
                Ok(())
            }
            _ => Err(Error::AccountNotFound(account_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn usernames_are_unique() {
        let mut store = InMemoryStore::default();
        store.add_user("alice", "hash-a").await.unwrap();
        let err = store.add_user("alice", "hash-b").await.unwrap_err();
        assert!(matches!(err, Error::UserExists(name) if name == "alice"));
        // Uniqueness is case-sensitive.
        store.add_user("Alice", "hash-c").await.unwrap();
    }

    #[tokio::test]
    async fn accounts_are_scoped_to_their_owner() {
        let mut store = InMemoryStore::default();
        let alice = store.add_user("alice", "hash").await.unwrap();
        let bob = store.add_user("bob", "hash").await.unwrap();
        let acct = store
            .add_account(alice.id, "primary", "api-key-1")
            .await
            .unwrap();

        assert!(store.account_for_user(alice.id, acct.id).await.is_some());
        assert!(store.account_for_user(bob.id, acct.id).await.is_none());
        assert_eq!(store.accounts_for_user(bob.id).await.len(), 0);

        let err = store.remove_account(bob.id, acct.id).await.unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(id) if id == acct.id));
        store.remove_account(alice.id, acct.id).await.unwrap();
        assert!(store.accounts_for_user(alice.id).await.is_empty());
    }

    #[tokio::test]
    async fn account_ids_keep_increasing_after_removal() {
        let mut store = InMemoryStore::default();
        let user = store.add_user("alice", "hash").await.unwrap();
        let first = store.add_account(user.id, "a", "k").await.unwrap();
        store.remove_account(user.id, first.id).await.unwrap();
        let second = store.add_account(user.id, "b", "k").await.unwrap();
        assert!(second.id > first.id);
    }
}
