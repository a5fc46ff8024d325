use crate::error::Error;
use crate::generator::{default_main_domains, Dictionary, SubdomainGenerator};
use crate::store::{DynStore, FileStore, InMemoryStore};
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub type SharedConfig = Arc<Config>;

/// Minimum length of the HMAC secret used to sign session tokens.
const MIN_SESSION_SECRET_LEN: usize = 16;

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub api_timeout: Duration,
    /// Secret key for signing session tokens. Must be at least 16 bytes.
    pub session_secret: String,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_session_ttl")]
    pub session_ttl: Duration,
    /// Path for the JSON user/account state file. When absent, state is kept
    /// in memory only and lost on restart.
    pub store_state_path: Option<String>,
    #[serde(default = "default_provider_api_url")]
    pub provider_api_url: String,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout: Duration,
    /// Main domains subdomains may be created under. Defaults to the set the
    /// Dynu service offers.
    #[serde(default = "default_main_domains")]
    pub main_domains: Vec<String>,
    #[serde(default)]
    pub dictionary: Dictionary,
}

fn default_session_ttl() -> Duration {
    Duration::from_secs(30 * 60)
}

fn default_provider_api_url() -> String {
    "https://api.dynu.com/v2".to_string()
}

fn default_provider_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Config {
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        conf.validate()?;
        Ok(conf)
    }

    /// Build the subdomain generator from the configured allowlist and
    /// dictionary.
    #[must_use]
    pub fn generator(&self) -> SubdomainGenerator {
        SubdomainGenerator::new(self.main_domains.clone(), self.dictionary.clone())
    }

    /// Build the user/account store: file-backed when `store_state_path` is
    /// set, in-memory otherwise.
    pub async fn store(&self) -> Result<DynStore, Error> {
        Ok(match &self.store_state_path {
            Some(path) => Arc::new(RwLock::new(FileStore::try_from_file(path).await?)),
            None => Arc::new(RwLock::new(InMemoryStore::default())),
        })
    }

    fn validate(&self) -> Result<(), Error> {
        if self.session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(Error::InvalidConfig(format!(
                "session_secret must be at least {MIN_SESSION_SECRET_LEN} bytes"
            )));
        }
        if self.main_domains.is_empty() {
            return Err(Error::InvalidConfig(
                "main_domains must not be empty".to_string(),
            ));
        }
        if self.dictionary.words.is_empty() {
            return Err(Error::InvalidConfig(
                "dictionary.words must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> serde_json::Value {
        json!({
            "api_bind_addr": "127.0.0.1:8003",
            "api_timeout": 30,
            "session_secret": "0123456789abcdef0123456789abcdef"
        })
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let config: Config = serde_json::from_value(minimal()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.session_ttl, Duration::from_secs(1800));
        assert_eq!(config.provider_api_url, "https://api.dynu.com/v2");
        assert_eq!(config.main_domains.len(), 20);
        assert!(!config.dictionary.words.is_empty());
        assert!(config.store_state_path.is_none());
    }

    #[test]
    fn short_session_secret_is_rejected() {
        let mut raw = minimal();
        raw["session_secret"] = json!("too-short");
        let config: Config = serde_json::from_value(raw).unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn empty_word_list_is_rejected() {
        let mut raw = minimal();
        raw["dictionary"] = json!({"prefixes": ["my"], "words": [], "suffixes": []});
        let config: Config = serde_json::from_value(raw).unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn allowlist_and_dictionary_overrides_are_honored() {
        let mut raw = minimal();
        raw["main_domains"] = json!(["example.test"]);
        raw["dictionary"] = json!({"words": ["camera"]});
        let config: Config = serde_json::from_value(raw).unwrap();
        config.validate().unwrap();
        let gen = config.generator();
        assert_eq!(gen.main_domains(), vec!["example.test".to_string()]);
    }
}
