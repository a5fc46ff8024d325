//! HTTP client for the Dynu v2 REST API.

use crate::error::Error;
use crate::provider::{DnsRecord, Domain, DomainList, RecordList};
use serde_json::json;

/// A client bound to one account's API key. Cheap to construct per request;
/// the underlying [`reqwest::Client`] connection pool is shared.
#[derive(Debug, Clone)]
pub struct DynuClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DynuClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        DynuClient {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// List every domain on the account. Provider-side rejections (bad API
    /// key, rate limiting) come back as an empty listing; only transport
    /// failures are errors.
    pub async fn domains(&self) -> Result<Vec<Domain>, Error> {
        let response = self
            .http
            .get(self.url("/dns"))
            .header("API-Key", &self.api_key)
            .send()
            .await?;
        if !response.status().is_success() {
            tracing::debug!("domain listing failed with status {}", response.status());
            return Ok(Vec::new());
        }
        let listing: DomainList = response.json().await?;
        Ok(listing.into_domains())
    }

    /// Register a domain name. Returns whether the provider accepted it.
    pub async fn add_domain(&self, name: &str) -> Result<bool, Error> {
        let response = self
            .http
            .post(self.url("/dns"))
            .header("API-Key", &self.api_key)
            .json(&json!({ "name": name }))
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    /// Delete a domain by provider id. Returns whether the provider accepted
    /// the deletion.
    pub async fn delete_domain(&self, domain_id: u64) -> Result<bool, Error> {
        let response = self
            .http
            .delete(self.url(&format!("/dns/{domain_id}")))
            .header("API-Key", &self.api_key)
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    /// List the DNS records of a domain.
    pub async fn records(&self, domain_id: u64) -> Result<Vec<DnsRecord>, Error> {
        let response = self
            .http
            .get(self.url(&format!("/dns/{domain_id}/record")))
            .header("API-Key", &self.api_key)
            .send()
            .await?;
        if !response.status().is_success() {
            tracing::debug!(
                "record listing for domain {domain_id} failed with status {}",
                response.status()
            );
            return Ok(Vec::new());
        }
        let listing: RecordList = response.json().await?;
        Ok(listing.dns_records)
    }

    /// Create a DNS record under a domain. Returns whether the provider
    /// accepted it.
    pub async fn add_record(&self, domain_id: u64, record: &DnsRecord) -> Result<bool, Error> {
        let response = self
            .http
            .post(self.url(&format!("/dns/{domain_id}/record")))
            .header("API-Key", &self.api_key)
            .json(record)
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    /// Delete a DNS record. Returns whether the provider accepted the
    /// deletion.
    pub async fn delete_record(&self, domain_id: u64, record_id: u64) -> Result<bool, Error> {
        let response = self
            .http
            .delete(self.url(&format!("/dns/{domain_id}/record/{record_id}")))
            .header("API-Key", &self.api_key)
            .send()
            .await?;
        Ok(response.status().is_success())
    }
}
