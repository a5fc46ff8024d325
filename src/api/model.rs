use crate::error::Error;
use crate::generator::Subdomain;
use crate::provider::{normalize_record_type, DnsRecord, Domain, Pagination};
use crate::store::Account;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use time::OffsetDateTime;

#[derive(Deserialize, Debug, Clone)]
pub(super) struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct UserResult {
    pub id: u64,
    pub username: String,
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct SessionResult {
    pub token: String,
}

#[derive(Deserialize, Debug, Clone)]
pub(super) struct CreateAccountRequest {
    pub name: String,
    pub api_key: String,
}

/// Account listing entry. The API key is write-only and never echoed back.
#[serde_as]
#[derive(Serialize, Debug, Clone)]
pub(super) struct AccountResult {
    pub id: u64,
    pub name: String,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub created_at: OffsetDateTime,
}

impl From<Account> for AccountResult {
    fn from(account: Account) -> Self {
        AccountResult {
            id: account.id,
            name: account.name,
            created_at: account.created_at,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub(super) struct DomainsQuery {
    pub page: Option<usize>,
    /// A number, or `"all"` to disable paging.
    pub per_page: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct DomainsResult {
    pub domains: Vec<Domain>,
    pub pagination: Pagination,
}

#[derive(Deserialize, Debug, Clone)]
pub(super) struct AddDomainsRequest {
    pub domains: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub(super) struct DeleteDomainsRequest {
    pub domain_ids: Vec<u64>,
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct BulkResult {
    pub requested: usize,
    pub succeeded: usize,
}

fn default_generate_count() -> usize {
    10
}

#[derive(Deserialize, Debug, Clone)]
pub(super) struct GenerateRequest {
    pub main_domain: String,
    #[serde(default = "default_generate_count")]
    pub count: usize,
    #[serde(default)]
    pub use_prefix: bool,
    #[serde(default)]
    pub use_suffix: bool,
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct GenerateResult {
    /// The (capped) number of names asked for. `subdomains` may hold fewer
    /// when the dictionary space is exhausted.
    pub requested: usize,
    /// How many generated names the provider accepted.
    pub added: usize,
    pub subdomains: Vec<Subdomain>,
}

#[derive(Deserialize, Debug, Clone)]
pub(super) struct CustomSubdomainRequest {
    pub name: String,
    pub main_domain: String,
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct CustomSubdomainResult {
    pub full_domain: String,
    pub added: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub(super) struct SuggestionsQuery {
    pub count: Option<usize>,
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct SuggestionsResult {
    pub suggestions: Vec<Subdomain>,
}

fn default_record_ttl() -> u32 {
    300
}

#[derive(Deserialize, Debug, Clone)]
pub(super) struct CreateRecordRequest {
    #[serde(default)]
    pub node_name: String,
    pub record_type: String,
    #[serde(default = "default_record_ttl")]
    pub ttl: u32,
    /// The record value: an IPv4 address for A, text data for TXT/SPF, the
    /// mail host for MX.
    pub value: String,
    /// MX preference; ignored for other record types.
    pub priority: Option<u16>,
}

impl CreateRecordRequest {
    pub(super) fn into_record(self) -> Result<DnsRecord, Error> {
        let record_type = normalize_record_type(&self.record_type)?;
        let mut record = DnsRecord {
            id: 0,
            node_name: self.node_name,
            record_type: record_type.clone(),
            ttl: self.ttl,
            state: true,
            ipv4_address: None,
            text_data: None,
            host: None,
            priority: None,
        };
        match record_type.as_str() {
            "A" => record.ipv4_address = Some(self.value),
            "MX" => {
                record.host = Some(self.value);
                record.priority = Some(self.priority.unwrap_or(10));
            }
            // TXT and SPF both travel as text data.
            _ => record.text_data = Some(self.value),
        }
        Ok(record)
    }
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct RecordsResult {
    pub records: Vec<DnsRecord>,
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct AckResult {
    pub ok: bool,
}
