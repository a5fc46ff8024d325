//! Dynu DNS provider integration.
//!
//! The provider's `/dns` listing endpoint returns every domain on the
//! account; search filtering and pagination happen client-side, exactly as
//! the upstream API forces. Those pieces are pure functions here so they can
//! be tested without a network.

use crate::error::Error;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub mod dynu;

#[allow(clippy::module_name_repetitions)]
pub use dynu::DynuClient;

lazy_static! {
    /// DNS record kinds the service manages. Everything else is rejected
    /// before any provider call is made.
    static ref SUPPORTED_RECORD_TYPES: HashSet<&'static str> =
        HashSet::from(["A", "TXT", "MX", "SPF"]);
}

/// A domain as reported by the provider. Fields beyond id and name are
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Domain {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

/// The provider has returned domain listings both as a bare array and
/// wrapped in a `domains` object; accept either.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DomainList {
    Wrapped {
        #[serde(default)]
        domains: Vec<Domain>,
    },
    Bare(Vec<Domain>),
}

impl DomainList {
    pub(crate) fn into_domains(self) -> Vec<Domain> {
        match self {
            DomainList::Wrapped { domains } | DomainList::Bare(domains) => domains,
        }
    }
}

/// A DNS record as exchanged with the provider. Only the value fields used
/// by the supported record types are modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    #[serde(default, skip_serializing_if = "id_is_unset")]
    pub id: u64,
    #[serde(default)]
    pub node_name: String,
    pub record_type: String,
    #[serde(default)]
    pub ttl: u32,
    /// Whether the record is active. The provider requires this on create.
    #[serde(default = "default_record_state")]
    pub state: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn id_is_unset(id: &u64) -> bool {
    *id == 0
}

fn default_record_state() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordList {
    #[serde(rename = "dnsRecords", default)]
    pub dns_records: Vec<DnsRecord>,
}

/// How many domains a listing page holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerPage {
    Limit(usize),
    /// Disable paging and return everything on one page.
    All,
}

/// Pagination metadata returned alongside a domain listing page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub pages: usize,
}

/// Normalize a record type: trim, uppercase, and require one of the
/// supported kinds.
///
/// # Errors
///
/// Returns [`Error::UnsupportedRecordType`] for anything outside
/// A/TXT/MX/SPF.
pub fn normalize_record_type(raw: &str) -> Result<String, Error> {
    let record_type = raw.trim().to_ascii_uppercase();
    if SUPPORTED_RECORD_TYPES.contains(record_type.as_str()) {
        Ok(record_type)
    } else {
        Err(Error::UnsupportedRecordType(raw.to_string()))
    }
}

/// Apply case-insensitive substring search and client-side pagination to a
/// full domain listing. `page` is clamped to at least 1; a page past the end
/// yields an empty slice with the metadata intact.
#[must_use]
pub fn filter_and_paginate(
    domains: Vec<Domain>,
    page: usize,
    per_page: PerPage,
    search: Option<&str>,
) -> (Vec<Domain>, Pagination) {
    let filtered: Vec<Domain> = match search {
        Some(needle) if !needle.is_empty() => {
            let needle = needle.to_lowercase();
            domains
                .into_iter()
                .filter(|d| d.name.to_lowercase().contains(&needle))
                .collect()
        }
        _ => domains,
    };

    let total = filtered.len();
    let page = page.max(1);
    let per_page = match per_page {
        PerPage::Limit(n) => n.max(1),
        PerPage::All => total.max(1),
    };
    let pages = if total == 0 {
        1
    } else {
        (total + per_page - 1) / per_page
    };

    let start = (page - 1).saturating_mul(per_page);
    let paged = if start >= total {
        Vec::new()
    } else {
        filtered[start..(start + per_page).min(total)].to_vec()
    };

    (
        paged,
        Pagination {
            page,
            per_page,
            total,
            pages,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domains(names: &[&str]) -> Vec<Domain> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Domain {
                id: i as u64 + 1,
                name: (*name).to_string(),
            })
            .collect()
    }

    #[test]
    fn record_type_normalization() {
        assert_eq!(normalize_record_type(" a ").unwrap(), "A");
        assert_eq!(normalize_record_type("txt").unwrap(), "TXT");
        assert_eq!(normalize_record_type("Mx").unwrap(), "MX");
        assert_eq!(normalize_record_type("SPF").unwrap(), "SPF");
        assert!(matches!(
            normalize_record_type("CNAME"),
            Err(Error::UnsupportedRecordType(t)) if t == "CNAME"
        ));
        assert!(normalize_record_type("").is_err());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let all = domains(&["cam.dynu.net", "office.kozow.com", "MY-CAM.gleeze.com"]);
        let (found, meta) = filter_and_paginate(all, 1, PerPage::Limit(10), Some("CAM"));
        assert_eq!(found.len(), 2);
        assert_eq!(meta.total, 2);
        assert_eq!(meta.pages, 1);
    }

    #[test]
    fn pages_are_sliced_with_ceiling_math() {
        let all = domains(&["a.net", "b.net", "c.net", "d.net", "e.net"]);
        let (page1, meta) = filter_and_paginate(all.clone(), 1, PerPage::Limit(2), None);
        assert_eq!(page1.len(), 2);
        assert_eq!(meta.pages, 3);
        let (page3, _) = filter_and_paginate(all.clone(), 3, PerPage::Limit(2), None);
        assert_eq!(page3.len(), 1);
        assert_eq!(page3[0].name, "e.net");
        let (past_end, meta) = filter_and_paginate(all, 9, PerPage::Limit(2), None);
        assert!(past_end.is_empty());
        assert_eq!(meta.total, 5);
    }

    #[test]
    fn per_page_all_returns_one_page() {
        let all = domains(&["a.net", "b.net", "c.net"]);
        let (page, meta) = filter_and_paginate(all, 1, PerPage::All, None);
        assert_eq!(page.len(), 3);
        assert_eq!(meta.pages, 1);
        assert_eq!(meta.per_page, 3);
    }

    #[test]
    fn empty_listing_reports_one_empty_page() {
        let (page, meta) = filter_and_paginate(Vec::new(), 1, PerPage::Limit(10), None);
        assert!(page.is_empty());
        assert_eq!(meta.total, 0);
        assert_eq!(meta.pages, 1);
    }

    #[test]
    fn domain_list_accepts_both_provider_shapes() {
        let wrapped: DomainList =
            serde_json::from_str(r#"{"domains": [{"id": 1, "name": "cam.dynu.net"}]}"#).unwrap();
        assert_eq!(wrapped.into_domains().len(), 1);

        let bare: DomainList =
            serde_json::from_str(r#"[{"id": 2, "name": "office.kozow.com"}]"#).unwrap();
        assert_eq!(bare.into_domains()[0].name, "office.kozow.com");
    }

    #[test]
    fn dns_record_uses_provider_field_names() {
        let record: DnsRecord = serde_json::from_str(
            r#"{"id": 7, "nodeName": "www", "recordType": "A", "ttl": 300, "ipv4Address": "203.0.113.9"}"#,
        )
        .unwrap();
        assert_eq!(record.node_name, "www");
        assert_eq!(record.ipv4_address.as_deref(), Some("203.0.113.9"));
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("textData").is_none());
        assert_eq!(json["recordType"], "A");
    }
}
