use serde::{Deserialize, Serialize};

use super::common::{null_as_default, ApiQueryParams, ApiResource, PageResponse};
use super::{ApiError, Client};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ipv4_addresses: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ipv6_addresses: Vec<String>,
}

impl ApiResource for DnsRecord {
    fn collection() -> &'static str {
        "dns-records"
    }
}

pub struct DnsRecordsApi<'a> {
    client: &'a Client,
}

impl<'a> DnsRecordsApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list_page(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<DnsRecord>, ApiError> {
        self.client.get_page(&DnsRecord::page_path(), page, size).await
    }

    pub async fn list_all(&self) -> Result<Vec<DnsRecord>, ApiError> {
        self.client.get_all_pages(&DnsRecord::page_path()).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<DnsRecord>, ApiError> {
        self.client
            .find_in_pages(&DnsRecord::page_path(), |r: &DnsRecord| {
                r.id.as_deref() == Some(id)
            })
            .await
    }

    pub async fn get_by_domain(&self, domain: &str) -> Result<Option<DnsRecord>, ApiError> {
        self.client
            .find_in_pages(&DnsRecord::page_path(), |r: &DnsRecord| r.domain == domain)
            .await
    }

    pub async fn create(&self, record: &DnsRecord) -> Result<DnsRecord, ApiError> {
        self.client
            .post(&DnsRecord::api_path(), &ApiQueryParams::new(), record)
            .await
    }

    pub async fn update(&self, id: &str, record: &DnsRecord) -> Result<(), ApiError> {
        self.client
            .put_empty(&DnsRecord::resource_path(id), &ApiQueryParams::new(), record)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&DnsRecord::resource_path(id), &ApiQueryParams::new())
            .await
    }
}
