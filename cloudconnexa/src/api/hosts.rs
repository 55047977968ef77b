use serde::{Deserialize, Serialize};

use super::common::{null_as_default, ApiQueryParams, ApiResource, InternetAccess, PageResponse};
use super::connectors::Connector;
use super::{ApiError, Client};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub internet_access: InternetAccess,
    #[serde(default, deserialize_with = "null_as_default")]
    pub system_subnets: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub connectors: Vec<Connector>,
}

impl ApiResource for Host {
    fn collection() -> &'static str {
        "hosts"
    }
}

pub struct HostsApi<'a> {
    client: &'a Client,
}

impl<'a> HostsApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list_page(&self, page: u32, size: u32) -> Result<PageResponse<Host>, ApiError> {
        self.client.get_page(&Host::page_path(), page, size).await
    }

    pub async fn list_all(&self) -> Result<Vec<Host>, ApiError> {
        self.client.get_all_pages(&Host::page_path()).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Host>, ApiError> {
        self.client
            .find_in_pages(&Host::page_path(), |h: &Host| h.id.as_deref() == Some(id))
            .await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Host>, ApiError> {
        self.client
            .find_in_pages(&Host::page_path(), |h: &Host| h.name == name)
            .await
    }

    pub async fn create(&self, host: &Host) -> Result<Host, ApiError> {
        self.client
            .post(&Host::api_path(), &ApiQueryParams::new(), host)
            .await
    }

    pub async fn update(&self, id: &str, host: &Host) -> Result<(), ApiError> {
        self.client
            .put_empty(&Host::resource_path(id), &ApiQueryParams::new(), host)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&Host::resource_path(id), &ApiQueryParams::new())
            .await
    }
}
