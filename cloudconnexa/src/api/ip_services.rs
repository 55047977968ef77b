//! IP service API implementation
//!
//! Writes are scoped to the owning network item, so create/update/delete
//! carry `networkItemId`/`networkItemType` as query parameters.

use serde::{Deserialize, Serialize};

use super::common::{null_as_default, ApiQueryParams, ApiResource, NetworkItemType, PageResponse};
use super::{ApiError, Client};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub network_item_type: NetworkItemType,
    #[serde(default)]
    pub network_item_id: String,
    #[serde(rename = "type", default)]
    pub service_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub routes: Vec<IpServiceRoute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<IpServiceConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpServiceRoute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpServiceConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_service_types: Vec<CustomServiceType>,
    /// Predefined service names such as `HTTP` or `SSH`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomServiceType {
    #[serde(default, deserialize_with = "null_as_default")]
    pub icmp_type: Vec<Range>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub port: Vec<Range>,
    pub protocol: String,
}

/// Inclusive range of ports or ICMP types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub lower_value: u32,
    pub upper_value: u32,
}

impl Range {
    pub fn single(value: u32) -> Self {
        Self {
            lower_value: value,
            upper_value: value,
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.lower_value..=self.upper_value).contains(&value)
    }
}

impl IpService {
    fn network_item_params(&self) -> ApiQueryParams {
        ApiQueryParams::network_item(&self.network_item_id, self.network_item_type)
    }
}

impl ApiResource for IpService {
    fn collection() -> &'static str {
        "ip-services"
    }
}

pub struct IpServicesApi<'a> {
    client: &'a Client,
}

impl<'a> IpServicesApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list_page(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<IpService>, ApiError> {
        self.client.get_page(&IpService::page_path(), page, size).await
    }

    pub async fn list_all(&self) -> Result<Vec<IpService>, ApiError> {
        self.client.get_all_pages(&IpService::page_path()).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<IpService>, ApiError> {
        self.client
            .find_in_pages(&IpService::page_path(), |s: &IpService| {
                s.id.as_deref() == Some(id)
            })
            .await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<IpService>, ApiError> {
        self.client
            .find_in_pages(&IpService::page_path(), |s: &IpService| s.name == name)
            .await
    }

    /// POST /ip-services?networkItemId=..&networkItemType=..
    ///
    /// The parent is taken from the service itself.
    pub async fn create(&self, service: &IpService) -> Result<IpService, ApiError> {
        self.client
            .post(&IpService::api_path(), &service.network_item_params(), service)
            .await
    }

    /// PUT /ip-services/{id}, returning the server's copy
    pub async fn update(&self, id: &str, service: &IpService) -> Result<IpService, ApiError> {
        self.client
            .put(
                &IpService::resource_path(id),
                &service.network_item_params(),
                service,
            )
            .await
    }

    pub async fn delete(
        &self,
        id: &str,
        network_item_id: &str,
        network_item_type: NetworkItemType,
    ) -> Result<(), ApiError> {
        let params = ApiQueryParams::network_item(network_item_id, network_item_type);
        self.client
            .delete(&IpService::resource_path(id), &params)
            .await
    }
}
