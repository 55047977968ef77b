//! Connector API implementation
//!
//! Connectors belong to a network or a host; writes must name the parent via
//! `networkItemId`/`networkItemType`.

use serde::{Deserialize, Serialize};

use super::common::{ApiQueryParams, ApiResource, NetworkItemType, PageResponse};
use super::{ApiError, Client};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_item_type: Option<NetworkItemType>,
    #[serde(default)]
    pub vpn_region_id: String,
    #[serde(rename = "ipV4Address", skip_serializing_if = "Option::is_none")]
    pub ipv4_address: Option<String>,
    #[serde(rename = "ipV6Address", skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_status: Option<ConnectionStatus>,
}

impl Connector {
    fn belongs_to(&self, item_id: &str, item_type: NetworkItemType) -> bool {
        self.network_item_id.as_deref() == Some(item_id)
            && self.network_item_type.unwrap_or_default() == item_type
    }
}

impl ApiResource for Connector {
    fn collection() -> &'static str {
        "connectors"
    }
}

pub struct ConnectorsApi<'a> {
    client: &'a Client,
}

impl<'a> ConnectorsApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// GET /connectors/page
    pub async fn list_page(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<Connector>, ApiError> {
        self.client.get_page(&Connector::page_path(), page, size).await
    }

    pub async fn list_all(&self) -> Result<Vec<Connector>, ApiError> {
        self.client.get_all_pages(&Connector::page_path()).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Connector>, ApiError> {
        self.client
            .find_in_pages(&Connector::page_path(), |c: &Connector| {
                c.id.as_deref() == Some(id)
            })
            .await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Connector>, ApiError> {
        self.client
            .find_in_pages(&Connector::page_path(), |c: &Connector| c.name == name)
            .await
    }

    pub async fn list_for_network(&self, network_id: &str) -> Result<Vec<Connector>, ApiError> {
        self.list_for_item(network_id, NetworkItemType::Network)
            .await
    }

    pub async fn list_for_host(&self, host_id: &str) -> Result<Vec<Connector>, ApiError> {
        self.list_for_item(host_id, NetworkItemType::Host).await
    }

    async fn list_for_item(
        &self,
        item_id: &str,
        item_type: NetworkItemType,
    ) -> Result<Vec<Connector>, ApiError> {
        let all = self.list_all().await?;
        Ok(all
            .into_iter()
            .filter(|c| c.belongs_to(item_id, item_type))
            .collect())
    }

    /// POST /connectors?networkItemId=..&networkItemType=..
    pub async fn create(
        &self,
        connector: &Connector,
        network_item_id: &str,
        network_item_type: NetworkItemType,
    ) -> Result<Connector, ApiError> {
        let params = ApiQueryParams::network_item(network_item_id, network_item_type);
        self.client
            .post(&Connector::api_path(), &params, connector)
            .await
    }

    /// PUT /connectors/{id}?networkItemId=..&networkItemType=..
    pub async fn update(
        &self,
        id: &str,
        connector: &Connector,
        network_item_id: &str,
        network_item_type: NetworkItemType,
    ) -> Result<(), ApiError> {
        let params = ApiQueryParams::network_item(network_item_id, network_item_type);
        self.client
            .put_empty(&Connector::resource_path(id), &params, connector)
            .await
    }

    /// DELETE /connectors/{id}?networkItemId=..&networkItemType=..
    pub async fn delete(
        &self,
        id: &str,
        network_item_id: &str,
        network_item_type: NetworkItemType,
    ) -> Result<(), ApiError> {
        let params = ApiQueryParams::network_item(network_item_id, network_item_type);
        self.client
            .delete(&Connector::resource_path(id), &params)
            .await
    }

    /// POST /connectors/{id}/profile
    ///
    /// Returns the raw OpenVPN profile text.
    pub async fn profile(&self, id: &str) -> Result<String, ApiError> {
        let path = format!("{}/profile", Connector::resource_path(id));
        self.client.post_text(&path).await
    }
}
