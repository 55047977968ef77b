//! Network API implementation

use serde::{Deserialize, Serialize};

use super::common::{null_as_default, ApiQueryParams, ApiResource, InternetAccess, PageResponse};
use super::connectors::Connector;
use super::routes::Route;
use super::{ApiError, Client};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub egress: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub internet_access: InternetAccess,
    #[serde(default, deserialize_with = "null_as_default")]
    pub system_subnets: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub routes: Vec<Route>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub connectors: Vec<Connector>,
}

impl ApiResource for Network {
    fn collection() -> &'static str {
        "networks"
    }
}

pub struct NetworksApi<'a> {
    client: &'a Client,
}

impl<'a> NetworksApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// GET /networks/page
    pub async fn list_page(&self, page: u32, size: u32) -> Result<PageResponse<Network>, ApiError> {
        self.client.get_page(&Network::page_path(), page, size).await
    }

    pub async fn list_all(&self) -> Result<Vec<Network>, ApiError> {
        self.client.get_all_pages(&Network::page_path()).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Network>, ApiError> {
        self.client
            .find_in_pages(&Network::page_path(), |n: &Network| n.id.as_deref() == Some(id))
            .await
    }

    /// First network with this name; names are not unique server-side.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Network>, ApiError> {
        self.client
            .find_in_pages(&Network::page_path(), |n: &Network| n.name == name)
            .await
    }

    /// POST /networks
    ///
    /// The body carries the initial connectors and routes.
    pub async fn create(&self, network: &Network) -> Result<Network, ApiError> {
        self.client
            .post(&Network::api_path(), &ApiQueryParams::new(), network)
            .await
    }

    /// PUT /networks/{id}
    pub async fn update(&self, id: &str, network: &Network) -> Result<(), ApiError> {
        self.client
            .put_empty(&Network::resource_path(id), &ApiQueryParams::new(), network)
            .await
    }

    /// DELETE /networks/{id}
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&Network::resource_path(id), &ApiQueryParams::new())
            .await
    }
}
