//! Network route API implementation
//!
//! Routes live under their network (`/networks/{networkId}/routes`).

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use super::common::{ApiQueryParams, ApiResource, PageResponse};
use super::networks::Network;
use super::{ApiError, Client};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteType {
    #[default]
    IpV4,
    IpV6,
    Domain,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub route_type: RouteType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Route {
    /// Subnet or domain the route points at, whichever field carries it.
    pub fn target(&self) -> Option<&str> {
        let preferred = match self.route_type {
            RouteType::IpV4 | RouteType::IpV6 => &self.subnet,
            RouteType::Domain => &self.domain,
        };
        non_empty(preferred).or_else(|| non_empty(&self.value))
    }

    /// The server does not echo `value`/`subnet`/`domain` on create.
    fn reattach_submitted(&mut self, submitted: &Route, network_id: &str) {
        for (returned, sent) in [
            (&mut self.value, &submitted.value),
            (&mut self.subnet, &submitted.subnet),
            (&mut self.domain, &submitted.domain),
        ] {
            if non_empty(returned).is_none() && non_empty(sent).is_some() {
                *returned = sent.clone();
            }
        }
        if non_empty(&self.network_item_id).is_none() {
            self.network_item_id = Some(network_id.to_string());
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn routes_path(network_id: &str) -> String {
    format!("{}/routes", Network::resource_path(network_id))
}

pub struct RoutesApi<'a> {
    client: &'a Client,
}

impl<'a> RoutesApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// GET /networks/{networkId}/routes/page
    pub async fn list_page(
        &self,
        network_id: &str,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<Route>, ApiError> {
        let path = format!("{}/page", routes_path(network_id));
        self.client.get_page(&path, page, size).await
    }

    /// Every route of one network
    pub async fn list(&self, network_id: &str) -> Result<Vec<Route>, ApiError> {
        let path = format!("{}/page", routes_path(network_id));
        self.client.get_all_pages(&path).await
    }

    pub async fn get(&self, network_id: &str, route_id: &str) -> Result<Option<Route>, ApiError> {
        let routes = self.list(network_id).await?;
        Ok(routes
            .into_iter()
            .find(|r| r.id.as_deref() == Some(route_id)))
    }

    /// Look a route up without knowing its network.
    ///
    /// Lists every network, then scans each network's routes with up to
    /// `fan_out` networks in flight. Networks are searched in list order.
    pub async fn get_by_id(&self, route_id: &str) -> Result<Option<Route>, ApiError> {
        let networks = self.client.networks().list_all().await?;
        let fan_out = self.client.config().fan_out.max(1);

        let mut lookups = stream::iter(networks.into_iter().filter_map(|n| n.id))
            .map(|network_id| async move {
                let found = self.get(&network_id, route_id).await?;
                Ok::<_, ApiError>(found.map(|mut route| {
                    route.network_item_id = Some(network_id);
                    route
                }))
            })
            .buffered(fan_out);

        while let Some(found) = lookups.next().await {
            if let Some(route) = found? {
                return Ok(Some(route));
            }
        }
        Ok(None)
    }

    /// POST /networks/{networkId}/routes
    ///
    /// The returned route carries the submitted target even though the
    /// server's copy does not.
    pub async fn create(&self, network_id: &str, route: &Route) -> Result<Route, ApiError> {
        let mut created: Route = self
            .client
            .post(&routes_path(network_id), &ApiQueryParams::new(), route)
            .await?;
        created.reattach_submitted(route, network_id);
        Ok(created)
    }

    /// PUT /networks/{networkId}/routes/{routeId}
    pub async fn update(
        &self,
        network_id: &str,
        route_id: &str,
        route: &Route,
    ) -> Result<(), ApiError> {
        let path = format!("{}/{}", routes_path(network_id), urlencoding::encode(route_id));
        self.client
            .put_empty(&path, &ApiQueryParams::new(), route)
            .await
    }

    /// DELETE /networks/{networkId}/routes/{routeId}
    pub async fn delete(&self, network_id: &str, route_id: &str) -> Result<(), ApiError> {
        let path = format!("{}/{}", routes_path(network_id), urlencoding::encode(route_id));
        self.client.delete(&path, &ApiQueryParams::new()).await
    }
}
