use serde::{Deserialize, Serialize};

use super::common::ApiResource;
use super::{ApiError, Client};

/// Read-only reference data; the endpoint returns a bare array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnRegion {
    pub id: String,
    #[serde(default)]
    pub continent: String,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "countryIso", default)]
    pub country_iso: String,
    #[serde(default)]
    pub region_name: String,
}

impl ApiResource for VpnRegion {
    fn collection() -> &'static str {
        "regions"
    }
}

pub struct VpnRegionsApi<'a> {
    client: &'a Client,
}

impl<'a> VpnRegionsApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<VpnRegion>, ApiError> {
        self.client.get(&VpnRegion::api_path()).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<VpnRegion>, ApiError> {
        let regions = self.list().await?;
        Ok(regions.into_iter().find(|r| r.id == id))
    }
}
