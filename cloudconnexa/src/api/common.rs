//! Common types and utilities for the Cloud Connexa API

use serde::{Deserialize, Deserializer, Serialize};

/// Version segment shared by every endpoint.
pub const API_PREFIX: &str = "/api/beta";

/// Envelope returned by every `/page` collection endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub number_of_elements: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub success: bool,
}

/// Top-level collection exposed under [`API_PREFIX`].
pub trait ApiResource: Sized {
    fn collection() -> &'static str;

    fn api_path() -> String {
        format!("{}/{}", API_PREFIX, Self::collection())
    }

    fn page_path() -> String {
        format!("{}/page", Self::api_path())
    }

    fn resource_path(id: &str) -> String {
        format!("{}/{}", Self::api_path(), urlencoding::encode(id))
    }
}

/// Which kind of parent a connector or IP service hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkItemType {
    Host,
    #[default]
    Network,
}

impl NetworkItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkItemType::Host => "HOST",
            NetworkItemType::Network => "NETWORK",
        }
    }
}

impl std::fmt::Display for NetworkItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InternetAccess {
    Blocked,
    GlobalInternet,
    #[default]
    Local,
}

#[derive(Debug, Clone, Default)]
pub struct ApiQueryParams {
    params: Vec<(String, String)>,
}

impl ApiQueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn add_optional<K: Into<String>, V: ToString>(mut self, key: K, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.params.push((key.into(), v.to_string()));
        }
        self
    }

    /// `page`/`size` pair understood by every `/page` endpoint.
    pub fn page(page: u32, size: u32) -> Self {
        Self::new().add("page", page).add("size", size)
    }

    /// Parent disambiguation required by connector and IP-service writes.
    pub fn network_item(network_item_id: &str, network_item_type: NetworkItemType) -> Self {
        Self::new()
            .add("networkItemId", network_item_id)
            .add("networkItemType", network_item_type)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            String::new()
        } else {
            format!(
                "?{}",
                self.params
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                    .collect::<Vec<_>>()
                    .join("&")
            )
        }
    }
}

/// Treats an explicit JSON `null` like a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
