use serde::{Deserialize, Serialize};

use super::common::{null_as_default, ApiQueryParams, ApiResource, InternetAccess, PageResponse};
use super::{ApiError, Client};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_auth: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vpn_region_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub internet_access: InternetAccess,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_device: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub system_subnets: Vec<String>,
}

impl ApiResource for UserGroup {
    fn collection() -> &'static str {
        "user-groups"
    }
}

pub struct UserGroupsApi<'a> {
    client: &'a Client,
}

impl<'a> UserGroupsApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list_page(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<UserGroup>, ApiError> {
        self.client.get_page(&UserGroup::page_path(), page, size).await
    }

    pub async fn list_all(&self) -> Result<Vec<UserGroup>, ApiError> {
        self.client.get_all_pages(&UserGroup::page_path()).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<UserGroup>, ApiError> {
        self.client
            .find_in_pages(&UserGroup::page_path(), |g: &UserGroup| {
                g.id.as_deref() == Some(id)
            })
            .await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<UserGroup>, ApiError> {
        self.client
            .find_in_pages(&UserGroup::page_path(), |g: &UserGroup| g.name == name)
            .await
    }

    pub async fn create(&self, group: &UserGroup) -> Result<UserGroup, ApiError> {
        self.client
            .post(&UserGroup::api_path(), &ApiQueryParams::new(), group)
            .await
    }

    /// PUT /user-groups/{id}, returning the server's copy
    pub async fn update(&self, id: &str, group: &UserGroup) -> Result<UserGroup, ApiError> {
        self.client
            .put(&UserGroup::resource_path(id), &ApiQueryParams::new(), group)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&UserGroup::resource_path(id), &ApiQueryParams::new())
            .await
    }
}
