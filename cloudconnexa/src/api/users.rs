//! User API implementation

use serde::{Deserialize, Serialize};

use super::common::{null_as_default, ApiQueryParams, ApiResource, PageResponse};
use super::{ApiError, Client};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Weak reference to a [`super::user_groups::UserGroup`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "ipV4Address", skip_serializing_if = "Option::is_none")]
    pub ipv4_address: Option<String>,
    #[serde(rename = "ipV6Address", skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
}

impl ApiResource for User {
    fn collection() -> &'static str {
        "users"
    }
}

pub struct UsersApi<'a> {
    client: &'a Client,
}

impl<'a> UsersApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list_page(&self, page: u32, size: u32) -> Result<PageResponse<User>, ApiError> {
        self.client.get_page(&User::page_path(), page, size).await
    }

    pub async fn list_all(&self) -> Result<Vec<User>, ApiError> {
        self.client.get_all_pages(&User::page_path()).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>, ApiError> {
        self.client
            .find_in_pages(&User::page_path(), |u: &User| u.id.as_deref() == Some(id))
            .await
    }

    /// Look up by username
    pub async fn get_by_name(&self, username: &str) -> Result<Option<User>, ApiError> {
        self.client
            .find_in_pages(&User::page_path(), |u: &User| u.username == username)
            .await
    }

    pub async fn get_by_username_and_role(
        &self,
        username: &str,
        role: &str,
    ) -> Result<Option<User>, ApiError> {
        self.client
            .find_in_pages(&User::page_path(), |u: &User| {
                u.username == username && u.role == role
            })
            .await
    }

    pub async fn create(&self, user: &User) -> Result<User, ApiError> {
        self.client
            .post(&User::api_path(), &ApiQueryParams::new(), user)
            .await
    }

    pub async fn update(&self, id: &str, user: &User) -> Result<(), ApiError> {
        self.client
            .put_empty(&User::resource_path(id), &ApiQueryParams::new(), user)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&User::resource_path(id), &ApiQueryParams::new())
            .await
    }
}
