//! Cloud Connexa REST API client
//!
//! [`Client`] owns the transport (bearer token, rate limiter, optional GET
//! cache). Entity clients are borrowed from it, e.g. `client.networks()`.

pub mod auth;
pub mod cache;
pub mod client;
pub mod common;
pub mod error;
pub mod pagination;
pub mod pool;
pub mod rate_limit;

pub mod connectors;
pub mod dns_records;
pub mod hosts;
pub mod ip_services;
pub mod networks;
pub mod routes;
pub mod user_groups;
pub mod users;
pub mod vpn_regions;

pub use client::{Client, ClientConfig};
pub use common::{ApiQueryParams, ApiResource, InternetAccess, NetworkItemType, PageResponse};
pub use error::ApiError;
pub use pool::{RequestStats, TransportConfig};
pub use rate_limit::RateLimitConfig;

pub use connectors::{ConnectionStatus, Connector, ConnectorsApi};
pub use dns_records::{DnsRecord, DnsRecordsApi};
pub use hosts::{Host, HostsApi};
pub use ip_services::{
    CustomServiceType, IpService, IpServiceConfig, IpServiceRoute, IpServicesApi, Range,
};
pub use networks::{Network, NetworksApi};
pub use routes::{Route, RouteType, RoutesApi};
pub use user_groups::{UserGroup, UserGroupsApi};
pub use users::{Device, User, UsersApi};
pub use vpn_regions::{VpnRegion, VpnRegionsApi};
