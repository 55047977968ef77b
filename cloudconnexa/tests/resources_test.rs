//! Entity clients: wire paths, parent scoping and server quirks

mod common;

use cloudconnexa::api::{
    Connector, DnsRecord, IpService, IpServiceConfig, NetworkItemType, Route, RouteType,
    UserGroup,
};
use common::*;
use mockito::{Matcher, Server};
use serde_json::json;

fn network_item_query(id: &str, item_type: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("networkItemId".into(), id.into()),
        Matcher::UrlEncoded("networkItemType".into(), item_type.into()),
    ])
}

#[tokio::test]
async fn route_create_reattaches_submitted_value() {
    let mut server = Server::new_async().await;
    let client = test_client(&mut server).await;

    let create = server
        .mock("POST", "/api/beta/networks/n1/routes")
        .match_body(Matcher::PartialJson(json!({
            "type": "IP_V4",
            "value": "10.1.2.0/24",
        })))
        .with_status(201)
        .with_body(r#"{"id":"r1","type":"IP_V4","value":"","description":"office lan"}"#)
        .create_async()
        .await;

    let route = Route {
        route_type: RouteType::IpV4,
        value: Some("10.1.2.0/24".to_string()),
        description: Some("office lan".to_string()),
        ..Default::default()
    };
    let created = client.routes().create("n1", &route).await.unwrap();

    assert_eq!(created.id.as_deref(), Some("r1"));
    assert_eq!(created.value.as_deref(), Some("10.1.2.0/24"));
    assert_eq!(created.network_item_id.as_deref(), Some("n1"));
    assert_eq!(created.target(), Some("10.1.2.0/24"));
    create.assert_async().await;
}

#[tokio::test]
async fn route_lookup_fans_out_across_networks() {
    let mut server = Server::new_async().await;
    let client = test_client(&mut server).await;

    let networks = vec![
        json!({"id": "n1", "name": "office"}),
        json!({"id": "n2", "name": "lab"}),
        json!({"id": "n3", "name": "dc"}),
    ];
    let _networks = mock_pages(&mut server, "/api/beta/networks/page", &networks, 10, 2).await;

    let routes = [
        ("n1", vec![json!({"id": "r1", "type": "IP_V4", "subnet": "10.0.1.0/24"})]),
        (
            "n2",
            vec![
                json!({"id": "r2", "type": "IP_V4", "subnet": "10.0.2.0/24"}),
                json!({"id": "r3", "type": "DOMAIN", "domain": "lab.example.com"}),
            ],
        ),
        ("n3", vec![]),
    ];
    let mut route_mocks = Vec::new();
    for (network_id, items) in &routes {
        let path = format!("/api/beta/networks/{}/routes/page", network_id);
        route_mocks.push(mock_pages(&mut server, &path, items, 10, 2).await);
    }

    let found = client.routes().get_by_id("r3").await.unwrap().unwrap();
    assert_eq!(found.route_type, RouteType::Domain);
    assert_eq!(found.domain.as_deref(), Some("lab.example.com"));
    assert_eq!(found.network_item_id.as_deref(), Some("n2"));

    let missing = client.routes().get_by_id("r9").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn route_update_and_delete_are_nested_under_network() {
    let mut server = Server::new_async().await;
    let client = test_client(&mut server).await;

    let update = server
        .mock("PUT", "/api/beta/networks/n1/routes/r1")
        .match_body(Matcher::PartialJson(json!({"description": "renamed"})))
        .with_status(204)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/beta/networks/n1/routes/r1")
        .with_status(204)
        .create_async()
        .await;

    let route = Route {
        subnet: Some("10.0.1.0/24".to_string()),
        description: Some("renamed".to_string()),
        ..Default::default()
    };
    client.routes().update("n1", "r1", &route).await.unwrap();
    client.routes().delete("n1", "r1").await.unwrap();

    update.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn connector_writes_carry_network_item_query() {
    let mut server = Server::new_async().await;
    let client = test_client(&mut server).await;

    let create = server
        .mock("POST", "/api/beta/connectors")
        .match_query(network_item_query("n1", "NETWORK"))
        .match_body(Matcher::PartialJson(json!({
            "name": "edge",
            "vpnRegionId": "eu-central-1",
        })))
        .with_body(
            r#"{"id":"c1","name":"edge","networkItemId":"n1","networkItemType":"NETWORK",
                "vpnRegionId":"eu-central-1","ipV4Address":"100.96.1.2"}"#,
        )
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/beta/connectors/c1")
        .match_query(network_item_query("h1", "HOST"))
        .with_status(204)
        .create_async()
        .await;

    let connector = Connector {
        name: "edge".to_string(),
        vpn_region_id: "eu-central-1".to_string(),
        ..Default::default()
    };
    let created = client
        .connectors()
        .create(&connector, "n1", NetworkItemType::Network)
        .await
        .unwrap();
    assert_eq!(created.id.as_deref(), Some("c1"));
    assert_eq!(created.ipv4_address.as_deref(), Some("100.96.1.2"));

    client
        .connectors()
        .delete("c1", "h1", NetworkItemType::Host)
        .await
        .unwrap();

    create.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn connectors_filter_by_parent() {
    let mut server = Server::new_async().await;
    let client = test_client(&mut server).await;

    let connectors = vec![
        json!({"id": "c1", "name": "a", "networkItemId": "n1", "networkItemType": "NETWORK"}),
        json!({"id": "c2", "name": "b", "networkItemId": "h1", "networkItemType": "HOST"}),
        json!({"id": "c3", "name": "c", "networkItemId": "n1", "networkItemType": "NETWORK"}),
    ];
    let _pages = mock_pages(&mut server, "/api/beta/connectors/page", &connectors, 10, 2).await;

    let for_network = client.connectors().list_for_network("n1").await.unwrap();
    let names: Vec<_> = for_network.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);

    let for_host = client.connectors().list_for_host("h1").await.unwrap();
    assert_eq!(for_host.len(), 1);
    assert_eq!(for_host[0].id.as_deref(), Some("c2"));
}

#[tokio::test]
async fn connector_profile_is_returned_as_text() {
    let mut server = Server::new_async().await;
    let client = test_client(&mut server).await;

    let profile = server
        .mock("POST", "/api/beta/connectors/c1/profile")
        .with_header("content-type", "text/plain")
        .with_body("client\ndev tun\nproto udp\n")
        .create_async()
        .await;

    let text = client.connectors().profile("c1").await.unwrap();
    assert!(text.starts_with("client\ndev tun"));
    profile.assert_async().await;
}

#[tokio::test]
async fn network_lookup_by_name_returns_first_match() {
    let mut server = Server::new_async().await;
    let client = test_client(&mut server).await;

    let networks = vec![
        json!({"id": "n1", "name": "office", "internetAccess": "LOCAL"}),
        json!({"id": "n2", "name": "office", "internetAccess": "BLOCKED"}),
    ];
    let _pages = mock_pages(&mut server, "/api/beta/networks/page", &networks, 10, 1).await;

    let network = client.networks().get_by_name("office").await.unwrap().unwrap();
    assert_eq!(network.id.as_deref(), Some("n1"));
}

#[tokio::test]
async fn user_group_update_returns_server_copy() {
    let mut server = Server::new_async().await;
    let client = test_client(&mut server).await;

    let update = server
        .mock("PUT", "/api/beta/user-groups/g1")
        .match_body(Matcher::PartialJson(json!({"name": "ops", "maxDevice": 3})))
        .with_body(
            r#"{"id":"g1","name":"ops","connectAuth":"AUTO","vpnRegionIds":["eu-central-1"],
                "internetAccess":"GLOBAL_INTERNET","maxDevice":3,"systemSubnets":null}"#,
        )
        .create_async()
        .await;

    let group = UserGroup {
        name: "ops".to_string(),
        max_device: 3,
        ..Default::default()
    };
    let updated = client.user_groups().update("g1", &group).await.unwrap();

    assert_eq!(updated.connect_auth.as_deref(), Some("AUTO"));
    assert_eq!(updated.vpn_region_ids, vec!["eu-central-1".to_string()]);
    assert!(updated.system_subnets.is_empty());
    update.assert_async().await;
}

#[tokio::test]
async fn dns_record_lookup_by_domain() {
    let mut server = Server::new_async().await;
    let client = test_client(&mut server).await;

    let records: Vec<_> = (0..12)
        .map(|i| {
            json!({
                "id": format!("d{}", i),
                "domain": format!("host{}.corp.example.com", i),
                "ipv4Addresses": [format!("10.0.0.{}", i)],
                "ipv6Addresses": null,
            })
        })
        .collect();
    let _pages = mock_pages(&mut server, "/api/beta/dns-records/page", &records, 10, 1).await;

    let record: DnsRecord = client
        .dns_records()
        .get_by_domain("host11.corp.example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.id.as_deref(), Some("d11"));
    assert_eq!(record.ipv4_addresses, vec!["10.0.0.11".to_string()]);
    assert!(record.ipv6_addresses.is_empty());
}

#[tokio::test]
async fn ip_service_writes_use_owner_from_entity() {
    let mut server = Server::new_async().await;
    let client = test_client(&mut server).await;

    let create = server
        .mock("POST", "/api/beta/ip-services")
        .match_query(network_item_query("h1", "HOST"))
        .match_body(Matcher::PartialJson(json!({
            "name": "web",
            "config": {"serviceTypes": ["HTTP"]},
        })))
        .with_body(
            r#"{"id":"s1","name":"web","networkItemType":"HOST","networkItemId":"h1",
                "type":"IP_SOURCE","routes":[],"config":{"serviceTypes":["HTTP"],
                "customServiceTypes":[]}}"#,
        )
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/api/beta/ip-services/s1")
        .match_query(network_item_query("h1", "HOST"))
        .with_body(
            r#"{"id":"s1","name":"web-renamed","networkItemType":"HOST","networkItemId":"h1",
                "type":"IP_SOURCE","routes":null,"config":null}"#,
        )
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/beta/ip-services/s1")
        .match_query(network_item_query("h1", "HOST"))
        .with_status(204)
        .create_async()
        .await;

    let service = IpService {
        name: "web".to_string(),
        network_item_id: "h1".to_string(),
        network_item_type: NetworkItemType::Host,
        service_type: "IP_SOURCE".to_string(),
        config: Some(IpServiceConfig {
            service_types: vec!["HTTP".to_string()],
            ..Default::default()
        }),
        ..Default::default()
    };
    let created = client.ip_services().create(&service).await.unwrap();
    assert_eq!(created.id.as_deref(), Some("s1"));

    let renamed = IpService {
        name: "web-renamed".to_string(),
        ..created
    };
    let updated = client.ip_services().update("s1", &renamed).await.unwrap();
    assert_eq!(updated.name, "web-renamed");
    assert!(updated.config.is_none());

    client
        .ip_services()
        .delete("s1", "h1", NetworkItemType::Host)
        .await
        .unwrap();

    create.assert_async().await;
    update.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn vpn_regions_come_from_a_single_request() {
    let mut server = Server::new_async().await;
    let client = test_client(&mut server).await;

    let regions = server
        .mock("GET", "/api/beta/regions")
        .with_body(
            json!([
                {"id": "us-east-1", "continent": "North America", "country": "United States",
                 "countryIso": "US", "regionName": "Ashburn"},
                {"id": "eu-central-1", "continent": "Europe", "country": "Germany",
                 "countryIso": "DE", "regionName": "Frankfurt"},
            ])
            .to_string(),
        )
        .expect(3)
        .create_async()
        .await;

    assert_eq!(client.vpn_regions().list().await.unwrap().len(), 2);

    let region = client.vpn_regions().get_by_id("eu-central-1").await.unwrap().unwrap();
    assert_eq!(region.country_iso, "DE");

    assert!(client.vpn_regions().get_by_id("ap-south-1").await.unwrap().is_none());
    regions.assert_async().await;
}

#[tokio::test]
async fn host_create_and_update_round_trip_paths() {
    let mut server = Server::new_async().await;
    let client = test_client(&mut server).await;

    let create = server
        .mock("POST", "/api/beta/hosts")
        .match_body(Matcher::PartialJson(json!({
            "name": "db",
            "internetAccess": "BLOCKED",
        })))
        .with_body(r#"{"id":"h1","name":"db","internetAccess":"BLOCKED","connectors":null}"#)
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/api/beta/hosts/h1")
        .match_body(Matcher::PartialJson(json!({"description": "primary db"})))
        .with_status(200)
        .create_async()
        .await;

    let host = cloudconnexa::api::Host {
        name: "db".to_string(),
        internet_access: cloudconnexa::api::InternetAccess::Blocked,
        ..Default::default()
    };
    let mut created = client.hosts().create(&host).await.unwrap();
    assert!(created.connectors.is_empty());

    created.description = Some("primary db".to_string());
    client.hosts().update("h1", &created).await.unwrap();

    create.assert_async().await;
    update.assert_async().await;
}
