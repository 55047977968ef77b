use cloudconnexa::{CloudConnexaProvider, ProviderConfig};
use tracing::info;

/// Lists every network with its routes and connectors.
///
/// Reads `CLOUDCONNEXA_CLIENT_ID`, `CLOUDCONNEXA_CLIENT_SECRET` and
/// `CLOUDCONNEXA_BASE_URL` from the environment.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let mut provider = CloudConnexaProvider::new();
    provider.configure(ProviderConfig::new()).await?;
    let client = provider.client()?;

    let networks = client.networks().list_all().await?;
    info!("Found {} networks", networks.len());

    for network in &networks {
        let Some(id) = network.id.as_deref() else {
            continue;
        };
        info!("{} ({}), internet access {:?}", network.name, id, network.internet_access);

        for route in client.routes().list(id).await? {
            info!("  route {:?} -> {}", route.route_type, route.target().unwrap_or("-"));
        }
        for connector in client.connectors().list_for_network(id).await? {
            info!(
                "  connector {} in {} ({:?})",
                connector.name, connector.vpn_region_id, connector.connection_status
            );
        }
    }

    let regions = client.vpn_regions().list().await?;
    info!("{} VPN regions available", regions.len());

    let stats = client.stats().await;
    info!(
        "{} requests, {} failed",
        stats.total_requests, stats.failed_requests
    );

    Ok(())
}
