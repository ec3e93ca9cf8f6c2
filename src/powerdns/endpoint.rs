use tracing::{debug, info};

use super::client::PowerDnsClient;
use super::server::Server;
use super::types::PdnsServer;
use crate::config::ApiConfig;
use crate::error::PdnsResult;

/// Entry point to a PowerDNS API, which may front several servers.
#[derive(Clone, Debug)]
pub struct Endpoint {
    client: PowerDnsClient,
}

impl Endpoint {
    pub fn new(config: ApiConfig) -> PdnsResult<Self> {
        Ok(Self::from_client(PowerDnsClient::new(config)?))
    }

    pub fn from_client(client: PowerDnsClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &PowerDnsClient {
        &self.client
    }

    /// Servers behind the API. Queried on every call.
    pub async fn list_servers(&self) -> PdnsResult<Vec<Server<'_>>> {
        info!("listing available PowerDNS servers");
        let servers: Vec<PdnsServer> = self.client.get("/servers").await?;
        info!(count = servers.len(), "server(s) listed");
        debug!(?servers, "listed servers");
        Ok(servers
            .into_iter()
            .map(|s| Server::from_info(&self.client, s))
            .collect())
    }

    pub async fn get_server(&self, id: &str) -> PdnsResult<Server<'_>> {
        let server: PdnsServer = self.client.get(&format!("/servers/{id}")).await?;
        Ok(Server::from_info(&self.client, server))
    }

    /// Bind a server handle to a known id, e.g. `localhost`.
    pub fn server(&self, id: impl Into<String>) -> Server<'_> {
        Server::new(&self.client, id)
    }
}
