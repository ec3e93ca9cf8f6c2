//! One PowerDNS server process behind the API.
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use super::client::PowerDnsClient;
use super::rrset::RRSet;
use super::soa::SoaParams;
use super::types::{ConfigSetting, PdnsServer, PdnsZone, PdnsZoneCreate, SearchResult, ZoneKind};
use super::zone::{Zone, zone_id};
use crate::error::{PdnsError, PdnsResult};
use crate::validation::validate_canonical_name;

/// Everything needed to create a zone.
#[derive(Clone, Debug)]
pub struct NewZone {
    pub name: String,
    pub kind: ZoneKind,
    pub nameservers: Vec<String>,
    pub masters: Vec<String>,
    pub rrsets: Vec<RRSet>,
    pub soa: Option<SoaParams>,
}

impl NewZone {
    pub fn new(name: impl Into<String>, kind: ZoneKind) -> Self {
        Self {
            name: name.into(),
            kind,
            nameservers: Vec::new(),
            masters: Vec::new(),
            rrsets: Vec::new(),
            soa: None,
        }
    }

    pub fn with_nameservers(mut self, nameservers: Vec<String>) -> Self {
        self.nameservers = nameservers;
        self
    }

    pub fn with_masters(mut self, masters: Vec<String>) -> Self {
        self.masters = masters;
        self
    }

    pub fn with_rrsets(mut self, rrsets: Vec<RRSet>) -> Self {
        self.rrsets = rrsets;
        self
    }

    pub fn with_soa(mut self, soa: SoaParams) -> Self {
        self.soa = Some(soa);
        self
    }

    /// Request body; the SOA rrset, when requested, comes first.
    pub fn into_body(self) -> PdnsZoneCreate {
        let mut rrsets = Vec::with_capacity(self.rrsets.len() + 1);
        if let Some(soa) = &self.soa {
            rrsets.push(soa.rrset(&self.name));
        }
        rrsets.extend(self.rrsets);
        PdnsZoneCreate {
            name: self.name,
            kind: self.kind,
            nameservers: self.nameservers,
            masters: self.masters,
            rrsets,
        }
    }
}

pub struct Server<'a> {
    client: &'a PowerDnsClient,
    id: String,
    info: Option<PdnsServer>,
}

impl<'a> Server<'a> {
    /// Handle on a server id without querying the API.
    pub fn new(client: &'a PowerDnsClient, id: impl Into<String>) -> Self {
        Self {
            client,
            id: id.into(),
            info: None,
        }
    }

    pub(crate) fn from_info(client: &'a PowerDnsClient, info: PdnsServer) -> Self {
        Self {
            client,
            id: info.id.clone(),
            info: Some(info),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn info(&self) -> Option<&PdnsServer> {
        self.info.as_ref()
    }

    pub fn daemon_type(&self) -> Option<&str> {
        self.info.as_ref().and_then(|i| i.daemon_type.as_deref())
    }

    pub fn version(&self) -> Option<&str> {
        self.info.as_ref().and_then(|i| i.version.as_deref())
    }

    pub fn path(&self) -> String {
        format!("/servers/{}", self.id)
    }

    fn zones_path(&self) -> String {
        format!("{}/zones", self.path())
    }

    pub async fn config(&self) -> PdnsResult<Vec<ConfigSetting>> {
        info!(server = %self.id, "getting server configuration");
        self.client.get(&format!("{}/config", self.path())).await
    }

    pub async fn list_zones(&self) -> PdnsResult<Vec<Zone<'a>>> {
        info!(server = %self.id, "listing zones");
        let zones: Vec<PdnsZone> = self.client.get(&self.zones_path()).await?;
        info!(server = %self.id, count = zones.len(), "zones listed");
        zones
            .into_iter()
            .map(|z| Zone::from_info(self.client, &self.id, z))
            .collect()
    }

    /// Fetch one zone with its full detail.
    pub async fn get_zone(&self, name: &str) -> PdnsResult<Zone<'a>> {
        info!(server = %self.id, zone = name, "getting zone");
        let mut zone = Zone::new(self.client, &self.id, name)?;
        zone.load().await?;
        Ok(zone)
    }

    /// Zone whose name is the longest suffix of `record_name`.
    ///
    /// The root zone `.` matches every name and loses to any other match.
    pub async fn suggest_zone(&self, record_name: &str) -> PdnsResult<Option<Zone<'a>>> {
        validate_canonical_name(record_name)?;
        info!(server = %self.id, record = record_name, "suggesting zone");
        let best = self
            .list_zones()
            .await?
            .into_iter()
            .filter(|z| {
                z.name() == "."
                    || record_name == z.name()
                    || record_name.ends_with(&format!(".{}", z.name()))
            })
            .max_by_key(|z| z.name().len());
        info!(
            zone = best.as_ref().map(|z| z.name()).unwrap_or("-"),
            "zone best match"
        );
        Ok(best)
    }

    pub async fn search(&self, term: &str, max_results: u32) -> PdnsResult<Vec<SearchResult>> {
        info!(server = %self.id, term, "api search");
        let results: Vec<SearchResult> = self
            .client
            .get_with_query(
                &format!("{}/search-data", self.path()),
                &[("q", term.to_string()), ("max", max_results.to_string())],
            )
            .await?;
        info!(count = results.len(), "search results");
        Ok(results)
    }

    pub async fn create_zone(&self, zone: NewZone) -> PdnsResult<Zone<'a>> {
        validate_canonical_name(&zone.name)?;
        info!(server = %self.id, zone = %zone.name, "creation of zone");
        let body = zone.into_body();
        debug!(?body, "zone creation body");
        let created: Value = self.client.post(&self.zones_path(), &body).await?;
        let zone = Zone::from_details(self.client, &self.id, created)?;
        info!(zone = zone.name(), "zone successfully created");
        Ok(zone)
    }

    /// Delete a zone by name. A missing zone surfaces as a 404 client error.
    pub async fn delete_zone(&self, name: &str) -> PdnsResult<()> {
        info!(server = %self.id, zone = name, "deletion of zone");
        self.client
            .delete(&format!("{}/{}", self.zones_path(), zone_id(name)))
            .await?;
        Ok(())
    }

    /// Recreate a zone from a file written by [`Zone::backup`].
    pub async fn restore_zone(&self, file: impl AsRef<Path>) -> PdnsResult<Zone<'a>> {
        let file = file.as_ref();
        let data = tokio::fs::read_to_string(file)
            .await
            .map_err(|e| PdnsError::io(file, e))?;
        let mut snapshot: Value = serde_json::from_str(&data)?;
        let Some(fields) = snapshot.as_object_mut() else {
            return Err(PdnsError::InvalidRecord(format!(
                "{} does not hold a zone document",
                file.display()
            )));
        };
        let zone_name = fields
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                PdnsError::InvalidRecord(format!("{} has no zone name", file.display()))
            })?
            .to_string();
        validate_canonical_name(&zone_name)?;
        // NS records travel in the rrsets of the snapshot
        fields.insert("nameservers".into(), Value::Array(Vec::new()));

        info!(server = %self.id, zone = %zone_name, "restoration of zone");
        let created: Value = self.client.post(&self.zones_path(), &snapshot).await?;
        let zone = Zone::from_details(self.client, &self.id, created)?;
        info!(zone = zone.name(), "zone successfully restored");
        Ok(zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::powerdns::soa::Timers;
    use serde_json::json;

    #[test]
    fn new_zone_body_puts_soa_first() {
        let body = NewZone::new("example.tld.", ZoneKind::Master)
            .with_nameservers(vec!["ns0.example.tld.".into(), "ns1.example.tld.".into()])
            .with_rrsets(vec![RRSet::new("www.example.tld.", "A", ["192.0.2.1"])])
            .with_soa(
                SoaParams::new("ns0.example.tld.", "admin.example.tld.")
                    .with_serial("2024010100")
                    .with_timers(Timers::default()),
            )
            .into_body();

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["name"], "example.tld.");
        assert_eq!(value["kind"], "Master");
        assert_eq!(
            value["nameservers"],
            json!(["ns0.example.tld.", "ns1.example.tld."])
        );
        assert_eq!(value["rrsets"][0]["type"], "SOA");
        assert_eq!(
            value["rrsets"][0]["records"][0]["content"],
            "ns0.example.tld. admin.example.tld. 2024010100 28800 7200 604800 86400"
        );
        assert_eq!(value["rrsets"][1]["name"], "www.example.tld.");
        assert!(value.get("masters").is_none());
    }

    #[test]
    fn new_zone_without_soa_sends_no_rrsets() {
        let body = NewZone::new("example.tld.", ZoneKind::Native).into_body();
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("rrsets").is_none());
        assert_eq!(value["nameservers"], json!([]));
    }
}
