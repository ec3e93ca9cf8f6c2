//! One DNS zone on a PowerDNS server.
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use super::client::PowerDnsClient;
use super::rrset::{ChangeType, RRSet};
use super::types::{PatchBody, PdnsZone, ZoneKind, ZoneUpdate};
use crate::error::{PdnsError, PdnsResult};
use crate::validation::validate_canonical_name;

/// Lifecycle of a [`Zone`] handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneState {
    /// Nothing fetched yet beyond what the zone listing carried.
    Unloaded,
    Loaded,
    /// A change was accepted but the follow-up fetch has not completed.
    Mutated,
    Refreshed,
    /// Terminal: the server-side zone was deleted through this handle.
    Deleted,
}

pub struct Zone<'a> {
    client: &'a PowerDnsClient,
    server_id: String,
    name: String,
    info: Option<PdnsZone>,
    details: Option<Value>,
    rrsets: Vec<RRSet>,
    state: ZoneState,
}

/// Zone id PowerDNS derives from a zone name: `=` and `/` become `=3D` and `=2F`.
pub fn zone_id(name: &str) -> String {
    name.replace('=', "=3D").replace('/', "=2F")
}

impl<'a> Zone<'a> {
    /// Handle on a zone by name. The name must be canonical.
    pub fn new(
        client: &'a PowerDnsClient,
        server_id: impl Into<String>,
        name: impl Into<String>,
    ) -> PdnsResult<Self> {
        let name = name.into();
        validate_canonical_name(&name)?;
        Ok(Self::unchecked(client, server_id.into(), name))
    }

    // Names coming back from the server are taken as PowerDNS stored them.
    fn unchecked(client: &'a PowerDnsClient, server_id: String, name: String) -> Self {
        Self {
            client,
            server_id,
            name,
            info: None,
            details: None,
            rrsets: Vec::new(),
            state: ZoneState::Unloaded,
        }
    }

    pub(crate) fn from_info(
        client: &'a PowerDnsClient,
        server_id: &str,
        info: PdnsZone,
    ) -> PdnsResult<Self> {
        let mut zone = Zone::unchecked(client, server_id.to_string(), info.name.clone());
        zone.info = Some(info);
        Ok(zone)
    }

    pub(crate) fn from_details(
        client: &'a PowerDnsClient,
        server_id: &str,
        details: Value,
    ) -> PdnsResult<Self> {
        let name = details
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                PdnsError::service(
                    client.config().url(&format!("/servers/{server_id}/zones")),
                    None,
                    "zone document without a name",
                )
            })?
            .to_string();
        let mut zone = Zone::unchecked(client, server_id.to_string(), name);
        zone.apply_details(details)?;
        zone.state = ZoneState::Loaded;
        Ok(zone)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    pub fn state(&self) -> ZoneState {
        self.state
    }

    pub fn is_deleted(&self) -> bool {
        self.state == ZoneState::Deleted
    }

    /// Typed zone metadata from the last listing or fetch.
    pub fn info(&self) -> Option<&PdnsZone> {
        self.info.as_ref()
    }

    pub fn kind(&self) -> Option<ZoneKind> {
        self.info.as_ref().map(|i| i.kind)
    }

    pub fn serial(&self) -> Option<u32> {
        self.info.as_ref().and_then(|i| i.serial)
    }

    /// Last fetched zone document, as PowerDNS returned it.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// RRSets from the last fetch, without querying.
    pub fn cached_records(&self) -> &[RRSet] {
        &self.rrsets
    }

    /// API path of this zone, using the server-side zone id when known.
    pub fn path(&self) -> String {
        let id = match self.info.as_ref().and_then(|i| i.id.clone()) {
            Some(id) => id,
            None => zone_id(&self.name),
        };
        format!("/servers/{}/zones/{}", self.server_id, id)
    }

    fn ensure_live(&self) -> PdnsResult<()> {
        if self.state == ZoneState::Deleted {
            return Err(PdnsError::StaleReference {
                zone: self.name.clone(),
            });
        }
        Ok(())
    }

    fn apply_details(&mut self, details: Value) -> PdnsResult<()> {
        let url = self.client.config().url(&self.path());
        let info: PdnsZone = serde_json::from_value(details.clone())
            .map_err(|e| PdnsError::service(&url, None, format!("unexpected zone document: {e}")))?;
        self.rrsets = info.rrsets.clone().unwrap_or_default();
        self.info = Some(info);
        self.details = Some(details);
        Ok(())
    }

    fn invalidate(&mut self) {
        self.details = None;
        self.rrsets.clear();
        self.state = ZoneState::Mutated;
    }

    /// Fetch the full zone document (metadata, rrsets, records, comments).
    pub async fn load(&mut self) -> PdnsResult<&Value> {
        self.ensure_live()?;
        info!(zone = %self.name, "getting zone details");
        let path = self.path();
        let details: Value = self.client.get(&path).await?;
        self.apply_details(details)?;
        self.state = match self.state {
            ZoneState::Mutated => ZoneState::Refreshed,
            _ => ZoneState::Loaded,
        };
        match &self.details {
            Some(details) => Ok(details),
            None => Err(PdnsError::service(path, None, "zone details missing after load")),
        }
    }

    /// Zone rrsets, fetched on first use.
    pub async fn records(&mut self) -> PdnsResult<&[RRSet]> {
        self.ensure_live()?;
        if self.details.is_none() {
            self.load().await?;
        }
        Ok(&self.rrsets)
    }

    /// Every rrset named `name`, whatever its type.
    pub async fn get_record(&mut self, name: &str) -> PdnsResult<Vec<RRSet>> {
        let found: Vec<RRSet> = self
            .records()
            .await?
            .iter()
            .filter(|r| r.name == name)
            .cloned()
            .collect();
        if found.is_empty() {
            info!(zone = %self.name, record = name, "record not found");
        }
        Ok(found)
    }

    async fn patch_rrsets(&mut self, rrsets: Vec<RRSet>) -> PdnsResult<()> {
        debug!(zone = %self.name, ?rrsets, "patching rrsets");
        let path = self.path();
        self.client
            .patch(&path, &PatchBody { rrsets: &rrsets })
            .await?;
        self.invalidate();
        self.load().await?;
        Ok(())
    }

    /// Replace the given rrsets in one PATCH, then refetch the zone.
    pub async fn create_records(
        &mut self,
        rrsets: impl IntoIterator<Item = RRSet>,
    ) -> PdnsResult<()> {
        self.ensure_live()?;
        let rrsets: Vec<RRSet> = rrsets
            .into_iter()
            .map(|r| r.with_changetype(ChangeType::Replace))
            .collect();
        info!(zone = %self.name, count = rrsets.len(), "creating records");
        self.patch_rrsets(rrsets).await
    }

    /// Delete the given rrsets in one PATCH, then refetch the zone.
    ///
    /// Only name and type are sent; record content plays no part in matching.
    pub async fn delete_records(
        &mut self,
        rrsets: impl IntoIterator<Item = RRSet>,
    ) -> PdnsResult<()> {
        self.ensure_live()?;
        let rrsets: Vec<RRSet> = rrsets
            .into_iter()
            .map(|r| RRSet::delete(r.name, r.rtype))
            .collect();
        info!(zone = %self.name, count = rrsets.len(), "deleting records");
        self.patch_rrsets(rrsets).await
    }

    /// Change zone metadata (kind, masters, account, SOA-EDIT policies).
    pub async fn update_metadata(&mut self, update: &ZoneUpdate) -> PdnsResult<()> {
        self.ensure_live()?;
        info!(zone = %self.name, "updating zone metadata");
        let path = self.path();
        self.client.put(&path, Some(update)).await?;
        self.invalidate();
        self.load().await?;
        Ok(())
    }

    /// Ask the server to send NOTIFY to the zone's secondaries.
    pub async fn notify(&self) -> PdnsResult<()> {
        self.ensure_live()?;
        info!(zone = %self.name, "notify");
        self.client
            .put(&format!("{}/notify", self.path()), None::<&()>)
            .await?;
        Ok(())
    }

    /// Delete the zone on the server. The handle is unusable afterwards.
    pub async fn delete(&mut self) -> PdnsResult<()> {
        self.ensure_live()?;
        info!(zone = %self.name, "deleting zone");
        self.client.delete(&self.path()).await?;
        self.details = None;
        self.rrsets.clear();
        self.state = ZoneState::Deleted;
        Ok(())
    }

    /// Default backup file name: zone name without the trailing dot, `.json`.
    pub fn backup_file_name(&self) -> String {
        format!("{}.json", self.name.trim_end_matches('.'))
    }

    /// Write the current zone document to `directory`.
    ///
    /// The directory must exist; it is never created here.
    pub async fn backup(
        &mut self,
        directory: impl AsRef<Path>,
        filename: Option<&str>,
        pretty: bool,
    ) -> PdnsResult<PathBuf> {
        info!(zone = %self.name, "backup of zone");
        let details = self.load().await?;
        let data = if pretty {
            serde_json::to_string_pretty(details)?
        } else {
            serde_json::to_string(details)?
        };

        let file = directory
            .as_ref()
            .join(filename.map(str::to_string).unwrap_or_else(|| self.backup_file_name()));
        info!(path = %file.display(), "backup file");
        tokio::fs::write(&file, data)
            .await
            .map_err(|e| PdnsError::io(&file, e))?;
        info!(zone = %self.name, "zone successfully saved");
        Ok(file)
    }

    /// Replace this zone's rrsets with those of a backup file.
    pub async fn restore_records(&mut self, file: impl AsRef<Path>) -> PdnsResult<()> {
        let file = file.as_ref();
        let data = tokio::fs::read_to_string(file)
            .await
            .map_err(|e| PdnsError::io(file, e))?;
        let snapshot: Value = serde_json::from_str(&data)?;
        let rrsets = RRSet::list_from_zone_json(&snapshot)?;
        info!(zone = %self.name, path = %file.display(), count = rrsets.len(), "restoring records");
        self.create_records(rrsets).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_id_escapes_classless_delegations() {
        assert_eq!(zone_id("example.org."), "example.org.");
        assert_eq!(
            zone_id("0/26.2.0.192.in-addr.arpa."),
            "0=2F26.2.0.192.in-addr.arpa."
        );
        assert_eq!(zone_id("a=b.example.org."), "a=3Db.example.org.");
    }
}
