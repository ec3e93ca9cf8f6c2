use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::rrset::RRSet;

/// Entry of `GET /servers`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PdnsServer {
    pub id: String, // "localhost"
    #[serde(rename = "type", default)]
    pub server_type: Option<String>, // "Server"
    #[serde(default)]
    pub daemon_type: Option<String>, // "authoritative"
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub config_url: Option<String>,
    #[serde(default)]
    pub zones_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Replication role of a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    Native,
    #[serde(alias = "Primary")]
    Master,
    #[serde(alias = "Secondary")]
    Slave,
    Producer,
    Consumer,
}

impl std::str::FromStr for ZoneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "native" => Ok(ZoneKind::Native),
            "master" | "primary" => Ok(ZoneKind::Master),
            "slave" | "secondary" => Ok(ZoneKind::Slave),
            "producer" => Ok(ZoneKind::Producer),
            "consumer" => Ok(ZoneKind::Consumer),
            other => Err(format!("unknown zone kind '{other}'")),
        }
    }
}

/// Zone as returned by the zone list and zone detail endpoints.
///
/// The list endpoint leaves `rrsets` out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PdnsZone {
    #[serde(default)]
    pub id: Option<String>, // "example.com."
    pub name: String, // "example.com."
    #[serde(rename = "type", default)]
    pub zone_type: Option<String>, // "Zone"
    pub kind: ZoneKind,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub serial: Option<u32>,
    #[serde(default)]
    pub notified_serial: Option<u32>,
    #[serde(default)]
    pub edited_serial: Option<u32>,
    #[serde(default)]
    pub masters: Vec<String>,
    #[serde(default)]
    pub dnssec: Option<bool>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub soa_edit: Option<String>,
    #[serde(default)]
    pub soa_edit_api: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rrsets: Option<Vec<RRSet>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Used when creating a zone
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PdnsZoneCreate {
    pub name: String, // "sub.base.example.com."
    pub kind: ZoneKind,
    pub nameservers: Vec<String>, // ["ns1.example.net.", "ns2.example.net."]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub masters: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rrsets: Vec<RRSet>,
}

/// Body of `PUT /servers/{id}/zones/{zone}`; only set fields are sent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ZoneUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ZoneKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa_edit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa_edit_api: Option<String>,
}

/// Body of a zone PATCH.
#[derive(Debug, Serialize)]
pub struct PatchBody<'a> {
    pub rrsets: &'a [RRSet],
}

/// Entry of `GET /servers/{id}/config`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigSetting {
    pub name: String,
    #[serde(rename = "type", default)]
    pub setting_type: Option<String>, // "ConfigSetting"
    pub value: Value,
}

/// Entry of `GET /servers/{id}/search-data`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object_type", rename_all = "lowercase")]
pub enum SearchResult {
    Zone {
        name: String,
        zone_id: String,
    },
    Record {
        name: String,
        #[serde(rename = "type")]
        rtype: String,
        content: String,
        #[serde(default)]
        disabled: bool,
        #[serde(default)]
        ttl: Option<u32>,
        zone: String,
        zone_id: String,
    },
    Comment {
        name: String,
        content: String,
        zone: String,
        zone_id: String,
    },
}
