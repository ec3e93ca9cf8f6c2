//! Resource record set value objects matching the PowerDNS JSON schema.
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PdnsError, PdnsResult};
use crate::validation::{ValidationError, is_canonical};

pub const DEFAULT_TTL: u32 = 3600;

/// How PowerDNS applies an rrset submitted in a zone PATCH.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    Replace,
    Delete,
}

/// One record value (RDATA) inside an rrset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    pub content: String, // "192.0.2.1" or "ns1.example.net."
    #[serde(default)]
    pub disabled: bool,
}

impl Record {
    pub fn new(content: impl Into<String>, disabled: bool) -> Self {
        Self {
            content: content.into(),
            disabled,
        }
    }
}

impl From<&str> for Record {
    fn from(content: &str) -> Self {
        Record::new(content, false)
    }
}

impl From<String> for Record {
    fn from(content: String) -> Self {
        Record::new(content, false)
    }
}

impl<S: Into<String>> From<(S, bool)> for Record {
    fn from((content, disabled): (S, bool)) -> Self {
        Record::new(content, disabled)
    }
}

/// Free-text note attached to an rrset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub content: String,
    #[serde(default)]
    pub account: String,
    /// Unix timestamp; PowerDNS fills it in when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<i64>,
}

impl Comment {
    pub fn new(content: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            account: account.into(),
            modified_at: None,
        }
    }

    /// Comment stamped with the current time.
    pub fn now(content: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            modified_at: Some(chrono::Utc::now().timestamp()),
            ..Self::new(content, account)
        }
    }
}

/// All records of one name and type, managed as a unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RRSet {
    pub name: String, // "www.example.com."
    #[serde(rename = "type")]
    pub rtype: String, // "A", "NS", ...
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changetype: Option<ChangeType>,
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Fields PowerDNS returns that this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

impl RRSet {
    /// Build a REPLACE rrset. Records may be given as bare strings
    /// (enabled), `(content, disabled)` pairs or [`Record`] values.
    pub fn new<I, R>(name: impl Into<String>, rtype: impl Into<String>, records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Record>,
    {
        Self {
            name: name.into(),
            rtype: rtype.into(),
            ttl: DEFAULT_TTL,
            changetype: Some(ChangeType::Replace),
            records: records.into_iter().map(Into::into).collect(),
            comments: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Name and type only, as needed to remove an rrset.
    pub fn delete(name: impl Into<String>, rtype: impl Into<String>) -> Self {
        Self {
            changetype: Some(ChangeType::Delete),
            ..Self::new(name, rtype, Vec::<Record>::new())
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_changetype(mut self, changetype: ChangeType) -> Self {
        self.changetype = Some(changetype);
        self
    }

    pub fn to_json(&self) -> PdnsResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_json(value: &Value) -> PdnsResult<Self> {
        RRSet::deserialize(value).map_err(|e| PdnsError::InvalidRecord(e.to_string()))
    }

    /// Parse the `rrsets` array of a zone detail document.
    pub fn list_from_zone_json(zone: &Value) -> PdnsResult<Vec<Self>> {
        match zone.get("rrsets") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items.iter().map(RRSet::from_json).collect(),
            Some(other) => Err(PdnsError::InvalidRecord(format!(
                "rrsets is not a list: {other}"
            ))),
        }
    }

    /// Qualify a relative rrset name (and relative CNAME targets) with `zone`.
    ///
    /// Only runs when called; the rrset is otherwise sent as built.
    pub fn ensure_canonical(&mut self, zone: &str) -> Result<(), ValidationError> {
        if !is_canonical(zone) {
            return Err(ValidationError::NotCanonical(zone.to_string()));
        }
        if !is_canonical(&self.name) {
            tracing::debug!(name = %self.name, zone, "qualifying rrset name");
            self.name = format!("{}.{}", self.name, zone);
        }
        if self.rtype == "CNAME" {
            for record in &mut self.records {
                if !is_canonical(&record.content) {
                    record.content = format!("{}.{}", record.content, zone);
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for RRSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let contents: Vec<&str> = self.records.iter().map(|r| r.content.as_str()).collect();
        write!(
            f,
            "(ttl={}) {}  {}  {:?}",
            self.ttl, self.name, self.rtype, contents
        )
    }
}
