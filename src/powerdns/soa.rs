//! SOA record assembly for new zones.
use std::fmt;
use std::str::FromStr;

use super::rrset::RRSet;

pub const SOA_TTL: u32 = 86400;

/// SOA refresh/retry/expire/minimum timers, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timers {
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

impl Default for Timers {
    fn default() -> Self {
        Self {
            refresh: 28800,
            retry: 7200,
            expire: 604800,
            minimum: 86400,
        }
    }
}

impl fmt::Display for Timers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.refresh, self.retry, self.expire, self.minimum
        )
    }
}

impl FromStr for Timers {
    type Err = String;

    /// Parse four whitespace separated integers, e.g. `28800 7200 604800 86400`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(|part| {
                part.parse::<u32>()
                    .map_err(|_| format!("invalid timer value '{part}'"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let [refresh, retry, expire, minimum] = values[..] else {
            return Err(format!("expected 4 timers, got {}", values.len()));
        };
        Ok(Timers {
            refresh,
            retry,
            expire,
            minimum,
        })
    }
}

/// Date based serial for today: `YYYYMMDD00`.
pub fn default_serial() -> String {
    chrono::Local::now().format("%Y%m%d00").to_string()
}

/// Values the SOA record of a new zone is built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoaParams {
    pub origin: String,  // primary nameserver, "ns0.example.tld."
    pub contact: String, // mailbox in name form, "admin.example.tld."
    pub serial: Option<String>,
    pub timers: Timers,
}

impl SoaParams {
    pub fn new(origin: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            contact: contact.into(),
            serial: None,
            timers: Timers::default(),
        }
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    pub fn with_timers(mut self, timers: Timers) -> Self {
        self.timers = timers;
        self
    }

    /// SOA RDATA: `origin contact serial refresh retry expire minimum`.
    pub fn content(&self) -> String {
        let serial = self.serial.clone().unwrap_or_else(default_serial);
        format!("{} {} {} {}", self.origin, self.contact, serial, self.timers)
    }

    pub fn rrset(&self, zone: &str) -> RRSet {
        RRSet::new(zone, "SOA", [self.content()]).with_ttl(SOA_TTL)
    }
}
