//! Client library for the PowerDNS authoritative server HTTP API.
//!
//! [`Endpoint`] lists the servers behind an API, a [`Server`] manages its
//! zones and a [`Zone`] manages its rrsets. All of them share one
//! [`PowerDnsClient`] that performs the actual requests.

pub mod config;
pub mod error;
pub mod powerdns;
pub mod validation;

pub use config::ApiConfig;
pub use error::{PdnsError, PdnsResult};
pub use powerdns::{
    ChangeType, Comment, Endpoint, NewZone, PowerDnsClient, RRSet, Record, Server, SoaParams,
    Timers, Zone, ZoneKind, ZoneState, ZoneUpdate,
};
