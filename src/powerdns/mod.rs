//! PowerDNS HTTP API: transport, wire types and the server/zone object model.

pub mod client;
pub mod endpoint;
pub mod rrset;
pub mod server;
pub mod soa;
pub mod types;
pub mod zone;

pub use client::PowerDnsClient;
pub use endpoint::Endpoint;
pub use rrset::{ChangeType, Comment, RRSet, Record};
pub use server::{NewZone, Server};
pub use soa::{SoaParams, Timers};
pub use types::{ZoneKind, ZoneUpdate};
pub use zone::{Zone, ZoneState};
