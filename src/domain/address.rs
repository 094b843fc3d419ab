//! Addresses parsed out of command output.

use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

/// Port Consul serves its HTTP API on.
pub const CONSUL_PORT: u16 = 8500;

/// Find the first IPv4 dotted quad in free-form command output.
///
/// Provisioning tools print warnings and progress around the address, so the
/// text is scanned token by token rather than parsed as a whole.
///
/// A token is a maximal run of digits and dots, and must parse as an
/// [`Ipv4Addr`] in full. That is stricter than matching four 1-3 digit
/// groups: octets above 255, octets with a leading zero (`10.0.0.07`) and
/// quads followed by more `.digits` (`10.0.0.7.5`) are not addresses.
#[must_use]
pub fn extract_ipv4(text: &str) -> Option<Ipv4Addr> {
    text.split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .filter(|token| !token.is_empty())
        .find_map(|token| token.trim_matches('.').parse().ok())
}

/// The resolved address of the key-value store node.
///
/// Only obtainable by ensuring the store exists, which is what orders store
/// creation before every swarm node creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KvStoreAddress(Ipv4Addr);

impl KvStoreAddress {
    pub(crate) fn new(ip: Ipv4Addr) -> Self {
        Self(ip)
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.0
    }

    /// `consul://<ip>:8500`, used for swarm discovery and the engine cluster store.
    pub fn consul_url(&self) -> String {
        format!("consul://{}:{CONSUL_PORT}", self.0)
    }
}

impl fmt::Display for KvStoreAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
