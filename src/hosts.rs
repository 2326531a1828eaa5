//! Host entries derived from leases, and the store they are published to.
//!
//! Each lease becomes one [`HostEntry`]: a single fully-qualified name
//! mapped to the leased address, grouped under an owner key unique to that
//! address (`dhcp-server-<ip>`). Staging an owner key replaces whatever the
//! store previously held under it once the batch is applied.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::lease::LeaseRecord;

/// Prefix of the owner key every lease entry is staged under.
pub const OWNER_PREFIX: &str = "dhcp-server-";

/// Prefix of names synthesized from the client's link-layer address.
const FALLBACK_NAME_PREFIX: &str = "host-";

/// Addresses and aliases published for one name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostAddresses {
    pub address: Vec<String>,
    pub aliases: Vec<String>,
}

/// Owner key → name → addresses, the shape accepted by [`HostsStore::add_hosts`].
pub type HostEntries = BTreeMap<String, BTreeMap<String, HostAddresses>>;

/// Returns the name a lease is published under.
///
/// The client's own hostname wins; otherwise a name is built from its
/// link-layer address with `:` replaced by `-`. Returns `None` when the
/// lease carries neither.
pub fn display_name(lease: &LeaseRecord) -> Option<String> {
    match lease.hostname.as_deref() {
        Some(hostname) if !hostname.is_empty() => Some(hostname.to_string()),
        _ => lease
            .mac
            .as_deref()
            .filter(|mac| !mac.is_empty())
            .map(|mac| format!("{}{}", FALLBACK_NAME_PREFIX, mac.replace(':', "-"))),
    }
}

/// Appends `domain` to `name` when a non-empty domain is given.
pub fn fqdn(name: &str, domain: Option<&str>) -> String {
    match domain {
        Some(domain) if !domain.is_empty() => format!("{}.{}", name, domain),
        _ => name.to_string(),
    }
}

/// Why a lease produced no host entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingAddress,
    MissingName,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingAddress => write!(f, "lease has no address"),
            SkipReason::MissingName => write!(f, "lease has neither hostname nor MAC address"),
        }
    }
}

/// A single name → address mapping owned by one lease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    pub owner: String,
    pub fqdn: String,
    pub address: String,
}

impl HostEntry {
    pub fn from_lease(lease: &LeaseRecord) -> Result<Self, SkipReason> {
        if lease.ip.is_empty() {
            return Err(SkipReason::MissingAddress);
        }

        let name = display_name(lease).ok_or(SkipReason::MissingName)?;

        Ok(Self {
            owner: format!("{}{}", OWNER_PREFIX, lease.ip),
            fqdn: fqdn(&name, lease.domain.as_deref()),
            address: lease.ip.clone(),
        })
    }

    pub fn into_entries(self) -> HostEntries {
        let addresses = HostAddresses {
            address: vec![self.address],
            aliases: Vec::new(),
        };
        BTreeMap::from([(self.owner, BTreeMap::from([(self.fqdn, addresses)]))])
    }
}

/// A hosts resolution store that stages entries and commits them as a batch.
#[async_trait]
pub trait HostsStore: Send {
    /// Store specific failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Stages host entries; nothing is visible until [`apply`](Self::apply).
    async fn add_hosts(&mut self, entries: HostEntries) -> Result<(), Self::Error>;

    /// Commits every staged entry in one operation.
    async fn apply(&mut self) -> Result<(), Self::Error>;
}
