//! DHCP lease records as reported by the running server.
//!
//! A [`LeaseRecord`] is a read-only snapshot of one lease for the duration
//! of a sync run. Records are produced by a
//! [`LeaseSource`](crate::kea::LeaseSource) and consumed by the hostname
//! formatter; nothing here is persisted.

use chrono::{DateTime, Utc};

/// State of a lease in the server's lease database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseState {
    /// The lease is in use by a client.
    Active,
    /// The client declined the address.
    Rejected,
    /// The lease expired and was reclaimed.
    Expired,
}

impl TryFrom<u8> for LeaseState {
    type Error = u8;

    /// Maps the server's numeric lease state.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(LeaseState::Active),
            1 => Ok(LeaseState::Rejected),
            2 => Ok(LeaseState::Expired),
            other => Err(other),
        }
    }
}

/// Which server of a high-availability pair handed out the lease.
///
/// Kea does not report the origin, so leases read from it are `Local`;
/// `Remote` is what an origin filter selects on an HA peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseOrigin {
    Local,
    Remote,
}

/// One lease binding an address to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaseRecord {
    /// The leased address.
    pub ip: String,

    /// Link-layer address of the client, colon separated.
    pub mac: Option<String>,

    /// Client hostname without a trailing dot.
    pub hostname: Option<String>,

    /// Domain configured for the lease's subnet or shared network.
    pub domain: Option<String>,

    /// Name of the shared network (pool) owning the lease's subnet.
    pub pool: Option<String>,

    pub state: LeaseState,

    pub origin: LeaseOrigin,

    /// Client last transmission time (UTC).
    pub start: DateTime<Utc>,

    /// When the lease runs out (UTC).
    pub expires: DateTime<Utc>,
}

impl LeaseRecord {
    /// Creates an active, local lease valid for the next hour.
    ///
    /// Mostly useful for building records by hand; leases read from the
    /// server carry their real timestamps.
    pub fn new(ip: impl Into<String>, mac: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            ip: ip.into(),
            mac: mac.map(str::to_string),
            hostname: None,
            domain: None,
            pool: None,
            state: LeaseState::Active,
            origin: LeaseOrigin::Local,
            start: now,
            expires: now + chrono::TimeDelta::hours(1),
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_pool(mut self, pool: impl Into<String>) -> Self {
        self.pool = Some(pool.into());
        self
    }
}

/// Restricts which leases a [`LeaseSource`](crate::kea::LeaseSource) returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaseFilter {
    /// Accepted states; empty accepts every state.
    pub states: Vec<LeaseState>,
    /// Accepted origin; `None` accepts every origin.
    pub origin: Option<LeaseOrigin>,
}

impl LeaseFilter {
    pub fn matches(&self, lease: &LeaseRecord) -> bool {
        let state_ok = self.states.is_empty() || self.states.contains(&lease.state);
        let origin_ok = self.origin.is_none_or(|origin| origin == lease.origin);
        state_ok && origin_ok
    }
}
