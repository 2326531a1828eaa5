//! One sync run: configuration checks, lease collection, store update.

use tracing::{Instrument, debug, info_span, warn};

use crate::cli::AddressFamily;
use crate::error::{Error, Result};
use crate::hosts::{HostEntry, HostsStore};
use crate::kea::{LeaseSource, collect_leases};
use crate::query::ConfigQuery;

/// How a run that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Hostfile update is disabled; nothing was read or written.
    Disabled,
    /// The store was updated.
    Updated {
        /// Host entries committed.
        hosts: usize,
        /// Leases that could not be turned into a host entry.
        skipped: usize,
    },
}

/// Publishes the DHCP server's leases for `family` to `store`.
///
/// The capability handles are only touched once the previous step allows
/// it: IPv6 is rejected before any query, an unconfigured or disabled
/// server stops the run before leases are read, and the store is only used
/// after all leases were collected. Staged entries become visible through a
/// single [`HostsStore::apply`].
///
/// # Errors
///
/// - [`Error::UnsupportedOperation`] for [`AddressFamily::Inet6`]
/// - [`Error::UnconfiguredSubsystem`] if no DHCP server is configured
/// - [`Error::DataUnavailable`] if configuration or leases cannot be read
/// - [`Error::InternalError`] if the configuration query or the store fails
pub async fn run<Q, S, H>(
    family: AddressFamily,
    query: &Q,
    source: &S,
    store: &mut H,
) -> Result<SyncOutcome>
where
    Q: ConfigQuery + ?Sized,
    S: LeaseSource + ?Sized,
    H: HostsStore + ?Sized,
{
    let span = info_span!("sync", %family);
    sync_leases(family, query, source, store).instrument(span).await
}

async fn sync_leases<Q, S, H>(
    family: AddressFamily,
    query: &Q,
    source: &S,
    store: &mut H,
) -> Result<SyncOutcome>
where
    Q: ConfigQuery + ?Sized,
    S: LeaseSource + ?Sized,
    H: HostsStore + ?Sized,
{
    if family == AddressFamily::Inet6 {
        return Err(Error::UnsupportedOperation(
            "Syncing IPv6 DHCP leases are not supported yet".to_string(),
        ));
    }

    let configured = query
        .subsystem_configured()
        .await
        .map_err(|error| Error::InternalError(error.to_string()))?;
    if !configured {
        return Err(Error::UnconfiguredSubsystem(
            "DHCP server is not configured".to_string(),
        ));
    }

    let enabled = query
        .hostfile_update_enabled()
        .await
        .map_err(|error| Error::InternalError(error.to_string()))?;
    if !enabled {
        debug!("Hostfile update is disabled for DHCP server, skipping hosts update");
        return Ok(SyncOutcome::Disabled);
    }

    let leases = collect_leases(source, family).await?;

    let mut hosts = 0;
    let mut skipped = 0;
    for lease in &leases {
        let entry = match HostEntry::from_lease(lease) {
            Ok(entry) => entry,
            Err(reason) => {
                warn!("Skipping lease {:?} ({:?}): {}", lease.ip, lease.mac, reason);
                skipped += 1;
                continue;
            }
        };

        debug!("Staging {} -> {}", entry.fqdn, entry.address);
        store
            .add_hosts(entry.into_entries())
            .await
            .map_err(|error| Error::InternalError(error.to_string()))?;
        hosts += 1;
    }

    store
        .apply()
        .await
        .map_err(|error| Error::InternalError(error.to_string()))?;

    debug!("Hosts store updated successfully");
    Ok(SyncOutcome::Updated { hosts, skipped })
}
