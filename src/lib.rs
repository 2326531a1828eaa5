//! # dhcp-hosts-sync
//!
//! Publishes the leases of a running Kea DHCP server as host entries in
//! the hosts daemon, so that DHCP clients resolve by name.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dhcp_hosts_sync::{AddressFamily, CliShellApi, HostsdClient, KeaControl, Settings};
//!
//! # async fn example() -> dhcp_hosts_sync::Result<()> {
//! let settings = Settings::default();
//! let query = CliShellApi::new(&settings.cli_shell_api);
//! let kea = KeaControl::new(settings.kea_ctrl_socket.clone());
//! let mut hosts = HostsdClient::new(settings.hostsd_endpoint.clone(), settings.hostsd_timeout);
//!
//! dhcp_hosts_sync::sync::run(AddressFamily::Inet, &query, &kea, &mut hosts).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`Cli`] - `--inet` / `--inet6` selection
//! - [`ConfigQuery`] - whether the DHCP server and hostfile update are configured
//! - [`LeaseSource`] - active configuration, pools, and leases ([`KeaControl`])
//! - [`HostEntry`] - the name a lease is published under
//! - [`HostsStore`] - staged, batch-committed host entries ([`HostsdClient`])
//! - [`sync::run`] - one run over the capabilities above

pub mod cli;
pub mod config;
pub mod error;
pub mod hosts;
pub mod hostsd;
pub mod kea;
pub mod lease;
pub mod logging;
pub mod query;
pub mod sync;

pub use cli::{AddressFamily, Cli};
pub use config::Settings;
pub use error::{Error, Result};
pub use hosts::{HostEntries, HostEntry, HostsStore};
pub use hostsd::HostsdClient;
pub use kea::{KeaControl, LeaseSource};
pub use lease::{LeaseFilter, LeaseRecord, LeaseState};
pub use query::{CliShellApi, ConfigQuery};
pub use sync::SyncOutcome;
