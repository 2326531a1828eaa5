//! Lease collection from the Kea DHCP server.
//!
//! This module talks to the server's control socket and turns its lease
//! database into [`LeaseRecord`]s:
//!
//! - `config-get` fetches the active configuration
//! - the shared networks of that configuration are the pools
//! - `lease<N>-get-all` fetches raw leases, which are mapped to records,
//!   scoped to the requested pools, filtered, and de-duplicated by address
//!
//! The control socket accepts one JSON command per connection, answers
//! with one JSON document and closes the connection.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tracing::debug;

use crate::cli::AddressFamily;
use crate::error::{Error, Result};
use crate::lease::{LeaseFilter, LeaseOrigin, LeaseRecord, LeaseState};

/// Kea command result: success.
const RESULT_SUCCESS: i64 = 0;

/// Kea command result: the command succeeded but there was nothing to return.
const RESULT_EMPTY: i64 = 3;

/// Stands for the family suffix in control socket paths.
pub const FAMILY_PLACEHOLDER: &str = "{inet}";

/// Errors talking to the Kea control socket or interpreting its answers.
#[derive(Debug, thiserror::Error)]
pub enum KeaError {
    /// The control socket does not exist, so the server is not running.
    #[error("control socket {0} does not exist")]
    SocketMissing(PathBuf),

    #[error("control socket I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("control socket JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Kea answered with a non-success result code.
    #[error("command '{command}' failed with result {result}: {text}")]
    Command {
        command: String,
        result: i64,
        text: String,
    },

    /// The answer parsed but did not have the expected shape.
    #[error("malformed reply: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct Reply {
    result: i64,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    arguments: Option<Value>,
}

/// A DHCP option as it appears in the active configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Subnet {
    pub id: u32,
    #[serde(default)]
    pub subnet: String,
    #[serde(default)]
    pub option_data: Vec<OptionData>,
}

/// A shared network; its name is what the configuration calls a pool.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SharedNetwork {
    pub name: String,
    #[serde(rename = "subnet4", alias = "subnet6", default)]
    pub subnets: Vec<Subnet>,
    #[serde(default)]
    pub option_data: Vec<OptionData>,
}

fn domain_name(options: &[OptionData]) -> Option<&str> {
    options
        .iter()
        .find(|option| option.name == "domain-name" && !option.data.is_empty())
        .map(|option| option.data.as_str())
}

/// The `arguments` of a successful `config-get`.
#[derive(Debug, Clone)]
pub struct ActiveConfig {
    pub family: AddressFamily,
    pub arguments: Value,
}

impl ActiveConfig {
    pub fn shared_networks(&self) -> std::result::Result<Vec<SharedNetwork>, KeaError> {
        let key = format!("Dhcp{}", self.family.suffix());
        match self
            .arguments
            .get(&key)
            .and_then(|server| server.get("shared-networks"))
        {
            Some(networks) => Ok(Vec::<SharedNetwork>::deserialize(networks)?),
            None => Ok(Vec::new()),
        }
    }

    /// Names of the configured pools.
    pub fn pools(&self) -> std::result::Result<Vec<String>, KeaError> {
        Ok(self
            .shared_networks()?
            .into_iter()
            .map(|network| network.name)
            .collect())
    }

    /// Maps subnet ID → (pool name, domain name).
    ///
    /// The subnet's own `domain-name` option wins over the shared network's.
    fn subnet_index(
        &self,
    ) -> std::result::Result<HashMap<u32, (String, Option<String>)>, KeaError> {
        let mut index = HashMap::new();
        for network in self.shared_networks()? {
            let network_domain = domain_name(&network.option_data);
            for subnet in &network.subnets {
                let domain = domain_name(&subnet.option_data)
                    .or(network_domain)
                    .map(str::to_string);
                index.insert(subnet.id, (network.name.clone(), domain));
            }
        }
        Ok(index)
    }
}

/// A lease as returned by `lease<N>-get-all`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeaLease {
    pub ip_address: String,
    #[serde(default)]
    pub hw_address: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    pub subnet_id: u32,
    pub cltt: i64,
    pub valid_lft: i64,
    #[serde(default)]
    pub state: u8,
}

fn timestamp(seconds: i64) -> std::result::Result<DateTime<Utc>, KeaError> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| KeaError::Malformed(format!("timestamp {} out of range", seconds)))
}

/// Maps raw leases to records and keeps those a sync should see.
///
/// A lease is kept if it still has lifetime left at `now`, belongs to one of
/// `pools`, and matches `filter`. When several leases share an address only
/// the last one survives.
pub fn lease_records(
    config: &ActiveConfig,
    leases: Vec<KeaLease>,
    pools: &[String],
    filter: &LeaseFilter,
    now: DateTime<Utc>,
) -> std::result::Result<Vec<LeaseRecord>, KeaError> {
    let subnets = config.subnet_index()?;
    let mut records: Vec<LeaseRecord> = Vec::new();

    for lease in leases {
        let state = LeaseState::try_from(lease.state).map_err(|code| {
            KeaError::Malformed(format!(
                "lease {} has unknown state {}",
                lease.ip_address, code
            ))
        })?;
        let start = timestamp(lease.cltt)?;
        let expiry = lease.cltt.checked_add(lease.valid_lft).ok_or_else(|| {
            KeaError::Malformed(format!(
                "lease {} lifetime overflows its start time",
                lease.ip_address
            ))
        })?;
        let expires = timestamp(expiry)?;
        let (pool, domain) = match subnets.get(&lease.subnet_id) {
            Some((pool, domain)) => (Some(pool.clone()), domain.clone()),
            None => (None, None),
        };

        let record = LeaseRecord {
            ip: lease.ip_address,
            mac: lease.hw_address.filter(|mac| !mac.is_empty()),
            hostname: lease
                .hostname
                .map(|name| name.trim_end_matches('.').to_string())
                .filter(|name| !name.is_empty()),
            domain,
            pool,
            state,
            origin: LeaseOrigin::Local,
            start,
            expires,
        };

        let alive = lease.valid_lft > 0 && record.expires > now;
        let in_pool = record
            .pool
            .as_ref()
            .is_some_and(|pool| pools.contains(pool));
        if !alive || !in_pool || !filter.matches(&record) {
            continue;
        }

        records.push(record);
    }

    let mut seen = HashSet::new();
    records.reverse();
    records.retain(|record| seen.insert(record.ip.clone()));
    records.reverse();

    Ok(records)
}

/// Read access to a DHCP server's configuration and lease database.
#[async_trait]
pub trait LeaseSource: Send + Sync {
    /// Fetches the configuration the server is running with.
    async fn active_config(
        &self,
        family: AddressFamily,
    ) -> std::result::Result<ActiveConfig, KeaError>;

    /// Derives the configured pools from an active configuration.
    fn pools(&self, config: &ActiveConfig) -> std::result::Result<Vec<String>, KeaError> {
        config.pools()
    }

    /// Fetches current leases scoped to `pools` and matching `filter`.
    async fn server_leases(
        &self,
        config: &ActiveConfig,
        family: AddressFamily,
        pools: &[String],
        filter: &LeaseFilter,
    ) -> std::result::Result<Vec<LeaseRecord>, KeaError>;
}

/// [`LeaseSource`] speaking to Kea over its control socket.
#[derive(Debug, Clone)]
pub struct KeaControl {
    socket_template: String,
}

impl KeaControl {
    /// `socket_template` is a path with [`FAMILY_PLACEHOLDER`] standing for
    /// the family suffix.
    pub fn new(socket_template: impl Into<String>) -> Self {
        Self {
            socket_template: socket_template.into(),
        }
    }

    fn socket_path(&self, family: AddressFamily) -> PathBuf {
        PathBuf::from(self.socket_template.replace(FAMILY_PLACEHOLDER, family.suffix()))
    }

    async fn command(
        &self,
        family: AddressFamily,
        command: &str,
        arguments: Option<Value>,
    ) -> std::result::Result<Reply, KeaError> {
        let path = self.socket_path(family);
        if !path.exists() {
            return Err(KeaError::SocketMissing(path));
        }

        let mut stream = UnixStream::connect(&path).await?;

        let mut payload = json!({ "command": command });
        if let Some(arguments) = arguments {
            payload["arguments"] = arguments;
        }
        stream.write_all(&serde_json::to_vec(&payload)?).await?;
        debug!("Sent '{}' to {}", command, path.display());

        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer).await?;

        Ok(serde_json::from_slice(&buffer)?)
    }
}

fn command_failed(command: &str, reply: &Reply) -> KeaError {
    KeaError::Command {
        command: command.to_string(),
        result: reply.result,
        text: reply.text.clone().unwrap_or_default(),
    }
}

#[async_trait]
impl LeaseSource for KeaControl {
    async fn active_config(
        &self,
        family: AddressFamily,
    ) -> std::result::Result<ActiveConfig, KeaError> {
        let command = "config-get";
        let reply = self.command(family, command, None).await?;
        if reply.result != RESULT_SUCCESS {
            return Err(command_failed(command, &reply));
        }

        let arguments = reply
            .arguments
            .ok_or_else(|| KeaError::Malformed("config-get returned no arguments".to_string()))?;
        Ok(ActiveConfig { family, arguments })
    }

    async fn server_leases(
        &self,
        config: &ActiveConfig,
        family: AddressFamily,
        pools: &[String],
        filter: &LeaseFilter,
    ) -> std::result::Result<Vec<LeaseRecord>, KeaError> {
        let command = format!("lease{}-get-all", family.suffix());
        let reply = self.command(family, &command, None).await?;

        let leases = match reply.result {
            RESULT_SUCCESS => match reply.arguments.as_ref().and_then(|a| a.get("leases")) {
                Some(leases) => Vec::<KeaLease>::deserialize(leases)?,
                None => Vec::new(),
            },
            RESULT_EMPTY => Vec::new(),
            _ => return Err(command_failed(&command, &reply)),
        };

        debug!("Kea reported {} lease(s)", leases.len());
        lease_records(config, leases, pools, filter, Utc::now())
    }
}

/// Collects the leases a sync publishes: every live lease in a configured
/// pool, regardless of state or origin.
///
/// # Errors
///
/// Returns [`Error::DataUnavailable`] if either the active configuration or
/// the leases cannot be fetched. The cause is logged, not returned.
pub async fn collect_leases<S>(source: &S, family: AddressFamily) -> Result<Vec<LeaseRecord>>
where
    S: LeaseSource + ?Sized,
{
    let config = source.active_config(family).await.map_err(|error| {
        debug!("Fetching active DHCP configuration failed: {}", error);
        Error::DataUnavailable("Cannot fetch DHCP server configuration".to_string())
    })?;

    let filter = LeaseFilter::default();
    let leases = match source.pools(&config) {
        Ok(pools) => source.server_leases(&config, family, &pools, &filter).await,
        Err(error) => Err(error),
    }
    .map_err(|error| {
        debug!("Fetching DHCP leases failed: {}", error);
        Error::DataUnavailable("Cannot fetch DHCP server leases".to_string())
    })?;

    Ok(leases)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeDelta;
    use tokio::net::UnixListener;

    fn active_config() -> ActiveConfig {
        ActiveConfig {
            family: AddressFamily::Inet,
            arguments: json!({
                "Dhcp4": {
                    "shared-networks": [
                        {
                            "name": "LAN",
                            "option-data": [
                                {"name": "domain-name", "data": "lan.example.com"}
                            ],
                            "subnet4": [
                                {"id": 1, "subnet": "192.0.2.0/25", "option-data": []},
                                {
                                    "id": 2,
                                    "subnet": "192.0.2.128/25",
                                    "option-data": [
                                        {"name": "domain-name", "data": "iot.example.com"}
                                    ]
                                }
                            ]
                        },
                        {
                            "name": "GUEST",
                            "subnet4": [{"id": 3, "subnet": "198.51.100.0/24"}]
                        }
                    ]
                }
            }),
        }
    }

    fn kea_lease(ip: &str, subnet_id: u32, cltt: i64) -> KeaLease {
        KeaLease {
            ip_address: ip.to_string(),
            hw_address: Some("aa:bb:cc:dd:ee:ff".to_string()),
            hostname: None,
            subnet_id,
            cltt,
            valid_lft: 3600,
            state: 0,
        }
    }

    fn all_pools() -> Vec<String> {
        vec!["LAN".to_string(), "GUEST".to_string()]
    }

    #[test]
    fn test_pools_are_shared_network_names() {
        assert_eq!(active_config().pools().unwrap(), vec!["LAN", "GUEST"]);
    }

    #[test]
    fn test_no_shared_networks_means_no_pools() {
        let config = ActiveConfig {
            family: AddressFamily::Inet,
            arguments: json!({"Dhcp4": {}}),
        };
        assert!(config.pools().unwrap().is_empty());
    }

    #[test]
    fn test_domain_from_subnet_then_network() {
        let now = Utc::now();
        let leases = vec![
            kea_lease("192.0.2.10", 1, now.timestamp()),
            kea_lease("192.0.2.200", 2, now.timestamp()),
            kea_lease("198.51.100.5", 3, now.timestamp()),
        ];

        let records =
            lease_records(&active_config(), leases, &all_pools(), &LeaseFilter::default(), now)
                .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].domain.as_deref(), Some("lan.example.com"));
        assert_eq!(records[0].pool.as_deref(), Some("LAN"));
        assert_eq!(records[1].domain.as_deref(), Some("iot.example.com"));
        assert_eq!(records[2].domain, None);
        assert_eq!(records[2].pool.as_deref(), Some("GUEST"));
    }

    #[test]
    fn test_expired_leases_dropped() {
        let now = Utc::now();
        let stale = now - TimeDelta::hours(2);
        let mut infinite = kea_lease("192.0.2.12", 1, now.timestamp());
        infinite.valid_lft = 0;

        let leases = vec![
            kea_lease("192.0.2.10", 1, stale.timestamp()),
            kea_lease("192.0.2.11", 1, now.timestamp()),
            infinite,
        ];

        let records =
            lease_records(&active_config(), leases, &all_pools(), &LeaseFilter::default(), now)
                .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ip, "192.0.2.11");
    }

    #[test]
    fn test_leases_outside_requested_pools_dropped() {
        let now = Utc::now();
        let leases = vec![
            kea_lease("192.0.2.10", 1, now.timestamp()),
            kea_lease("198.51.100.5", 3, now.timestamp()),
            kea_lease("203.0.113.5", 99, now.timestamp()),
        ];

        let records = lease_records(
            &active_config(),
            leases,
            &["GUEST".to_string()],
            &LeaseFilter::default(),
            now,
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ip, "198.51.100.5");
    }

    #[test]
    fn test_duplicate_address_keeps_last() {
        let now = Utc::now();
        let mut newer = kea_lease("192.0.2.10", 1, now.timestamp());
        newer.hostname = Some("laptop".to_string());
        let leases = vec![
            kea_lease("192.0.2.10", 1, now.timestamp() - 60),
            kea_lease("192.0.2.11", 1, now.timestamp()),
            newer,
        ];

        let records =
            lease_records(&active_config(), leases, &all_pools(), &LeaseFilter::default(), now)
                .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ip, "192.0.2.11");
        assert_eq!(records[1].ip, "192.0.2.10");
        assert_eq!(records[1].hostname.as_deref(), Some("laptop"));
    }

    #[test]
    fn test_hostname_trailing_dot_and_empty_fields() {
        let now = Utc::now();
        let mut dotted = kea_lease("192.0.2.10", 1, now.timestamp());
        dotted.hostname = Some("printer.".to_string());
        let mut blank = kea_lease("192.0.2.11", 1, now.timestamp());
        blank.hostname = Some(String::new());
        blank.hw_address = Some(String::new());

        let records = lease_records(
            &active_config(),
            vec![dotted, blank],
            &all_pools(),
            &LeaseFilter::default(),
            now,
        )
        .unwrap();

        assert_eq!(records[0].hostname.as_deref(), Some("printer"));
        assert_eq!(records[1].hostname, None);
        assert_eq!(records[1].mac, None);
    }

    #[test]
    fn test_state_filter_applied() {
        let now = Utc::now();
        let mut declined = kea_lease("192.0.2.11", 1, now.timestamp());
        declined.state = 1;
        let leases = vec![kea_lease("192.0.2.10", 1, now.timestamp()), declined];
        let filter = LeaseFilter {
            states: vec![LeaseState::Rejected],
            origin: None,
        };

        let records = lease_records(&active_config(), leases, &all_pools(), &filter, now).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].state, LeaseState::Rejected);
    }

    #[test]
    fn test_lifetime_overflow_is_malformed() {
        let mut lease = kea_lease("192.0.2.10", 1, 1_700_000_000);
        lease.valid_lft = i64::MAX;

        let result = lease_records(
            &active_config(),
            vec![lease],
            &all_pools(),
            &LeaseFilter::default(),
            Utc::now(),
        );

        assert!(matches!(result, Err(KeaError::Malformed(_))));
    }

    #[test]
    fn test_unknown_state_is_malformed() {
        let now = Utc::now();
        let mut lease = kea_lease("192.0.2.10", 1, now.timestamp());
        lease.state = 9;

        let result = lease_records(
            &active_config(),
            vec![lease],
            &all_pools(),
            &LeaseFilter::default(),
            now,
        );

        assert!(matches!(result, Err(KeaError::Malformed(_))));
    }

    #[test]
    fn test_kea_lease_deserialize() {
        let lease: KeaLease = serde_json::from_value(json!({
            "ip-address": "192.0.2.10",
            "hw-address": "aa:bb:cc:dd:ee:ff",
            "hostname": "laptop.",
            "subnet-id": 1,
            "cltt": 1700000000,
            "valid-lft": 3600,
            "state": 0,
            "fqdn-fwd": false
        }))
        .unwrap();

        assert_eq!(lease.ip_address, "192.0.2.10");
        assert_eq!(lease.subnet_id, 1);
        assert_eq!(lease.hostname.as_deref(), Some("laptop."));
    }

    /// Serves each reply on its own connection, like the Kea control socket.
    fn serve(listener: UnixListener, replies: Vec<Value>) -> tokio::task::JoinHandle<Vec<Value>> {
        tokio::spawn(async move {
            let mut requests = Vec::new();
            for reply in replies {
                let (mut stream, _) = listener.accept().await.unwrap();
                let mut buffer = vec![0u8; 4096];
                let read = stream.read(&mut buffer).await.unwrap();
                requests.push(serde_json::from_slice(&buffer[..read]).unwrap());
                stream
                    .write_all(&serde_json::to_vec(&reply).unwrap())
                    .await
                    .unwrap();
            }
            requests
        })
    }

    #[tokio::test]
    async fn test_collect_over_control_socket() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("dhcp4-ctrl-socket");
        let listener = UnixListener::bind(&socket).unwrap();
        let now = Utc::now().timestamp();

        let server = serve(
            listener,
            vec![
                json!({"result": 0, "arguments": active_config().arguments}),
                json!({
                    "result": 0,
                    "arguments": {
                        "leases": [{
                            "ip-address": "192.0.2.10",
                            "hw-address": "aa:bb:cc:dd:ee:ff",
                            "hostname": "",
                            "subnet-id": 1,
                            "cltt": now,
                            "valid-lft": 3600,
                            "state": 0
                        }]
                    }
                }),
            ],
        );

        let template = dir.path().join("dhcp{inet}-ctrl-socket");
        let kea = KeaControl::new(template.to_string_lossy());
        let leases = collect_leases(&kea, AddressFamily::Inet).await.unwrap();

        assert_eq!(leases.len(), 1);
        assert_eq!(leases[0].ip, "192.0.2.10");
        assert_eq!(leases[0].domain.as_deref(), Some("lan.example.com"));

        let requests = server.await.unwrap();
        assert_eq!(requests[0], json!({"command": "config-get"}));
        assert_eq!(requests[1], json!({"command": "lease4-get-all"}));
    }

    #[test]
    fn test_socket_path_per_family() {
        let kea = KeaControl::new("/run/kea/dhcp{inet}-ctrl-socket");
        assert_eq!(
            kea.socket_path(AddressFamily::Inet),
            PathBuf::from("/run/kea/dhcp4-ctrl-socket")
        );
        assert_eq!(
            kea.socket_path(AddressFamily::Inet6),
            PathBuf::from("/run/kea/dhcp6-ctrl-socket")
        );
    }

    #[tokio::test]
    async fn test_reply_split_over_many_writes() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("dhcp4-ctrl-socket");
        let listener = UnixListener::bind(&socket).unwrap();
        let now = Utc::now().timestamp();

        let leases: Vec<Value> = (0..2000)
            .map(|index| {
                json!({
                    "ip-address": format!("10.0.{}.{}", index / 250, index % 250 + 1),
                    "hw-address": "aa:bb:cc:dd:ee:ff",
                    "hostname": format!("client-{}", index),
                    "subnet-id": 1,
                    "cltt": now,
                    "valid-lft": 3600,
                    "state": 0
                })
            })
            .collect();
        let reply = serde_json::to_vec(&json!({"result": 0, "arguments": {"leases": leases}}))
            .unwrap();
        assert!(reply.len() > 100 * 1024);

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 4096];
            stream.read(&mut request).await.unwrap();
            for piece in reply.chunks(1000) {
                stream.write_all(piece).await.unwrap();
                stream.flush().await.unwrap();
                tokio::task::yield_now().await;
            }
        });

        let kea = KeaControl::new(dir.path().join("dhcp{inet}-ctrl-socket").to_string_lossy());
        let records = kea
            .server_leases(
                &active_config(),
                AddressFamily::Inet,
                &all_pools(),
                &LeaseFilter::default(),
            )
            .await
            .unwrap();

        assert_eq!(records.len(), 2000);
        assert_eq!(records[1999].hostname.as_deref(), Some("client-1999"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_lease_database() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("dhcp4-ctrl-socket");
        let listener = UnixListener::bind(&socket).unwrap();
        let server = serve(
            listener,
            vec![json!({"result": 3, "text": "0 IPv4 lease(s) found."})],
        );

        let kea = KeaControl::new(dir.path().join("dhcp{inet}-ctrl-socket").to_string_lossy());
        let leases = kea
            .server_leases(
                &active_config(),
                AddressFamily::Inet,
                &all_pools(),
                &LeaseFilter::default(),
            )
            .await
            .unwrap();

        assert!(leases.is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_config_get() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("dhcp4-ctrl-socket");
        let listener = UnixListener::bind(&socket).unwrap();
        let server = serve(listener, vec![json!({"result": 1, "text": "busy"})]);

        let kea = KeaControl::new(dir.path().join("dhcp{inet}-ctrl-socket").to_string_lossy());
        let error = kea.active_config(AddressFamily::Inet).await.unwrap_err();

        assert!(matches!(error, KeaError::Command { result: 1, .. }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_socket_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let kea = KeaControl::new(dir.path().join("dhcp{inet}-ctrl-socket").to_string_lossy());

        let error = kea.active_config(AddressFamily::Inet).await.unwrap_err();
        assert!(matches!(error, KeaError::SocketMissing(_)));

        let error = collect_leases(&kea, AddressFamily::Inet).await.unwrap_err();
        assert_eq!(
            error,
            Error::DataUnavailable("Cannot fetch DHCP server configuration".to_string())
        );
    }
}
