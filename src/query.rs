//! Existence checks against the running configuration tree.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

const DHCP_SERVER_PATH: &[&str] = &["service", "dhcp-server"];
const HOSTFILE_UPDATE_PATH: &[&str] = &["service", "dhcp-server", "hostfile-update"];

/// The configuration query helper could not be run.
#[derive(Debug, thiserror::Error)]
#[error("cannot query configuration path '{path}': {source}")]
pub struct QueryError {
    pub path: String,
    #[source]
    pub source: std::io::Error,
}

/// Read access to the hierarchical configuration tree.
#[async_trait]
pub trait ConfigQuery: Send + Sync {
    /// Returns true if the node at `path` exists in the running configuration.
    async fn exists(&self, path: &[&str]) -> Result<bool, QueryError>;

    /// True if a DHCP server is configured.
    async fn subsystem_configured(&self) -> Result<bool, QueryError> {
        self.exists(DHCP_SERVER_PATH).await
    }

    /// True if the DHCP server publishes its leases to the hosts store.
    async fn hostfile_update_enabled(&self) -> Result<bool, QueryError> {
        self.exists(HOSTFILE_UPDATE_PATH).await
    }
}

/// [`ConfigQuery`] backed by the `cli-shell-api existsActive` helper.
#[derive(Debug, Clone)]
pub struct CliShellApi {
    program: PathBuf,
}

impl CliShellApi {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ConfigQuery for CliShellApi {
    async fn exists(&self, path: &[&str]) -> Result<bool, QueryError> {
        let status = Command::new(&self.program)
            .arg("existsActive")
            .args(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|source| QueryError {
                path: path.join(" "),
                source,
            })?;

        debug!("existsActive {} -> {}", path.join(" "), status);
        Ok(status.success())
    }
}
