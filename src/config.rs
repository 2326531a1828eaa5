use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::kea::FAMILY_PLACEHOLDER;

/// Where the external collaborators of a sync run live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Kea control socket path; `{inet}` is replaced by the family suffix.
    pub kea_ctrl_socket: String,
    pub hostsd_endpoint: String,
    pub hostsd_timeout: Duration,
    pub cli_shell_api: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            kea_ctrl_socket: "/run/kea/dhcp{inet}-ctrl-socket".to_string(),
            hostsd_endpoint: "ipc:///run/vyos-hostsd/vyos-hostsd.sock".to_string(),
            hostsd_timeout: Duration::from_secs(10),
            cli_shell_api: PathBuf::from("/bin/cli-shell-api"),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if !self.kea_ctrl_socket.contains(FAMILY_PLACEHOLDER) {
            return Err(Error::InvalidConfig(format!(
                "kea_ctrl_socket must contain the {} placeholder",
                FAMILY_PLACEHOLDER
            )));
        }

        if !self.hostsd_endpoint.starts_with("ipc://")
            && !self.hostsd_endpoint.starts_with("tcp://")
        {
            return Err(Error::InvalidConfig(format!(
                "hostsd_endpoint {} must use the ipc:// or tcp:// transport",
                self.hostsd_endpoint
            )));
        }

        if self.hostsd_timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "hostsd_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
