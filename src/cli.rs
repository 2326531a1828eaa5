//! Command line interface.

use std::fmt;

use clap::{ArgGroup, Parser};

/// Address family whose leases are synchronized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    Inet,
    Inet6,
}

impl AddressFamily {
    /// The numeric suffix used in Kea command, socket, and config names.
    pub fn suffix(self) -> &'static str {
        match self {
            AddressFamily::Inet => "4",
            AddressFamily::Inet6 => "6",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Inet => write!(f, "inet"),
            AddressFamily::Inet6 => write!(f, "inet6"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sync-dhcp-lease-to-hosts")]
#[command(version, about = "Publish DHCP server leases as host entries", long_about = None)]
#[command(group(ArgGroup::new("family").required(true).args(["inet", "inet6"])))]
pub struct Cli {
    /// Use IPv4 DHCP leases
    #[arg(long)]
    pub inet: bool,

    /// Use IPv6 DHCP leases
    #[arg(long)]
    pub inet6: bool,
}

impl Cli {
    pub fn family(&self) -> AddressFamily {
        if self.inet {
            AddressFamily::Inet
        } else {
            AddressFamily::Inet6
        }
    }
}
