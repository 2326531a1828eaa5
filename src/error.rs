//! Error types for the lease-to-hosts sync.
//!
//! The entry routine returns [`Result<T>`], which uses the [`Error`] enum.
//! Every variant is one operational condition; the collaborator errors
//! ([`KeaError`](crate::kea::KeaError), [`HostsdError`](crate::hostsd::HostsdError),
//! [`QueryError`](crate::query::QueryError)) are folded into these before
//! they leave [`sync::run`](crate::sync::run).

/// Conditions that end a sync run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested operation exists on the command line but is not implemented.
    ///
    /// Raised for `--inet6` before any configuration or lease access.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The DHCP server is not configured at all.
    #[error("Unconfigured subsystem: {0}")]
    UnconfiguredSubsystem(String),

    /// The active DHCP server configuration or its leases could not be read.
    ///
    /// The underlying cause is logged, not carried.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// A collaborator failed while the run was in progress.
    ///
    /// For hosts store failures the message is the store's own.
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Invalid collaborator settings.
    ///
    /// Returned by [`Settings::validate`](crate::Settings::validate).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A specialized Result type for sync operations.
pub type Result<T> = std::result::Result<T, Error>;
