//! Connection status an instance reports to the host.

use serde::Serialize;
use std::fmt;

/// Status signal shown next to the instance in the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceStatus {
    /// Startup state while the first refresh is in flight.
    Connecting,
    Ok,
    /// Configuration is incomplete; no network activity is attempted.
    BadConfig,
    /// The remote service could not be reached or a required request failed.
    ConnectionFailure,
}

impl InstanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Ok => "ok",
            Self::BadConfig => "bad-config",
            Self::ConnectionFailure => "connection-failure",
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
