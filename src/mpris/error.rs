//! Error type shared by every MPRIS operation.

/// D-Bus error names that mean the call never reached a live peer.
const TRANSPORT_ERROR_NAMES: &[&str] = &[
    "org.freedesktop.DBus.Error.NoReply",
    "org.freedesktop.DBus.Error.Timeout",
    "org.freedesktop.DBus.Error.TimedOut",
    "org.freedesktop.DBus.Error.Disconnected",
    "org.freedesktop.DBus.Error.NoServer",
    "org.freedesktop.DBus.Error.NoMemory",
    "org.freedesktop.DBus.Error.IOError",
];

#[derive(thiserror::Error, Debug)]
pub enum MprisError {
    #[error("Failed to connect to the session bus: {0}")]
    Connection(#[source] dbus::Error),
    #[error("D-Bus connection is not open")]
    Disconnected,
    #[error("Failed to create D-Bus message: {0}")]
    Build(String),
    #[error("{method} call was rejected: {source}")]
    Remote {
        method: String,
        #[source]
        source: dbus::Error,
    },
    #[error("{method} call failed in transport: {source}")]
    Transport {
        method: String,
        #[source]
        source: dbus::Error,
    },
    #[error("Failed to parse reply: {0}")]
    Parse(String),
}

impl MprisError {
    /// Sorts a failed call into [`MprisError::Transport`] or [`MprisError::Remote`]
    /// by the D-Bus error name.
    pub fn from_call(method: &str, source: dbus::Error) -> Self {
        let method = method.to_string();
        match source.name() {
            Some(name) if TRANSPORT_ERROR_NAMES.contains(&name) => Self::Transport { method, source },
            _ => Self::Remote { method, source },
        }
    }

    /// The D-Bus error name carried by call failures, if any.
    pub fn dbus_name(&self) -> Option<&str> {
        match self {
            Self::Connection(e) | Self::Remote { source: e, .. } | Self::Transport { source: e, .. } => e.name(),
            _ => None,
        }
    }
}
