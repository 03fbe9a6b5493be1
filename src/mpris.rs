//! Blocking MPRIS2 client: player discovery, transport control and track metadata.

pub mod connection;
pub mod controller;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod message;
pub mod metadata;

pub use connection::{DEFAULT_TIMEOUT, Transport};
pub use controller::MprisController;
pub use discovery::PlayerId;
pub use error::MprisError;
pub use metadata::{MetadataKey, TrackMetadata};

pub const MPRIS_PREFIX: &str = "org.mpris.MediaPlayer2.";
pub const MPRIS_PATH: &str = "/org/mpris/MediaPlayer2";
pub const MPRIS_PLAYER_INTERFACE: &str = "org.mpris.MediaPlayer2.Player";
pub const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";
pub const METADATA_PROPERTY: &str = "Metadata";

pub const DBUS_SERVICE: &str = "org.freedesktop.DBus";
pub const DBUS_PATH: &str = "/org/freedesktop/DBus";
pub const DBUS_INTERFACE: &str = "org.freedesktop.DBus";
