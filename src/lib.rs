//! Control and query MPRIS2 media players over the D-Bus session bus.

pub mod mpris;

pub use mpris::controller::Command;
pub use mpris::{MprisController, MprisError, PlayerId, TrackMetadata, Transport};
