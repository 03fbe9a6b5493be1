//! Session bus connection and the blocking transport seam.

use std::time::Duration;

use dbus::Message;
use dbus::blocking::{BlockingSender, Connection};

use crate::mpris::error::MprisError;

/// Per-call timeout, matching libdbus' own default for blocking calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(25);

/// The one capability the controller needs from a bus: send a message and
/// block until its correlated reply or an error comes back.
///
/// Implementations are not expected to handle overlapping calls; callers
/// sharing one transport across threads must serialize around it.
pub trait Transport {
    fn send_blocking(&self, msg: Message, timeout: Duration) -> Result<Message, dbus::Error>;
}

impl Transport for Connection {
    fn send_blocking(&self, msg: Message, timeout: Duration) -> Result<Message, dbus::Error> {
        self.send_with_reply_and_block(msg, timeout)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send_blocking(&self, msg: Message, timeout: Duration) -> Result<Message, dbus::Error> {
        (**self).send_blocking(msg, timeout)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send_blocking(&self, msg: Message, timeout: Duration) -> Result<Message, dbus::Error> {
        (**self).send_blocking(msg, timeout)
    }
}

/// Opens a private connection to the session bus.
pub fn open_session() -> Result<Connection, MprisError> {
    Connection::new_session().map_err(MprisError::Connection)
}
